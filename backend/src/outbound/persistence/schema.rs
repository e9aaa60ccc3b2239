//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Int8,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// PHC-formatted argon2 hash.
        password_hash -> Text,
        is_admin -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookable rooms.
    rooms (id) {
        id -> Int8,
        /// Unique room number (max 16 characters).
        number -> Varchar,
        room_type -> Varchar,
        price_per_night -> Float8,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Confirmed stays.
    ///
    /// The `bookings_no_overlap` exclusion constraint rejects overlapping
    /// `[check_in, check_out)` ranges for the same room.
    bookings (id) {
        id -> Int8,
        user_id -> Int8,
        room_id -> Int8,
        check_in -> Date,
        check_out -> Date,
        total_price -> Float8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(bookings, rooms, users);
