//! PostgreSQL-backed `BookingRepository` implementation using Diesel ORM.
//!
//! `insert_if_available` serialises writers per room with a transaction-scoped
//! advisory lock in the [`BOOKING_LOCK_NAMESPACE`] key space, re-runs the
//! overlap query and inserts in the same transaction. The `bookings_no_overlap` exclusion constraint
//! backs this up at the storage level.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, DateRange, NewBooking, RoomId, UserId};

use super::diesel_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violates_constraint,
};
use super::models::{BookingRow, NewBookingRow};
use super::pool::{DbPool, PoolError};
use super::schema::bookings;

const NO_OVERLAP_CONSTRAINT: &str = "bookings_no_overlap";

/// First key of the two-key advisory locks taken per room while booking.
///
/// The second key is the room id folded into `int4`. Other advisory-lock
/// users of the database must stay clear of this namespace.
pub const BOOKING_LOCK_NAMESPACE: i32 = 0x4854_4c42;

/// Block until this transaction holds the booking lock for `room_id`.
///
/// Room ids beyond `int4` share a slot with their residue; that only adds
/// contention, the exclusion constraint still decides.
async fn lock_room(conn: &mut AsyncPgConnection, room_id: i64) -> QueryResult<usize> {
    diesel::sql_query("SELECT pg_advisory_xact_lock($1, ($2 % 2147483647)::int4)")
        .bind::<Integer, _>(BOOKING_LOCK_NAMESPACE)
        .bind::<BigInt, _>(room_id)
        .execute(conn)
        .await
}

/// Diesel-backed implementation of the booking repository port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BookingRepositoryError {
    map_basic_pool_error(error, BookingRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_basic_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

fn row_to_booking(row: BookingRow) -> Booking {
    Booking {
        id: BookingId::new(row.id),
        user_id: UserId::new(row.user_id),
        room_id: RoomId::new(row.room_id),
        dates: DateRange::new(row.check_in, row.check_out),
        total_price: row.total_price,
    }
}

async fn load_overlapping(
    conn: &mut AsyncPgConnection,
    room_id: i64,
    dates: &DateRange,
) -> QueryResult<Vec<BookingRow>> {
    bookings::table
        .filter(bookings::room_id.eq(room_id))
        .filter(bookings::check_in.lt(dates.check_out()))
        .filter(bookings::check_out.gt(dates.check_in()))
        .select(BookingRow::as_select())
        .order_by(bookings::check_in)
        .load(conn)
        .await
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn find_overlapping(
        &self,
        room_id: RoomId,
        dates: &DateRange,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let rows = load_overlapping(conn, room_id.as_i64(), dates)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_booking).collect())
    }

    async fn insert_if_available(
        &self,
        booking: &NewBooking,
    ) -> Result<Booking, BookingRepositoryError> {
        let mut pooled = self.pool.get().await.map_err(map_pool_error)?;
        let conn: &mut AsyncPgConnection = &mut pooled;
        let room_id = booking.room_id.as_i64();
        let dates = booking.dates;
        let new_row = NewBookingRow {
            user_id: booking.user_id.as_i64(),
            room_id,
            check_in: dates.check_in(),
            check_out: dates.check_out(),
            total_price: booking.total_price,
        };

        let inserted = conn
            .transaction(|conn| {
                async move {
                    lock_room(conn, room_id).await?;

                    if !load_overlapping(conn, room_id, &dates).await?.is_empty() {
                        return Ok::<_, diesel::result::Error>(None);
                    }

                    diesel::insert_into(bookings::table)
                        .values(&new_row)
                        .returning(BookingRow::as_returning())
                        .get_result(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(|error: diesel::result::Error| {
                if violates_constraint(&error, NO_OVERLAP_CONSTRAINT) {
                    BookingRepositoryError::overlap(room_id)
                } else {
                    map_diesel_error(error)
                }
            })?;

        inserted
            .map(row_to_booking)
            .ok_or_else(|| BookingRepositoryError::overlap(room_id))
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BookingRow> = bookings::table
            .filter(bookings::user_id.eq(user_id.as_i64()))
            .select(BookingRow::as_select())
            .order_by((bookings::check_in, bookings::id))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_booking).collect())
    }
}
