//! Domain primitives, aggregates, ports and services.
//!
//! Purpose: define strongly typed hotel entities (users, rooms, bookings)
//! and the use-cases over them, independent of HTTP and storage.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `User`, `Room`, `Booking` and their validated building blocks.
//! - `is_room_available`/`create_booking`: the booking core.
//! - Services implementing the driving ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod booking;
pub mod booking_service;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod room;
pub mod room_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PasswordHash, Registration,
    RegistrationValidationError,
};
pub use self::booking::{Booking, BookingId, DateRange, NewBooking};
pub use self::booking_service::{BookingError, BookingService, create_booking, is_room_available};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PageRequest};
pub use self::room::{NewRoom, PricePerNight, Room, RoomId, RoomNumber, RoomValidationError};
pub use self::room_service::RoomService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUserAccount, User, UserAccount, UserId, Username, UsernameValidationError};
