//! Port abstraction for booking persistence.
//!
//! Adapters must make [`BookingRepository::insert_if_available`] atomic with
//! respect to other inserts for the same room: the overlap re-check and the
//! insert happen under one lock or transaction, so two overlapping stays can
//! never both be persisted.
//!
//! Adapters also refuse rows that break the booking invariants (an empty or
//! inverted stay, a negative price, an unknown user or room) with
//! [`BookingRepositoryError::Query`], whether the check lives in code or in
//! schema constraints.

use async_trait::async_trait;

use crate::domain::{Booking, DateRange, NewBooking, RoomId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
        /// The stay overlaps an existing booking for the same room.
        Overlap { room_id: i64 } => "room {room_id} already booked for an overlapping stay",
    }
}

/// Storage for confirmed bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Bookings for `room_id` whose stay overlaps `dates`.
    async fn find_overlapping(
        &self,
        room_id: RoomId,
        dates: &DateRange,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Re-check availability and insert in one atomic step.
    ///
    /// Returns [`BookingRepositoryError::Overlap`] when another booking for
    /// the room overlaps the requested stay, and
    /// [`BookingRepositoryError::Query`] when the record itself is invalid.
    async fn insert_if_available(
        &self,
        booking: &NewBooking,
    ) -> Result<Booking, BookingRepositoryError>;

    /// Bookings made by `user_id`, ordered by check-in date.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError>;
}
