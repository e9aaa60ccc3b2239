//! Driving port for making reservations.

use async_trait::async_trait;

use crate::domain::{Booking, DateRange, Error, RoomId, User};

/// Driving port for placing bookings on behalf of a signed-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Book `room_id` for `guest` over `dates`.
    ///
    /// Fails with `not_found` for an unknown room, `invalid_request` for an
    /// empty or inverted range and `conflict` when the room is taken.
    async fn book_room(&self, guest: &User, room_id: RoomId, dates: DateRange)
    -> Result<Booking, Error>;
}
