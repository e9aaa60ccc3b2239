//! Driving port for reservation reads.

use async_trait::async_trait;

use crate::domain::{Booking, DateRange, Error, RoomId, UserId};

/// Driving port for availability checks and a guest's own bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Whether `room_id` is free over `dates`. Fails with `not_found` for an
    /// unknown room.
    async fn room_availability(&self, room_id: RoomId, dates: DateRange) -> Result<bool, Error>;

    /// Bookings of `user_id`, ordered by check-in date.
    async fn bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, Error>;
}
