//! Booking core: availability checks and the booking factory, plus the
//! service that exposes them through the booking driving ports.
//!
//! [`is_room_available`] and [`create_booking`] take the repository as an
//! explicit parameter so they can be driven against any storage adapter.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError, RoomRepository,
    RoomRepositoryError,
};
use crate::domain::{Booking, DateRange, Error, NewBooking, Room, RoomId, User, UserId};

/// Reasons a booking cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Check-out is not strictly after check-in.
    #[error("check-out must be after check-in")]
    InvalidRange,
    /// Another booking for the room overlaps the requested stay.
    #[error("room is not available for the requested dates")]
    RoomUnavailable,
    /// The storage layer failed.
    #[error(transparent)]
    Storage(BookingRepositoryError),
}

impl From<BookingRepositoryError> for BookingError {
    fn from(error: BookingRepositoryError) -> Self {
        match error {
            BookingRepositoryError::Overlap { .. } => Self::RoomUnavailable,
            other => Self::Storage(other),
        }
    }
}

/// Whether no stored booking for `room_id` overlaps `dates`.
///
/// Does not check that the room exists and places no ordering requirement on
/// the dates; an inverted range overlaps nothing.
pub async fn is_room_available<R>(
    repo: &R,
    room_id: RoomId,
    dates: &DateRange,
) -> Result<bool, BookingRepositoryError>
where
    R: BookingRepository + ?Sized,
{
    let overlapping = repo.find_overlapping(room_id, dates).await?;
    Ok(overlapping.is_empty())
}

/// Validate, price and persist a booking of `room` for `user`.
///
/// The price uses the `room` snapshot passed in. Nothing is written when any
/// step fails. The final insert re-checks availability atomically, so a
/// racing booking that slips in after the first check still surfaces as
/// [`BookingError::RoomUnavailable`].
pub async fn create_booking<R>(
    repo: &R,
    user: &User,
    room: &Room,
    dates: DateRange,
) -> Result<Booking, BookingError>
where
    R: BookingRepository + ?Sized,
{
    let nights = dates.nights();
    if nights <= 0 {
        return Err(BookingError::InvalidRange);
    }

    if !is_room_available(repo, room.id(), &dates).await? {
        return Err(BookingError::RoomUnavailable);
    }

    let total_price = nights as f64 * room.price_per_night().as_f64();
    let booking = NewBooking {
        user_id: user.id(),
        room_id: room.id(),
        dates,
        total_price,
    };

    Ok(repo.insert_if_available(&booking).await?)
}

pub(crate) fn map_booking_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::Overlap { .. } => {
            Error::conflict("Room not available in that range")
        }
    }
}

pub(crate) fn map_room_repository_error(error: RoomRepositoryError) -> Error {
    match error {
        RoomRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("room repository unavailable: {message}"))
        }
        RoomRepositoryError::Query { message } => {
            Error::internal(format!("room repository error: {message}"))
        }
        RoomRepositoryError::DuplicateNumber { .. } => Error::conflict("Room number already exists"),
    }
}

fn map_booking_error(error: BookingError) -> Error {
    match error {
        BookingError::InvalidRange => Error::invalid_request("Invalid date range").with_details(
            json!({ "field": "checkOut", "code": "invalid_range" }),
        ),
        BookingError::RoomUnavailable => Error::conflict("Room not available in that range"),
        BookingError::Storage(error) => map_booking_repository_error(error),
    }
}

/// Booking service implementing the booking driving ports.
#[derive(Clone)]
pub struct BookingService<B, R> {
    bookings: Arc<B>,
    rooms: Arc<R>,
}

impl<B, R> BookingService<B, R> {
    /// Create the service over the booking and room repositories.
    pub fn new(bookings: Arc<B>, rooms: Arc<R>) -> Self {
        Self { bookings, rooms }
    }
}

impl<B, R> BookingService<B, R>
where
    R: RoomRepository,
{
    async fn load_room(&self, room_id: RoomId) -> Result<Room, Error> {
        self.rooms
            .find_by_id(room_id)
            .await
            .map_err(map_room_repository_error)?
            .ok_or_else(|| Error::not_found("Room not found"))
    }
}

#[async_trait]
impl<B, R> BookingCommand for BookingService<B, R>
where
    B: BookingRepository,
    R: RoomRepository,
{
    async fn book_room(
        &self,
        guest: &User,
        room_id: RoomId,
        dates: DateRange,
    ) -> Result<Booking, Error> {
        let room = self.load_room(room_id).await?;
        match create_booking(self.bookings.as_ref(), guest, &room, dates).await {
            Ok(booking) => {
                info!(
                    booking_id = %booking.id,
                    room_id = %room_id,
                    user_id = %guest.id(),
                    nights = dates.nights(),
                    total_price = booking.total_price,
                    "booking created"
                );
                Ok(booking)
            }
            Err(error) => {
                debug!(room_id = %room_id, user_id = %guest.id(), %error, "booking rejected");
                Err(map_booking_error(error))
            }
        }
    }
}

#[async_trait]
impl<B, R> BookingQuery for BookingService<B, R>
where
    B: BookingRepository,
    R: RoomRepository,
{
    async fn room_availability(&self, room_id: RoomId, dates: DateRange) -> Result<bool, Error> {
        self.load_room(room_id).await?;
        is_room_available(self.bookings.as_ref(), room_id, &dates)
            .await
            .map_err(map_booking_repository_error)
    }

    async fn bookings_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, Error> {
        self.bookings
            .list_for_user(user_id)
            .await
            .map_err(map_booking_repository_error)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
