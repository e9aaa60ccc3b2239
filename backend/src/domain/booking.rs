//! Stays: half-open date ranges and the bookings that occupy them.

use std::fmt;

use chrono::NaiveDate;

use super::room::RoomId;
use super::user::UserId;

/// Storage-assigned booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingId(i64);

impl BookingId {
    /// Wrap a raw storage identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier for persistence adapters.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open stay interval `[check_in, check_out)`.
///
/// The guest occupies the room on the night of `check_in` up to, but not
/// including, the night of `check_out`. No ordering is enforced here:
/// availability queries accept any pair of dates and the booking factory
/// rejects empty or inverted ranges through [`DateRange::nights`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use hotel_backend::domain::DateRange;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date");
/// let first = DateRange::new(day(1), day(5));
/// let second = DateRange::new(day(5), day(10));
/// assert_eq!(first.nights(), 4);
/// assert!(!first.overlaps(&second));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    /// Pair two dates without validating their order.
    pub const fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// First night of the stay.
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure day; the room is free again that night.
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights between the two dates; zero or negative when the range is
    /// empty or inverted.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Two stays overlap when each starts before the other ends.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

/// Confirmed reservation of one room by one user.
///
/// `total_price` is fixed when the booking is created and never recomputed,
/// so later changes to the room rate do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Storage-assigned identifier.
    pub id: BookingId,
    /// Guest holding the reservation.
    pub user_id: UserId,
    /// Reserved room.
    pub room_id: RoomId,
    /// Occupied nights.
    pub dates: DateRange,
    /// Price charged for the whole stay.
    pub total_price: f64,
}

/// Booking awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    /// Guest making the reservation.
    pub user_id: UserId,
    /// Room to reserve.
    pub room_id: RoomId,
    /// Requested nights.
    pub dates: DateRange,
    /// Price computed by the booking factory.
    pub total_price: f64,
}

impl NewBooking {
    /// Attach the identifier assigned by storage.
    pub fn into_booking(self, id: BookingId) -> Booking {
        let NewBooking {
            user_id,
            room_id,
            dates,
            total_price,
        } = self;
        Booking {
            id,
            user_id,
            room_id,
            dates,
            total_price,
        }
    }
}
