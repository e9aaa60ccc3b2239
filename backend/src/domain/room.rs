//! Bookable rooms.

use std::fmt;

/// Maximum length of a room number such as `"101"` or `"B-12"`.
pub const ROOM_NUMBER_MAX: usize = 16;
/// Maximum length of the free-text room type.
pub const ROOM_TYPE_MAX: usize = 64;
/// Maximum length of the optional description.
pub const ROOM_DESCRIPTION_MAX: usize = 2_000;

/// Validation errors returned by [`NewRoom::try_from_parts`].
#[derive(Debug, Clone, PartialEq)]
pub enum RoomValidationError {
    /// Room number was blank once trimmed.
    EmptyNumber,
    /// Room number exceeded [`ROOM_NUMBER_MAX`] characters.
    NumberTooLong {
        /// Permitted length.
        max: usize,
    },
    /// Room type was blank once trimmed.
    EmptyRoomType,
    /// Room type exceeded [`ROOM_TYPE_MAX`] characters.
    RoomTypeTooLong {
        /// Permitted length.
        max: usize,
    },
    /// Nightly price was negative, NaN or infinite.
    InvalidPrice {
        /// Rejected input.
        value: f64,
    },
    /// Description exceeded [`ROOM_DESCRIPTION_MAX`] characters.
    DescriptionTooLong {
        /// Permitted length.
        max: usize,
    },
}

impl fmt::Display for RoomValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNumber => write!(f, "room number must not be empty"),
            Self::NumberTooLong { max } => {
                write!(f, "room number must be at most {max} characters")
            }
            Self::EmptyRoomType => write!(f, "room type must not be empty"),
            Self::RoomTypeTooLong { max } => {
                write!(f, "room type must be at most {max} characters")
            }
            Self::InvalidPrice { value } => write!(
                f,
                "price per night must be a finite, non-negative number (got {value})"
            ),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for RoomValidationError {}

/// Storage-assigned room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(i64);

impl RoomId {
    /// Wrap a raw storage identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier for persistence adapters.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-facing room number, unique across the hotel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Trim and length-check a room number.
    ///
    /// # Errors
    ///
    /// Returns [`RoomValidationError::EmptyNumber`] or
    /// [`RoomValidationError::NumberTooLong`].
    pub fn new(number: impl AsRef<str>) -> Result<Self, RoomValidationError> {
        let trimmed = number.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RoomValidationError::EmptyNumber);
        }
        if trimmed.chars().count() > ROOM_NUMBER_MAX {
            return Err(RoomValidationError::NumberTooLong {
                max: ROOM_NUMBER_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RoomNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Nightly rate.
///
/// ## Invariants
/// - Finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PricePerNight(f64);

impl PricePerNight {
    /// Accept finite, non-negative rates.
    ///
    /// # Errors
    ///
    /// Returns [`RoomValidationError::InvalidPrice`] otherwise.
    pub fn new(value: f64) -> Result<Self, RoomValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(RoomValidationError::InvalidPrice { value });
        }
        Ok(Self(value))
    }

    /// Rate as a plain number.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

/// A room as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: RoomId,
    number: RoomNumber,
    room_type: String,
    price_per_night: PricePerNight,
    description: Option<String>,
}

impl Room {
    /// Combine validated details with the identifier storage assigned.
    pub fn new(id: RoomId, details: NewRoom) -> Self {
        let NewRoom {
            number,
            room_type,
            price_per_night,
            description,
        } = details;
        Self {
            id,
            number,
            room_type,
            price_per_night,
            description,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Unique room number.
    pub fn number(&self) -> &RoomNumber {
        &self.number
    }

    /// Free-text category, e.g. `single`, `double`, `suite`.
    pub fn room_type(&self) -> &str {
        self.room_type.as_str()
    }

    /// Current nightly rate.
    pub fn price_per_night(&self) -> PricePerNight {
        self.price_per_night
    }

    /// Optional marketing text.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Validated room details awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    /// Unique room number.
    pub number: RoomNumber,
    /// Free-text category.
    pub room_type: String,
    /// Nightly rate.
    pub price_per_night: PricePerNight,
    /// Optional marketing text.
    pub description: Option<String>,
}

impl NewRoom {
    /// Validate raw inputs from an inbound adapter.
    ///
    /// Blank descriptions are normalised to `None`.
    ///
    /// # Examples
    /// ```
    /// use hotel_backend::domain::NewRoom;
    ///
    /// let room = NewRoom::try_from_parts("101", "double", 120.0, Some("  ")).unwrap();
    /// assert_eq!(room.number.as_ref(), "101");
    /// assert!(room.description.is_none());
    /// ```
    pub fn try_from_parts(
        number: &str,
        room_type: &str,
        price_per_night: f64,
        description: Option<&str>,
    ) -> Result<Self, RoomValidationError> {
        let number = RoomNumber::new(number)?;

        let room_type = room_type.trim();
        if room_type.is_empty() {
            return Err(RoomValidationError::EmptyRoomType);
        }
        if room_type.chars().count() > ROOM_TYPE_MAX {
            return Err(RoomValidationError::RoomTypeTooLong { max: ROOM_TYPE_MAX });
        }

        let price_per_night = PricePerNight::new(price_per_night)?;

        let description = description
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_owned);
        if description
            .as_deref()
            .is_some_and(|text| text.chars().count() > ROOM_DESCRIPTION_MAX)
        {
            return Err(RoomValidationError::DescriptionTooLong {
                max: ROOM_DESCRIPTION_MAX,
            });
        }

        Ok(Self {
            number,
            room_type: room_type.to_owned(),
            price_per_night,
            description,
        })
    }
}
