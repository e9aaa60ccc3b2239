//! Guest and administrator accounts.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::auth::PasswordHash;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameValidationError {
    /// Blank once trimmed.
    Empty,
    /// Fewer than [`USERNAME_MIN`] characters.
    TooShort {
        /// Required length.
        min: usize,
    },
    /// More than [`USERNAME_MAX`] characters.
    TooLong {
        /// Permitted length.
        max: usize,
    },
    /// Contains characters outside `[A-Za-z0-9_.-]`.
    InvalidCharacters,
}

impl fmt::Display for UsernameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "username must not be empty"),
            Self::TooShort { min } => write!(f, "username must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "username must be at most {max} characters"),
            Self::InvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
        }
    }
}

impl std::error::Error for UsernameValidationError {}

/// Storage-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw storage identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier for persistence adapters.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this only constrains the alphabet.
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Unique login name.
///
/// ## Invariants
/// - 3 to 32 characters drawn from `[A-Za-z0-9_.-]`.
///
/// # Examples
/// ```
/// use hotel_backend::domain::Username;
///
/// let name = Username::new("ada.lovelace").expect("valid username");
/// assert_eq!(name.as_ref(), "ada.lovelace");
/// assert!(Username::new("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate a candidate username.
    ///
    /// # Errors
    ///
    /// Returns the first [`UsernameValidationError`] the input violates.
    pub fn new(username: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UsernameValidationError::Empty);
        }

        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UsernameValidationError::TooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UsernameValidationError::TooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&username) {
            return Err(UsernameValidationError::InvalidCharacters);
        }

        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Public view of an account. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    is_admin: bool,
}

impl User {
    /// Assemble a user from stored parts.
    pub fn new(id: UserId, username: Username, is_admin: bool) -> Self {
        Self {
            id,
            username,
            is_admin,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Whether the account may manage rooms.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Stored account: the user plus their password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public view of the account.
    pub user: User,
    /// Stored credential hash.
    pub password_hash: PasswordHash,
}

/// Account awaiting insertion; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    /// Requested login name.
    pub username: Username,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
    /// Grants room management when set.
    pub is_admin: bool,
}
