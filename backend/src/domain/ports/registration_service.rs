//! Driving port for guest sign-up.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Driving port for guest sign-up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a non-admin account. Fails with a conflict when the username is
    /// taken.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
