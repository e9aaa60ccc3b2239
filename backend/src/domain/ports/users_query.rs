//! Driving port for user-facing account reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Driving port resolving the account behind a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Resolve the account behind an authenticated session.
    ///
    /// A session pointing at an unknown id yields `unauthorized`.
    async fn current_user(&self, user_id: UserId) -> Result<User, Error>;
}
