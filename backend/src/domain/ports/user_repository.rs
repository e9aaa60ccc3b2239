//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUserAccount, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses this username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Storage for user accounts and their password hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, UserRepositoryError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Look up an account, credentials included, for authentication.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_username_formats_message() {
        let err = UserRepositoryError::duplicate_username("ada");
        assert_eq!(err.to_string(), "username already taken: ada");
    }
}
