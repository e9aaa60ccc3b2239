//! Account services: registration, login, session user lookup and the
//! startup administrator bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    LoginService, PasswordHasher, PasswordHasherError, RegistrationService, UserRepository,
    UserRepositoryError, UsersQuery,
};
use crate::domain::{
    Error, LoginCredentials, NewUserAccount, Registration, User, UserAccount, UserId,
};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => Error::conflict("Username already taken"),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Account service implementing the login, registration and user query
/// driving ports.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create the service over a user repository and password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn create_account(
        &self,
        registration: &Registration,
        is_admin: bool,
    ) -> Result<UserAccount, Error> {
        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let account = NewUserAccount {
            username: registration.username().clone(),
            password_hash,
            is_admin,
        };
        self.users
            .create(&account)
            .await
            .map_err(map_repository_error)
    }

    /// Make sure an administrator with these credentials exists.
    ///
    /// An existing account with the same username is left untouched; if it
    /// is not an administrator a warning is logged and it is returned as is.
    pub async fn ensure_admin(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username().as_ref();
        if let Some(existing) = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?
        {
            if !existing.user.is_admin() {
                warn!(username, "bootstrap admin name belongs to a non-admin account");
            }
            return Ok(existing.user);
        }

        let account = self.create_account(registration, true).await?;
        info!(user_id = %account.user.id(), username, "bootstrap admin created");
        Ok(account.user)
    }
}

#[async_trait]
impl<U, H> RegistrationService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let username = registration.username().as_ref();
        let existing = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict("Username already taken"));
        }

        let account = self.create_account(registration, false).await?;
        info!(user_id = %account.user.id(), username, "user registered");
        Ok(account.user)
    }
}

#[async_trait]
impl<U, H> LoginService for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = credentials.username();
        let Some(account) = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_repository_error)?
        else {
            debug!(username, "login rejected: unknown user");
            return Err(Error::unauthorized("invalid credentials"));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_hasher_error)?;
        if !verified {
            debug!(username, "login rejected: password mismatch");
            return Err(Error::unauthorized("invalid credentials"));
        }

        Ok(account.user)
    }
}

#[async_trait]
impl<U, H> UsersQuery for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "session refers to unknown user");
                Error::unauthorized("login required")
            })
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
