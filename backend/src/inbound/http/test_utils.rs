//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, web};

use crate::domain::ports::UserRepository;
use crate::domain::{
    AccountService, BookingService, Error, NewUserAccount, PasswordHash, RoomService, User,
    UserId, Username,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::security::Argon2PasswordHasher;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state wired to a fresh in-memory store, returned alongside the
/// store so tests can seed data directly.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let accounts = Arc::new(AccountService::new(
        store.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let rooms = Arc::new(RoomService::new(store.clone()));
    let bookings = Arc::new(BookingService::new(store.clone(), store.clone()));
    let state = HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        users: accounts,
        rooms: rooms.clone(),
        rooms_query: rooms,
        bookings: bookings.clone(),
        bookings_query: bookings,
    });
    (state, store)
}

/// Extract the session cookie set on a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Handler signing the session in as the user id in the path, so tests can
/// skip the password round trip.
pub async fn sign_in_as(
    session: SessionContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, Error> {
    session.persist_user(UserId::new(path.into_inner()))?;
    Ok(HttpResponse::Ok().finish())
}

/// Insert an account directly into the store.
pub async fn seed_user(store: &InMemoryStore, username: &str, is_admin: bool) -> User {
    let account = NewUserAccount {
        username: Username::new(username).expect("valid username"),
        password_hash: PasswordHash::new("unused"),
        is_admin,
    };
    UserRepository::create(store, &account)
        .await
        .expect("seed user")
        .user
}
