//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, LoginService, RegistrationService, RoomCommand, RoomQuery,
    UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub rooms: Arc<dyn RoomCommand>,
    pub rooms_query: Arc<dyn RoomQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub rooms: Arc<dyn RoomCommand>,
    pub rooms_query: Arc<dyn RoomQuery>,
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use hotel_backend::domain::{AccountService, BookingService, RoomService};
    /// use hotel_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use hotel_backend::outbound::memory::InMemoryStore;
    /// use hotel_backend::outbound::security::Argon2PasswordHasher;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let accounts = Arc::new(AccountService::new(
    ///     store.clone(),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// ));
    /// let rooms = Arc::new(RoomService::new(store.clone()));
    /// let bookings = Arc::new(BookingService::new(store.clone(), store));
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts.clone(),
    ///     users: accounts,
    ///     rooms: rooms.clone(),
    ///     rooms_query: rooms,
    ///     bookings: bookings.clone(),
    ///     bookings_query: bookings,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            users,
            rooms,
            rooms_query,
            bookings,
            bookings_query,
        } = ports;
        Self {
            login,
            registration,
            users,
            rooms,
            rooms_query,
            bookings,
            bookings_query,
        }
    }
}
