//! Builders wiring repositories into the services behind [`HttpState`].

use std::sync::Arc;

use actix_web::web;

use hotel_backend::domain::ports::{BookingRepository, RoomRepository, UserRepository};
use hotel_backend::domain::{AccountService, BookingService, Error, Registration, RoomService};
use hotel_backend::inbound::http::state::{HttpState, HttpStatePorts};
use hotel_backend::outbound::memory::InMemoryStore;
use hotel_backend::outbound::persistence::{
    DieselBookingRepository, DieselRoomRepository, DieselUserRepository,
};
use hotel_backend::outbound::security::Argon2PasswordHasher;
use tracing::info;

use super::ServerConfig;

/// Build the shared HTTP state.
///
/// PostgreSQL repositories are used when a pool is configured, otherwise a
/// single [`InMemoryStore`] backs every port. The bootstrap administrator,
/// if any, is ensured before the state is returned.
pub(super) async fn build_http_state(config: &ServerConfig) -> Result<web::Data<HttpState>, Error> {
    let bootstrap_admin = config.bootstrap_admin.as_ref();
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            build_with_repositories(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselRoomRepository::new(pool.clone())),
                Arc::new(DieselBookingRepository::new(pool.clone())),
                bootstrap_admin,
            )
            .await
        }
        None => {
            info!("no database configured; keeping data in memory");
            let store = Arc::new(InMemoryStore::new());
            build_with_repositories(store.clone(), store.clone(), store, bootstrap_admin).await
        }
    }
}

async fn build_with_repositories<U, R, B>(
    users: Arc<U>,
    rooms: Arc<R>,
    bookings: Arc<B>,
    bootstrap_admin: Option<&Registration>,
) -> Result<web::Data<HttpState>, Error>
where
    U: UserRepository + 'static,
    R: RoomRepository + 'static,
    B: BookingRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
    ));
    if let Some(registration) = bootstrap_admin {
        accounts.ensure_admin(registration).await?;
    }

    let room_service = Arc::new(RoomService::new(rooms.clone()));
    let booking_service = Arc::new(BookingService::new(bookings, rooms));

    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts.clone(),
        users: accounts,
        rooms: room_service.clone(),
        rooms_query: room_service,
        bookings: booking_service.clone(),
        bookings_query: booking_service,
    })))
}
