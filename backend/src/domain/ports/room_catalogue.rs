//! Driving ports for the room catalogue.

use async_trait::async_trait;

use crate::domain::{Error, NewRoom, PageRequest, Room, RoomId, User};

/// Room administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomCommand: Send + Sync {
    /// Create a room on behalf of `actor`, who must be an administrator.
    async fn create_room(&self, actor: &User, room: NewRoom) -> Result<Room, Error>;
}

/// Public room lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomQuery: Send + Sync {
    async fn list_rooms(&self, page: PageRequest) -> Result<Vec<Room>, Error>;

    /// Fetch a room or fail with `not_found`.
    async fn get_room(&self, id: RoomId) -> Result<Room, Error>;
}
