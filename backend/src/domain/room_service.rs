//! Room catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::booking_service::map_room_repository_error;
use crate::domain::ports::{RoomCommand, RoomQuery, RoomRepository};
use crate::domain::{Error, NewRoom, PageRequest, Room, RoomId, User};

/// Room service implementing the catalogue driving ports.
#[derive(Clone)]
pub struct RoomService<R> {
    rooms: Arc<R>,
}

impl<R> RoomService<R> {
    /// Create the service over a room repository.
    pub fn new(rooms: Arc<R>) -> Self {
        Self { rooms }
    }
}

#[async_trait]
impl<R> RoomCommand for RoomService<R>
where
    R: RoomRepository,
{
    async fn create_room(&self, actor: &User, room: NewRoom) -> Result<Room, Error> {
        if !actor.is_admin() {
            warn!(user_id = %actor.id(), "non-admin attempted to create a room");
            return Err(Error::forbidden("Admin privileges required"));
        }

        let existing = self
            .rooms
            .find_by_number(&room.number)
            .await
            .map_err(map_room_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict("Room number already exists"));
        }

        let created = self
            .rooms
            .create(&room)
            .await
            .map_err(map_room_repository_error)?;
        info!(room_id = %created.id(), number = %created.number(), "room created");
        Ok(created)
    }
}

#[async_trait]
impl<R> RoomQuery for RoomService<R>
where
    R: RoomRepository,
{
    async fn list_rooms(&self, page: PageRequest) -> Result<Vec<Room>, Error> {
        self.rooms
            .list(page)
            .await
            .map_err(map_room_repository_error)
    }

    async fn get_room(&self, id: RoomId) -> Result<Room, Error> {
        self.rooms
            .find_by_id(id)
            .await
            .map_err(map_room_repository_error)?
            .ok_or_else(|| Error::not_found("Room not found"))
    }
}
