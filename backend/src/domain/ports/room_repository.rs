//! Port abstraction for room persistence adapters.

use async_trait::async_trait;

use crate::domain::{NewRoom, PageRequest, Room, RoomId, RoomNumber};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by room repository adapters.
    pub enum RoomRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "room repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "room repository query failed: {message}",
        /// Another room already uses this number.
        DuplicateNumber { number: String } => "room number already exists: {number}",
    }
}

/// Storage for the room catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, room: &NewRoom) -> Result<Room, RoomRepositoryError>;

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError>;

    async fn find_by_number(
        &self,
        number: &RoomNumber,
    ) -> Result<Option<Room>, RoomRepositoryError>;

    /// List rooms ordered by id.
    async fn list(&self, page: PageRequest) -> Result<Vec<Room>, RoomRepositoryError>;
}
