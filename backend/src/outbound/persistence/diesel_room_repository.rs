//! PostgreSQL-backed `RoomRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RoomRepository, RoomRepositoryError};
use crate::domain::{NewRoom, PageRequest, PricePerNight, Room, RoomId, RoomNumber};

use super::diesel_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewRoomRow, RoomRow};
use super::pool::{DbPool, PoolError};
use super::schema::rooms;

const ROOM_NUMBER_UNIQUE: &str = "rooms_number_key";

/// Diesel-backed implementation of the room repository port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RoomRepositoryError {
    map_basic_pool_error(error, RoomRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RoomRepositoryError {
    map_basic_diesel_error(
        error,
        RoomRepositoryError::query,
        RoomRepositoryError::connection,
    )
}

fn row_to_room(row: RoomRow) -> Result<Room, RoomRepositoryError> {
    let RoomRow {
        id,
        number,
        room_type,
        price_per_night,
        description,
    } = row;
    let corrupt = |err: crate::domain::RoomValidationError| {
        RoomRepositoryError::query(format!("stored room {id} invalid: {err}"))
    };
    let details = NewRoom {
        number: RoomNumber::new(number).map_err(corrupt)?,
        room_type,
        price_per_night: PricePerNight::new(price_per_night).map_err(corrupt)?,
        description,
    };
    Ok(Room::new(RoomId::new(id), details))
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn create(&self, room: &NewRoom) -> Result<Room, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewRoomRow {
            number: room.number.as_ref(),
            room_type: room.room_type.as_str(),
            price_per_night: room.price_per_night.as_f64(),
            description: room.description.as_deref(),
        };

        let row = diesel::insert_into(rooms::table)
            .values(&new_row)
            .returning(RoomRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if unique_violation_constraint(&error) == Some(ROOM_NUMBER_UNIQUE) {
                    RoomRepositoryError::duplicate_number(room.number.as_ref())
                } else {
                    map_diesel_error(error)
                }
            })?;

        row_to_room(row)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        rooms::table
            .find(id.as_i64())
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_room)
            .transpose()
    }

    async fn find_by_number(
        &self,
        number: &RoomNumber,
    ) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        rooms::table
            .filter(rooms::number.eq(number.as_ref()))
            .select(RoomRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_room)
            .transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RoomRow> = rooms::table
            .select(RoomRow::as_select())
            .order_by(rooms::id)
            .offset(i64::from(page.skip()))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_room).collect()
    }
}
