//! Room catalogue handlers.
//!
//! ```text
//! POST /api/v1/rooms {"number":"101","type":"double","pricePerNight":120.0}
//! GET /api/v1/rooms?skip=0&limit=20
//! GET /api/v1/rooms/{id}
//! GET /api/v1/rooms/{id}/availability?checkIn=2024-01-01&checkOut=2024-01-05
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DateRange, NewRoom, PageRequest, Room, RoomId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, map_room_validation_error, parse_required_date};

const CHECK_IN: FieldName = FieldName::new("checkIn");
const CHECK_OUT: FieldName = FieldName::new("checkOut");

/// Request body for `POST /api/v1/rooms`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[schema(example = "101")]
    pub number: String,
    #[serde(rename = "type")]
    #[schema(example = "double")]
    pub room_type: String,
    #[schema(example = 120.0)]
    pub price_per_night: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Room as returned to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i64,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price_per_night: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id().as_i64(),
            number: room.number().to_string(),
            room_type: room.room_type().to_owned(),
            price_per_night: room.price_per_night().as_f64(),
            description: room.description().map(str::to_owned),
        }
    }
}

/// Offset pagination for room listings.
#[derive(Debug, Deserialize)]
pub struct ListRoomsParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Candidate stay for an availability check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityParams {
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

/// Result of an availability check.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvailabilityResponse {
    /// `true` when no booking overlaps the requested stay.
    pub available: bool,
}

/// Create a room. Administrators only.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 409, description = "Room number already exists", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create_room(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRoomRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let CreateRoomRequest {
        number,
        room_type,
        price_per_night,
        description,
    } = payload.into_inner();
    let room = NewRoom::try_from_parts(&number, &room_type, price_per_night, description.as_deref())
        .map_err(map_room_validation_error)?;
    let actor = state.users.current_user(user_id).await?;
    let created = state.rooms.create_room(&actor, room).await?;
    Ok(HttpResponse::Created().json(RoomResponse::from(created)))
}

/// List rooms ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    params(
        ("skip" = Option<u32>, Query, description = "Rooms to skip, default 0"),
        ("limit" = Option<u32>, Query, description = "Page size, default 20, max 100")
    ),
    responses(
        (status = 200, description = "Rooms", body = [RoomResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "listRooms",
    security([])
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    params: web::Query<ListRoomsParams>,
) -> ApiResult<web::Json<Vec<RoomResponse>>> {
    let ListRoomsParams { skip, limit } = params.into_inner();
    let rooms = state
        .rooms_query
        .list_rooms(PageRequest::new(skip, limit))
        .await?;
    Ok(web::Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Fetch one room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = i64, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room", body = RoomResponse),
        (status = 404, description = "Room not found", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "getRoom",
    security([])
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<RoomResponse>> {
    let room = state
        .rooms_query
        .get_room(RoomId::new(path.into_inner()))
        .await?;
    Ok(web::Json(RoomResponse::from(room)))
}

/// Check whether a room is free for the half-open stay `[checkIn, checkOut)`.
///
/// An empty or inverted range is reported as available: nothing can
/// overlap it. Booking such a range is rejected separately.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/availability",
    params(
        ("id" = i64, Path, description = "Room id"),
        ("checkIn" = String, Query, description = "First night, YYYY-MM-DD"),
        ("checkOut" = String, Query, description = "Departure day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Availability", body = AvailabilityResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema)
    ),
    tags = ["rooms"],
    operation_id = "getRoomAvailability",
    security([])
)]
#[get("/rooms/{id}/availability")]
pub async fn room_availability(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    params: web::Query<AvailabilityParams>,
) -> ApiResult<web::Json<AvailabilityResponse>> {
    let check_in = parse_required_date(params.check_in.as_deref(), CHECK_IN)?;
    let check_out = parse_required_date(params.check_out.as_deref(), CHECK_OUT)?;
    let available = state
        .bookings_query
        .room_availability(
            RoomId::new(path.into_inner()),
            DateRange::new(check_in, check_out),
        )
        .await?;
    Ok(web::Json(AvailabilityResponse { available }))
}

#[cfg(test)]
#[path = "rooms_tests.rs"]
mod tests;
