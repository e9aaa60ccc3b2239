//! Booking handlers.
//!
//! ```text
//! POST /api/v1/bookings {"roomId":1,"checkIn":"2024-01-01","checkOut":"2024-01-04"}
//! GET /api/v1/my-bookings
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Booking, DateRange, RoomId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_date};

const CHECK_IN: FieldName = FieldName::new("checkIn");
const CHECK_OUT: FieldName = FieldName::new("checkOut");

/// Request body for `POST /api/v1/bookings`.
///
/// The stay is half-open: `checkOut` is the departure day and is not charged.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[schema(example = 1)]
    pub room_id: i64,
    #[schema(example = "2024-01-01")]
    pub check_in: Option<String>,
    #[schema(example = "2024-01-04")]
    pub check_out: Option<String>,
}

/// Booking as returned to its owner.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub room_id: i64,
    pub user_id: i64,
    #[schema(example = "2024-01-01")]
    pub check_in: String,
    #[schema(example = "2024-01-04")]
    pub check_out: String,
    #[schema(example = 300.0)]
    pub total_price: f64,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.as_i64(),
            room_id: booking.room_id.as_i64(),
            user_id: booking.user_id.as_i64(),
            check_in: booking.dates.check_in().format("%Y-%m-%d").to_string(),
            check_out: booking.dates.check_out().format("%Y-%m-%d").to_string(),
            total_price: booking.total_price,
        }
    }
}

/// Book a room for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid date range", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Room not found", body = ErrorSchema),
        (status = 409, description = "Room not available in that range", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let CreateBookingRequest {
        room_id,
        check_in,
        check_out,
    } = payload.into_inner();
    let check_in = parse_required_date(check_in.as_deref(), CHECK_IN)?;
    let check_out = parse_required_date(check_out.as_deref(), CHECK_OUT)?;

    let guest = state.users.current_user(user_id).await?;
    let booking = state
        .bookings
        .book_room(
            &guest,
            RoomId::new(room_id),
            DateRange::new(check_in, check_out),
        )
        .await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(booking)))
}

/// Bookings held by the signed-in user, earliest check-in first.
#[utoipa::path(
    get,
    path = "/api/v1/my-bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listMyBookings"
)]
#[get("/my-bookings")]
pub async fn my_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let user_id = session.require_user_id()?;
    let bookings = state.bookings_query.bookings_for_user(user_id).await?;
    Ok(web::Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
