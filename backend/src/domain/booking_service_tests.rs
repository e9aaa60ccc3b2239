//! Tests for the booking core and booking service.

use std::sync::Arc;

use chrono::NaiveDate;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockBookingRepository, MockRoomRepository};
use crate::domain::{BookingId, ErrorCode, NewRoom, Username};

fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

fn stay(from: u32, to: u32) -> DateRange {
    DateRange::new(day(1, from), day(1, to))
}

#[fixture]
fn guest() -> User {
    User::new(UserId::new(1), Username::new("guest").expect("valid"), false)
}

#[fixture]
fn room() -> Room {
    let details = NewRoom::try_from_parts("101", "double", 100.0, None).expect("valid room");
    Room::new(RoomId::new(7), details)
}

fn existing_booking(dates: DateRange) -> Booking {
    Booking {
        id: BookingId::new(99),
        user_id: UserId::new(2),
        room_id: RoomId::new(7),
        dates,
        total_price: 50.0,
    }
}

fn accepting_repo() -> MockBookingRepository {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping()
        .returning(|_, _| Ok(Vec::new()));
    repo.expect_insert_if_available()
        .times(1)
        .returning(|booking| Ok(booking.clone().into_booking(BookingId::new(1))));
    repo
}

#[rstest]
#[tokio::test]
async fn available_when_nothing_overlaps() {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping()
        .with(eq(RoomId::new(7)), eq(stay(1, 3)))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let available = is_room_available(&repo, RoomId::new(7), &stay(1, 3))
        .await
        .expect("query succeeds");
    assert!(available);
}

#[rstest]
#[tokio::test]
async fn unavailable_when_a_booking_overlaps() {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping()
        .returning(|_, dates| Ok(vec![existing_booking(*dates)]));

    let available = is_room_available(&repo, RoomId::new(7), &stay(1, 3))
        .await
        .expect("query succeeds");
    assert!(!available);
}

#[rstest]
#[tokio::test]
async fn prices_by_nights_times_rate(guest: User, room: Room) {
    let repo = accepting_repo();

    let booking = create_booking(&repo, &guest, &room, stay(1, 4))
        .await
        .expect("booking succeeds");

    assert_eq!(booking.total_price, 300.0);
    assert_eq!(booking.user_id, guest.id());
    assert_eq!(booking.room_id, room.id());
    assert_eq!(booking.dates, stay(1, 4));
}

#[rstest]
#[case::same_day(stay(5, 5))]
#[case::inverted(stay(5, 1))]
#[tokio::test]
async fn rejects_empty_or_inverted_ranges_without_touching_storage(
    guest: User,
    room: Room,
    #[case] dates: DateRange,
) {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping().times(0);
    repo.expect_insert_if_available().times(0);

    let error = create_booking(&repo, &guest, &room, dates)
        .await
        .expect_err("invalid range");
    assert_eq!(error, BookingError::InvalidRange);
}

#[rstest]
#[tokio::test]
async fn rejects_overlap_before_inserting(guest: User, room: Room) {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping()
        .returning(|_, _| Ok(vec![existing_booking(stay(1, 10))]));
    repo.expect_insert_if_available().times(0);

    let error = create_booking(&repo, &guest, &room, stay(5, 6))
        .await
        .expect_err("overlap");
    assert_eq!(error, BookingError::RoomUnavailable);
}

#[rstest]
#[tokio::test]
async fn racing_insert_surfaces_as_unavailable(guest: User, room: Room) {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping()
        .returning(|_, _| Ok(Vec::new()));
    repo.expect_insert_if_available()
        .times(1)
        .returning(|_| Err(BookingRepositoryError::overlap(7_i64)));

    let error = create_booking(&repo, &guest, &room, stay(1, 2))
        .await
        .expect_err("lost race");
    assert_eq!(error, BookingError::RoomUnavailable);
}

#[rstest]
#[tokio::test]
async fn storage_failures_propagate(guest: User, room: Room) {
    let mut repo = MockBookingRepository::new();
    repo.expect_find_overlapping()
        .returning(|_, _| Err(BookingRepositoryError::connection("refused")));
    repo.expect_insert_if_available().times(0);

    let error = create_booking(&repo, &guest, &room, stay(1, 2))
        .await
        .expect_err("storage down");
    assert_eq!(
        error,
        BookingError::Storage(BookingRepositoryError::connection("refused"))
    );
}

fn service_with(
    bookings: MockBookingRepository,
    room: Option<Room>,
) -> BookingService<MockBookingRepository, MockRoomRepository> {
    let mut rooms = MockRoomRepository::new();
    rooms
        .expect_find_by_id()
        .returning(move |_| Ok(room.clone()));
    BookingService::new(Arc::new(bookings), Arc::new(rooms))
}

#[rstest]
#[tokio::test]
async fn book_room_returns_not_found_for_unknown_room(guest: User) {
    let mut bookings = MockBookingRepository::new();
    bookings.expect_insert_if_available().times(0);
    let service = service_with(bookings, None);

    let error = service
        .book_room(&guest, RoomId::new(404), stay(1, 2))
        .await
        .expect_err("missing room");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Room not found");
}

#[rstest]
#[tokio::test]
async fn book_room_maps_invalid_range_with_details(guest: User, room: Room) {
    let service = service_with(MockBookingRepository::new(), Some(room));

    let error = service
        .book_room(&guest, RoomId::new(7), stay(3, 1))
        .await
        .expect_err("invalid range");
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&serde_json::json!({ "field": "checkOut", "code": "invalid_range" }))
    );
}

#[rstest]
#[tokio::test]
async fn book_room_maps_overlap_to_conflict(guest: User, room: Room) {
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_overlapping()
        .returning(|_, dates| Ok(vec![existing_booking(*dates)]));
    let service = service_with(bookings, Some(room));

    let error = service
        .book_room(&guest, RoomId::new(7), stay(1, 2))
        .await
        .expect_err("taken");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(BookingRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(BookingRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn book_room_maps_storage_errors(
    guest: User,
    room: Room,
    #[case] failure: BookingRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_overlapping()
        .return_once(move |_, _| Err(failure));
    let service = service_with(bookings, Some(room));

    let error = service
        .book_room(&guest, RoomId::new(7), stay(1, 2))
        .await
        .expect_err("storage failure");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[tokio::test]
async fn book_room_persists_priced_booking(guest: User, room: Room) {
    let service = service_with(accepting_repo(), Some(room));

    let booking = service
        .book_room(&guest, RoomId::new(7), stay(1, 3))
        .await
        .expect("booking succeeds");
    assert_eq!(booking.id, BookingId::new(1));
    assert_eq!(booking.total_price, 200.0);
}

#[rstest]
#[tokio::test]
async fn availability_requires_known_room() {
    let service = service_with(MockBookingRepository::new(), None);

    let error = service
        .room_availability(RoomId::new(1), stay(1, 2))
        .await
        .expect_err("missing room");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn availability_reports_free_room(room: Room) {
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_find_overlapping()
        .returning(|_, _| Ok(Vec::new()));
    let service = service_with(bookings, Some(room));

    let available = service
        .room_availability(RoomId::new(7), stay(1, 2))
        .await
        .expect("availability");
    assert!(available);
}

#[rstest]
#[tokio::test]
async fn bookings_for_user_delegates_to_repository() {
    let mut bookings = MockBookingRepository::new();
    bookings
        .expect_list_for_user()
        .with(eq(UserId::new(2)))
        .times(1)
        .returning(|_| Ok(vec![existing_booking(stay(1, 2))]));
    let service = service_with(bookings, None);

    let listed = service
        .bookings_for_user(UserId::new(2))
        .await
        .expect("listing succeeds");
    assert_eq!(listed.len(), 1);
}
