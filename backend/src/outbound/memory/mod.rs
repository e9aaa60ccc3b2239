//! In-memory implementations of the repository ports.
//!
//! Used when no database URL is configured and by tests. One async mutex
//! guards all tables, so `insert_if_available` is atomic with respect to
//! every other write.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    BookingRepository, BookingRepositoryError, RoomRepository, RoomRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Booking, BookingId, DateRange, NewBooking, NewRoom, NewUserAccount, PageRequest, Room, RoomId,
    RoomNumber, User, UserAccount, UserId,
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, UserAccount>,
    rooms: BTreeMap<i64, Room>,
    bookings: BTreeMap<i64, Booking>,
    next_user_id: i64,
    next_room_id: i64,
    next_booking_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl Tables {
    /// Mirror the schema's checks and foreign keys on bookings.
    fn check_booking(&self, booking: &NewBooking) -> Result<(), BookingRepositoryError> {
        if booking.dates.nights() <= 0 {
            return Err(BookingRepositoryError::query(
                "check-out must fall after check-in",
            ));
        }
        if !booking.total_price.is_finite() || booking.total_price < 0.0 {
            return Err(BookingRepositoryError::query(
                "total price must be a non-negative number",
            ));
        }
        if !self.users.contains_key(&booking.user_id.as_i64()) {
            return Err(BookingRepositoryError::query(format!(
                "user {} does not exist",
                booking.user_id
            )));
        }
        if !self.rooms.contains_key(&booking.room_id.as_i64()) {
            return Err(BookingRepositoryError::query(format!(
                "room {} does not exist",
                booking.room_id
            )));
        }
        Ok(())
    }

    fn overlapping(&self, room_id: RoomId, dates: &DateRange) -> Vec<Booking> {
        self.bookings
            .values()
            .filter(|booking| booking.room_id == room_id && booking.dates.overlaps(dates))
            .cloned()
            .collect()
    }
}

/// Process-local store implementing the user, room and booking repositories.
///
/// # Examples
/// ```
/// use hotel_backend::domain::ports::RoomRepository;
/// use hotel_backend::domain::{NewRoom, PageRequest};
/// use hotel_backend::outbound::memory::InMemoryStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryStore::new();
/// let room = NewRoom::try_from_parts("101", "double", 90.0, None).unwrap();
/// store.create(&room).await.unwrap();
/// assert_eq!(store.list(PageRequest::default()).await.unwrap().len(), 1);
/// # });
/// ```
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, UserRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .values()
            .any(|existing| existing.user.username() == &account.username)
        {
            return Err(UserRepositoryError::duplicate_username(
                account.username.as_ref(),
            ));
        }

        let id = next_id(&mut tables.next_user_id);
        let stored = UserAccount {
            user: User::new(UserId::new(id), account.username.clone(), account.is_admin),
            password_hash: account.password_hash.clone(),
        };
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .get(&id.as_i64())
            .map(|account| account.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn create(&self, room: &NewRoom) -> Result<Room, RoomRepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables
            .rooms
            .values()
            .any(|existing| existing.number() == &room.number)
        {
            return Err(RoomRepositoryError::duplicate_number(room.number.as_ref()));
        }

        let id = next_id(&mut tables.next_room_id);
        let stored = Room::new(RoomId::new(id), room.clone());
        tables.rooms.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, RoomRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.rooms.get(&id.as_i64()).cloned())
    }

    async fn find_by_number(
        &self,
        number: &RoomNumber,
    ) -> Result<Option<Room>, RoomRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .rooms
            .values()
            .find(|room| room.number() == number)
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Room>, RoomRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .rooms
            .values()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_overlapping(
        &self,
        room_id: RoomId,
        dates: &DateRange,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.overlapping(room_id, dates))
    }

    async fn insert_if_available(
        &self,
        booking: &NewBooking,
    ) -> Result<Booking, BookingRepositoryError> {
        let mut tables = self.tables.lock().await;
        tables.check_booking(booking)?;
        if !tables.overlapping(booking.room_id, &booking.dates).is_empty() {
            return Err(BookingRepositoryError::overlap(booking.room_id.as_i64()));
        }

        let id = next_id(&mut tables.next_booking_id);
        let stored = booking.clone().into_booking(BookingId::new(id));
        tables.bookings.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Booking>, BookingRepositoryError> {
        let tables = self.tables.lock().await;
        let mut bookings: Vec<Booking> = tables
            .bookings
            .values()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| (booking.dates.check_in(), booking.id));
        Ok(bookings)
    }
}
