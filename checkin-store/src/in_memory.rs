//! In-memory booking store for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use checkin_core::{
    Booking, BookingId, BookingRepository, BookingTally, Category, CoreError, CoreResult,
    PaymentStatus, StatsSnapshot,
};

/// Insertion order is the natural order.
#[derive(Clone, Default)]
pub struct InMemoryBookingRepository {
    bookings: Arc<RwLock<Vec<Booking>>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Arc::new(RwLock::new(bookings)),
        }
    }

    pub fn len(&self) -> CoreResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> CoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> CoreResult<std::sync::RwLockReadGuard<'_, Vec<Booking>>> {
        self.bookings
            .read()
            .map_err(|e| CoreError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> CoreResult<std::sync::RwLockWriteGuard<'_, Vec<Booking>>> {
        self.bookings
            .write()
            .map_err(|e| CoreError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_category(&self, category: Category) -> CoreResult<Vec<Booking>> {
        Ok(self
            .read()?
            .iter()
            .filter(|b| category.matches(b))
            .cloned()
            .collect())
    }

    async fn update_payment_status(
        &self,
        id: BookingId,
        status: PaymentStatus,
    ) -> CoreResult<Option<Booking>> {
        let mut bookings = self.write()?;
        Ok(bookings.iter_mut().find(|b| b.id == id).map(|b| {
            b.set_payment_status(status);
            b.clone()
        }))
    }

    async fn delete_booking(&self, id: BookingId) -> CoreResult<bool> {
        let mut bookings = self.write()?;
        let before = bookings.len();
        bookings.retain(|b| b.id != id);
        Ok(bookings.len() < before)
    }

    async fn compute_stats(&self) -> CoreResult<StatsSnapshot> {
        let bookings = self.read()?;
        let tallies: Vec<BookingTally> = bookings.iter().map(BookingTally::from).collect();
        Ok(StatsSnapshot::from_rows(&tallies))
    }

    async fn insert_booking(&self, booking: &Booking) -> CoreResult<()> {
        let mut bookings = self.write()?;
        if bookings.iter().any(|b| b.id == booking.id) {
            return Err(CoreError::InvalidArgument(format!(
                "Booking {} already exists",
                booking.id
            )));
        }
        bookings.push(booking.clone());
        Ok(())
    }
}
