use async_trait::async_trait;

use crate::booking::{Booking, BookingId, PaymentStatus};
use crate::category::Category;
use crate::stats::StatsSnapshot;
use crate::CoreResult;

/// Access to the persistent booking collection.
///
/// Implementations are stateless per call; the only shared state is the
/// underlying store.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every booking, in the store's natural order.
    async fn list_bookings(&self) -> CoreResult<Vec<Booking>>;

    /// Bookings matching `category`, in the store's natural order.
    async fn find_by_category(&self, category: Category) -> CoreResult<Vec<Booking>>;

    /// Sets the payment status and returns the updated record, or `None`
    /// when no booking has this id.
    async fn update_payment_status(
        &self,
        id: BookingId,
        status: PaymentStatus,
    ) -> CoreResult<Option<Booking>>;

    /// Removes the booking; `false` when no booking has this id.
    async fn delete_booking(&self, id: BookingId) -> CoreResult<bool>;

    /// One pass over the collection.
    async fn compute_stats(&self) -> CoreResult<StatsSnapshot>;

    async fn insert_booking(&self, booking: &Booking) -> CoreResult<()>;
}
