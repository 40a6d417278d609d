pub mod booking;
pub mod category;
pub mod repository;
pub mod stats;

pub use booking::{Booking, BookingId, BookingSummary, PaymentStatus};
pub use category::Category;
pub use repository::BookingRepository;
pub use stats::{BookingTally, PaymentBucket, StatsSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
