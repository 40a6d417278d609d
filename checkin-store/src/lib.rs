pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod in_memory;

pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use in_memory::InMemoryBookingRepository;
