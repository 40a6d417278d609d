use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use checkin_core::{
    Booking, BookingId, BookingRepository, BookingTally, Category, CoreError, CoreResult,
    PaymentStatus, StatsSnapshot,
};
use checkin_shared::Masked;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const BOOKING_COLUMNS: &str = "id, firstname, lastname, ticket_number, email, phone, \
     enrollment_number, year, campusbus, boarding, payment_status, ticket_count, created_at";

const NATURAL_ORDER: &str = "ORDER BY created_at, id";

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    firstname: String,
    lastname: Option<String>,
    ticket_number: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    enrollment_number: Option<String>,
    year: Option<String>,
    campusbus: bool,
    boarding: bool,
    payment_status: Option<String>,
    ticket_count: Option<i64>,
    created_at: Option<DateTime<Utc>>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            firstname: row.firstname,
            lastname: row.lastname,
            ticket_number: row.ticket_number,
            email: row.email.map(Masked),
            phone: row.phone.map(Masked),
            enrollment_number: row.enrollment_number,
            year: row.year,
            campusbus: row.campusbus,
            boarding: row.boarding,
            payment_status: row.payment_status.unwrap_or_default(),
            ticket_count: row.ticket_count,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TallyRow {
    payment_status: Option<String>,
    campusbus: bool,
    boarding: bool,
    ticket_count: Option<i64>,
}

fn category_filter(category: Category) -> &'static str {
    match category {
        Category::Paid => "WHERE payment_status = 'paid'",
        Category::Pending => "WHERE payment_status = 'pending'",
        Category::TransportYes => "WHERE campusbus = TRUE",
        Category::HostelYes => "WHERE boarding = TRUE",
        Category::All | Category::AllTickets => "",
    }
}

fn storage_error(err: sqlx::Error) -> CoreError {
    CoreError::Storage(err.to_string())
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings {NATURAL_ORDER}");
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_by_category(&self, category: Category) -> CoreResult<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings {} {NATURAL_ORDER}",
            category_filter(category)
        );
        let rows: Vec<BookingRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn update_payment_status(
        &self,
        id: BookingId,
        status: PaymentStatus,
    ) -> CoreResult<Option<Booking>> {
        let sql = format!(
            "UPDATE bookings SET payment_status = $1 WHERE id = $2 RETURNING {BOOKING_COLUMNS}"
        );
        let row: Option<BookingRow> = sqlx::query_as(&sql)
            .bind(status.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(row.map(Booking::from))
    }

    async fn delete_booking(&self, id: BookingId) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn compute_stats(&self) -> CoreResult<StatsSnapshot> {
        let rows: Vec<TallyRow> = sqlx::query_as(
            "SELECT payment_status, campusbus, boarding, ticket_count FROM bookings",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let tallies: Vec<BookingTally> = rows
            .into_iter()
            .map(|r| BookingTally {
                payment_status: r.payment_status,
                campusbus: r.campusbus,
                boarding: r.boarding,
                ticket_count: r.ticket_count,
            })
            .collect();

        Ok(StatsSnapshot::from_rows(&tallies))
    }

    async fn insert_booking(&self, booking: &Booking) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, firstname, lastname, ticket_number, email, phone, enrollment_number, year, campusbus, boarding, payment_status, ticket_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, COALESCE($13, NOW()))
            "#,
        )
        .bind(booking.id)
        .bind(&booking.firstname)
        .bind(&booking.lastname)
        .bind(&booking.ticket_number)
        .bind(booking.email.as_ref().map(|m| m.expose().clone()))
        .bind(booking.phone.as_ref().map(|m| m.expose().clone()))
        .bind(&booking.enrollment_number)
        .bind(&booking.year)
        .bind(booking.campusbus)
        .bind(booking.boarding)
        .bind(&booking.payment_status)
        .bind(booking.ticket_count)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}
