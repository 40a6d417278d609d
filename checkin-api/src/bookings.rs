use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use checkin_core::{Booking, BookingId, PaymentStatus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

const BOOKING_NOT_FOUND: &str = "Booking not found";

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdatePaymentStatusResponse {
    pub message: String,
    pub booking: Booking,
}

#[derive(Debug, Serialize)]
pub struct DeleteBookingResponse {
    pub message: String,
    #[serde(rename = "bookingId")]
    pub booking_id: BookingId,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings))
        .route(
            "/bookings/{id}",
            axum::routing::put(update_payment_status).delete(delete_booking),
        )
}

// Ids that are not even well-formed cannot exist in the store.
fn parse_booking_id(raw: &str) -> Result<BookingId, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(BOOKING_NOT_FOUND.to_string()))
}

fn parse_payment_status(body: &[u8]) -> Result<PaymentStatus, AppError> {
    let invalid = || AppError::InvalidArgument("Invalid paymentStatus value".to_string());

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|_| AppError::InvalidArgument("Invalid JSON body".to_string()))?;
    let req: UpdatePaymentStatusRequest = serde_json::from_value(value).map_err(|_| invalid())?;

    Ok(req.payment_status.as_deref().ok_or_else(invalid)?.parse()?)
}

/// GET /bookings
async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<BookingListResponse>, AppError> {
    let bookings = state.bookings.list_bookings().await?;
    Ok(Json(BookingListResponse { bookings }))
}

/// PUT /bookings/{id}
///
/// The body is read as JSON whatever the `Content-Type` header says.
async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UpdatePaymentStatusResponse>, AppError> {
    let status = parse_payment_status(&body)?;

    let id = parse_booking_id(&id)?;
    let booking = state
        .bookings
        .update_payment_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(BOOKING_NOT_FOUND.to_string()))?;

    info!(booking_id = %id, status = %status, "Payment status updated");

    Ok(Json(UpdatePaymentStatusResponse {
        message: "Payment status updated".to_string(),
        booking,
    }))
}

/// DELETE /bookings/{id}
async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteBookingResponse>, AppError> {
    let id = parse_booking_id(&id)?;

    if !state.bookings.delete_booking(id).await? {
        return Err(AppError::NotFound(BOOKING_NOT_FOUND.to_string()));
    }

    info!(booking_id = %id, "Booking deleted");

    Ok(Json(DeleteBookingResponse {
        message: "Booking deleted".to_string(),
        booking_id: id,
    }))
}
