use async_trait::async_trait;
use checkin_core::{Booking, BookingId, BookingSummary, Category, PaymentStatus, StatsSnapshot};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message the server put in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message.as_str()),
            _ => None,
        }
    }
}

/// The server surface the dashboard controllers depend on.
#[async_trait]
pub trait BookingsApi: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    async fn update_payment_status(
        &self,
        id: BookingId,
        status: PaymentStatus,
    ) -> Result<Booking, ApiError>;

    async fn delete_booking(&self, id: BookingId) -> Result<(), ApiError>;

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError>;

    async fn fetch_details(&self, category: Category) -> Result<Vec<BookingSummary>, ApiError>;
}

/// HTTP client. Stateless apart from the connection pool.
#[derive(Clone)]
pub struct HttpBookingsApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct BookingList {
    bookings: Vec<Booking>,
}

#[derive(Deserialize)]
struct UpdatedBooking {
    booking: Booking,
}

#[derive(Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl HttpBookingsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !status.is_success() {
        let message = error_message(&bytes).unwrap_or_else(|| {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        });
        return Err(ApiError::Status { status: status.as_u16(), message });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let envelope: Envelope<T> = read_json(response).await?;
    match (envelope.success, envelope.data) {
        (true, Some(data)) => Ok(data),
        _ => Err(ApiError::Status {
            status,
            message: envelope
                .error
                .unwrap_or_else(|| "API returned unsuccessful".to_string()),
        }),
    }
}

// Bookings routes answer `{message}`, check-in routes `{success, error}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl BookingsApi for HttpBookingsApi {
    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let list: BookingList = read_json(send(self.client.get(self.url("/bookings"))).await?).await?;
        Ok(list.bookings)
    }

    async fn update_payment_status(
        &self,
        id: BookingId,
        status: PaymentStatus,
    ) -> Result<Booking, ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/bookings/{}", id)))
            .json(&json!({ "paymentStatus": status }));
        let updated: UpdatedBooking = read_json(send(request).await?).await?;
        Ok(updated.booking)
    }

    async fn delete_booking(&self, id: BookingId) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(&format!("/bookings/{}", id)));
        let _: Value = read_json(send(request).await?).await?;
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        read_envelope(send(self.client.get(self.url("/checkin/stats"))).await?).await
    }

    async fn fetch_details(&self, category: Category) -> Result<Vec<BookingSummary>, ApiError> {
        let request = self
            .client
            .get(self.url("/checkin/details"))
            .query(&[("type", category)]);
        read_envelope(send(request).await?).await
    }
}
