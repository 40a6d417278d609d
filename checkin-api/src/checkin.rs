use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use checkin_core::{BookingSummary, Category, StatsSnapshot};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, CheckinError};
use crate::state::AppState;

/// `{"success": true, "data": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/checkin/stats", get(stats))
        .route("/checkin/details", get(details))
}

/// GET /checkin/stats
async fn stats(
    State(state): State<AppState>,
) -> Result<Json<Envelope<StatsSnapshot>>, CheckinError> {
    let snapshot = state.bookings.compute_stats().await?;
    Ok(Envelope::ok(snapshot))
}

/// GET /checkin/details?type=paid
async fn details(
    State(state): State<AppState>,
    query: Result<Query<DetailsQuery>, QueryRejection>,
) -> Result<Json<Envelope<Vec<BookingSummary>>>, CheckinError> {
    // Repeated or malformed `type` parameters name no single category.
    let Query(query) =
        query.map_err(|_| AppError::InvalidArgument("Unknown type".to_string()))?;
    let kind = query
        .kind
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::InvalidArgument("type query param is required".to_string()))?;
    let category: Category = kind.parse()?;

    let members = state
        .bookings
        .find_by_category(category)
        .await?
        .into_iter()
        .map(BookingSummary::from)
        .collect();

    Ok(Envelope::ok(members))
}
