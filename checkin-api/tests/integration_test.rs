use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use checkin_api::{app, AppState};
use checkin_core::{Booking, BookingRepository, PaymentStatus};
use checkin_shared::Masked;
use checkin_store::InMemoryBookingRepository;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn booking(name: &str, status: &str, campusbus: bool, boarding: bool) -> Booking {
    let mut b = Booking::new(name, PaymentStatus::Pending);
    b.payment_status = status.to_string();
    b.campusbus = campusbus;
    b.boarding = boarding;
    b.email = Some(Masked(format!("{}@example.com", name.to_lowercase())));
    b
}

fn router(repo: &InMemoryBookingRepository) -> Router {
    app(AppState::new(Arc::new(repo.clone())))
}

async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn send_raw(router: Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_list_bookings() {
    let a = booking("Asha", "pending", false, false);
    let b = booking("Bilal", "paid", true, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![a.clone(), b.clone()]);

    let (status, body) = send(router(&repo), Method::GET, "/bookings", None).await;

    assert_eq!(status, StatusCode::OK);
    let listed = body["bookings"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["_id"], a.id.to_string());
    assert_eq!(listed[1]["paymentStatus"], "paid");
    assert_eq!(listed[0]["email"], "asha@example.com");
}

#[tokio::test]
async fn test_update_payment_status() {
    let a = booking("Asha", "pending", false, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![a.clone()]);
    let uri = format!("/bookings/{}", a.id);

    let (status, body) = send(
        router(&repo),
        Method::PUT,
        &uri,
        Some(json!({ "paymentStatus": "paid" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Payment status updated");
    assert_eq!(body["booking"]["paymentStatus"], "paid");
    assert_eq!(body["booking"]["firstname"], "Asha");

    // Same request again leaves the same record.
    let (status, again) = send(
        router(&repo),
        Method::PUT,
        &uri,
        Some(json!({ "paymentStatus": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["booking"], body["booking"]);
}

#[tokio::test]
async fn test_update_rejects_invalid_status_without_touching_store() {
    let a = booking("Asha", "pending", false, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![a.clone()]);
    let uri = format!("/bookings/{}", a.id);

    for payload in [
        json!({ "paymentStatus": "completed" }),
        json!({ "paymentStatus": "PAID" }),
        json!({ "paymentStatus": 1 }),
        json!({}),
    ] {
        let (status, body) = send(router(&repo), Method::PUT, &uri, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid paymentStatus value");
    }

    assert_eq!(repo.list_bookings().await.unwrap(), vec![a]);
}

#[tokio::test]
async fn test_update_accepts_body_without_content_type() {
    let a = booking("Asha", "pending", false, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![a.clone()]);
    let uri = format!("/bookings/{}", a.id);

    let (status, body) = send_raw(router(&repo), Method::PUT, &uri, r#"{"paymentStatus":"paid"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["paymentStatus"], "paid");
    assert_eq!(repo.list_bookings().await.unwrap()[0].payment_status, "paid");
}

#[tokio::test]
async fn test_update_rejects_malformed_body() {
    let a = booking("Asha", "pending", false, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![a.clone()]);
    let uri = format!("/bookings/{}", a.id);

    let (status, body) = send_raw(router(&repo), Method::PUT, &uri, "paymentStatus=paid").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON body");
    assert_eq!(repo.list_bookings().await.unwrap(), vec![a]);
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let repo = InMemoryBookingRepository::with_bookings(vec![booking("Asha", "pending", false, false)]);
    let missing = format!("/bookings/{}", Uuid::new_v4());

    let (status, body) = send(
        router(&repo),
        Method::PUT,
        &missing,
        Some(json!({ "paymentStatus": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");

    let (status, _) = send(router(&repo), Method::DELETE, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(router(&repo), Method::DELETE, "/bookings/not-a-real-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(repo.len().unwrap(), 1);
}

#[tokio::test]
async fn test_delete_booking() {
    let a = booking("Asha", "pending", false, false);
    let b = booking("Bilal", "paid", false, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![a.clone(), b.clone()]);

    let (status, body) = send(router(&repo), Method::DELETE, &format!("/bookings/{}", a.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking deleted");
    assert_eq!(body["bookingId"], a.id.to_string());
    assert_eq!(repo.list_bookings().await.unwrap(), vec![b]);
}

#[tokio::test]
async fn test_stats_normalize_mixed_case() {
    let repo = InMemoryBookingRepository::with_bookings(vec![
        booking("A", "paid", true, false),
        booking("B", "pending", false, true),
        booking("C", "PAID", true, true),
    ]);

    let (status, body) = send(router(&repo), Method::GET, "/checkin/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"],
        json!({
            "totalBookings": 3,
            "totalTickets": 3,
            "paidCount": 2,
            "pendingCount": 1,
            "transportYesCount": 2,
            "hostelYesCount": 2,
        })
    );
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let repo = InMemoryBookingRepository::new();

    let (status, body) = send(router(&repo), Method::GET, "/checkin/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalBookings"], 0);
    assert_eq!(body["data"]["totalTickets"], 0);
}

#[tokio::test]
async fn test_details_by_category() {
    let rider = booking("Rider", "pending", true, false);
    let walker = booking("Walker", "paid", false, false);
    let repo = InMemoryBookingRepository::with_bookings(vec![rider.clone(), walker]);

    let (status, body) = send(router(&repo), Method::GET, "/checkin/details?type=transportYes", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["_id"], rider.id.to_string());
    assert!(data[0].get("createdAt").is_none());

    let (_, all) = send(router(&repo), Method::GET, "/checkin/details?type=allTickets", None).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_details_rejects_bad_type() {
    let repo = InMemoryBookingRepository::new();

    let (status, body) = send(router(&repo), Method::GET, "/checkin/details?type=transport", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "Unknown type" }));

    let (status, body) = send(router(&repo), Method::GET, "/checkin/details", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "type query param is required");
}

#[tokio::test]
async fn test_details_rejects_repeated_type() {
    let repo = InMemoryBookingRepository::with_bookings(vec![booking("Asha", "paid", false, false)]);

    let (status, body) = send(router(&repo), Method::GET, "/checkin/details?type=paid&type=all", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "error": "Unknown type" }));
}
