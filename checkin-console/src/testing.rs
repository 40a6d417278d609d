//! Scripted [`BookingsApi`] for controller tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use checkin_core::{Booking, BookingId, BookingSummary, Category, PaymentStatus, StatsSnapshot};

use crate::client::{ApiError, BookingsApi};

pub fn booking(name: &str, status: &str) -> Booking {
    let mut b = Booking::new(name, PaymentStatus::Pending);
    b.payment_status = status.to_string();
    b
}

#[derive(Default)]
struct Script {
    bookings: Vec<Booking>,
    list_error: Option<ApiError>,
    update_error: Option<ApiError>,
    delete_error: Option<ApiError>,
    stats: StatsSnapshot,
    stats_error: Option<ApiError>,
    details_error: Option<ApiError>,
    updates: Vec<(BookingId, PaymentStatus)>,
    deletes: Vec<BookingId>,
}

#[derive(Clone, Default)]
pub struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        let api = Self::default();
        api.script.lock().unwrap().bookings = bookings;
        api
    }

    pub fn fail_list(&self, err: ApiError) {
        self.script.lock().unwrap().list_error = Some(err);
    }

    pub fn fail_updates(&self, err: ApiError) {
        self.script.lock().unwrap().update_error = Some(err);
    }

    pub fn fail_deletes(&self, err: ApiError) {
        self.script.lock().unwrap().delete_error = Some(err);
    }

    pub fn set_stats(&self, stats: StatsSnapshot) {
        self.script.lock().unwrap().stats = stats;
    }

    pub fn fail_stats(&self, err: Option<ApiError>) {
        self.script.lock().unwrap().stats_error = err;
    }

    pub fn fail_details(&self, err: Option<ApiError>) {
        self.script.lock().unwrap().details_error = err;
    }

    pub fn updates(&self) -> Vec<(BookingId, PaymentStatus)> {
        self.script.lock().unwrap().updates.clone()
    }

    pub fn deletes(&self) -> Vec<BookingId> {
        self.script.lock().unwrap().deletes.clone()
    }
}

#[async_trait]
impl BookingsApi for ScriptedApi {
    async fn list_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        let script = self.script.lock().unwrap();
        match &script.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(script.bookings.clone()),
        }
    }

    async fn update_payment_status(
        &self,
        id: BookingId,
        status: PaymentStatus,
    ) -> Result<Booking, ApiError> {
        let mut script = self.script.lock().unwrap();
        script.updates.push((id, status));
        if let Some(err) = &script.update_error {
            return Err(err.clone());
        }
        let booking = script
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ApiError::Status { status: 404, message: "Booking not found".into() })?;
        booking.set_payment_status(status);
        Ok(booking.clone())
    }

    async fn delete_booking(&self, id: BookingId) -> Result<(), ApiError> {
        let mut script = self.script.lock().unwrap();
        script.deletes.push(id);
        if let Some(err) = &script.delete_error {
            return Err(err.clone());
        }
        script.bookings.retain(|b| b.id != id);
        Ok(())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let script = self.script.lock().unwrap();
        match &script.stats_error {
            Some(err) => Err(err.clone()),
            None => Ok(script.stats),
        }
    }

    async fn fetch_details(&self, category: Category) -> Result<Vec<BookingSummary>, ApiError> {
        let script = self.script.lock().unwrap();
        if let Some(err) = &script.details_error {
            return Err(err.clone());
        }
        Ok(script
            .bookings
            .iter()
            .filter(|b| category.matches(b))
            .cloned()
            .map(BookingSummary::from)
            .collect())
    }
}
