use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use checkin_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

pub type BookingId = Uuid;

/// Payment state accepted on writes. Stored rows may still hold legacy
/// spellings, see [`crate::stats::PaymentBucket::classify`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }

    /// paid <-> pending
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Paid => PaymentStatus::Pending,
            PaymentStatus::Pending => PaymentStatus::Paid,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    /// Exact match only; "PAID" or "completed" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            _ => Err(CoreError::InvalidArgument(
                "Invalid paymentStatus value".to_string(),
            )),
        }
    }
}

/// One admission record tied to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: BookingId,
    pub firstname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(rename = "ticketNumber", default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Masked<String>>,
    #[serde(rename = "enrollmentnumber", default, skip_serializing_if = "Option::is_none")]
    pub enrollment_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default)]
    pub campusbus: bool,
    #[serde(default)]
    pub boarding: bool,
    /// Raw stored value. Writes only ever produce "paid" or "pending".
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: String,
    /// Reserved for multi-ticket bookings; absent on every current record.
    #[serde(rename = "ticketCount", default, skip_serializing_if = "Option::is_none")]
    pub ticket_count: Option<i64>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn new(firstname: impl Into<String>, payment_status: PaymentStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            firstname: firstname.into(),
            lastname: None,
            ticket_number: None,
            email: None,
            phone: None,
            enrollment_number: None,
            year: None,
            campusbus: false,
            boarding: false,
            payment_status: payment_status.as_str().to_string(),
            ticket_count: None,
            created_at: Some(Utc::now()),
        }
    }

    /// The stored status when it is exactly one of the two valid values.
    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.payment_status.parse().ok()
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status.as_str().to_string();
    }

    /// Status a toggle moves this booking to. Anything not exactly "paid"
    /// (including legacy spellings) toggles to paid.
    pub fn toggled_payment_status(&self) -> PaymentStatus {
        match self.payment_status() {
            Some(status) => status.toggled(),
            None => PaymentStatus::Paid,
        }
    }
}

/// Field subset returned by the category drill-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    #[serde(rename = "_id")]
    pub id: BookingId,
    pub firstname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(rename = "ticketNumber", default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Masked<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Masked<String>>,
    #[serde(rename = "enrollmentnumber", default, skip_serializing_if = "Option::is_none")]
    pub enrollment_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default)]
    pub campusbus: bool,
    #[serde(default)]
    pub boarding: bool,
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: String,
}

impl From<Booking> for BookingSummary {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            firstname: b.firstname,
            lastname: b.lastname,
            ticket_number: b.ticket_number,
            email: b.email,
            phone: b.phone,
            enrollment_number: b.enrollment_number,
            year: b.year,
            campusbus: b.campusbus,
            boarding: b.boarding,
            payment_status: b.payment_status,
        }
    }
}
