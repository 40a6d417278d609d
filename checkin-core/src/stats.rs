use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// Counter a stored payment status contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentBucket {
    Paid,
    Pending,
}

const PAID_SPELLINGS: [&str; 4] = ["paid", "completed", "success", "succeeded"];
const PENDING_SPELLINGS: [&str; 5] = ["pending", "unpaid", "failed", "awaiting_payment", ""];

impl PaymentBucket {
    /// Legacy data cleanup: maps every known spelling (case-insensitive) to a
    /// bucket. Missing counts as pending; unknown values land in neither.
    pub fn classify(raw: Option<&str>) -> Option<PaymentBucket> {
        let lowered = raw.unwrap_or("").to_lowercase();
        if PAID_SPELLINGS.contains(&lowered.as_str()) {
            Some(PaymentBucket::Paid)
        } else if PENDING_SPELLINGS.contains(&lowered.as_str()) {
            Some(PaymentBucket::Pending)
        } else {
            None
        }
    }
}

/// The columns the statistics scan reads from each stored booking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingTally {
    pub payment_status: Option<String>,
    pub campusbus: bool,
    pub boarding: bool,
    pub ticket_count: Option<i64>,
}

impl From<&Booking> for BookingTally {
    fn from(b: &Booking) -> Self {
        Self {
            payment_status: Some(b.payment_status.clone()),
            campusbus: b.campusbus,
            boarding: b.boarding,
            ticket_count: b.ticket_count,
        }
    }
}

/// Aggregate counters shown on the check-in panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_bookings: u64,
    pub total_tickets: u64,
    pub paid_count: u64,
    pub pending_count: u64,
    pub transport_yes_count: u64,
    pub hostel_yes_count: u64,
}

impl StatsSnapshot {
    /// Folds one stored row into the counters.
    pub fn record(&mut self, row: &BookingTally) {
        self.total_bookings += 1;
        self.total_tickets += tickets_for(row.ticket_count);

        match PaymentBucket::classify(row.payment_status.as_deref()) {
            Some(PaymentBucket::Paid) => self.paid_count += 1,
            Some(PaymentBucket::Pending) => self.pending_count += 1,
            None => {}
        }
        if row.campusbus {
            self.transport_yes_count += 1;
        }
        if row.boarding {
            self.hostel_yes_count += 1;
        }
    }

    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a BookingTally>,
    {
        let mut snapshot = StatsSnapshot::default();
        for row in rows {
            snapshot.record(row);
        }
        snapshot
    }
}

// One ticket per booking unless a non-negative ticket count is stored.
fn tickets_for(ticket_count: Option<i64>) -> u64 {
    match ticket_count {
        Some(n) if n >= 0 => n as u64,
        _ => 1,
    }
}
