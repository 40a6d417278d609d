use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::booking::Booking;
use crate::CoreError;

/// Named drill-down filter behind each statistics counter. Serializes to
/// the same token `as_str` returns; parsing goes through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Paid,
    Pending,
    TransportYes,
    HostelYes,
    All,
    AllTickets,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Paid,
        Category::Pending,
        Category::TransportYes,
        Category::HostelYes,
        Category::All,
        Category::AllTickets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Paid => "paid",
            Category::Pending => "pending",
            Category::TransportYes => "transportYes",
            Category::HostelYes => "hostelYes",
            Category::All => "all",
            Category::AllTickets => "allTickets",
        }
    }

    /// Membership test. Payment categories compare the stored value exactly,
    /// unlike the statistics counters which normalize legacy spellings.
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Category::Paid => booking.payment_status == "paid",
            Category::Pending => booking.payment_status == "pending",
            Category::TransportYes => booking.campusbus,
            Category::HostelYes => booking.boarding,
            Category::All | Category::AllTickets => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::InvalidArgument("Unknown type".to_string()))
    }
}
