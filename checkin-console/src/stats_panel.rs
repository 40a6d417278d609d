use std::sync::Arc;

use checkin_core::{BookingSummary, Category, StatsSnapshot};
use tracing::{info, warn};

use crate::client::{ApiError, BookingsApi};
use crate::notify::{Notification, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading,
    Ready(StatsSnapshot),
    Failed(String),
}

/// Member list for one counter. Independent of [`PanelState`]: a failed
/// drill-down leaves loaded counters alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillDown {
    Empty,
    Loading(Category),
    Populated {
        category: Category,
        members: Vec<BookingSummary>,
    },
    Failed {
        category: Category,
        message: String,
    },
}

#[derive(Debug)]
pub struct StatsTicket {
    epoch: u64,
    seq: u64,
}

#[derive(Debug)]
pub struct DrillTicket {
    epoch: u64,
    seq: u64,
    category: Category,
}

impl DrillTicket {
    pub fn category(&self) -> Category {
        self.category
    }
}

pub struct StatsPanelController {
    api: Arc<dyn BookingsApi>,
    notifier: Arc<dyn Notifier>,
    state: PanelState,
    drill: DrillDown,
    epoch: u64,
    stats_seq: u64,
    drill_seq: u64,
}

impl StatsPanelController {
    pub fn new(api: Arc<dyn BookingsApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: PanelState::Idle,
            drill: DrillDown::Empty,
            epoch: 0,
            stats_seq: 0,
            drill_seq: 0,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn drill_down(&self) -> &DrillDown {
        &self.drill
    }

    pub fn stats(&self) -> Option<&StatsSnapshot> {
        match &self.state {
            PanelState::Ready(stats) => Some(stats),
            _ => None,
        }
    }

    /// Any state -> Loading. Only the newest request's answer is applied.
    pub fn begin_refresh(&mut self) -> StatsTicket {
        self.stats_seq += 1;
        self.state = PanelState::Loading;
        StatsTicket {
            epoch: self.epoch,
            seq: self.stats_seq,
        }
    }

    pub fn finish_refresh(&mut self, ticket: StatsTicket, result: Result<StatsSnapshot, ApiError>) -> bool {
        if ticket.epoch != self.epoch || ticket.seq != self.stats_seq {
            return false;
        }
        self.state = match result {
            Ok(stats) => {
                info!(total = stats.total_bookings, "Check-in stats loaded");
                PanelState::Ready(stats)
            }
            Err(err) => {
                warn!("Failed to load check-in stats: {}", err);
                PanelState::Failed(err.server_message().map(str::to_string).unwrap_or_else(|| err.to_string()))
            }
        };
        true
    }

    /// Initial load and the explicit refresh action.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let api = Arc::clone(&self.api);
        let result = api.fetch_stats().await;
        self.finish_refresh(ticket, result);
    }

    /// Starts loading members of `category`. Requires loaded counters.
    pub fn begin_drill(&mut self, category: Category) -> Option<DrillTicket> {
        if !matches!(self.state, PanelState::Ready(_)) {
            return None;
        }
        self.drill_seq += 1;
        self.drill = DrillDown::Loading(category);
        Some(DrillTicket {
            epoch: self.epoch,
            seq: self.drill_seq,
            category,
        })
    }

    /// Applies a drill-down answer unless a newer selection superseded it.
    pub fn finish_drill(
        &mut self,
        ticket: DrillTicket,
        result: Result<Vec<BookingSummary>, ApiError>,
    ) -> bool {
        if ticket.epoch != self.epoch || ticket.seq != self.drill_seq {
            return false;
        }
        let category = ticket.category;
        self.drill = match result {
            Ok(members) => DrillDown::Populated { category, members },
            Err(err) => {
                warn!(%category, "Failed to load details: {}", err);
                let message = err
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                self.notifier.notify(Notification::failure(message.clone()));
                DrillDown::Failed { category, message }
            }
        };
        true
    }

    pub async fn drill_into(&mut self, category: Category) {
        let Some(ticket) = self.begin_drill(category) else {
            return;
        };
        let api = Arc::clone(&self.api);
        let result = api.fetch_details(category).await;
        self.finish_drill(ticket, result);
    }

    pub fn clear_drill(&mut self) {
        self.drill_seq += 1;
        self.drill = DrillDown::Empty;
    }

    pub fn unmount(&mut self) {
        self.epoch += 1;
        self.state = PanelState::Idle;
        self.drill = DrillDown::Empty;
    }
}
