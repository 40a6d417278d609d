use std::sync::Arc;

use checkin_core::{Booking, BookingId, PaymentStatus};
use tracing::{info, warn};

use crate::client::{ApiError, BookingsApi};
use crate::filter::filter_bookings;
use crate::notify::{Notification, Notifier};

/// Lifecycle of the bookings table for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Ready,
    /// Terminal for this page load.
    Failed(String),
}

/// How a mutation ended, as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Server confirmed; the optimistic state stands.
    Committed,
    /// Server refused or was unreachable; local state was restored.
    RolledBack,
    /// The user did not confirm.
    Declined,
    /// Nothing to do: not loaded, unknown booking, or the page was unmounted.
    Ignored,
}

/// Issued by [`BookingsListController::begin_load`].
#[derive(Debug)]
pub struct LoadTicket {
    epoch: u64,
}

/// An in-flight toggle. Carries its own snapshot, so overlapping toggles on
/// the same booking each roll back to what they saw.
#[derive(Debug)]
pub struct PendingToggle {
    epoch: u64,
    previous: Booking,
    target: PaymentStatus,
}

impl PendingToggle {
    pub fn booking_id(&self) -> BookingId {
        self.previous.id
    }

    pub fn target(&self) -> PaymentStatus {
        self.target
    }
}

/// An in-flight delete with the full list as it was before removal.
#[derive(Debug)]
pub struct PendingDelete {
    epoch: u64,
    booking_id: BookingId,
    snapshot: Vec<Booking>,
}

impl PendingDelete {
    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }
}

/// Owns the canonical booking list and the filtered view derived from it.
///
/// Each server round-trip is split into a synchronous `begin_*` step, which
/// applies the optimistic change and hands back a ticket, and a `finish_*`
/// step that reconciles the server's answer. The `async` helpers chain the
/// two for the common case.
pub struct BookingsListController {
    api: Arc<dyn BookingsApi>,
    notifier: Arc<dyn Notifier>,
    state: ListState,
    bookings: Vec<Booking>,
    visible: Vec<Booking>,
    search: String,
    epoch: u64,
}

impl BookingsListController {
    pub fn new(api: Arc<dyn BookingsApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: ListState::Idle,
            bookings: Vec::new(),
            visible: Vec::new(),
            search: String::new(),
            epoch: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Last-known-good server data, with optimistic changes applied.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Rows to render.
    pub fn visible(&self) -> &[Booking] {
        &self.visible
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refresh_view();
    }

    /// Idle -> Loading. Returns `None` once the list has been requested.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.state != ListState::Idle {
            return None;
        }
        self.state = ListState::Loading;
        Some(LoadTicket { epoch: self.epoch })
    }

    /// Loading -> Ready | Failed. Returns `false` if the ticket is stale.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Booking>, ApiError>) -> bool {
        if ticket.epoch != self.epoch || self.state != ListState::Loading {
            return false;
        }
        match result {
            Ok(bookings) => {
                info!("Loaded {} bookings", bookings.len());
                self.bookings = bookings;
                self.state = ListState::Ready;
                self.refresh_view();
            }
            Err(err) => {
                warn!("Failed to load bookings: {}", err);
                let message = err
                    .server_message()
                    .unwrap_or("Failed to fetch bookings")
                    .to_string();
                self.state = ListState::Failed(message);
            }
        }
        true
    }

    /// Fetches the list once per page load.
    pub async fn load(&mut self) {
        let Some(ticket) = self.begin_load() else {
            return;
        };
        let api = Arc::clone(&self.api);
        let result = api.list_bookings().await;
        self.finish_load(ticket, result);
    }

    /// Applies the opposite payment status to a visible booking before the
    /// server has confirmed it.
    pub fn begin_toggle(&mut self, id: BookingId) -> Option<PendingToggle> {
        if self.state != ListState::Ready || !self.visible.iter().any(|b| b.id == id) {
            return None;
        }
        let booking = self.bookings.iter_mut().find(|b| b.id == id)?;
        let previous = booking.clone();
        let target = booking.toggled_payment_status();
        booking.set_payment_status(target);
        self.refresh_view();

        Some(PendingToggle {
            epoch: self.epoch,
            previous,
            target,
        })
    }

    pub fn finish_toggle(
        &mut self,
        pending: PendingToggle,
        result: Result<Booking, ApiError>,
    ) -> MutationOutcome {
        if pending.epoch != self.epoch {
            return MutationOutcome::Ignored;
        }
        match result {
            Ok(_) => {
                info!(booking_id = %pending.booking_id(), status = %pending.target, "Payment status confirmed");
                self.notifier.notify(Notification::success(format!(
                    "Payment marked as {}",
                    pending.target
                )));
                MutationOutcome::Committed
            }
            Err(err) => {
                warn!(booking_id = %pending.booking_id(), "Payment update failed, rolling back: {}", err);
                let id = pending.booking_id();
                if let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) {
                    *booking = pending.previous;
                }
                self.refresh_view();
                self.notifier.notify(Notification::failure(
                    err.server_message()
                        .unwrap_or("Failed to update payment status"),
                ));
                MutationOutcome::RolledBack
            }
        }
    }

    /// paid <-> pending, optimistic with rollback.
    pub async fn toggle_payment(&mut self, id: BookingId) -> MutationOutcome {
        let Some(pending) = self.begin_toggle(id) else {
            return MutationOutcome::Ignored;
        };
        let api = Arc::clone(&self.api);
        let result = api.update_payment_status(id, pending.target).await;
        self.finish_toggle(pending, result)
    }

    /// Removes a visible booking before the server has confirmed it.
    /// Callers must have obtained the user's confirmation first.
    pub fn begin_delete(&mut self, id: BookingId) -> Option<PendingDelete> {
        if self.state != ListState::Ready || !self.visible.iter().any(|b| b.id == id) {
            return None;
        }
        let snapshot = self.bookings.clone();
        self.bookings.retain(|b| b.id != id);
        self.refresh_view();

        Some(PendingDelete {
            epoch: self.epoch,
            booking_id: id,
            snapshot,
        })
    }

    pub fn finish_delete(
        &mut self,
        pending: PendingDelete,
        result: Result<(), ApiError>,
    ) -> MutationOutcome {
        if pending.epoch != self.epoch {
            return MutationOutcome::Ignored;
        }
        match result {
            Ok(()) => {
                info!(booking_id = %pending.booking_id, "Booking deletion confirmed");
                self.notifier.notify(Notification::success("Booking deleted"));
                MutationOutcome::Committed
            }
            Err(err) => {
                warn!(booking_id = %pending.booking_id, "Delete failed, restoring list: {}", err);
                self.bookings = pending.snapshot;
                self.refresh_view();
                self.notifier.notify(Notification::failure(
                    err.server_message().unwrap_or("Failed to delete booking"),
                ));
                MutationOutcome::RolledBack
            }
        }
    }

    /// Deletes after `confirm` approves the booking. Irreversible on success.
    pub async fn delete<F>(&mut self, id: BookingId, confirm: F) -> MutationOutcome
    where
        F: FnOnce(&Booking) -> bool,
    {
        let Some(booking) = self.visible.iter().find(|b| b.id == id) else {
            return MutationOutcome::Ignored;
        };
        if self.state != ListState::Ready {
            return MutationOutcome::Ignored;
        }
        if !confirm(booking) {
            return MutationOutcome::Declined;
        }
        let Some(pending) = self.begin_delete(id) else {
            return MutationOutcome::Ignored;
        };
        let api = Arc::clone(&self.api);
        let result = api.delete_booking(id).await;
        self.finish_delete(pending, result)
    }

    /// Tears down page state. Responses to anything issued before are
    /// discarded; a later [`load`](Self::load) starts fresh.
    pub fn unmount(&mut self) {
        self.epoch += 1;
        self.state = ListState::Idle;
        self.bookings.clear();
        self.visible.clear();
        self.search.clear();
    }

    fn refresh_view(&mut self) {
        self.visible = filter_bookings(&self.bookings, &self.search);
    }
}
