//! Client-side state for the admin dashboard: the bookings table and the
//! check-in statistics panel. Rendering lives elsewhere; these controllers
//! own the data and talk to the server through [`BookingsApi`].

pub mod bookings_list;
pub mod client;
pub mod filter;
pub mod notify;
pub mod stats_panel;

pub use bookings_list::{BookingsListController, ListState, MutationOutcome};
pub use client::{ApiError, BookingsApi, HttpBookingsApi};
pub use filter::filter_bookings;
pub use notify::{Level, Notification, Notifier};
pub use stats_panel::{DrillDown, PanelState, StatsPanelController};

#[cfg(test)]
mod testing;
