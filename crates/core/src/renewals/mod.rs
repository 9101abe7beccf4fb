//! Renewal projection.
//!
//! Computes the dates on which subscriptions charge: every occurrence in a
//! year or month (for the calendar view), the next renewal from a given day,
//! and the list of renewals coming up soon.

mod calendar;
mod renewal_projector;
mod renewals_model;
mod renewals_service;
mod renewals_traits;

pub use calendar::{calendar_overview, upcoming_renewals};
pub use renewal_projector::{next_occurrences, next_renewal_date};
pub use renewals_model::*;
pub use renewals_service::*;
pub use renewals_traits::*;
