//! # Payments Service
//!
//! Multi-step customer operations built on the resource accessor ports.
//!
//! ## Architecture
//!
//! - `service/` - [`CustomerService`], the orchestrations
//! - `report/` - Settle-all result of batch schedule deletion
//!
//! The service is generic over `C: CustomerAccessor` and
//! `S: ScheduleAccessor`, so it is wired to the HTTP accessors in
//! production and to in-memory fakes in tests.

pub mod report;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use report::{DestroyOutcome, DestroySchedulesReport, FailedDeletion};
pub use service::{CARD_PAGE_LIMIT, CustomerService, SCHEDULE_PAGE_LIMIT};
