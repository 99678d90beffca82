//! Port traits (interfaces for adapters).
//!
//! The orchestration layer depends on these traits, not on the HTTP client.

mod accessors;
mod gateway;

pub use accessors::{CustomerAccessor, ScheduleAccessor};
pub use gateway::{ApiRequest, Method, RequestGateway};
