//! # Payments Types
//!
//! Resource types and port traits for the payments API client.
//! This crate has no IO dependencies - only data structures and the
//! trait definitions the client and the orchestration layer meet at.
//!
//! ## Layout
//!
//! - `domain/` - Resources returned by the API (Customer, Card, Schedule, Charge)
//! - `ports/` - Request gateway and resource accessor traits
//! - `dto/` - Request bodies, pagination parameters, destroy confirmations
//! - `error/` - The gateway error type

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Card, CardId, Charge, ChargeId, ChargeStatus, Customer, CustomerId, List, Schedule,
    ScheduleId, ScheduleStatus,
};
pub use dto::*;
pub use error::GatewayError;
pub use ports::{ApiRequest, CustomerAccessor, Method, RequestGateway, ScheduleAccessor};
