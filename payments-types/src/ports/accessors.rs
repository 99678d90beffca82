//! Resource accessor ports consumed by multi-step operations.
//!
//! Each trait names only the calls an orchestration needs, so an operation
//! can be wired to exactly the accessors it uses and tested against
//! in-memory fakes.

use crate::domain::{Card, Customer, CustomerId, List, Schedule, ScheduleId};
use crate::dto::{CustomerRequest, DestroyResponse, PaginationParams};
use crate::error::GatewayError;

/// Customer calls used by orchestrations.
#[async_trait::async_trait]
pub trait CustomerAccessor: Send + Sync {
    /// Fetches the current state of a customer.
    async fn retrieve_customer(&self, id: &CustomerId) -> Result<Customer, GatewayError>;

    /// Applies a partial update and returns the updated customer.
    async fn update_customer(
        &self,
        id: &CustomerId,
        req: CustomerRequest,
    ) -> Result<Customer, GatewayError>;

    /// Lists one page of the customer's cards.
    async fn list_customer_cards(
        &self,
        id: &CustomerId,
        params: PaginationParams,
    ) -> Result<List<Card>, GatewayError>;

    /// Lists one page of the customer's schedules.
    async fn list_customer_schedules(
        &self,
        id: &CustomerId,
        params: PaginationParams,
    ) -> Result<List<Schedule>, GatewayError>;
}

/// Schedule calls used by orchestrations.
#[async_trait::async_trait]
pub trait ScheduleAccessor: Send + Sync {
    /// Deletes a schedule.
    async fn destroy_schedule(&self, id: &ScheduleId) -> Result<DestroyResponse, GatewayError>;
}
