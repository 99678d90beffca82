use async_trait::async_trait;
use payments_types::{
    ApiRequest, DestroyResponse, GatewayError, List, PaginationParams, RequestGateway, Schedule,
    ScheduleAccessor, ScheduleId, ScheduleRequest,
};

use super::{SCHEDULES_RESOURCE, request};

/// Schedule operations.
pub struct Schedules<G> {
    gateway: G,
}

impl<G: RequestGateway> Schedules<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Retrieves a schedule.
    pub async fn retrieve(&self, schedule_id: &ScheduleId) -> Result<Schedule, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(format!("{SCHEDULES_RESOURCE}/{schedule_id}")),
        )
        .await
    }

    /// Creates a schedule.
    pub async fn create(&self, req: &ScheduleRequest) -> Result<Schedule, GatewayError> {
        request(&self.gateway, ApiRequest::post(SCHEDULES_RESOURCE).with_data(req)?).await
    }

    /// Deletes a schedule. Already created charges are not affected.
    pub async fn destroy(&self, schedule_id: &ScheduleId) -> Result<DestroyResponse, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::delete(format!("{SCHEDULES_RESOURCE}/{schedule_id}")),
        )
        .await
    }

    /// Lists all schedules of the account.
    pub async fn list(
        &self,
        params: Option<PaginationParams>,
    ) -> Result<List<Schedule>, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(SCHEDULES_RESOURCE).with_params(params),
        )
        .await
    }
}

#[async_trait]
impl<G: RequestGateway> ScheduleAccessor for Schedules<G> {
    async fn destroy_schedule(&self, id: &ScheduleId) -> Result<DestroyResponse, GatewayError> {
        self.destroy(id).await
    }
}
