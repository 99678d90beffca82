use payments_types::{
    ApiRequest, Charge, ChargeId, ChargeRequest, GatewayError, List, PaginationParams,
    RequestGateway,
};

use super::{CHARGES_RESOURCE, request};

/// Charge operations.
pub struct Charges<G> {
    gateway: G,
}

impl<G: RequestGateway> Charges<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Retrieves a charge.
    pub async fn retrieve(&self, charge_id: &ChargeId) -> Result<Charge, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(format!("{CHARGES_RESOURCE}/{charge_id}")),
        )
        .await
    }

    /// Creates a charge.
    pub async fn create(&self, req: &ChargeRequest) -> Result<Charge, GatewayError> {
        request(&self.gateway, ApiRequest::post(CHARGES_RESOURCE).with_data(req)?).await
    }

    /// Updates a charge.
    pub async fn update(
        &self,
        charge_id: &ChargeId,
        req: &ChargeRequest,
    ) -> Result<Charge, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::patch(format!("{CHARGES_RESOURCE}/{charge_id}")).with_data(req)?,
        )
        .await
    }

    /// Reverses an uncaptured charge, releasing the authorized amount.
    pub async fn reverse(&self, charge_id: &ChargeId) -> Result<Charge, GatewayError> {
        self.action(charge_id, "reverse").await
    }

    /// Captures an authorized charge.
    pub async fn capture(&self, charge_id: &ChargeId) -> Result<Charge, GatewayError> {
        self.action(charge_id, "capture").await
    }

    /// Expires a pending charge.
    pub async fn expire(&self, charge_id: &ChargeId) -> Result<Charge, GatewayError> {
        self.action(charge_id, "expire").await
    }

    /// Opens a dispute on a charge.
    pub async fn dispute(&self, charge_id: &ChargeId) -> Result<Charge, GatewayError> {
        self.action(charge_id, "dispute").await
    }

    /// Lists charges.
    pub async fn list(&self, params: Option<PaginationParams>) -> Result<List<Charge>, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(CHARGES_RESOURCE).with_params(params),
        )
        .await
    }

    async fn action(&self, charge_id: &ChargeId, action: &str) -> Result<Charge, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::post(format!("{CHARGES_RESOURCE}/{charge_id}/{action}")),
        )
        .await
    }
}
