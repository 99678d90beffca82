use async_trait::async_trait;
use payments_types::{
    ApiRequest, Card, CardId, Customer, CustomerAccessor, CustomerId, CustomerRequest,
    DestroyResponse, GatewayError, List, PaginationParams, RequestGateway, Schedule,
};

use super::cards::card_path;
use super::{CARDS_RESOURCE, CUSTOMERS_RESOURCE, SCHEDULES_RESOURCE, request};

/// Customer operations.
pub struct Customers<G> {
    gateway: G,
}

impl<G: RequestGateway> Customers<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Retrieves a customer.
    pub async fn retrieve(&self, customer_id: &CustomerId) -> Result<Customer, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(format!("{CUSTOMERS_RESOURCE}/{customer_id}")),
        )
        .await
    }

    /// Creates a customer.
    pub async fn create(&self, req: &CustomerRequest) -> Result<Customer, GatewayError> {
        request(&self.gateway, ApiRequest::post(CUSTOMERS_RESOURCE).with_data(req)?).await
    }

    /// Updates a customer. Setting `card` attaches a new card from a token.
    pub async fn update(
        &self,
        customer_id: &CustomerId,
        req: &CustomerRequest,
    ) -> Result<Customer, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::patch(format!("{CUSTOMERS_RESOURCE}/{customer_id}")).with_data(req)?,
        )
        .await
    }

    /// Deletes a customer.
    pub async fn destroy(&self, customer_id: &CustomerId) -> Result<DestroyResponse, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::delete(format!("{CUSTOMERS_RESOURCE}/{customer_id}")),
        )
        .await
    }

    /// Lists customers.
    pub async fn list(
        &self,
        params: Option<PaginationParams>,
    ) -> Result<List<Customer>, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(CUSTOMERS_RESOURCE).with_params(params),
        )
        .await
    }

    /// Deletes a card belonging to the customer.
    pub async fn destroy_card(
        &self,
        customer_id: &CustomerId,
        card_id: &CardId,
    ) -> Result<DestroyResponse, GatewayError> {
        request(&self.gateway, ApiRequest::delete(card_path(customer_id, card_id))).await
    }

    /// Makes an existing card the customer's default.
    pub async fn update_default_card(
        &self,
        customer_id: &CustomerId,
        card_id: CardId,
    ) -> Result<Customer, GatewayError> {
        self.update(customer_id, &CustomerRequest::set_default_card(card_id))
            .await
    }

    /// Lists the customer's cards.
    pub async fn list_cards(
        &self,
        customer_id: &CustomerId,
        params: Option<PaginationParams>,
    ) -> Result<List<Card>, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(format!("{CUSTOMERS_RESOURCE}/{customer_id}/{CARDS_RESOURCE}"))
                .with_params(params),
        )
        .await
    }

    /// Lists the customer's schedules.
    pub async fn list_schedules(
        &self,
        customer_id: &CustomerId,
        params: Option<PaginationParams>,
    ) -> Result<List<Schedule>, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::get(format!(
                "{CUSTOMERS_RESOURCE}/{customer_id}/{SCHEDULES_RESOURCE}"
            ))
            .with_params(params),
        )
        .await
    }
}

#[async_trait]
impl<G: RequestGateway> CustomerAccessor for Customers<G> {
    async fn retrieve_customer(&self, id: &CustomerId) -> Result<Customer, GatewayError> {
        self.retrieve(id).await
    }

    async fn update_customer(
        &self,
        id: &CustomerId,
        req: CustomerRequest,
    ) -> Result<Customer, GatewayError> {
        self.update(id, &req).await
    }

    async fn list_customer_cards(
        &self,
        id: &CustomerId,
        params: PaginationParams,
    ) -> Result<List<Card>, GatewayError> {
        self.list_cards(id, Some(params)).await
    }

    async fn list_customer_schedules(
        &self,
        id: &CustomerId,
        params: PaginationParams,
    ) -> Result<List<Schedule>, GatewayError> {
        self.list_schedules(id, Some(params)).await
    }
}
