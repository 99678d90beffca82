use payments_types::{
    ApiRequest, Card, CardId, CardRequest, CustomerId, DestroyResponse, GatewayError, List,
    PaginationParams, RequestGateway,
};

use super::{CARDS_RESOURCE, CUSTOMERS_RESOURCE, request};

/// Operations on the cards stored on a customer.
///
/// Cards are created by attaching a token to the customer, see
/// [`Customers::update`](super::Customers::update).
pub struct Cards<G> {
    gateway: G,
}

impl<G: RequestGateway> Cards<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Retrieves a card.
    pub async fn retrieve(
        &self,
        customer_id: &CustomerId,
        card_id: &CardId,
    ) -> Result<Card, GatewayError> {
        request(&self.gateway, ApiRequest::get(card_path(customer_id, card_id))).await
    }

    /// Updates a card's holder name, expiry or billing address.
    pub async fn update(
        &self,
        customer_id: &CustomerId,
        card_id: &CardId,
        req: &CardRequest,
    ) -> Result<Card, GatewayError> {
        request(
            &self.gateway,
            ApiRequest::patch(card_path(customer_id, card_id)).with_data(req)?,
        )
        .await
    }

    /// Deletes a card.
    pub async fn destroy(
        &self,
        customer_id: &CustomerId,
        card_id: &CardId,
    ) -> Result<DestroyResponse, GatewayError> {
        request(&self.gateway, ApiRequest::delete(card_path(customer_id, card_id))).await
    }

    /// Lists the customer's cards.
    pub async fn list(
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
}

pub(super) fn card_path(customer_id: &CustomerId, card_id: &CardId) -> String {
    format!("{CUSTOMERS_RESOURCE}/{customer_id}/{CARDS_RESOURCE}/{card_id}")
}
