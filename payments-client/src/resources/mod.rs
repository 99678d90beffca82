//! Resource accessors.
//!
//! Each accessor is a stateless mapping from an operation to a single
//! gateway call with a fixed verb and path. Errors pass through unchanged.

mod cards;
mod charges;
mod customers;
mod schedules;

pub use cards::Cards;
pub use charges::Charges;
pub use customers::Customers;
pub use schedules::Schedules;

use payments_types::{ApiRequest, GatewayError, RequestGateway};
use serde::de::DeserializeOwned;

pub const CHARGES_RESOURCE: &str = "charges";
pub const CUSTOMERS_RESOURCE: &str = "customers";
pub const CARDS_RESOURCE: &str = "cards";
pub const SCHEDULES_RESOURCE: &str = "schedules";

/// Sends `req` and decodes the reply into `T`.
async fn request<T, G>(gateway: &G, req: ApiRequest) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
    G: RequestGateway + ?Sized,
{
    let value = gateway.send(req).await?;
    Ok(serde_json::from_value(value)?)
}
