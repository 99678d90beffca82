//! # Payments Client
//!
//! A typed Rust client for the payments API.
//!
//! [`PaymentsClient`] is the request gateway: it turns an
//! [`ApiRequest`](payments_types::ApiRequest) into an HTTP call and decodes
//! the JSON reply. The resource accessors ([`Charges`], [`Customers`],
//! [`Cards`], [`Schedules`]) map each operation onto exactly one request.
//!
//! ```no_run
//! # async fn run() -> Result<(), payments_types::GatewayError> {
//! use payments_client::PaymentsClient;
//!
//! let client = PaymentsClient::new("https://api.example.com").with_secret_key("skey_test_123");
//! let customer = client.customers().retrieve(&"cust_test_1".into()).await?;
//! println!("{} cards", customer.cards.len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod resources;

pub use client::{API_VERSION_HEADER, PaymentsClient};
pub use resources::{Cards, Charges, Customers, Schedules};
