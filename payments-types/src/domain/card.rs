//! Card domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::CardId;

/// A card stored on a customer.
///
/// Card numbers never reach this client; cards are created from tokens and
/// only the non-sensitive attributes are returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub last_digits: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expiration_month: Option<u8>,
    #[serde(default)]
    pub expiration_year: Option<u16>,
    #[serde(default)]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub livemode: bool,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Creates a card record with only an id, as a minimal snapshot.
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            brand: None,
            last_digits: None,
            name: None,
            expiration_month: None,
            expiration_year: None,
            fingerprint: None,
            country: None,
            livemode: false,
            created_at: Utc::now(),
        }
    }
}
