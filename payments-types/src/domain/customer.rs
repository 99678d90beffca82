//! Customer domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::id::{CardId, CustomerId};
use super::list::List;

/// A customer and the cards stored on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Card charged when no card is given explicitly.
    #[serde(default)]
    pub default_card: Option<CardId>,
    #[serde(default)]
    pub cards: List<Card>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub livemode: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates an empty customer snapshot with the given id.
    pub fn new(id: impl Into<CustomerId>) -> Self {
        Self {
            id: id.into(),
            email: None,
            description: None,
            default_card: None,
            cards: List::default(),
            metadata: serde_json::Map::new(),
            livemode: false,
            created_at: Utc::now(),
        }
    }

    /// Looks up a card in this snapshot.
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    /// Returns the default card if it is present in this snapshot.
    pub fn default_card(&self) -> Option<&Card> {
        self.default_card.as_ref().and_then(|id| self.card(id))
    }
}
