//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CardId, CustomerId};

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

/// Sort order of a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Chronological,
    ReverseChronological,
}

/// Query parameters accepted by list endpoints.
///
/// Passed through to the service as-is; unset fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Customer DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Attributes for creating or updating a customer.
///
/// Every field is optional so the same type serves as a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Card token to attach as a new card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_card: Option<CardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl CustomerRequest {
    /// Update that attaches the card behind `token`.
    pub fn add_card(token: impl Into<String>) -> Self {
        Self {
            card: Some(token.into()),
            ..Self::default()
        }
    }

    /// Update that makes `card_id` the default card.
    pub fn set_default_card(card_id: CardId) -> Self {
        Self {
            default_card: Some(card_id),
            ..Self::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Card DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Mutable attributes of a stored card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Charge DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create or update a charge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Amount in the smallest currency unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Charge this customer's default card (or `card` when also set).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerId>,
    /// A card token, or a card id when `customer` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
    /// Set to false to authorize only and capture later.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Schedule DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// The charge a schedule creates on each occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledChargeRequest {
    pub customer: CustomerId,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to create a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub every: u32,
    /// `day`, `week` or `month`.
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Occurrence rule, e.g. `{"weekdays": ["monday"]}` or `{"days_of_month": [1]}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<serde_json::Value>,
    pub charge: ScheduledChargeRequest,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// Confirmation returned by destroy endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub livemode: Option<bool>,
}

impl DestroyResponse {
    /// The bare `{ "deleted": true }` marker.
    pub fn deleted() -> Self {
        Self {
            id: None,
            deleted: true,
            livemode: None,
        }
    }
}
