//! Charge domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::id::{ChargeId, CustomerId};

/// Settlement state of a charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
    Pending,
    Successful,
    Failed,
    Reversed,
    Expired,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChargeStatus::Pending => "pending",
            ChargeStatus::Successful => "successful",
            ChargeStatus::Failed => "failed",
            ChargeStatus::Reversed => "reversed",
            ChargeStatus::Expired => "expired",
            ChargeStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// A charge against a card or a customer's default card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub id: ChargeId,
    /// Amount in the smallest unit of `currency`.
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ChargeStatus,
    /// False when the charge was only authorized and awaits capture.
    #[serde(default)]
    pub capture: bool,
    #[serde(default)]
    pub authorized: bool,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub reversed: bool,
    #[serde(default)]
    pub customer: Option<CustomerId>,
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub failure_code: Option<String>,
    #[serde(default)]
    pub failure_message: Option<String>,
    #[serde(default)]
    pub livemode: bool,
    pub created_at: DateTime<Utc>,
}

impl Charge {
    /// True if the charge has been authorized but not captured yet.
    pub fn is_capturable(&self) -> bool {
        self.authorized && !self.paid && !self.reversed
    }
}
