//! Schedule domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ScheduleId;

/// Lifecycle state reported for a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Active,
    Expiring,
    Expired,
    Deleted,
    Suspended,
    #[serde(other)]
    Unknown,
}

/// A recurring schedule owned by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    /// Whether the schedule still produces occurrences. A missing or null
    /// flag is read as inactive.
    #[serde(default, deserialize_with = "null_as_false")]
    pub active: bool,
    #[serde(default)]
    pub status: Option<ScheduleStatus>,
    #[serde(default)]
    pub every: Option<u32>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub start_on: Option<NaiveDate>,
    #[serde(default)]
    pub end_on: Option<NaiveDate>,
    #[serde(default)]
    pub livemode: bool,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    pub fn new(id: impl Into<ScheduleId>, active: bool) -> Self {
        Self {
            id: id.into(),
            active,
            status: Some(if active {
                ScheduleStatus::Active
            } else {
                ScheduleStatus::Expired
            }),
            every: None,
            period: None,
            start_on: None,
            end_on: None,
            livemode: false,
            created_at: Utc::now(),
        }
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
