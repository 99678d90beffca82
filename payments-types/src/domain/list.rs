//! Paginated list envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::{Order, PaginationParams};

/// An ordered page of resources as returned by the API.
///
/// `total` is reported by most list endpoints but is not guaranteed, so
/// paging decisions never depend on it alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub order: Option<Order>,
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            limit: None,
            offset: None,
            total: None,
            order: None,
            from: None,
            to: None,
        }
    }
}

impl<T> List<T> {
    /// Builds a single page holding `data`, as the API would for a small list.
    pub fn from_vec(data: Vec<T>) -> Self {
        let len = data.len() as u64;
        Self {
            data,
            offset: Some(0),
            total: Some(len),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Returns the parameters for the page following this one, or `None`
    /// when this page is the last.
    ///
    /// The page is the last if it is empty, reaches the reported total, or
    /// is shorter than the limit the service reports. The requested limit is
    /// never used for that check, since the service may cap it silently.
    pub fn next_page(&self, requested: &PaginationParams) -> Option<PaginationParams> {
        if self.data.is_empty() {
            return None;
        }

        let fetched = self.data.len() as u64;
        if self.limit.is_some_and(|limit| fetched < u64::from(limit)) {
            return None;
        }

        let offset = self.offset.or(requested.offset).unwrap_or(0);
        let next_offset = offset + fetched;
        if self.total.is_some_and(|total| next_offset >= total) {
            return None;
        }

        Some(PaginationParams {
            offset: Some(next_offset),
            ..requested.clone()
        })
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
