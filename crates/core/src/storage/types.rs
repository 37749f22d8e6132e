use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key for fetching a single entity.
///
/// `Alternate` is only meaningful for entity kinds whose table declares an
/// alternate key (users, by login).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKey {
    Primary(Uuid),
    Alternate(String),
}

impl LookupKey {
    /// Builds a key from optional parts. The primary id wins when both are set.
    ///
    /// Returns `None` when neither part is present or the alternate is blank.
    pub fn from_parts(id: Option<Uuid>, alternate: Option<String>) -> Option<Self> {
        match (id, alternate) {
            (Some(id), _) => Some(LookupKey::Primary(id)),
            (None, Some(alternate)) if !alternate.trim().is_empty() => {
                Some(LookupKey::Alternate(alternate))
            }
            _ => None,
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Primary(id) => write!(f, "{id}"),
            LookupKey::Alternate(value) => write!(f, "{value}"),
        }
    }
}

impl From<Uuid> for LookupKey {
    fn from(id: Uuid) -> Self {
        LookupKey::Primary(id)
    }
}

/// Page window requested by a list call. Non-positive values mean "default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

impl ListRequest {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Resolves the effective `(limit, offset)`.
    ///
    /// `limit <= 0` becomes `default_page_size`; `offset <= 0` becomes zero.
    pub fn window(&self, default_page_size: i64) -> (i64, i64) {
        let limit = if self.limit > 0 {
            self.limit
        } else {
            default_page_size
        };
        (limit, self.offset.max(0))
    }
}

/// One page of a list call plus the size of the whole result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Number of matching rows regardless of the page window.
    pub total_count: i64,
    pub items: Vec<T>,
}
