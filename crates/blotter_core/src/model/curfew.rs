//! Curfew violation and curfew note models.

use serde::{Deserialize, Serialize};

/// Settlement status of a curfew violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CurfewStatus {
    Unsettled,
    Settled,
}

impl CurfewStatus {
    /// Stable title-case string form used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsettled => "Unsettled",
            Self::Settled => "Settled",
        }
    }
}

/// Curfew violation recorded by the curfew view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurfewViolation {
    pub id: String,
    pub resident_name: String,
    pub status: CurfewStatus,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub recorded_by: Option<String>,
}

impl CurfewViolation {
    /// Identity key used by projections.
    pub fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Free-text note attached to a resident or violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurfewNote {
    pub id: String,
    /// Resident or violation this note is attached to.
    #[serde(default)]
    pub linked_id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: Option<String>,
}

impl CurfewNote {
    /// Identity key used by projections.
    pub fn key(&self) -> &str {
        self.id.as_str()
    }
}
