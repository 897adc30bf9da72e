//! Case record model.
//!
//! # Responsibility
//! - Define the dispute case record logged by the case-logs view.
//! - Validate case numbers at assignment time.
//! - Derive display attribution with a fixed resolution order.
//!
//! # Invariants
//! - `case_no` uniquely identifies a case and is never reused.
//! - Cases are never hard-deleted; settled/blacklisted cases are only
//!   filtered out of default listings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Attribution used when a record carries no role or author field.
pub const DEFAULT_EDITOR: &str = "System";

static CASE_NO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}-166-\d{2}-\d{4}$").expect("valid case number regex"));

/// Lifecycle status of a dispute case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStatus {
    /// Logged and awaiting action.
    Pending,
    /// Resolved; the case moves to the archive listing.
    Settled,
    /// Elevated beyond barangay mediation.
    Escalated,
    /// Respondent placed on the blacklist.
    Blacklisted,
}

impl CaseStatus {
    /// Stable uppercase string form used in storage and projections.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Settled => "SETTLED",
            Self::Escalated => "ESCALATED",
            Self::Blacklisted => "BLACKLISTED",
        }
    }
}

/// Nested form payload captured at filing time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseFullData {
    /// Role selected by the staff member who filed the case.
    #[serde(default)]
    pub selected_role: Option<String>,
}

/// Dispute case as stored by the case-logs view.
///
/// Optional fields stay optional because historical records predate some
/// form fields; readers must tolerate their absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Unique case number, format `NN-166-MM-YYYY`.
    pub case_no: String,
    pub status: CaseStatus,
    /// Filing date as entered (`MM-DD-YYYY` or `YYYY-MM-DD`); may be malformed.
    #[serde(default)]
    pub date: Option<String>,
    /// Filing time as entered (`HH:MM`, `HH:MM:SS`, or `hh:MM AM/PM`).
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub complainant: Option<String>,
    #[serde(default)]
    pub respondent: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub full_data: Option<CaseFullData>,
}

impl CaseRecord {
    /// Identity key used by projections.
    pub fn key(&self) -> &str {
        self.case_no.as_str()
    }

    /// Display attribution, resolved in a fixed order:
    /// `fullData.selectedRole`, then `createdBy`, then [`DEFAULT_EDITOR`].
    pub fn recorded_by(&self) -> &str {
        if let Some(role) = self
            .full_data
            .as_ref()
            .and_then(|data| data.selected_role.as_deref())
        {
            if !role.trim().is_empty() {
                return role;
            }
        }
        match self.created_by.as_deref() {
            Some(author) if !author.trim().is_empty() => author,
            _ => DEFAULT_EDITOR,
        }
    }
}

/// Case validation errors raised at assignment time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseValidationError {
    /// Case number does not match `NN-166-MM-YYYY`.
    InvalidCaseNumber(String),
}

impl Display for CaseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCaseNumber(value) => {
                write!(f, "case number must match NN-166-MM-YYYY, got `{value}`")
            }
        }
    }
}

impl Error for CaseValidationError {}

/// Validates a case number against the `NN-166-MM-YYYY` format.
///
/// Stored values are trusted as-is on read; this check guards assignment
/// paths only.
pub fn validate_case_no(value: &str) -> Result<(), CaseValidationError> {
    if CASE_NO_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(CaseValidationError::InvalidCaseNumber(value.to_string()))
    }
}
