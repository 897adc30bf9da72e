//! Summons record model.
//!
//! # Responsibility
//! - Define the summons record attached to a pending case.
//! - Enforce the per-case ordinal rules at assignment time.
//!
//! # Invariants
//! - A summons is identified by the composite key `caseNo + "_" + summonsNo`.
//! - Ordinals range over 1..=3; at most one summons per ordinal per case.
//!   This is an assignment-time rule, not a stored constraint.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest valid summons ordinal.
pub const SUMMONS_ORDINAL_MIN: u8 = 1;
/// Highest valid summons ordinal.
pub const SUMMONS_ORDINAL_MAX: u8 = 3;

/// Lifecycle status of a summons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SummonsStatus {
    Pending,
    Settled,
    Escalated,
    Blacklisted,
}

impl SummonsStatus {
    /// Stable title-case string form used in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Settled => "Settled",
            Self::Escalated => "Escalated",
            Self::Blacklisted => "Blacklisted",
        }
    }
}

/// Summons issued against one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonsRecord {
    /// Owning case number.
    pub case_no: String,
    /// Ordinal within the case, 1..=3.
    pub summons_no: u8,
    pub status: SummonsStatus,
    #[serde(default)]
    pub schedule_date: Option<String>,
    #[serde(default)]
    pub schedule_time: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub issued_by: Option<String>,
}

impl SummonsRecord {
    /// Composite identity key used by projections.
    pub fn key(&self) -> String {
        composite_key(&self.case_no, self.summons_no)
    }
}

/// Builds the composite summons key `caseNo + "_" + summonsNo`.
pub fn composite_key(case_no: &str, summons_no: u8) -> String {
    format!("{case_no}_{summons_no}")
}

/// Summons validation errors raised at assignment time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummonsValidationError {
    /// Ordinal outside 1..=3.
    OrdinalOutOfRange(u8),
    /// The case already carries a summons with this ordinal.
    DuplicateOrdinal { case_no: String, summons_no: u8 },
}

impl Display for SummonsValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrdinalOutOfRange(value) => write!(
                f,
                "summons ordinal must be within {SUMMONS_ORDINAL_MIN}..={SUMMONS_ORDINAL_MAX}, got {value}"
            ),
            Self::DuplicateOrdinal { case_no, summons_no } => {
                write!(f, "case {case_no} already has summons #{summons_no}")
            }
        }
    }
}

impl Error for SummonsValidationError {}

/// Checks that a summons may be assigned to a case.
///
/// Validates the ordinal range and rejects a duplicate ordinal among the
/// case's existing summons.
pub fn validate_assignment(
    existing: &[SummonsRecord],
    case_no: &str,
    summons_no: u8,
) -> Result<(), SummonsValidationError> {
    if !(SUMMONS_ORDINAL_MIN..=SUMMONS_ORDINAL_MAX).contains(&summons_no) {
        return Err(SummonsValidationError::OrdinalOutOfRange(summons_no));
    }
    let taken = existing
        .iter()
        .any(|record| record.case_no == case_no && record.summons_no == summons_no);
    if taken {
        return Err(SummonsValidationError::DuplicateOrdinal {
            case_no: case_no.to_string(),
            summons_no,
        });
    }
    Ok(())
}
