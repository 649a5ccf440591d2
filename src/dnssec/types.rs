use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// What a DNSSEC probe observed for a zone.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnssecEvidence {
    /// At least one RRSIG record came back with the answer.
    Present,
    /// The zone answered but nothing in the answer was signed.
    Absent,
    /// The probe could not run or got nothing usable back. The string holds
    /// the reason (tool missing, non-zero exit, empty answer, ...).
    Indeterminate(String),
}

impl DnssecEvidence {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present)
    }

    pub fn indeterminate(reason: impl Into<String>) -> Self {
        Self::Indeterminate(reason.into())
    }
}

impl fmt::Display for DnssecEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("Present"),
            Self::Absent => f.write_str("Absent"),
            Self::Indeterminate(reason) => write!(f, "Indeterminate ({reason})"),
        }
    }
}
