use std::fmt;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a STARTTLS probe against one mail host.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarttlsSupport {
    /// `STARTTLS` was listed in the EHLO reply.
    Advertised,
    /// The session completed but `STARTTLS` was not offered (or EHLO was refused).
    NotAdvertised,
    /// Connection, greeting or EHLO failed. The string holds the reason.
    Unreachable(String),
}

impl StarttlsSupport {
    pub fn is_advertised(&self) -> bool {
        matches!(self, Self::Advertised)
    }
}

impl fmt::Display for StarttlsSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Advertised => f.write_str("Advertised"),
            Self::NotAdvertised => f.write_str("NotAdvertised"),
            Self::Unreachable(reason) => write!(f, "Unreachable ({reason})"),
        }
    }
}
