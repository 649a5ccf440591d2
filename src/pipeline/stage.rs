use std::fmt;

/// Ordered checks of the pipeline. Cheap local checks run before DNS, DNS
/// before the SMTP handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Format,
    Mx,
    Dnssec,
    PrimaryMx,
    Starttls,
}

impl Stage {
    pub const ORDER: [Stage; 5] = [
        Stage::Format,
        Stage::Mx,
        Stage::Dnssec,
        Stage::PrimaryMx,
        Stage::Starttls,
    ];

    /// Reason reported when this stage stops the pipeline.
    pub fn failure_reason(self) -> &'static str {
        match self {
            Self::Format => "Invalid email format",
            Self::Mx => "Domain doesn't have MX record",
            Self::Dnssec => "Domain doesn't support DNSSEC",
            Self::PrimaryMx => "Failed to get MX server",
            Self::Starttls => "SMTP server doesn't support STARTTLS",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Format => "format",
            Self::Mx => "mx",
            Self::Dnssec => "dnssec",
            Self::PrimaryMx => "primary_mx",
            Self::Starttls => "starttls",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StageOutcome {
    Continue,
    Halt,
}

impl StageOutcome {
    pub(crate) fn from_pass(pass: bool) -> Self {
        if pass { Self::Continue } else { Self::Halt }
    }
}
