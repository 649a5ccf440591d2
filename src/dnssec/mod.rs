//! DNSSEC evidence detection through an external `dig` invocation.
//!
//! [`DigProbe`] asks for the zone's SOA with the DO bit set and looks for an
//! `RRSIG` record in the parsed answer section. The outcome is a
//! [`DnssecEvidence`] tri-state so callers can tell "no signature seen" from
//! "could not ask".

mod answer;
mod dig;
mod types;

pub use answer::{AnswerRecord, DnsAnswer};
pub use dig::{DigError, DigProbe};
pub use types::DnssecEvidence;

/// Anything able to report DNSSEC evidence for a domain.
pub trait DnssecProbe {
    fn probe(&self, domain: &str) -> DnssecEvidence;
}
