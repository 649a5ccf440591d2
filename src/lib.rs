#![forbid(unsafe_code)]
//! securemail_lib — vérifie qu'une adresse vise un domaine à livraison sécurisée
//! (format, MX, DNSSEC, STARTTLS).

pub mod config;
pub mod dnssec;
pub mod mx;
pub mod pipeline;
pub mod starttls;
pub mod validator;

#[cfg(feature = "with-server")]
pub mod server;

pub use config::{CheckerConfig, ConfigError, DEFAULT_TIMEOUT_SECS};
pub use dnssec::{DigError, DigProbe, DnssecEvidence, DnssecProbe};
pub use mx::{Error as MxError, LookupMx, MxRecord, MxStatus, SystemResolver, check_mx, primary_mx};
pub use pipeline::{
    EmailChecker, Stage, SystemChecker, SystemValidator, Validate, ValidationResult, validate_email,
};
pub use starttls::{SmtpError, SmtpStarttlsProbe, StarttlsProbe, StarttlsSupport};
pub use validator::{extract_domain, format_violations, is_valid_format, normalize_email};
