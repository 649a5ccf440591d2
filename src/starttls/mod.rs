//! SMTP STARTTLS capability probing.
//!
//! [`SmtpStarttlsProbe`] connects to port 25 of a mail host, reads the
//! greeting, sends `EHLO` and checks whether `STARTTLS` is advertised. It
//! never upgrades the connection and never issues `MAIL`/`RCPT`.

mod error;
mod probe;
mod session;
mod types;

pub use error::SmtpError;
pub use probe::SmtpStarttlsProbe;
pub use session::{SmtpReply, SmtpSession};
pub use types::StarttlsSupport;

use crate::config::CheckerConfig;

/// Anything able to tell whether `host` offers STARTTLS.
pub trait StarttlsProbe {
    fn probe(&self, host: &str, config: &CheckerConfig) -> StarttlsSupport;
}
