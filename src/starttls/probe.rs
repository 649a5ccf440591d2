use std::net::{SocketAddr, ToSocketAddrs};

use tracing::trace;

use crate::config::CheckerConfig;

use super::{SmtpError, SmtpSession, StarttlsProbe, StarttlsSupport};

pub const SMTP_PORT: u16 = 25;

/// Probes STARTTLS over a real TCP connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpStarttlsProbe {
    pub port: u16,
    pub helo_domain: String,
}

impl Default for SmtpStarttlsProbe {
    fn default() -> Self {
        Self {
            port: SMTP_PORT,
            helo_domain: "localhost".to_string(),
        }
    }
}

impl SmtpStarttlsProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_helo(mut self, helo_domain: impl Into<String>) -> Self {
        self.helo_domain = helo_domain.into();
        self
    }

    /// Full dialogue: connect, greeting, EHLO, QUIT. `Ok(true)` iff the
    /// EHLO reply lists STARTTLS.
    pub fn check(&self, host: &str, config: &CheckerConfig) -> Result<bool, SmtpError> {
        let addresses = self.resolve(host)?;
        let mut session = SmtpSession::connect(host, &addresses, config.timeout())?;
        let outcome = self.negotiate(&mut session);
        session.quit().ok();
        for line in &session.transcript {
            trace!(target: "securemail::smtp", "{line}");
        }
        outcome
    }

    fn resolve(&self, host: &str) -> Result<Vec<SocketAddr>, SmtpError> {
        let addresses = (host, self.port)
            .to_socket_addrs()
            .map_err(|source| SmtpError::Resolve {
                host: host.to_string(),
                source,
            })?
            .collect::<Vec<_>>();
        if addresses.is_empty() {
            return Err(SmtpError::NoAddress {
                host: host.to_string(),
            });
        }
        Ok(addresses)
    }

    fn negotiate(&self, session: &mut SmtpSession) -> Result<bool, SmtpError> {
        let greeting = session.read_greeting()?;
        if !greeting.is_positive_completion() {
            return Err(SmtpError::protocol(format!(
                "unexpected greeting: {}",
                greeting.code
            )));
        }

        let ehlo = session.send_command(&format!("EHLO {}", self.helo_domain))?;
        // EHLO refusé: pas d'extensions annoncées
        if !ehlo.is_positive_completion() {
            return Ok(false);
        }
        Ok(ehlo.has_capability("STARTTLS"))
    }
}

impl StarttlsProbe for SmtpStarttlsProbe {
    fn probe(&self, host: &str, config: &CheckerConfig) -> StarttlsSupport {
        match self.check(host, config) {
            Ok(true) => StarttlsSupport::Advertised,
            Ok(false) => StarttlsSupport::NotAdvertised,
            Err(err) => StarttlsSupport::Unreachable(err.to_string()),
        }
    }
}
