//! The validation pipeline: format → MX → DNSSEC → primary MX → STARTTLS.
//!
//! [`EmailChecker`] owns the probes and runs [`Stage::ORDER`] as a fold,
//! stopping at the first stage that fails. Probe errors never escape: they
//! turn into a failed stage and, in verbose mode, a `warn!` diagnostic.

mod result;
mod stage;

pub use result::{REASON_VALID, ValidationResult};
pub use stage::Stage;

use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::config::CheckerConfig;
use crate::dnssec::{DigProbe, DnssecEvidence, DnssecProbe};
use crate::mx::{LookupMx, MxRecord, MxStatus, SystemResolver, check_mx_with, primary_mx};
use crate::starttls::{SmtpStarttlsProbe, StarttlsProbe, StarttlsSupport};
use crate::validator::{extract_domain, format_violations, normalize_email};

use stage::StageOutcome;

/// Checker wired to the system resolver, `dig` and port 25.
pub type SystemChecker = EmailChecker<SystemResolver, DigProbe, SmtpStarttlsProbe>;

/// Validate `email` with the system probes.
pub fn validate_email(email: &str, config: &CheckerConfig) -> ValidationResult {
    SystemChecker::system(config).validate(email)
}

/// Object-safe entry point for callers that choose the configuration per
/// call (the HTTP surface builds one per request).
pub trait Validate: Send + Sync {
    fn validate(&self, email: &str, config: &CheckerConfig) -> ValidationResult;
}

/// Runs [`validate_email`] with a fresh system checker for every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemValidator;

impl Validate for SystemValidator {
    fn validate(&self, email: &str, config: &CheckerConfig) -> ValidationResult {
        validate_email(email, config)
    }
}

#[derive(Debug, Clone)]
pub struct EmailChecker<M, D, S> {
    config: CheckerConfig,
    mx: M,
    dnssec: D,
    starttls: S,
}

impl SystemChecker {
    pub fn system(config: &CheckerConfig) -> Self {
        Self::new(
            config,
            SystemResolver,
            DigProbe::new(),
            SmtpStarttlsProbe::new(),
        )
    }
}

impl<M, D, S> EmailChecker<M, D, S>
where
    M: LookupMx,
    D: DnssecProbe,
    S: StarttlsProbe,
{
    pub fn new(config: &CheckerConfig, mx: M, dnssec: D, starttls: S) -> Self {
        Self {
            config: *config,
            mx,
            dnssec,
            starttls,
        }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn validate(&self, email: &str) -> ValidationResult {
        let mut run = Run {
            checker: self,
            input: email,
            result: ValidationResult::new(email),
            mx_records: Vec::new(),
        };

        for stage in Stage::ORDER {
            if run.step(stage) == StageOutcome::Halt {
                run.result.halt(stage.failure_reason());
                debug!(stage = %stage, email, reason = %run.result.reason, "validation halted");
                return run.result;
            }
        }

        run.result.succeed();
        info!(email = %run.result.normalized_email, "validation passed");
        run.result
    }

    /// Log a probe failure: `warn` in verbose mode, `debug` otherwise.
    fn diagnose(&self, stage: Stage, subject: &str, detail: &dyn Display) {
        if self.config.verbose {
            warn!(stage = %stage, subject, "{detail}");
        } else {
            debug!(stage = %stage, subject, "{detail}");
        }
    }
}

/// State threaded through the stages of a single validation.
struct Run<'a, M, D, S> {
    checker: &'a EmailChecker<M, D, S>,
    input: &'a str,
    result: ValidationResult,
    mx_records: Vec<MxRecord>,
}

impl<M, D, S> Run<'_, M, D, S>
where
    M: LookupMx,
    D: DnssecProbe,
    S: StarttlsProbe,
{
    fn step(&mut self, stage: Stage) -> StageOutcome {
        match stage {
            Stage::Format => self.format(),
            Stage::Mx => self.mx(),
            Stage::Dnssec => self.dnssec(),
            Stage::PrimaryMx => self.primary_mx(),
            Stage::Starttls => self.starttls(),
        }
    }

    fn format(&mut self) -> StageOutcome {
        let violations = format_violations(self.input);
        if !violations.is_empty() {
            self.checker
                .diagnose(Stage::Format, self.input, &violations.join("; "));
            return StageOutcome::Halt;
        }
        self.result.normalized_email = normalize_email(self.input);
        self.result.domain = extract_domain(&self.result.normalized_email);
        StageOutcome::Continue
    }

    fn mx(&mut self) -> StageOutcome {
        let domain = self.result.domain.as_str();
        match check_mx_with(&self.checker.mx, domain) {
            Ok(MxStatus::Records(records)) => self.mx_records = records,
            Ok(MxStatus::NoRecords) => {
                self.checker
                    .diagnose(Stage::Mx, domain, &"no MX records published");
            }
            Err(err) => self.checker.diagnose(Stage::Mx, domain, &err),
        }
        self.result.has_mx_record = !self.mx_records.is_empty();
        StageOutcome::from_pass(self.result.has_mx_record)
    }

    fn dnssec(&mut self) -> StageOutcome {
        let domain = self.result.domain.as_str();
        let evidence = self.checker.dnssec.probe(domain);
        match &evidence {
            DnssecEvidence::Present => {}
            DnssecEvidence::Absent => {
                self.checker
                    .diagnose(Stage::Dnssec, domain, &"no RRSIG in SOA answer");
            }
            DnssecEvidence::Indeterminate(reason) => {
                self.checker.diagnose(Stage::Dnssec, domain, reason);
            }
        }
        self.result.has_dnssec = evidence.is_present();
        StageOutcome::from_pass(self.result.has_dnssec)
    }

    fn primary_mx(&mut self) -> StageOutcome {
        let host = primary_mx(&self.mx_records)
            .map(|record| record.exchange.clone())
            .unwrap_or_default();
        if host.is_empty() {
            self.checker.diagnose(
                Stage::PrimaryMx,
                &self.result.domain,
                &"primary MX has no usable host name",
            );
        }
        self.result.primary_mx_server = host;
        StageOutcome::from_pass(!self.result.primary_mx_server.is_empty())
    }

    fn starttls(&mut self) -> StageOutcome {
        let host = self.result.primary_mx_server.as_str();
        let support = self.checker.starttls.probe(host, &self.checker.config);
        match &support {
            StarttlsSupport::Advertised => {}
            StarttlsSupport::NotAdvertised => {
                self.checker
                    .diagnose(Stage::Starttls, host, &"STARTTLS not advertised in EHLO");
            }
            StarttlsSupport::Unreachable(reason) => {
                self.checker.diagnose(Stage::Starttls, host, reason);
            }
        }
        self.result.supports_starttls = support.is_advertised();
        StageOutcome::from_pass(self.result.supports_starttls)
    }
}
