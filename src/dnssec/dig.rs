use std::ffi::OsString;
use std::io;
use std::process::Command;

use thiserror::Error;

use super::{DnsAnswer, DnssecEvidence, DnssecProbe};

#[derive(Debug, Error)]
pub enum DigError {
    #[error("{program} is not installed")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Status {
        program: String,
        status: String,
        stderr: String,
    },
}

impl DigError {
    fn spawn(program: &OsString, source: io::Error) -> Self {
        let program = program.to_string_lossy().into_owned();
        if source.kind() == io::ErrorKind::NotFound {
            Self::Unavailable { program, source }
        } else {
            Self::Spawn { program, source }
        }
    }
}

/// Runs `dig +dnssec +noall +answer SOA <domain>` with the host's resolver
/// settings and default timeouts.
#[derive(Debug, Clone)]
pub struct DigProbe {
    program: OsString,
}

impl Default for DigProbe {
    fn default() -> Self {
        Self {
            program: OsString::from("dig"),
        }
    }
}

impl DigProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another executable (absolute path or name looked up in `PATH`).
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Raw answer section for `domain`.
    pub fn query(&self, domain: &str) -> Result<String, DigError> {
        let output = Command::new(&self.program)
            .args(["+dnssec", "+noall", "+answer", "SOA", domain])
            .output()
            .map_err(|source| DigError::spawn(&self.program, source))?;

        if !output.status.success() {
            return Err(DigError::Status {
                program: self.program.to_string_lossy().into_owned(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DnssecProbe for DigProbe {
    fn probe(&self, domain: &str) -> DnssecEvidence {
        match self.query(domain) {
            Ok(output) => DnsAnswer::parse(&output).evidence(),
            Err(err) => DnssecEvidence::Indeterminate(err.to_string()),
        }
    }
}
