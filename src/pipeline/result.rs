#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

pub const REASON_VALID: &str = "Email is valid and domain supports secure mail delivery";

/// Verdict of one pipeline run. Fields of stages that were never reached
/// keep the values set by [`ValidationResult::new`].
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: String,
    pub normalized_email: String,
    pub domain: String,
    pub has_mx_record: bool,
    pub has_dnssec: bool,
    pub primary_mx_server: String,
    pub supports_starttls: bool,
}

impl ValidationResult {
    /// Initial state: invalid, no reason yet, no evidence collected.
    /// `normalized_email` holds the raw input until the format check passes.
    pub fn new(input: &str) -> Self {
        Self {
            valid: false,
            reason: String::new(),
            normalized_email: input.to_string(),
            domain: String::new(),
            has_mx_record: false,
            has_dnssec: false,
            primary_mx_server: String::new(),
            supports_starttls: false,
        }
    }

    pub(crate) fn halt(&mut self, reason: &str) {
        self.valid = false;
        self.reason = reason.to_string();
    }

    pub(crate) fn succeed(&mut self) {
        self.valid = true;
        self.reason = REASON_VALID.to_string();
    }
}

#[cfg(all(test, feature = "with-serde"))]
mod tests {
    use super::*;

    #[test]
    fn json_field_names() {
        let result = ValidationResult::new("not-an-email");
        let value = serde_json::to_value(&result).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "domain",
                "has_dnssec",
                "has_mx_record",
                "normalized_email",
                "primary_mx_server",
                "reason",
                "supports_starttls",
                "valid",
            ]
        );
        assert_eq!(value["normalized_email"], "not-an-email");
        assert_eq!(value["valid"], false);
    }
}
