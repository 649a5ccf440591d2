use std::sync::LazyLock;

use regex::Regex;

/// Longueur totale max (RFC 5321, `@` compris).
pub const MAX_ADDRESS_LEN: usize = 254;

const MAX_LABEL_LEN: usize = 63;

static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+$").expect("local part pattern is valid")
});

/// Returns `true` iff `email` passes every structural rule of [`format_violations`].
pub fn is_valid_format(email: &str) -> bool {
    format_violations(email).is_empty()
}

/// Collects every structural rule `email` breaks. An empty vector means the
/// address is acceptable. The input is checked as-is (no trimming).
pub fn format_violations(email: &str) -> Vec<String> {
    let mut reasons = Vec::new();

    if email.len() > MAX_ADDRESS_LEN {
        reasons.push(format!("total length {} > {MAX_ADDRESS_LEN}", email.len()));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return reasons;
    }
    let (local, domain) = (parts[0], parts[1]);

    if !LOCAL_PART.is_match(local) {
        reasons.push("invalid local part".to_string());
    }

    check_domain(domain, &mut reasons);
    reasons
}

/// Labels séparés par des points: 1..=63 alphanumériques ASCII, '-' interne seulement.
fn check_domain(domain: &str, reasons: &mut Vec<String>) {
    if domain.is_empty() {
        reasons.push("domain is empty".to_string());
        return;
    }

    for label in domain.split('.') {
        if label.is_empty() {
            reasons.push("empty domain label".to_string());
            continue;
        }
        if label.len() > MAX_LABEL_LEN {
            reasons.push(format!(
                "domain label '{}' length {} > {MAX_LABEL_LEN}",
                label,
                label.len()
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            reasons.push(format!(
                "domain label '{}' cannot start/end with '-'",
                label
            ));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            reasons.push(format!("domain label '{}' has invalid chars", label));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_shapes() {
        for email in [
            "test@example.com",
            "user.name@domain.co.uk",
            "user+tag@example.org",
            "o'brien@localhost",
            "UPPER@Example.COM",
        ] {
            assert!(is_valid_format(email), "{email}: {:?}", format_violations(email));
        }
    }

    #[test]
    fn rejects_structural_errors() {
        for email in [
            "",
            "invalid-email",
            "@example.com",
            "test@",
            "test@.com",
            "test@com.",
            "a@@b.com",
            "a@b@c.com",
            "test@-example.com",
            "test@example-.com",
            "test@exa_mple.com",
            "te st@example.com",
            " test@example.com",
        ] {
            assert!(!is_valid_format(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn label_length_bounds() {
        let ok = format!("a@{}.com", "b".repeat(63));
        let too_long = format!("a@{}.com", "b".repeat(64));
        assert!(is_valid_format(&ok));
        assert!(
            format_violations(&too_long)
                .iter()
                .any(|r| r.contains("> 63"))
        );
    }

    #[test]
    fn total_length_capped_at_254() {
        let domain = ["a".repeat(63), "b".repeat(63), "c".repeat(63)].join(".");
        // 1 + 1 + 191 = 193 octets
        let base = format!("x@{domain}");
        let padded = format!("{}{}", "l".repeat(254 - base.len()), base);
        assert_eq!(padded.len(), 254);
        assert!(is_valid_format(&padded));

        let over = format!("l{padded}");
        assert!(
            format_violations(&over)
                .iter()
                .any(|r| r.starts_with("total length 255"))
        );
    }
}
