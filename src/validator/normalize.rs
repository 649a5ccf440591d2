/// Domaines dont la partie locale ignore les points et les alias `+tag`.
const GMAIL_DOMAINS: [&str; 2] = ["gmail.com", "googlemail.com"];
const GMAIL_CANONICAL: &str = "gmail.com";

/// Canonicalise une adresse pour comparaison.
///
/// Trims and lower-cases the whole input. When there is exactly one `@` and
/// the domain is a Gmail domain, dots are removed from the local part, the
/// `+tag` suffix is dropped and `googlemail.com` becomes `gmail.com`.
/// Anything else (no `@`, several `@`) only gets trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    let lowered = email.trim().to_lowercase();

    let parts: Vec<&str> = lowered.split('@').collect();
    if parts.len() != 2 {
        return lowered;
    }
    let (local, domain) = (parts[0], parts[1]);

    if !GMAIL_DOMAINS.contains(&domain) {
        return lowered;
    }

    // retirer les points peut exposer des blancs en tête (". a@gmail.com")
    let without_dots = local.replace('.', "");
    let without_dots = without_dots.trim_start();
    let local = match without_dots.split_once('+') {
        Some((head, _tag)) => head,
        None => without_dots,
    };
    format!("{local}@{GMAIL_CANONICAL}")
}

/// Partie domaine (trim + minuscules) si l'adresse contient exactement un `@`,
/// sinon chaîne vide.
pub fn extract_domain(email: &str) -> String {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return String::new();
    }
    parts[1].trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gmail_aliases_fold() {
        assert_eq!(normalize_email("te.st+tag@gmail.com"), "test@gmail.com");
        assert_eq!(normalize_email("te.st+tag@googlemail.com"), "test@gmail.com");
        assert_eq!(normalize_email("test@googlemail.com"), "test@gmail.com");
        assert_eq!(normalize_email("a+b+c@gmail.com"), "a@gmail.com");
        assert_eq!(normalize_email("  User.Name+x@GMail.com "), "username@gmail.com");
    }

    #[test]
    fn other_domains_only_lowercased() {
        assert_eq!(normalize_email("a.b+c@example.com"), "a.b+c@example.com");
        assert_eq!(normalize_email("Test@Example.Com"), "test@example.com");
        assert_eq!(normalize_email("a.b@sub.gmail.com"), "a.b@sub.gmail.com");
    }

    #[test]
    fn malformed_inputs_untouched_beyond_case() {
        assert_eq!(normalize_email(" No-At-Sign "), "no-at-sign");
        assert_eq!(normalize_email("a.b@c@gmail.com"), "a.b@c@gmail.com");
        assert_eq!(normalize_email(""), "");
    }

    #[test]
    fn extract_domain_cases() {
        assert_eq!(extract_domain("test@example.com"), "example.com");
        assert_eq!(extract_domain("user@DOMAIN.COM"), "domain.com");
        assert_eq!(extract_domain("@example.com"), "example.com");
        assert_eq!(extract_domain("invalid-email"), "");
        assert_eq!(extract_domain("test@"), "");
        assert_eq!(extract_domain("a@b@c"), "");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(
            local in "[ a-zA-Z0-9.+_-]{0,24}",
            domain in prop_oneof![
                Just("gmail.com".to_string()),
                Just("GoogleMail.com".to_string()),
                Just("example.org".to_string()),
                "[a-z.@]{0,12}",
            ],
            sep in prop_oneof![Just(""), Just("@"), Just("@@")],
        ) {
            let input = format!("{local}{sep}{domain}");
            let once = normalize_email(&input);
            prop_assert_eq!(normalize_email(&once), once);
        }
    }
}
