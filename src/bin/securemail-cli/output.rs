use anyhow::Result;
#[cfg(not(feature = "with-serde"))]
use anyhow::bail;

use securemail_lib::ValidationResult;

use crate::args::{Cli, OutputFormat};

pub struct Row {
    pub original: String,
    pub result: ValidationResult,
}

pub fn write_reports(rows: &[Row], cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Human => {
            for row in rows {
                println!("{}", render_human(row, cli.verbose));
            }
            Ok(())
        }
        OutputFormat::Json => write_json(rows),
        OutputFormat::Ndjson => write_ndjson(rows),
    }
}

pub fn any_invalid(rows: &[Row]) -> bool {
    rows.iter().any(|row| !row.result.valid)
}

pub fn render_human(row: &Row, verbose: bool) -> String {
    let result = &row.result;
    let mut lines = Vec::new();
    if result.valid {
        lines.push(format!("[OK]      {} is valid and secure", row.original));
    } else {
        lines.push(format!("[INVALID] {}", row.original));
    }
    if result.normalized_email != row.original {
        lines.push(format!("          normalized: {}", result.normalized_email));
    }
    lines.push(format!("          reason: {}", result.reason));

    if verbose {
        lines.push(format!("          domain: {}", result.domain));
        lines.push(format!("          mx record: {}", result.has_mx_record));
        lines.push(format!("          dnssec: {}", result.has_dnssec));
        let primary = if result.primary_mx_server.is_empty() {
            "(none)"
        } else {
            result.primary_mx_server.as_str()
        };
        lines.push(format!("          primary mx: {primary}"));
        lines.push(format!("          starttls: {}", result.supports_starttls));
    }
    lines.join("\n")
}

/// Un seul résultat -> objet JSON, sinon tableau.
#[cfg(feature = "with-serde")]
fn write_json(rows: &[Row]) -> Result<()> {
    let s = match rows {
        [row] => serde_json::to_string_pretty(&row.result)?,
        _ => {
            let results: Vec<&ValidationResult> = rows.iter().map(|row| &row.result).collect();
            serde_json::to_string_pretty(&results)?
        }
    };
    println!("{s}");
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[Row]) -> Result<()> {
    for row in rows {
        println!("{}", serde_json::to_string(&row.result)?);
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_rows: &[Row]) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_rows: &[Row]) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(original: &str, result: ValidationResult) -> Row {
        Row {
            original: original.to_string(),
            result,
        }
    }

    #[test]
    fn human_valid_with_normalization() {
        let mut result = ValidationResult::new("User.Name+x@gmail.com");
        result.valid = true;
        result.reason = "Email is valid and domain supports secure mail delivery".to_string();
        result.normalized_email = "username@gmail.com".to_string();
        let out = render_human(&row("User.Name+x@gmail.com", result), false);
        insta::assert_snapshot!(out, @r"
        [OK]      User.Name+x@gmail.com is valid and secure
                  normalized: username@gmail.com
                  reason: Email is valid and domain supports secure mail delivery
        ");
    }

    #[test]
    fn human_invalid_verbose() {
        let mut result = ValidationResult::new("a@example.com");
        result.reason = "Domain doesn't support DNSSEC".to_string();
        result.domain = "example.com".to_string();
        result.has_mx_record = true;
        let out = render_human(&row("a@example.com", result), true);
        insta::assert_snapshot!(out, @r"
        [INVALID] a@example.com
                  reason: Domain doesn't support DNSSEC
                  domain: example.com
                  mx record: true
                  dnssec: false
                  primary mx: (none)
                  starttls: false
        ");
    }

    #[test]
    fn any_invalid_detects_failures() {
        let mut ok = ValidationResult::new("a@b.c");
        ok.valid = true;
        assert!(!any_invalid(&[row("a@b.c", ok.clone())]));
        assert!(any_invalid(&[
            row("a@b.c", ok),
            row("x", ValidationResult::new("x"))
        ]));
    }
}
