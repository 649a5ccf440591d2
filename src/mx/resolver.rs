use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
};

use super::{Error, MxRecord, MxStatus};

/// Lookup MX records for `domain` using the system resolver.
///
/// The domain is normalized via IDNA before querying DNS. Records keep the
/// order the resolver reported them in.
pub fn check_mx(domain: &str) -> Result<MxStatus, Error> {
    check_mx_with(&SystemResolver, domain)
}

/// Same as [`check_mx`] against any [`LookupMx`] implementation.
pub fn check_mx_with<R>(resolver: &R, domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    resolve_with(resolver, &ascii)
}

pub(crate) fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx + ?Sized,
{
    let records = resolver.lookup_mx(ascii_domain)?;

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

/// Record with the lowest preference; the first one reported wins ties.
pub fn primary_mx(records: &[MxRecord]) -> Option<&MxRecord> {
    records.iter().min_by_key(|record| record.preference)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

/// Source of MX records. `NoRecordsFound` answers must come back as an empty
/// vector, not as an error.
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error>;
}

/// Resolver built from the host configuration (`/etc/resolv.conf`) on every
/// lookup; nothing is cached between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl LookupMx for SystemResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let resolver = Resolver::from_system_conf().map_err(Error::resolver_init)?;
        resolver.lookup_mx(domain)
    }
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) => {
                if should_treat_as_empty(&err) {
                    return Ok(Vec::new());
                }
                return Err(Error::lookup(domain, err));
            }
        };
        let mut records = Vec::new();
        for mx in lookup.iter() {
            let exchange = normalize_exchange(mx.exchange().to_utf8());
            records.push(MxRecord::new(mx.preference(), exchange));
        }
        Ok(records)
    }
}

fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
