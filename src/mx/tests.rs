use std::cell::Cell;
use std::io;

use super::{Error, LookupMx, MxRecord, MxStatus, check_mx_with, primary_mx, resolver};

type LookupResult = Result<Vec<MxRecord>, Error>;
type LookupFn = dyn Fn(&str) -> LookupResult;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
    pub calls: Cell<usize>,
}

impl StubResolver {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + 'static,
    {
        Self {
            on_lookup: Box::new(f),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn with_records(records: Vec<MxRecord>) -> Self {
        Self::new(move |_| Ok(records.clone()))
    }

    pub(crate) fn failing() -> Self {
        Self::new(|_| Err(Error::resolver_init(io::Error::other("resolv.conf unreadable"))))
    }
}

impl LookupMx for StubResolver {
    fn lookup_mx(&self, domain: &str) -> LookupResult {
        self.calls.set(self.calls.get() + 1);
        (self.on_lookup)(domain)
    }
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("  ").expect_err("empty domain should fail");
    assert!(matches!(err, Error::EmptyDomain));
}

#[test]
fn check_mx_with_keeps_resolver_order() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MxRecord::new(20, "mx2.example.com"),
            MxRecord::new(10, "mx1.example.com"),
            MxRecord::new(30, "mx3.example.com"),
        ])
    });

    let status = check_mx_with(&stub, " example.com ").expect("lookup succeeds");
    let records = match status {
        MxStatus::Records(records) => records,
        MxStatus::NoRecords => panic!("expected records"),
    };
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].exchange, "mx2.example.com");
    assert_eq!(stub.calls.get(), 1);
}

#[test]
fn check_mx_with_handles_no_records() {
    let stub = StubResolver::with_records(Vec::new());
    let status = check_mx_with(&stub, "example.com").expect("lookup succeeds");
    assert!(matches!(status, MxStatus::NoRecords));
    assert!(!status.has_records());
}

#[test]
fn check_mx_with_converts_idna() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "xn--exmple-cua.com");
        Ok(vec![MxRecord::new(5, "mx.xn--exmple-cua.com")])
    });
    let status = check_mx_with(&stub, "exämple.com").expect("lookup succeeds");
    assert_eq!(status.records().len(), 1);
}

#[test]
fn lookup_errors_propagate() {
    let stub = StubResolver::failing();
    let err = check_mx_with(&stub, "example.com").expect_err("lookup fails");
    assert!(matches!(err, Error::ResolverInit { .. }));
}

#[test]
fn primary_mx_prefers_lowest_then_first_seen() {
    let records = vec![
        MxRecord::new(20, "b.example.com"),
        MxRecord::new(10, "z.example.com"),
        MxRecord::new(10, "a.example.com"),
    ];
    let primary = primary_mx(&records).expect("records present");
    assert_eq!(primary.exchange, "z.example.com");
    assert!(primary_mx(&[]).is_none());
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.".to_string());
    assert_eq!(out, "mail.example.com");
    assert_eq!(resolver::normalize_exchange(".".to_string()), "");
}
