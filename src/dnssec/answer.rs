use super::DnssecEvidence;

const CLASSES: [&str; 5] = ["IN", "CH", "HS", "CS", "ANY"];

/// One resource record line of a `dig` answer section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub owner: String,
    pub ttl: Option<u32>,
    pub record_type: String,
    pub rdata: String,
}

impl AnswerRecord {
    /// Parse `owner [ttl] [class] type rdata...`. Comment and blank lines
    /// yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            return None;
        }

        let mut tokens = line.split_whitespace();
        let owner = tokens.next()?.to_string();
        let mut ttl = None;
        let mut record_type = None;
        for token in tokens.by_ref() {
            if ttl.is_none() && token.bytes().all(|b| b.is_ascii_digit()) {
                ttl = token.parse().ok();
                continue;
            }
            if CLASSES.iter().any(|class| token.eq_ignore_ascii_case(class)) {
                continue;
            }
            record_type = Some(token.to_ascii_uppercase());
            break;
        }

        Some(Self {
            owner,
            ttl,
            record_type: record_type?,
            rdata: tokens.collect::<Vec<_>>().join(" "),
        })
    }

    pub fn is_type(&self, record_type: &str) -> bool {
        self.record_type.eq_ignore_ascii_case(record_type)
    }
}

/// Parsed answer section of a `dig +noall +answer` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsAnswer {
    pub records: Vec<AnswerRecord>,
}

impl DnsAnswer {
    pub fn parse(output: &str) -> Self {
        Self {
            records: output.lines().filter_map(AnswerRecord::parse).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_signatures(&self) -> bool {
        self.records.iter().any(|record| record.is_type("RRSIG"))
    }

    pub fn evidence(&self) -> DnssecEvidence {
        if self.has_signatures() {
            DnssecEvidence::Present
        } else if self.is_empty() {
            DnssecEvidence::indeterminate("empty answer section")
        } else {
            DnssecEvidence::Absent
        }
    }
}
