use super::aggregate::OrderRecord;
use super::document::{clean_digits, ValidatedDocument};

/// Outcome of a search. Not finding an order is a normal state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(OrderRecord),
    NotFound,
}

impl LookupOutcome {
    pub fn from_option(record: Option<OrderRecord>) -> Self {
        match record {
            Some(r) => LookupOutcome::Found(r),
            None => LookupOutcome::NotFound,
        }
    }

    pub fn into_option(self) -> Option<OrderRecord> {
        match self {
            LookupOutcome::Found(r) => Some(r),
            LookupOutcome::NotFound => None,
        }
    }
}

/// True iff the identifier field for the document type, stripped of
/// non-digits, equals the cleaned query. A missing field never matches.
pub fn record_matches(record: &OrderRecord, doc: &ValidatedDocument) -> bool {
    record
        .document(doc.doc_type)
        .map(|value| clean_digits(value) == doc.cleaned)
        .unwrap_or(false)
}

/// In-memory order list fetched once from the feed.
#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    records: Vec<OrderRecord>,
}

impl OrderRepository {
    pub fn new(records: Vec<OrderRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Linear scan, first match wins.
    pub fn find_first(&self, doc: &ValidatedDocument) -> Option<&OrderRecord> {
        self.records.iter().find(|r| record_matches(r, doc))
    }

    pub fn lookup(&self, doc: &ValidatedDocument) -> LookupOutcome {
        LookupOutcome::from_option(self.find_first(doc).cloned())
    }
}
