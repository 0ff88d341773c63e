//! Order tracking domain: the order record, CPF/CNPJ handling,
//! lookup over a fetched order list and the display mapping.

pub mod aggregate;
pub mod document;
pub mod feed;
pub mod lookup;
pub mod presentation;

pub use aggregate::OrderRecord;
pub use document::{DocumentError, DocumentType, ValidatedDocument};
pub use feed::FeedError;
pub use lookup::{LookupOutcome, OrderRepository};
pub use presentation::{OrderView, ProofOfDelivery, ProofOfDeliveryMode, StatusBadge};
