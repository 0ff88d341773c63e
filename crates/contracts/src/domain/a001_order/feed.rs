//! Wire contract of the order feed endpoint.
//!
//! `GET /api/orders` returns the whole list, `GET /api/orders/search?doc=&type=`
//! returns at most one record. Both answer with `{ "data": ..., "error": ... }`.
//! The decoder also accepts a bare array and the `result` key used by older
//! spreadsheet scripts, plus a JSONP wrapper `callback([...]);`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::aggregate::OrderRecord;
use super::document::DocumentType;

/// Path of the order feed on the backend.
pub const ORDERS_PATH: &str = "/api/orders";

/// Path of the per-document query on the backend.
pub const SEARCH_PATH: &str = "/api/orders/search";

/// Bulk load of the whole order list is abandoned after this long.
pub const BULK_LOAD_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Error reported by the feed itself
    #[error("{0}")]
    Remote(String),

    #[error("Formato de dados inválido")]
    Malformed,

    #[error("Erro de conexão ao carregar dados: {0}")]
    Transport(String),

    #[error("Timeout ao carregar dados")]
    Timeout,
}

/// Query string of the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    /// Digits only
    #[serde(default)]
    pub doc: String,
    /// Advisory `cpf`/`cnpj` hint, any case
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

impl FeedQuery {
    /// The hinted type, `None` when absent or not a known type.
    pub fn requested_type(&self) -> Option<DocumentType> {
        self.doc_type.as_deref().and_then(DocumentType::parse)
    }
}

/// `data` is either the whole list or a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeedData {
    Many(Vec<OrderRecord>),
    One(OrderRecord),
}

/// Response body produced by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedResponse {
    pub data: Option<FeedData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedResponse {
    pub fn list(records: Vec<OrderRecord>) -> Self {
        Self {
            data: Some(FeedData::Many(records)),
            error: None,
        }
    }

    pub fn single(record: OrderRecord) -> Self {
        Self {
            data: Some(FeedData::One(record)),
            error: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Decode any accepted feed body into its records.
pub fn decode_payload(body: &str) -> Result<Vec<OrderRecord>, FeedError> {
    let json = strip_jsonp(body.trim());
    let value: Value = serde_json::from_str(json).map_err(|_| FeedError::Malformed)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<Vec<OrderRecord>, FeedError> {
    match value {
        Value::Array(_) => records_from(value),
        Value::Object(map) => decode_envelope(map),
        _ => Err(FeedError::Malformed),
    }
}

fn decode_envelope(mut map: Map<String, Value>) -> Result<Vec<OrderRecord>, FeedError> {
    match map.remove("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(msg)) if msg.trim().is_empty() => {}
        Some(Value::String(msg)) => return Err(FeedError::Remote(msg)),
        Some(other) => return Err(FeedError::Remote(other.to_string())),
    }

    for key in ["data", "result"] {
        if let Some(inner) = map.remove(key) {
            return match inner {
                Value::Null => Ok(Vec::new()),
                Value::Array(_) => records_from(inner),
                Value::Object(_) => serde_json::from_value::<OrderRecord>(inner)
                    .map(|r| vec![r])
                    .map_err(|_| FeedError::Malformed),
                _ => Err(FeedError::Malformed),
            };
        }
    }

    Err(FeedError::Malformed)
}

fn records_from(value: Value) -> Result<Vec<OrderRecord>, FeedError> {
    serde_json::from_value(value).map_err(|_| FeedError::Malformed)
}

/// `name(...)` or `name(...);` -> `...`. Anything else is returned unchanged.
fn strip_jsonp(body: &str) -> &str {
    if body.starts_with('[') || body.starts_with('{') {
        return body;
    }
    let Some(open) = body.find('(') else {
        return body;
    };
    let callee = &body[..open];
    let is_ident = !callee.is_empty()
        && callee
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');
    if !is_ident {
        return body;
    }
    let tail = body.trim_end().trim_end_matches(';').trim_end();
    match tail.strip_suffix(')') {
        Some(inner) if inner.len() > open => &inner[open + 1..],
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_type_hint_is_lenient() {
        let query = |hint: Option<&str>| FeedQuery {
            doc: "12345678909".into(),
            doc_type: hint.map(str::to_string),
        };
        assert_eq!(query(Some("CPF")).requested_type(), Some(DocumentType::Cpf));
        assert_eq!(query(Some(" cnpj ")).requested_type(), Some(DocumentType::Cnpj));
        assert_eq!(query(Some("rg")).requested_type(), None);
        assert_eq!(query(None).requested_type(), None);
    }

    #[test]
    fn test_bare_array() {
        let records = decode_payload(r#"[{"pedido": "1"}, {"pedido": "2"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].pedido.as_deref(), Some("2"));
    }

    #[test]
    fn test_envelope_variants() {
        assert_eq!(decode_payload(r#"{"data": [{"pedido": "1"}]}"#).unwrap().len(), 1);
        assert_eq!(decode_payload(r#"{"result": {"pedido": "9"}}"#).unwrap().len(), 1);
        assert!(decode_payload(r#"{"data": null}"#).unwrap().is_empty());
        assert!(decode_payload(r#"{"data": [], "error": ""}"#).unwrap().is_empty());
    }

    #[test]
    fn test_error_field_wins() {
        assert_eq!(
            decode_payload(r#"{"data": [], "error": "Planilha não encontrada"}"#),
            Err(FeedError::Remote("Planilha não encontrada".into()))
        );
    }

    #[test]
    fn test_malformed_payloads() {
        assert_eq!(decode_payload("not json"), Err(FeedError::Malformed));
        assert_eq!(decode_payload("42"), Err(FeedError::Malformed));
        assert_eq!(decode_payload(r#"{"rows": []}"#), Err(FeedError::Malformed));
        assert_eq!(decode_payload(r#"{"data": "x"}"#), Err(FeedError::Malformed));
        assert_eq!(decode_payload(r#"[1, 2]"#), Err(FeedError::Malformed));
    }

    #[test]
    fn test_jsonp_wrapper() {
        let body = r#"handleOrdersData_1700000000000([{"pedido": "5"}]);"#;
        let records = decode_payload(body).unwrap();
        assert_eq!(records[0].pedido.as_deref(), Some("5"));
    }

    #[test]
    fn test_response_shapes() {
        let single = FeedResponse::single(OrderRecord {
            pedido: Some("3".into()),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_string(&single).unwrap(),
            r#"{"data":{"pedido":"3"}}"#
        );
        assert_eq!(
            serde_json::to_string(&FeedResponse::not_found()).unwrap(),
            r#"{"data":null}"#
        );
        assert_eq!(
            serde_json::to_string(&FeedResponse::failure("x")).unwrap(),
            r#"{"data":null,"error":"x"}"#
        );
    }

    #[test]
    fn test_response_decodes_back() {
        let body = serde_json::to_string(&FeedResponse::list(vec![OrderRecord::default()])).unwrap();
        assert_eq!(decode_payload(&body).unwrap().len(), 1);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FeedError::Timeout.to_string(), "Timeout ao carregar dados");
        assert_eq!(FeedError::Malformed.to_string(), "Formato de dados inválido");
    }
}
