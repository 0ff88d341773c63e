use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::document::DocumentType;

// ============================================================================
// Aggregate
// ============================================================================

/// Order row as published by the order feed.
///
/// Every field is optional: the feed is a spreadsheet export and any cell may
/// be blank. Cells holding numbers or booleans are kept as their text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Order number
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub pedido: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub razao_social: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub nome_fantasia: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub nota_fiscal: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,

    // Dates arrive either as dd/mm/yyyy text or as ISO strings
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub data_prev_saida: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub data_real_saida: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub data_prev_entrega: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub data_entrega: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub transportadora: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Proof-of-delivery document URL (usually a Google Drive share link)
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub comprovante: Option<String>,

    #[serde(default, deserialize_with = "lenient_cpf", skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,

    #[serde(default, deserialize_with = "lenient_cnpj", skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
}

impl OrderRecord {
    /// Identifier field consulted for the given document type.
    pub fn document(&self, doc_type: DocumentType) -> Option<&str> {
        match doc_type {
            DocumentType::Cpf => self.cpf.as_deref(),
            DocumentType::Cnpj => self.cnpj.as_deref(),
        }
    }
}

/// Accepts a string, number or boolean cell and keeps its text form.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(number_text(&n)),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Numeric identifier cells lost their leading zeros; pad back to the full length.
fn lenient_document<'de, D>(deserializer: D, doc_type: DocumentType) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(format!(
            "{:0>width$}",
            number_text(&n),
            width = doc_type.expected_len()
        )),
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_cpf<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_document(deserializer, DocumentType::Cpf)
}

fn lenient_cnpj<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_document(deserializer, DocumentType::Cnpj)
}

/// Spreadsheet exports sometimes send integral numbers as floats (`12345678909.0`).
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
        }
    }
    n.to_string()
}
