//! CPF/CNPJ input handling.
//!
//! Classification and validity depend only on the number of digits left after
//! stripping punctuation. Check digits are not verified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of Brazilian taxpayer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Individual taxpayer (11 digits)
    Cpf,
    /// Company taxpayer (14 digits)
    Cnpj,
}

impl DocumentType {
    pub const CPF_LEN: usize = 11;
    pub const CNPJ_LEN: usize = 14;

    /// CPF iff exactly 11 digits, CNPJ for every other count.
    pub fn infer(digit_count: usize) -> Self {
        if digit_count == Self::CPF_LEN {
            DocumentType::Cpf
        } else {
            DocumentType::Cnpj
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Cpf => "CPF",
            DocumentType::Cnpj => "CNPJ",
        }
    }

    pub fn expected_len(&self) -> usize {
        match self {
            DocumentType::Cpf => Self::CPF_LEN,
            DocumentType::Cnpj => Self::CNPJ_LEN,
        }
    }

    /// Name of the order record field holding this identifier.
    pub fn record_field(&self) -> &'static str {
        match self {
            DocumentType::Cpf => "cpf",
            DocumentType::Cnpj => "cnpj",
        }
    }

    /// Parse `cpf`/`cnpj` in any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpf" => Some(DocumentType::Cpf),
            "cnpj" => Some(DocumentType::Cnpj),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Digite um {} válido ({} dígitos)", .doc_type.label(), .doc_type.expected_len())]
    InvalidLength { doc_type: DocumentType, found: usize },
}

impl DocumentError {
    /// Title of the alert shown to the user.
    pub fn title(&self) -> &'static str {
        "Documento inválido"
    }
}

/// Result of validating raw user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDocument {
    pub doc_type: DocumentType,
    /// Digits only
    pub cleaned: String,
    pub is_valid: bool,
}

impl ValidatedDocument {
    pub fn into_result(self) -> Result<ValidatedDocument, DocumentError> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(DocumentError::InvalidLength {
                doc_type: self.doc_type,
                found: self.cleaned.len(),
            })
        }
    }
}

/// Keep ASCII digits only.
pub fn clean_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn validate_document(raw: &str) -> ValidatedDocument {
    let cleaned = clean_digits(raw);
    let len = cleaned.len();
    ValidatedDocument {
        doc_type: DocumentType::infer(len),
        is_valid: len == DocumentType::CPF_LEN || len == DocumentType::CNPJ_LEN,
        cleaned,
    }
}

/// Group sizes and the separator placed before each group after the first.
const CPF_MASK: (&[usize], &[char]) = (&[3, 3, 3, 2], &['.', '.', '-']);
const CNPJ_MASK: (&[usize], &[char]) = (&[2, 3, 3, 4, 2], &['.', '.', '/', '-']);

/// Typing mask: `000.000.000-00` up to 11 digits, `00.000.000/0000-00` beyond.
///
/// A separator only appears once the group after it has a digit, so the mask
/// can be re-applied on every keystroke. Digits beyond 14 are dropped.
pub fn format_document(raw: &str) -> String {
    let digits = clean_digits(raw);
    let (groups, separators) = if digits.len() <= DocumentType::CPF_LEN {
        CPF_MASK
    } else {
        CNPJ_MASK
    };

    let mut out = String::with_capacity(digits.len() + separators.len());
    let mut rest = digits.as_str();
    for (i, size) in groups.iter().enumerate() {
        if rest.is_empty() {
            break;
        }
        if i > 0 {
            out.push(separators[i - 1]);
        }
        let take = (*size).min(rest.len());
        out.push_str(&rest[..take]);
        rest = &rest[take..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuated_cpf_is_valid() {
        let doc = validate_document("123.456.789-09");
        assert_eq!(doc.cleaned, "12345678909");
        assert_eq!(doc.doc_type, DocumentType::Cpf);
        assert!(doc.is_valid);
    }

    #[test]
    fn test_punctuated_cnpj_is_valid() {
        let doc = validate_document("12.345.678/0001-95");
        assert_eq!(doc.cleaned, "12345678000195");
        assert_eq!(doc.doc_type, DocumentType::Cnpj);
        assert!(doc.is_valid);
    }

    #[test]
    fn test_classification_depends_only_on_digit_count() {
        for len in 0..20 {
            let digits = "7".repeat(len);
            let noisy: String = digits.chars().flat_map(|c| [c, ' ', 'x']).collect();
            let a = validate_document(&digits);
            let b = validate_document(&noisy);
            assert_eq!(a, b);
            assert_eq!(a.doc_type == DocumentType::Cpf, len == 11);
            assert_eq!(a.is_valid, len == 11 || len == 14);
        }
    }

    #[test]
    fn test_invalid_length_message_names_expected_count() {
        let err = validate_document("1234567890").into_result().unwrap_err();
        assert_eq!(
            err,
            DocumentError::InvalidLength {
                doc_type: DocumentType::Cnpj,
                found: 10
            }
        );
        assert_eq!(err.to_string(), "Digite um CNPJ válido (14 dígitos)");
        assert_eq!(err.title(), "Documento inválido");

        let ok = validate_document("123.456.789-09").into_result().unwrap();
        assert_eq!(ok.cleaned, "12345678909");
    }

    #[test]
    fn test_cpf_mask_while_typing() {
        assert_eq!(format_document(""), "");
        assert_eq!(format_document("123"), "123");
        assert_eq!(format_document("1234"), "123.4");
        assert_eq!(format_document("1234567"), "123.456.7");
        assert_eq!(format_document("123456789"), "123.456.789");
        assert_eq!(format_document("1234567890"), "123.456.789-0");
        assert_eq!(format_document("12345678909"), "123.456.789-09");
    }

    #[test]
    fn test_cnpj_mask_while_typing() {
        assert_eq!(format_document("123456789012"), "12.345.678/9012");
        assert_eq!(format_document("1234567890123"), "12.345.678/9012-3");
        assert_eq!(format_document("12345678000195"), "12.345.678/0001-95");
        assert_eq!(format_document("123456780001959"), "12.345.678/0001-95");
    }

    #[test]
    fn test_mask_is_stable_on_reapply() {
        let once = format_document("12a3456 78909");
        assert_eq!(format_document(&once), once);
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(DocumentType::parse("CPF"), Some(DocumentType::Cpf));
        assert_eq!(DocumentType::parse(" cnpj "), Some(DocumentType::Cnpj));
        assert_eq!(DocumentType::parse("rg"), None);
        assert_eq!(DocumentType::Cnpj.record_field(), "cnpj");
    }
}
