use contracts::domain::a001_order::aggregate::OrderRecord;
use contracts::domain::a001_order::document::{validate_document, DocumentError};
use contracts::domain::a001_order::feed::FeedQuery;
use contracts::domain::a001_order::lookup::{LookupOutcome, OrderRepository};

/// Whole order list, in feed order.
pub fn list_all(repo: &OrderRepository) -> Vec<OrderRecord> {
    repo.records().to_vec()
}

/// Find the first order for the queried document.
///
/// The document type is inferred from the digit count; a `type` parameter
/// that disagrees or is not a known type is ignored.
pub fn search(repo: &OrderRepository, query: &FeedQuery) -> Result<LookupOutcome, DocumentError> {
    let doc = validate_document(&query.doc).into_result()?;

    match (query.doc_type.as_deref(), query.requested_type()) {
        (Some(raw), None) => {
            tracing::debug!("Unknown document type hint {:?}, using {}", raw, doc.doc_type.label());
        }
        (_, Some(requested)) if requested != doc.doc_type => {
            tracing::debug!(
                "Requested type {} does not match {} digits, using {}",
                requested.label(),
                doc.cleaned.len(),
                doc.doc_type.label()
            );
        }
        _ => {}
    }

    let outcome = repo.lookup(&doc);
    tracing::info!(
        "Order search by {}: {}",
        doc.doc_type.label(),
        match outcome {
            LookupOutcome::Found(_) => "found",
            LookupOutcome::NotFound => "not found",
        }
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> OrderRepository {
        OrderRepository::new(vec![
            OrderRecord {
                pedido: Some("A".into()),
                cpf: Some("123.456.789-09".into()),
                ..Default::default()
            },
            OrderRecord {
                pedido: Some("B".into()),
                cnpj: Some("12345678000195".into()),
                ..Default::default()
            },
        ])
    }

    fn query(doc: &str, doc_type: Option<&str>) -> FeedQuery {
        FeedQuery {
            doc: doc.into(),
            doc_type: doc_type.map(str::to_string),
        }
    }

    #[test]
    fn test_search_found() {
        let outcome = search(&repo(), &query("12345678909", Some("cpf"))).unwrap();
        assert_eq!(outcome.into_option().and_then(|r| r.pedido), Some("A".into()));
    }

    #[test]
    fn test_inferred_type_wins() {
        let outcome = search(&repo(), &query("12345678000195", Some("cpf"))).unwrap();
        assert_eq!(outcome.into_option().and_then(|r| r.pedido), Some("B".into()));
    }

    #[test]
    fn test_unknown_type_hint_ignored() {
        let outcome = search(&repo(), &query("123.456.789-09", Some("rg"))).unwrap();
        assert_eq!(outcome.into_option().and_then(|r| r.pedido), Some("A".into()));
    }

    #[test]
    fn test_search_not_found() {
        let outcome = search(&repo(), &query("98765432100", None)).unwrap();
        assert_eq!(outcome, LookupOutcome::NotFound);
    }

    #[test]
    fn test_invalid_document_rejected() {
        let err = search(&repo(), &query("123", None)).unwrap_err();
        assert_eq!(err.to_string(), "Digite um CNPJ válido (14 dígitos)");
    }

    #[test]
    fn test_list_all_keeps_order() {
        let all = list_all(&repo());
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].pedido.as_deref(), Some("B"));
    }
}
