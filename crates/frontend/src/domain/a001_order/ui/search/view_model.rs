use crate::domain::a001_order::api;
use crate::shared::config::{FeedSettings, LookupStrategy};
use contracts::domain::a001_order::aggregate::OrderRecord;
use contracts::domain::a001_order::document::{format_document, validate_document, DocumentError};
use contracts::domain::a001_order::feed::FeedError;
use contracts::domain::a001_order::lookup::{LookupOutcome, OrderRepository};
use contracts::domain::a001_order::presentation::{OrderView, ProofOfDeliveryMode};
use leptos::prelude::*;

pub const READY_MESSAGE: &str = "Digite um CPF ou CNPJ para pesquisar";

/// What the result area shows.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchPhase {
    /// Nothing searched yet, optional hint
    Idle(Option<String>),
    Loading,
    Found(Box<OrderView>),
    NotFound,
}

/// Content of the blocking alert dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertMessage {
    pub title: String,
    pub text: String,
}

impl AlertMessage {
    pub fn invalid_document(err: &DocumentError) -> Self {
        Self {
            title: err.title().to_string(),
            text: err.to_string(),
        }
    }

    pub fn load_failed() -> Self {
        Self {
            title: "Erro de Carregamento".to_string(),
            text: "Não foi possível carregar os dados. Por favor, recarregue a página.".to_string(),
        }
    }

    pub fn search_failed() -> Self {
        Self {
            title: "Erro".to_string(),
            text: "Falha ao processar a busca".to_string(),
        }
    }
}

/// Result area and alert after a search finished. Never `Loading`.
pub fn resolve_search(
    result: Result<LookupOutcome, FeedError>,
    mode: ProofOfDeliveryMode,
) -> (SearchPhase, Option<AlertMessage>) {
    match result {
        Ok(LookupOutcome::Found(record)) => (
            SearchPhase::Found(Box::new(OrderView::from_record(&record, mode))),
            None,
        ),
        Ok(LookupOutcome::NotFound) => (SearchPhase::NotFound, None),
        Err(e) => {
            log::error!("Erro na busca: {}", e);
            (SearchPhase::Idle(None), Some(AlertMessage::search_failed()))
        }
    }
}

/// Repository, result area and alert after the bulk load finished. Never `Loading`.
pub fn resolve_bulk_load(
    result: Result<Vec<OrderRecord>, FeedError>,
) -> (Option<OrderRepository>, SearchPhase, Option<AlertMessage>) {
    match result {
        Ok(records) => {
            log::info!("Pedidos carregados: {}", records.len());
            (
                Some(OrderRepository::new(records)),
                SearchPhase::Idle(Some(READY_MESSAGE.to_string())),
                None,
            )
        }
        Err(e) => {
            log::error!("Erro ao carregar dados: {}", e);
            (None, SearchPhase::Idle(None), Some(AlertMessage::load_failed()))
        }
    }
}

/// ViewModel for the order search page
#[derive(Clone, Copy)]
pub struct OrderSearchViewModel {
    pub input: RwSignal<String>,
    pub phase: RwSignal<SearchPhase>,
    pub alert: RwSignal<Option<AlertMessage>>,
    repository: StoredValue<Option<OrderRepository>>,
    settings: FeedSettings,
}

impl OrderSearchViewModel {
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            input: RwSignal::new(String::new()),
            phase: RwSignal::new(SearchPhase::Idle(None)),
            alert: RwSignal::new(None),
            repository: StoredValue::new(None),
            settings,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase.get() == SearchPhase::Loading
    }

    /// Bulk load for `FetchOnce`; the remote strategy is ready immediately.
    pub fn start(&self) {
        match self.settings.strategy {
            LookupStrategy::RemoteQuery => {
                self.phase.set(SearchPhase::Idle(Some(READY_MESSAGE.to_string())));
            }
            LookupStrategy::FetchOnce => {
                self.phase.set(SearchPhase::Loading);
                let this = *self;
                let url = self.settings.orders_url();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api::fetch_all_orders(&url, this.settings.bulk_timeout_ms).await;
                    let (repo, phase, alert) = resolve_bulk_load(result);
                    this.repository.set_value(repo);
                    this.phase.set(phase);
                    this.alert.set(alert);
                });
            }
        }
    }

    /// Re-apply the CPF/CNPJ mask on every keystroke.
    pub fn on_input(&self, raw: String) {
        self.input.set(format_document(&raw));
    }

    pub fn dismiss_alert(&self) {
        self.alert.set(None);
    }

    pub fn search(&self) {
        if self.phase.get_untracked() == SearchPhase::Loading {
            return;
        }

        let doc = match validate_document(&self.input.get_untracked()).into_result() {
            Ok(doc) => doc,
            Err(e) => {
                self.alert.set(Some(AlertMessage::invalid_document(&e)));
                return;
            }
        };

        let mode = self.settings.proof_mode;
        match self.settings.strategy {
            LookupStrategy::FetchOnce => {
                let outcome = self
                    .repository
                    .with_value(|repo| repo.as_ref().map(|r| r.lookup(&doc)));
                match outcome {
                    Some(outcome) => self.finish_search(resolve_search(Ok(outcome), mode)),
                    // bulk load failed earlier
                    None => {
                        self.phase.set(SearchPhase::Idle(None));
                        self.alert.set(Some(AlertMessage::load_failed()));
                    }
                }
            }
            LookupStrategy::RemoteQuery => {
                self.phase.set(SearchPhase::Loading);
                let this = *self;
                let url = self.settings.search_url();
                wasm_bindgen_futures::spawn_local(async move {
                    let result = api::query_order(&url, &doc).await;
                    this.finish_search(resolve_search(result, mode));
                });
            }
        }
    }

    fn finish_search(&self, (phase, alert): (SearchPhase, Option<AlertMessage>)) {
        self.phase.set(phase);
        if alert.is_some() {
            self.alert.set(alert);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_order::document::validate_document;
    use contracts::domain::a001_order::presentation::StatusBadge;

    fn records() -> Vec<OrderRecord> {
        vec![OrderRecord {
            pedido: Some("PV-1001".into()),
            cpf: Some("123.456.789-09".into()),
            status: Some("Entregue".into()),
            ..Default::default()
        }]
    }

    #[test]
    fn test_bulk_load_success_shows_ready_message() {
        let (repo, phase, alert) = resolve_bulk_load(Ok(records()));
        assert_eq!(repo.map(|r| r.len()), Some(1));
        assert_eq!(phase, SearchPhase::Idle(Some(READY_MESSAGE.to_string())));
        assert_eq!(alert, None);
    }

    #[test]
    fn test_bulk_load_failures_alert_and_leave_loading() {
        for err in [
            FeedError::Timeout,
            FeedError::Malformed,
            FeedError::Transport("offline".into()),
            FeedError::Remote("quota".into()),
        ] {
            let (repo, phase, alert) = resolve_bulk_load(Err(err));
            assert!(repo.is_none());
            assert_ne!(phase, SearchPhase::Loading);
            assert_eq!(alert, Some(AlertMessage::load_failed()));
        }
    }

    #[test]
    fn test_search_found_maps_view() {
        let (repo, _, _) = resolve_bulk_load(Ok(records()));
        let outcome = repo.unwrap().lookup(&validate_document("123.456.789-09"));
        let (phase, alert) = resolve_search(Ok(outcome), ProofOfDeliveryMode::Preview);

        match phase {
            SearchPhase::Found(view) => {
                assert_eq!(view.pedido, "PV-1001");
                assert_eq!(view.badge, Some(StatusBadge::Success));
            }
            other => panic!("unexpected phase {:?}", other),
        }
        assert_eq!(alert, None);
    }

    #[test]
    fn test_search_not_found_hides_loading() {
        let (repo, _, _) = resolve_bulk_load(Ok(records()));
        let outcome = repo.unwrap().lookup(&validate_document("98765432100"));
        let (phase, alert) = resolve_search(Ok(outcome), ProofOfDeliveryMode::Preview);
        assert_eq!(phase, SearchPhase::NotFound);
        assert_eq!(alert, None);
    }

    #[test]
    fn test_search_error_alerts() {
        let (phase, alert) = resolve_search(Err(FeedError::Malformed), ProofOfDeliveryMode::Download);
        assert_eq!(phase, SearchPhase::Idle(None));
        assert_eq!(alert, Some(AlertMessage::search_failed()));
    }

    #[test]
    fn test_invalid_document_alert_text() {
        let err = validate_document("123.456").into_result().unwrap_err();
        let alert = AlertMessage::invalid_document(&err);
        assert_eq!(alert.title, "Documento inválido");
        assert_eq!(alert.text, "Digite um CNPJ válido (14 dígitos)");
    }
}
