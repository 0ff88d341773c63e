//! Mapping of an order record onto the fixed display slots of the result card.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::aggregate::OrderRecord;

/// Shown in any slot whose field is missing or blank.
pub const PLACEHOLDER: &str = "N/A";

/// Brasília time; ISO timestamps are rendered as the local calendar date there.
const BRT_OFFSET_SECS: i32 = 3 * 3600;

// ============================================================================
// Dates
// ============================================================================

/// Render a feed date as `dd/mm/yyyy`.
///
/// Text already containing `/` is kept as is, unparseable text too.
pub fn format_date(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    if raw.contains('/') {
        return Some(raw.to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let date = match FixedOffset::west_opt(BRT_OFFSET_SECS) {
            Some(brt) => dt.with_timezone(&brt).date_naive(),
            None => dt.date_naive(),
        };
        return Some(date.format("%d/%m/%Y").to_string());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.date().format("%d/%m/%Y").to_string());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%d/%m/%Y").to_string());
    }

    Some(raw.to_string())
}

// ============================================================================
// Status badge
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusBadge {
    Success,
    Primary,
    Warning,
    Danger,
}

impl StatusBadge {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusBadge::Success => "bg-success",
            StatusBadge::Primary => "bg-primary",
            StatusBadge::Warning => "bg-warning",
            StatusBadge::Danger => "bg-danger",
        }
    }
}

/// Badge color for a free-text status. Blank status keeps the neutral badge.
///
/// Matching is case- and accent-insensitive, checked in priority order:
/// delivered, in transit, pending, anything else.
pub fn badge_for_status(status: Option<&str>) -> Option<StatusBadge> {
    let status = status.map(str::trim).filter(|s| !s.is_empty())?;
    let folded = fold(status);

    Some(if contains_any(&folded, &["entregue"]) {
        StatusBadge::Success
    } else if contains_any(&folded, &["transito", "rota"]) {
        StatusBadge::Primary
    } else if contains_any(&folded, &["pendente", "aguardando"]) {
        StatusBadge::Warning
    } else {
        StatusBadge::Danger
    })
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Lowercase and strip Portuguese diacritics.
fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

// ============================================================================
// Proof of delivery
// ============================================================================

/// How the proof-of-delivery document is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofOfDeliveryMode {
    /// Embedded viewer (iframe)
    #[default]
    Preview,
    /// Direct download link
    Download,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofOfDelivery {
    Preview(String),
    Download(String),
    Unavailable,
}

impl ProofOfDelivery {
    pub fn resolve(reference: Option<&str>, mode: ProofOfDeliveryMode) -> Self {
        let Some(reference) = reference.map(str::trim).filter(|s| !s.is_empty()) else {
            return ProofOfDelivery::Unavailable;
        };
        let file_id = drive_file_id(reference);

        match (mode, file_id) {
            (ProofOfDeliveryMode::Preview, Some(id)) => {
                ProofOfDelivery::Preview(format!("https://drive.google.com/file/d/{}/preview", id))
            }
            (ProofOfDeliveryMode::Preview, None) if is_http_url(reference) => {
                ProofOfDelivery::Preview(reference.to_string())
            }
            (ProofOfDeliveryMode::Download, Some(id)) => ProofOfDelivery::Download(format!(
                "https://drive.google.com/uc?export=download&id={}",
                id
            )),
            _ => ProofOfDelivery::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, ProofOfDelivery::Unavailable)
    }
}

/// First run of 25+ characters from `[A-Za-z0-9_-]`, the shape of a Drive file id.
pub fn drive_file_id(url: &str) -> Option<&str> {
    const MIN_ID_LEN: usize = 25;
    let is_id_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';

    let mut start = None;
    for (i, c) in url.char_indices() {
        match (is_id_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                if i - s >= MIN_ID_LEN {
                    return Some(&url[s..i]);
                }
                start = None;
            }
            _ => {}
        }
    }
    start
        .filter(|s| url.len() - s >= MIN_ID_LEN)
        .map(|s| &url[s..])
}

fn is_http_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

// ============================================================================
// View
// ============================================================================

/// Display-ready copy of an order record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderView {
    pub pedido: String,
    pub razao_social: String,
    pub nome_fantasia: String,
    pub marca: String,
    pub nota_fiscal: String,
    pub cidade: String,
    pub uf: String,
    pub data_prev_saida: String,
    pub data_real_saida: String,
    pub data_prev_entrega: String,
    pub data_entrega: String,
    pub transportadora: String,
    pub status: String,
    pub badge: Option<StatusBadge>,
    pub proof: ProofOfDelivery,
}

fn text_or_placeholder(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER)
        .to_string()
}

fn date_or_placeholder(value: &Option<String>) -> String {
    format_date(value.as_deref()).unwrap_or_else(|| PLACEHOLDER.to_string())
}

impl OrderView {
    pub fn from_record(record: &OrderRecord, mode: ProofOfDeliveryMode) -> Self {
        Self {
            pedido: text_or_placeholder(&record.pedido),
            razao_social: text_or_placeholder(&record.razao_social),
            nome_fantasia: text_or_placeholder(&record.nome_fantasia),
            marca: text_or_placeholder(&record.marca),
            nota_fiscal: text_or_placeholder(&record.nota_fiscal),
            cidade: text_or_placeholder(&record.cidade),
            uf: text_or_placeholder(&record.uf),
            data_prev_saida: date_or_placeholder(&record.data_prev_saida),
            data_real_saida: date_or_placeholder(&record.data_real_saida),
            data_prev_entrega: date_or_placeholder(&record.data_prev_entrega),
            data_entrega: date_or_placeholder(&record.data_entrega),
            transportadora: text_or_placeholder(&record.transportadora),
            status: text_or_placeholder(&record.status),
            badge: badge_for_status(record.status.as_deref()),
            proof: ProofOfDelivery::resolve(record.comprovante.as_deref(), mode),
        }
    }

    /// Labelled slots in card order (status and proof are rendered apart).
    pub fn slots(&self) -> [(&'static str, &str); 12] {
        [
            ("Pedido", self.pedido.as_str()),
            ("Razão Social", self.razao_social.as_str()),
            ("Nome Fantasia", self.nome_fantasia.as_str()),
            ("Marca", self.marca.as_str()),
            ("Nota Fiscal", self.nota_fiscal.as_str()),
            ("Cidade", self.cidade.as_str()),
            ("UF", self.uf.as_str()),
            ("Previsão de Saída", self.data_prev_saida.as_str()),
            ("Saída", self.data_real_saida.as_str()),
            ("Previsão de Entrega", self.data_prev_entrega.as_str()),
            ("Entrega", self.data_entrega.as_str()),
            ("Transportadora", self.transportadora.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVE_ID: &str = "1AbCdEfGhIjKlMnOpQrStUvWxYz_0123";

    #[test]
    fn test_status_priority() {
        let badge = |s: &str| badge_for_status(Some(s));
        assert_eq!(badge("Entregue"), Some(StatusBadge::Success));
        assert_eq!(badge("Em trânsito"), Some(StatusBadge::Primary));
        // "entrega" is not "entregue"
        assert_eq!(badge("EM ROTA DE ENTREGA"), Some(StatusBadge::Primary));
        assert_eq!(badge("Em rota"), Some(StatusBadge::Primary));
        assert_eq!(badge("Pendente"), Some(StatusBadge::Warning));
        assert_eq!(badge("Aguardando coleta"), Some(StatusBadge::Warning));
        assert_eq!(badge("Cancelado"), Some(StatusBadge::Danger));
        assert_eq!(badge_for_status(None), None);
        assert_eq!(badge_for_status(Some("  ")), None);
    }

    #[test]
    fn test_badge_css_classes() {
        assert_eq!(StatusBadge::Success.css_class(), "bg-success");
        assert_eq!(StatusBadge::Danger.css_class(), "bg-danger");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some("15/03/2024")).as_deref(), Some("15/03/2024"));
        assert_eq!(format_date(Some("2024-03-15")).as_deref(), Some("15/03/2024"));
        // Midnight in Brasília serialized as UTC
        assert_eq!(
            format_date(Some("2024-03-15T03:00:00.000Z")).as_deref(),
            Some("15/03/2024")
        );
        assert_eq!(
            format_date(Some("2024-03-15T10:30:00")).as_deref(),
            Some("15/03/2024")
        );
        assert_eq!(format_date(Some("amanhã")).as_deref(), Some("amanhã"));
        assert_eq!(format_date(Some("")), None);
        assert_eq!(format_date(None), None);
    }

    #[test]
    fn test_drive_file_id() {
        let share = format!("https://drive.google.com/file/d/{}/view?usp=sharing", DRIVE_ID);
        assert_eq!(drive_file_id(&share), Some(DRIVE_ID));
        let open = format!("https://drive.google.com/open?id={}", DRIVE_ID);
        assert_eq!(drive_file_id(&open), Some(DRIVE_ID));
        assert_eq!(drive_file_id("https://example.com/pod.pdf"), None);
    }

    #[test]
    fn test_proof_of_delivery_modes() {
        let share = format!("https://drive.google.com/file/d/{}/view", DRIVE_ID);
        assert_eq!(
            ProofOfDelivery::resolve(Some(&share), ProofOfDeliveryMode::Preview),
            ProofOfDelivery::Preview(format!("https://drive.google.com/file/d/{}/preview", DRIVE_ID))
        );
        assert_eq!(
            ProofOfDelivery::resolve(Some(&share), ProofOfDeliveryMode::Download),
            ProofOfDelivery::Download(format!(
                "https://drive.google.com/uc?export=download&id={}",
                DRIVE_ID
            ))
        );
        assert_eq!(
            ProofOfDelivery::resolve(Some("https://example.com/pod.pdf"), ProofOfDeliveryMode::Preview),
            ProofOfDelivery::Preview("https://example.com/pod.pdf".into())
        );
        assert_eq!(
            ProofOfDelivery::resolve(Some("https://example.com/pod.pdf"), ProofOfDeliveryMode::Download),
            ProofOfDelivery::Unavailable
        );
        assert_eq!(
            ProofOfDelivery::resolve(Some("sem comprovante"), ProofOfDeliveryMode::Preview),
            ProofOfDelivery::Unavailable
        );
        assert!(!ProofOfDelivery::resolve(None, ProofOfDeliveryMode::Preview).is_available());
    }

    #[test]
    fn test_view_falls_back_to_placeholder() {
        let record = OrderRecord {
            pedido: Some("PV-77".into()),
            cidade: Some("  ".into()),
            data_entrega: Some("2024-01-02".into()),
            status: Some("Em rota".into()),
            ..Default::default()
        };
        let view = OrderView::from_record(&record, ProofOfDeliveryMode::Preview);

        assert_eq!(view.pedido, "PV-77");
        assert_eq!(view.cidade, PLACEHOLDER);
        assert_eq!(view.marca, PLACEHOLDER);
        assert_eq!(view.data_entrega, "02/01/2024");
        assert_eq!(view.data_prev_saida, PLACEHOLDER);
        assert_eq!(view.status, "Em rota");
        assert_eq!(view.badge, Some(StatusBadge::Primary));
        assert_eq!(view.proof, ProofOfDelivery::Unavailable);
        assert_eq!(view.slots()[0], ("Pedido", "PV-77"));
        assert_eq!(view.slots().len(), 12);
    }

    #[test]
    fn test_missing_status_has_no_badge() {
        let view = OrderView::from_record(&OrderRecord::default(), ProofOfDeliveryMode::Preview);
        assert_eq!(view.status, PLACEHOLDER);
        assert_eq!(view.badge, None);
    }
}
