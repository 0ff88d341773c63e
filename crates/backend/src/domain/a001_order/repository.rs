use std::collections::HashMap;
use std::time::Duration;

use contracts::domain::a001_order::aggregate::OrderRecord;
use contracts::domain::a001_order::feed::decode_payload;
use contracts::domain::a001_order::lookup::OrderRepository;
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use crate::shared::config::{resolve_path, SourceConfig};

static ORDERS: OnceCell<OrderRepository> = OnceCell::new();

/// Load the order list from the configured source and keep it for the
/// lifetime of the process.
pub async fn initialize(source: &SourceConfig) -> anyhow::Result<&'static OrderRepository> {
    let records = load(source).await?;
    tracing::info!("Loaded {} order records", records.len());
    install(OrderRepository::new(records))
}

/// Install an already built repository. Fails if one is installed.
pub fn install(repo: OrderRepository) -> anyhow::Result<&'static OrderRepository> {
    ORDERS
        .set(repo)
        .map_err(|_| anyhow::anyhow!("Order repository already initialized"))?;
    ORDERS
        .get()
        .ok_or_else(|| anyhow::anyhow!("Order repository missing after install"))
}

/// Installed repository, `None` until start-up finished loading.
pub fn orders() -> Option<&'static OrderRepository> {
    ORDERS.get()
}

/// Orders every test in this binary sees. `ORDERS` is set once per process,
/// so all tests that need an installed repository go through here.
#[cfg(test)]
pub(crate) fn install_test_fixture() -> &'static OrderRepository {
    ORDERS.get_or_init(|| {
        OrderRepository::new(vec![
            OrderRecord {
                pedido: Some("PV-1".into()),
                cpf: Some("123.456.789-09".into()),
                status: Some("Entregue".into()),
                ..Default::default()
            },
            OrderRecord {
                pedido: Some("PV-2".into()),
                cnpj: Some("12.345.678/0001-95".into()),
                status: Some("Em trânsito".into()),
                ..Default::default()
            },
        ])
    })
}

pub async fn load(source: &SourceConfig) -> anyhow::Result<Vec<OrderRecord>> {
    match source {
        SourceConfig::Csv { path } => {
            let path = resolve_path(path);
            tracing::info!("Reading orders CSV: {}", path.display());
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
            parse_csv(&text)
        }
        SourceConfig::Json { path } => {
            let path = resolve_path(path);
            tracing::info!("Reading orders JSON: {}", path.display());
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
            decode_payload(&text).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
        }
        SourceConfig::Upstream { url, timeout_secs } => {
            fetch_upstream(url, Duration::from_secs(*timeout_secs)).await
        }
    }
}

/// One bulk request to the upstream feed.
async fn fetch_upstream(url: &str, timeout: Duration) -> anyhow::Result<Vec<OrderRecord>> {
    tracing::info!("Fetching orders from upstream: {}", url);
    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            anyhow::anyhow!("Upstream timed out after {}s", timeout.as_secs())
        } else {
            anyhow::anyhow!("Upstream request failed: {}", e)
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Upstream returned HTTP {}", status);
    }

    let body = response.text().await?;
    decode_payload(&body).map_err(|e| anyhow::anyhow!("Upstream payload rejected: {}", e))
}

/// Parse a spreadsheet export. The header row carries the feed field names;
/// `;` is accepted as delimiter (Excel pt-BR default). Blank cells are absent.
pub fn parse_csv(text: &str) -> anyhow::Result<Vec<OrderRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<HashMap<String, String>>().enumerate() {
        // +2: one-based and the header line
        let row = row.map_err(|e| anyhow::anyhow!("CSV line {}: {}", index + 2, e))?;
        let fields: Map<String, Value> = row
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        let record: OrderRecord = serde_json::from_value(Value::Object(fields))?;
        records.push(record);
    }
    Ok(records)
}

fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    if header.matches(';').count() > header.matches(',').count() {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_csv() {
        let text = "pedido,razaoSocial,cpf,cnpj,status\n\
                    1001,Maria Souza,123.456.789-09,,Entregue\n\
                    1002,Silva Tintas LTDA,,12.345.678/0001-95,Em trânsito\n";
        let records = parse_csv(text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].pedido.as_deref(), Some("1001"));
        assert_eq!(records[0].cpf.as_deref(), Some("123.456.789-09"));
        assert_eq!(records[0].cnpj, None);
        assert_eq!(records[1].status.as_deref(), Some("Em trânsito"));
    }

    #[test]
    fn test_parse_semicolon_csv_keeps_leading_zeros() {
        let text = "pedido;cpf;cidade\n7; 01234567890 ;São Paulo\n";
        let records = parse_csv(text).unwrap();

        assert_eq!(records[0].cpf.as_deref(), Some("01234567890"));
        assert_eq!(records[0].cidade.as_deref(), Some("São Paulo"));
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let text = "pedido,observacao\n5,frágil\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records[0].pedido.as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let source = SourceConfig::Csv {
            path: "/definitely/not/here/orders.csv".into(),
        };
        assert!(load(&source).await.is_err());
    }
}
