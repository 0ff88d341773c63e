use contracts::domain::a001_order::feed::{BULK_LOAD_TIMEOUT_MS, ORDERS_PATH, SEARCH_PATH};
use contracts::domain::a001_order::presentation::ProofOfDeliveryMode;

use super::api_utils::api_url;

/// How a search reaches the order feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    /// Download the whole list once, search locally
    #[default]
    FetchOnce,
    /// One request to the search endpoint per search
    RemoteQuery,
}

/// Build-time settings of the lookup widget (see the crate features).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedSettings {
    pub strategy: LookupStrategy,
    pub proof_mode: ProofOfDeliveryMode,
    pub bulk_timeout_ms: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            strategy: if cfg!(feature = "remote-query") {
                LookupStrategy::RemoteQuery
            } else {
                LookupStrategy::FetchOnce
            },
            proof_mode: if cfg!(feature = "pod-download") {
                ProofOfDeliveryMode::Download
            } else {
                ProofOfDeliveryMode::Preview
            },
            bulk_timeout_ms: BULK_LOAD_TIMEOUT_MS,
        }
    }
}

impl FeedSettings {
    pub fn orders_url(&self) -> String {
        api_url(ORDERS_PATH)
    }

    pub fn search_url(&self) -> String {
        api_url(SEARCH_PATH)
    }
}
