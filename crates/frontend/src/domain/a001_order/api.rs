//! Order feed client.
//!
//! Bulk load of the whole list (with timeout) and per-document search.

use std::cell::Cell;
use std::rc::Rc;

use contracts::domain::a001_order::aggregate::OrderRecord;
use contracts::domain::a001_order::document::ValidatedDocument;
use contracts::domain::a001_order::feed::{decode_payload, FeedError};
use contracts::domain::a001_order::lookup::LookupOutcome;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use web_sys::AbortController;

/// GET the whole order list. The request is aborted after `timeout_ms`.
pub async fn fetch_all_orders(url: &str, timeout_ms: u32) -> Result<Vec<OrderRecord>, FeedError> {
    let controller =
        AbortController::new().map_err(|e| FeedError::Transport(format!("{:?}", e)))?;
    let timed_out = Rc::new(Cell::new(false));

    let timer = {
        let controller = controller.clone();
        let timed_out = timed_out.clone();
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let signal = controller.signal();
    let result = get_text(Request::get(url).abort_signal(Some(&signal))).await;
    timer.cancel();

    match result {
        Err(_) if timed_out.get() => Err(FeedError::Timeout),
        Err(e) => Err(e),
        Ok(body) => decode_payload(&body),
    }
}

/// GET the search endpoint for one document; first record wins.
pub async fn query_order(url: &str, doc: &ValidatedDocument) -> Result<LookupOutcome, FeedError> {
    let builder = Request::get(url).query([
        ("doc", doc.cleaned.as_str()),
        ("type", doc.doc_type.record_field()),
    ]);
    let body = get_text(builder).await?;
    let records = decode_payload(&body)?;
    Ok(LookupOutcome::from_option(records.into_iter().next()))
}

async fn get_text(builder: RequestBuilder) -> Result<String, FeedError> {
    let response = builder
        .send()
        .await
        .map_err(|e| FeedError::Transport(e.to_string()))?;

    // The feed reports bad input as 4xx with an error body
    if !response.ok() && response.status() != 400 {
        return Err(FeedError::Transport(format!("HTTP {}", response.status())));
    }

    response
        .text()
        .await
        .map_err(|e| FeedError::Transport(e.to_string()))
}
