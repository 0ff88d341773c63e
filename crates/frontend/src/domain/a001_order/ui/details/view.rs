use super::proof_of_delivery::ProofOfDeliveryViewer;
use crate::shared::icons::icon;
use contracts::domain::a001_order::presentation::OrderView;
use leptos::prelude::*;

/// Neutral badge style when the status is blank.
const NEUTRAL_BADGE: &str = "bg-secondary";

#[component]
pub fn OrderDetails(order: OrderView) -> impl IntoView {
    let badge_class = format!(
        "badge {}",
        order.badge.map(|b| b.css_class()).unwrap_or(NEUTRAL_BADGE)
    );
    let fields: Vec<(&'static str, String)> = order
        .slots()
        .iter()
        .map(|(label, value)| (*label, value.to_string()))
        .collect();

    view! {
        <div class="result-card">
            <div class="result-header">
                <h2>{icon("truck")} "Pedido " {order.pedido.clone()}</h2>
                <span id="status" class=badge_class>{order.status.clone()}</span>
            </div>

            <dl class="order-fields">
                {fields
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="order-field">
                            <dt>{label}</dt>
                            <dd>{value}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>

            <ProofOfDeliveryViewer proof=order.proof />
        </div>
    }
}
