use crate::shared::icons::icon;
use contracts::domain::a001_order::presentation::ProofOfDelivery;
use leptos::prelude::*;

#[component]
pub fn ProofOfDeliveryViewer(proof: ProofOfDelivery) -> impl IntoView {
    let available = proof.is_available();
    let body = match proof {
        ProofOfDelivery::Preview(url) => view! {
            <div class="pod-view">
                <iframe
                    class="pod-frame"
                    src=url.clone()
                    title="Comprovante de entrega"
                    allow="autoplay"
                ></iframe>
                <a class="pod-link" href=url target="_blank" rel="noopener noreferrer">
                    "Abrir em nova aba"
                </a>
            </div>
        }
        .into_any(),
        ProofOfDelivery::Download(url) => view! {
            <div class="pod-view">
                <a class="btn btn-secondary" href=url target="_blank" rel="noopener noreferrer">
                    {icon("download")}
                    {"Baixar comprovante"}
                </a>
            </div>
        }
        .into_any(),
        ProofOfDelivery::Unavailable => view! {
            <div class="pod-unavailable">
                {icon("file")}
                <p>"Comprovante indisponível"</p>
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="pod-section" class:pod-section-empty=!available>
            <h3>"Comprovante de Entrega"</h3>
            {body}
        </div>
    }
}
