use crate::shared::icons::icon;
use crate::shared::theme::ThemeSwitch;
use leptos::prelude::*;

#[component]
pub fn AppHeader() -> impl IntoView {
    view! {
        <header class="header">
            <div class="header__content">
                {icon("truck")}
                <span class="header__title">"Rastreamento de Pedidos"</span>
            </div>
            <div class="header__actions">
                <ThemeSwitch />
            </div>
        </header>
    }
}
