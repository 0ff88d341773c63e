use super::view_model::{OrderSearchViewModel, SearchPhase};
use crate::domain::a001_order::ui::details::OrderDetails;
use crate::shared::config::FeedSettings;
use crate::shared::icons::icon;
use crate::shared::modal::AlertDialog;
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

#[component]
pub fn OrderSearchPage() -> impl IntoView {
    let vm = OrderSearchViewModel::new(FeedSettings::default());
    vm.start();

    view! {
        <section class="order-search">
            <div class="search-card">
                <label for="docInput">"CPF ou CNPJ"</label>
                <div class="search-row">
                    <input
                        type="text"
                        id="docInput"
                        inputmode="numeric"
                        autocomplete="off"
                        maxlength="18"
                        placeholder="000.000.000-00 ou 00.000.000/0000-00"
                        prop:value=move || vm.input.get()
                        on:input=move |ev| vm.on_input(event_target_value(&ev))
                        on:keypress=move |ev: KeyboardEvent| {
                            if ev.key() == "Enter" {
                                vm.search();
                            }
                        }
                    />
                    <button
                        id="searchBtn"
                        class="btn btn-primary"
                        on:click=move |_| vm.search()
                        disabled=move || vm.is_loading()
                    >
                        {icon("search")}
                        {"Buscar"}
                    </button>
                </div>
            </div>

            {move || match vm.phase.get() {
                SearchPhase::Loading => view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        <p>"Carregando..."</p>
                    </div>
                }.into_any(),
                SearchPhase::Found(order) => view! { <OrderDetails order=*order /> }.into_any(),
                SearchPhase::NotFound => view! {
                    <div class="not-found">
                        <p>"Nenhum pedido encontrado para este documento."</p>
                    </div>
                }.into_any(),
                SearchPhase::Idle(Some(message)) => view! {
                    <div class="not-found">
                        <p>{message}</p>
                    </div>
                }.into_any(),
                SearchPhase::Idle(None) => ().into_any(),
            }}

            {move || vm.alert.get().map(|alert| view! {
                <AlertDialog
                    title=alert.title
                    text=alert.text
                    on_close=Callback::new(move |_| vm.dismiss_alert())
                />
            })}
        </section>
    }
}
