use crate::domain::a001_order::ui::search::OrderSearchPage;
use crate::layout::header::AppHeader;
use crate::shared::theme::ThemeProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ThemeProvider>
            <AppHeader />
            <main class="container">
                <OrderSearchPage />
            </main>
        </ThemeProvider>
    }
}
