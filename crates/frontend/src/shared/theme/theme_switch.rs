use super::{use_theme, Theme};
use leptos::prelude::*;

/// Light/dark toggle shown in the header.
#[component]
pub fn ThemeSwitch() -> impl IntoView {
    let ctx = use_theme();

    view! {
        <div class="theme-switch-wrapper">
            <label class="theme-switch" for="checkbox">
                <input
                    type="checkbox"
                    id="checkbox"
                    prop:checked=move || ctx.theme.get() == Theme::Dark
                    on:change=move |_| ctx.toggle()
                />
                <span class="slider round"></span>
            </label>
            <span class="theme-text">{move || ctx.get_theme().switch_label()}</span>
        </div>
    }
}
