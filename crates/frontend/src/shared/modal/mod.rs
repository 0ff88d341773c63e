use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Blocking alert dialog. Only the OK button or Escape dismisses it.
#[component]
pub fn AlertDialog(
    /// Dialog title
    title: String,
    /// Message body
    text: String,
    /// Callback when the dialog is dismissed
    on_close: Callback<()>,
) -> impl IntoView {
    // Handle Escape key
    let handle = window_event_listener(ev::keydown, move |event: ev::KeyboardEvent| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div class="modal-overlay" role="alertdialog" aria-modal="true">
            <div class="modal modal--alert">
                <div class="modal-icon modal-icon--error">{icon("alert")}</div>
                <h2 class="modal-title">{title}</h2>
                <p class="modal-text">{text}</p>
                <div class="modal-actions">
                    <button class="btn btn-primary" on:click=move |_| on_close.run(())>
                        "OK"
                    </button>
                </div>
            </div>
        </div>
    }
}
