//! Theme management module for the application.
//!
//! Light/dark switch. The choice is persisted in localStorage under `theme`
//! and restored on the next visit; dark mode is a `dark-mode` class on `<body>`.

mod theme_switch;

pub use theme_switch::ThemeSwitch;

use leptos::prelude::*;
use web_sys::window;

/// Available themes in the application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the theme name as a string (used for localStorage).
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything unknown falls back to the default.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            "light" => Theme::Light,
            _ => Theme::default(),
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label of the switch: names the theme a click switches to.
    pub fn switch_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Modo Light",
            Theme::Light => "Modo Dark",
        }
    }
}

pub const THEME_STORAGE_KEY: &str = "theme";

const DARK_MODE_CLASS: &str = "dark-mode";

/// Key-value store holding the theme flag.
pub trait ThemeStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str);
}

/// Browser localStorage.
pub struct LocalStorage;

impl ThemeStorage for LocalStorage {
    fn load(&self) -> Option<String> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(THEME_STORAGE_KEY).ok().flatten())
    }

    fn save(&self, value: &str) {
        if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(THEME_STORAGE_KEY, value);
        }
    }
}

pub fn load_theme(storage: &impl ThemeStorage) -> Theme {
    storage
        .load()
        .map(|s| Theme::from_stored(&s))
        .unwrap_or_default()
}

/// Flip the theme and persist the new value.
pub fn toggle_theme(storage: &impl ThemeStorage, current: Theme) -> Theme {
    let next = current.toggled();
    storage.save(next.as_str());
    next
}

/// Apply theme by toggling the dark-mode class on body.
fn apply_theme(theme: Theme) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let _ = body
        .class_list()
        .toggle_with_force(DARK_MODE_CLASS, theme == Theme::Dark);
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    /// Current theme signal.
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    /// Switch light/dark, persist and apply.
    pub fn toggle(&self) {
        let next = toggle_theme(&LocalStorage, self.theme.get_untracked());
        self.theme.set(next);
        apply_theme(next);
    }

    /// Get the current theme.
    pub fn get_theme(&self) -> Theme {
        self.theme.get()
    }
}

/// Provides theme context to children components.
#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    // Load theme from storage on initial render
    let initial_theme = load_theme(&LocalStorage);
    apply_theme(initial_theme);

    provide_context(ThemeContext {
        theme: RwSignal::new(initial_theme),
    });

    children()
}

/// Hook to use the theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}
