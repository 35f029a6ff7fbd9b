use std::cell::Cell;

use dioxus_logger::tracing::{debug, warn};
use web_sys::{Element, Storage};

use crate::dom::DomError;

/// Icon on the theme toggle. Shows the theme the user can switch *to*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl ThemeIcon {
    pub fn for_theme(light: bool) -> Self {
        if light {
            ThemeIcon::Moon
        } else {
            ThemeIcon::Sun
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeIcon::Sun => "sun",
            ThemeIcon::Moon => "moon",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeIcon::Sun => "Switch to light theme",
            ThemeIcon::Moon => "Switch to dark theme",
        }
    }
}

/// Durable storage for the light theme flag.
pub trait ThemeStore {
    /// `None` when the key is absent or storage is unreadable.
    fn load(&self) -> Option<bool>;
    fn save(&self, light: bool) -> Result<(), DomError>;
}

/// Visual side of the theme: root class and toggle icon.
pub trait ThemeSurface {
    fn set_light(&self, light: bool);
    fn set_icon(&self, icon: ThemeIcon);
}

pub struct ThemeController<S, V> {
    store: S,
    surface: V,
    // Mirrors the last applied flag so toggling still works without storage
    light: Cell<bool>,
    // False once a write fails; storage then holds a stale value
    persisted: Cell<bool>,
}

impl<S: ThemeStore, V: ThemeSurface> ThemeController<S, V> {
    pub fn new(store: S, surface: V) -> Self {
        let light = store.load().unwrap_or(false);
        Self {
            store,
            surface,
            light: Cell::new(light),
            persisted: Cell::new(true),
        }
    }

    pub fn is_light_theme(&self) -> bool {
        if !self.persisted.get() {
            return self.light.get();
        }
        self.store.load().unwrap_or(self.light.get())
    }

    pub fn apply_theme(&self, light: bool) {
        self.light.set(light);
        self.surface.set_light(light);
        self.surface.set_icon(ThemeIcon::for_theme(light));
    }

    pub fn toggle_theme(&self) -> bool {
        let next = !self.is_light_theme();
        match self.store.save(next) {
            Ok(()) => self.persisted.set(true),
            Err(e) => {
                warn!("Failed to persist theme preference: {}", e);
                self.persisted.set(false);
            }
        }
        self.apply_theme(next);
        next
    }
}

// ============================================================================
// Browser adapters
// ============================================================================

pub struct LocalStorageThemeStore {
    key: String,
}

impl LocalStorageThemeStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<bool> {
        Self::storage()
            .and_then(|storage| storage.get_item(&self.key).ok().flatten())
            .map(|value| value == "true")
    }

    fn save(&self, light: bool) -> Result<(), DomError> {
        let storage = Self::storage().ok_or(DomError::NoDocument)?;
        storage.set_item(&self.key, if light { "true" } else { "false" })?;
        Ok(())
    }
}

pub struct DocumentThemeSurface {
    root: Option<Element>,
    toggle: Option<Element>,
    light_class: String,
}

impl DocumentThemeSurface {
    pub fn new(root: Option<Element>, toggle: Option<Element>, light_class: impl Into<String>) -> Self {
        Self {
            root,
            toggle,
            light_class: light_class.into(),
        }
    }
}

impl ThemeSurface for DocumentThemeSurface {
    fn set_light(&self, light: bool) {
        if let Some(root) = &self.root {
            if let Err(e) = root.class_list().toggle_with_force(&self.light_class, light) {
                debug!("Failed to toggle {} class: {:?}", self.light_class, e);
            }
        }
    }

    fn set_icon(&self, icon: ThemeIcon) {
        if let Some(toggle) = &self.toggle {
            let result = toggle
                .set_attribute("data-icon", icon.as_str())
                .and_then(|_| toggle.set_attribute("aria-label", icon.label()))
                .and_then(|_| toggle.set_attribute("title", icon.label()));
            if let Err(e) = result {
                debug!("Failed to update theme toggle icon: {:?}", e);
            }
        }
    }
}
