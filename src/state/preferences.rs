//! Locale and theme preferences
//!
//! The two presentation flags a visitor can change, and the store that
//! owns their current value. The store writes every change through to a
//! [`Storage`] backend immediately and never fails: unreadable or
//! unknown values fall back to the defaults, and failed writes only cost
//! persistence for the rest of the session.

use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage key holding the active locale code
pub const LOCALE_KEY: &str = "currentLang";

/// Storage key holding the active theme name
pub const THEME_KEY: &str = "theme";

/// Content language of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Chinese
    #[default]
    Zh,
    /// English
    En,
}

impl Locale {
    /// Both supported locales, default first
    pub const ALL: [Locale; 2] = [Locale::Zh, Locale::En];

    /// Code used in storage and in the document `lang` attribute
    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Parse a stored code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "zh" => Some(Locale::Zh),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// The locale a toggle switches to
    pub fn toggled(self) -> Self {
        match self {
            Locale::Zh => Locale::En,
            Locale::En => Locale::Zh,
        }
    }

    /// Label of the locale control: the native name of the other locale
    pub fn switch_label(self) -> &'static str {
        match self {
            Locale::Zh => "English",
            Locale::En => "中文",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s.trim()).ok_or_else(|| ParsePreferenceError::Locale(s.to_string()))
    }
}

/// Visual color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Name used in storage and in the `data-theme` attribute
    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The theme a toggle switches to
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Translation key naming the action of the theme control
    ///
    /// The control offers the other theme, so a light page shows the
    /// dark mode label.
    pub fn switch_label_key(self) -> &'static str {
        match self {
            Theme::Light => "darkMode",
            Theme::Dark => "lightMode",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::from_name(s.trim()).ok_or_else(|| ParsePreferenceError::Theme(s.to_string()))
    }
}

/// Error for preference values typed on the command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePreferenceError {
    #[error("unsupported locale '{0}' (expected zh or en)")]
    Locale(String),

    #[error("unsupported theme '{0}' (expected light or dark)")]
    Theme(String),
}

/// The complete presentation preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preference {
    pub locale: Locale,
    pub theme: Theme,
}

impl Preference {
    pub fn new(locale: Locale, theme: Theme) -> Self {
        Self { locale, theme }
    }
}

/// Single owner of the current preference
#[derive(Debug)]
pub struct PreferenceStore<S: Storage> {
    storage: S,
    current: Preference,
}

impl<S: Storage> PreferenceStore<S> {
    /// Open a store, reading the persisted preference once
    pub fn open(storage: S) -> Self {
        let current = read_preference(&storage);
        log::debug!(
            "Loaded preference: locale={}, theme={}",
            current.locale,
            current.theme
        );
        Self { storage, current }
    }

    /// Read both flags from storage, substituting defaults
    pub fn get(&self) -> Preference {
        read_preference(&self.storage)
    }

    /// The in-memory value, including changes that failed to persist
    pub fn current(&self) -> Preference {
        self.current
    }

    /// Set and persist the locale
    pub fn set_locale(&mut self, locale: Locale) {
        self.current.locale = locale;
        self.write(LOCALE_KEY, locale.code());
    }

    /// Set and persist the theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.current.theme = theme;
        self.write(THEME_KEY, theme.name());
    }

    /// Flip the locale, returning the new one
    pub fn toggle_locale(&mut self) -> Locale {
        let next = self.current.locale.toggled();
        self.set_locale(next);
        next
    }

    /// Flip the theme, returning the new one
    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.current.theme.toggled();
        self.set_theme(next);
        next
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::warn!("Preference '{}' kept for this session only: {}", key, e);
        }
    }
}

fn read_preference<S: Storage>(storage: &S) -> Preference {
    let locale = read_flag(storage, LOCALE_KEY, Locale::from_code);
    let theme = read_flag(storage, THEME_KEY, Theme::from_name);
    Preference {
        locale: locale.unwrap_or_default(),
        theme: theme.unwrap_or_default(),
    }
}

fn read_flag<S: Storage, T>(storage: &S, key: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    match storage.get_item(key) {
        Ok(Some(raw)) => {
            let parsed = parse(&raw);
            if parsed.is_none() {
                log::debug!("Ignoring unsupported value '{}' for '{}'", raw, key);
            }
            parsed
        }
        Ok(None) => None,
        Err(e) => {
            log::debug!("Could not read '{}', using default: {}", key, e);
            None
        }
    }
}
