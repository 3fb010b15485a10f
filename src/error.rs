//! Error types for Folio
//!
//! This module defines all custom error types used throughout the application.
//! Error types are organized by concern; the binary reports them through
//! `anyhow`. Most of them never reach the user: the preference store
//! swallows storage failures and the renderer skips what it cannot find.
//! Only loading the inputs (config, translations, pages) can stop a run.

use crate::state::Locale;
use std::path::PathBuf;
use thiserror::Error;

/// Markup (page) errors
#[derive(Error, Debug)]
pub enum MarkupError {
    /// The markup could not be tokenized
    #[error("Malformed markup at byte {position}: {message}")]
    Syntax { position: u64, message: String },

    /// Element or attribute name is not valid UTF-8
    #[error("Invalid UTF-8 in markup at byte {position}")]
    Encoding { position: u64 },

    /// Error reading a page from disk
    #[error("Could not read page: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a rendered page
    #[error("Could not write page: {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Translation table errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error reading the table file
    #[error("Could not read translation table: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The table is not valid JSON or has an unexpected layout
    #[error("Invalid translation table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A locale has no table at all
    #[error("Translation table has no entries for locale '{0}'")]
    MissingLocale(Locale),

    /// Some keys exist in one locale but not in the other
    #[error("Translation table is incomplete: {}", format_missing(.missing))]
    Incomplete { missing: Vec<(Locale, String)> },

    /// A key has a different value shape across locales
    #[error("Translation '{key}' is a {left} in one locale and a {right} in the other")]
    ShapeMismatch {
        key: String,
        left: &'static str,
        right: &'static str,
    },
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error loading configuration file
    #[error("Could not load configuration: {0}")]
    LoadError(String),

    /// Error parsing configuration
    #[error("Invalid configuration format: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Configuration directory error
    #[error("Could not access configuration directory")]
    DirectoryError,
}

/// Preference storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error reading the storage file
    #[error("Could not read preferences: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the storage file
    #[error("Could not write preferences: {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Storage file exists but is not a JSON object of strings
    #[error("Corrupt preference file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Could not determine where to keep preferences
    #[error("Could not determine preference directory")]
    DirectoryError,
}

/// Result type alias for markup operations
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Result type alias for translation table operations
pub type TranslationResult<T> = Result<T, TranslationError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

fn format_missing(missing: &[(Locale, String)]) -> String {
    missing
        .iter()
        .map(|(locale, key)| format!("{}.{}", locale.code(), key))
        .collect::<Vec<_>>()
        .join(", ")
}
