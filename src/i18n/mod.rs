//! Internationalization (i18n) module for Folio
//!
//! Two fixed locales, one translation table. The table ships inside the
//! binary and can be replaced by a file from the command line or the
//! configuration.

mod table;

pub use table::{TimelineEntry, TranslationTable};

use crate::error::TranslationResult;
use std::path::Path;

/// Translation table bundled with the binary
const BUNDLED_TABLE: &str = include_str!("../../resources/translations.json");

/// Load the bundled table
pub fn bundled() -> TranslationResult<TranslationTable> {
    TranslationTable::from_json(BUNDLED_TABLE)
}

/// Load a table from `path`, or the bundled one when no path is given
pub fn load(path: Option<&Path>) -> TranslationResult<TranslationTable> {
    match path {
        Some(path) => TranslationTable::from_file(path),
        None => {
            log::debug!("Using bundled translation table");
            bundled()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Locale;

    #[test]
    fn test_bundled_table_is_complete() {
        let table = bundled().unwrap();
        assert_eq!(table.len(), 69);
    }

    #[test]
    fn test_bundled_table_covers_structured_sections() {
        let table = bundled().unwrap();
        for locale in Locale::ALL {
            assert_eq!(table.list(locale, "profileInfo").unwrap().len(), 4);
            assert_eq!(table.list(locale, "intentionList").unwrap().len(), 3);
            assert_eq!(table.list(locale, "skillsList").unwrap().len(), 4);
            assert_eq!(table.list(locale, "navMenu").unwrap().len(), 4);
            assert_eq!(table.timeline(locale, "educationList").unwrap().len(), 2);
            assert_eq!(table.timeline(locale, "experienceList").unwrap().len(), 3);
            assert_eq!(table.timeline(locale, "schoolExpList").unwrap().len(), 2);
            assert!(table.text(locale, "selfEvalText").is_some());
        }
    }

    #[test]
    fn test_bundled_theme_labels() {
        let table = bundled().unwrap();
        assert_eq!(table.text(Locale::Zh, "darkMode"), Some("深色模式"));
        assert_eq!(table.text(Locale::En, "lightMode"), Some("Light Mode"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{ "zh": { "home": "首页" }, "en": { "home": "Home" } }"#,
        )
        .unwrap();

        let table = load(Some(&path)).unwrap();
        assert_eq!(table.text(Locale::En, "home"), Some("Home"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.json"))).is_err());
    }
}
