//! Translation table
//!
//! Nested mapping locale -> content key -> entry. Entries are plain
//! strings, string lists, or timeline records. The table is validated
//! once when it is built: every key must exist in both locales with the
//! same shape, so lookups made by the renderer cannot silently miss
//! because of the data.

use crate::error::{TranslationError, TranslationResult};
use crate::state::Locale;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// One record of a timeline section (education, internships, campus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(alias = "school", alias = "company", alias = "name", alias = "event")]
    pub title: String,

    pub date: String,

    #[serde(alias = "major", alias = "position", alias = "role")]
    pub subtitle: String,

    pub details: String,
}

/// Value stored under a content key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    List(Vec<String>),
    Timeline(Vec<TimelineEntry>),
}

impl Entry {
    /// Human-readable shape name for diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            Entry::Text(_) => "text",
            Entry::List(_) => "list",
            Entry::Timeline(_) => "timeline",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Entry::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_timeline(&self) -> Option<&[TimelineEntry]> {
        match self {
            Entry::Timeline(items) => Some(items),
            _ => None,
        }
    }

    /// An empty JSON array matches any list shape
    fn shape_compatible(&self, other: &Entry) -> bool {
        match (self, other) {
            (Entry::List(a), Entry::Timeline(_)) | (Entry::Timeline(_), Entry::List(a)) => {
                a.is_empty()
            }
            _ => self.shape() == other.shape(),
        }
    }
}

/// Entries of a single locale, keyed by content key
pub type LocaleTable = BTreeMap<String, Entry>;

/// Validated translation table covering both locales
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    locales: BTreeMap<Locale, LocaleTable>,
}

impl TranslationTable {
    /// Build a table, rejecting incomplete or inconsistent data
    pub fn new(locales: BTreeMap<Locale, LocaleTable>) -> TranslationResult<Self> {
        let table = Self { locales };
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a JSON table of the form `{ "zh": {...}, "en": {...} }`
    pub fn from_json(json: &str) -> TranslationResult<Self> {
        let locales: BTreeMap<Locale, LocaleTable> = serde_json::from_str(json)?;
        Self::new(locales)
    }

    /// Read, parse, and validate a table file
    pub fn from_file(path: &Path) -> TranslationResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| TranslationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&json)?;
        log::info!(
            "Loaded {} translation keys from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Check that both locales carry the same keys with the same shapes
    pub fn validate(&self) -> TranslationResult<()> {
        for locale in Locale::ALL {
            if !self.locales.contains_key(&locale) {
                return Err(TranslationError::MissingLocale(locale));
            }
        }

        let all_keys: BTreeSet<&String> = self.locales.values().flat_map(|t| t.keys()).collect();

        let mut missing = Vec::new();
        for key in &all_keys {
            for (locale, entries) in &self.locales {
                if !entries.contains_key(*key) {
                    missing.push((*locale, (*key).clone()));
                }
            }
        }
        if !missing.is_empty() {
            return Err(TranslationError::Incomplete { missing });
        }

        let zh = &self.locales[&Locale::Zh];
        let en = &self.locales[&Locale::En];
        for (key, left) in zh {
            let right = &en[key];
            if !left.shape_compatible(right) {
                return Err(TranslationError::ShapeMismatch {
                    key: key.clone(),
                    left: left.shape(),
                    right: right.shape(),
                });
            }
        }

        Ok(())
    }

    /// Number of content keys (identical for both locales)
    pub fn len(&self) -> usize {
        self.locales.get(&Locale::Zh).map_or(0, |t| t.len())
    }

    /// Raw entry lookup
    pub fn get(&self, locale: Locale, key: &str) -> Option<&Entry> {
        self.locales.get(&locale).and_then(|t| t.get(key))
    }

    pub fn text(&self, locale: Locale, key: &str) -> Option<&str> {
        self.get(locale, key).and_then(Entry::as_text)
    }

    /// Text lookup that falls back to the key itself
    pub fn text_or_key<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.text(locale, key).unwrap_or(key)
    }

    pub fn list(&self, locale: Locale, key: &str) -> Option<&[String]> {
        self.get(locale, key).and_then(Entry::as_list)
    }

    pub fn timeline(&self, locale: Locale, key: &str) -> Option<&[TimelineEntry]> {
        self.get(locale, key).and_then(Entry::as_timeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_json(zh_extra: &str, en_extra: &str) -> String {
        format!(
            r#"{{
                "zh": {{ "darkMode": "深色模式", "skillsList": ["雅思"] {} }},
                "en": {{ "darkMode": "Dark Mode", "skillsList": ["IELTS"] {} }}
            }}"#,
            zh_extra, en_extra
        )
    }

    #[test]
    fn test_lookup_by_shape() {
        let table = TranslationTable::from_json(&table_json("", "")).unwrap();
        assert_eq!(table.text(Locale::Zh, "darkMode"), Some("深色模式"));
        assert_eq!(table.list(Locale::En, "skillsList").unwrap(), ["IELTS"]);
        assert!(table.text(Locale::En, "skillsList").is_none());
        assert_eq!(table.text_or_key(Locale::En, "unknown"), "unknown");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_timeline_accepts_section_field_names() {
        let json = r#"{
            "zh": { "experienceList": [
                { "company": "智勤会计师事务所", "date": "2025.03-2025.07", "position": "审计助理", "details": "d" }
            ] },
            "en": { "experienceList": [
                { "title": "Zhiqin Accounting Firm", "date": "2025.03-2025.07", "subtitle": "Audit Assistant", "details": "d" }
            ] }
        }"#;
        let table = TranslationTable::from_json(json).unwrap();
        let zh = table.timeline(Locale::Zh, "experienceList").unwrap();
        assert_eq!(zh[0].title, "智勤会计师事务所");
        assert_eq!(zh[0].subtitle, "审计助理");
        let en = table.timeline(Locale::En, "experienceList").unwrap();
        assert_eq!(en[0].subtitle, "Audit Assistant");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let json = table_json(r#", "workspace": "工作空间""#, "");
        match TranslationTable::from_json(&json) {
            Err(TranslationError::Incomplete { missing }) => {
                assert_eq!(missing, vec![(Locale::En, "workspace".to_string())]);
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_locale_is_rejected() {
        let json = r#"{ "zh": { "darkMode": "深色模式" } }"#;
        assert!(matches!(
            TranslationTable::from_json(json),
            Err(TranslationError::MissingLocale(Locale::En))
        ));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let json = table_json(r#", "navMenu": "首页""#, r#", "navMenu": ["Home"]"#);
        assert!(matches!(
            TranslationTable::from_json(&json),
            Err(TranslationError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_locale_is_a_parse_error() {
        let json = r#"{ "zh": {}, "en": {}, "fr": {} }"#;
        assert!(matches!(
            TranslationTable::from_json(json),
            Err(TranslationError::Parse(_))
        ));
    }
}
