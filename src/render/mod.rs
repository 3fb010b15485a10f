//! Preference renderer
//!
//! Applies a [`Preference`] to a page: theme markers and palette, locale
//! marker, control labels, translated text, and regenerated structured
//! sections. Every operation overwrites what a previous run wrote, so
//! applying the same preference twice yields the same document.
//!
//! Lookups that miss are skipped: an element whose key has no text entry
//! keeps its current content, and a section absent from the page is
//! simply not bound.

mod bindings;
mod sections;

pub use bindings::{Bindings, SectionKind, SectionTarget};

use crate::i18n::TranslationTable;
use crate::markup::Document;
use crate::state::{Locale, Preference, Theme};
use crate::ui::{Controls, Palette};

/// Root attribute selecting the stylesheet theme
pub const THEME_ATTR: &str = "data-theme";

/// Body class used by the dark stylesheet
pub const DARK_THEME_CLASS: &str = "dark-theme";

/// Class of the active navigation item
pub const ACTIVE_CLASS: &str = "active";

/// Renderer bound to one page
#[derive(Debug, Clone)]
pub struct Renderer {
    bindings: Bindings,
    controls: Option<Controls>,
}

impl Renderer {
    pub fn new(bindings: Bindings, controls: Option<Controls>) -> Self {
        Self { bindings, controls }
    }

    #[cfg(test)]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    #[cfg(test)]
    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    /// Apply the theme markers, palette, and theme control label
    pub fn apply_theme(&self, doc: &mut Document, table: &TranslationTable, pref: Preference) {
        let theme = pref.theme;
        if let Some(html) = doc.document_element() {
            doc.set_attr(html, THEME_ATTR, theme.name());
            let style = Palette::for_theme(theme).merge_into_style(doc.attr(html, "style"));
            doc.set_attr(html, "style", &style);
        }

        if let Some(body) = doc.body() {
            if theme.is_dark() {
                doc.add_class(body, DARK_THEME_CLASS);
            } else {
                doc.remove_class(body, DARK_THEME_CLASS);
            }
        }

        self.refresh_theme_label(doc, table, pref);
        log::debug!("Applied theme {}", theme);
    }

    /// Apply the locale marker, labels, translated text, and sections
    pub fn apply_locale(&self, doc: &mut Document, table: &TranslationTable, pref: Preference) {
        let locale = pref.locale;
        if let Some(html) = doc.document_element() {
            doc.set_attr(html, "lang", locale.code());
        }

        if let Some(controls) = &self.controls {
            doc.set_text(controls.locale_switch, locale.switch_label());
        }

        let mut replaced = 0;
        for (key, targets) in &self.bindings.text {
            match table.text(locale, key) {
                Some(text) => {
                    for target in targets {
                        doc.set_text(*target, text);
                        replaced += 1;
                    }
                }
                None => log::debug!("No {} text for '{}', leaving content as is", locale, key),
            }
        }

        self.render_structured_sections(doc, table, locale);
        self.refresh_theme_label(doc, table, pref);
        log::debug!("Applied locale {} to {} element(s)", locale, replaced);
    }

    /// Regenerate every bound structured section from the table
    pub fn render_structured_sections(
        &self,
        doc: &mut Document,
        table: &TranslationTable,
        locale: Locale,
    ) {
        for section in &self.bindings.sections {
            let key = section.kind.content_key();
            let rendered = match (&section.target, section.kind) {
                (SectionTarget::Container(node), SectionKind::SelfEvaluation) => table
                    .text(locale, key)
                    .map(|text| doc.set_text(*node, text)),
                (
                    SectionTarget::Container(node),
                    SectionKind::Education | SectionKind::Experience | SectionKind::CampusExperience,
                ) => table.timeline(locale, key).map(|entries| {
                    sections::render_timeline(doc, *node, entries, section.kind.subtitle_class())
                }),
                (SectionTarget::Container(node), _) => table
                    .list(locale, key)
                    .map(|items| sections::render_list(doc, *node, items)),
                (SectionTarget::Items(items), _) => table
                    .list(locale, key)
                    .map(|labels| sections::render_items(doc, items, labels)),
            };

            if rendered.is_none() {
                log::debug!("No {} entry for section {:?} ('{}')", locale, section.kind, key);
            }
        }
    }

    /// Mark the navigation item for `active` and clear the others
    pub fn apply_active_nav(&self, doc: &mut Document, active: &str) {
        for (key, node) in &self.bindings.nav_items {
            if key == active {
                doc.add_class(*node, ACTIVE_CLASS);
            } else {
                doc.remove_class(*node, ACTIVE_CLASS);
            }
        }
    }

    fn refresh_theme_label(&self, doc: &mut Document, table: &TranslationTable, pref: Preference) {
        if let Some(controls) = &self.controls {
            let label = theme_label(table, pref.locale, pref.theme);
            doc.set_text(controls.theme_switch, label);
        }
    }
}

/// Label of the theme control: the other theme's name in `locale`
pub fn theme_label(table: &TranslationTable, locale: Locale, theme: Theme) -> &str {
    table.text_or_key(locale, theme.switch_label_key())
}
