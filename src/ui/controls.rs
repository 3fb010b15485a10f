//! Locale and theme controls
//!
//! Injects the two toggle buttons into the top right corner of a page.
//! Injection is idempotent: a page that already carries the buttons
//! (for instance a page rendered by a previous run) keeps them.

use crate::markup::{Document, Element, NodeId};

/// Class of the container holding both buttons
pub const CONTROLS_CLASS: &str = "top-right-controls";

/// Id of the locale toggle
pub const LOCALE_SWITCH_ID: &str = "langSwitch";

/// Id of the theme toggle
pub const THEME_SWITCH_ID: &str = "themeSwitch";

/// Class added to `<body>` once the controls are live
pub const LOADED_CLASS: &str = "global-controls-loaded";

const CONTAINER_STYLE: &str =
    "position: fixed; top: 20px; right: 20px; z-index: 1000; display: flex; gap: 10px;";

const BUTTON_STYLE: &str = "padding: 8px 16px; border: none; border-radius: 20px; \
     background: rgba(255, 255, 255, 0.2); color: var(--text-color); cursor: pointer; \
     backdrop-filter: blur(10px); transition: all 0.3s ease;";

/// Handles to the injected controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub locale_switch: NodeId,
    pub theme_switch: NodeId,
}

impl Controls {
    /// Find existing controls or append new ones to `<body>`
    ///
    /// Returns `None` for a page without a body.
    pub fn inject(doc: &mut Document) -> Option<Self> {
        if let Some(existing) = Self::find(doc) {
            log::debug!("Reusing controls already present in the page");
            return Some(existing);
        }

        let body = doc.body()?;
        let container = doc.append_element(
            body,
            Element::new("div")
                .with_class(CONTROLS_CLASS)
                .with_attr("style", CONTAINER_STYLE),
        );
        let locale_switch = doc.append_element(container, button(LOCALE_SWITCH_ID));
        let theme_switch = doc.append_element(container, button(THEME_SWITCH_ID));

        Some(Self {
            locale_switch,
            theme_switch,
        })
    }

    fn find(doc: &Document) -> Option<Self> {
        let locale_switch = doc.element_by_id(LOCALE_SWITCH_ID)?;
        let theme_switch = doc.element_by_id(THEME_SWITCH_ID)?;
        Some(Self {
            locale_switch,
            theme_switch,
        })
    }
}

fn button(id: &str) -> Element {
    Element::new("button")
        .with_attr("id", id)
        .with_attr("type", "button")
        .with_attr("style", BUTTON_STYLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    #[test]
    fn test_inject_appends_to_body() {
        let mut doc = Document::skeleton();
        let controls = Controls::inject(&mut doc).unwrap();

        let container = doc.parent(controls.locale_switch).unwrap();
        assert_eq!(doc.parent(container), doc.body());
        assert!(doc.has_class(container, CONTROLS_CLASS));
        assert_eq!(doc.parent(controls.theme_switch), Some(container));
        assert_eq!(doc.element_by_id(LOCALE_SWITCH_ID), Some(controls.locale_switch));
        assert_eq!(doc.element_by_id(THEME_SWITCH_ID), Some(controls.theme_switch));
    }

    #[test]
    fn test_inject_is_idempotent() {
        let mut doc = Document::skeleton();
        let first = Controls::inject(&mut doc).unwrap();
        let second = Controls::inject(&mut doc).unwrap();
        assert_eq!(first, second);

        let reparsed_html = doc.to_html();
        let mut reparsed = parse(&reparsed_html).unwrap();
        Controls::inject(&mut reparsed).unwrap();
        assert_eq!(reparsed.by_class(reparsed.root(), CONTROLS_CLASS).len(), 1);
    }

    #[test]
    fn test_no_body_no_controls() {
        let mut doc = Document::new();
        assert!(Controls::inject(&mut doc).is_none());
    }
}
