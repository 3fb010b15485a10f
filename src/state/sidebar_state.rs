//! Side navigation state
//!
//! The page sidebar collapses to a minimized strip when the pointer
//! leaves it, expands when the pointer enters, and flips on its toggle
//! button. The state lives in the `minimized` class of `#sideNav`, so a
//! stylesheet sees exactly what this module decides.

use crate::markup::{Document, NodeId};

/// Id of the sidebar element
pub const SIDEBAR_ID: &str = "sideNav";

/// Id of the sidebar toggle button
pub const SIDEBAR_TOGGLE_ID: &str = "sideNavToggle";

/// Class present while the sidebar is collapsed
pub const MINIMIZED_CLASS: &str = "minimized";

/// Sidebar bound to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarState {
    /// The `#sideNav` element
    pub nav: NodeId,
}

impl SidebarState {
    /// Bind to the page sidebar; `None` unless both the sidebar and its
    /// toggle button exist
    pub fn attach(doc: &Document) -> Option<Self> {
        let nav = doc.element_by_id(SIDEBAR_ID)?;
        doc.element_by_id(SIDEBAR_TOGGLE_ID)?;
        Some(Self { nav })
    }

    pub fn is_minimized(&self, doc: &Document) -> bool {
        doc.has_class(self.nav, MINIMIZED_CLASS)
    }

    /// Pointer entered the sidebar
    pub fn expand(&self, doc: &mut Document) {
        doc.remove_class(self.nav, MINIMIZED_CLASS);
    }

    /// Pointer left the sidebar
    pub fn collapse(&self, doc: &mut Document) {
        doc.add_class(self.nav, MINIMIZED_CLASS);
    }

    /// Toggle button clicked; returns whether the sidebar is now minimized
    pub fn toggle(&self, doc: &mut Document) -> bool {
        doc.toggle_class(self.nav, MINIMIZED_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse;

    const PAGE: &str = r#"<body>
        <nav id="sideNav" class="side-nav"><button id="sideNavToggle">≡</button></nav>
    </body>"#;

    #[test]
    fn test_attach_requires_both_elements() {
        let doc = parse(PAGE).unwrap();
        assert!(SidebarState::attach(&doc).is_some());

        let doc = parse(r#"<body><nav id="sideNav"></nav></body>"#).unwrap();
        assert!(SidebarState::attach(&doc).is_none());
    }

    #[test]
    fn test_pointer_enter_and_leave() {
        let mut doc = parse(PAGE).unwrap();
        let sidebar = SidebarState::attach(&doc).unwrap();

        sidebar.collapse(&mut doc);
        assert!(sidebar.is_minimized(&doc));
        sidebar.collapse(&mut doc);
        assert_eq!(doc.attr(sidebar.nav, "class"), Some("side-nav minimized"));

        sidebar.expand(&mut doc);
        assert!(!sidebar.is_minimized(&doc));
        assert_eq!(doc.attr(sidebar.nav, "class"), Some("side-nav"));
    }

    #[test]
    fn test_toggle() {
        let mut doc = parse(PAGE).unwrap();
        let sidebar = SidebarState::attach(&doc).unwrap();

        assert!(sidebar.toggle(&mut doc));
        assert!(!sidebar.toggle(&mut doc));
        assert!(!sidebar.is_minimized(&doc));
    }
}
