//! Main menu state
//!
//! The landing page menu has three entries. Selecting one marks it
//! active, except for the profile entry, which leaves for the resume page.

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Content key, also used as the item's label key
    pub key: &'static str,

    /// Page to open instead of activating the item
    pub href: Option<&'static str>,
}

/// Entries of the main menu in display order
pub const MENU: [NavItem; 3] = [
    NavItem {
        key: "welcome",
        href: None,
    },
    NavItem {
        key: "profile",
        href: Some("resume.html"),
    },
    NavItem {
        key: "life",
        href: None,
    },
];

/// Key active when a page loads
pub const DEFAULT_ACTIVE: &str = "welcome";

/// Result of selecting a menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The entry is now active
    Activated(&'static str),

    /// The visitor leaves for another page
    Navigate(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    active: &'static str,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            active: DEFAULT_ACTIVE,
        }
    }
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &'static str {
        self.active
    }

    /// Select an entry by key; unknown keys are ignored
    pub fn select(&mut self, key: &str) -> Option<NavOutcome> {
        let item = MENU.iter().find(|item| item.key == key)?;
        match item.href {
            Some(href) => Some(NavOutcome::Navigate(href)),
            None => {
                self.active = item.key;
                Some(NavOutcome::Activated(item.key))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_active() {
        assert_eq!(NavState::new().active(), "welcome");
    }

    #[test]
    fn test_select_activates() {
        let mut nav = NavState::new();
        assert_eq!(nav.select("life"), Some(NavOutcome::Activated("life")));
        assert_eq!(nav.active(), "life");
    }

    #[test]
    fn test_profile_navigates_without_activating() {
        let mut nav = NavState::new();
        assert_eq!(nav.select("profile"), Some(NavOutcome::Navigate("resume.html")));
        assert_eq!(nav.active(), "welcome");
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut nav = NavState::new();
        assert!(nav.select("photo").is_none());
        assert_eq!(nav.active(), "welcome");
    }
}
