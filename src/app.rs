//! Page controller
//!
//! A [`Site`] owns one loaded page together with the preference store and
//! routes page events. Loading a page plays the part of the browser's
//! load event; [`Site::update`] plays the part of the click handlers.

use crate::config::Config;
use crate::i18n::TranslationTable;
use crate::markup::Document;
use crate::message::{ControlMessage, Message, NavMessage, SidebarMessage};
use crate::render::{Bindings, Renderer};
use crate::state::{NavOutcome, NavState, PreferenceStore, SidebarState};
use crate::storage::Storage;
use crate::ui::controls::LOADED_CLASS;
use crate::ui::Controls;
use std::path::PathBuf;
use std::rc::Rc;

/// Options gathered from the command line
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Pages to render
    pub pages: Vec<PathBuf>,

    /// Render every page under this directory
    pub site_dir: Option<PathBuf>,

    /// Output directory override
    pub out_dir: Option<PathBuf>,

    /// Configuration file override
    pub config: Option<PathBuf>,

    /// Translation table override
    pub translations: Option<PathBuf>,

    /// Locale to store before rendering
    pub locale: Option<crate::state::Locale>,

    /// Theme to store before rendering
    pub theme: Option<crate::state::Theme>,

    /// Flip the stored locale before rendering
    pub toggle_locale: bool,

    /// Flip the stored theme before rendering
    pub toggle_theme: bool,

    /// Menu entry to select on every page
    pub nav: Option<String>,

    /// Sidebar event to apply on every page
    pub sidebar: Option<SidebarMessage>,

    /// Validate the translation table and exit
    pub check: bool,

    /// Print the stored preference
    pub show: bool,

    /// Keep preferences in memory only
    pub no_persist: bool,
}

impl Flags {
    /// Whether the run changes the stored preference
    pub fn changes_preference(&self) -> bool {
        self.locale.is_some() || self.theme.is_some() || self.toggle_locale || self.toggle_theme
    }

    /// Control clicks to replay once, on the first page loaded
    pub fn control_messages(&self) -> Vec<Message> {
        let mut messages = Vec::new();
        if self.toggle_locale {
            messages.push(ControlMessage::ToggleLocale.into());
        }
        if self.toggle_theme {
            messages.push(ControlMessage::ToggleTheme.into());
        }
        messages
    }

    /// Events to replay on every page
    pub fn page_messages(&self) -> Vec<Message> {
        let mut messages = Vec::new();
        if let Some(msg) = self.sidebar {
            messages.push(msg.into());
        }
        if let Some(key) = &self.nav {
            messages.push(NavMessage::Select(key.clone()).into());
        }
        messages
    }
}

/// One loaded page
pub struct Site<S: Storage> {
    document: Document,
    page_name: String,
    store: PreferenceStore<S>,
    table: Rc<TranslationTable>,
    renderer: Renderer,
    sidebar: Option<SidebarState>,
    nav: NavState,
}

impl<S: Storage> Site<S> {
    /// Load a page: inject controls, bind, and apply the stored preference
    pub fn load(
        mut document: Document,
        page_name: &str,
        storage: S,
        table: Rc<TranslationTable>,
        config: &Config,
    ) -> Self {
        let store = PreferenceStore::open(storage);

        let controls = Controls::inject(&mut document);
        if controls.is_none() {
            log::warn!("Page '{}' has no <body>; controls not injected", page_name);
        }

        let bindings = Bindings::resolve(&document, config.is_resume_page(page_name));
        log::debug!(
            "Page '{}': {} text binding(s), {} section(s), {} menu item(s)",
            page_name,
            bindings.text_targets(),
            bindings.sections.len(),
            bindings.nav_items.len()
        );

        let renderer = Renderer::new(bindings, controls);
        let sidebar = SidebarState::attach(&document);

        let mut site = Self {
            document,
            page_name: page_name.to_string(),
            store,
            table,
            renderer,
            sidebar,
            nav: NavState::new(),
        };

        let pref = site.store.current();
        site.renderer
            .apply_theme(&mut site.document, &site.table, pref);
        site.renderer
            .apply_locale(&mut site.document, &site.table, pref);
        site.renderer
            .apply_active_nav(&mut site.document, site.nav.active());
        if let Some(body) = site.document.body() {
            site.document.add_class(body, LOADED_CLASS);
        }

        log::info!(
            "Loaded page '{}' with locale {} and theme {}",
            site.page_name,
            pref.locale,
            pref.theme
        );
        site
    }

    /// Handle a page event
    ///
    /// Returns the page to open when the event leaves the current page.
    pub fn update(&mut self, message: Message) -> Option<String> {
        match message {
            Message::Control(msg) => {
                self.handle_control_message(msg);
                None
            }
            Message::Sidebar(msg) => {
                self.handle_sidebar_message(msg);
                None
            }
            Message::Nav(msg) => self.handle_nav_message(msg),
        }
    }

    fn handle_control_message(&mut self, msg: ControlMessage) {
        let pref = match msg {
            ControlMessage::ToggleLocale => {
                self.store.toggle_locale();
                let pref = self.store.current();
                self.renderer
                    .apply_locale(&mut self.document, &self.table, pref);
                pref
            }
            ControlMessage::ToggleTheme => {
                self.store.toggle_theme();
                let pref = self.store.current();
                self.renderer
                    .apply_theme(&mut self.document, &self.table, pref);
                pref
            }
        };
        log::debug!("{:?} -> locale {}, theme {}", msg, pref.locale, pref.theme);
    }

    fn handle_sidebar_message(&mut self, msg: SidebarMessage) {
        let Some(sidebar) = self.sidebar else {
            log::trace!("No sidebar on '{}', ignoring {:?}", self.page_name, msg);
            return;
        };
        match msg {
            SidebarMessage::PointerEnter => sidebar.expand(&mut self.document),
            SidebarMessage::PointerLeave => sidebar.collapse(&mut self.document),
            SidebarMessage::ToggleClicked => {
                sidebar.toggle(&mut self.document);
            }
        }
        log::trace!(
            "Sidebar on '{}' minimized: {}",
            self.page_name,
            sidebar.is_minimized(&self.document)
        );
    }

    fn handle_nav_message(&mut self, msg: NavMessage) -> Option<String> {
        let NavMessage::Select(key) = msg;
        match self.nav.select(&key)? {
            NavOutcome::Activated(active) => {
                self.renderer.apply_active_nav(&mut self.document, active);
                None
            }
            NavOutcome::Navigate(href) => {
                log::debug!("Menu entry '{}' opens {}", key, href);
                Some(href.to_string())
            }
        }
    }

    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[cfg(test)]
    pub fn preference(&self) -> crate::state::Preference {
        self.store.current()
    }

    #[cfg(test)]
    pub fn sidebar(&self) -> Option<&SidebarState> {
        self.sidebar.as_ref()
    }

    pub fn active_nav(&self) -> &str {
        self.nav.active()
    }

    /// Serialize the page in its current state
    pub fn to_html(&self) -> String {
        self.document.to_html()
    }

    /// Give back the storage, for the next page
    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n;
    use crate::markup::parse;
    use crate::render::THEME_ATTR;
    use crate::state::{Locale, Theme, LOCALE_KEY, THEME_KEY};
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::ui::controls::{LOCALE_SWITCH_ID, THEME_SWITCH_ID};

    const INDEX: &str = r#"<!DOCTYPE html>
<html lang="zh">
<head><title data-lang="welcomeTitle">欢迎来到我的个人网站</title></head>
<body>
<nav id="sideNav" class="minimized">
  <button id="sideNavToggle">≡</button>
  <ul class="menu">
    <li data-nav="welcome"><span data-lang="welcome">欢迎</span></li>
    <li data-nav="profile"><span data-lang="resume">个人简历</span></li>
    <li data-nav="life"><span data-lang="life">我的生活</span></li>
  </ul>
</nav>
<h1 data-lang="welcomeTitle">欢迎来到我的个人网站</h1>
</body>
</html>"#;

    const RESUME_EDUCATION: &str = r#"<html><body>
<ul class="side-nav-list"><li>首页</li><li>教育经历</li><li>实习经历</li><li>奖项经历</li></ul>
<section id="education"><div class="timeline"></div></section>
</body></html>"#;

    fn load<S: Storage>(source: &str, page: &str, storage: S) -> Site<S> {
        let table = Rc::new(i18n::bundled().unwrap());
        Site::load(parse(source).unwrap(), page, storage, table, &Config::default())
    }

    fn text_of(site: &Site<impl Storage>, id: &str) -> String {
        let doc = site.document();
        doc.text_content(doc.element_by_id(id).unwrap())
    }

    #[test]
    fn test_load_applies_defaults() {
        let site = load(INDEX, "index.html", MemoryStorage::new());
        let doc = site.document();
        let html = doc.document_element().unwrap();

        assert_eq!(doc.attr(html, "lang"), Some("zh"));
        assert_eq!(doc.attr(html, THEME_ATTR), Some("light"));
        assert_eq!(text_of(&site, LOCALE_SWITCH_ID), "English");
        assert_eq!(text_of(&site, THEME_SWITCH_ID), "深色模式");
        assert!(doc.has_class(doc.body().unwrap(), LOADED_CLASS));
    }

    #[test]
    fn test_load_applies_stored_preference() {
        let mut storage = MemoryStorage::new();
        storage.set_item(LOCALE_KEY, "en").unwrap();
        storage.set_item(THEME_KEY, "dark").unwrap();

        let site = load(INDEX, "index.html", storage);
        let doc = site.document();
        let h1 = doc.first_by_tag("h1").unwrap();

        assert_eq!(doc.text_content(h1), "Welcome to My Personal Website");
        assert_eq!(text_of(&site, LOCALE_SWITCH_ID), "中文");
        assert_eq!(text_of(&site, THEME_SWITCH_ID), "Light Mode");
    }

    #[test]
    fn test_locale_toggle_persists_and_rerenders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");

        let mut site = load(INDEX, "index.html", FileStorage::new(&path));
        site.update(ControlMessage::ToggleLocale.into());

        assert_eq!(site.preference().locale, Locale::En);
        let doc = site.document();
        assert_eq!(doc.attr(doc.document_element().unwrap(), "lang"), Some("en"));
        assert_eq!(text_of(&site, THEME_SWITCH_ID), "Dark Mode");

        // A new page load sees the stored locale
        let reloaded = load(INDEX, "index.html", site.into_storage());
        assert_eq!(reloaded.preference().locale, Locale::En);
        assert_eq!(
            FileStorage::new(&path).get_item(LOCALE_KEY).unwrap().as_deref(),
            Some("en")
        );
    }

    #[test]
    fn test_double_toggle_restores_page() {
        let mut site = load(INDEX, "index.html", MemoryStorage::new());
        let original = site.to_html();

        site.update(ControlMessage::ToggleTheme.into());
        assert_eq!(site.preference().theme, Theme::Dark);
        assert_ne!(site.to_html(), original);
        site.update(ControlMessage::ToggleTheme.into());
        assert_eq!(site.to_html(), original);

        site.update(ControlMessage::ToggleLocale.into());
        site.update(ControlMessage::ToggleLocale.into());
        assert_eq!(site.to_html(), original);
    }

    #[test]
    fn test_flags_to_messages() {
        let flags = Flags {
            toggle_theme: true,
            nav: Some("life".to_string()),
            sidebar: Some(SidebarMessage::PointerEnter),
            ..Flags::default()
        };
        assert_eq!(
            flags.control_messages(),
            vec![Message::Control(ControlMessage::ToggleTheme)]
        );
        assert_eq!(
            flags.page_messages(),
            vec![
                Message::Sidebar(SidebarMessage::PointerEnter),
                Message::Nav(NavMessage::Select("life".to_string())),
            ]
        );
        assert!(Flags::default().control_messages().is_empty());
    }

    #[test]
    fn test_sidebar_messages() {
        let mut site = load(INDEX, "index.html", MemoryStorage::new());
        let sidebar = *site.sidebar().unwrap();

        site.update(SidebarMessage::PointerEnter.into());
        assert!(!sidebar.is_minimized(site.document()));
        site.update(SidebarMessage::PointerLeave.into());
        assert!(sidebar.is_minimized(site.document()));
        site.update(SidebarMessage::ToggleClicked.into());
        assert!(!sidebar.is_minimized(site.document()));
    }

    #[test]
    fn test_sidebar_messages_without_sidebar_are_ignored() {
        let mut site = load(RESUME_EDUCATION, "resume_education.html", MemoryStorage::new());
        let before = site.to_html();
        site.update(SidebarMessage::ToggleClicked.into());
        assert_eq!(site.to_html(), before);
    }

    #[test]
    fn test_menu_selection() {
        let mut site = load(INDEX, "index.html", MemoryStorage::new());
        let active_items = |site: &Site<MemoryStorage>| {
            site.document()
                .by_class(site.document().root(), "active")
                .iter()
                .filter_map(|id| site.document().attr(*id, "data-nav").map(str::to_string))
                .collect::<Vec<_>>()
        };
        assert_eq!(active_items(&site), vec!["welcome"]);

        assert!(site.update(NavMessage::Select("life".into()).into()).is_none());
        assert_eq!(site.active_nav(), "life");
        assert_eq!(active_items(&site), vec!["life"]);

        let href = site.update(NavMessage::Select("profile".into()).into());
        assert_eq!(href.as_deref(), Some("resume.html"));
        assert_eq!(active_items(&site), vec!["life"]);
    }

    #[test]
    fn test_side_nav_only_on_resume_pages() {
        let mut storage = MemoryStorage::new();
        storage.set_item(LOCALE_KEY, "en").unwrap();

        let site = load(RESUME_EDUCATION, "resume_education.html", storage.clone());
        let doc = site.document();
        let items = doc.by_tag(doc.by_class(doc.root(), "side-nav-list")[0], "li");
        let labels: Vec<String> = items.iter().map(|id| doc.text_content(*id)).collect();
        assert_eq!(labels, ["Home", "Education", "Experience", "Awards"]);

        let site = load(RESUME_EDUCATION, "other.html", storage);
        let doc = site.document();
        let first = doc.by_tag(doc.by_class(doc.root(), "side-nav-list")[0], "li")[0];
        assert_eq!(doc.text_content(first), "首页");
    }

    #[test]
    fn test_rendered_page_loads_again_cleanly() {
        let site = load(INDEX, "index.html", MemoryStorage::new());
        let rendered = site.to_html();

        let again = load(&rendered, "index.html", site.into_storage());
        assert_eq!(again.to_html(), rendered);
    }
}
