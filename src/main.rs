//! Folio - bilingual resume site prerenderer
//!
//! Entry point for the application. Handles CLI argument parsing,
//! logging initialization, preference changes, and page rendering.

mod app;
mod config;
mod error;
mod message;
mod state;

// Page model and rendering
mod markup;
mod render;
mod ui;

// Preference persistence
mod storage;

// Internationalization
mod i18n;

use anyhow::Context;
use app::{Flags, Site};
use config::Config;
use error::MarkupError;
use i18n::TranslationTable;
use markup::Document;
use message::Message;
use state::{PreferenceStore, MENU};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use storage::{FileStorage, MemoryStorage, Storage};
use walkdir::{DirEntry, WalkDir};

/// Application name for logging
const APP_NAME: &str = "folio";

/// Page name used when preference toggles run without any page
const BLANK_PAGE: &str = "(blank)";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging();

    // Parse command line arguments
    let flags = parse_args();

    let config = match &flags.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Could not load configuration")?;

    let table_path = flags
        .translations
        .clone()
        .or_else(|| config.site.translations.clone());
    let table = Rc::new(
        i18n::load(table_path.as_deref()).context("Could not load translation table")?,
    );

    if flags.check {
        println!(
            "Translation table OK: {} keys present in both zh and en",
            table.len()
        );
        return Ok(());
    }

    let storage = open_storage(&flags, &config)?;
    let mut store = PreferenceStore::open(storage);
    if let Some(locale) = flags.locale {
        store.set_locale(locale);
    }
    if let Some(theme) = flags.theme {
        store.set_theme(theme);
    }
    let mut storage = store.into_storage();

    let out_dir = flags
        .out_dir
        .clone()
        .unwrap_or_else(|| config.site.output_dir.clone());
    let pages = collect_pages(&flags, &out_dir)?;

    // Toggles are clicks on the controls of the first page loaded
    let mut clicks = flags.control_messages();
    let page_messages = flags.page_messages();

    if pages.is_empty() && !clicks.is_empty() {
        let mut site = Site::load(
            Document::skeleton(),
            BLANK_PAGE,
            storage,
            Rc::clone(&table),
            &config,
        );
        for msg in clicks.drain(..) {
            site.update(msg);
        }
        storage = site.into_storage();
    }

    for (source, relative) in &pages {
        let target = out_dir.join(relative);
        let messages = std::mem::take(&mut clicks)
            .into_iter()
            .chain(page_messages.iter().cloned())
            .collect();
        storage = render_page(source, &target, storage, &table, &config, messages)
            .with_context(|| format!("Could not render {}", source.display()))?;
    }

    if !pages.is_empty() {
        log::info!("Rendered {} page(s) into {}", pages.len(), out_dir.display());
    } else if !flags.show && !flags.changes_preference() {
        log::warn!("No pages given; nothing to render (see --help)");
    }

    if flags.show {
        let pref = PreferenceStore::open(storage).current();
        println!("locale={} theme={}", pref.locale, pref.theme);
    }

    Ok(())
}

/// Initialize the logging system
fn init_logging() {
    // Set default log level if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,folio=debug");
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
}

/// Pick the preference backend
fn open_storage(flags: &Flags, config: &Config) -> anyhow::Result<Box<dyn Storage>> {
    if flags.no_persist {
        log::debug!("Preferences kept in memory for this run");
        return Ok(Box::new(MemoryStorage::new()));
    }

    let storage = match &config.storage.path {
        Some(path) => FileStorage::new(path),
        None => FileStorage::default_location().context("Could not locate preference storage")?,
    };
    log::debug!("Preferences stored in {}", storage.path().display());
    Ok(Box::new(storage))
}

/// Pages to render as (source, output path relative to the output directory)
///
/// A site walk skips the output directory, so earlier output is never
/// read back as a source page.
fn collect_pages(flags: &Flags, out_dir: &Path) -> anyhow::Result<Vec<(PathBuf, PathBuf)>> {
    let mut pages = Vec::new();

    for page in &flags.pages {
        let name = page
            .file_name()
            .with_context(|| format!("Not a page file: {}", page.display()))?;
        pages.push((page.clone(), PathBuf::from(name)));
    }

    if let Some(site_dir) = &flags.site_dir {
        let output = out_dir.canonicalize().ok();
        let walker = WalkDir::new(site_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_output_dir(entry, output.as_deref()));

        for entry in walker {
            let entry = entry.with_context(|| format!("Could not scan {}", site_dir.display()))?;
            if !entry.file_type().is_file() || !is_page(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(site_dir)
                .unwrap_or(entry.path())
                .to_path_buf();
            pages.push((entry.path().to_path_buf(), relative));
        }
    }

    Ok(pages)
}

fn is_output_dir(entry: &DirEntry, output: Option<&Path>) -> bool {
    let Some(output) = output else {
        return false;
    };
    entry.file_type().is_dir()
        && entry
            .path()
            .canonicalize()
            .is_ok_and(|path| path == output)
}

fn is_page(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html" | "htm")
    )
}

/// Load one page with the stored preference, replay `messages`, and write the result
fn render_page<S: Storage>(
    source: &Path,
    target: &Path,
    storage: S,
    table: &Rc<TranslationTable>,
    config: &Config,
    messages: Vec<Message>,
) -> anyhow::Result<S> {
    let markup = std::fs::read_to_string(source).map_err(|e| MarkupError::ReadError {
        path: source.to_path_buf(),
        source: e,
    })?;
    let document = markup::parse(&markup)?;

    let page_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut site = Site::load(document, &page_name, storage, Rc::clone(table), config);
    for msg in messages {
        if let Some(href) = site.update(msg) {
            log::info!("Menu entry on '{}' opens {}; page left as is", page_name, href);
        }
    }
    log::debug!("Page '{}' active menu entry: {}", page_name, site.active_nav());

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MarkupError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(target, site.to_html()).map_err(|e| MarkupError::WriteError {
        path: target.to_path_buf(),
        source: e,
    })?;

    log::debug!("Wrote {}", target.display());
    Ok(site.into_storage())
}

/// Parse command line arguments
fn parse_args() -> Flags {
    let args: Vec<String> = std::env::args().collect();
    let mut flags = Flags::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-o" | "--out" => {
                flags.out_dir = Some(PathBuf::from(option_value(&args, &mut i)));
            }
            "-s" | "--site" => {
                flags.site_dir = Some(PathBuf::from(option_value(&args, &mut i)));
            }
            "-c" | "--config" => {
                flags.config = Some(PathBuf::from(option_value(&args, &mut i)));
            }
            "--translations" => {
                flags.translations = Some(PathBuf::from(option_value(&args, &mut i)));
            }
            "-l" | "--lang" => {
                let value = option_value(&args, &mut i);
                flags.locale = Some(value.parse().unwrap_or_else(|e| exit_usage(e)));
            }
            "-t" | "--theme" => {
                let value = option_value(&args, &mut i);
                flags.theme = Some(value.parse().unwrap_or_else(|e| exit_usage(e)));
            }
            "-n" | "--nav" => {
                let value = option_value(&args, &mut i);
                if !MENU.iter().any(|item| item.key == value) {
                    exit_usage(format!(
                        "unknown menu entry '{}' (expected welcome, profile or life)",
                        value
                    ));
                }
                flags.nav = Some(value);
            }
            "--sidebar" => {
                let value = option_value(&args, &mut i);
                flags.sidebar = Some(value.parse().unwrap_or_else(|e| exit_usage(e)));
            }
            "--toggle-lang" => flags.toggle_locale = true,
            "--toggle-theme" => flags.toggle_theme = true,
            "--check" => flags.check = true,
            "--show" => flags.show = true,
            "--no-persist" => flags.no_persist = true,
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
            _ => {
                // Treat as a page path
                flags.pages.push(PathBuf::from(&args[i]));
            }
        }
        i += 1;
    }

    flags
}

/// Value following the option at `args[*i]`, advancing past it
fn option_value(args: &[String], i: &mut usize) -> String {
    if *i + 1 < args.len() {
        *i += 1;
        args[*i].clone()
    } else {
        eprintln!("Error: {} requires a value", args[*i]);
        std::process::exit(1);
    }
}

fn exit_usage(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Print help message
fn print_help() {
    println!(
        r#"Folio - bilingual resume site prerenderer

USAGE:
    folio [OPTIONS] [PAGES...]

OPTIONS:
    -h, --help               Show this help message
    -v, --version            Show version information
    -o, --out DIR            Output directory (default: dist)
    -s, --site DIR           Render every .html page under DIR
    -c, --config FILE        Use a specific configuration file
    -l, --lang zh|en         Store the locale preference
    -t, --theme light|dark   Store the theme preference
        --toggle-lang        Flip the stored locale
        --toggle-theme       Flip the stored theme
    -n, --nav KEY            Mark a menu entry active (welcome, profile, life)
        --sidebar STATE      Render the sidebar open, closed, or toggled
        --translations FILE  Use a translation table instead of the bundled one
        --check              Validate the translation table and exit
        --show               Print the preference after any changes
        --no-persist         Keep preferences in memory for this run only

EXAMPLES:
    folio index.html resume.html         Render two pages with the stored preference
    folio --site site/ -o public         Render a whole site
    folio --lang en --theme dark --show  Change and print the preference
    folio --toggle-theme --site site/    Flip the theme, then render
"#
    );
}

/// Print version information
fn print_version() {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "<html><body></body></html>").unwrap();
    }

    #[test]
    fn test_site_walk_skips_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path();
        write(&site.join("index.html"));
        write(&site.join("pages").join("resume.html"));
        write(&site.join("dist").join("index.html"));
        std::fs::write(site.join("style.css"), "body {}").unwrap();

        let flags = Flags {
            site_dir: Some(site.to_path_buf()),
            ..Flags::default()
        };
        let pages = collect_pages(&flags, &site.join("dist")).unwrap();

        let relative: Vec<PathBuf> = pages.into_iter().map(|(_, rel)| rel).collect();
        assert_eq!(
            relative,
            vec![PathBuf::from("index.html"), Path::new("pages").join("resume.html")]
        );
    }

    #[test]
    fn test_missing_output_directory_skips_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("dist").join("index.html"));

        let flags = Flags {
            site_dir: Some(dir.path().join("dist")),
            ..Flags::default()
        };
        let pages = collect_pages(&flags, &dir.path().join("public")).unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_render_page_replays_messages() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("index.html");
        std::fs::write(
            &source,
            r#"<html><body><ul><li data-nav="welcome">a</li><li data-nav="life">b</li></ul></body></html>"#,
        )
        .unwrap();
        let target = dir.path().join("out").join("index.html");
        let table = Rc::new(i18n::bundled().unwrap());

        let messages = vec![
            message::ControlMessage::ToggleTheme.into(),
            message::NavMessage::Select("life".to_string()).into(),
        ];
        let storage = render_page(
            &source,
            &target,
            MemoryStorage::new(),
            &table,
            &Config::default(),
            messages,
        )
        .unwrap();

        assert_eq!(storage.get_item(state::THEME_KEY).unwrap().as_deref(), Some("dark"));
        let html = std::fs::read_to_string(&target).unwrap();
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains(r#"<li data-nav="life" class="active">"#));
    }
}
