//! Theme palettes
//!
//! Colors for the two themes, published to stylesheets as CSS custom
//! properties on the root element.

use crate::state::Theme;

/// Named colors of one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub card: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: "#ffffff",
        text: "#333333",
        primary: "#007bff",
        secondary: "#6c757d",
        card: "#f8f9fa",
    };

    pub const DARK: Palette = Palette {
        background: "#121212",
        text: "#ffffff",
        primary: "#0d6efd",
        secondary: "#adb5bd",
        card: "#23272f",
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }

    /// Inline style declaring every color as a custom property
    pub fn css_variables(&self) -> String {
        format!(
            "--background: {}; --text: {}; --primary: {}; --secondary: {}; --card: {};",
            self.background, self.text, self.primary, self.secondary, self.card
        )
    }

    /// Merge the palette into an existing inline style
    ///
    /// Declarations of other properties are kept in order; earlier
    /// palette declarations are replaced.
    pub fn merge_into_style(&self, style: Option<&str>) -> String {
        let kept: Vec<&str> = style
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|decl| !decl.is_empty())
            .filter(|decl| {
                let property = decl.split(':').next().unwrap_or("").trim();
                !PROPERTIES.contains(&property)
            })
            .collect();

        if kept.is_empty() {
            self.css_variables()
        } else {
            format!("{}; {}", kept.join("; "), self.css_variables())
        }
    }
}

/// Custom properties owned by the palette
const PROPERTIES: [&str; 5] = ["--background", "--text", "--primary", "--secondary", "--card"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_per_theme() {
        assert_eq!(Palette::for_theme(Theme::Light).background, "#ffffff");
        assert_eq!(Palette::for_theme(Theme::Dark).card, "#23272f");
    }

    #[test]
    fn test_css_variables() {
        let css = Palette::DARK.css_variables();
        assert!(css.starts_with("--background: #121212;"));
        assert!(css.contains("--primary: #0d6efd;"));
    }

    #[test]
    fn test_merge_keeps_author_declarations() {
        let merged = Palette::LIGHT.merge_into_style(Some("scroll-behavior: smooth"));
        assert_eq!(
            merged,
            format!("scroll-behavior: smooth; {}", Palette::LIGHT.css_variables())
        );

        // Switching themes replaces only the palette declarations
        let switched = Palette::DARK.merge_into_style(Some(&merged));
        assert_eq!(
            switched,
            format!("scroll-behavior: smooth; {}", Palette::DARK.css_variables())
        );
    }

    #[test]
    fn test_merge_without_existing_style() {
        assert_eq!(Palette::DARK.merge_into_style(None), Palette::DARK.css_variables());
        assert_eq!(Palette::DARK.merge_into_style(Some(" ; ")), Palette::DARK.css_variables());
    }
}
