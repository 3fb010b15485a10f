//! Page chrome added on top of the authored markup
//!
//! - `controls`: the locale and theme toggle buttons
//! - `theme`: color palettes for both themes

pub mod controls;
pub mod theme;

pub use controls::Controls;
pub use theme::Palette;
