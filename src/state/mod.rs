//! State management module for Folio
//!
//! This module contains all state types organized by concern:
//! - `preferences`: locale/theme preference and its persistent store
//! - `sidebar_state`: collapsible side navigation
//! - `nav_state`: main menu selection

mod nav_state;
mod preferences;
mod sidebar_state;

pub use nav_state::*;
pub use preferences::*;
pub use sidebar_state::*;
