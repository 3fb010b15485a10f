//! Page event messages
//!
//! Every interaction a page handles, as messages for [`crate::app::Site::update`].
//! Messages are organized by the control that raises them.

use std::str::FromStr;

/// Main message enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Locale and theme controls
    Control(ControlMessage),

    /// Side navigation
    Sidebar(SidebarMessage),

    /// Main menu
    Nav(NavMessage),
}

/// Preference control messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Locale control clicked
    ToggleLocale,

    /// Theme control clicked
    ToggleTheme,
}

/// Sidebar messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarMessage {
    /// Pointer entered the sidebar
    PointerEnter,

    /// Pointer left the sidebar
    PointerLeave,

    /// Sidebar toggle button clicked
    ToggleClicked,
}

impl FromStr for SidebarMessage {
    type Err = String;

    /// Command line spelling: `open`, `closed`, or `toggle`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(SidebarMessage::PointerEnter),
            "closed" => Ok(SidebarMessage::PointerLeave),
            "toggle" => Ok(SidebarMessage::ToggleClicked),
            other => Err(format!(
                "unsupported sidebar state '{}' (expected open, closed, or toggle)",
                other
            )),
        }
    }
}

/// Main menu messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavMessage {
    /// Menu entry clicked
    Select(String),
}

impl From<ControlMessage> for Message {
    fn from(msg: ControlMessage) -> Self {
        Message::Control(msg)
    }
}

impl From<SidebarMessage> for Message {
    fn from(msg: SidebarMessage) -> Self {
        Message::Sidebar(msg)
    }
}

impl From<NavMessage> for Message {
    fn from(msg: NavMessage) -> Self {
        Message::Nav(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_from_command_line() {
        assert_eq!("open".parse(), Ok(SidebarMessage::PointerEnter));
        assert_eq!(" closed".parse(), Ok(SidebarMessage::PointerLeave));
        assert_eq!("toggle".parse(), Ok(SidebarMessage::ToggleClicked));
        assert!("wide".parse::<SidebarMessage>().is_err());
    }
}
