//! Shared contract types between the desktop state containers and their host.
//!
//! The registry defined here is the single source of truth for which
//! applications exist, in which order they appear on the desktop and in the
//! taskbar, and what default window geometry each one launches with.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier for a registered application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejection reason for a malformed application identifier.
#[error("invalid application id `{0}`; expected lowercase letters, digits, and interior hyphens")]
pub struct ApplicationIdError(String);

impl ApplicationId {
    /// Returns an application id when `raw` conforms to the identifier policy:
    /// 1 to 64 bytes of lowercase ASCII letters, digits, and hyphens, starting
    /// with a letter and not ending with a hyphen.
    pub fn new(raw: impl Into<String>) -> Result<Self, ApplicationIdError> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(ApplicationIdError(raw))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    if raw.ends_with('-') {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Static metadata for one registered application.
pub struct AppDescriptor {
    /// Canonical application id (trusted, validated by tests).
    pub id: &'static str,
    /// Title shown in the window header.
    pub window_title: &'static str,
    /// Label shown under the desktop icon and in the start menu.
    pub icon_label: &'static str,
    /// Default glyph asset path for the desktop icon.
    pub icon: &'static str,
    /// Alternate glyph shown while the application window is open.
    pub open_icon: Option<&'static str>,
    /// Default window x position on first open fallback.
    pub default_x: i32,
    /// Default window y position on first open fallback.
    pub default_y: i32,
    /// Default window width.
    pub default_width: i32,
    /// Default window height.
    pub default_height: i32,
    /// Whether the application gets a desktop shortcut icon.
    pub show_on_desktop: bool,
}

impl AppDescriptor {
    /// Returns the typed application id for this descriptor.
    pub fn application_id(&self) -> ApplicationId {
        ApplicationId::trusted(self.id)
    }
}

const FOLDER_ICON: &str = "/icons/folder-icon.png";
const FOLDER_ICON_OPEN: &str = "/icons/folder-icon-open.png";

/// Built-in applications in registry order. Insertion order defines both the
/// desktop icon layout order and the taskbar listing order.
const BUILTIN_REGISTRY: [AppDescriptor; 6] = [
    AppDescriptor {
        id: "chatbot",
        window_title: "CHATBOT",
        icon_label: "Chatbot",
        icon: FOLDER_ICON,
        open_icon: Some(FOLDER_ICON_OPEN),
        default_x: 50,
        default_y: 50,
        default_width: 400,
        default_height: 300,
        show_on_desktop: true,
    },
    AppDescriptor {
        id: "oscillator",
        window_title: "OSCILLATOR",
        icon_label: "Oscillator",
        icon: FOLDER_ICON,
        open_icon: Some(FOLDER_ICON_OPEN),
        default_x: 50,
        default_y: 50,
        default_width: 600,
        default_height: 400,
        show_on_desktop: true,
    },
    AppDescriptor {
        id: "numerology",
        window_title: "NUMEROLOGY",
        icon_label: "Numerology",
        icon: FOLDER_ICON,
        open_icon: Some(FOLDER_ICON_OPEN),
        default_x: 100,
        default_y: 100,
        default_width: 400,
        default_height: 300,
        show_on_desktop: true,
    },
    AppDescriptor {
        id: "guestbook",
        window_title: "GUESTBOOK",
        icon_label: "Guestbook",
        icon: FOLDER_ICON,
        open_icon: Some(FOLDER_ICON_OPEN),
        default_x: 150,
        default_y: 150,
        default_width: 500,
        default_height: 400,
        show_on_desktop: true,
    },
    AppDescriptor {
        id: "window-portfolio",
        window_title: "ARCHIVE",
        icon_label: "Portfolio",
        icon: FOLDER_ICON,
        open_icon: Some(FOLDER_ICON_OPEN),
        default_x: 100,
        default_y: 100,
        default_width: 600,
        default_height: 500,
        show_on_desktop: true,
    },
    // Reachable through the start menu only; no desktop shortcut.
    AppDescriptor {
        id: "gifypet",
        window_title: "GIFYPET",
        icon_label: "Gifypet",
        icon: FOLDER_ICON,
        open_icon: None,
        default_x: 200,
        default_y: 200,
        default_width: 400,
        default_height: 300,
        show_on_desktop: false,
    },
];

/// Returns the full built-in application registry in registry order.
pub fn builtin_registry() -> &'static [AppDescriptor] {
    &BUILTIN_REGISTRY
}

/// Returns the registry entries that receive a desktop shortcut icon.
pub fn desktop_icon_apps() -> Vec<AppDescriptor> {
    builtin_registry()
        .iter()
        .copied()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Looks up a registry entry by raw id.
pub fn descriptor(id: &str) -> Option<&'static AppDescriptor> {
    builtin_registry().iter().find(|entry| entry.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_ids_are_valid_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for entry in builtin_registry() {
            ApplicationId::new(entry.id).expect("registry id conforms to policy");
            assert!(seen.insert(entry.id), "duplicate registry id {}", entry.id);
        }
    }

    #[test]
    fn application_id_policy_rejects_malformed_input() {
        assert!(ApplicationId::new("chatbot").is_ok());
        assert!(ApplicationId::new("window-portfolio").is_ok());
        assert!(ApplicationId::new("").is_err());
        assert!(ApplicationId::new("Chatbot").is_err());
        assert!(ApplicationId::new("9pet").is_err());
        assert!(ApplicationId::new("trailing-").is_err());
        assert!(ApplicationId::new("spaced id").is_err());
        assert!(ApplicationId::new("a".repeat(65)).is_err());
    }

    #[test]
    fn desktop_icon_apps_excludes_start_menu_only_entries() {
        let icons = desktop_icon_apps();
        assert_eq!(icons.len(), 5);
        assert!(icons.iter().all(|entry| entry.id != "gifypet"));
        assert!(descriptor("gifypet").is_some());
    }
}
