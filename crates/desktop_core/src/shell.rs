//! View-model helpers for the taskbar and start menu surfaces.
//!
//! Pure functions over container snapshots; the rendering layer calls these
//! after each notification instead of re-deriving ordering rules itself.

use desktop_contract::AppDescriptor;

use crate::model::WindowState;

/// Open windows in registry order, the order the taskbar lists them.
pub fn taskbar_windows(windows: &[WindowState]) -> Vec<&WindowState> {
    windows.iter().filter(|w| w.is_open).collect()
}

/// The topmost open window, if any: the most recently opened or focused one.
pub fn top_window(windows: &[WindowState]) -> Option<&WindowState> {
    windows
        .iter()
        .filter(|w| w.is_open)
        .max_by_key(|w| w.z_index)
}

/// All registered applications in registry order, the start menu listing.
pub fn start_menu_apps(registry: &[AppDescriptor]) -> Vec<&AppDescriptor> {
    registry.iter().collect()
}
