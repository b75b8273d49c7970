//! State records and layout metrics for the desktop containers.

use desktop_contract::{AppDescriptor, ApplicationId};
use serde::{Deserialize, Serialize};

/// Height reserved for the taskbar at the bottom of the viewport.
pub const TASKBAR_HEIGHT: i32 = 40;
/// Minimum usable managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 300;
/// Minimum usable managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Height of the window header strip that must stay reachable on-screen.
pub const WINDOW_HEADER_HEIGHT: i32 = 30;
/// Fallback window width for registrations without explicit geometry.
pub const DEFAULT_WINDOW_WIDTH: i32 = 500;
/// Fallback window height for registrations without explicit geometry.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 400;
/// Starting value of the process-wide z-order counter.
pub const INITIAL_Z_INDEX: u32 = 100;
/// Left margin windows are pinned to on mobile viewports.
pub const MOBILE_MARGIN_X: i32 = 5;
/// Top margin windows are pinned to on mobile viewports.
pub const MOBILE_MARGIN_Y: i32 = 10;

/// Widths at or below this are classified as mobile.
pub const MOBILE_BREAKPOINT: i32 = 768;
/// Widths above mobile and at or below this are classified as tablet.
pub const TABLET_BREAKPOINT: i32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Top-left coordinate in viewport pixels.
pub struct Point {
    /// Horizontal offset from the viewport's left edge.
    pub x: i32,
    /// Vertical offset from the viewport's top edge.
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Content-box dimensions in pixels.
pub struct Size {
    /// Content width.
    pub width: i32,
    /// Content height.
    pub height: i32,
}

impl Size {
    /// Floors both dimensions to the minimum usable window size.
    pub fn clamped_min(self, min_width: i32, min_height: i32) -> Self {
        Self {
            width: self.width.max(min_width),
            height: self.height.max(min_height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Current display dimensions, read live from the host at call time.
pub struct Viewport {
    /// Full viewport width.
    pub width: i32,
    /// Full viewport height, taskbar included.
    pub height: i32,
}

impl Viewport {
    /// Height left for window placement once the taskbar is reserved.
    pub fn desktop_height(self) -> i32 {
        self.height - TASKBAR_HEIGHT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Coarse viewport classification used to select layout constants.
pub enum DeviceClass {
    /// Width at or below [`MOBILE_BREAKPOINT`].
    Mobile,
    /// Width above mobile, at or below [`TABLET_BREAKPOINT`].
    Tablet,
    /// Width above [`TABLET_BREAKPOINT`].
    Desktop,
}

impl DeviceClass {
    /// Classifies a viewport width against the fixed breakpoints.
    pub fn classify(width: i32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            Self::Mobile
        } else if width <= TABLET_BREAKPOINT {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Icon grid cell metrics for the active device class.
pub struct IconCellMetrics {
    /// Width of one icon slot including spacing.
    pub width: i32,
    /// Height of one icon slot including spacing.
    pub height: i32,
    /// Padding between the grid and the viewport edges.
    pub padding: i32,
}

impl IconCellMetrics {
    /// Returns the cell metrics for a device class. Tablet shares the desktop
    /// grid; only mobile tightens it.
    pub fn for_device(device: DeviceClass) -> Self {
        match device {
            DeviceClass::Mobile => Self {
                width: 110,
                height: 110,
                padding: 10,
            },
            DeviceClass::Tablet | DeviceClass::Desktop => Self {
                width: 140,
                height: 140,
                padding: 15,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-window state owned by [`crate::WindowManager`].
pub struct WindowState {
    /// Registry id, assigned at seeding, never changes.
    pub id: ApplicationId,
    /// Window header title.
    pub title: String,
    /// Whether the window is rendered at all.
    pub is_open: bool,
    /// Whether the window is hidden into the taskbar.
    pub is_minimized: bool,
    /// Whether the window fills the desktop area instead of using `position`.
    pub is_maximized: bool,
    /// Stacking order; higher draws on top.
    pub z_index: u32,
    /// Top-left position, meaningful while open and not maximized.
    pub position: Point,
    /// Current content-box size.
    pub size: Size,
    /// Set after the first open, which centers instead of re-clamping.
    pub opened_before: bool,
}

impl WindowState {
    /// Seeds the closed initial state for a registry entry.
    pub fn from_descriptor(descriptor: &AppDescriptor) -> Self {
        Self {
            id: descriptor.application_id(),
            title: descriptor.window_title.to_string(),
            is_open: false,
            is_minimized: false,
            is_maximized: false,
            z_index: INITIAL_Z_INDEX,
            position: Point {
                x: descriptor.default_x,
                y: descriptor.default_y,
            },
            size: Size {
                width: descriptor.default_width,
                height: descriptor.default_height,
            },
            opened_before: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Per-shortcut state owned by [`crate::IconLayoutEngine`].
pub struct IconState {
    /// Registry id of the associated application.
    pub id: ApplicationId,
    /// Label shown under the icon.
    pub title: String,
    /// Default glyph asset path.
    pub icon: String,
    /// Alternate glyph shown while the associated window is open.
    pub open_icon: Option<String>,
    /// Grid position computed by the layout engine.
    pub position: Point,
    /// Mirror of the associated window's open state.
    pub is_open: bool,
}

impl IconState {
    /// Seeds the unplaced initial state for a registry entry.
    pub fn from_descriptor(descriptor: &AppDescriptor) -> Self {
        Self {
            id: descriptor.application_id(),
            title: descriptor.icon_label.to_string(),
            icon: descriptor.icon.to_string(),
            open_icon: descriptor.open_icon.map(str::to_string),
            position: Point { x: 0, y: 0 },
            is_open: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn device_class_breakpoints_are_inclusive() {
        assert_eq!(DeviceClass::classify(320), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(768), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(769), DeviceClass::Tablet);
        assert_eq!(DeviceClass::classify(1024), DeviceClass::Tablet);
        assert_eq!(DeviceClass::classify(1025), DeviceClass::Desktop);
    }

    #[test]
    fn mobile_icon_grid_is_tighter_than_desktop() {
        let mobile = IconCellMetrics::for_device(DeviceClass::Mobile);
        let desktop = IconCellMetrics::for_device(DeviceClass::Desktop);
        assert!(mobile.width < desktop.width);
        assert!(mobile.padding < desktop.padding);
        assert_eq!(IconCellMetrics::for_device(DeviceClass::Tablet), desktop);
    }

    #[test]
    fn seeded_window_starts_closed_with_registry_geometry() {
        let descriptor = desktop_contract::descriptor("oscillator").unwrap();
        let window = WindowState::from_descriptor(descriptor);
        assert!(!window.is_open);
        assert!(!window.opened_before);
        assert_eq!(window.z_index, INITIAL_Z_INDEX);
        assert_eq!(window.size, Size { width: 600, height: 400 });
        assert_eq!(window.position, Point { x: 50, y: 50 });
    }
}
