//! Window lifecycle, z-order arbitration, and viewport-fit policy.

use std::rc::Rc;

use desktop_contract::{builtin_registry, AppDescriptor, ApplicationId};

use crate::model::{
    DeviceClass, Point, Size, Viewport, WindowState, INITIAL_Z_INDEX, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH, MOBILE_MARGIN_X, MOBILE_MARGIN_Y, WINDOW_HEADER_HEIGHT,
};
use crate::store::{Store, SubscriptionId};
use crate::viewport::ViewportProvider;

// Insets applied when shrinking a window to fit a mobile viewport. The height
// inset is taken from the raw viewport height, keyboard and chrome included.
const MOBILE_FIT_INSET_W: i32 = 10;
const MOBILE_FIT_INSET_H: i32 = 80;

/// Owns every registered window's state and the monotonic z-order counter.
///
/// All operations are silent no-ops on unknown ids and return whether any
/// state changed. Each mutation publishes a fresh snapshot to subscribers
/// before returning.
#[derive(Debug)]
pub struct WindowManager {
    provider: Rc<dyn ViewportProvider>,
    store: Store<Vec<WindowState>>,
    next_z: std::cell::Cell<u32>,
}

impl WindowManager {
    /// Creates a manager seeded from the built-in registry.
    pub fn new(provider: Rc<dyn ViewportProvider>) -> Self {
        Self::with_registry(provider, builtin_registry())
    }

    /// Creates a manager seeded from an explicit registry slice. Registry
    /// order is preserved in every snapshot.
    pub fn with_registry(provider: Rc<dyn ViewportProvider>, registry: &[AppDescriptor]) -> Self {
        let windows = registry.iter().map(WindowState::from_descriptor).collect();
        Self {
            provider,
            store: Store::new(windows),
            next_z: std::cell::Cell::new(INITIAL_Z_INDEX),
        }
    }

    /// Returns an immutable snapshot of every window in registry order.
    pub fn snapshot(&self) -> Vec<WindowState> {
        self.store.get()
    }

    /// Registers a snapshot listener notified synchronously after mutations.
    pub fn subscribe(&self, listener: impl Fn(&Vec<WindowState>) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Detaches a snapshot listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Opens a window: raises it, clears minimization, and places it.
    ///
    /// The first-ever open centers the window in the desktop area, shrinking
    /// it to fit first on mobile. Later opens keep the last size and re-clamp
    /// the last position into the current viewport.
    pub fn open(&self, id: &ApplicationId) -> bool {
        if !self.known("open", id) {
            return false;
        }
        let viewport = self.provider.viewport();
        let device = self.provider.device_class();
        let z = self.bump_z();
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            if window.opened_before {
                window.position = clamp_to_viewport(window.position, window.size, viewport, device);
            } else {
                if device == DeviceClass::Mobile {
                    window.size = mobile_fitted_size(window.size, viewport);
                }
                window.position = centered_position(window.size, viewport, device);
                window.opened_before = true;
            }
            window.is_open = true;
            window.is_minimized = false;
            window.z_index = z;
            true
        })
    }

    /// Closes a window, keeping its position and size for the next open.
    pub fn close(&self, id: &ApplicationId) -> bool {
        if !self.known("close", id) {
            return false;
        }
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            window.is_open = false;
            window.is_minimized = false;
            true
        })
    }

    /// Minimizes a window without altering its z-order.
    pub fn minimize(&self, id: &ApplicationId) -> bool {
        if !self.known("minimize", id) {
            return false;
        }
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            window.is_minimized = true;
            true
        })
    }

    /// Flips the maximized flag. Entering the maximized state clears
    /// minimization; the maximized bounds themselves are derived from the
    /// viewport by the rendering layer.
    pub fn toggle_maximize(&self, id: &ApplicationId) -> bool {
        if !self.known("toggle_maximize", id) {
            return false;
        }
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            window.is_maximized = !window.is_maximized;
            if window.is_maximized {
                window.is_minimized = false;
            }
            true
        })
    }

    /// Raises an open window to the top of the stack and un-minimizes it.
    /// No-op (no z bump) while the window is closed.
    pub fn focus(&self, id: &ApplicationId) -> bool {
        if !self.known("focus", id) {
            return false;
        }
        let open = self
            .store
            .with(|windows| windows.iter().any(|w| &w.id == id && w.is_open));
        if !open {
            return false;
        }
        let z = self.bump_z();
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            window.z_index = z;
            window.is_minimized = false;
            true
        })
    }

    /// Sets a window's position unconditionally. Clamping happens reactively
    /// on viewport change and on open, not at move time.
    pub fn move_to(&self, id: &ApplicationId, x: i32, y: i32) -> bool {
        if !self.known("move_to", id) {
            return false;
        }
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            window.position = Point { x, y };
            true
        })
    }

    /// Sets a window's size, floored to the minimum usable dimensions.
    pub fn resize(&self, id: &ApplicationId, width: i32, height: i32) -> bool {
        if !self.known("resize", id) {
            return false;
        }
        self.store.update(|windows| {
            let Some(window) = windows.iter_mut().find(|w| &w.id == id) else {
                return false;
            };
            window.size = Size { width, height }.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            true
        })
    }

    /// Re-clamps every open, non-maximized window into the current viewport.
    /// Invoked by the host on viewport resize and orientation events.
    pub fn handle_viewport_resize(&self) {
        let viewport = self.provider.viewport();
        let device = self.provider.device_class();
        self.store.update(|windows| {
            for window in windows.iter_mut() {
                if window.is_open && !window.is_maximized {
                    window.position =
                        clamp_to_viewport(window.position, window.size, viewport, device);
                }
            }
        });
    }

    fn bump_z(&self) -> u32 {
        let z = self.next_z.get().saturating_add(1);
        self.next_z.set(z);
        z
    }

    fn known(&self, operation: &str, id: &ApplicationId) -> bool {
        let known = self.store.with(|windows| windows.iter().any(|w| &w.id == id));
        if !known {
            log::debug!("{operation} ignored for unknown window id `{id}`");
        }
        known
    }
}

/// Clamps a window position so a usable portion stays inside the viewport.
///
/// On desktop and tablet viewports at least the header strip and the lesser
/// of the minimum window width and the window's own width remain visible. On
/// mobile viewports the window is pinned near the top-left instead, since
/// mobile windows occupy nearly the whole viewport. Idempotent for a fixed
/// viewport.
pub fn clamp_to_viewport(
    position: Point,
    size: Size,
    viewport: Viewport,
    device: DeviceClass,
) -> Point {
    if device == DeviceClass::Mobile {
        return Point {
            x: MOBILE_MARGIN_X,
            y: MOBILE_MARGIN_Y,
        };
    }
    let min_visible_width = MIN_WINDOW_WIDTH.min(size.width);
    let max_x = (viewport.width - min_visible_width).max(0);
    let max_y = (viewport.desktop_height() - WINDOW_HEADER_HEIGHT).max(0);
    Point {
        x: position.x.clamp(0, max_x),
        y: position.y.clamp(0, max_y),
    }
}

fn centered_position(size: Size, viewport: Viewport, device: DeviceClass) -> Point {
    let x = (viewport.width - size.width) / 2;
    let y = (viewport.desktop_height() - size.height) / 2;
    match device {
        DeviceClass::Mobile => Point {
            x: x.max(MOBILE_MARGIN_X),
            y: y.max(MOBILE_MARGIN_Y),
        },
        DeviceClass::Tablet | DeviceClass::Desktop => Point {
            x: x.max(0),
            y: y.max(0),
        },
    }
}

fn mobile_fitted_size(size: Size, viewport: Viewport) -> Size {
    Size {
        width: size.width.min(viewport.width - MOBILE_FIT_INSET_W),
        height: size.height.min(viewport.height - MOBILE_FIT_INSET_H),
    }
    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}
