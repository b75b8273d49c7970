//! Host viewport access injected into the state containers.
//!
//! The containers never probe their execution environment directly; a host
//! with a real display implements [`ViewportProvider`] over its window object,
//! and headless hosts (tests, prerendering) use [`FixedViewport`].

use std::cell::Cell;

use crate::model::{DeviceClass, Viewport};

/// Live viewport dimensions and device classification for the containers.
///
/// Implementations must answer synchronously; both containers read the
/// viewport at call time on every operation rather than caching it.
pub trait ViewportProvider {
    /// Current full viewport dimensions.
    fn viewport(&self) -> Viewport;

    /// Device class derived from the current viewport width.
    fn device_class(&self) -> DeviceClass {
        DeviceClass::classify(self.viewport().width)
    }
}

impl std::fmt::Debug for dyn ViewportProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportProvider")
            .field("viewport", &self.viewport())
            .finish()
    }
}

/// Fixed-size provider for hosts without a real display.
#[derive(Debug)]
pub struct FixedViewport {
    size: Cell<Viewport>,
}

impl FixedViewport {
    /// Creates a provider reporting `width` x `height`.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Cell::new(Viewport { width, height }),
        }
    }

    /// Replaces the reported dimensions, simulating a resize event.
    pub fn set(&self, width: i32, height: i32) {
        self.size.set(Viewport { width, height });
    }
}

impl Default for FixedViewport {
    fn default() -> Self {
        Self::new(1024, 768)
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.size.get()
    }
}
