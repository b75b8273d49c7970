//! Responsive column-first grid layout for desktop shortcut icons.

use std::rc::Rc;

use desktop_contract::{desktop_icon_apps, AppDescriptor, ApplicationId};

use crate::model::{IconCellMetrics, IconState, Point, TASKBAR_HEIGHT};
use crate::store::{Store, SubscriptionId};
use crate::viewport::ViewportProvider;

/// Owns every desktop shortcut's state and the grid layout algorithm.
///
/// Icon positions are engine-computed, grid-aligned, and non-overlapping for
/// all placed icons; unlike windows they are not user-set in the default
/// flow. Operations on unknown ids are silent no-ops.
#[derive(Debug)]
pub struct IconLayoutEngine {
    provider: Rc<dyn ViewportProvider>,
    store: Store<Vec<IconState>>,
}

impl IconLayoutEngine {
    /// Creates an engine seeded from the built-in registry's desktop entries.
    pub fn new(provider: Rc<dyn ViewportProvider>) -> Self {
        let registry = desktop_icon_apps();
        Self::with_registry(provider, &registry)
    }

    /// Creates an engine seeded from an explicit registry slice. Registry
    /// order defines the layout order.
    pub fn with_registry(provider: Rc<dyn ViewportProvider>, registry: &[AppDescriptor]) -> Self {
        let icons = registry
            .iter()
            .filter(|entry| entry.show_on_desktop)
            .map(IconState::from_descriptor)
            .collect();
        Self {
            provider,
            store: Store::new(icons),
        }
    }

    /// Returns an immutable snapshot of every icon in registry order.
    pub fn snapshot(&self) -> Vec<IconState> {
        self.store.get()
    }

    /// Registers a snapshot listener notified synchronously after mutations.
    pub fn subscribe(&self, listener: impl Fn(&Vec<IconState>) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Detaches a snapshot listener.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Recomputes every icon position from the live viewport and device
    /// class, filling columns top to bottom before advancing rightwards.
    ///
    /// Icons whose column does not fit the available width keep their
    /// previous position; that degradation is deliberate and keeps placed
    /// icons overlap-free. A viewport shorter than one cell is floored to a
    /// single row per column instead of failing.
    pub fn relayout(&self) {
        let viewport = self.provider.viewport();
        let metrics = IconCellMetrics::for_device(self.provider.device_class());

        let available_height = viewport.height - TASKBAR_HEIGHT - metrics.padding * 2;
        let available_width = viewport.width - metrics.padding * 2;
        let rows_per_column = (available_height / metrics.height).max(1);
        let columns_that_fit = (available_width / metrics.width).max(0);
        if available_height < metrics.height {
            log::warn!(
                "degenerate viewport {}x{} for icon layout; flooring to one row per column",
                viewport.width,
                viewport.height
            );
        }

        self.store.update(|icons| {
            for (index, icon) in icons.iter_mut().enumerate() {
                let index = index as i32;
                let column = index / rows_per_column;
                let row = index % rows_per_column;
                if column >= columns_that_fit {
                    continue;
                }
                icon.position = Point {
                    x: metrics.padding + column * metrics.width,
                    y: metrics.padding + row * metrics.height,
                };
            }
        });
    }

    /// Mirrors a window's open state onto its icon to swap the glyph.
    pub fn set_open_state(&self, id: &ApplicationId, is_open: bool) -> bool {
        if !self.known("set_open_state", id) {
            return false;
        }
        self.store.update(|icons| {
            let Some(icon) = icons.iter_mut().find(|i| &i.id == id) else {
                return false;
            };
            icon.is_open = is_open;
            true
        })
    }

    /// Overrides an icon's position directly, for user-draggable icons.
    pub fn set_position(&self, id: &ApplicationId, position: Point) -> bool {
        if !self.known("set_position", id) {
            return false;
        }
        self.store.update(|icons| {
            let Some(icon) = icons.iter_mut().find(|i| &i.id == id) else {
                return false;
            };
            icon.position = position;
            true
        })
    }

    fn known(&self, operation: &str, id: &ApplicationId) -> bool {
        let known = self.store.with(|icons| icons.iter().any(|i| &i.id == id));
        if !known {
            log::debug!("{operation} ignored for unknown icon id `{id}`");
        }
        known
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use crate::viewport::FixedViewport;

    use super::*;

    fn engine(width: i32, height: i32) -> (Rc<FixedViewport>, IconLayoutEngine) {
        let provider = Rc::new(FixedViewport::new(width, height));
        let engine = IconLayoutEngine::new(Rc::clone(&provider) as Rc<dyn ViewportProvider>);
        (provider, engine)
    }

    #[test]
    fn desktop_grid_fills_columns_top_to_bottom() {
        // 1024x768 with taskbar 40 and padding 15 leaves 698px, four rows of
        // 140px per column.
        let (_, engine) = engine(1024, 768);
        engine.relayout();

        let icons = engine.snapshot();
        assert_eq!(icons.len(), 5);
        for (index, icon) in icons.iter().take(4).enumerate() {
            assert_eq!(
                icon.position,
                Point { x: 15, y: 15 + index as i32 * 140 },
                "icon {index} belongs in column 0"
            );
        }
        assert_eq!(icons[4].position, Point { x: 155, y: 15 });
    }

    #[test]
    fn placed_icons_never_overlap() {
        for (width, height) in [(1024, 768), (1920, 1080), (800, 600), (375, 667), (160, 900)] {
            let (_, engine) = engine(width, height);
            engine.relayout();

            let mut seen = HashSet::new();
            for icon in engine.snapshot() {
                assert!(
                    seen.insert((icon.position.x, icon.position.y)),
                    "duplicate position {:?} at {width}x{height}",
                    icon.position
                );
            }
        }
    }

    #[test]
    fn short_viewport_floors_to_one_row_per_column() {
        let (_, engine) = engine(1024, 120);
        engine.relayout();

        let metrics = IconCellMetrics::for_device(crate::model::DeviceClass::Tablet);
        for (index, icon) in engine.snapshot().iter().enumerate() {
            assert_eq!(icon.position.y, metrics.padding, "icon {index} stays in row 0");
            assert_eq!(icon.position.x, metrics.padding + index as i32 * metrics.width);
        }
    }

    #[test]
    fn columns_beyond_available_width_are_left_unplaced() {
        // 300px wide mobile viewport fits two 110px columns; a 120px tall
        // viewport floors to one row per column, so icons 2.. overflow.
        let (_, engine) = engine(300, 120);
        engine.relayout();

        let icons = engine.snapshot();
        assert_eq!(icons[0].position, Point { x: 10, y: 10 });
        assert_eq!(icons[1].position, Point { x: 120, y: 10 });
        for icon in &icons[2..] {
            assert_eq!(icon.position, Point { x: 0, y: 0 }, "overflow keeps prior position");
        }
    }

    #[test]
    fn mobile_grid_uses_tighter_cells() {
        let (_, engine) = engine(375, 667);
        engine.relayout();

        let icons = engine.snapshot();
        // 667 - 40 - 20 = 607 -> five 110px rows in column 0.
        for (index, icon) in icons.iter().enumerate() {
            assert_eq!(icon.position, Point { x: 10, y: 10 + index as i32 * 110 });
        }
    }

    #[test]
    fn relayout_reads_the_live_viewport_each_call() {
        let (provider, engine) = engine(1024, 768);
        engine.relayout();
        let wide = engine.snapshot();
        assert_eq!(wide[4].position, Point { x: 155, y: 15 });

        provider.set(1024, 1080);
        engine.relayout();
        // 1080 - 40 - 30 = 1010 -> seven rows, everything in column 0 now.
        let tall = engine.snapshot();
        assert_eq!(tall[4].position, Point { x: 15, y: 15 + 4 * 140 });
    }

    #[test]
    fn open_state_mirror_and_position_override() {
        let (_, engine) = engine(1024, 768);
        let chatbot = ApplicationId::trusted("chatbot");

        assert!(engine.set_open_state(&chatbot, true));
        assert!(engine.snapshot()[0].is_open);

        assert!(engine.set_position(&chatbot, Point { x: 300, y: 12 }));
        assert_eq!(engine.snapshot()[0].position, Point { x: 300, y: 12 });

        let ghost = ApplicationId::trusted("ghost");
        assert!(!engine.set_open_state(&ghost, true));
        assert!(!engine.set_position(&ghost, Point { x: 0, y: 0 }));
    }
}
