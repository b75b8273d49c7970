//! Headless state core for the webtop desktop shell: window lifecycle and
//! z-order arbitration, responsive desktop icon layout, and the reactive
//! snapshot/subscribe surface the rendering layer consumes.

pub mod icon_layout;
pub mod inspect;
pub mod model;
pub mod shell;
pub mod store;
pub mod viewport;
pub mod window_manager;

pub use icon_layout::IconLayoutEngine;
pub use inspect::desktop_state_json;
pub use model::*;
pub use store::{Store, SubscriptionId};
pub use viewport::{FixedViewport, ViewportProvider};
pub use window_manager::{clamp_to_viewport, WindowManager};
