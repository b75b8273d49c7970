//! JSON state dump for browser-e2e assertions and debugging.

use serde::Serialize;

use crate::model::{IconState, WindowState};

#[derive(Debug, Serialize)]
struct DesktopStateDump<'a> {
    windows: &'a [WindowState],
    icons: &'a [IconState],
}

/// Serializes both container snapshots into one deterministic JSON document.
pub fn desktop_state_json(
    windows: &[WindowState],
    icons: &[IconState],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DesktopStateDump { windows, icons })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use desktop_contract::ApplicationId;

    use crate::icon_layout::IconLayoutEngine;
    use crate::viewport::{FixedViewport, ViewportProvider};
    use crate::window_manager::WindowManager;

    use super::*;

    #[test]
    fn dump_contains_both_containers_keyed_by_id() {
        let provider = Rc::new(FixedViewport::default()) as Rc<dyn ViewportProvider>;
        let manager = WindowManager::new(Rc::clone(&provider));
        let icons = IconLayoutEngine::new(provider);
        manager.open(&ApplicationId::trusted("chatbot"));
        icons.relayout();

        let raw = desktop_state_json(&manager.snapshot(), &icons.snapshot()).expect("serialize");
        let parsed: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(parsed["windows"].as_array().unwrap().len(), 6);
        assert_eq!(parsed["icons"].as_array().unwrap().len(), 5);
        assert_eq!(parsed["windows"][0]["id"], "chatbot");
        assert_eq!(parsed["windows"][0]["is_open"], true);
    }
}
