//! Tab-bar visibility and per-route press dispatch.
//!
//! Any screen may hide or reveal the tab bar (last write wins) and flag
//! that the camera/post overlay is covering it. Screens that live behind a
//! tab register a pair of callbacks keyed by route: a repeated ("double")
//! press of the active tab triggers `refresh`, a single press triggers
//! `scroll_to_top`. Dispatching to a route nobody registered is a silent
//! no-op.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type TabCallback = Box<dyn FnMut() + Send>;

pub struct TabRouteHandler {
    scroll_to_top: TabCallback,
    refresh: TabCallback,
}

impl TabRouteHandler {
    #[must_use]
    pub fn new(
        scroll_to_top: impl FnMut() + Send + 'static,
        refresh: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            scroll_to_top: Box::new(scroll_to_top),
            refresh: Box::new(refresh),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabPress {
    Single,
    Double,
}

#[derive(Default)]
pub struct TabBarStore {
    hidden: bool,
    camera_active: bool,
    handlers: HashMap<String, TabRouteHandler>,
}

impl TabBarStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_camera_active(&mut self, active: bool) {
        self.camera_active = active;
    }

    #[must_use]
    pub const fn is_camera_active(&self) -> bool {
        self.camera_active
    }

    /// Registers (or replaces) the handler for a route.
    pub fn register(&mut self, route: impl Into<String>, handler: TabRouteHandler) {
        self.handlers.insert(route.into(), handler);
    }

    /// Returns whether a handler was actually removed.
    pub fn unregister(&mut self, route: &str) -> bool {
        self.handlers.remove(route).is_some()
    }

    /// Invokes the route's `refresh` callback for a double press, its
    /// `scroll_to_top` callback for a single press. Returns whether a
    /// handler fired.
    pub fn dispatch(&mut self, route: &str, press: TabPress) -> bool {
        let Some(handler) = self.handlers.get_mut(route) else {
            return false;
        };
        match press {
            TabPress::Single => (handler.scroll_to_top)(),
            TabPress::Double => (handler.refresh)(),
        }
        true
    }
}
