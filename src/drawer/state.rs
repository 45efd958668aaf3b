//! Navigation drawer state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::StateModule;

/// State of the application navigation drawer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawerState {
    /// Whether the drawer is currently open.
    pub open: bool,
    /// A pinned drawer stays visible regardless of `open`.
    pub pinned: bool,
}

impl DrawerState {
    /// Create a drawer in the given initial position.
    pub fn new(open: bool, pinned: bool) -> Self {
        Self { open, pinned }
    }

    /// Flip the open flag.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Set the open flag.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Set the pinned flag.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Whether the drawer should be rendered.
    pub fn visible(&self) -> bool {
        self.open || self.pinned
    }
}

impl StateModule for DrawerState {
    const NAME: &'static str = "drawer";

    fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_closed() {
        let drawer = DrawerState::default();
        assert!(!drawer.open);
        assert!(!drawer.pinned);
        assert!(!drawer.visible());
    }

    #[test]
    fn test_toggle() {
        let mut drawer = DrawerState::default();

        drawer.toggle();
        assert!(drawer.open);
        assert!(drawer.visible());

        drawer.toggle();
        assert!(!drawer.open);
        assert!(!drawer.visible());
    }

    #[test]
    fn test_pinned_stays_visible() {
        let mut drawer = DrawerState::default();
        drawer.set_pinned(true);

        assert!(!drawer.open);
        assert!(drawer.visible());

        // Closing an already-closed pinned drawer changes nothing
        drawer.set_open(false);
        assert!(drawer.visible());
    }

    #[test]
    fn test_snapshot() {
        let drawer = DrawerState::new(true, false);
        assert_eq!(drawer.snapshot(), json!({"open": true, "pinned": false}));
    }
}
