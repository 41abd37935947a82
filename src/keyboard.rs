//! Keyboard/layout bridge.
//!
//! The shell's animation driver reports the keyboard transition once per
//! frame. Those callbacks run off the UI context, so the driver never
//! touches the model directly: it posts each frame to the core as
//! [`crate::Event::KeyboardFrame`] and the event queue is the marshaling
//! point. On the core side [`KeyboardBridge::observe`] derives a compact
//! snapshot and suppresses frames that change nothing, so layout code is
//! not re-rendered sixty times a second for an idle keyboard.

use serde::{Deserialize, Serialize};

use crate::MIN_VISIBLE_KEYBOARD_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Raw per-frame reading from the platform keyboard animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardFrame {
    pub state: KeyboardState,
    pub height: f64,
}

/// What layout code actually consumes: height in whole units, floored at
/// zero, plus a derived visibility flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyboardSnapshot {
    pub visible: bool,
    pub height: u32,
    pub state: KeyboardState,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardBridgeConfig {
    /// Whether an opening keyboard already counts as visible.
    pub opening_counts_as_visible: bool,
    /// Live height above this threshold forces `visible` regardless of state.
    pub min_visible_height: f64,
}

impl Default for KeyboardBridgeConfig {
    fn default() -> Self {
        Self {
            opening_counts_as_visible: true,
            min_visible_height: MIN_VISIBLE_KEYBOARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardBridge {
    config: KeyboardBridgeConfig,
    last: Option<KeyboardSnapshot>,
}

impl KeyboardBridge {
    #[must_use]
    pub fn new(config: KeyboardBridgeConfig) -> Self {
        Self { config, last: None }
    }

    /// Folds one raw frame into the bridge. Returns the new snapshot only
    /// when it differs from the last emitted one; `None` means the caller
    /// can skip re-rendering entirely.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn observe(&mut self, frame: KeyboardFrame) -> Option<KeyboardSnapshot> {
        let live_height = if frame.height.is_finite() {
            frame.height.max(0.0)
        } else {
            0.0
        };

        let visible = matches!(frame.state, KeyboardState::Open)
            || (self.config.opening_counts_as_visible
                && matches!(frame.state, KeyboardState::Opening))
            || live_height > self.config.min_visible_height;

        let snapshot = KeyboardSnapshot {
            visible,
            height: live_height.round() as u32,
            state: frame.state,
        };

        if self.last == Some(snapshot) {
            return None;
        }
        self.last = Some(snapshot);
        Some(snapshot)
    }

    /// Last emitted snapshot, or the closed default before any frame.
    #[must_use]
    pub fn snapshot(&self) -> KeyboardSnapshot {
        self.last.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(state: KeyboardState, height: f64) -> KeyboardFrame {
        KeyboardFrame { state, height }
    }

    #[test]
    fn identical_frames_are_suppressed() {
        let mut bridge = KeyboardBridge::default();
        assert!(bridge.observe(frame(KeyboardState::Open, 320.0)).is_some());
        assert!(bridge.observe(frame(KeyboardState::Open, 320.0)).is_none());
        assert!(bridge.observe(frame(KeyboardState::Open, 320.4)).is_none(), "rounds to same unit");
        assert!(bridge.observe(frame(KeyboardState::Open, 321.0)).is_some());
    }

    #[test]
    fn height_is_rounded_and_floored_at_zero() {
        let mut bridge = KeyboardBridge::default();
        let snapshot = bridge.observe(frame(KeyboardState::Open, 319.6)).unwrap();
        assert_eq!(snapshot.height, 320);

        let snapshot = bridge.observe(frame(KeyboardState::Closing, -12.0)).unwrap();
        assert_eq!(snapshot.height, 0);

        let snapshot = bridge.observe(frame(KeyboardState::Closed, f64::NAN)).unwrap();
        assert_eq!(snapshot.height, 0);
        assert!(!snapshot.visible);
    }

    #[test]
    fn open_state_is_visible_even_at_zero_height() {
        let mut bridge = KeyboardBridge::default();
        let snapshot = bridge.observe(frame(KeyboardState::Open, 0.0)).unwrap();
        assert!(snapshot.visible);
    }

    #[test]
    fn live_height_above_threshold_is_visible_in_any_state() {
        let mut bridge = KeyboardBridge::default();
        let snapshot = bridge.observe(frame(KeyboardState::Closing, 140.0)).unwrap();
        assert!(snapshot.visible);

        let snapshot = bridge.observe(frame(KeyboardState::Closing, 0.5)).unwrap();
        assert!(!snapshot.visible, "at or below threshold is not visible");
    }

    #[test]
    fn opening_visibility_is_configurable() {
        let mut eager = KeyboardBridge::default();
        assert!(eager.observe(frame(KeyboardState::Opening, 0.0)).unwrap().visible);

        let mut lazy = KeyboardBridge::new(KeyboardBridgeConfig {
            opening_counts_as_visible: false,
            ..KeyboardBridgeConfig::default()
        });
        assert!(!lazy.observe(frame(KeyboardState::Opening, 0.0)).unwrap().visible);
    }

    #[test]
    fn snapshot_defaults_to_closed_before_any_frame() {
        let bridge = KeyboardBridge::default();
        assert_eq!(bridge.snapshot(), KeyboardSnapshot::default());
    }
}
