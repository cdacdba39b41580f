use log::debug;
use crate::state::{Phase, PlaybackState};
use crate::timeline::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    Single,
    Double,
}

/// Classifies taps on the carousel by their distance in time to the
/// previous tap. Every tap is compared against the one right before it.
#[derive(Debug, Clone)]
pub struct TapTracker {
    window_ms: u64,
    last_tap_ms: Option<u64>,
}

impl TapTracker {
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms, last_tap_ms: None }
    }

    pub fn reset(&mut self) {
        self.last_tap_ms = None;
    }

    pub fn classify(&mut self, at_ms: u64) -> TapKind {
        let kind = match self.last_tap_ms {
            Some(last) if at_ms.saturating_sub(last) < self.window_ms => TapKind::Double,
            _ => TapKind::Single,
        };
        self.last_tap_ms = Some(at_ms);
        kind
    }

    /// Turns a tap at horizontal position `x` into an intent. Double taps
    /// on the right half go forward, anywhere else back. Taps are ignored
    /// outright (and not remembered) once the ending is showing.
    pub fn interpret(&mut self, at_ms: u64, x: f32, viewport_width: f32, state: &PlaybackState) -> Option<Intent> {
        if state.phase == Phase::Ended {
            return None;
        }

        let intent = match self.classify(at_ms) {
            TapKind::Double if x > viewport_width / 2.0 => Intent::Advance,
            TapKind::Double => Intent::Retreat,
            TapKind::Single if state.is_paused => Intent::Resume,
            TapKind::Single => Intent::Pause,
        };
        debug!("Tap at {}ms x={:.0} -> {:?}", at_ms, x, intent);
        Some(intent)
    }
}
