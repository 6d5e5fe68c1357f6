//! Vehicle / movement state
//!
//! Several engine signals report the same transition (the transportation
//! change itself, move-state callbacks, board and disembark events), so every
//! observation funnels through `observe` and the last-announced guard collapses
//! them into one utterance. Sentinel modes are ignored entirely.

use std::cell::Cell;

use tracing::debug;

use crate::domain::value_objects::{Announcement, TransportMode};

#[derive(Default)]
pub struct MovementTracker {
    /// Last real mode observed, never a sentinel
    previous: Cell<Option<TransportMode>>,
    last_announced: Cell<Option<TransportMode>>,
}

impl MovementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_mode(&self) -> Option<TransportMode> {
        self.previous.get()
    }

    pub fn observe(&self, mode: TransportMode) -> Option<Announcement> {
        if mode.is_sentinel() {
            debug!("Ignoring sentinel transport mode");
            return None;
        }

        let previous = self.previous.replace(Some(mode));
        if previous == Some(mode) {
            return None;
        }

        let was_vehicle = previous.map_or(false, TransportMode::is_vehicle);
        let text = if mode.is_vehicle() {
            format!("On {}", mode.display_name())
        } else if was_vehicle {
            "On foot".to_string()
        } else {
            return None;
        };

        if self.last_announced.replace(Some(mode)) == Some(mode) {
            return None;
        }
        debug!(?previous, current = %mode, "Transport transition");
        Some(Announcement::interrupting(text))
    }

    pub fn reset(&self) {
        self.previous.set(None);
        self.last_announced.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spoken(tracker: &MovementTracker, modes: &[TransportMode]) -> Vec<String> {
        modes
            .iter()
            .filter_map(|mode| tracker.observe(*mode))
            .map(|a| a.text)
            .collect()
    }

    #[test]
    fn test_vehicle_sequence_yields_two_edges() {
        use TransportMode::*;
        let tracker = MovementTracker::new();

        let texts = spoken(&tracker, &[OnFoot, Ship, Ship, Intermediate, Ship, OnFoot]);

        assert_eq!(texts, vec!["On ship", "On foot"]);
    }

    #[test]
    fn test_sentinel_does_not_overwrite_previous_mode() {
        let tracker = MovementTracker::new();
        tracker.observe(TransportMode::Airship);
        tracker.observe(TransportMode::Intermediate);

        assert_eq!(tracker.current_mode(), Some(TransportMode::Airship));
    }

    #[test]
    fn test_walking_around_is_silent() {
        let tracker = MovementTracker::new();

        assert!(spoken(&tracker, &[TransportMode::OnFoot, TransportMode::OnFoot]).is_empty());
    }

    #[test]
    fn test_duplicate_signals_collapse() {
        let tracker = MovementTracker::new();
        tracker.observe(TransportMode::OnFoot);

        // Transportation change, then the board event for the same canoe
        assert!(tracker.observe(TransportMode::Canoe).is_some());
        assert!(tracker.observe(TransportMode::Canoe).is_none());
    }

    #[test]
    fn test_reset_forgets_history() {
        let tracker = MovementTracker::new();
        tracker.observe(TransportMode::Ship);
        tracker.reset();

        assert_eq!(tracker.current_mode(), None);
        assert!(tracker.observe(TransportMode::OnFoot).is_none());
    }
}
