//! Status menu tracker
//!
//! Character selection is ordinary cursor movement and stays with the generic
//! narrator. Only the details page is owned here.

use std::cell::Cell;
use std::rc::Rc;

use tracing::warn;

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::{Region, StatusMenuState};

pub struct StatusMenuTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    state: Cell<StatusMenuState>,
}

impl StatusMenuTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            state: Cell::new(StatusMenuState::None),
        }
    }

    pub fn state(&self) -> StatusMenuState {
        self.state.get()
    }

    pub fn observe_state(&self, state: StatusMenuState) {
        self.state.set(state);
        if state != StatusMenuState::Details {
            self.reset();
        }
    }

    pub fn claim_details(&self) {
        self.state.set(StatusMenuState::Details);
        self.core.claim();
    }
}

impl MenuTracker for StatusMenuTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.status_menu_state() {
            Ok(StatusMenuState::Details) => true,
            Ok(_) => {
                self.reset();
                false
            }
            Err(e) => {
                warn!("Status menu probe failed, releasing: {}", e);
                self.reset();
                false
            }
        }
    }

    fn should_announce(&self, text: &str) -> bool {
        self.core.should_announce(text)
    }

    fn reset(&self) {
        self.core.release();
        self.state.set(StatusMenuState::None);
    }

    fn on_region_lost(&self) {
        self.state.set(StatusMenuState::None);
        self.core.clear_gate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestRig;

    #[test]
    fn test_suppresses_only_on_details_page() {
        let rig = TestRig::new();
        rig.probe.status.set(StatusMenuState::Details);
        rig.trackers.status.claim_details();

        assert!(rig.trackers.status.should_suppress());
        assert!(rig.registry.is_active(Region::StatusMenu));
    }

    #[test]
    fn test_character_select_releases_stale_claim() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.status;
        tracker.claim_details();

        rig.probe.status.set(StatusMenuState::CharacterSelect);
        assert!(!tracker.should_suppress());
        assert!(!rig.registry.is_active(Region::StatusMenu));
        assert_eq!(tracker.state(), StatusMenuState::None);
    }

    #[test]
    fn test_closed_menu_releases_stale_claim() {
        let rig = TestRig::new();
        rig.trackers.status.claim_details();

        rig.probe.status.set(StatusMenuState::None);
        assert!(!rig.trackers.status.should_suppress());
        assert!(!rig.registry.is_active(Region::StatusMenu));
    }

    #[test]
    fn test_state_read_failure_releases_region() {
        let rig = TestRig::new();
        rig.probe.status.set(StatusMenuState::Details);
        rig.trackers.status.claim_details();

        rig.probe.fail.set(true);
        assert!(!rig.trackers.status.should_suppress());
        assert!(!rig.registry.is_active(Region::StatusMenu));
    }
}
