//! Equip menu tracker: `None -> SlotList -> ItemList`

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::{EquipMenuState, Region};

pub struct EquipMenuTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    state: Cell<EquipMenuState>,
}

impl EquipMenuTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            state: Cell::new(EquipMenuState::None),
        }
    }

    pub fn state(&self) -> EquipMenuState {
        self.state.get()
    }

    pub fn observe_state(&self, state: EquipMenuState) {
        self.state.set(state);
        if !state.shows_sub_list() {
            self.reset();
        }
    }

    pub fn claim_slot(&self) {
        self.state.set(EquipMenuState::SlotList);
        self.core.claim();
    }

    pub fn claim_item(&self) {
        self.state.set(EquipMenuState::ItemList);
        self.core.claim();
    }
}

impl MenuTracker for EquipMenuTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.equip_menu_state() {
            Ok(state) if state.shows_sub_list() => {
                self.state.set(state);
                true
            }
            Ok(_) => {
                debug!("Equip menu closed underneath its tracker; releasing");
                self.reset();
                false
            }
            Err(e) => {
                warn!("Equip menu probe failed, releasing: {}", e);
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
        self.state.set(EquipMenuState::None);
    }

    fn on_region_lost(&self) {
        self.state.set(EquipMenuState::None);
        self.core.clear_gate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestRig;

    #[test]
    fn test_suppresses_in_slot_and_item_lists() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.equip;
        rig.probe.equip.set(EquipMenuState::SlotList);
        tracker.claim_slot();
        assert!(tracker.should_suppress());

        rig.probe.equip.set(EquipMenuState::ItemList);
        tracker.claim_item();
        assert!(tracker.should_suppress());
        assert_eq!(tracker.state(), EquipMenuState::ItemList);
    }

    #[test]
    fn test_stale_activation_is_released_on_revalidation() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.equip;
        tracker.claim_item();

        rig.probe.equip.set(EquipMenuState::None);
        assert!(!tracker.should_suppress());
        assert!(!rig.registry.is_active(Region::EquipMenu));
        assert_eq!(tracker.state(), EquipMenuState::None);
    }

    #[test]
    fn test_state_read_failure_releases_region() {
        let rig = TestRig::new();
        rig.probe.equip.set(EquipMenuState::SlotList);
        rig.trackers.equip.claim_slot();

        rig.probe.fail.set(true);
        assert!(!rig.trackers.equip.should_suppress());
        assert!(!rig.registry.is_active(Region::EquipMenu));
    }
}
