//! Battle command tracker
//!
//! Owns the command bar (Fight / Magic / Item / Guard / Flee) and the
//! process-wide flee flag. While a flee is in progress the command bar keeps
//! flickering through focus events; all of that stays silent until the flag is
//! cleared by battle end or by the flee timeout the action hook schedules.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::{BattleMenuState, Region};

pub struct BattleCommandTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    fleeing: Cell<bool>,
    current_actor: RefCell<Option<String>>,
}

impl BattleCommandTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            fleeing: Cell::new(false),
            current_actor: RefCell::new(None),
        }
    }

    pub fn is_fleeing(&self) -> bool {
        self.fleeing.get()
    }

    pub fn begin_flee(&self) {
        debug!("Flee in progress; command narration muted");
        self.fleeing.set(true);
    }

    pub fn clear_flee(&self) {
        if self.fleeing.replace(false) {
            debug!("Flee finished; command narration restored");
        }
    }

    /// Record whose turn it is. Returns true when the actor changed.
    pub fn note_actor(&self, actor: &str) -> bool {
        let mut current = self.current_actor.borrow_mut();
        if current.as_deref() == Some(actor) {
            return false;
        }
        *current = Some(actor.to_string());
        true
    }

    pub fn claim(&self) {
        self.core.claim();
    }
}

impl MenuTracker for BattleCommandTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if self.fleeing.get() {
            return true;
        }
        if !self.core.is_active() {
            return false;
        }
        match self.probe.battle_menu_state() {
            Ok(BattleMenuState::CommandBar) => true,
            Ok(_) => {
                self.reset();
                false
            }
            Err(e) => {
                warn!("Battle menu probe failed, releasing command bar: {}", e);
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
        self.current_actor.borrow_mut().take();
    }

    fn on_region_lost(&self) {
        // Actor is kept: returning from a sub-list to the same actor's bar is not a new turn
        self.core.clear_gate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestRig;

    #[test]
    fn test_flee_suppresses_even_when_inactive() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.battle_command;

        tracker.begin_flee();
        assert!(tracker.should_suppress());

        tracker.clear_flee();
        assert!(!tracker.should_suppress());
    }

    #[test]
    fn test_note_actor_detects_turn_change() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.battle_command;

        assert!(tracker.note_actor("Luneth"));
        assert!(!tracker.note_actor("Luneth"));
        assert!(tracker.note_actor("Arc"));
    }

    #[test]
    fn test_command_bar_revalidation() {
        let rig = TestRig::new();
        let tracker = &rig.trackers.battle_command;
        tracker.claim();

        rig.probe.battle.set(BattleMenuState::CommandBar);
        assert!(tracker.should_suppress());

        rig.probe.battle.set(BattleMenuState::Hidden);
        assert!(!tracker.should_suppress());
        assert!(!rig.registry.is_active(Region::BattleCommand));
    }
}
