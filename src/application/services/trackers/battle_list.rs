//! Battle item and magic list trackers
//!
//! Both lists behave the same way apart from which battle window must be in
//! front for suppression to hold. The magic list also caches the caster so spell
//! rows can include remaining charges.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::{BattleMenuState, CharacterSnapshot, Region};

pub struct BattleListTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    window: BattleMenuState,
    caster: RefCell<Option<CharacterSnapshot>>,
}

impl BattleListTracker {
    pub fn items(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self::new(core, probe, BattleMenuState::ItemList)
    }

    pub fn magic(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self::new(core, probe, BattleMenuState::MagicList)
    }

    fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>, window: BattleMenuState) -> Self {
        Self {
            core,
            probe,
            window,
            caster: RefCell::new(None),
        }
    }

    pub fn set_caster(&self, caster: CharacterSnapshot) {
        *self.caster.borrow_mut() = Some(caster);
    }

    pub fn caster(&self) -> Option<CharacterSnapshot> {
        self.caster.borrow().clone()
    }

    pub fn claim_selection(&self) {
        self.core.claim();
    }
}

impl MenuTracker for BattleListTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.battle_menu_state() {
            Ok(state) if state == self.window => true,
            Ok(state) => {
                debug!(region = %self.core.region(), ?state, "Battle list no longer in front");
                self.reset();
                false
            }
            Err(e) => {
                warn!("Battle menu probe failed, releasing {}: {}", self.core.region(), e);
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
        self.caster.borrow_mut().take();
    }

    fn on_region_lost(&self) {
        self.core.clear_gate();
    }
}
