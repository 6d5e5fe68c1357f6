//! Battle target tracker
//!
//! The target cursor compares by unit identity, not by name: moving from one
//! "Goblin" to the next must be spoken.

use std::rc::Rc;

use tracing::warn;

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::application::services::deduplicator::contexts;
use crate::application::services::Deduplicator;
use crate::domain::value_objects::{BattleMenuState, ObjectRef, Region};

pub struct BattleTargetTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    dedup: Rc<Deduplicator>,
}

impl BattleTargetTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>, dedup: Rc<Deduplicator>) -> Self {
        Self { core, probe, dedup }
    }

    pub fn should_announce_target(&self, target: ObjectRef) -> bool {
        self.dedup.should_announce_object(contexts::BATTLE_TARGET, target)
    }

    pub fn claim(&self) {
        self.core.claim();
    }
}

impl MenuTracker for BattleTargetTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.battle_menu_state() {
            Ok(BattleMenuState::TargetSelect) => true,
            Ok(_) => {
                self.reset();
                false
            }
            Err(e) => {
                warn!("Battle menu probe failed, releasing target cursor: {}", e);
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
        self.dedup.reset(&[contexts::BATTLE_TARGET]);
    }

    fn on_region_lost(&self) {
        self.dedup.reset(&[contexts::BATTLE_TARGET]);
    }
}
