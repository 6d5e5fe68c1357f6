//! Item menu tracker
//!
//! `None -> CommandBar -> {UseList, KeyItemList, SortList} -> TargetSelect`.
//! The command bar is narrated by the generic narrator; this tracker only owns
//! the lists and the target cursor.

use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::{ItemMenuState, Region};

pub struct ItemMenuTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    state: Cell<ItemMenuState>,
}

impl ItemMenuTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            state: Cell::new(ItemMenuState::None),
        }
    }

    pub fn state(&self) -> ItemMenuState {
        self.state.get()
    }

    /// Apply a sub-state reported by the engine. Leaving the lists releases the region.
    pub fn observe_state(&self, state: ItemMenuState) {
        self.state.set(state);
        if !state.shows_sub_list() {
            self.reset();
        }
    }

    /// Claim narration for a validated list selection
    pub fn claim_selection(&self, state: ItemMenuState) {
        self.state.set(state);
        self.core.claim();
    }

    /// Claim narration for the target cursor
    pub fn claim_target(&self) {
        self.state.set(ItemMenuState::TargetSelect);
        self.core.claim();
    }

    fn clear_transient(&self) {
        self.state.set(ItemMenuState::None);
        self.core.clear_gate();
    }
}

impl MenuTracker for ItemMenuTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.item_menu_state() {
            Ok(state) if state.shows_sub_list() => {
                self.state.set(state);
                true
            }
            Ok(state) => {
                debug!(?state, "Item menu left its lists; releasing");
                self.reset();
                false
            }
            Err(e) => {
                warn!("Item menu probe failed, releasing: {}", e);
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
        self.clear_transient();
    }

    fn on_region_lost(&self) {
        self.clear_transient();
    }
}
