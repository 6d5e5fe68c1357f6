//! Magic menu tracker
//!
//! `None -> CommandBar (Use / Remove / Exchange / Memorize) -> SpellList -> TargetSelect`.
//! Spells are charged per level, so the tracker caches the character whose
//! window is open; spell announcements read remaining casts from that snapshot.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::services::text::strip_markup;
use crate::domain::value_objects::{CharacterSnapshot, MagicMenuState, Region, SpellEntry};

/// `"Fire, level 1, 3/5 charges: Deals fire damage"`; charges are left out
/// when no character is known.
pub fn format_spell(entry: &SpellEntry, character: Option<&CharacterSnapshot>) -> Option<String> {
    let name = strip_markup(&entry.name);
    if name.is_empty() {
        return None;
    }

    let mut text = format!("{}, level {}", name, entry.level);
    if let Some(charge) = character.and_then(|c| c.charge_for_level(entry.level)) {
        text.push_str(&format!(", {}/{} charges", charge.current, charge.max));
    }

    let description = strip_markup(&entry.description);
    if !description.is_empty() {
        text.push_str(": ");
        text.push_str(&description);
    }
    Some(text)
}

pub struct MagicMenuTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    state: Cell<MagicMenuState>,
    character: RefCell<Option<CharacterSnapshot>>,
}

impl MagicMenuTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            state: Cell::new(MagicMenuState::None),
            character: RefCell::new(None),
        }
    }

    pub fn state(&self) -> MagicMenuState {
        self.state.get()
    }

    pub fn set_character(&self, character: CharacterSnapshot) {
        debug!(character = %character.name, "Magic window character cached");
        *self.character.borrow_mut() = Some(character);
    }

    pub fn character(&self) -> Option<CharacterSnapshot> {
        self.character.borrow().clone()
    }

    pub fn observe_state(&self, state: MagicMenuState) {
        self.state.set(state);
        if !state.shows_sub_list() {
            self.core.release();
        }
        if state == MagicMenuState::None {
            self.character.borrow_mut().take();
        }
    }

    pub fn claim_spell(&self) {
        self.state.set(MagicMenuState::SpellList);
        self.core.claim();
    }

    fn clear_transient(&self) {
        self.state.set(MagicMenuState::None);
        self.core.clear_gate();
    }
}

impl MenuTracker for MagicMenuTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.magic_menu_state() {
            Ok(state) if state.shows_sub_list() => {
                self.state.set(state);
                true
            }
            Ok(state) => {
                debug!(?state, "Magic menu left the spell list; releasing");
                self.reset();
                false
            }
            Err(e) => {
                warn!("Magic menu probe failed, releasing: {}", e);
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
        self.character.borrow_mut().take();
    }

    fn on_region_lost(&self) {
        // Character survives displacement; only closing the window clears it
        self.clear_transient();
    }
}
