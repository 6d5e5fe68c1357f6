//! Game probe backed by controller memory
//!
//! The host adapter binds the base address of each live controller instance as
//! it appears and unbinds it when the instance is destroyed. An unbound menu
//! controller reads as closed; an unbound field player reads as "no player".

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::trace;

use super::offsets::{fields, structures};
use super::MemoryAccessor;
use crate::application::ports::outbound::{GameProbePort, ProbeError};
use crate::domain::value_objects::{
    BattleMenuState, EquipMenuState, ItemMenuState, MagicMenuState, StatusMenuState,
};

pub struct MemoryGameProbe {
    accessor: MemoryAccessor,
    bases: RefCell<HashMap<String, u64>>,
}

impl MemoryGameProbe {
    pub fn new(accessor: MemoryAccessor) -> Self {
        Self {
            accessor,
            bases: RefCell::new(HashMap::new()),
        }
    }

    pub fn accessor(&self) -> &MemoryAccessor {
        &self.accessor
    }

    /// Record where a controller instance lives. A zero base unbinds it.
    pub fn bind(&self, structure: &str, base: u64) {
        if base == 0 {
            self.unbind(structure);
            return;
        }
        trace!(structure, "Bound controller at {:#x}", base);
        self.bases
            .borrow_mut()
            .insert(structure.to_lowercase(), base);
    }

    pub fn unbind(&self, structure: &str) {
        self.bases.borrow_mut().remove(&structure.to_lowercase());
    }

    pub fn base(&self, structure: &str) -> Option<u64> {
        self.bases.borrow().get(&structure.to_lowercase()).copied()
    }

    fn read_state<T>(
        &self,
        structure: &'static str,
        closed: T,
        parse: fn(i32) -> Option<T>,
    ) -> Result<T, ProbeError> {
        let Some(base) = self.base(structure) else {
            return Ok(closed);
        };
        let raw = self.accessor.read_i32(base, structure, fields::STATE)?;
        parse(raw).ok_or(ProbeError::UnknownState {
            field: structure,
            raw,
        })
    }

    fn read_open(&self, structure: &str) -> Result<bool, ProbeError> {
        match self.base(structure) {
            Some(base) => Ok(self.accessor.read_flag(base, structure, fields::IS_OPEN)?),
            None => Ok(false),
        }
    }

    fn read_optional(&self, structure: &str, field: &str) -> Result<Option<i32>, ProbeError> {
        match self.base(structure) {
            Some(base) => Ok(Some(self.accessor.read_i32(base, structure, field)?)),
            None => Ok(None),
        }
    }
}

impl GameProbePort for MemoryGameProbe {
    fn item_menu_state(&self) -> Result<ItemMenuState, ProbeError> {
        self.read_state(structures::ITEM_WINDOW, ItemMenuState::None, ItemMenuState::from_raw)
    }

    fn magic_menu_state(&self) -> Result<MagicMenuState, ProbeError> {
        self.read_state(
            structures::ABILITY_WINDOW,
            MagicMenuState::None,
            MagicMenuState::from_raw,
        )
    }

    fn equip_menu_state(&self) -> Result<EquipMenuState, ProbeError> {
        self.read_state(
            structures::EQUIPMENT_WINDOW,
            EquipMenuState::None,
            EquipMenuState::from_raw,
        )
    }

    fn status_menu_state(&self) -> Result<StatusMenuState, ProbeError> {
        self.read_state(
            structures::STATUS_WINDOW,
            StatusMenuState::None,
            StatusMenuState::from_raw,
        )
    }

    fn battle_menu_state(&self) -> Result<BattleMenuState, ProbeError> {
        self.read_state(
            structures::BATTLE_MENU,
            BattleMenuState::Hidden,
            BattleMenuState::from_raw,
        )
    }

    fn is_popup_open(&self) -> Result<bool, ProbeError> {
        self.read_open(structures::COMMON_POPUP)
    }

    fn is_config_open(&self) -> Result<bool, ProbeError> {
        self.read_open(structures::CONFIG_WINDOW)
    }

    fn is_event_item_select_open(&self) -> Result<bool, ProbeError> {
        self.read_open(structures::EVENT_ITEM_SELECT)
    }

    fn transport_mode_id(&self) -> Result<Option<i32>, ProbeError> {
        self.read_optional(structures::FIELD_PLAYER, fields::TRANSPORT_ID)
    }

    fn current_map_id(&self) -> Result<Option<i32>, ProbeError> {
        self.read_optional(structures::MAP_MANAGER, fields::CURRENT_MAP_ID)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::infrastructure::memory::{OffsetTable, ReplayMemory};

    fn probe() -> (Rc<ReplayMemory>, MemoryGameProbe) {
        let memory = Rc::new(ReplayMemory::new());
        let accessor = MemoryAccessor::new(memory.clone(), OffsetTable::builtin());
        (memory, MemoryGameProbe::new(accessor))
    }

    #[test]
    fn test_unbound_controllers_read_as_closed() {
        let (_, probe) = probe();

        assert_eq!(probe.item_menu_state(), Ok(ItemMenuState::None));
        assert_eq!(probe.battle_menu_state(), Ok(BattleMenuState::Hidden));
        assert_eq!(probe.is_popup_open(), Ok(false));
        assert_eq!(probe.transport_mode_id(), Ok(None));
    }

    #[test]
    fn test_bound_controller_state() {
        let (memory, probe) = probe();
        probe.bind(structures::ITEM_WINDOW, 0x4000);
        memory.write(0x4000 + 0x28, &3i32.to_le_bytes());

        assert_eq!(probe.item_menu_state(), Ok(ItemMenuState::KeyItemList));

        probe.unbind(structures::ITEM_WINDOW);
        assert_eq!(probe.item_menu_state(), Ok(ItemMenuState::None));
    }

    #[test]
    fn test_unknown_raw_state_is_an_error() {
        let (memory, probe) = probe();
        probe.bind(structures::BATTLE_MENU, 0x8000);
        memory.write(0x8000 + 0x40, &99i32.to_le_bytes());

        assert_eq!(
            probe.battle_menu_state(),
            Err(ProbeError::UnknownState {
                field: structures::BATTLE_MENU,
                raw: 99
            })
        );
    }

    #[test]
    fn test_bound_but_unreadable_is_an_error() {
        let (_, probe) = probe();
        probe.bind(structures::COMMON_POPUP, 0x9000);

        assert!(matches!(probe.is_popup_open(), Err(ProbeError::Memory(_))));
    }
}
