//! Game probe port - Live reads of menu and field state
//!
//! Trackers use this to re-validate `active = true` before suppressing anything.
//! A menu that closed without its tracker being told shows up here as `None`.

use crate::application::ports::outbound::MemoryError;
use crate::domain::value_objects::{
    BattleMenuState, EquipMenuState, ItemMenuState, MagicMenuState, StatusMenuState,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("Unknown {field} value: {raw}")]
    UnknownState { field: &'static str, raw: i32 },

    #[error("Memory read failed: {0}")]
    Memory(#[from] MemoryError),
}

pub trait GameProbePort {
    fn item_menu_state(&self) -> Result<ItemMenuState, ProbeError>;
    fn magic_menu_state(&self) -> Result<MagicMenuState, ProbeError>;
    fn equip_menu_state(&self) -> Result<EquipMenuState, ProbeError>;
    fn status_menu_state(&self) -> Result<StatusMenuState, ProbeError>;
    fn battle_menu_state(&self) -> Result<BattleMenuState, ProbeError>;
    fn is_popup_open(&self) -> Result<bool, ProbeError>;
    fn is_config_open(&self) -> Result<bool, ProbeError>;
    fn is_event_item_select_open(&self) -> Result<bool, ProbeError>;

    /// Raw transport id of the field player; `None` once the player object is gone
    fn transport_mode_id(&self) -> Result<Option<i32>, ProbeError>;

    /// Current map id; `None` while no map is loaded
    fn current_map_id(&self) -> Result<Option<i32>, ProbeError>;
}
