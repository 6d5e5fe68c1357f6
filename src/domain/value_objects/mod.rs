//! Value objects - Immutable objects defined by their attributes

mod announcement;
mod battle;
mod ids;
mod menu;
mod region;
mod settings;
mod transport;

pub use announcement::Announcement;
pub use battle::{ActionData, BattleUnit, ConditionInfo, HitType};
pub use ids::*;
pub use menu::{
    BattleMenuState, CharacterSnapshot, EquipMenuState, ItemListKind, ItemMenuState, ListEntry,
    MagicMenuState, SpellCharge, SpellEntry, StatusDetails, StatusMenuState,
};
pub use region::Region;
pub use settings::NarratorSettings;
pub use transport::TransportMode;
