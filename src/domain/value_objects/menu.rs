//! Menu sub-states and list payloads
//!
//! Sub-state enums mirror the state-machine fields the engine keeps on each menu
//! controller. `from_raw` maps the raw integer read from memory.

use serde::{Deserialize, Serialize};

use super::ObjectRef;

/// Field item menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMenuState {
    None,
    CommandBar,
    UseList,
    KeyItemList,
    SortList,
    TargetSelect,
}

impl ItemMenuState {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ItemMenuState::None),
            1 => Some(ItemMenuState::CommandBar),
            2 => Some(ItemMenuState::UseList),
            3 => Some(ItemMenuState::KeyItemList),
            4 => Some(ItemMenuState::SortList),
            5 => Some(ItemMenuState::TargetSelect),
            _ => None,
        }
    }

    /// A list or target cursor owns narration in this state
    pub fn shows_sub_list(self) -> bool {
        !matches!(self, ItemMenuState::None | ItemMenuState::CommandBar)
    }
}

/// Which item list a selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemListKind {
    Use,
    KeyItem,
    Sort,
}

impl From<ItemListKind> for ItemMenuState {
    fn from(kind: ItemListKind) -> Self {
        match kind {
            ItemListKind::Use => ItemMenuState::UseList,
            ItemListKind::KeyItem => ItemMenuState::KeyItemList,
            ItemListKind::Sort => ItemMenuState::SortList,
        }
    }
}

/// Field magic menu (Use / Remove / Exchange / Memorize command bar, then spells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicMenuState {
    None,
    CommandBar,
    SpellList,
    TargetSelect,
}

impl MagicMenuState {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(MagicMenuState::None),
            1 => Some(MagicMenuState::CommandBar),
            2 => Some(MagicMenuState::SpellList),
            3 => Some(MagicMenuState::TargetSelect),
            _ => None,
        }
    }

    pub fn shows_sub_list(self) -> bool {
        matches!(self, MagicMenuState::SpellList | MagicMenuState::TargetSelect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipMenuState {
    None,
    SlotList,
    ItemList,
}

impl EquipMenuState {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(EquipMenuState::None),
            1 => Some(EquipMenuState::SlotList),
            2 => Some(EquipMenuState::ItemList),
            _ => None,
        }
    }

    pub fn shows_sub_list(self) -> bool {
        !matches!(self, EquipMenuState::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusMenuState {
    None,
    CharacterSelect,
    Details,
}

impl StatusMenuState {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(StatusMenuState::None),
            1 => Some(StatusMenuState::CharacterSelect),
            2 => Some(StatusMenuState::Details),
            _ => None,
        }
    }
}

/// Which battle window is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleMenuState {
    Hidden,
    CommandBar,
    ItemList,
    MagicList,
    TargetSelect,
}

impl BattleMenuState {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(BattleMenuState::Hidden),
            1 => Some(BattleMenuState::CommandBar),
            2 => Some(BattleMenuState::ItemList),
            3 => Some(BattleMenuState::MagicList),
            4 => Some(BattleMenuState::TargetSelect),
            _ => None,
        }
    }
}

/// One row of an item-style list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One row of a spell list. `level` is the spell level, 1 through 8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level: u8,
}

/// Remaining and maximum casts for one spell level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCharge {
    pub current: u8,
    pub max: u8,
}

/// The character whose spells are listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub object: ObjectRef,
    pub name: String,
    /// Indexed by spell level minus one
    #[serde(default)]
    pub charges: Vec<SpellCharge>,
}

impl CharacterSnapshot {
    pub fn charge_for_level(&self, level: u8) -> Option<SpellCharge> {
        let index = usize::from(level).checked_sub(1)?;
        self.charges.get(index).copied()
    }
}

/// Status screen summary for one character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetails {
    pub name: String,
    #[serde(default)]
    pub job: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_command_bar_is_not_a_sub_list() {
        assert!(!ItemMenuState::None.shows_sub_list());
        assert!(!ItemMenuState::CommandBar.shows_sub_list());
        assert!(ItemMenuState::UseList.shows_sub_list());
        assert!(ItemMenuState::TargetSelect.shows_sub_list());
        assert_eq!(ItemMenuState::from_raw(9), None);
    }

    #[test]
    fn test_charge_lookup_by_level() {
        let character = CharacterSnapshot {
            object: ObjectRef::new(0x10),
            name: "Luneth".to_string(),
            charges: vec![
                SpellCharge { current: 3, max: 5 },
                SpellCharge { current: 0, max: 2 },
            ],
        };
        assert_eq!(character.charge_for_level(1), Some(SpellCharge { current: 3, max: 5 }));
        assert_eq!(character.charge_for_level(2), Some(SpellCharge { current: 0, max: 2 }));
        assert_eq!(character.charge_for_level(0), None);
        assert_eq!(character.charge_for_level(8), None);
    }
}
