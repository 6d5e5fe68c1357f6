//! Hook events - Typed payloads for every intercepted engine call
//!
//! The host adapter turns each intercepted invocation into one of these values
//! before handing it to `NarrationService::dispatch`. Replay traces serialize the
//! same type, so the JSON shape here is the trace format.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    ActionData, BattleUnit, CharacterSnapshot, EquipMenuState, HitType, ItemListKind,
    ItemMenuState, ListEntry, MagicMenuState, Region, SpellEntry, StatusDetails,
    StatusMenuState,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HookEvent {
    // ========================================================================
    // Field menus
    // ========================================================================
    ItemMenuStateChanged {
        state: ItemMenuState,
    },
    ItemSelectionChanged {
        list: ItemListKind,
        index: i32,
        entries: Vec<Option<ListEntry>>,
    },
    ItemTargetFocused {
        name: String,
        hp: i32,
        max_hp: i32,
    },
    MagicWindowOpened {
        character: CharacterSnapshot,
    },
    MagicMenuStateChanged {
        state: MagicMenuState,
    },
    MagicSpellFocused {
        index: i32,
        entries: Vec<Option<SpellEntry>>,
    },
    EquipMenuStateChanged {
        state: EquipMenuState,
    },
    EquipSlotFocused {
        slot: String,
        #[serde(default)]
        item: Option<String>,
    },
    EquipItemFocused {
        index: i32,
        entries: Vec<Option<ListEntry>>,
    },
    StatusMenuStateChanged {
        state: StatusMenuState,
    },
    StatusDetailsShown {
        details: StatusDetails,
    },
    PopupOpened {
        message: String,
    },
    PopupButtonFocused {
        label: String,
    },
    PopupClosed,
    ConfigOptionFocused {
        name: String,
        value: String,
    },
    ConfigValueChanged {
        name: String,
        value: String,
    },
    ConfigMenuClosed,
    EventItemSelectOpened,
    EventItemFocused {
        index: i32,
        entries: Vec<Option<ListEntry>>,
    },
    EventItemSelectClosed,
    /// Cursor moved somewhere no dedicated tracker owns
    GenericFocusChanged {
        text: String,
    },

    // ========================================================================
    // Battle
    // ========================================================================
    BattleCommandFocused {
        actor: String,
        command_mes_id: String,
    },
    BattleMagicOpened {
        caster: CharacterSnapshot,
    },
    BattleItemFocused {
        index: i32,
        entries: Vec<Option<ListEntry>>,
    },
    BattleMagicFocused {
        index: i32,
        entries: Vec<Option<SpellEntry>>,
    },
    BattleTargetFocused {
        target: BattleUnit,
    },
    DamageApplied {
        target: BattleUnit,
        value: i32,
        hit_type: HitType,
        is_recovery: bool,
    },
    ActionExecuted {
        actor: BattleUnit,
        action: ActionData,
    },
    ConditionAdded {
        target: BattleUnit,
        condition_id: i32,
    },
    BattleEnded,

    // ========================================================================
    // Field movement and transitions
    // ========================================================================
    TransportationChanged {
        mode_id: i32,
    },
    MoveStateChanged {
        mode_id: i32,
    },
    Boarded {
        mode_id: i32,
    },
    Disembarked,
    LandingZoneChanged {
        can_land: bool,
    },
    MapChanged {
        map_id: i32,
        title_mes_id: String,
    },
    ReturnedToTitle,
    FrameTick,
}

/// Payload-free tag for a `HookEvent`, used by the hook table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventKind {
    ItemMenuStateChanged,
    ItemSelectionChanged,
    ItemTargetFocused,
    MagicWindowOpened,
    MagicMenuStateChanged,
    MagicSpellFocused,
    EquipMenuStateChanged,
    EquipSlotFocused,
    EquipItemFocused,
    StatusMenuStateChanged,
    StatusDetailsShown,
    PopupOpened,
    PopupButtonFocused,
    PopupClosed,
    ConfigOptionFocused,
    ConfigValueChanged,
    ConfigMenuClosed,
    EventItemSelectOpened,
    EventItemFocused,
    EventItemSelectClosed,
    GenericFocusChanged,
    BattleCommandFocused,
    BattleMagicOpened,
    BattleItemFocused,
    BattleMagicFocused,
    BattleTargetFocused,
    DamageApplied,
    ActionExecuted,
    ConditionAdded,
    BattleEnded,
    TransportationChanged,
    MoveStateChanged,
    Boarded,
    Disembarked,
    LandingZoneChanged,
    MapChanged,
    ReturnedToTitle,
    FrameTick,
}

impl HookEvent {
    pub fn kind(&self) -> HookEventKind {
        match self {
            HookEvent::ItemMenuStateChanged { .. } => HookEventKind::ItemMenuStateChanged,
            HookEvent::ItemSelectionChanged { .. } => HookEventKind::ItemSelectionChanged,
            HookEvent::ItemTargetFocused { .. } => HookEventKind::ItemTargetFocused,
            HookEvent::MagicWindowOpened { .. } => HookEventKind::MagicWindowOpened,
            HookEvent::MagicMenuStateChanged { .. } => HookEventKind::MagicMenuStateChanged,
            HookEvent::MagicSpellFocused { .. } => HookEventKind::MagicSpellFocused,
            HookEvent::EquipMenuStateChanged { .. } => HookEventKind::EquipMenuStateChanged,
            HookEvent::EquipSlotFocused { .. } => HookEventKind::EquipSlotFocused,
            HookEvent::EquipItemFocused { .. } => HookEventKind::EquipItemFocused,
            HookEvent::StatusMenuStateChanged { .. } => HookEventKind::StatusMenuStateChanged,
            HookEvent::StatusDetailsShown { .. } => HookEventKind::StatusDetailsShown,
            HookEvent::PopupOpened { .. } => HookEventKind::PopupOpened,
            HookEvent::PopupButtonFocused { .. } => HookEventKind::PopupButtonFocused,
            HookEvent::PopupClosed => HookEventKind::PopupClosed,
            HookEvent::ConfigOptionFocused { .. } => HookEventKind::ConfigOptionFocused,
            HookEvent::ConfigValueChanged { .. } => HookEventKind::ConfigValueChanged,
            HookEvent::ConfigMenuClosed => HookEventKind::ConfigMenuClosed,
            HookEvent::EventItemSelectOpened => HookEventKind::EventItemSelectOpened,
            HookEvent::EventItemFocused { .. } => HookEventKind::EventItemFocused,
            HookEvent::EventItemSelectClosed => HookEventKind::EventItemSelectClosed,
            HookEvent::GenericFocusChanged { .. } => HookEventKind::GenericFocusChanged,
            HookEvent::BattleCommandFocused { .. } => HookEventKind::BattleCommandFocused,
            HookEvent::BattleMagicOpened { .. } => HookEventKind::BattleMagicOpened,
            HookEvent::BattleItemFocused { .. } => HookEventKind::BattleItemFocused,
            HookEvent::BattleMagicFocused { .. } => HookEventKind::BattleMagicFocused,
            HookEvent::BattleTargetFocused { .. } => HookEventKind::BattleTargetFocused,
            HookEvent::DamageApplied { .. } => HookEventKind::DamageApplied,
            HookEvent::ActionExecuted { .. } => HookEventKind::ActionExecuted,
            HookEvent::ConditionAdded { .. } => HookEventKind::ConditionAdded,
            HookEvent::BattleEnded => HookEventKind::BattleEnded,
            HookEvent::TransportationChanged { .. } => HookEventKind::TransportationChanged,
            HookEvent::MoveStateChanged { .. } => HookEventKind::MoveStateChanged,
            HookEvent::Boarded { .. } => HookEventKind::Boarded,
            HookEvent::Disembarked => HookEventKind::Disembarked,
            HookEvent::LandingZoneChanged { .. } => HookEventKind::LandingZoneChanged,
            HookEvent::MapChanged { .. } => HookEventKind::MapChanged,
            HookEvent::ReturnedToTitle => HookEventKind::ReturnedToTitle,
            HookEvent::FrameTick => HookEventKind::FrameTick,
        }
    }

    /// The region whose tracker owns this event, if any.
    ///
    /// A failed hook resets this region so it cannot stay claimed on bad data.
    pub fn region(&self) -> Option<Region> {
        match self.kind() {
            HookEventKind::ItemMenuStateChanged
            | HookEventKind::ItemSelectionChanged
            | HookEventKind::ItemTargetFocused => Some(Region::ItemMenu),
            HookEventKind::MagicWindowOpened
            | HookEventKind::MagicMenuStateChanged
            | HookEventKind::MagicSpellFocused => Some(Region::MagicMenu),
            HookEventKind::EquipMenuStateChanged
            | HookEventKind::EquipSlotFocused
            | HookEventKind::EquipItemFocused => Some(Region::EquipMenu),
            HookEventKind::StatusMenuStateChanged | HookEventKind::StatusDetailsShown => {
                Some(Region::StatusMenu)
            }
            HookEventKind::PopupOpened
            | HookEventKind::PopupButtonFocused
            | HookEventKind::PopupClosed => Some(Region::Popup),
            HookEventKind::ConfigOptionFocused
            | HookEventKind::ConfigValueChanged
            | HookEventKind::ConfigMenuClosed => Some(Region::ConfigMenu),
            HookEventKind::EventItemSelectOpened
            | HookEventKind::EventItemFocused
            | HookEventKind::EventItemSelectClosed => Some(Region::EventItemSelect),
            HookEventKind::BattleCommandFocused => Some(Region::BattleCommand),
            HookEventKind::BattleItemFocused => Some(Region::BattleItem),
            HookEventKind::BattleMagicOpened | HookEventKind::BattleMagicFocused => {
                Some(Region::BattleMagic)
            }
            HookEventKind::BattleTargetFocused => Some(Region::BattleTarget),
            HookEventKind::LandingZoneChanged => Some(Region::VehicleLanding),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

impl HookEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookEventKind::ItemMenuStateChanged => "item_menu_state_changed",
            HookEventKind::ItemSelectionChanged => "item_selection_changed",
            HookEventKind::ItemTargetFocused => "item_target_focused",
            HookEventKind::MagicWindowOpened => "magic_window_opened",
            HookEventKind::MagicMenuStateChanged => "magic_menu_state_changed",
            HookEventKind::MagicSpellFocused => "magic_spell_focused",
            HookEventKind::EquipMenuStateChanged => "equip_menu_state_changed",
            HookEventKind::EquipSlotFocused => "equip_slot_focused",
            HookEventKind::EquipItemFocused => "equip_item_focused",
            HookEventKind::StatusMenuStateChanged => "status_menu_state_changed",
            HookEventKind::StatusDetailsShown => "status_details_shown",
            HookEventKind::PopupOpened => "popup_opened",
            HookEventKind::PopupButtonFocused => "popup_button_focused",
            HookEventKind::PopupClosed => "popup_closed",
            HookEventKind::ConfigOptionFocused => "config_option_focused",
            HookEventKind::ConfigValueChanged => "config_value_changed",
            HookEventKind::ConfigMenuClosed => "config_menu_closed",
            HookEventKind::EventItemSelectOpened => "event_item_select_opened",
            HookEventKind::EventItemFocused => "event_item_focused",
            HookEventKind::EventItemSelectClosed => "event_item_select_closed",
            HookEventKind::GenericFocusChanged => "generic_focus_changed",
            HookEventKind::BattleCommandFocused => "battle_command_focused",
            HookEventKind::BattleMagicOpened => "battle_magic_opened",
            HookEventKind::BattleItemFocused => "battle_item_focused",
            HookEventKind::BattleMagicFocused => "battle_magic_focused",
            HookEventKind::BattleTargetFocused => "battle_target_focused",
            HookEventKind::DamageApplied => "damage_applied",
            HookEventKind::ActionExecuted => "action_executed",
            HookEventKind::ConditionAdded => "condition_added",
            HookEventKind::BattleEnded => "battle_ended",
            HookEventKind::TransportationChanged => "transportation_changed",
            HookEventKind::MoveStateChanged => "move_state_changed",
            HookEventKind::Boarded => "boarded",
            HookEventKind::Disembarked => "disembarked",
            HookEventKind::LandingZoneChanged => "landing_zone_changed",
            HookEventKind::MapChanged => "map_changed",
            HookEventKind::ReturnedToTitle => "returned_to_title",
            HookEventKind::FrameTick => "frame_tick",
        }
    }
}

impl std::fmt::Display for HookEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_json_shape() {
        let event: HookEvent = serde_json::from_str(
            r#"{"event":"item_selection_changed","list":"use","index":1,
                "entries":[null,{"name":"Potion","description":"Restores HP"}]}"#,
        )
        .expect("valid event json");

        assert_eq!(event.kind(), HookEventKind::ItemSelectionChanged);
        assert_eq!(event.region(), Some(Region::ItemMenu));
        assert_eq!(event.name(), "item_selection_changed");
    }

    #[test]
    fn test_unit_variants_parse() {
        let event: HookEvent =
            serde_json::from_str(r#"{"event":"frame_tick"}"#).expect("valid event json");
        assert_eq!(event, HookEvent::FrameTick);
        assert_eq!(event.region(), None);
    }

    #[test]
    fn test_landing_events_belong_to_overlay_region() {
        let event = HookEvent::LandingZoneChanged { can_land: true };
        assert_eq!(event.region(), Some(Region::VehicleLanding));
    }
}
