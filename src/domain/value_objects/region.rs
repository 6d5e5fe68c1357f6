//! Narration regions
//!
//! A region is a UI surface that can own the speech channel. Most regions are
//! mutually exclusive: two menus never legitimately narrate at the same time, so
//! claiming one sweeps the others (see `RegionRegistry::set_active_exclusive`).

use serde::{Deserialize, Serialize};

/// A narratable UI surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    BattleCommand,
    BattleItem,
    BattleMagic,
    BattleTarget,
    ItemMenu,
    MagicMenu,
    EquipMenu,
    StatusMenu,
    Popup,
    ConfigMenu,
    EventItemSelect,
    /// Airship landing-zone overlay; narrates alongside the field, never swept
    VehicleLanding,
}

impl Region {
    pub const ALL: [Region; 12] = [
        Region::BattleCommand,
        Region::BattleItem,
        Region::BattleMagic,
        Region::BattleTarget,
        Region::ItemMenu,
        Region::MagicMenu,
        Region::EquipMenu,
        Region::StatusMenu,
        Region::Popup,
        Region::ConfigMenu,
        Region::EventItemSelect,
        Region::VehicleLanding,
    ];

    /// Whether this region takes part in the exclusive-activation sweep
    pub fn is_exclusive(self) -> bool {
        !matches!(self, Region::VehicleLanding)
    }

    pub fn is_battle(self) -> bool {
        matches!(
            self,
            Region::BattleCommand | Region::BattleItem | Region::BattleMagic | Region::BattleTarget
        )
    }

    pub fn is_field_menu(self) -> bool {
        matches!(
            self,
            Region::ItemMenu
                | Region::MagicMenu
                | Region::EquipMenu
                | Region::StatusMenu
                | Region::ConfigMenu
                | Region::EventItemSelect
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Region::BattleCommand => "battle_command",
            Region::BattleItem => "battle_item",
            Region::BattleMagic => "battle_magic",
            Region::BattleTarget => "battle_target",
            Region::ItemMenu => "item_menu",
            Region::MagicMenu => "magic_menu",
            Region::EquipMenu => "equip_menu",
            Region::StatusMenu => "status_menu",
            Region::Popup => "popup",
            Region::ConfigMenu => "config_menu",
            Region::EventItemSelect => "event_item_select",
            Region::VehicleLanding => "vehicle_landing",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Region {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.as_str() == wanted)
            .ok_or_else(|| anyhow::anyhow!("Invalid region: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_round_trips_through_name() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().ok(), Some(region));
        }
        assert!("inventory".parse::<Region>().is_err());
    }

    #[test]
    fn test_landing_overlay_is_outside_exclusive_group() {
        assert!(!Region::VehicleLanding.is_exclusive());
        assert!(Region::Popup.is_exclusive());
        assert!(Region::ConfigMenu.is_exclusive());
        assert_eq!(Region::ALL.iter().filter(|r| r.is_exclusive()).count(), 11);
    }
}
