//! Structure offset table
//!
//! Field offsets are keyed by `(structure, field)` and looked up by name, so a
//! game update that moves a field only touches data. The shipped table is
//! layered under an optional file and `NARRATOR_OFFSET__<STRUCTURE>__<FIELD>`
//! environment overrides.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use tracing::debug;

use crate::application::ports::outbound::MemoryError;

/// Structure names used by the probe
pub mod structures {
    pub const ITEM_WINDOW: &str = "item_window";
    pub const ABILITY_WINDOW: &str = "ability_window";
    pub const EQUIPMENT_WINDOW: &str = "equipment_window";
    pub const STATUS_WINDOW: &str = "status_window";
    pub const BATTLE_MENU: &str = "battle_menu";
    pub const COMMON_POPUP: &str = "common_popup";
    pub const CONFIG_WINDOW: &str = "config_window";
    pub const EVENT_ITEM_SELECT: &str = "event_item_select";
    pub const FIELD_PLAYER: &str = "field_player";
    pub const MAP_MANAGER: &str = "map_manager";
}

/// Field names used by the probe
pub mod fields {
    pub const STATE: &str = "state";
    pub const IS_OPEN: &str = "is_open";
    pub const TRANSPORT_ID: &str = "transport_id";
    pub const CURRENT_MAP_ID: &str = "current_map_id";
}

const BUILTIN: &[(&str, &str, u64)] = &[
    (structures::ITEM_WINDOW, fields::STATE, 0x28),
    (structures::ABILITY_WINDOW, fields::STATE, 0x30),
    (structures::EQUIPMENT_WINDOW, fields::STATE, 0x28),
    (structures::STATUS_WINDOW, fields::STATE, 0x28),
    (structures::BATTLE_MENU, fields::STATE, 0x40),
    (structures::COMMON_POPUP, fields::IS_OPEN, 0x1c),
    (structures::CONFIG_WINDOW, fields::IS_OPEN, 0x1c),
    (structures::EVENT_ITEM_SELECT, fields::IS_OPEN, 0x20),
    (structures::FIELD_PLAYER, fields::TRANSPORT_ID, 0x58),
    (structures::MAP_MANAGER, fields::CURRENT_MAP_ID, 0x18),
];

type NestedOffsets = HashMap<String, HashMap<String, u64>>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetTable {
    offsets: HashMap<(String, String), u64>,
}

impl OffsetTable {
    /// The table compiled into the binary
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for (structure, field, offset) in BUILTIN {
            table.insert(structure, field, *offset);
        }
        table
    }

    /// Builtin table, then `path` (TOML or JSON by extension), then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&Self::builtin().nested())
            .context("Failed to seed offset defaults")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix("NARRATOR_OFFSET")
                .separator("__")
                .try_parsing(true),
        );

        let nested: NestedOffsets = builder
            .build()
            .context("Failed to load offset table")?
            .try_deserialize()
            .context("Offset table must map structure -> field -> integer offset")?;

        let mut table = Self::default();
        for (structure, fields) in &nested {
            for (field, offset) in fields {
                table.insert(structure, field, *offset);
            }
        }
        debug!(entries = table.len(), "Offset table loaded");
        Ok(table)
    }

    pub fn insert(&mut self, structure: &str, field: &str, offset: u64) {
        self.offsets.insert(key(structure, field), offset);
    }

    pub fn offset(&self, structure: &str, field: &str) -> Result<u64, MemoryError> {
        self.offsets
            .get(&key(structure, field))
            .copied()
            .ok_or_else(|| MemoryError::UnknownField {
                structure: structure.to_string(),
                field: field.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn nested(&self) -> NestedOffsets {
        let mut nested = NestedOffsets::new();
        for ((structure, field), offset) in &self.offsets {
            nested
                .entry(structure.clone())
                .or_default()
                .insert(field.clone(), *offset);
        }
        nested
    }
}

// Environment keys arrive lowercased, so lookups are case-insensitive
fn key(structure: &str, field: &str) -> (String, String) {
    (structure.to_lowercase(), field.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        let table = OffsetTable::builtin();

        assert_eq!(table.offset("item_window", "state"), Ok(0x28));
        assert_eq!(table.offset("Item_Window", "STATE"), Ok(0x28));
        assert!(matches!(
            table.offset("item_window", "cursor"),
            Err(MemoryError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_file_overrides_builtin() {
        let path = std::env::temp_dir().join(format!("offsets-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[item_window]\nstate = 64\n\n[battle_menu]\ncursor = 16\n",
        )
        .unwrap();

        let table = OffsetTable::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.offset(structures::ITEM_WINDOW, fields::STATE), Ok(64));
        assert_eq!(table.offset(structures::BATTLE_MENU, "cursor"), Ok(16));
        assert_eq!(table.offset(structures::FIELD_PLAYER, fields::TRANSPORT_ID), Ok(0x58));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("offsets-that-do-not-exist.toml");

        assert!(OffsetTable::load(Some(&path)).is_err());
    }
}
