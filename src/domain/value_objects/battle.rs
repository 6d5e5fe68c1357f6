//! Battle data captured from hook arguments

use serde::{Deserialize, Serialize};

use super::ObjectRef;

/// How an attack connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitType {
    Normal,
    Critical,
    Miss,
}

/// A condition the engine has confirmed on a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionInfo {
    pub id: i32,
    /// Message id of the display name. Empty or "none" marks an internal condition.
    pub mes_id: String,
}

impl ConditionInfo {
    pub fn is_hidden(&self) -> bool {
        let mes_id = self.mes_id.trim();
        mes_id.is_empty() || mes_id.eq_ignore_ascii_case("none")
    }
}

/// A combatant. Players carry their name directly, enemies carry a message id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleUnit {
    Player {
        object: ObjectRef,
        name: String,
        hp: i32,
        max_hp: i32,
        #[serde(default)]
        conditions: Vec<ConditionInfo>,
    },
    Enemy {
        object: ObjectRef,
        mes_id_name: String,
        hp: i32,
        max_hp: i32,
        #[serde(default)]
        conditions: Vec<ConditionInfo>,
    },
}

impl BattleUnit {
    pub fn object(&self) -> ObjectRef {
        match self {
            BattleUnit::Player { object, .. } | BattleUnit::Enemy { object, .. } => *object,
        }
    }

    pub fn conditions(&self) -> &[ConditionInfo] {
        match self {
            BattleUnit::Player { conditions, .. } | BattleUnit::Enemy { conditions, .. } => {
                conditions
            }
        }
    }
}

/// The action a unit performed this turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    /// Engine object backing this action, used for identity deduplication
    pub object: ObjectRef,
    #[serde(default)]
    pub item_mes_id: Option<String>,
    #[serde(default)]
    pub ability_mes_id: Option<String>,
    #[serde(default)]
    pub command_mes_id: Option<String>,
}
