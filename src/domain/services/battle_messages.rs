//! Battle log phrasing
//!
//! Pure formatting for damage, actions and flee detection. Name resolution and
//! deduplication happen in the battle hooks; this module only turns resolved
//! strings into sentences.

use crate::domain::value_objects::HitType;

/// Localized command names that mean "run away"
const FLEE_WORDS: [&str; 3] = ["flee", "escape", "run"];

/// `"{name}: Miss"`, `"{name}: Recovered {n} HP"` or `"{name}: {n} damage"`
pub fn format_damage(name: &str, value: i32, hit_type: HitType, is_recovery: bool) -> String {
    if hit_type == HitType::Miss || value == 0 {
        format!("{}: Miss", name)
    } else if is_recovery {
        format!("{}: Recovered {} HP", name, value)
    } else {
        format!("{}: {} damage", name, value)
    }
}

/// True when a command is the escape command, judged by message id or localized text
pub fn is_flee_command(command_mes_id: Option<&str>, localized: Option<&str>) -> bool {
    let by_id = command_mes_id
        .map(|id| id.to_ascii_uppercase().contains("ESCAPE"))
        .unwrap_or(false);
    let by_text = localized
        .map(|text| {
            let text = text.trim();
            FLEE_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word))
        })
        .unwrap_or(false);
    by_id || by_text
}

/// How an action reads once its label is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPhrase {
    Attacks,
    Defends,
    UsesItem,
    Flees,
    Other(String),
}

impl ActionPhrase {
    /// Classify the resolved action label (item, ability or command name)
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "attack" | "fight" => ActionPhrase::Attacks,
            "defend" | "guard" => ActionPhrase::Defends,
            "item" | "items" => ActionPhrase::UsesItem,
            _ => ActionPhrase::Other(label.trim().to_string()),
        }
    }

    pub fn sentence(&self, actor: &str) -> String {
        match self {
            ActionPhrase::Attacks => format!("{} attacks", actor),
            ActionPhrase::Defends => format!("{} defends", actor),
            ActionPhrase::UsesItem => format!("{} uses item", actor),
            ActionPhrase::Flees => format!("{} flees", actor),
            ActionPhrase::Other(action) => format!("{}, {}", actor, action),
        }
    }
}
