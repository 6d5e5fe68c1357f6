use serde::{Deserialize, Serialize};

/// Narration tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorSettings {
    // Repeat windows
    pub menu_repeat_window_ms: i64,
    pub battle_command_window_ms: i64,
    pub generic_repeat_window_ms: i64,

    // Deferred checks, in frames
    pub map_title_delay_frames: u64,
    pub move_state_recheck_frames: u64,
    pub flee_suppress_frames: u64,
}

impl Default for NarratorSettings {
    fn default() -> Self {
        Self {
            menu_repeat_window_ms: 100,
            battle_command_window_ms: 1500,
            generic_repeat_window_ms: 100,
            map_title_delay_frames: 30,
            move_state_recheck_frames: 10,
            flee_suppress_frames: 180,
        }
    }
}

impl NarratorSettings {
    /// Load from environment variables, using defaults for missing values
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            menu_repeat_window_ms: env_or("NARRATOR_MENU_REPEAT_MS", defaults.menu_repeat_window_ms),
            battle_command_window_ms: env_or("NARRATOR_BATTLE_COMMAND_REPEAT_MS", defaults.battle_command_window_ms),
            generic_repeat_window_ms: env_or("NARRATOR_GENERIC_REPEAT_MS", defaults.generic_repeat_window_ms),
            map_title_delay_frames: env_or("NARRATOR_MAP_TITLE_DELAY_FRAMES", defaults.map_title_delay_frames),
            move_state_recheck_frames: env_or("NARRATOR_MOVE_RECHECK_FRAMES", defaults.move_state_recheck_frames),
            flee_suppress_frames: env_or("NARRATOR_FLEE_SUPPRESS_FRAMES", defaults.flee_suppress_frames),
        }
    }

    pub fn menu_repeat_window(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.menu_repeat_window_ms)
    }

    pub fn battle_command_window(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.battle_command_window_ms)
    }

    pub fn generic_repeat_window(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.generic_repeat_window_ms)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
