//! Application configuration

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::value_objects::NarratorSettings;

/// Replay harness configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// JSON-lines trace to replay
    pub trace_path: PathBuf,
    /// JSON message table; without it every lookup misses
    pub messages_path: Option<PathBuf>,
    /// Offset table file layered over the builtin table
    pub offsets_path: Option<PathBuf>,
    /// Wall-clock pacing of `frame` records
    pub frame_interval_ms: u64,
    /// Hook targets the replay installer refuses, as `Type::Method` or `Method`
    pub disabled_hooks: Vec<String>,
    pub settings: NarratorSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            trace_path: env::var("NARRATOR_TRACE")
                .unwrap_or_else(|_| "trace.jsonl".to_string())
                .into(),
            messages_path: env::var("NARRATOR_MESSAGES").ok().map(PathBuf::from),
            offsets_path: env::var("NARRATOR_OFFSETS").ok().map(PathBuf::from),
            frame_interval_ms: env::var("NARRATOR_FRAME_INTERVAL_MS")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .context("NARRATOR_FRAME_INTERVAL_MS must be a whole number of milliseconds")?,
            disabled_hooks: env::var("NARRATOR_DISABLED_HOOKS")
                .map(|list| parse_list(&list))
                .unwrap_or_default(),
            settings: NarratorSettings::from_env(),
        })
    }

    /// A trace path given on the command line wins over the environment
    pub fn with_trace_arg(mut self, arg: Option<String>) -> Self {
        if let Some(path) = arg {
            self.trace_path = path.into();
        }
        self
    }
}

fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_hook_list_skips_blanks() {
        assert_eq!(
            parse_list(" GetOn , ,Last.Map.FieldPlayer::GetOff,"),
            vec!["GetOn".to_string(), "Last.Map.FieldPlayer::GetOff".to_string()]
        );
        assert!(parse_list("").is_empty());
    }
}
