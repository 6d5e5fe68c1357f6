//! Message table - Localization backed by a JSON id -> text map

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::application::ports::outbound::LocalizationPort;

#[derive(Debug, Clone, Default)]
pub struct MessageTable {
    messages: HashMap<String, String>,
}

impl MessageTable {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let messages: HashMap<String, String> =
            serde_json::from_str(json).context("Message table must be a JSON object of strings")?;
        Ok(Self::new(messages))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read message table {}", path.display()))?;
        let table = Self::from_json(&json)?;
        info!(messages = table.len(), path = %path.display(), "Message table loaded");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl LocalizationPort for MessageTable {
    fn get_message(&self, message_id: &str) -> Option<String> {
        self.messages.get(message_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_treats_blank_text_as_missing() {
        let table = MessageTable::from_json(
            r#"{"MES_CMD_FIGHT": "Fight", "MES_BLANK": "  "}"#,
        )
        .unwrap();

        assert_eq!(table.lookup("MES_CMD_FIGHT").as_deref(), Some("Fight"));
        assert_eq!(table.lookup("MES_BLANK"), None);
        assert_eq!(table.lookup("MES_UNKNOWN"), None);
        assert_eq!(table.lookup(""), None);
    }

    #[test]
    fn test_rejects_non_string_values() {
        assert!(MessageTable::from_json(r#"{"MES_CMD_FIGHT": 3}"#).is_err());
    }
}
