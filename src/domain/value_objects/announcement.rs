//! Announcement value object

use serde::{Deserialize, Serialize};

/// A single utterance handed to the speech sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    /// Cancel in-flight speech and speak now (navigation), or queue behind it (battle log)
    pub interrupt: bool,
}

impl Announcement {
    pub fn interrupting(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            interrupt: true,
        }
    }

    pub fn queued(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            interrupt: false,
        }
    }
}

impl std::fmt::Display for Announcement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
