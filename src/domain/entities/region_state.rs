//! Region state entity - The narration flag and history for one region
//!
//! One `RegionState` exists per `Region` for the lifetime of the process. The
//! registry owns them; trackers only see them through registry calls.

use std::rc::Rc;

use chrono::{DateTime, Utc};

/// Callback run when a region is forcibly deactivated by someone else
pub type ResetHandler = Rc<dyn Fn()>;

#[derive(Default)]
pub struct RegionState {
    pub active: bool,
    pub last_announcement: Option<String>,
    pub last_announcement_time: Option<DateTime<Utc>>,
    pub reset_handlers: Vec<ResetHandler>,
}

impl RegionState {
    pub fn record_announcement(&mut self, text: &str, at: DateTime<Utc>) {
        self.last_announcement = Some(text.to_string());
        self.last_announcement_time = Some(at);
    }

    pub fn clear_history(&mut self) {
        self.last_announcement = None;
        self.last_announcement_time = None;
    }
}

impl std::fmt::Debug for RegionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionState")
            .field("active", &self.active)
            .field("last_announcement", &self.last_announcement)
            .field("last_announcement_time", &self.last_announcement_time)
            .field("reset_handlers", &self.reset_handlers.len())
            .finish()
    }
}
