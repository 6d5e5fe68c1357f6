//! Localization port - Message id lookup

/// Port for resolving engine message ids to display text
pub trait LocalizationPort {
    /// Returns `None` for unknown ids. Callers treat every lookup as fallible.
    fn get_message(&self, message_id: &str) -> Option<String>;

    /// Lookup that also treats an empty string as missing
    fn lookup(&self, message_id: &str) -> Option<String> {
        if message_id.trim().is_empty() {
            return None;
        }
        self.get_message(message_id)
            .filter(|text| !text.trim().is_empty())
    }
}
