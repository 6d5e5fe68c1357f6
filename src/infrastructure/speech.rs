//! Console speech sink for the replay harness
//!
//! Interrupting utterances are prefixed with `!`, queued ones with `+`, so a
//! replay transcript shows how a screen reader would have treated each line.

use std::io::Write;

use tracing::warn;

use crate::application::ports::outbound::SpeechPort;

#[derive(Debug, Default)]
pub struct ConsoleSpeech;

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechPort for ConsoleSpeech {
    fn speak(&self, text: &str, interrupt: bool) {
        let marker = if interrupt { '!' } else { '+' };
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{} {}", marker, text) {
            warn!("Failed to write speech output: {}", e);
        }
    }
}
