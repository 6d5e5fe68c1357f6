//! Speech port - The text-to-speech sink

/// Port for handing finished announcements to the speech engine
///
/// Fire-and-forget: there is no acknowledgement of completion and nothing the
/// narration engine does depends on what the sink does with the text.
pub trait SpeechPort {
    /// Speak `text`. With `interrupt` set, in-flight speech is cancelled first;
    /// otherwise the text is queued behind it.
    fn speak(&self, text: &str, interrupt: bool);
}
