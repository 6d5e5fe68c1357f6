//! Domain events - Engine calls observed through hooks

pub mod hook_events;

pub use hook_events::{HookEvent, HookEventKind};
