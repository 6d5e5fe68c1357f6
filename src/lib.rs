//! FFPR Narrator - Screen reader narration for a pixel remaster
//!
//! The engine turns intercepted menu, battle and field calls into speech while
//! keeping overlapping hooks from talking over each other. The host adapter
//! feeds `HookEvent`s into `NarrationService`; everything it needs from the
//! game process comes in through the outbound ports.

pub mod application;
pub mod domain;
pub mod infrastructure;
