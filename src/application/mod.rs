//! Application layer - Hook callbacks, trackers and arbitration
//!
//! This layer contains:
//! - Ports: what the narration engine needs from the host (speech, memory,
//!   localization, hook installation, live UI probing, time)
//! - Services: region registry, deduplicator, trackers, scheduler, dispatch
//! - Hooks: one callback per observed engine event

pub mod hooks;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
