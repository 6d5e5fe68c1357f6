//! Ports - Boundaries between the narration engine and the host process

pub mod outbound;
