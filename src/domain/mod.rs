//! Domain layer - Narration vocabulary with no host or I/O dependencies
//!
//! This layer contains:
//! - Value Objects: regions, announcements, transport modes, menu sub-states
//! - Entities: per-region narration state
//! - Events: typed hook events delivered by the host adapter
//! - Domain Services: markup stripping and battle log phrasing

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;
