//! Infrastructure layer - Adapters behind the outbound ports
//!
//! This layer contains:
//! - Memory: offset table, typed reads and the memory-backed game probe
//! - Localization: JSON message table
//! - Installer and Trace: replay stand-ins for the host's hooking runtime
//! - Config and State: environment configuration and the composition root

pub mod clock;
pub mod config;
pub mod installer;
pub mod localization;
pub mod memory;
pub mod speech;
pub mod state;
pub mod trace;
