//! Application services - Narration state and dispatch
//!
//! Everything here runs on the engine's dispatch thread. Services are shared by
//! `Rc` and keep their state in `Cell`/`RefCell`; no borrow is held across a
//! call that may re-enter (reset handlers, scheduler continuations, speech).

pub mod deduplicator;
pub mod hook_table;
pub mod narration_policy;
pub mod narration_service;
pub mod region_registry;
pub mod scheduler;
pub mod trackers;

pub use deduplicator::{DedupPayload, DedupPolicy, Deduplicator};
pub use hook_table::{default_bindings, install_all, HookBinding, HookReport};
pub use narration_policy::NarrationPolicy;
pub use narration_service::NarrationService;
pub use region_registry::RegionRegistry;
pub use scheduler::FrameScheduler;
pub use trackers::{MenuTracker, Trackers};
