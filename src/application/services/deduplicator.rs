//! Deduplicator - Suppress repeated announcements per context
//!
//! Each context (a caller-chosen namespace string) remembers the last payload
//! that passed. Text payloads compare by equality, optionally with a repeat
//! window after which the same text may pass again. Identity payloads compare by
//! host object address and ignore time entirely.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::application::ports::outbound::ClockPort;
use crate::domain::value_objects::ObjectRef;

/// Well-known deduplication contexts
pub mod contexts {
    pub const GENERIC: &str = "generic";
    pub const BATTLE_ACTION: &str = "battle.action";
    pub const BATTLE_STATUS: &str = "battle.status";
    pub const BATTLE_TARGET: &str = "battle.target";
    pub const MAP_TITLE: &str = "field.map_title";

    /// Contexts cleared when a battle ends
    pub const BATTLE: [&str; 3] = [BATTLE_ACTION, BATTLE_STATUS, BATTLE_TARGET];
}

/// What a context remembers and compares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DedupPayload {
    Text(String),
    Identity(ObjectRef),
}

/// When an unchanged text payload may pass again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// Never, until a different payload arrives
    Equality,
    /// Once the window has elapsed since it last passed
    Window(Duration),
}

#[derive(Debug, Clone)]
struct DedupEntry {
    last_payload: DedupPayload,
    last_time: DateTime<Utc>,
}

pub struct Deduplicator {
    clock: Rc<dyn ClockPort>,
    policies: HashMap<String, DedupPolicy>,
    entries: RefCell<HashMap<String, DedupEntry>>,
}

impl Deduplicator {
    pub fn new(clock: Rc<dyn ClockPort>) -> Self {
        Self {
            clock,
            policies: HashMap::new(),
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// Set the policy for a context. Contexts without one use `Equality`.
    pub fn with_policy(mut self, context: &str, policy: DedupPolicy) -> Self {
        self.policies.insert(context.to_string(), policy);
        self
    }

    pub fn policy(&self, context: &str) -> DedupPolicy {
        self.policies
            .get(context)
            .copied()
            .unwrap_or(DedupPolicy::Equality)
    }

    /// Returns true and records the payload if it should be spoken
    pub fn should_announce(&self, context: &str, payload: DedupPayload) -> bool {
        let now = self.clock.now();
        let mut entries = self.entries.borrow_mut();

        let pass = match entries.get(context) {
            None => true,
            Some(entry) => match (&payload, &entry.last_payload) {
                (DedupPayload::Identity(current), DedupPayload::Identity(last)) => current != last,
                (current, last) if current != last => true,
                _ => match self.policy(context) {
                    DedupPolicy::Equality => false,
                    DedupPolicy::Window(window) => now - entry.last_time >= window,
                },
            },
        };

        if pass {
            entries.insert(
                context.to_string(),
                DedupEntry {
                    last_payload: payload,
                    last_time: now,
                },
            );
        } else {
            trace!(context, "Suppressed duplicate announcement");
        }
        pass
    }

    pub fn should_announce_text(&self, context: &str, text: &str) -> bool {
        self.should_announce(context, DedupPayload::Text(text.to_string()))
    }

    pub fn should_announce_object(&self, context: &str, object: ObjectRef) -> bool {
        self.should_announce(context, DedupPayload::Identity(object))
    }

    /// Forget the named contexts. Unknown contexts are ignored.
    pub fn reset(&self, contexts: &[&str]) {
        let mut entries = self.entries.borrow_mut();
        for context in contexts {
            entries.remove(*context);
        }
    }

    pub fn reset_all(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::ManualClock;

    fn dedup_with_clock() -> (Deduplicator, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        let dedup = Deduplicator::new(clock.clone())
            .with_policy("menu", DedupPolicy::Window(Duration::milliseconds(100)));
        (dedup, clock)
    }

    #[test]
    fn test_equality_context_blocks_immediate_repeat() {
        let (dedup, clock) = dedup_with_clock();

        assert!(dedup.should_announce_text("status", "X"));
        assert!(!dedup.should_announce_text("status", "X"));

        clock.advance_ms(60_000);
        assert!(!dedup.should_announce_text("status", "X"));
        assert!(dedup.should_announce_text("status", "Y"));
        assert!(dedup.should_announce_text("status", "X"));
    }

    #[test]
    fn test_window_context_allows_repeat_after_interval() {
        let (dedup, clock) = dedup_with_clock();

        assert!(dedup.should_announce_text("menu", "Potion"));
        clock.advance_ms(50);
        assert!(!dedup.should_announce_text("menu", "Potion"));
        clock.advance_ms(50);
        assert!(dedup.should_announce_text("menu", "Potion"));
    }

    #[test]
    fn test_identity_payloads_compare_by_object() {
        let (dedup, clock) = dedup_with_clock();
        let goblin_a = ObjectRef::new(0x1000);
        let goblin_b = ObjectRef::new(0x2000);

        assert!(dedup.should_announce_object("actions", goblin_a));
        assert!(dedup.should_announce_object("actions", goblin_b));
        assert!(!dedup.should_announce_object("actions", goblin_b));

        clock.advance_ms(60_000);
        assert!(!dedup.should_announce_object("actions", goblin_b));
    }

    #[test]
    fn test_contexts_are_independent() {
        let (dedup, _clock) = dedup_with_clock();

        assert!(dedup.should_announce_text("a", "same"));
        assert!(dedup.should_announce_text("b", "same"));
        assert!(!dedup.should_announce_text("a", "same"));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (dedup, _clock) = dedup_with_clock();

        assert!(dedup.should_announce_text("status", "Poison"));
        dedup.reset(&["status"]);
        dedup.reset(&["status", "never_used"]);
        assert!(dedup.should_announce_text("status", "Poison"));

        dedup.reset_all();
        assert!(dedup.should_announce_text("status", "Poison"));
    }
}
