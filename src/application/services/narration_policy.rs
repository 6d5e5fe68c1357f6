//! Narration arbitration policy
//!
//! Decides whether the generic focus narrator may speak, and owns the
//! cross-tracker resets that happen on scene boundaries (battle end, map
//! change, return to title).

use std::rc::Rc;

use tracing::{debug, info};

use crate::application::services::deduplicator::contexts;
use crate::application::services::{Deduplicator, MenuTracker, RegionRegistry, Trackers};
use crate::domain::value_objects::Region;

pub struct NarrationPolicy {
    registry: Rc<RegionRegistry>,
    dedup: Rc<Deduplicator>,
    trackers: Rc<Trackers>,
}

impl NarrationPolicy {
    pub fn new(
        registry: Rc<RegionRegistry>,
        dedup: Rc<Deduplicator>,
        trackers: Rc<Trackers>,
    ) -> Self {
        Self {
            registry,
            dedup,
            trackers,
        }
    }

    /// First region that currently owns the speech channel.
    ///
    /// Every tracker re-validates against live state here, so a region left
    /// active by a missed close event is released instead of muting forever.
    pub fn suppressing_region(&self) -> Option<Region> {
        self.trackers
            .menu_trackers()
            .into_iter()
            .find(|tracker| tracker.should_suppress())
            .map(|tracker| tracker.region())
    }

    /// Whether the generic narrator may speak `text` right now
    pub fn allows_generic(&self, text: &str) -> bool {
        if let Some(region) = self.suppressing_region() {
            debug!(%region, "Generic narration suppressed");
            return false;
        }
        self.dedup.should_announce_text(contexts::GENERIC, text)
    }

    pub fn reset_region(&self, region: Region) {
        self.trackers.by_region(region).reset();
    }

    pub fn on_battle_end(&self) {
        info!("Battle ended; clearing battle narration state");
        for tracker in self.trackers.menu_trackers() {
            if tracker.region().is_battle() {
                tracker.reset();
            }
        }
        self.dedup.reset(&contexts::BATTLE);
        self.trackers.battle_command.clear_flee();
    }

    pub fn on_map_changed(&self) {
        for tracker in self.trackers.menu_trackers() {
            if tracker.region().is_field_menu() {
                tracker.reset();
            }
        }
        self.trackers.landing.reset();
    }

    pub fn on_return_to_title(&self) {
        info!("Returned to title; resetting all narration state");
        self.registry.reset_all();
        for tracker in self.trackers.menu_trackers() {
            tracker.reset();
        }
        self.dedup.reset_all();
        self.trackers.movement.reset();
        self.trackers.battle_command.clear_flee();
    }
}
