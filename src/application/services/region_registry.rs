//! Region Registry - Single authority over which region owns narration
//!
//! Hooks race during menu transitions: a child list can report a selection
//! before its parent container finishes closing, and the other way round. Every
//! claim goes through `set_active_exclusive`, which leaves exactly one member of
//! the exclusive group active and tells every displaced region to drop its
//! transient state.
//!
//! Reset handlers run after the registry has committed its own changes and
//! released its borrow, so a handler (or anything it triggers) may call back
//! into the registry and will see a consistent view.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::entities::{RegionState, ResetHandler};
use crate::domain::value_objects::Region;

#[derive(Default)]
pub struct RegionRegistry {
    states: RefCell<HashMap<Region, RegionState>>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, region: Region) -> bool {
        self.states
            .borrow()
            .get(&region)
            .map(|state| state.active)
            .unwrap_or(false)
    }

    /// Plain set with no effect on other regions
    pub fn set_active(&self, region: Region, active: bool) {
        self.states.borrow_mut().entry(region).or_default().active = active;
    }

    /// Activate `region` and deactivate every other active member of the
    /// exclusive group, running each displaced region's reset handlers once.
    pub fn set_active_exclusive(&self, region: Region) {
        let displaced = {
            let mut states = self.states.borrow_mut();
            let mut displaced: Vec<(Region, Vec<ResetHandler>)> = Vec::new();
            if region.is_exclusive() {
                for (other, state) in states.iter_mut() {
                    if *other != region && other.is_exclusive() && state.active {
                        state.active = false;
                        state.clear_history();
                        displaced.push((*other, state.reset_handlers.clone()));
                    }
                }
            }
            states.entry(region).or_default().active = true;
            displaced
        };

        for (other, handlers) in displaced {
            debug!(claimed = %region, displaced = %other, "Region displaced");
            for handler in handlers {
                handler();
            }
        }
    }

    /// Deactivate every region and run every registered reset handler
    pub fn reset_all(&self) {
        let handlers: Vec<ResetHandler> = {
            let mut states = self.states.borrow_mut();
            states
                .values_mut()
                .flat_map(|state| {
                    state.active = false;
                    state.clear_history();
                    state.reset_handlers.clone()
                })
                .collect()
        };

        debug!(handlers = handlers.len(), "Resetting all regions");
        for handler in handlers {
            handler();
        }
    }

    pub fn register_reset_handler(&self, region: Region, handler: ResetHandler) {
        self.states
            .borrow_mut()
            .entry(region)
            .or_default()
            .reset_handlers
            .push(handler);
    }

    pub fn record_announcement(&self, region: Region, text: &str, at: DateTime<Utc>) {
        self.states
            .borrow_mut()
            .entry(region)
            .or_default()
            .record_announcement(text, at);
    }

    pub fn last_announcement(&self, region: Region) -> Option<String> {
        self.states
            .borrow()
            .get(&region)
            .and_then(|state| state.last_announcement.clone())
    }

    /// Active regions in declaration order
    pub fn active_regions(&self) -> Vec<Region> {
        let states = self.states.borrow();
        Region::ALL
            .iter()
            .copied()
            .filter(|region| states.get(region).map(|s| s.active).unwrap_or(false))
            .collect()
    }
}
