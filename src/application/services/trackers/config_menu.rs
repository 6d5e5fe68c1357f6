//! Config menu tracker
//!
//! Remembers which option has focus. A value change always moves focus to the
//! option whose value changed.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use super::{MenuTracker, TrackerCore};
use crate::application::ports::outbound::GameProbePort;
use crate::domain::value_objects::Region;

pub struct ConfigMenuTracker {
    core: TrackerCore,
    probe: Rc<dyn GameProbePort>,
    focused_option: RefCell<Option<String>>,
}

impl ConfigMenuTracker {
    pub fn new(core: TrackerCore, probe: Rc<dyn GameProbePort>) -> Self {
        Self {
            core,
            probe,
            focused_option: RefCell::new(None),
        }
    }

    pub fn claim_option(&self, option: &str) {
        *self.focused_option.borrow_mut() = Some(option.to_string());
        self.core.claim();
    }

    pub fn focused_option(&self) -> Option<String> {
        self.focused_option.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.core.is_active()
    }
}

impl MenuTracker for ConfigMenuTracker {
    fn region(&self) -> Region {
        self.core.region()
    }

    fn should_suppress(&self) -> bool {
        if !self.core.is_active() {
            return false;
        }
        match self.probe.is_config_open() {
            Ok(true) => true,
            Ok(false) => {
                self.reset();
                false
            }
            Err(e) => {
                warn!("Config menu probe failed, releasing: {}", e);
                self.reset();
                false
            }
        }
    }

    fn should_announce(&self, text: &str) -> bool {
        self.core.should_announce(text)
    }

    fn reset(&self) {
        self.core.release();
        self.focused_option.borrow_mut().take();
    }

    fn on_region_lost(&self) {
        self.focused_option.borrow_mut().take();
        self.core.clear_gate();
    }
}
