//! Narration Service - Dispatch entry point for the host adapter
//!
//! The adapter delivers every intercepted call as a `HookEvent`. The service
//! routes it, speaks whatever the handler produced, records it against the
//! owning region and turns handler failures into a region reset. Nothing that
//! happens here is fatal to the host.

use std::rc::Rc;

use tracing::{debug, instrument, trace, warn};

use crate::application::hooks::{self, HookContext, HookError};
use crate::application::ports::outbound::SpeechPort;
use crate::domain::events::HookEvent;
use crate::domain::value_objects::{Announcement, Region};

pub struct NarrationService {
    context: HookContext,
    speech: Rc<dyn SpeechPort>,
}

impl NarrationService {
    pub fn new(context: HookContext, speech: Rc<dyn SpeechPort>) -> Self {
        Self { context, speech }
    }

    pub fn context(&self) -> &HookContext {
        &self.context
    }

    #[instrument(skip(self, event), fields(event = %event.name()))]
    pub fn dispatch(&self, event: &HookEvent) {
        if let HookEvent::FrameTick = event {
            self.tick();
            return;
        }

        match hooks::route(&self.context, event) {
            Ok(Some(announcement)) => self.speak(event.region(), announcement),
            Ok(None) => {}
            Err(HookError::MissingData(what)) => {
                debug!(what = %what, "Nothing to announce");
            }
            Err(e) => {
                warn!("Hook failed: {}", e);
                if let Some(region) = event.region() {
                    self.context.policy.reset_region(region);
                }
            }
        }
    }

    /// Advance the frame scheduler and speak whatever became due
    pub fn tick(&self) {
        let due = self.context.scheduler.advance(&self.context);
        for announcement in due {
            self.speak(None, announcement);
        }
    }

    fn speak(&self, region: Option<Region>, announcement: Announcement) {
        trace!(text = %announcement.text, interrupt = announcement.interrupt, "Speaking");
        if let Some(region) = region {
            self.context
                .registry
                .record_announcement(region, &announcement.text, self.context.clock.now());
        }
        self.speech.speak(&announcement.text, announcement.interrupt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestRig;
    use crate::domain::value_objects::{ItemListKind, ItemMenuState, ListEntry};

    fn potion_selected(index: i32) -> HookEvent {
        HookEvent::ItemSelectionChanged {
            list: ItemListKind::Use,
            index,
            entries: vec![Some(ListEntry {
                name: "Potion".to_string(),
                description: "Restores HP".to_string(),
            })],
        }
    }

    #[test]
    fn test_dispatch_speaks_and_records() {
        let rig = TestRig::new();

        rig.service.dispatch(&potion_selected(0));

        assert_eq!(rig.speech.spoken(), vec![("Potion: Restores HP".to_string(), true)]);
        assert_eq!(
            rig.registry.last_announcement(Region::ItemMenu).as_deref(),
            Some("Potion: Restores HP")
        );
    }

    #[test]
    fn test_failed_hook_resets_its_region() {
        let rig = TestRig::new();
        rig.service.dispatch(&potion_selected(0));
        assert!(rig.registry.is_active(Region::ItemMenu));

        rig.service.dispatch(&potion_selected(5));

        assert!(!rig.registry.is_active(Region::ItemMenu));
        assert_eq!(rig.speech.spoken().len(), 1);
    }

    #[test]
    fn test_missing_data_keeps_region() {
        let rig = TestRig::new();
        rig.service.dispatch(&potion_selected(0));

        rig.service.dispatch(&potion_selected(-1));

        assert!(rig.registry.is_active(Region::ItemMenu));
    }

    #[test]
    fn test_frame_ticks_run_continuations() {
        let rig = TestRig::new();
        rig.messages.insert("MES_MAP_URR", "Ur");
        rig.probe.map.set(Some(3));

        rig.service.dispatch(&HookEvent::MapChanged {
            map_id: 3,
            title_mes_id: "MES_MAP_URR".to_string(),
        });
        for _ in 0..rig.settings.map_title_delay_frames {
            rig.service.dispatch(&HookEvent::FrameTick);
        }

        assert_eq!(rig.speech.texts(), vec!["Ur"]);
    }

    #[test]
    fn test_generic_focus_through_dispatch() {
        let rig = TestRig::new();
        rig.probe.item.set(ItemMenuState::UseList);
        rig.service.dispatch(&potion_selected(0));

        rig.service.dispatch(&HookEvent::GenericFocusChanged {
            text: "Use".to_string(),
        });

        assert_eq!(rig.speech.texts(), vec!["Potion: Restores HP"]);
    }
}
