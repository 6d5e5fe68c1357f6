//! Per-menu state trackers
//!
//! Each tracker wraps one region of the registry and adds what its menu needs
//! to decide suppression: a live sub-state probe, cached context (the character
//! whose spells are listed, the last focused entry) and a tracker-local repeat
//! gate. Trackers are built once at startup and shared by `Rc` with the hooks.
//!
//! Suppression is never trusted blindly. `should_suppress` re-reads live state
//! whenever the region claims to be active and releases the region on any sign
//! that the menu is gone, so no path can leave narration muted forever.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::application::ports::outbound::{ClockPort, GameProbePort};
use crate::application::services::{Deduplicator, RegionRegistry};
use crate::domain::value_objects::{NarratorSettings, Region};

mod battle_command;
mod battle_list;
mod battle_target;
mod config_menu;
mod equip_menu;
mod event_item;
mod item_menu;
mod magic_menu;
mod movement;
mod popup;
mod status_menu;
mod vehicle_landing;

pub use battle_command::BattleCommandTracker;
pub use battle_list::BattleListTracker;
pub use battle_target::BattleTargetTracker;
pub use config_menu::ConfigMenuTracker;
pub use equip_menu::EquipMenuTracker;
pub use event_item::EventItemSelectTracker;
pub use item_menu::ItemMenuTracker;
pub use magic_menu::{format_spell, MagicMenuTracker};
pub use movement::MovementTracker;
pub use popup::PopupTracker;
pub use status_menu::StatusMenuTracker;
pub use vehicle_landing::VehicleLandingTracker;

/// Contract every region-backed tracker exposes to hooks and the policy
pub trait MenuTracker {
    fn region(&self) -> Region;

    /// Whether the generic narrator should stay quiet because this menu owns
    /// the speech channel. Re-validates live state when the region is active.
    fn should_suppress(&self) -> bool;

    /// Tracker-local repeat check. Records the text when it passes.
    fn should_announce(&self, text: &str) -> bool;

    /// Release the region and drop transient state
    fn reset(&self);

    /// Drop transient state after another region displaced this one.
    /// The registry has already marked the region inactive.
    fn on_region_lost(&self);
}

/// Equality + time-window repeat check private to one tracker
pub struct AnnouncementGate {
    clock: Rc<dyn ClockPort>,
    window: Option<Duration>,
    last: RefCell<Option<(String, DateTime<Utc>)>>,
}

impl AnnouncementGate {
    /// `window: None` means an identical text never passes again until a
    /// different one has.
    pub fn new(clock: Rc<dyn ClockPort>, window: Option<Duration>) -> Self {
        Self {
            clock,
            window,
            last: RefCell::new(None),
        }
    }

    pub fn check(&self, text: &str) -> bool {
        let now = self.clock.now();
        let mut last = self.last.borrow_mut();
        let repeat = match (&*last, self.window) {
            (Some((previous, _)), None) => previous == text,
            (Some((previous, at)), Some(window)) => previous == text && now - *at < window,
            (None, _) => false,
        };
        if repeat {
            return false;
        }
        *last = Some((text.to_string(), now));
        true
    }

    pub fn clear(&self) {
        self.last.borrow_mut().take();
    }
}

/// Region handle plus repeat gate, shared by every tracker
pub struct TrackerCore {
    region: Region,
    registry: Rc<RegionRegistry>,
    gate: AnnouncementGate,
}

impl TrackerCore {
    pub fn new(
        region: Region,
        registry: Rc<RegionRegistry>,
        clock: Rc<dyn ClockPort>,
        window: Option<Duration>,
    ) -> Self {
        Self {
            region,
            registry,
            gate: AnnouncementGate::new(clock, window),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn is_active(&self) -> bool {
        self.registry.is_active(self.region)
    }

    /// Take narration ownership, displacing every sibling region
    pub fn claim(&self) {
        self.registry.set_active_exclusive(self.region);
    }

    /// Non-exclusive activation, for overlay regions
    pub fn activate(&self) {
        self.registry.set_active(self.region, true);
    }

    pub fn release(&self) {
        if self.is_active() {
            debug!(region = %self.region, "Releasing region");
        }
        self.registry.set_active(self.region, false);
        self.gate.clear();
    }

    pub fn should_announce(&self, text: &str) -> bool {
        self.gate.check(text)
    }

    pub fn clear_gate(&self) {
        self.gate.clear();
    }
}

/// Every tracker, constructed once and shared with the hooks
pub struct Trackers {
    pub battle_command: Rc<BattleCommandTracker>,
    pub battle_item: Rc<BattleListTracker>,
    pub battle_magic: Rc<BattleListTracker>,
    pub battle_target: Rc<BattleTargetTracker>,
    pub item: Rc<ItemMenuTracker>,
    pub magic: Rc<MagicMenuTracker>,
    pub equip: Rc<EquipMenuTracker>,
    pub status: Rc<StatusMenuTracker>,
    pub popup: Rc<PopupTracker>,
    pub config: Rc<ConfigMenuTracker>,
    pub event_item: Rc<EventItemSelectTracker>,
    pub landing: Rc<VehicleLandingTracker>,
    pub movement: Rc<MovementTracker>,
}

impl Trackers {
    pub fn new(
        registry: &Rc<RegionRegistry>,
        dedup: &Rc<Deduplicator>,
        probe: &Rc<dyn GameProbePort>,
        clock: &Rc<dyn ClockPort>,
        settings: &NarratorSettings,
    ) -> Self {
        let menu_window = Some(settings.menu_repeat_window());
        let core = |region: Region, window: Option<Duration>| {
            TrackerCore::new(region, registry.clone(), clock.clone(), window)
        };

        let trackers = Self {
            battle_command: Rc::new(BattleCommandTracker::new(
                core(Region::BattleCommand, Some(settings.battle_command_window())),
                probe.clone(),
            )),
            battle_item: Rc::new(BattleListTracker::items(
                core(Region::BattleItem, menu_window),
                probe.clone(),
            )),
            battle_magic: Rc::new(BattleListTracker::magic(
                core(Region::BattleMagic, menu_window),
                probe.clone(),
            )),
            battle_target: Rc::new(BattleTargetTracker::new(
                core(Region::BattleTarget, menu_window),
                probe.clone(),
                dedup.clone(),
            )),
            item: Rc::new(ItemMenuTracker::new(core(Region::ItemMenu, menu_window), probe.clone())),
            magic: Rc::new(MagicMenuTracker::new(
                core(Region::MagicMenu, menu_window),
                probe.clone(),
            )),
            equip: Rc::new(EquipMenuTracker::new(
                core(Region::EquipMenu, menu_window),
                probe.clone(),
            )),
            status: Rc::new(StatusMenuTracker::new(
                core(Region::StatusMenu, menu_window),
                probe.clone(),
            )),
            popup: Rc::new(PopupTracker::new(core(Region::Popup, menu_window), probe.clone())),
            config: Rc::new(ConfigMenuTracker::new(
                core(Region::ConfigMenu, menu_window),
                probe.clone(),
            )),
            event_item: Rc::new(EventItemSelectTracker::new(
                core(Region::EventItemSelect, menu_window),
                probe.clone(),
            )),
            landing: Rc::new(VehicleLandingTracker::new(core(Region::VehicleLanding, None))),
            movement: Rc::new(MovementTracker::new()),
        };

        for tracker in trackers.menu_trackers() {
            let weak = Rc::downgrade(&tracker);
            registry.register_reset_handler(
                tracker.region(),
                Rc::new(move || {
                    if let Some(tracker) = weak.upgrade() {
                        tracker.on_region_lost();
                    }
                }),
            );
        }

        trackers
    }

    /// Every region-backed tracker, in arbitration order
    pub fn menu_trackers(&self) -> Vec<Rc<dyn MenuTracker>> {
        let trackers: [Rc<dyn MenuTracker>; 12] = [
            self.popup.clone(),
            self.config.clone(),
            self.event_item.clone(),
            self.battle_target.clone(),
            self.battle_item.clone(),
            self.battle_magic.clone(),
            self.battle_command.clone(),
            self.item.clone(),
            self.magic.clone(),
            self.equip.clone(),
            self.status.clone(),
            self.landing.clone(),
        ];
        trackers.into()
    }

    pub fn by_region(&self, region: Region) -> Rc<dyn MenuTracker> {
        match region {
            Region::BattleCommand => self.battle_command.clone(),
            Region::BattleItem => self.battle_item.clone(),
            Region::BattleMagic => self.battle_magic.clone(),
            Region::BattleTarget => self.battle_target.clone(),
            Region::ItemMenu => self.item.clone(),
            Region::MagicMenu => self.magic.clone(),
            Region::EquipMenu => self.equip.clone(),
            Region::StatusMenu => self.status.clone(),
            Region::Popup => self.popup.clone(),
            Region::ConfigMenu => self.config.clone(),
            Region::EventItemSelect => self.event_item.clone(),
            Region::VehicleLanding => self.landing.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::ManualClock;

    #[test]
    fn test_gate_without_window_is_pure_equality() {
        let clock = Rc::new(ManualClock::new());
        let gate = AnnouncementGate::new(clock.clone(), None);

        assert!(gate.check("Potion"));
        clock.advance_ms(10_000);
        assert!(!gate.check("Potion"));
        assert!(gate.check("Ether"));
    }

    #[test]
    fn test_gate_window_expires() {
        let clock = Rc::new(ManualClock::new());
        let gate = AnnouncementGate::new(clock.clone(), Some(Duration::milliseconds(100)));

        assert!(gate.check("Potion"));
        assert!(!gate.check("Potion"));
        clock.advance_ms(100);
        assert!(gate.check("Potion"));

        gate.clear();
        assert!(gate.check("Potion"));
    }
}
