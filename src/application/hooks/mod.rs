//! Hook callbacks - One handler per intercepted engine event
//!
//! Handlers never speak directly. Each returns the announcement it wants made
//! (or nothing) and `NarrationService` hands it to the speech sink, so a handler
//! can be tested without one. A handler that fails returns a `HookError`; the
//! service logs it and resets the region the event belongs to.

use std::rc::Rc;

use crate::application::ports::outbound::{
    ClockPort, GameProbePort, LocalizationPort, MemoryError, ProbeError,
};
use crate::application::services::deduplicator::contexts;
use crate::application::services::{
    DedupPolicy, Deduplicator, FrameScheduler, NarrationPolicy, RegionRegistry, Trackers,
};
use crate::domain::events::HookEvent;
use crate::domain::services::text::strip_markup;
use crate::domain::value_objects::{Announcement, BattleUnit, NarratorSettings};

pub mod battle_hooks;
pub mod field_hooks;
pub mod menu_hooks;

/// Scheduler keys for deferred checks
pub mod keys {
    pub const FLEE_TIMEOUT: &str = "battle.flee_timeout";
    pub const MOVE_RECHECK: &str = "field.move_recheck";
    pub const MAP_TITLE: &str = "field.map_title";
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// Nothing to say; logged at debug and otherwise ignored
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Probe failed: {0}")]
    Probe(#[from] ProbeError),

    #[error("Memory read failed: {0}")]
    Memory(#[from] MemoryError),

    #[error("No localized text for {0}")]
    Localization(String),
}

pub type HookResult = Result<Option<Announcement>, HookError>;

/// Everything a hook handler may touch
pub struct HookContext {
    pub registry: Rc<RegionRegistry>,
    pub dedup: Rc<Deduplicator>,
    pub trackers: Rc<Trackers>,
    pub policy: NarrationPolicy,
    pub scheduler: FrameScheduler<HookContext>,
    pub localization: Rc<dyn LocalizationPort>,
    pub probe: Rc<dyn GameProbePort>,
    pub clock: Rc<dyn ClockPort>,
    pub settings: NarratorSettings,
}

impl HookContext {
    pub fn new(
        probe: Rc<dyn GameProbePort>,
        localization: Rc<dyn LocalizationPort>,
        clock: Rc<dyn ClockPort>,
        settings: NarratorSettings,
    ) -> Self {
        let registry = Rc::new(RegionRegistry::new());
        let dedup = Rc::new(
            Deduplicator::new(clock.clone())
                .with_policy(contexts::GENERIC, DedupPolicy::Window(settings.generic_repeat_window()))
                .with_policy(contexts::BATTLE_STATUS, DedupPolicy::Equality)
                .with_policy(contexts::MAP_TITLE, DedupPolicy::Equality),
        );
        let trackers = Rc::new(Trackers::new(&registry, &dedup, &probe, &clock, &settings));
        let policy = NarrationPolicy::new(registry.clone(), dedup.clone(), trackers.clone());

        Self {
            registry,
            dedup,
            trackers,
            policy,
            scheduler: FrameScheduler::new(),
            localization,
            probe,
            clock,
            settings,
        }
    }
}

/// Send an event to its handler. `FrameTick` is driven by the service, not here.
pub fn route(ctx: &HookContext, event: &HookEvent) -> HookResult {
    use HookEvent::*;

    match event {
        ItemMenuStateChanged { state } => menu_hooks::item_menu_state_changed(ctx, *state),
        ItemSelectionChanged {
            list,
            index,
            entries,
        } => menu_hooks::item_selection_changed(ctx, *list, *index, entries),
        ItemTargetFocused { name, hp, max_hp } => {
            menu_hooks::item_target_focused(ctx, name, *hp, *max_hp)
        }
        MagicWindowOpened { character } => menu_hooks::magic_window_opened(ctx, character),
        MagicMenuStateChanged { state } => menu_hooks::magic_menu_state_changed(ctx, *state),
        MagicSpellFocused { index, entries } => {
            menu_hooks::magic_spell_focused(ctx, *index, entries)
        }
        EquipMenuStateChanged { state } => menu_hooks::equip_menu_state_changed(ctx, *state),
        EquipSlotFocused { slot, item } => {
            menu_hooks::equip_slot_focused(ctx, slot, item.as_deref())
        }
        EquipItemFocused { index, entries } => menu_hooks::equip_item_focused(ctx, *index, entries),
        StatusMenuStateChanged { state } => menu_hooks::status_menu_state_changed(ctx, *state),
        StatusDetailsShown { details } => menu_hooks::status_details_shown(ctx, details),
        PopupOpened { message } => menu_hooks::popup_opened(ctx, message),
        PopupButtonFocused { label } => menu_hooks::popup_button_focused(ctx, label),
        PopupClosed => menu_hooks::popup_closed(ctx),
        ConfigOptionFocused { name, value } => menu_hooks::config_option_focused(ctx, name, value),
        ConfigValueChanged { name, value } => menu_hooks::config_value_changed(ctx, name, value),
        ConfigMenuClosed => menu_hooks::config_menu_closed(ctx),
        EventItemSelectOpened => menu_hooks::event_item_select_opened(ctx),
        EventItemFocused { index, entries } => menu_hooks::event_item_focused(ctx, *index, entries),
        EventItemSelectClosed => menu_hooks::event_item_select_closed(ctx),
        GenericFocusChanged { text } => menu_hooks::generic_focus_changed(ctx, text),

        BattleCommandFocused {
            actor,
            command_mes_id,
        } => battle_hooks::command_focused(ctx, actor, command_mes_id),
        BattleMagicOpened { caster } => battle_hooks::magic_opened(ctx, caster),
        BattleItemFocused { index, entries } => battle_hooks::item_focused(ctx, *index, entries),
        BattleMagicFocused { index, entries } => battle_hooks::magic_focused(ctx, *index, entries),
        BattleTargetFocused { target } => battle_hooks::target_focused(ctx, target),
        DamageApplied {
            target,
            value,
            hit_type,
            is_recovery,
        } => battle_hooks::damage_applied(ctx, target, *value, *hit_type, *is_recovery),
        ActionExecuted { actor, action } => battle_hooks::action_executed(ctx, actor, action),
        ConditionAdded {
            target,
            condition_id,
        } => battle_hooks::condition_added(ctx, target, *condition_id),
        BattleEnded => battle_hooks::battle_ended(ctx),

        TransportationChanged { mode_id } | Boarded { mode_id } => {
            field_hooks::transport_changed(ctx, *mode_id)
        }
        MoveStateChanged { mode_id } => field_hooks::move_state_changed(ctx, *mode_id),
        Disembarked => field_hooks::disembarked(ctx),
        LandingZoneChanged { can_land } => field_hooks::landing_zone_changed(ctx, *can_land),
        MapChanged {
            map_id,
            title_mes_id,
        } => field_hooks::map_changed(ctx, *map_id, title_mes_id),
        ReturnedToTitle => field_hooks::returned_to_title(ctx),
        FrameTick => Ok(None),
    }
}

/// Bounds-checked list access. An empty slot is `Ok(None)`.
pub(crate) fn entry_at<T>(entries: &[Option<T>], index: i32) -> Result<Option<&T>, HookError> {
    if index < 0 {
        return Err(HookError::MissingData("no cursor position".to_string()));
    }
    match entries.get(index as usize) {
        Some(slot) => Ok(slot.as_ref()),
        None => Err(HookError::Extraction(format!(
            "index {} out of range for {} entries",
            index,
            entries.len()
        ))),
    }
}

/// Display name of a battle unit. Enemies resolve through localization.
pub(crate) fn resolve_unit_name(ctx: &HookContext, unit: &BattleUnit) -> Result<String, HookError> {
    let name = match unit {
        BattleUnit::Player { name, .. } => strip_markup(name),
        BattleUnit::Enemy { mes_id_name, .. } => ctx
            .localization
            .lookup(mes_id_name)
            .map(|text| strip_markup(&text))
            .ok_or_else(|| HookError::Localization(mes_id_name.clone()))?,
    };
    if name.is_empty() {
        return Err(HookError::MissingData("unit name".to_string()));
    }
    Ok(name)
}
