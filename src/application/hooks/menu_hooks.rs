//! Field menu hooks
//!
//! List selections all follow the same order: validate the slot, build the
//! text, ask the tracker's repeat gate, and only then claim the region. A
//! selection that is not spoken never steals ownership from another menu.

use tracing::debug;

use super::{entry_at, HookContext, HookError, HookResult};
use crate::application::services::trackers::format_spell;
use crate::application::services::MenuTracker;
use crate::domain::services::text::{format_entry, format_hp, strip_markup};
use crate::domain::value_objects::{
    Announcement, CharacterSnapshot, EquipMenuState, ItemListKind, ItemMenuState, ListEntry,
    MagicMenuState, SpellEntry, StatusDetails, StatusMenuState,
};

/// Text for a list slot, or `None` for an empty one
fn list_text(entries: &[Option<ListEntry>], index: i32) -> Result<Option<String>, HookError> {
    let Some(entry) = entry_at(entries, index)? else {
        return Ok(None);
    };
    Ok(format_entry(&entry.name, &entry.description))
}

// ============================================================================
// Item menu
// ============================================================================

pub fn item_menu_state_changed(ctx: &HookContext, state: ItemMenuState) -> HookResult {
    ctx.trackers.item.observe_state(state);
    Ok(None)
}

pub fn item_selection_changed(
    ctx: &HookContext,
    list: ItemListKind,
    index: i32,
    entries: &[Option<ListEntry>],
) -> HookResult {
    let Some(text) = list_text(entries, index)? else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.item;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_selection(ItemMenuState::from(list));
    Ok(Some(Announcement::interrupting(text)))
}

pub fn item_target_focused(ctx: &HookContext, name: &str, hp: i32, max_hp: i32) -> HookResult {
    let name = strip_markup(name);
    if name.is_empty() {
        return Ok(None);
    }
    let text = format_hp(&name, hp, max_hp);
    let tracker = &ctx.trackers.item;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_target();
    Ok(Some(Announcement::interrupting(text)))
}

// ============================================================================
// Magic menu
// ============================================================================

pub fn magic_window_opened(ctx: &HookContext, character: &CharacterSnapshot) -> HookResult {
    ctx.trackers.magic.set_character(character.clone());
    Ok(None)
}

pub fn magic_menu_state_changed(ctx: &HookContext, state: MagicMenuState) -> HookResult {
    ctx.trackers.magic.observe_state(state);
    Ok(None)
}

pub fn magic_spell_focused(
    ctx: &HookContext,
    index: i32,
    entries: &[Option<SpellEntry>],
) -> HookResult {
    let Some(entry) = entry_at(entries, index)? else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.magic;
    let Some(text) = format_spell(entry, tracker.character().as_ref()) else {
        return Ok(None);
    };
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_spell();
    Ok(Some(Announcement::interrupting(text)))
}

// ============================================================================
// Equipment menu
// ============================================================================

pub fn equip_menu_state_changed(ctx: &HookContext, state: EquipMenuState) -> HookResult {
    ctx.trackers.equip.observe_state(state);
    Ok(None)
}

pub fn equip_slot_focused(ctx: &HookContext, slot: &str, item: Option<&str>) -> HookResult {
    let item = item.map(strip_markup).filter(|item| !item.is_empty());
    let Some(text) = format_entry(slot, item.as_deref().unwrap_or("Empty")) else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.equip;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_slot();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn equip_item_focused(
    ctx: &HookContext,
    index: i32,
    entries: &[Option<ListEntry>],
) -> HookResult {
    let Some(text) = list_text(entries, index)? else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.equip;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_item();
    Ok(Some(Announcement::interrupting(text)))
}

// ============================================================================
// Status menu
// ============================================================================

pub fn status_menu_state_changed(ctx: &HookContext, state: StatusMenuState) -> HookResult {
    ctx.trackers.status.observe_state(state);
    Ok(None)
}

pub fn status_details_shown(ctx: &HookContext, details: &StatusDetails) -> HookResult {
    let name = strip_markup(&details.name);
    if name.is_empty() {
        return Ok(None);
    }
    let job = strip_markup(&details.job);
    let text = if job.is_empty() {
        format!(
            "{}, level {}, {}/{} HP",
            name, details.level, details.hp, details.max_hp
        )
    } else {
        format!(
            "{}, {}, level {}, {}/{} HP",
            name, job, details.level, details.hp, details.max_hp
        )
    };
    let tracker = &ctx.trackers.status;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_details();
    Ok(Some(Announcement::interrupting(text)))
}

// ============================================================================
// Popups
// ============================================================================

pub fn popup_opened(ctx: &HookContext, message: &str) -> HookResult {
    let text = strip_markup(message);
    if text.is_empty() {
        return Ok(None);
    }
    let tracker = &ctx.trackers.popup;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_open();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn popup_button_focused(ctx: &HookContext, label: &str) -> HookResult {
    let text = strip_markup(label);
    if text.is_empty() {
        return Ok(None);
    }
    let tracker = &ctx.trackers.popup;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_open();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn popup_closed(ctx: &HookContext) -> HookResult {
    ctx.trackers.popup.reset();
    Ok(None)
}

// ============================================================================
// Config menu
// ============================================================================

fn config_text(name: &str, value: &str) -> Option<(String, String)> {
    let name = strip_markup(name);
    if name.is_empty() {
        return None;
    }
    let value = strip_markup(value);
    let text = format_entry(&name, &value)?;
    Some((name, text))
}

pub fn config_option_focused(ctx: &HookContext, name: &str, value: &str) -> HookResult {
    let Some((option, text)) = config_text(name, value) else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.config;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_option(&option);
    Ok(Some(Announcement::interrupting(text)))
}

pub fn config_value_changed(ctx: &HookContext, name: &str, value: &str) -> HookResult {
    let Some((option, text)) = config_text(name, value) else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.config;
    if tracker.focused_option().as_deref() != Some(option.as_str()) {
        debug!(option = %option, "Value changed on an option without focus");
    }
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_option(&option);
    Ok(Some(Announcement::interrupting(text)))
}

pub fn config_menu_closed(ctx: &HookContext) -> HookResult {
    ctx.trackers.config.reset();
    Ok(None)
}

// ============================================================================
// Event item selection
// ============================================================================

pub fn event_item_select_opened(ctx: &HookContext) -> HookResult {
    ctx.trackers.event_item.mark_open();
    Ok(None)
}

pub fn event_item_focused(
    ctx: &HookContext,
    index: i32,
    entries: &[Option<ListEntry>],
) -> HookResult {
    let Some(text) = list_text(entries, index)? else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.event_item;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_selection();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn event_item_select_closed(ctx: &HookContext) -> HookResult {
    ctx.trackers.event_item.reset();
    Ok(None)
}

// ============================================================================
// Generic focus
// ============================================================================

pub fn generic_focus_changed(ctx: &HookContext, text: &str) -> HookResult {
    let text = strip_markup(text);
    if text.is_empty() || !ctx.policy.allows_generic(&text) {
        return Ok(None);
    }
    Ok(Some(Announcement::interrupting(text)))
}
