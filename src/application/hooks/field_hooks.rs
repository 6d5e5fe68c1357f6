//! Field hooks - Movement, landing zones, map transitions

use tracing::{debug, warn};

use super::{keys, HookContext, HookResult};
use crate::application::services::deduplicator::contexts;
use crate::application::services::MenuTracker;
use crate::domain::services::text::strip_markup;
use crate::domain::value_objects::{Announcement, TransportMode};

pub fn transport_changed(ctx: &HookContext, mode_id: i32) -> HookResult {
    Ok(ctx.trackers.movement.observe(TransportMode::from_id(mode_id)))
}

pub fn disembarked(ctx: &HookContext) -> HookResult {
    Ok(ctx.trackers.movement.observe(TransportMode::OnFoot))
}

/// Weak signal: use what it reports now, then look again once the move settles
pub fn move_state_changed(ctx: &HookContext, mode_id: i32) -> HookResult {
    let immediate = ctx.trackers.movement.observe(TransportMode::from_id(mode_id));

    ctx.scheduler.schedule(
        keys::MOVE_RECHECK,
        ctx.settings.move_state_recheck_frames,
        |ctx: &HookContext| match ctx.probe.transport_mode_id() {
            Ok(Some(id)) => ctx.trackers.movement.observe(TransportMode::from_id(id)),
            Ok(None) => {
                debug!("Player object gone before move-state recheck");
                None
            }
            Err(e) => {
                warn!("Move-state recheck failed: {}", e);
                None
            }
        },
    );

    Ok(immediate)
}

pub fn landing_zone_changed(ctx: &HookContext, can_land: bool) -> HookResult {
    let airborne = ctx
        .probe
        .transport_mode_id()?
        .map(TransportMode::from_id)
        == Some(TransportMode::Airship);
    if !airborne {
        ctx.trackers.landing.reset();
        return Ok(None);
    }
    Ok(ctx.trackers.landing.observe(can_land))
}

pub fn map_changed(ctx: &HookContext, map_id: i32, title_mes_id: &str) -> HookResult {
    ctx.policy.on_map_changed();

    if title_mes_id.trim().is_empty() {
        ctx.scheduler.cancel(keys::MAP_TITLE);
        return Ok(None);
    }

    let title_mes_id = title_mes_id.to_string();
    ctx.scheduler.schedule(
        keys::MAP_TITLE,
        ctx.settings.map_title_delay_frames,
        move |ctx: &HookContext| {
            match ctx.probe.current_map_id() {
                Ok(Some(current)) if current == map_id => {}
                Ok(current) => {
                    debug!(scheduled = map_id, ?current, "Map title superseded");
                    return None;
                }
                Err(e) => {
                    warn!("Map id probe failed, dropping title: {}", e);
                    return None;
                }
            }

            let title = ctx
                .localization
                .lookup(&title_mes_id)
                .map(|text| strip_markup(&text))
                .filter(|text| !text.is_empty())?;
            if !ctx.dedup.should_announce_text(contexts::MAP_TITLE, &title) {
                return None;
            }
            Some(Announcement::interrupting(title))
        },
    );
    Ok(None)
}

pub fn returned_to_title(ctx: &HookContext) -> HookResult {
    ctx.scheduler.clear();
    ctx.policy.on_return_to_title();
    Ok(None)
}
