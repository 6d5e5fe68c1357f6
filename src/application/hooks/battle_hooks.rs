//! Battle hooks
//!
//! Menu-like battle events (command bar, item and magic lists, target cursor)
//! interrupt. Battle log events (damage, actions, conditions) queue behind
//! whatever is being spoken so a fast exchange is heard in order.

use tracing::debug;

use super::{entry_at, keys, resolve_unit_name, HookContext, HookError, HookResult};
use crate::application::services::deduplicator::contexts;
use crate::application::services::trackers::format_spell;
use crate::application::services::MenuTracker;
use crate::domain::services::battle_messages::{format_damage, is_flee_command, ActionPhrase};
use crate::domain::services::text::{format_entry, format_hp, strip_markup};
use crate::domain::value_objects::{
    ActionData, Announcement, BattleUnit, CharacterSnapshot, HitType, ListEntry, SpellEntry,
};

/// Label used when an enemy's name cannot be resolved
const UNKNOWN_ENEMY: &str = "Enemy";

fn name_or_fallback(ctx: &HookContext, unit: &BattleUnit) -> String {
    resolve_unit_name(ctx, unit).unwrap_or_else(|e| {
        debug!(error = %e, "Falling back to generic enemy label");
        UNKNOWN_ENEMY.to_string()
    })
}

pub fn command_focused(ctx: &HookContext, actor: &str, command_mes_id: &str) -> HookResult {
    let tracker = &ctx.trackers.battle_command;
    let actor = strip_markup(actor);
    let new_turn = tracker.note_actor(&actor);

    if tracker.is_fleeing() {
        if !new_turn {
            return Ok(None);
        }
        // A fresh turn means the escape attempt failed
        tracker.clear_flee();
        ctx.scheduler.cancel(keys::FLEE_TIMEOUT);
    }

    let command = ctx
        .localization
        .lookup(command_mes_id)
        .map(|text| strip_markup(&text))
        .filter(|text| !text.is_empty())
        .ok_or_else(|| HookError::Localization(command_mes_id.to_string()))?;

    let text = if new_turn && !actor.is_empty() {
        format!("{}: {}", actor, command)
    } else {
        command
    };
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn magic_opened(ctx: &HookContext, caster: &CharacterSnapshot) -> HookResult {
    ctx.trackers.battle_magic.set_caster(caster.clone());
    Ok(None)
}

pub fn item_focused(ctx: &HookContext, index: i32, entries: &[Option<ListEntry>]) -> HookResult {
    let Some(entry) = entry_at(entries, index)? else {
        return Ok(None);
    };
    let Some(text) = format_entry(&entry.name, &entry.description) else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.battle_item;
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_selection();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn magic_focused(ctx: &HookContext, index: i32, entries: &[Option<SpellEntry>]) -> HookResult {
    let Some(entry) = entry_at(entries, index)? else {
        return Ok(None);
    };
    let tracker = &ctx.trackers.battle_magic;
    let Some(text) = format_spell(entry, tracker.caster().as_ref()) else {
        return Ok(None);
    };
    if !tracker.should_announce(&text) {
        return Ok(None);
    }
    tracker.claim_selection();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn target_focused(ctx: &HookContext, target: &BattleUnit) -> HookResult {
    let text = match target {
        BattleUnit::Player {
            name, hp, max_hp, ..
        } => {
            let name = strip_markup(name);
            if name.is_empty() {
                return Err(HookError::MissingData("target name".to_string()));
            }
            format_hp(&name, *hp, *max_hp)
        }
        BattleUnit::Enemy { .. } => resolve_unit_name(ctx, target)?,
    };

    let tracker = &ctx.trackers.battle_target;
    if !tracker.should_announce_target(target.object()) {
        return Ok(None);
    }
    tracker.claim();
    Ok(Some(Announcement::interrupting(text)))
}

pub fn damage_applied(
    ctx: &HookContext,
    target: &BattleUnit,
    value: i32,
    hit_type: HitType,
    is_recovery: bool,
) -> HookResult {
    let name = name_or_fallback(ctx, target);
    Ok(Some(Announcement::queued(format_damage(
        &name,
        value,
        hit_type,
        is_recovery,
    ))))
}

pub fn action_executed(ctx: &HookContext, actor: &BattleUnit, action: &ActionData) -> HookResult {
    if action.object.is_null() {
        return Err(HookError::MissingData("action object".to_string()));
    }
    if !ctx
        .dedup
        .should_announce_object(contexts::BATTLE_ACTION, action.object)
    {
        return Ok(None);
    }

    let command_text = action
        .command_mes_id
        .as_deref()
        .and_then(|id| ctx.localization.lookup(id))
        .map(|text| strip_markup(&text));

    let phrase = if is_flee_command(action.command_mes_id.as_deref(), command_text.as_deref()) {
        begin_flee(ctx);
        ActionPhrase::Flees
    } else {
        let label = [&action.item_mes_id, &action.ability_mes_id]
            .into_iter()
            .filter_map(|id| id.as_deref())
            .find_map(|id| ctx.localization.lookup(id))
            .map(|text| strip_markup(&text))
            .or(command_text)
            .filter(|label| !label.is_empty())
            .ok_or_else(|| HookError::MissingData("action label".to_string()))?;
        ActionPhrase::classify(&label)
    };

    let actor_name = name_or_fallback(ctx, actor);
    Ok(Some(Announcement::queued(phrase.sentence(&actor_name))))
}

fn begin_flee(ctx: &HookContext) {
    ctx.trackers.battle_command.begin_flee();
    ctx.scheduler.schedule(
        keys::FLEE_TIMEOUT,
        ctx.settings.flee_suppress_frames,
        |ctx: &HookContext| {
            debug!("Flee suppression timed out");
            ctx.trackers.battle_command.clear_flee();
            None
        },
    );
}

pub fn condition_added(ctx: &HookContext, target: &BattleUnit, condition_id: i32) -> HookResult {
    let condition = target
        .conditions()
        .iter()
        .find(|condition| condition.id == condition_id)
        .ok_or_else(|| HookError::MissingData(format!("condition {}", condition_id)))?;

    // Internal conditions have no display text and leave no trace in the dedup state
    if condition.is_hidden() {
        debug!(condition_id, "Skipping hidden condition");
        return Ok(None);
    }

    let name = resolve_unit_name(ctx, target)?;
    let condition_name = ctx
        .localization
        .lookup(&condition.mes_id)
        .map(|text| strip_markup(&text))
        .ok_or_else(|| HookError::Localization(condition.mes_id.clone()))?;

    let text = format!("{}: {}", name, condition_name);
    if !ctx.dedup.should_announce_text(contexts::BATTLE_STATUS, &text) {
        return Ok(None);
    }
    Ok(Some(Announcement::queued(text)))
}

pub fn battle_ended(ctx: &HookContext) -> HookResult {
    ctx.scheduler.cancel(keys::FLEE_TIMEOUT);
    ctx.policy.on_battle_end();
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestRig;
    use crate::domain::value_objects::{ConditionInfo, ObjectRef, Region};

    fn spoken(result: HookResult) -> Option<String> {
        result.ok().flatten().map(|a| a.text)
    }

    fn goblin(object: u64) -> BattleUnit {
        BattleUnit::Enemy {
            object: ObjectRef::new(object),
            mes_id_name: "MES_MONSTER_GOBLIN".to_string(),
            hp: 6,
            max_hp: 6,
            conditions: vec![
                ConditionInfo {
                    id: 3,
                    mes_id: "MES_COND_POISON".to_string(),
                },
                ConditionInfo {
                    id: 40,
                    mes_id: "None".to_string(),
                },
            ],
        }
    }

    fn luneth() -> BattleUnit {
        BattleUnit::Player {
            object: ObjectRef::new(0x500),
            name: "Luneth".to_string(),
            hp: 35,
            max_hp: 40,
            conditions: vec![],
        }
    }

    fn action(object: u64, command: &str) -> ActionData {
        ActionData {
            object: ObjectRef::new(object),
            item_mes_id: None,
            ability_mes_id: None,
            command_mes_id: Some(command.to_string()),
        }
    }

    fn rig() -> TestRig {
        let rig = TestRig::new();
        rig.messages.insert("MES_MONSTER_GOBLIN", "Goblin");
        rig.messages.insert("MES_COND_POISON", "Poison");
        rig.messages.insert("MES_CMD_FIGHT", "Fight");
        rig.messages.insert("MES_CMD_ESCAPE", "Flee");
        rig.messages.insert("MES_CMD_ITEM", "Item");
        rig.messages.insert("MES_ITEM_POTION", "Potion");
        rig
    }

    #[test]
    fn test_damage_is_queued_and_never_deduplicated() {
        let rig = rig();

        let first = damage_applied(&rig, &goblin(0x10), 8, HitType::Normal, false).unwrap();
        let second = damage_applied(&rig, &goblin(0x10), 8, HitType::Normal, false).unwrap();

        assert_eq!(first, Some(Announcement::queued("Goblin: 8 damage")));
        assert_eq!(second, first);
    }

    #[test]
    fn test_damage_falls_back_to_enemy_label() {
        let rig = TestRig::new();

        let text = spoken(damage_applied(&rig, &goblin(0x10), 0, HitType::Miss, false));

        assert_eq!(text.as_deref(), Some("Enemy: Miss"));
    }

    #[test]
    fn test_action_identity_dedup() {
        let rig = rig();

        let first = spoken(action_executed(&rig, &luneth(), &action(0x900, "MES_CMD_FIGHT")));
        let repeat = spoken(action_executed(&rig, &luneth(), &action(0x900, "MES_CMD_FIGHT")));
        let next = spoken(action_executed(&rig, &luneth(), &action(0x901, "MES_CMD_FIGHT")));

        assert_eq!(first.as_deref(), Some("Luneth attacks"));
        assert_eq!(repeat, None);
        assert_eq!(next.as_deref(), Some("Luneth attacks"));
    }

    #[test]
    fn test_item_label_wins_over_command() {
        let rig = rig();
        let mut data = action(0x900, "MES_CMD_ITEM");
        data.item_mes_id = Some("MES_ITEM_POTION".to_string());

        let text = spoken(action_executed(&rig, &luneth(), &data));

        assert_eq!(text.as_deref(), Some("Luneth, Potion"));
    }

    #[test]
    fn test_flee_mutes_command_bar_until_timeout() {
        let rig = rig();

        let text = spoken(action_executed(&rig, &luneth(), &action(0x900, "MES_CMD_ESCAPE")));
        assert_eq!(text.as_deref(), Some("Luneth flees"));
        assert!(rig.trackers.battle_command.is_fleeing());
        assert!(rig.scheduler.is_pending(keys::FLEE_TIMEOUT));

        for _ in 0..rig.settings.flee_suppress_frames {
            rig.scheduler.advance(&rig);
        }
        assert!(!rig.trackers.battle_command.is_fleeing());
    }

    #[test]
    fn test_failed_flee_clears_on_next_turn() {
        let rig = rig();
        command_focused(&rig, "Luneth", "MES_CMD_FIGHT").unwrap();
        action_executed(&rig, &luneth(), &action(0x900, "MES_CMD_ESCAPE")).unwrap();

        assert_eq!(command_focused(&rig, "Luneth", "MES_CMD_FIGHT"), Ok(None));

        let text = spoken(command_focused(&rig, "Arc", "MES_CMD_FIGHT"));
        assert_eq!(text.as_deref(), Some("Arc: Fight"));
        assert!(!rig.trackers.battle_command.is_fleeing());
        assert!(!rig.scheduler.is_pending(keys::FLEE_TIMEOUT));
    }

    #[test]
    fn test_hidden_condition_is_skipped_without_caching() {
        let rig = rig();

        assert_eq!(condition_added(&rig, &goblin(0x10), 40), Ok(None));

        let text = spoken(condition_added(&rig, &goblin(0x10), 3));
        assert_eq!(text.as_deref(), Some("Goblin: Poison"));
        assert_eq!(condition_added(&rig, &goblin(0x10), 3), Ok(None));

        rig.clock.advance_ms(60_000);
        assert_eq!(condition_added(&rig, &goblin(0x10), 3), Ok(None));
    }

    #[test]
    fn test_target_cursor_compares_identity() {
        let rig = rig();

        assert_eq!(spoken(target_focused(&rig, &goblin(0x10))).as_deref(), Some("Goblin"));
        assert_eq!(target_focused(&rig, &goblin(0x10)), Ok(None));
        assert_eq!(spoken(target_focused(&rig, &goblin(0x11))).as_deref(), Some("Goblin"));
        assert_eq!(
            spoken(target_focused(&rig, &luneth())).as_deref(),
            Some("Luneth, 35/40 HP")
        );
        assert!(rig.registry.is_active(Region::BattleTarget));
    }

    #[test]
    fn test_battle_end_forgets_status_history() {
        let rig = rig();
        condition_added(&rig, &goblin(0x10), 3).unwrap();

        battle_ended(&rig).unwrap();

        assert!(spoken(condition_added(&rig, &goblin(0x10), 3)).is_some());
    }

    #[test]
    fn test_command_window_drops_quick_repeats() {
        let rig = rig();

        assert!(spoken(command_focused(&rig, "Luneth", "MES_CMD_FIGHT")).is_some());
        assert!(spoken(command_focused(&rig, "Luneth", "MES_CMD_ITEM")).is_some());
        assert!(spoken(command_focused(&rig, "Luneth", "MES_CMD_ITEM")).is_none());
        assert!(rig.registry.is_active(Region::BattleCommand));
    }
}
