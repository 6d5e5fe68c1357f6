//! Hook table - Declarative list of engine methods to intercept
//!
//! Each binding names a host method and the `HookEvent` kind the installer
//! produces from it. The table is installed once at startup; a binding that
//! cannot be resolved is reported and skipped, and narration carries on with
//! whatever did install.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::application::ports::outbound::{
    HookInstallError, HookInstallerPort, HookTarget, HookTiming,
};
use crate::domain::events::HookEventKind;

const UI_KEY_INPUT: &str = "Serial.FF3.UI.KeyInput";
const LAST_KEY_INPUT: &str = "Last.UI.KeyInput";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookBinding {
    pub target: HookTarget,
    pub timing: HookTiming,
    pub event: HookEventKind,
}

impl HookBinding {
    fn after(type_name: &str, method: &str, event: HookEventKind) -> Self {
        Self {
            target: HookTarget::new(type_name, method),
            timing: HookTiming::After,
            event,
        }
    }

    fn before(type_name: &str, method: &str, event: HookEventKind) -> Self {
        Self {
            target: HookTarget::new(type_name, method),
            timing: HookTiming::Before,
            event,
        }
    }

    fn with_params(mut self, params: &[&str]) -> Self {
        self.target = self.target.with_params(params);
        self
    }
}

fn ui(controller: &str) -> String {
    format!("{}.{}", UI_KEY_INPUT, controller)
}

fn last_ui(controller: &str) -> String {
    format!("{}.{}", LAST_KEY_INPUT, controller)
}

/// The shipped table
pub fn default_bindings() -> Vec<HookBinding> {
    use HookEventKind as K;

    vec![
        // Item menu
        HookBinding::after(&ui("ItemWindowController"), "SetNextState", K::ItemMenuStateChanged),
        HookBinding::after(&ui("ItemListController"), "SelectContent", K::ItemSelectionChanged)
            .with_params(&["System.Int32"]),
        HookBinding::after(&ui("ItemUseController"), "SelectContent", K::ItemTargetFocused),
        // Magic menu
        HookBinding::after(&ui("AbilityWindowController"), "UpdateView", K::MagicWindowOpened),
        HookBinding::after(
            &ui("AbilityCommandController"),
            "SelectCommandByIndex",
            K::MagicMenuStateChanged,
        ),
        HookBinding::after(
            &ui("AbilityContentListController"),
            "SetDescriptionText",
            K::MagicSpellFocused,
        ),
        // Equipment
        HookBinding::after(&ui("EquipmentWindowController"), "SetNextState", K::EquipMenuStateChanged),
        HookBinding::after(&ui("EquipmentInfoWindowController"), "SetFocus", K::EquipSlotFocused),
        HookBinding::after(
            &ui("EquipmentSelectWindowController"),
            "SelectContent",
            K::EquipItemFocused,
        ),
        // Status
        HookBinding::after(&ui("StatusWindowController"), "SetNextState", K::StatusMenuStateChanged),
        HookBinding::after(&ui("StatusDetailsController"), "InitDisplay", K::StatusDetailsShown),
        // Popups
        HookBinding::after(&ui("CommonPopup"), "Open", K::PopupOpened),
        HookBinding::after(&ui("CommonPopup"), "SetCursor", K::PopupButtonFocused),
        HookBinding::before(&ui("CommonPopup"), "Close", K::PopupClosed),
        // Config
        HookBinding::after(&ui("ConfigController"), "SelectCommand", K::ConfigOptionFocused),
        HookBinding::after(&ui("ConfigController"), "ChangeValue", K::ConfigValueChanged),
        HookBinding::before(&ui("ConfigController"), "Close", K::ConfigMenuClosed),
        // Event item prompt
        HookBinding::after(&ui("EventItemSelectController"), "Show", K::EventItemSelectOpened),
        HookBinding::after(
            &ui("EventItemSelectController"),
            "SelectContent",
            K::EventItemFocused,
        ),
        HookBinding::before(&ui("EventItemSelectController"), "Close", K::EventItemSelectClosed),
        // Generic cursor
        HookBinding::after(&last_ui("CursorController"), "SetFocus", K::GenericFocusChanged)
            .with_params(&["System.Boolean"]),
        // Battle menus
        HookBinding::after(
            &last_ui("BattleCommandSelectController"),
            "SetCursor",
            K::BattleCommandFocused,
        ),
        HookBinding::after(
            &last_ui("BattleAbilityInfomationController"),
            "Show",
            K::BattleMagicOpened,
        ),
        HookBinding::after(&last_ui("BattleItemInfomationController"), "SelectContent", K::BattleItemFocused),
        HookBinding::after(
            &last_ui("BattleAbilityInfomationContentController"),
            "UpdateView_OwnedAbility",
            K::BattleMagicFocused,
        ),
        HookBinding::after(&last_ui("BattleTargetSelectController"), "SelectContent", K::BattleTargetFocused),
        // Battle log
        HookBinding::before("Last.Battle.BattleBasicFunction", "CreateDamageView", K::DamageApplied),
        HookBinding::before("Last.Battle.BattleActExecute", "ExecuteAction", K::ActionExecuted),
        HookBinding::after("Last.Battle.BattleConditionController", "Add", K::ConditionAdded),
        HookBinding::after("Last.Battle.BattlePlugManager", "Exit", K::BattleEnded),
        // Field
        HookBinding::after("Last.Map.FieldPlayer", "ChangeTransportation", K::TransportationChanged),
        HookBinding::after("Last.Map.FieldPlayer", "ChangeMoveState", K::MoveStateChanged),
        HookBinding::after("Last.Map.FieldPlayer", "GetOn", K::Boarded),
        HookBinding::after("Last.Map.FieldPlayer", "GetOff", K::Disembarked),
        HookBinding::after("Last.Map.FieldPlayer", "UpdateLandingEnable", K::LandingZoneChanged),
        HookBinding::after("Last.Map.FieldController", "GetMapTitleID", K::MapChanged),
        HookBinding::after("Last.Management.SceneManager", "ChangeToTitle", K::ReturnedToTitle),
        HookBinding::before("Last.Management.SceneManager", "Update", K::FrameTick),
    ]
}

/// Outcome of installing a hook table
#[derive(Debug, Default)]
pub struct HookReport {
    pub installed: Vec<HookBinding>,
    pub not_installed: Vec<(HookBinding, HookInstallError)>,
}

impl HookReport {
    pub fn is_complete(&self) -> bool {
        self.not_installed.is_empty()
    }

    /// Event kinds with no working binding at all
    pub fn missing_events(&self) -> Vec<HookEventKind> {
        let mut missing: Vec<HookEventKind> = self
            .not_installed
            .iter()
            .map(|(binding, _)| binding.event)
            .filter(|event| !self.installed.iter().any(|b| b.event == *event))
            .collect();
        missing.dedup();
        missing
    }
}

/// Install every binding, collecting failures instead of stopping at the first
#[instrument(skip(installer, bindings), fields(count = bindings.len()))]
pub fn install_all(installer: &dyn HookInstallerPort, bindings: &[HookBinding]) -> HookReport {
    let mut report = HookReport::default();
    for binding in bindings {
        match installer.install(&binding.target, binding.timing) {
            Ok(()) => report.installed.push(binding.clone()),
            Err(e) => {
                warn!(target_method = %binding.target, event = %binding.event, "Hook not installed: {}", e);
                report.not_installed.push((binding.clone(), e));
            }
        }
    }
    info!(
        installed = report.installed.len(),
        not_installed = report.not_installed.len(),
        "Hook table installed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockHookInstallerPort;
    use mockall::predicate::*;

    #[test]
    fn test_every_routed_event_has_a_binding() {
        let bindings = default_bindings();

        for kind in [
            HookEventKind::ItemSelectionChanged,
            HookEventKind::MagicSpellFocused,
            HookEventKind::DamageApplied,
            HookEventKind::TransportationChanged,
            HookEventKind::FrameTick,
        ] {
            assert!(bindings.iter().any(|b| b.event == kind), "no binding for {}", kind);
        }
    }

    #[test]
    fn test_install_all_collects_failures() {
        let mut installer = MockHookInstallerPort::new();
        installer
            .expect_install()
            .withf(|target, _| target.method == "SetDescriptionText")
            .times(1)
            .returning(|target, _| Err(HookInstallError::MethodNotFound(target.to_string())));
        installer
            .expect_install()
            .returning(|_, _| Ok(()));

        let bindings = default_bindings();
        let report = install_all(&installer, &bindings);

        assert!(!report.is_complete());
        assert_eq!(report.installed.len(), bindings.len() - 1);
        assert_eq!(report.missing_events(), vec![HookEventKind::MagicSpellFocused]);
    }

    #[test]
    fn test_overloads_carry_param_types() {
        let mut installer = MockHookInstallerPort::new();
        installer
            .expect_install()
            .with(
                function(|target: &HookTarget| target.param_types == ["System.Int32"]),
                eq(HookTiming::After),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let binding = HookBinding::after(&ui("ItemListController"), "SelectContent", HookEventKind::ItemSelectionChanged)
            .with_params(&["System.Int32"]);
        let report = install_all(&installer, &[binding]);

        assert!(report.is_complete());
    }
}
