//! Replay hook installer
//!
//! There is no host to patch during a replay, so installation only validates
//! the target and records it. Methods listed as disabled fail the way a
//! renamed method would after a game update, which exercises the
//! not-installed path end to end.

use std::cell::RefCell;
use std::collections::HashSet;

use tracing::debug;

use crate::application::ports::outbound::{
    HookInstallError, HookInstallerPort, HookTarget, HookTiming,
};

#[derive(Debug, Default)]
pub struct ReplayInstaller {
    disabled: HashSet<String>,
    installed: RefCell<Vec<(HookTarget, HookTiming)>>,
}

impl ReplayInstaller {
    /// `disabled` entries match either `Type::Method` or a bare method name
    pub fn new(disabled: impl IntoIterator<Item = String>) -> Self {
        Self {
            disabled: disabled.into_iter().collect(),
            installed: RefCell::new(Vec::new()),
        }
    }

    pub fn installed(&self) -> Vec<(HookTarget, HookTiming)> {
        self.installed.borrow().clone()
    }

    fn is_disabled(&self, target: &HookTarget) -> bool {
        self.disabled.contains(&target.method)
            || self
                .disabled
                .contains(&format!("{}::{}", target.type_name, target.method))
    }
}

impl HookInstallerPort for ReplayInstaller {
    fn install(&self, target: &HookTarget, timing: HookTiming) -> Result<(), HookInstallError> {
        if target.type_name.trim().is_empty() {
            return Err(HookInstallError::TypeNotFound(target.to_string()));
        }
        if target.method.trim().is_empty() || self.is_disabled(target) {
            return Err(HookInstallError::MethodNotFound(target.to_string()));
        }
        let mut installed = self.installed.borrow_mut();
        if installed.iter().any(|(t, when)| t == target && *when == timing) {
            return Err(HookInstallError::Rejected(format!("{} already hooked", target)));
        }
        debug!(target_method = %target, ?timing, "Hook installed");
        installed.push((target.clone(), timing));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_methods_are_not_found() {
        let installer = ReplayInstaller::new(vec!["Last.Map.FieldPlayer::GetOn".to_string()]);

        let get_on = HookTarget::new("Last.Map.FieldPlayer", "GetOn");
        let get_off = HookTarget::new("Last.Map.FieldPlayer", "GetOff");

        assert!(matches!(
            installer.install(&get_on, HookTiming::After),
            Err(HookInstallError::MethodNotFound(_))
        ));
        assert_eq!(installer.install(&get_off, HookTiming::After), Ok(()));
        assert!(matches!(
            installer.install(&get_off, HookTiming::After),
            Err(HookInstallError::Rejected(_))
        ));
        assert_eq!(installer.installed().len(), 1);
    }
}
