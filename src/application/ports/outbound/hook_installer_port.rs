//! Hook installer port - Method interception in the host process

use serde::{Deserialize, Serialize};

/// A method in the host, identified the way the host's metadata API needs it.
///
/// `param_types` disambiguates overloads; leave it empty when the name is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookTarget {
    pub type_name: String,
    pub method: String,
    #[serde(default)]
    pub param_types: Vec<String>,
}

impl HookTarget {
    pub fn new(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            method: method.into(),
            param_types: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: &[&str]) -> Self {
        self.param_types = params.iter().map(|p| p.to_string()).collect();
        self
    }
}

impl std::fmt::Display for HookTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}({})", self.type_name, self.method, self.param_types.join(", "))
    }
}

/// Whether the callback runs before or after the original method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookTiming {
    Before,
    After,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookInstallError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Ambiguous overload: {0}")]
    AmbiguousOverload(String),

    #[error("Patch rejected: {0}")]
    Rejected(String),
}

/// Port for instrumenting host methods
///
/// The installer owns the translation from a raw intercepted call into a
/// `HookEvent`; the narration side only declares what it wants hooked.
#[cfg_attr(test, mockall::automock)]
pub trait HookInstallerPort {
    fn install(&self, target: &HookTarget, timing: HookTiming) -> Result<(), HookInstallError>;
}
