//! Outbound ports - Interfaces the narration engine requires from the host

mod clock_port;
mod game_probe_port;
mod hook_installer_port;
mod localization_port;
mod memory_port;
mod speech_port;

pub use clock_port::ClockPort;
pub use game_probe_port::{GameProbePort, ProbeError};
#[cfg(test)]
pub use hook_installer_port::MockHookInstallerPort;
pub use hook_installer_port::{HookInstallError, HookInstallerPort, HookTarget, HookTiming};
pub use localization_port::LocalizationPort;
pub use memory_port::{MemoryError, MemoryReaderPort};
pub use speech_port::SpeechPort;
