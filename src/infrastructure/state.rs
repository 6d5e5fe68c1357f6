//! Replay state - Wires the narration engine to replay adapters

use std::rc::Rc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::application::hooks::HookContext;
use crate::application::ports::outbound::{LocalizationPort, SpeechPort};
use crate::application::services::{default_bindings, install_all, HookReport, NarrationService};
use crate::domain::events::HookEvent;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::installer::ReplayInstaller;
use crate::infrastructure::localization::MessageTable;
use crate::infrastructure::memory::{MemoryAccessor, MemoryGameProbe, OffsetTable, ReplayMemory};
use crate::infrastructure::speech::ConsoleSpeech;
use crate::infrastructure::trace::TraceRecord;

pub struct NarratorState {
    pub config: AppConfig,
    pub service: NarrationService,
    pub probe: Rc<MemoryGameProbe>,
    pub memory: Rc<ReplayMemory>,
    pub hook_report: HookReport,
}

impl NarratorState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let speech: Rc<dyn SpeechPort> = Rc::new(ConsoleSpeech::new());
        Self::with_speech(config, speech).await
    }

    pub async fn with_speech(config: AppConfig, speech: Rc<dyn SpeechPort>) -> Result<Self> {
        let messages = match &config.messages_path {
            Some(path) => MessageTable::load(path).await?,
            None => {
                warn!("No message table configured; localized text will be missing");
                MessageTable::default()
            }
        };
        let localization: Rc<dyn LocalizationPort> = Rc::new(messages);

        let offsets = OffsetTable::load(config.offsets_path.as_deref())?;
        info!(offsets = offsets.len(), "Offset table loaded");

        let memory = Rc::new(ReplayMemory::new());
        let probe = Rc::new(MemoryGameProbe::new(MemoryAccessor::new(
            memory.clone(),
            offsets,
        )));

        let installer = ReplayInstaller::new(config.disabled_hooks.iter().cloned());
        let hook_report = install_all(&installer, &default_bindings());
        if hook_report.is_complete() {
            info!(hooks = hook_report.installed.len(), "All hooks installed");
        } else {
            warn!(
                installed = hook_report.installed.len(),
                failed = hook_report.not_installed.len(),
                "Some hooks failed to install"
            );
        }

        let context = HookContext::new(
            probe.clone(),
            localization,
            Rc::new(SystemClock),
            config.settings.clone(),
        );
        let service = NarrationService::new(context, speech);

        Ok(Self {
            config,
            service,
            probe,
            memory,
            hook_report,
        })
    }

    /// Apply one trace record. Returns how many frames it asks to elapse.
    pub fn apply(&self, record: &TraceRecord) -> Result<u32> {
        match record {
            TraceRecord::Hook { event } => {
                if self.hook_report.missing_events().contains(&event.kind()) {
                    debug!(event = %event.name(), "Dropping event with no installed hook");
                } else {
                    self.service.dispatch(event);
                }
                Ok(0)
            }
            TraceRecord::Bind { structure, base } => {
                self.probe.bind(structure, *base);
                Ok(0)
            }
            TraceRecord::Unbind { structure } => {
                self.probe.unbind(structure);
                Ok(0)
            }
            TraceRecord::Memory {
                structure,
                field,
                value,
            } => {
                let base = self
                    .probe
                    .base(structure)
                    .with_context(|| format!("Memory write to unbound {}", structure))?;
                let offset = self.probe.accessor().offsets().offset(structure, field)?;
                self.memory
                    .write(base.wrapping_add(offset), &value.to_le_bytes());
                Ok(0)
            }
            TraceRecord::Frame { count } => Ok(*count),
        }
    }

    /// Advance one frame
    pub fn frame(&self) {
        self.service.dispatch(&HookEvent::FrameTick);
    }
}
