//! Hand-written port fakes and a fully wired rig for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::application::hooks::HookContext;
use crate::application::ports::outbound::{
    ClockPort, GameProbePort, LocalizationPort, MemoryError, ProbeError, SpeechPort,
};
use crate::application::services::NarrationService;
use crate::domain::value_objects::{
    BattleMenuState, EquipMenuState, ItemMenuState, MagicMenuState, NarratorSettings,
    StatusMenuState,
};

pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + Duration::milliseconds(ms));
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Probe whose answers are set directly by the test
pub struct ScriptedProbe {
    pub item: Cell<ItemMenuState>,
    pub magic: Cell<MagicMenuState>,
    pub equip: Cell<EquipMenuState>,
    pub status: Cell<StatusMenuState>,
    pub battle: Cell<BattleMenuState>,
    pub popup_open: Cell<bool>,
    pub config_open: Cell<bool>,
    pub event_item_open: Cell<bool>,
    pub transport: Cell<Option<i32>>,
    pub map: Cell<Option<i32>>,
    /// Every read fails while set
    pub fail: Cell<bool>,
}

impl Default for ScriptedProbe {
    fn default() -> Self {
        Self {
            item: Cell::new(ItemMenuState::None),
            magic: Cell::new(MagicMenuState::None),
            equip: Cell::new(EquipMenuState::None),
            status: Cell::new(StatusMenuState::None),
            battle: Cell::new(BattleMenuState::Hidden),
            popup_open: Cell::new(false),
            config_open: Cell::new(false),
            event_item_open: Cell::new(false),
            transport: Cell::new(Some(1)),
            map: Cell::new(None),
            fail: Cell::new(false),
        }
    }
}

impl ScriptedProbe {
    fn read<T: Copy>(&self, cell: &Cell<T>) -> Result<T, ProbeError> {
        if self.fail.get() {
            return Err(MemoryError::NullBase("scripted failure".to_string()).into());
        }
        Ok(cell.get())
    }
}

impl GameProbePort for ScriptedProbe {
    fn item_menu_state(&self) -> Result<ItemMenuState, ProbeError> {
        self.read(&self.item)
    }

    fn magic_menu_state(&self) -> Result<MagicMenuState, ProbeError> {
        self.read(&self.magic)
    }

    fn equip_menu_state(&self) -> Result<EquipMenuState, ProbeError> {
        self.read(&self.equip)
    }

    fn status_menu_state(&self) -> Result<StatusMenuState, ProbeError> {
        self.read(&self.status)
    }

    fn battle_menu_state(&self) -> Result<BattleMenuState, ProbeError> {
        self.read(&self.battle)
    }

    fn is_popup_open(&self) -> Result<bool, ProbeError> {
        self.read(&self.popup_open)
    }

    fn is_config_open(&self) -> Result<bool, ProbeError> {
        self.read(&self.config_open)
    }

    fn is_event_item_select_open(&self) -> Result<bool, ProbeError> {
        self.read(&self.event_item_open)
    }

    fn transport_mode_id(&self) -> Result<Option<i32>, ProbeError> {
        self.read(&self.transport)
    }

    fn current_map_id(&self) -> Result<Option<i32>, ProbeError> {
        self.read(&self.map)
    }
}

#[derive(Default)]
pub struct MapLocalization {
    messages: RefCell<HashMap<String, String>>,
}

impl MapLocalization {
    pub fn insert(&self, id: &str, text: &str) {
        self.messages
            .borrow_mut()
            .insert(id.to_string(), text.to_string());
    }
}

impl LocalizationPort for MapLocalization {
    fn get_message(&self, message_id: &str) -> Option<String> {
        self.messages.borrow().get(message_id).cloned()
    }
}

#[derive(Default)]
pub struct RecordingSpeech {
    spoken: RefCell<Vec<(String, bool)>>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<(String, bool)> {
        self.spoken.borrow().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.spoken.borrow().iter().map(|(text, _)| text.clone()).collect()
    }
}

impl SpeechPort for RecordingSpeech {
    fn speak(&self, text: &str, interrupt: bool) {
        self.spoken.borrow_mut().push((text.to_string(), interrupt));
    }
}

/// Narration service over fakes, with handles to steer them.
/// Derefs to the hook context so tests can reach trackers and the registry.
pub struct TestRig {
    pub clock: Rc<ManualClock>,
    pub probe: Rc<ScriptedProbe>,
    pub messages: Rc<MapLocalization>,
    pub speech: Rc<RecordingSpeech>,
    pub service: NarrationService,
}

impl TestRig {
    pub fn new() -> Self {
        Self::with_settings(NarratorSettings::default())
    }

    pub fn with_settings(settings: NarratorSettings) -> Self {
        let clock = Rc::new(ManualClock::new());
        let probe = Rc::new(ScriptedProbe::default());
        let messages = Rc::new(MapLocalization::default());
        let speech = Rc::new(RecordingSpeech::default());

        let context = HookContext::new(probe.clone(), messages.clone(), clock.clone(), settings);
        let service = NarrationService::new(context, speech.clone());

        Self {
            clock,
            probe,
            messages,
            speech,
            service,
        }
    }
}

impl Deref for TestRig {
    type Target = HookContext;

    fn deref(&self) -> &HookContext {
        self.service.context()
    }
}
