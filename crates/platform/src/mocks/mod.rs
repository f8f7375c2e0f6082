//! Mock implementations for testing
//!
//! [`RecordingBoard`] implements every collaborator trait and records one
//! [`Call`] per invocation, in order. Tests assert on call counts and
//! relative positions instead of on hardware state.

#![cfg(any(test, feature = "std"))]

use crate::*;

/// Console handle handed out by [`RecordingBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockConsole(pub u32);

/// Timer handle handed out by [`RecordingBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTimer(pub u32);

/// PWM handle handed out by [`RecordingBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPwm(pub u32);

/// Delay tick source handed out by [`RecordingBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockTickSource(pub u32);

/// One recorded collaborator invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    /// [`HeapAllocator::init_heap`]
    InitHeap(HeapBounds),
    /// [`DebugConsole::init_debug_console`]
    InitDebugConsole,
    /// [`RuntimeBinding::init_runtime_binding`]
    InitRuntimeBinding {
        /// Library variant received
        library: RuntimeLibrary,
        /// Console handle received
        console: Option<MockConsole>,
    },
    /// [`TickTimers::init_softimer_tick`]
    InitSoftimerTick,
    /// [`TickTimers::init_periodic_tick`]
    InitPeriodicTick,
    /// [`DelayService::init_delay_tick_source`]
    InitDelayTickSource,
    /// [`DelayService::init_delay`]
    InitDelay {
        /// Tick source received
        source: MockTickSource,
        /// Priority ordinal received
        priority: u8,
    },
    /// [`Indicators::init_leds`]
    InitLeds,
    /// [`Indicators::init_buzzer`]
    InitBuzzer,
    /// [`EventInput::init_event_input`]
    InitEventInput,
    /// [`EventInput::init_key_gpio`]
    InitKeyGpio,
    /// [`PowerManagement::init_pmu`]
    InitPmu,
    /// [`IsrDefer::init_isr_defer`]
    InitIsrDefer,
}

/// Payload-free discriminant of [`Call`], for counting and ordering queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Heap allocator
    Heap,
    /// Debug console
    DebugConsole,
    /// C-library binding
    RuntimeBinding,
    /// Software-timer tick
    SoftimerTick,
    /// Periodic-timer tick
    PeriodicTick,
    /// Delay tick source
    DelayTickSource,
    /// Delay service
    Delay,
    /// LEDs
    Leds,
    /// Buzzer
    Buzzer,
    /// Event input manager
    EventInput,
    /// GPIO keys
    KeyGpio,
    /// PMU
    Pmu,
    /// Deferred ISR dispatch
    IsrDefer,
}

impl CallKind {
    /// Every kind, in bring-up order.
    pub const ALL: [CallKind; 13] = [
        CallKind::Heap,
        CallKind::DebugConsole,
        CallKind::RuntimeBinding,
        CallKind::SoftimerTick,
        CallKind::PeriodicTick,
        CallKind::DelayTickSource,
        CallKind::Delay,
        CallKind::Leds,
        CallKind::Buzzer,
        CallKind::EventInput,
        CallKind::KeyGpio,
        CallKind::Pmu,
        CallKind::IsrDefer,
    ];
}

impl Call {
    /// Discriminant of this call.
    pub fn kind(&self) -> CallKind {
        match self {
            Call::InitHeap(_) => CallKind::Heap,
            Call::InitDebugConsole => CallKind::DebugConsole,
            Call::InitRuntimeBinding { .. } => CallKind::RuntimeBinding,
            Call::InitSoftimerTick => CallKind::SoftimerTick,
            Call::InitPeriodicTick => CallKind::PeriodicTick,
            Call::InitDelayTickSource => CallKind::DelayTickSource,
            Call::InitDelay { .. } => CallKind::Delay,
            Call::InitLeds => CallKind::Leds,
            Call::InitBuzzer => CallKind::Buzzer,
            Call::InitEventInput => CallKind::EventInput,
            Call::InitKeyGpio => CallKind::KeyGpio,
            Call::InitPmu => CallKind::Pmu,
            Call::InitIsrDefer => CallKind::IsrDefer,
        }
    }
}

/// Call-recording board.
pub struct RecordingBoard {
    calls: heapless::Vec<Call, 32>,
    console_available: bool,
}

impl RecordingBoard {
    /// Console handle returned by a working debug console.
    pub const CONSOLE: MockConsole = MockConsole(0xC0);
    /// Handle returned by the software-timer tick initialiser.
    pub const SOFTIMER_TICK: MockTimer = MockTimer(0x51);
    /// Handle returned by the periodic tick initialiser.
    pub const PERIODIC_TICK: MockTimer = MockTimer(0x9E);
    /// Handle returned by the buzzer initialiser.
    pub const BUZZER_PWM: MockPwm = MockPwm(0xB2);
    /// Tick source returned by the delay tick source initialiser.
    pub const DELAY_SOURCE: MockTickSource = MockTickSource(0x57);

    /// Create a board whose debug console comes up.
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
            console_available: true,
        }
    }

    /// Create a board whose debug console reports itself absent.
    pub fn without_console() -> Self {
        Self {
            console_available: false,
            ..Self::new()
        }
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Recorded kinds, oldest first.
    pub fn kinds(&self) -> impl Iterator<Item = CallKind> + '_ {
        self.calls.iter().map(Call::kind)
    }

    /// Number of calls of `kind`.
    pub fn count(&self, kind: CallKind) -> usize {
        self.kinds().filter(|k| *k == kind).count()
    }

    /// Index of the first call of `kind`.
    pub fn position(&self, kind: CallKind) -> Option<usize> {
        self.kinds().position(|k| k == kind)
    }

    /// `true` if `kind` was called at least once.
    pub fn called(&self, kind: CallKind) -> bool {
        self.position(kind).is_some()
    }

    fn record(&mut self, call: Call) {
        // Bring-up makes at most 13 calls; overflow means the sequencer looped.
        let _ = self.calls.push(call);
    }
}

impl Default for RecordingBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapAllocator for RecordingBoard {
    fn init_heap(&mut self, bounds: HeapBounds) {
        self.record(Call::InitHeap(bounds));
    }
}

impl DebugConsole for RecordingBoard {
    type Console = MockConsole;

    fn init_debug_console(&mut self) -> Option<MockConsole> {
        self.record(Call::InitDebugConsole);
        self.console_available.then_some(Self::CONSOLE)
    }
}

impl RuntimeBinding for RecordingBoard {
    fn init_runtime_binding(&mut self, library: RuntimeLibrary, console: Option<MockConsole>) {
        self.record(Call::InitRuntimeBinding { library, console });
    }
}

impl TickTimers for RecordingBoard {
    type Timer = MockTimer;

    fn init_softimer_tick(&mut self) -> MockTimer {
        self.record(Call::InitSoftimerTick);
        Self::SOFTIMER_TICK
    }

    fn init_periodic_tick(&mut self) -> MockTimer {
        self.record(Call::InitPeriodicTick);
        Self::PERIODIC_TICK
    }
}

impl DelayService for RecordingBoard {
    type TickSource = MockTickSource;

    fn init_delay_tick_source(&mut self) -> MockTickSource {
        self.record(Call::InitDelayTickSource);
        Self::DELAY_SOURCE
    }

    fn init_delay(&mut self, source: MockTickSource, priority: u8) {
        self.record(Call::InitDelay { source, priority });
    }
}

impl Indicators for RecordingBoard {
    type Pwm = MockPwm;

    fn init_leds(&mut self) {
        self.record(Call::InitLeds);
    }

    fn init_buzzer(&mut self) -> MockPwm {
        self.record(Call::InitBuzzer);
        Self::BUZZER_PWM
    }
}

impl EventInput for RecordingBoard {
    fn init_event_input(&mut self) {
        self.record(Call::InitEventInput);
    }

    fn init_key_gpio(&mut self) {
        self.record(Call::InitKeyGpio);
    }
}

impl PowerManagement for RecordingBoard {
    fn init_pmu(&mut self) {
        self.record(Call::InitPmu);
    }
}

impl IsrDefer for RecordingBoard {
    fn init_isr_defer(&mut self) {
        self.record(Call::InitIsrDefer);
    }
}
