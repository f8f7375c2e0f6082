//! Board configuration.
//!
//! A [`BoardConfig`] is the set of feature switches that decides which
//! bring-up steps run. It is a plain `Copy` value, normally a `const` in the
//! firmware image, and nothing in the bring-up sequence writes to it.
//!
//! Two ways to build one:
//!
//! ```
//! use board::BoardConfig;
//!
//! // Explicit, in code:
//! const CONFIG: BoardConfig = BoardConfig::NONE
//!     .with_debug(true)
//!     .with_stdlib(true)
//!     .with_system_tick(true);
//!
//! // From the `board` crate's Cargo features:
//! const FROM_FEATURES: BoardConfig = BoardConfig::from_cargo_features();
//! # let _ = (CONFIG, FROM_FEATURES);
//! ```
//!
//! # Implicit enablement
//!
//! Some switches pull others in: GPIO keys need the event input manager and
//! a software-timer tick, so `key_gpio` alone runs both. That is accepted at
//! run time (each case is logged as a [`ConfigIssue`]). A board that wants it
//! rejected at build time asserts [`BoardConfig::is_explicit`]:
//!
//! ```
//! use board::BoardConfig;
//!
//! const CONFIG: BoardConfig = BoardConfig::NONE
//!     .with_key(true)
//!     .with_key_gpio(true)
//!     .with_softimer(true);
//! const _: () = assert!(CONFIG.is_explicit());
//! ```

use platform::{RuntimeLibrary, Toolchain};

/// Feature switches for board bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Debug console output wanted.
    pub debug: bool,
    /// Debug subsystem compiled in. The console only comes up when both
    /// this and [`debug`](Self::debug) are set.
    pub debug_subsystem_active: bool,
    /// Bind the C library's standard I/O.
    pub stdlib: bool,
    /// Which C library is linked, used when [`stdlib`](Self::stdlib) is set.
    pub runtime_library: RuntimeLibrary,
    /// Software timers multiplexed over a base timer.
    pub softimer: bool,
    /// Plain periodic system tick.
    pub system_tick: bool,
    /// Busy-wait delay service.
    pub delay: bool,
    /// On-board LEDs.
    pub led: bool,
    /// Buzzer.
    pub buzzer: bool,
    /// Event input manager (keys of any kind).
    pub key: bool,
    /// GPIO keys.
    pub key_gpio: bool,
    /// Power management unit.
    pub pmu: bool,
    /// Deferred interrupt dispatch.
    pub isr_defer: bool,
}

/// How the system tick timer is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickStrategy {
    /// Software timers multiplexed over a base timer.
    SoftTimerMultiplexed,
    /// Plain periodic-interrupt timer.
    PeriodicTimer,
    /// No system tick timer.
    Absent,
}

impl TickStrategy {
    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SoftTimerMultiplexed => "softimer",
            Self::PeriodicTimer => "periodic",
            Self::Absent => "none",
        }
    }
}

/// A configuration that runs, but not quite as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigIssue {
    /// `key_gpio` without `softimer`: the software-timer tick starts anyway.
    KeyGpioImpliesSoftTimer,
    /// `key_gpio` without `key`: the event input manager starts anyway.
    KeyGpioImpliesEventInput,
    /// `system_tick` is set but the software-timer tick wins, so no periodic
    /// timer is created.
    PeriodicTickShadowed,
    /// `debug` is set but the debug subsystem is not active; no console.
    DebugWithoutSubsystem,
    /// `stdlib` is set without a console; standard I/O stays unredirected.
    StdlibWithoutConsole,
}

impl ConfigIssue {
    /// Every issue, in check order.
    pub const ALL: [ConfigIssue; 5] = [
        ConfigIssue::KeyGpioImpliesSoftTimer,
        ConfigIssue::KeyGpioImpliesEventInput,
        ConfigIssue::PeriodicTickShadowed,
        ConfigIssue::DebugWithoutSubsystem,
        ConfigIssue::StdlibWithoutConsole,
    ];

    /// One-line description for logs.
    pub const fn describe(self) -> &'static str {
        match self {
            Self::KeyGpioImpliesSoftTimer => "key-gpio enables the softimer tick implicitly",
            Self::KeyGpioImpliesEventInput => "key-gpio enables event input implicitly",
            Self::PeriodicTickShadowed => "system-tick ignored: softimer tick takes precedence",
            Self::DebugWithoutSubsystem => "debug requested but debug subsystem inactive",
            Self::StdlibWithoutConsole => "stdlib binding has no console to redirect to",
        }
    }

    /// `true` when an implicit dependency turned a step on that the
    /// configuration did not ask for.
    pub const fn is_implicit_enablement(self) -> bool {
        matches!(
            self,
            Self::KeyGpioImpliesSoftTimer | Self::KeyGpioImpliesEventInput
        )
    }
}

impl core::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.describe())
    }
}

impl BoardConfig {
    /// Every switch off; newlib binding.
    pub const NONE: Self = Self {
        debug: false,
        debug_subsystem_active: false,
        stdlib: false,
        runtime_library: RuntimeLibrary::Newlib,
        softimer: false,
        system_tick: false,
        delay: false,
        led: false,
        buzzer: false,
        key: false,
        key_gpio: false,
        pmu: false,
        isr_defer: false,
    };

    /// Configuration selected by the `board` crate's Cargo features.
    ///
    /// `armcc` / `microlib` pick the runtime library; everything else maps
    /// one feature to one switch (`vdebug` is the debug subsystem).
    pub const fn from_cargo_features() -> Self {
        let toolchain = if cfg!(feature = "armcc") {
            Toolchain::ArmCc {
                microlib: cfg!(feature = "microlib"),
            }
        } else {
            Toolchain::Gnu
        };
        Self {
            debug: cfg!(feature = "debug"),
            debug_subsystem_active: cfg!(feature = "vdebug"),
            stdlib: cfg!(feature = "stdlib"),
            runtime_library: RuntimeLibrary::for_toolchain(toolchain),
            softimer: cfg!(feature = "softimer"),
            system_tick: cfg!(feature = "system-tick"),
            delay: cfg!(feature = "delay"),
            led: cfg!(feature = "led"),
            buzzer: cfg!(feature = "buzzer"),
            key: cfg!(feature = "key"),
            key_gpio: cfg!(feature = "key-gpio"),
            pmu: cfg!(feature = "pmu"),
            isr_defer: cfg!(feature = "isr-defer"),
        }
    }

    /// Set `debug` and `debug_subsystem_active` together.
    pub const fn with_debug(mut self, on: bool) -> Self {
        self.debug = on;
        self.debug_subsystem_active = on;
        self
    }

    /// Set `debug_subsystem_active` alone.
    pub const fn with_debug_subsystem(mut self, on: bool) -> Self {
        self.debug_subsystem_active = on;
        self
    }

    /// Set `stdlib`.
    pub const fn with_stdlib(mut self, on: bool) -> Self {
        self.stdlib = on;
        self
    }

    /// Set the runtime library.
    pub const fn with_runtime_library(mut self, library: RuntimeLibrary) -> Self {
        self.runtime_library = library;
        self
    }

    /// Set `softimer`.
    pub const fn with_softimer(mut self, on: bool) -> Self {
        self.softimer = on;
        self
    }

    /// Set `system_tick`.
    pub const fn with_system_tick(mut self, on: bool) -> Self {
        self.system_tick = on;
        self
    }

    /// Set `delay`.
    pub const fn with_delay(mut self, on: bool) -> Self {
        self.delay = on;
        self
    }

    /// Set `led`.
    pub const fn with_led(mut self, on: bool) -> Self {
        self.led = on;
        self
    }

    /// Set `buzzer`.
    pub const fn with_buzzer(mut self, on: bool) -> Self {
        self.buzzer = on;
        self
    }

    /// Set `key`.
    pub const fn with_key(mut self, on: bool) -> Self {
        self.key = on;
        self
    }

    /// Set `key_gpio`.
    pub const fn with_key_gpio(mut self, on: bool) -> Self {
        self.key_gpio = on;
        self
    }

    /// Set `pmu`.
    pub const fn with_pmu(mut self, on: bool) -> Self {
        self.pmu = on;
        self
    }

    /// Set `isr_defer`.
    pub const fn with_isr_defer(mut self, on: bool) -> Self {
        self.isr_defer = on;
        self
    }

    /// `true` when the debug console step runs.
    pub const fn console_enabled(&self) -> bool {
        self.debug && self.debug_subsystem_active
    }

    /// `true` when the event input manager step runs.
    pub const fn event_input_enabled(&self) -> bool {
        self.key || self.key_gpio
    }

    /// Which system tick timer, if any, bring-up creates.
    ///
    /// Software-timer multiplexing wins over the plain periodic timer; GPIO
    /// keys need it for debouncing.
    pub const fn tick_strategy(&self) -> TickStrategy {
        if self.softimer || self.key_gpio {
            TickStrategy::SoftTimerMultiplexed
        } else if self.system_tick {
            TickStrategy::PeriodicTimer
        } else {
            TickStrategy::Absent
        }
    }

    /// `true` if `issue` applies to this configuration.
    pub const fn has_issue(&self, issue: ConfigIssue) -> bool {
        match issue {
            ConfigIssue::KeyGpioImpliesSoftTimer => self.key_gpio && !self.softimer,
            ConfigIssue::KeyGpioImpliesEventInput => self.key_gpio && !self.key,
            ConfigIssue::PeriodicTickShadowed => {
                self.system_tick
                    && matches!(self.tick_strategy(), TickStrategy::SoftTimerMultiplexed)
            }
            ConfigIssue::DebugWithoutSubsystem => self.debug && !self.debug_subsystem_active,
            ConfigIssue::StdlibWithoutConsole => self.stdlib && !self.console_enabled(),
        }
    }

    /// Every issue that applies, in [`ConfigIssue::ALL`] order.
    pub fn issues(&self) -> impl Iterator<Item = ConfigIssue> + '_ {
        ConfigIssue::ALL
            .into_iter()
            .filter(move |issue| self.has_issue(*issue))
    }

    /// `true` when no step is switched on implicitly.
    ///
    /// `const`, so a board can refuse implicit enablement at build time with
    /// `const _: () = assert!(CONFIG.is_explicit());`.
    pub const fn is_explicit(&self) -> bool {
        !self.has_issue(ConfigIssue::KeyGpioImpliesSoftTimer)
            && !self.has_issue(ConfigIssue::KeyGpioImpliesEventInput)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::NONE
    }
}
