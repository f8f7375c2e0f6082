//! Ordered bring-up step table.
//!
//! The order of [`Step::ALL`] is the initialization order. Configuration
//! only removes steps from it, never reorders them.
//!
//! # Ordering constraints
//!
//! - Heap before everything that may allocate.
//! - Debug console before the C-library binding that redirects into it.
//! - Event input manager before the GPIO keys that register with it.
//! - Deferred ISR dispatch last: once it runs, any interrupt may hand work to
//!   any subsystem, so all of them must already be up.

use crate::config::{BoardConfig, TickStrategy};

/// Number of steps in the table.
pub const STEP_COUNT: usize = 13;

/// One bring-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Locate the heap region.
    ResolveHeapBounds,
    /// Hand the region to the allocator.
    InitHeap,
    /// Bring up the debug console.
    DebugConsole,
    /// Bind the C library's standard I/O to the console.
    RuntimeBinding,
    /// Software-timer tick over a base timer.
    SoftimerTick,
    /// Plain periodic system tick.
    PeriodicTick,
    /// Delay service on its own tick source.
    Delay,
    /// On-board LEDs.
    Leds,
    /// Buzzer PWM channel.
    Buzzer,
    /// Event input manager.
    EventInput,
    /// GPIO keys.
    KeyGpio,
    /// Power management unit.
    Pmu,
    /// Deferred interrupt dispatch.
    IsrDefer,
}

impl Step {
    /// Every step, in initialization order.
    pub const ALL: [Step; STEP_COUNT] = [
        Step::ResolveHeapBounds,
        Step::InitHeap,
        Step::DebugConsole,
        Step::RuntimeBinding,
        Step::SoftimerTick,
        Step::PeriodicTick,
        Step::Delay,
        Step::Leds,
        Step::Buzzer,
        Step::EventInput,
        Step::KeyGpio,
        Step::Pmu,
        Step::IsrDefer,
    ];

    /// Short name for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Step::ResolveHeapBounds => "heap-bounds",
            Step::InitHeap => "heap",
            Step::DebugConsole => "debug-console",
            Step::RuntimeBinding => "stdlib-binding",
            Step::SoftimerTick => "softimer-tick",
            Step::PeriodicTick => "periodic-tick",
            Step::Delay => "delay",
            Step::Leds => "led",
            Step::Buzzer => "buzzer",
            Step::EventInput => "event-input",
            Step::KeyGpio => "key-gpio",
            Step::Pmu => "pmu",
            Step::IsrDefer => "isr-defer",
        }
    }

    /// Whether `config` includes this step.
    pub const fn is_included(self, config: &BoardConfig) -> bool {
        match self {
            Step::ResolveHeapBounds | Step::InitHeap => true,
            Step::DebugConsole => config.console_enabled(),
            Step::RuntimeBinding => config.stdlib,
            Step::SoftimerTick => {
                matches!(config.tick_strategy(), TickStrategy::SoftTimerMultiplexed)
            }
            Step::PeriodicTick => matches!(config.tick_strategy(), TickStrategy::PeriodicTimer),
            Step::Delay => config.delay,
            Step::Leds => config.led,
            Step::Buzzer => config.buzzer,
            Step::EventInput => config.event_input_enabled(),
            Step::KeyGpio => config.key_gpio,
            Step::Pmu => config.pmu,
            Step::IsrDefer => config.isr_defer,
        }
    }
}

/// Included steps of one configuration, in order.
pub type BringUpPlan = heapless::Vec<Step, STEP_COUNT>;

impl BoardConfig {
    /// The steps bring-up runs for this configuration, in order.
    pub fn plan(&self) -> BringUpPlan {
        Step::ALL
            .into_iter()
            .filter(|step| step.is_included(self))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted() {
        assert!(Step::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_config_plans_heap_only() {
        assert_eq!(
            BoardConfig::NONE.plan().as_slice(),
            &[Step::ResolveHeapBounds, Step::InitHeap]
        );
    }

    #[test]
    fn test_key_gpio_plan() {
        let plan = BoardConfig::NONE.with_key_gpio(true).plan();
        assert_eq!(
            plan.as_slice(),
            &[
                Step::ResolveHeapBounds,
                Step::InitHeap,
                Step::SoftimerTick,
                Step::EventInput,
                Step::KeyGpio
            ]
        );
    }

    #[test]
    fn test_full_plan_contains_every_step_but_one_tick() {
        let cfg = BoardConfig::NONE
            .with_debug(true)
            .with_stdlib(true)
            .with_softimer(true)
            .with_system_tick(true)
            .with_delay(true)
            .with_led(true)
            .with_buzzer(true)
            .with_key(true)
            .with_key_gpio(true)
            .with_pmu(true)
            .with_isr_defer(true);
        let plan = cfg.plan();
        assert_eq!(plan.len(), STEP_COUNT - 1);
        assert!(!plan.contains(&Step::PeriodicTick));
        assert_eq!(plan.last(), Some(&Step::IsrDefer));
    }

    #[test]
    fn test_names_are_unique() {
        for a in Step::ALL {
            let same = Step::ALL.iter().filter(|b| b.name() == a.name()).count();
            assert_eq!(same, 1, "duplicate step name {}", a.name());
        }
    }
}
