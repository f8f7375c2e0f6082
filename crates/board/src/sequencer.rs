//! Board bring-up sequencer.
//!
//! Runs the [`Step`] table once, in order, skipping what the configuration
//! leaves out. The sequencer trusts its collaborators: it does not check
//! whether a step worked, does not retry and does not roll back. A failing
//! initialiser reports through its own channel (trap, invalid handle, console
//! message) and bring-up carries on.

use platform::{BoardHal, DebugConsole, HeapBoundsSource, Indicators, TickTimers, DELAY_PRIORITY};

use crate::config::BoardConfig;
use crate::services::{BoardServices, WriteOnce};
use crate::step::Step;

/// [`BoardServices`] with the handle types of board `H`.
pub type Services<H> = BoardServices<
    <H as DebugConsole>::Console,
    <H as TickTimers>::Timer,
    <H as Indicators>::Pwm,
>;

struct Sequencer<'a, H: BoardHal> {
    config: &'a BoardConfig,
    hal: &'a mut H,
    services: Services<H>,
}

impl<'a, H: BoardHal> Sequencer<'a, H> {
    /// Run `body` if `step` is included. `None` when skipped.
    fn step<R>(&mut self, step: Step, body: impl FnOnce(&mut H) -> R) -> Option<R> {
        if !step.is_included(self.config) {
            trace!("skip {}", step.name());
            return None;
        }
        debug!("init {}", step.name());
        let out = body(&mut *self.hal);
        // Capacity equals the step count and each step runs at most once.
        let _ = self.services.completed.push(step);
        Some(out)
    }
}

fn fill<V>(slot: &mut WriteOnce<V>, value: V, step: Step) {
    if slot.set(value).is_err() {
        warn!("{}: handle already assigned, keeping the first", step.name());
    }
}

/// Bring the board from reset state to application-ready.
///
/// Call exactly once, before anything uses the console, the heap, timing
/// services or the returned handles. Calling it again re-runs every
/// initialiser; nothing here guards against that (the `hardware` module's
/// `bring_up` does).
///
/// Order, each step gated by `config`:
///
/// 1. resolve heap bounds through `heap_source`
/// 2. heap allocator
/// 3. debug console (`debug` and `debug_subsystem_active`)
/// 4. C-library binding with the console or `None` (`stdlib`)
/// 5. system tick timer: software timers (`softimer` or `key_gpio`), else
///    periodic timer (`system_tick`), else none
/// 6. delay service on its own tick source, priority 0 (`delay`)
/// 7. LEDs (`led`)
/// 8. buzzer PWM (`buzzer`)
/// 9. event input manager (`key` or `key_gpio`)
/// 10. GPIO keys (`key_gpio`)
/// 11. PMU (`pmu`)
/// 12. deferred ISR dispatch (`isr_defer`)
pub fn initialize_board<S, H>(config: &BoardConfig, heap_source: &S, hal: &mut H) -> Services<H>
where
    S: HeapBoundsSource + ?Sized,
    H: BoardHal,
{
    info!("board bring-up: {} steps", config.plan().len());
    for issue in config.issues() {
        warn!("config: {}", issue.describe());
    }

    let mut seq = Sequencer {
        config,
        hal,
        services: BoardServices::new(config.tick_strategy()),
    };

    if let Some(bounds) = seq.step(Step::ResolveHeapBounds, |_| heap_source.resolve_heap_bounds()) {
        debug!("heap 0x{:x}..0x{:x} ({} bytes)", bounds.start(), bounds.end(), bounds.len());
        fill(&mut seq.services.heap, bounds, Step::ResolveHeapBounds);
        seq.step(Step::InitHeap, |hal| hal.init_heap(bounds));
    }

    let console = seq.step(Step::DebugConsole, |hal| hal.init_debug_console()).flatten();
    if let Some(console) = console {
        fill(&mut seq.services.console, console, Step::DebugConsole);
    }

    let library = config.runtime_library;
    seq.step(Step::RuntimeBinding, |hal| {
        hal.init_runtime_binding(library, console);
    });

    let softimer = seq.step(Step::SoftimerTick, |hal| hal.init_softimer_tick());
    let periodic = seq.step(Step::PeriodicTick, |hal| hal.init_periodic_tick());
    if let Some((step, timer)) = tick_source(softimer, periodic) {
        fill(&mut seq.services.system_tick_timer, timer, step);
    }

    seq.step(Step::Delay, |hal| {
        let source = hal.init_delay_tick_source();
        hal.init_delay(source, DELAY_PRIORITY);
    });

    seq.step(Step::Leds, |hal| hal.init_leds());

    if let Some(pwm) = seq.step(Step::Buzzer, |hal| hal.init_buzzer()) {
        fill(&mut seq.services.buzzer_pwm, pwm, Step::Buzzer);
    }

    seq.step(Step::EventInput, |hal| hal.init_event_input());
    seq.step(Step::KeyGpio, |hal| hal.init_key_gpio());
    seq.step(Step::Pmu, |hal| hal.init_pmu());
    seq.step(Step::IsrDefer, |hal| hal.init_isr_defer());

    let services = seq.services;
    info!(
        "board ready: tick={} console={} buzzer={}",
        services.tick_strategy().name(),
        services.console().is_some(),
        services.buzzer_pwm().is_some()
    );
    services
}

/// The step that produced the system tick handle, if any.
fn tick_source<T>(softimer: Option<T>, periodic: Option<T>) -> Option<(Step, T)> {
    match (softimer, periodic) {
        (Some(timer), _) => Some((Step::SoftimerTick, timer)),
        (None, Some(timer)) => Some((Step::PeriodicTick, timer)),
        (None, None) => None,
    }
}
