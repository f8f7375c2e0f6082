//! Integration test: full bring-up runs against a call-recording board.
//!
//! Tests that:
//!   1. A debug + stdlib + system-tick board gets heap, console, binding and
//!      a periodic tick, and nothing else
//!   2. A key-gpio-only board gets the software-timer tick and the event
//!      input manager implicitly
//!   3. Cross-step ordering holds for a fully enabled board
//!   4. Handle slots stay empty for disabled features
//!
//! Run with: cargo test -p board --test bring_up_sequence

// Integration test file -- intentional test patterns permitted.
#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use board::{
    initialize_board, BoardConfig, BringUpError, BringUpLatch, ConfigIssue, Step, TickStrategy,
};
use platform::mocks::{Call, CallKind, RecordingBoard};
use platform::{HeapBounds, RuntimeLibrary};

fn heap() -> HeapBounds {
    HeapBounds::new(0x1FFF_F400, 0x2000_2800).unwrap()
}

fn everything() -> BoardConfig {
    BoardConfig::NONE
        .with_debug(true)
        .with_stdlib(true)
        .with_softimer(true)
        .with_delay(true)
        .with_led(true)
        .with_buzzer(true)
        .with_key(true)
        .with_key_gpio(true)
        .with_pmu(true)
        .with_isr_defer(true)
}

// ---------------------------------------------------------------------------
// Reference configurations
// ---------------------------------------------------------------------------

#[test]
fn test_console_board_with_periodic_tick() {
    let cfg = BoardConfig::NONE
        .with_debug(true)
        .with_stdlib(true)
        .with_system_tick(true);
    let mut board = RecordingBoard::new();
    let services = initialize_board(&cfg, &heap(), &mut board);

    assert_eq!(
        board.calls(),
        &[
            Call::InitHeap(heap()),
            Call::InitDebugConsole,
            Call::InitRuntimeBinding {
                library: RuntimeLibrary::Newlib,
                console: Some(RecordingBoard::CONSOLE),
            },
            Call::InitPeriodicTick,
        ]
    );
    assert_eq!(services.tick_strategy(), TickStrategy::PeriodicTimer);
    assert_eq!(services.system_tick_timer(), Some(&RecordingBoard::PERIODIC_TICK));
    assert_eq!(services.console(), Some(&RecordingBoard::CONSOLE));
    assert!(services.buzzer_pwm().is_none(), "buzzer disabled: sentinel");
}

#[test]
fn test_key_gpio_alone_pulls_in_softimer_and_event_input() {
    let cfg = BoardConfig::NONE.with_key_gpio(true);
    let mut board = RecordingBoard::new();
    let services = initialize_board(&cfg, &heap(), &mut board);

    assert_eq!(
        board.calls(),
        &[
            Call::InitHeap(heap()),
            Call::InitSoftimerTick,
            Call::InitEventInput,
            Call::InitKeyGpio,
        ]
    );
    assert_eq!(services.system_tick_timer(), Some(&RecordingBoard::SOFTIMER_TICK));
    assert!(!board.called(CallKind::PeriodicTick));
    assert!(!board.called(CallKind::DebugConsole));
    assert!(!board.called(CallKind::Buzzer));
    assert!(cfg.has_issue(ConfigIssue::KeyGpioImpliesSoftTimer));
    assert!(cfg.has_issue(ConfigIssue::KeyGpioImpliesEventInput));
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[test]
fn test_full_board_ordering() {
    let mut board = RecordingBoard::new();
    initialize_board(&everything(), &heap(), &mut board);

    let pos = |kind| board.position(kind).unwrap();
    assert_eq!(pos(CallKind::Heap), 0, "heap comes first");
    assert!(pos(CallKind::DebugConsole) < pos(CallKind::RuntimeBinding));
    assert!(pos(CallKind::EventInput) < pos(CallKind::KeyGpio));
    assert!(pos(CallKind::DelayTickSource) < pos(CallKind::Delay));
    assert_eq!(
        board.kinds().last(),
        Some(CallKind::IsrDefer),
        "deferred dispatch comes last"
    );
}

#[test]
fn test_full_board_initialises_each_subsystem_once() {
    let mut board = RecordingBoard::new();
    initialize_board(&everything(), &heap(), &mut board);

    for kind in CallKind::ALL {
        let expected = usize::from(kind != CallKind::PeriodicTick);
        assert_eq!(board.count(kind), expected, "{kind:?}");
    }
}

#[test]
fn test_completed_steps_follow_plan() {
    let cfg = everything();
    let mut board = RecordingBoard::new();
    let services = initialize_board(&cfg, &heap(), &mut board);

    assert_eq!(services.completed_steps(), cfg.plan().as_slice());
    assert!(services.step_completed(Step::IsrDefer));
    assert!(!services.step_completed(Step::PeriodicTick));
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[test]
fn test_buzzer_handle_published_when_enabled() {
    let cfg = BoardConfig::NONE.with_buzzer(true);
    let mut board = RecordingBoard::new();
    let services = initialize_board(&cfg, &heap(), &mut board);

    assert_eq!(services.buzzer_pwm(), Some(&RecordingBoard::BUZZER_PWM));
    assert!(services.system_tick_timer().is_none());
}

#[test]
fn test_absent_tick_leaves_slot_empty() {
    let cfg = BoardConfig::NONE.with_led(true).with_delay(true);
    let mut board = RecordingBoard::new();
    let services = initialize_board(&cfg, &heap(), &mut board);

    assert_eq!(services.tick_strategy(), TickStrategy::Absent);
    assert!(services.system_tick_timer().is_none());
    assert!(board.called(CallKind::Delay), "delay has its own tick source");
}

#[test]
fn test_debug_without_subsystem_binds_to_nothing() {
    let mut cfg = BoardConfig::NONE.with_stdlib(true);
    cfg.debug = true;
    let mut board = RecordingBoard::new();
    let services = initialize_board(&cfg, &heap(), &mut board);

    assert!(!board.called(CallKind::DebugConsole));
    assert!(services.console().is_none());
    assert!(board.calls().contains(&Call::InitRuntimeBinding {
        library: RuntimeLibrary::Newlib,
        console: None,
    }));
}

#[test]
fn test_empty_heap_still_reaches_allocator() {
    let empty = HeapBounds::empty_at(0x2000_0000);
    let mut board = RecordingBoard::new();
    let services = initialize_board(&BoardConfig::NONE, &empty, &mut board);

    assert_eq!(board.calls(), &[Call::InitHeap(empty)]);
    assert_eq!(services.heap_bounds(), Some(&empty));
}

// ---------------------------------------------------------------------------
// Once per boot
// ---------------------------------------------------------------------------

/// Same shape as the firmware entry: claim, then run the sequence.
fn guarded(latch: &mut BringUpLatch, board: &mut RecordingBoard) -> Result<(), BringUpError> {
    latch.claim()?;
    initialize_board(&everything(), &heap(), board);
    Ok(())
}

#[test]
fn test_second_bring_up_touches_nothing() {
    let mut latch = BringUpLatch::new();
    let mut board = RecordingBoard::new();

    guarded(&mut latch, &mut board).unwrap();
    let first_run = board.calls().len();
    assert!(first_run > 0);

    assert_eq!(
        guarded(&mut latch, &mut board),
        Err(BringUpError::AlreadyInitialized)
    );
    assert_eq!(board.calls().len(), first_run);
}
