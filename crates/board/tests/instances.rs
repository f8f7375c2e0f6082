//! Instance adapter tests: LEDs, buzzer and keys over mock pins.
//!
//! Run with: cargo test -p board --test instances

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::convert::Infallible;

use board::{BuzzerPwm, GpioKeys, InstanceError, KeyEvent, LedBank, Polarity, PwmChannel};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::MockError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// PWM channel that records every duty cycle written.
struct FakePwm {
    max: u16,
    duty: Vec<u16>,
}

impl FakePwm {
    fn new(max: u16) -> Self {
        Self {
            max,
            duty: Vec::new(),
        }
    }
}

impl ErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duty.push(duty);
        Ok(())
    }
}

fn done_all<const N: usize>(pins: [PinMock; N]) {
    for mut pin in pins {
        pin.done();
    }
}

// ---------------------------------------------------------------------------
// LEDs
// ---------------------------------------------------------------------------

#[test]
fn test_active_low_leds_start_off() {
    let led0 = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let led1 = PinMock::new(&[PinTransaction::set(PinState::High)]);

    let mut bank = LedBank::new([led0, led1], Polarity::ActiveLow);
    bank.init().unwrap();
    assert_eq!(bank.len(), 2);

    done_all(bank.release());
}

#[test]
fn test_led_set_drives_only_that_pin() {
    let led0 = PinMock::new(&[]);
    let led1 = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ]);

    let mut bank = LedBank::new([led0, led1], Polarity::ActiveHigh);
    bank.set(1, true).unwrap();
    bank.set(1, false).unwrap();

    done_all(bank.release());
}

#[test]
fn test_led_unknown_id_rejected() {
    let mut bank = LedBank::new([PinMock::new(&[]), PinMock::new(&[])], Polarity::ActiveLow);
    assert_eq!(bank.set(2, true), Err(InstanceError::UnknownId(2)));
    done_all(bank.release());
}

#[test]
fn test_led_pin_error_propagated() {
    let err = MockError::Io(std::io::ErrorKind::NotConnected);
    let led = PinMock::new(&[PinTransaction::set(PinState::Low).with_error(err.clone())]);

    let mut bank = LedBank::new([led], Polarity::ActiveLow);
    assert_eq!(bank.set(0, true), Err(InstanceError::Hal(err)));
    done_all(bank.release());
}

// ---------------------------------------------------------------------------
// Buzzer
// ---------------------------------------------------------------------------

#[test]
fn test_buzzer_init_silences_and_names_channel() {
    let mut buzzer = BuzzerPwm::new(FakePwm::new(1000), PwmChannel::BUZZER);
    let channel = buzzer.init().unwrap();

    assert_eq!(channel, PwmChannel { timer: 0, channel: 1 });
    assert_eq!(buzzer.release().duty, vec![0]);
}

#[test]
fn test_buzzer_on_is_half_duty() {
    let mut buzzer = BuzzerPwm::new(FakePwm::new(1000), PwmChannel::BUZZER);
    buzzer.init().unwrap();
    buzzer.on().unwrap();
    buzzer.off().unwrap();

    assert_eq!(buzzer.release().duty, vec![0, 500, 0]);
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[test]
fn test_keys_report_edges_only() {
    // Active low: idle high, pressed low.
    let key0 = PinMock::new(&[
        PinTransaction::get(PinState::High), // init
        PinTransaction::get(PinState::Low),  // scan 1: press
        PinTransaction::get(PinState::Low),  // scan 2: held
        PinTransaction::get(PinState::High), // scan 3: release
    ]);
    let key1 = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
    ]);

    let mut keys = GpioKeys::new([key0, key1], Polarity::ActiveLow);
    keys.init().unwrap();
    assert_eq!(keys.is_pressed(0), Some(false));

    assert_eq!(
        keys.scan().unwrap().as_slice(),
        &[KeyEvent { id: 0, pressed: true }]
    );
    assert!(keys.scan().unwrap().is_empty());
    assert_eq!(
        keys.scan().unwrap().as_slice(),
        &[KeyEvent { id: 0, pressed: false }]
    );
    assert_eq!(keys.is_pressed(2), None);

    done_all(keys.release());
}

#[test]
fn test_key_held_at_init_is_not_an_event() {
    let key = PinMock::new(&[
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
    ]);

    let mut keys = GpioKeys::new([key], Polarity::ActiveHigh);
    keys.init().unwrap();
    assert_eq!(keys.is_pressed(0), Some(true));
    assert!(keys.scan().unwrap().is_empty());

    done_all(keys.release());
}
