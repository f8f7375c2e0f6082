//! Instance adapters over `embedded-hal` pins and PWM channels.
//!
//! A board's [`Indicators`](platform::Indicators) and
//! [`EventInput`](platform::EventInput) implementations are usually thin:
//! park the LEDs, silence the buzzer, sample the keys. These adapters do that
//! much for any `embedded-hal` 1.0 pin type so chip support code only has to
//! hand over configured pins.
//!
//! Reference board wiring:
//!
//! | Function | Pin / channel | Active |
//! |----------|---------------|--------|
//! | LED 0    | PTA4          | low    |
//! | LED 1    | PTA5          | low    |
//! | Buzzer   | TPM0 CH1      | -      |

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

/// Electrical level that means "on" / "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Logic high is active.
    ActiveHigh,
    /// Logic low is active.
    ActiveLow,
}

/// Failure of an adapter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceError<E> {
    /// No LED or key with that id.
    UnknownId(usize),
    /// The underlying pin or channel failed.
    Hal(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for InstanceError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownId(id) => write!(f, "no instance with id {id}"),
            Self::Hal(e) => write!(f, "hal error: {e:?}"),
        }
    }
}

// ── LEDs ─────────────────────────────────────────────────────────────────────

/// Bank of `N` LEDs.
pub struct LedBank<P, const N: usize> {
    pins: [P; N],
    polarity: Polarity,
}

impl<P: OutputPin, const N: usize> LedBank<P, N> {
    /// Wrap configured output pins; LED id is the array index.
    pub fn new(pins: [P; N], polarity: Polarity) -> Self {
        Self { pins, polarity }
    }

    /// Turn every LED off.
    pub fn init(&mut self) -> Result<(), P::Error> {
        let polarity = self.polarity;
        for pin in &mut self.pins {
            drive(pin, polarity, false)?;
        }
        Ok(())
    }

    /// Switch LED `id`.
    pub fn set(&mut self, id: usize, on: bool) -> Result<(), InstanceError<P::Error>> {
        let polarity = self.polarity;
        let pin = self.pins.get_mut(id).ok_or(InstanceError::UnknownId(id))?;
        drive(pin, polarity, on).map_err(InstanceError::Hal)
    }

    /// Number of LEDs.
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for a bank without LEDs.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Give the pins back.
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

fn drive<P: OutputPin>(pin: &mut P, polarity: Polarity, on: bool) -> Result<(), P::Error> {
    match (polarity, on) {
        (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => pin.set_high(),
        (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => pin.set_low(),
    }
}

// ── Buzzer ───────────────────────────────────────────────────────────────────

/// PWM timer instance and channel number.
///
/// This is what the buzzer step publishes: other code may use the timer's
/// remaining channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmChannel {
    /// Timer instance (TPM0 = 0).
    pub timer: u8,
    /// Channel the buzzer occupies.
    pub channel: u8,
}

impl PwmChannel {
    /// Buzzer channel of the reference board: TPM0 channel 1.
    pub const BUZZER: Self = Self {
        timer: 0,
        channel: 1,
    };
}

/// Buzzer on one PWM channel.
pub struct BuzzerPwm<P> {
    pwm: P,
    channel: PwmChannel,
}

impl<P: SetDutyCycle> BuzzerPwm<P> {
    /// Wrap a configured PWM channel.
    pub fn new(pwm: P, channel: PwmChannel) -> Self {
        Self { pwm, channel }
    }

    /// Silence the buzzer and return its channel handle.
    pub fn init(&mut self) -> Result<PwmChannel, P::Error> {
        self.pwm.set_duty_cycle_fully_off()?;
        Ok(self.channel)
    }

    /// Sound at 50 % duty.
    pub fn on(&mut self) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle_fraction(1, 2)
    }

    /// Silence.
    pub fn off(&mut self) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle_fully_off()
    }

    /// Give the channel back.
    pub fn release(self) -> P {
        self.pwm
    }
}

// ── Keys ─────────────────────────────────────────────────────────────────────

/// Edge reported by [`GpioKeys::scan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Key id (array index).
    pub id: usize,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

/// `N` GPIO keys.
pub struct GpioKeys<P, const N: usize> {
    pins: [P; N],
    pressed: [bool; N],
    polarity: Polarity,
}

impl<P: InputPin, const N: usize> GpioKeys<P, N> {
    /// Wrap configured input pins; key id is the array index.
    pub fn new(pins: [P; N], polarity: Polarity) -> Self {
        Self {
            pins,
            pressed: [false; N],
            polarity,
        }
    }

    /// Sample every key once to learn the idle state. No events.
    pub fn init(&mut self) -> Result<(), P::Error> {
        let polarity = self.polarity;
        for (pin, pressed) in self.pins.iter_mut().zip(self.pressed.iter_mut()) {
            *pressed = is_active(pin, polarity)?;
        }
        Ok(())
    }

    /// Sample every key; report the ones that changed since the last sample.
    pub fn scan(&mut self) -> Result<heapless::Vec<KeyEvent, N>, P::Error> {
        let polarity = self.polarity;
        let mut events = heapless::Vec::new();
        for (id, (pin, pressed)) in self
            .pins
            .iter_mut()
            .zip(self.pressed.iter_mut())
            .enumerate()
        {
            let now = is_active(pin, polarity)?;
            if now != *pressed {
                *pressed = now;
                // At most one event per key; capacity is the key count.
                let _ = events.push(KeyEvent { id, pressed: now });
            }
        }
        Ok(events)
    }

    /// Last sampled state of key `id`.
    pub fn is_pressed(&self, id: usize) -> Option<bool> {
        self.pressed.get(id).copied()
    }

    /// Give the pins back.
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

fn is_active<P: InputPin>(pin: &mut P, polarity: Polarity) -> Result<bool, P::Error> {
    match polarity {
        Polarity::ActiveHigh => pin.is_high(),
        Polarity::ActiveLow => pin.is_low(),
    }
}
