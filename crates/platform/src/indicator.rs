//! On-board LEDs and the buzzer.

/// LEDs and buzzer.
pub trait Indicators {
    /// Opaque PWM handle of the buzzer's timer.
    ///
    /// The buzzer uses one channel; the handle stays valid for the other
    /// channels of the same timer instance.
    type Pwm: Copy;

    /// Configure the LED pins, all LEDs off.
    fn init_leds(&mut self);

    /// Configure the buzzer's PWM channel, silent.
    fn init_buzzer(&mut self) -> Self::Pwm;
}
