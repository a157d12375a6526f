//! Output channel abstractions
//!
//! Channels that are driven with a bounded integer value: hobby servos
//! (position) and motor-port power outputs.

/// Position-settable servo channel
///
/// For a continuous-rotation servo the position selects speed and
/// direction rather than an angle.
pub trait ServoOutput {
    /// Drive the servo to `position`
    ///
    /// `position` is within `[0, max]` of the driver that owns the channel.
    fn set_position(&mut self, position: u16);

    /// Stop generating pulses (the servo coasts)
    fn off(&mut self);
}

/// Single-channel power output
///
/// Used for loads hanging off a motor port, like a laser diode or an LED.
pub trait PowerOutput {
    /// Apply a raw power value
    fn set_power(&mut self, power: i16);
}
