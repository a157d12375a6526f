//! Wheel motor traits
//!
//! Direction reporting and the listener callbacks exposed by the wheel
//! servos and their tick counters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Side of the robot a wheel is mounted on
///
/// The right wheel is mounted mirrored, so its servo positions are
/// inverted to keep "forward" consistent across both wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Whether servo positions on this side are mirrored
    pub fn is_inverted(self) -> bool {
        self == Side::Right
    }
}

/// Wheel rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Moving the robot forward (also reported while stopped)
    Forward,
    /// Moving the robot backward
    Backward,
}

impl Direction {
    /// Direction from a forward flag
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Whether this is [`Direction::Forward`]
    pub fn is_forward(self) -> bool {
        self == Direction::Forward
    }

    /// Sign applied to a tick counted in this direction
    pub fn tick_sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Anything that knows which way its wheel is turning
///
/// Implementations must answer without blocking: the tick counter reads
/// the direction from its own task while commands are being issued.
pub trait DirectionSource {
    /// Current commanded direction
    fn direction(&self) -> Direction;
}

impl<T: DirectionSource + ?Sized> DirectionSource for &T {
    fn direction(&self) -> Direction {
        T::direction(self)
    }
}

/// Notified when a motor's commanded direction changes
///
/// Called synchronously from the commanding task after the motor's lock is
/// released. A listener may issue new commands to the same motor, but
/// those commands will notify it again; a listener that always reverses
/// the motor recurses without bound.
pub trait DirectionListener {
    /// The commanded direction changed (or the motor was stopped)
    fn on_direction_changed(&self, direction: Direction);
}

impl<F: Fn(Direction)> DirectionListener for F {
    fn on_direction_changed(&self, direction: Direction) {
        self(direction)
    }
}

/// Notified on every counted tick
///
/// Called synchronously from the tick counter's loop; a slow listener
/// delays the next sample.
pub trait TickListener {
    /// A tick was counted; `raw_sample` is the analog value that caused it
    fn on_tick(&self, raw_sample: u16);
}

impl<F: Fn(u16)> TickListener for F {
    fn on_tick(&self, raw_sample: u16) {
        self(raw_sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::from_forward(true), Direction::Forward);
        assert!(!Direction::Backward.is_forward());
        assert_eq!(Direction::Backward.tick_sign(), -1);
        assert!(Side::Right.is_inverted());
        assert!(!Side::Left.is_inverted());
    }
}
