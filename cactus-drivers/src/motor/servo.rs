//! Continuous-rotation servo wheel driver
//!
//! This driver provides:
//! - Percentage speed commands in either direction
//! - Mirroring for the wheel mounted on the right side
//! - Direction change notification
//! - Lock-free direction reads for the tick counter
//!
//! # Positions
//!
//! A continuous-rotation servo turns its position input into speed:
//! `0` is full backward, `max` is full forward and `max / 2` is stopped.
//! The position written to the channel of a mirrored wheel is
//! `max - position`, so both wheels drive the robot forward for the same
//! command.
//!
//! # Concurrency
//!
//! Commands may be issued from several tasks (a navigation loop and a
//! safety stop, say). They serialise on the motor's lock: the last command
//! to take the lock decides both the commanded position and the last
//! position written to the channel.

use core::cell::RefCell;

use cactus_core::config::ServoConfig;
use cactus_core::traits::{Direction, DirectionListener, DirectionSource, Side};
use cactus_core::validate::check_percent;
use cactus_core::DriverError;
use cactus_hal::ServoOutput;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicU16, Ordering};

/// Continuous-rotation servo driving one wheel
pub struct ServoMotor<'a, S> {
    /// Output channel; only touched with the lock held
    output: Mutex<CriticalSectionRawMutex, RefCell<S>>,
    /// Commanded (logical, unmirrored) position, written with the lock held
    position: AtomicU16,
    side: Side,
    config: ServoConfig,
    listener: Option<&'a (dyn DirectionListener + Sync)>,
}

impl<'a, S: ServoOutput> ServoMotor<'a, S> {
    /// Create a stopped motor
    ///
    /// The channel is switched off until the first command.
    pub fn new(mut output: S, side: Side, config: ServoConfig) -> Result<Self, DriverError> {
        config.validate()?;
        output.off();

        Ok(Self {
            output: Mutex::new(RefCell::new(output)),
            position: AtomicU16::new(config.midpoint()),
            side,
            config,
            listener: None,
        })
    }

    /// Register the direction change listener
    ///
    /// The listener runs on whichever task issued the command, after the
    /// motor's lock has been released.
    pub fn set_direction_listener(&mut self, listener: &'a (dyn DirectionListener + Sync)) {
        self.listener = Some(listener);
    }

    /// Remove the direction change listener
    pub fn clear_direction_listener(&mut self) {
        self.listener = None;
    }

    /// Side of the robot this motor is mounted on
    pub fn side(&self) -> Side {
        self.side
    }

    /// Get the configuration
    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Commanded logical position
    pub fn position(&self) -> u16 {
        self.position.load(Ordering::Acquire)
    }

    /// Commanded speed, -100 (full backward) to 100 (full forward)
    pub fn speed(&self) -> i8 {
        let mid = i32::from(self.config.midpoint());
        let offset = i32::from(self.position()) - mid;
        (offset * 100 / mid).clamp(-100, 100) as i8
    }

    /// Whether the commanded direction is forward
    pub fn is_forward(&self) -> bool {
        self.direction().is_forward()
    }

    /// Whether the motor is commanded to stand still
    pub fn is_stopped(&self) -> bool {
        self.position() == self.config.midpoint()
    }

    /// Drive forward at `percent` of full speed
    ///
    /// Fails with [`DriverError::InvalidArgument`] outside `0..=100`,
    /// leaving the motor as it was.
    pub fn forward(&self, percent: i32) -> Result<(), DriverError> {
        let offset = self.offset(check_percent(percent)?);
        self.move_to(self.config.midpoint() + offset, false);
        Ok(())
    }

    /// Drive backward at `percent` of full speed
    ///
    /// Fails with [`DriverError::InvalidArgument`] outside `0..=100`,
    /// leaving the motor as it was.
    pub fn backward(&self, percent: i32) -> Result<(), DriverError> {
        let offset = self.offset(check_percent(percent)?);
        self.move_to(self.config.midpoint() - offset, false);
        Ok(())
    }

    /// Drive forward at the servo's top speed
    pub fn forward_full(&self) {
        self.move_to(self.config.max_position, false);
    }

    /// Drive backward at the servo's top speed
    pub fn backward_full(&self) {
        self.move_to(0, false);
    }

    /// Stop and switch the channel off (no active braking)
    pub fn stop(&self) {
        self.move_to(self.config.midpoint(), true);
    }

    /// The single mutation point of the motor
    ///
    /// Repeating the current position writes nothing and notifies nobody.
    /// `release` switches the channel off after the move, under the same
    /// lock.
    fn move_to(&self, position: u16, release: bool) {
        let mid = self.config.midpoint();

        let changed = self.output.lock(|output| {
            let mut output = output.borrow_mut();
            let old = self.position.load(Ordering::Relaxed);

            let mut changed = None;
            if old != position {
                let crossed = (old.cmp(&mid) != position.cmp(&mid)) || position == mid;
                self.position.store(position, Ordering::Release);
                output.set_position(self.physical(position));

                if crossed {
                    changed = Some(Direction::from_forward(position >= mid));
                }
            }

            if release {
                output.off();
            }

            changed
        });

        if let (Some(direction), Some(listener)) = (changed, self.listener) {
            #[cfg(feature = "defmt")]
            defmt::trace!("{} wheel direction -> {}", self.side, direction);
            listener.on_direction_changed(direction);
        }
    }

    /// Distance from the midpoint for a checked percentage
    fn offset(&self, percent: u8) -> u16 {
        let mid = self.config.midpoint();
        let offset = u32::from(mid) * u32::from(percent) / 100;
        // percent <= 100, so the offset never exceeds the midpoint
        u16::try_from(offset).unwrap_or(mid)
    }

    /// Position to write to the channel for a logical position
    fn physical(&self, position: u16) -> u16 {
        if self.side.is_inverted() {
            self.config.max_position - position
        } else {
            position
        }
    }
}

impl<S> DirectionSource for ServoMotor<'_, S> {
    fn direction(&self) -> Direction {
        Direction::from_forward(self.position.load(Ordering::Acquire) >= self.config.midpoint())
    }
}
