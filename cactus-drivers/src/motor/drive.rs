//! Two-wheel drive train
//!
//! Owns both wheel motors together with the tick state each wheel's counter
//! writes to. Counters borrow the motor they follow for its direction, so
//! they are created from a shared reference and can run on other tasks
//! while commands keep arriving here.

use cactus_core::config::{ServoConfig, TickConfig};
use cactus_core::traits::Side;
use cactus_core::validate::check_range;
use cactus_core::DriverError;
use cactus_hal::{AnalogInput, ServoOutput};

use super::servo::ServoMotor;
use crate::sensor::{TickCounter, TickState};

/// Left and right wheels with their tick state
pub struct DriveTrain<'a, S> {
    left: ServoMotor<'a, S>,
    right: ServoMotor<'a, S>,
    left_ticks: TickState,
    right_ticks: TickState,
}

impl<'a, S: ServoOutput> DriveTrain<'a, S> {
    /// Create a stopped drive train
    ///
    /// The right wheel is mounted mirrored and gets inverted positions.
    pub fn new(left: S, right: S, config: ServoConfig) -> Result<Self, DriverError> {
        Ok(Self {
            left: ServoMotor::new(left, Side::Left, config)?,
            right: ServoMotor::new(right, Side::Right, config)?,
            left_ticks: TickState::new(),
            right_ticks: TickState::new(),
        })
    }

    /// Motor on `side`
    pub fn motor(&self, side: Side) -> &ServoMotor<'a, S> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Motor on `side`, for registering listeners
    pub fn motor_mut(&mut self, side: Side) -> &mut ServoMotor<'a, S> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Tick state of the wheel on `side`
    pub fn tick_state(&self, side: Side) -> &TickState {
        match side {
            Side::Left => &self.left_ticks,
            Side::Right => &self.right_ticks,
        }
    }

    /// Net ticks counted on `side`
    pub fn ticks(&self, side: Side) -> i32 {
        self.tick_state(side).ticks()
    }

    /// Build the tick counter for the wheel on `side`
    ///
    /// Only one counter per wheel may exist at a time; a second one fails
    /// with [`DriverError::InvalidArgument`] until the first is dropped. A
    /// new counter clears any earlier [`DriveTrain::stop_counters`] request.
    pub fn tick_counter<A: AnalogInput>(
        &self,
        side: Side,
        sampler: A,
        config: TickConfig,
    ) -> Result<TickCounter<'_, A, ServoMotor<'a, S>>, DriverError> {
        TickCounter::new(sampler, self.motor(side), self.tick_state(side), config)
    }

    /// Drive both wheels, -100 (full backward) to 100 (full forward)
    ///
    /// Both speeds are checked before either wheel is touched.
    pub fn drive(&self, left: i32, right: i32) -> Result<(), DriverError> {
        let left = check_range(left, -100, 100)?;
        let right = check_range(right, -100, 100)?;

        Self::apply(&self.left, left)?;
        Self::apply(&self.right, right)
    }

    /// Stop both wheels and switch their channels off
    pub fn stop(&self) {
        self.left.stop();
        self.right.stop();
    }

    /// Ask both running tick counters to finish
    pub fn stop_counters(&self) {
        self.left_ticks.request_stop();
        self.right_ticks.request_stop();
    }

    fn apply(motor: &ServoMotor<'a, S>, speed: i32) -> Result<(), DriverError> {
        if speed >= 0 {
            motor.forward(speed)
        } else {
            motor.backward(-speed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingServo, ScriptedAdc, ServoOp};
    use cactus_core::traits::{Direction, DirectionSource};
    use embassy_futures::block_on;
    use embedded_hal_async::delay::DelayNs;
    use std::sync::Mutex as StdMutex;

    fn drive_train<'a>() -> (DriveTrain<'a, RecordingServo>, RecordingServo, RecordingServo) {
        let left = RecordingServo::default();
        let right = RecordingServo::default();
        let drive = DriveTrain::new(left.clone(), right.clone(), ServoConfig::default()).unwrap();
        (drive, left, right)
    }

    /// Delay that stops the counters after a number of periods
    struct PeriodLimit<'d> {
        state: &'d TickState,
        remaining: usize,
    }

    impl DelayNs for PeriodLimit<'_> {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, _ms: u32) {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.state.request_stop();
            }
            std::thread::yield_now();
        }
    }

    #[test]
    fn test_right_wheel_forward_full_speed() {
        let seen = StdMutex::new(Vec::new());
        let listener = |direction: Direction| seen.lock().unwrap().push(direction);

        let (mut drive, _left, right) = drive_train();
        drive.motor_mut(Side::Right).set_direction_listener(&listener);

        drive.motor(Side::Right).forward(100).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![Direction::Forward]);
        assert_eq!(right.ops(), vec![ServoOp::Off, ServoOp::Position(0)]);
        assert_eq!(drive.motor(Side::Right).position(), 100);
    }

    #[test]
    fn test_drive_mirrors_right_wheel() {
        let (drive, left, right) = drive_train();

        drive.drive(50, 50).unwrap();
        drive.drive(-100, 20).unwrap();

        assert_eq!(left.positions(), vec![75, 0]);
        assert_eq!(right.positions(), vec![25, 40]);
        assert_eq!(drive.motor(Side::Left).direction(), Direction::Backward);
        assert_eq!(drive.motor(Side::Right).direction(), Direction::Forward);
    }

    #[test]
    fn test_drive_validates_before_moving() {
        let (drive, left, right) = drive_train();

        assert_eq!(drive.drive(30, 101), Err(DriverError::InvalidArgument));
        assert_eq!(drive.drive(-101, 0), Err(DriverError::InvalidArgument));

        assert!(left.positions().is_empty());
        assert!(right.positions().is_empty());
    }

    #[test]
    fn test_stop_switches_both_off() {
        let (drive, left, right) = drive_train();
        drive.drive(10, -10).unwrap();

        drive.stop();

        assert_eq!(left.ops().last(), Some(&ServoOp::Off));
        assert_eq!(right.ops().last(), Some(&ServoOp::Off));
        assert!(drive.motor(Side::Left).is_stopped());
        assert!(drive.motor(Side::Right).is_stopped());
    }

    #[test]
    fn test_counter_follows_motor_direction() {
        let (drive, _left, _right) = drive_train();
        drive.motor(Side::Left).backward(40).unwrap();

        let adc = ScriptedAdc::new(&[0, 900, 0, 900]);
        let mut counter = drive
            .tick_counter(Side::Left, adc, TickConfig::default())
            .unwrap();

        let mut delay = crate::mock::InstantDelay::default();
        for _ in 0..3 {
            block_on(counter.poll_once(&mut delay));
        }

        assert_eq!(drive.ticks(Side::Left), -3);
        assert_eq!(drive.ticks(Side::Right), 0);
    }

    #[test]
    fn test_counter_runs_alongside_commands() {
        let (drive, _left, _right) = drive_train();
        drive.drive(-10, 0).unwrap();

        // 20 crossings, then the script runs dry and reads fail
        let samples: Vec<u16> = (0..21).map(|i| if i % 2 == 0 { 0 } else { 1000 }).collect();
        let mut counter = drive
            .tick_counter(Side::Left, ScriptedAdc::new(&samples), TickConfig::default())
            .unwrap();

        std::thread::scope(|s| {
            s.spawn(|| {
                let mut delay = PeriodLimit {
                    state: drive.tick_state(Side::Left),
                    remaining: 40,
                };
                block_on(counter.run(&mut delay));
            });
            s.spawn(|| {
                for i in 0..500 {
                    drive.drive(-(i % 100) - 1, i % 100).unwrap();
                }
            });
        });

        assert_eq!(drive.ticks(Side::Left), -20);
        assert!(drive.tick_state(Side::Left).is_stop_requested());
        assert!(!drive.tick_state(Side::Right).is_stop_requested());
    }

    #[test]
    fn test_counter_per_side_is_exclusive() {
        let (drive, _left, _right) = drive_train();

        let left = drive
            .tick_counter(Side::Left, ScriptedAdc::new(&[0]), TickConfig::default())
            .unwrap();
        let again = drive.tick_counter(Side::Left, ScriptedAdc::new(&[0]), TickConfig::default());
        assert!(matches!(again, Err(DriverError::InvalidArgument)));
        assert!(drive
            .tick_counter(Side::Right, ScriptedAdc::new(&[0]), TickConfig::default())
            .is_ok());

        drive.stop_counters();
        drop(left);

        let mut left = drive
            .tick_counter(Side::Left, ScriptedAdc::new(&[0, 900]), TickConfig::default())
            .unwrap();
        assert!(!drive.tick_state(Side::Left).is_stop_requested());

        let mut delay = PeriodLimit {
            state: drive.tick_state(Side::Left),
            remaining: 2,
        };
        block_on(left.run(&mut delay));
        assert_eq!(drive.ticks(Side::Left), 1);
    }

    #[test]
    fn test_stop_counters() {
        let (drive, _left, _right) = drive_train();
        drive.stop_counters();

        assert!(drive.tick_state(Side::Left).is_stop_requested());
        assert!(drive.tick_state(Side::Right).is_stop_requested());
    }
}
