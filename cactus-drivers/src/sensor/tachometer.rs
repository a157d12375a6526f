//! Wheel tick counter
//!
//! Estimates wheel rotation from a single analog proximity sensor looking
//! at a slotted wheel. The sensor output is thresholded into a binary
//! level; every change of level is one tick, counted up or down depending
//! on the direction the wheel's motor is commanded in.
//!
//! The counter samples once per period and only compares against the last
//! accepted level, so a level has to hold for a full period to be seen.
//! Noise around the threshold between two samples is never counted.
//!
//! # Usage
//!
//! The counter runs as its own task next to the control loop. Shared state
//! lives in a [`TickState`] that any task can read:
//!
//! ```ignore
//! static LEFT_TICKS: TickState = TickState::new();
//!
//! let mut counter = TickCounter::new(adc, &left_motor, &LEFT_TICKS, TickConfig::default())?;
//! counter.run(&mut Delay).await; // returns after LEFT_TICKS.request_stop()
//! ```

use cactus_core::config::{ReadFailurePolicy, TickConfig};
use cactus_core::traits::{Direction, DirectionSource, TickListener};
use cactus_core::DriverError;
use cactus_hal::AnalogInput;
use embedded_hal_async::delay::DelayNs;
use portable_atomic::{AtomicBool, AtomicI32, Ordering};

/// Ticks per full wheel rotation
pub const TICKS_PER_ROTATION: i32 = 16;

/// Distance travelled per tick
pub const CM_PER_TICK: f32 = 1.33;

/// Tick count and debounced level of one wheel
///
/// Written only by the wheel's [`TickCounter`], readable from anywhere.
/// At most one counter is bound to a state at a time.
#[derive(Debug, Default)]
pub struct TickState {
    ticks: AtomicI32,
    level: AtomicBool,
    stop: AtomicBool,
    bound: AtomicBool,
}

impl TickState {
    /// Create a zeroed state
    pub const fn new() -> Self {
        Self {
            ticks: AtomicI32::new(0),
            level: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            bound: AtomicBool::new(false),
        }
    }

    /// Net ticks counted, forward positive
    pub fn ticks(&self) -> i32 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Last accepted sensor level
    pub fn level(&self) -> bool {
        self.level.load(Ordering::Acquire)
    }

    /// Net wheel rotations
    pub fn rotations(&self) -> f32 {
        self.ticks() as f32 / TICKS_PER_ROTATION as f32
    }

    /// Net distance travelled by the wheel
    pub fn distance_cm(&self) -> f32 {
        self.ticks() as f32 * CM_PER_TICK
    }

    /// Ask the counter to stop at its next period
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested
    pub fn is_stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Whether a counter is currently bound to this state
    pub fn is_bound(&self) -> bool {
        self.bound.load(Ordering::Acquire)
    }

    /// Claim the state for a new counter and clear any earlier stop request
    fn bind(&self) -> Result<(), DriverError> {
        self.bound
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DriverError::InvalidArgument)?;
        self.stop.store(false, Ordering::Release);
        Ok(())
    }

    fn accept(&self, level: bool, delta: i32) {
        self.ticks.fetch_add(delta, Ordering::AcqRel);
        self.level.store(level, Ordering::Release);
    }
}

/// Result of one sampling period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Level unchanged, nothing counted
    Idle,
    /// Level changed and a tick was counted in `direction`
    Tick { direction: Direction, raw: u16 },
    /// The sample could not be read; treated as unchanged
    ReadFailed,
}

/// Debouncing tick counter bound to one wheel
pub struct TickCounter<'a, A, D: ?Sized> {
    sampler: A,
    direction: &'a D,
    state: &'a TickState,
    config: TickConfig,
    listener: Option<&'a (dyn TickListener + Sync)>,
}

impl<'a, A: AnalogInput, D: DirectionSource + ?Sized> TickCounter<'a, A, D> {
    /// Create a counter
    ///
    /// Takes one sample to seed the debounced level (low if the read
    /// fails) and clears any stop request left on `state`. Fails with
    /// [`DriverError::InvalidArgument`] if the configuration is invalid or
    /// another counter is still bound to `state`.
    pub fn new(
        mut sampler: A,
        direction: &'a D,
        state: &'a TickState,
        config: TickConfig,
    ) -> Result<Self, DriverError> {
        config.validate()?;
        state.bind()?;

        let level = match sampler.sample() {
            Ok(raw) => raw >= config.threshold,
            Err(_) => false,
        };
        state.level.store(level, Ordering::Release);

        Ok(Self {
            sampler,
            direction,
            state,
            config,
            listener: None,
        })
    }

    /// Register the per-tick listener
    pub fn set_tick_listener(&mut self, listener: &'a (dyn TickListener + Sync)) {
        self.listener = Some(listener);
    }

    /// Shared state this counter writes to
    pub fn state(&self) -> &'a TickState {
        self.state
    }

    /// Get the configuration
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Read one raw sample, applying the read-failure policy
    async fn read<T: DelayNs>(&mut self, delay: &mut T) -> Option<u16> {
        if let Ok(raw) = self.sampler.sample() {
            return Some(raw);
        }

        if let ReadFailurePolicy::Retry {
            resample_ms,
            budget_ms,
        } = self.config.read_failure
        {
            let mut waited: u32 = 0;
            while let Some(next) = waited
                .checked_add(resample_ms)
                .filter(|next| *next <= budget_ms)
            {
                delay.delay_ms(resample_ms).await;
                waited = next;
                if let Ok(raw) = self.sampler.sample() {
                    return Some(raw);
                }
            }
        }

        None
    }

    /// Sample once and count a tick if the level changed
    pub async fn poll_once<T: DelayNs>(&mut self, delay: &mut T) -> TickOutcome {
        let Some(raw) = self.read(delay).await else {
            #[cfg(feature = "defmt")]
            defmt::debug!("tick sensor read failed, keeping level");
            return TickOutcome::ReadFailed;
        };

        let level = raw >= self.config.threshold;
        if level == self.state.level() {
            return TickOutcome::Idle;
        }

        let direction = self.direction.direction();
        self.state.accept(level, direction.tick_sign());

        if let Some(listener) = self.listener {
            listener.on_tick(raw);
        }

        TickOutcome::Tick { direction, raw }
    }

    /// Sample every period until a stop is requested
    pub async fn run<T: DelayNs>(&mut self, delay: &mut T) {
        while !self.state.is_stop_requested() {
            delay.delay_ms(self.config.period_ms).await;
            if self.state.is_stop_requested() {
                break;
            }
            self.poll_once(delay).await;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("tick counter stopped at {} ticks", self.state.ticks());
    }
}

impl<A, D: ?Sized> Drop for TickCounter<'_, A, D> {
    fn drop(&mut self) {
        self.state.bound.store(false, Ordering::Release);
    }
}
