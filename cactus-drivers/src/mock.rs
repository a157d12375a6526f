//! Host-side mocks of the HAL traits

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

use cactus_hal::{AnalogInput, I2cBus, PowerOutput, RangeSensor, ServoOutput};

/// One transfer seen by [`MockBus`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    SetFrequency(u32),
    Write(u8, Vec<u8>),
    Read(u8, usize),
}

/// Error returned by [`MockBus`] when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// I2C bus that records every transfer and answers reads from a queue
#[derive(Default)]
pub struct MockBus {
    pub ops: Vec<BusOp>,
    pub responses: VecDeque<Vec<u8>>,
    /// Index of the transfer that fails
    pub fail_at: Option<usize>,
}

impl MockBus {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    pub fn respond(&mut self, bytes: &[u8]) {
        self.responses.push_back(bytes.to_vec());
    }

    fn record(&mut self, op: BusOp) -> Result<(), MockBusError> {
        let index = self.ops.len();
        self.ops.push(op);
        if self.fail_at == Some(index) {
            Err(MockBusError)
        } else {
            Ok(())
        }
    }
}

impl I2cBus for MockBus {
    type Error = MockBusError;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        self.record(BusOp::SetFrequency(hz))
    }

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.record(BusOp::Write(address, data.to_vec()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.record(BusOp::Read(address, buf.len()))?;
        let response = self.responses.pop_front().unwrap_or_default();
        buf.fill(0);
        let n = response.len().min(buf.len());
        buf[..n].copy_from_slice(&response[..n]);
        Ok(())
    }
}

/// Blocking delay that records requested waits in microseconds
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_us: Vec<u32>,
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_us.push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.waits_us.push(ms * 1_000);
    }
}

/// Async delay that returns immediately and records waits in milliseconds
#[derive(Default)]
pub struct InstantDelay {
    pub waits_ms: Vec<u32>,
}

impl embedded_hal_async::delay::DelayNs for InstantDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// Analog input that replays a script, failing once it runs out
#[derive(Default)]
pub struct ScriptedAdc {
    pub samples: VecDeque<Result<u16, ()>>,
}

impl ScriptedAdc {
    pub fn new(samples: &[u16]) -> Self {
        Self {
            samples: samples.iter().copied().map(Ok).collect(),
        }
    }

    pub fn with_results(samples: &[Result<u16, ()>]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
        }
    }
}

impl AnalogInput for ScriptedAdc {
    type Error = ();

    fn sample(&mut self) -> Result<u16, Self::Error> {
        self.samples.pop_front().unwrap_or(Err(()))
    }
}

/// One command seen by [`RecordingServo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoOp {
    Position(u16),
    Off,
}

/// Servo channel that logs commands into a shared list
#[derive(Clone, Default)]
pub struct RecordingServo {
    pub log: Arc<Mutex<Vec<ServoOp>>>,
}

impl RecordingServo {
    pub fn ops(&self) -> Vec<ServoOp> {
        self.log.lock().unwrap().clone()
    }

    pub fn positions(&self) -> Vec<u16> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                ServoOp::Position(p) => Some(p),
                ServoOp::Off => None,
            })
            .collect()
    }
}

impl ServoOutput for RecordingServo {
    fn set_position(&mut self, position: u16) {
        self.log.lock().unwrap().push(ServoOp::Position(position));
    }

    fn off(&mut self) {
        self.log.lock().unwrap().push(ServoOp::Off);
    }
}

/// Power output that keeps every value applied
#[derive(Default)]
pub struct RecordingPower {
    pub applied: Vec<i16>,
}

impl PowerOutput for RecordingPower {
    fn set_power(&mut self, power: i16) {
        self.applied.push(power);
    }
}

/// Range sensor that replays distances
#[derive(Default)]
pub struct ScriptedRange {
    pub distances: VecDeque<f32>,
    pub pings: usize,
}

impl ScriptedRange {
    pub fn new(distances: &[f32]) -> Self {
        Self {
            distances: distances.iter().copied().collect(),
            pings: 0,
        }
    }
}

impl RangeSensor for ScriptedRange {
    fn ping(&mut self) {
        self.pings += 1;
    }

    fn distance_cm(&mut self) -> f32 {
        self.distances
            .pop_front()
            .unwrap_or(cactus_hal::NO_READING)
    }
}
