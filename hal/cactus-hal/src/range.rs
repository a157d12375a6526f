//! Distance sensor abstractions

/// Distance reported by a [`RangeSensor`] when it has no reading
pub const NO_READING: f32 = -1.0;

/// Distance-style range sensor (IR triangulation, ultrasonic)
pub trait RangeSensor {
    /// Trigger a new measurement
    fn ping(&mut self);

    /// Distance of the last measurement in centimetres
    ///
    /// Returns [`NO_READING`] when nothing was detected.
    fn distance_cm(&mut self) -> f32;
}
