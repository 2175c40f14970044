/// Fixed rate timer - counts how many whole intervals have elapsed
///
/// Leftover time is carried into the next tick rather than discarded, so the
/// firing rate stays independent of the frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedHz {
    interval: f32,
    accumulator: f32,
}

fn interval_for(hz: f32) -> f32 {
    if hz > 0.0 {
        1.0 / hz
    } else {
        f32::INFINITY
    }
}

impl FixedHz {
    /// Create timer that fires at given frequency. A rate of zero never fires.
    pub fn new(hz: f32) -> Self {
        Self {
            interval: interval_for(hz),
            accumulator: 0.0,
        }
    }

    /// Change the rate, keeping accumulated time
    pub fn set_rate(&mut self, hz: f32) {
        self.interval = interval_for(hz);
    }

    /// Update with delta, returns the number of whole intervals that elapsed.
    ///
    /// An accumulator landing exactly on an interval boundary fires.
    pub fn tick(&mut self, delta: f32) -> u32 {
        self.accumulator += delta;

        if self.accumulator < self.interval {
            return 0;
        }

        let fired = (self.accumulator / self.interval).floor();
        self.accumulator = (self.accumulator - fired * self.interval).max(0.0);
        fired as u32
    }

    /// Drop any accumulated time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Fraction of the current interval already elapsed
    pub fn alpha(&self) -> f32 {
        if self.interval.is_finite() {
            self.accumulator / self.interval
        } else {
            0.0
        }
    }
}
