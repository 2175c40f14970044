use std::any::Any;

use glam::Vec3;

use crate::camera::Camera;
use crate::core::FixedHz;
use crate::traits::{BehaviorStage, CameraBehavior, UniformSource};

/// Random camera shake.
///
/// While a shake is running the camera is pushed by the current offset every
/// frame; a fresh offset is drawn `rate` times per second.
pub struct Jitter {
    strength: f32,
    rate: f32,
    remaining: f32,
    timer: FixedHz,
    offset: Vec3,
    source: Box<dyn UniformSource>,
}

impl Jitter {
    pub fn new(strength: f32, rate: f32, source: Box<dyn UniformSource>) -> Self {
        let mut jitter = Self {
            strength: 1.0,
            rate: 60.0,
            remaining: 0.0,
            timer: FixedHz::new(60.0),
            offset: Vec3::ZERO,
            source,
        };
        jitter.set_strength(strength);
        jitter.set_rate(rate);
        jitter
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn is_shaking(&self) -> bool {
        self.remaining > 0.0
    }

    /// Ignored when negative
    pub fn set_strength(&mut self, strength: f32) {
        if strength >= 0.0 {
            self.strength = strength;
        }
    }

    /// Offsets drawn per second. Ignored when negative.
    pub fn set_rate(&mut self, rate: f32) {
        if rate >= 0.0 {
            self.rate = rate;
            self.timer.set_rate(rate);
        }
    }

    /// Starts (or restarts) a shake lasting `duration` seconds
    pub fn shake(&mut self, duration: f32) {
        self.remaining = duration;
        self.offset = Vec3::ZERO;
        self.timer.reset();
    }

    pub fn stop(&mut self) {
        self.shake(0.0);
    }

    /// Advances the shake and returns the displacement to apply this frame
    pub fn step(&mut self, dt: f32) -> Vec3 {
        if self.remaining <= 0.0 {
            return Vec3::ZERO;
        }
        self.remaining -= dt;

        if self.timer.tick(dt) > 0 {
            let source = &mut self.source;
            self.offset = Vec3::new(source.sample(), source.sample(), source.sample()) * self.strength;
        }
        self.offset
    }
}

impl std::fmt::Debug for Jitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Jitter")
            .field("strength", &self.strength)
            .field("rate", &self.rate)
            .field("remaining", &self.remaining)
            .field("offset", &self.offset)
            .finish()
    }
}

impl CameraBehavior for Jitter {
    fn advance(&mut self, camera: &mut Camera, dt: f32) {
        let displacement = self.step(dt);
        if displacement != Vec3::ZERO {
            camera.dolly(displacement);
        }
    }

    fn stage(&self) -> BehaviorStage {
        BehaviorStage::Jitter
    }

    fn name(&self) -> &'static str {
        "jitter"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::VectorExt;
    use crate::traits::SequenceSource;

    fn jitter(samples: Vec<f32>) -> Jitter {
        Jitter::new(2.0, 10.0, Box::new(SequenceSource::new(samples)))
    }

    #[test]
    fn test_idle_does_not_move() {
        let mut jitter = jitter(vec![0.5]);
        let mut camera = Camera::default();
        for _ in 0..100 {
            jitter.advance(&mut camera, 0.05);
        }
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn test_zero_duration_does_not_move() {
        let mut jitter = jitter(vec![0.5]);
        jitter.shake(0.0);
        let mut camera = Camera::default();
        jitter.advance(&mut camera, 1.0);
        assert_eq!(camera.position(), Vec3::ZERO);
    }

    #[test]
    fn test_offset_scaled_by_strength() {
        let mut jitter = jitter(vec![0.25, -0.5, 0.1]);
        jitter.shake(1.0);
        let offset = jitter.step(0.15);
        assert!(offset.approx_eq(&Vec3::new(0.5, -1.0, 0.2)));
    }

    #[test]
    fn test_offset_persists_between_regenerations() {
        let mut jitter = jitter(vec![0.25, 0.0, 0.0, -0.25, 0.0, 0.0]);
        jitter.shake(10.0);
        let mut camera = Camera::default();
        // 10 Hz: first offset drawn at 0.1s, reused until 0.2s
        jitter.advance(&mut camera, 0.125);
        jitter.advance(&mut camera, 0.0625);
        assert!(camera.position().approx_eq(&Vec3::new(1.0, 0.0, 0.0)));
        jitter.advance(&mut camera, 0.0625);
        assert!(camera.position().approx_eq(&Vec3::new(0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_no_offset_before_first_interval() {
        let mut jitter = jitter(vec![0.5]);
        jitter.shake(1.0);
        assert_eq!(jitter.step(0.05), Vec3::ZERO);
    }

    #[test]
    fn test_shake_expires() {
        let mut jitter = jitter(vec![0.5]);
        jitter.shake(0.3);
        jitter.step(0.2);
        assert!(jitter.is_shaking());
        jitter.step(0.2);
        assert!(!jitter.is_shaking());
        assert_eq!(jitter.step(0.2), Vec3::ZERO);
    }

    #[test]
    fn test_stop_cancels() {
        let mut jitter = jitter(vec![0.5]);
        jitter.shake(100.0);
        jitter.stop();
        assert!(!jitter.is_shaking());
    }

    #[test]
    fn test_negative_parameters_ignored() {
        let mut jitter = jitter(vec![0.5]);
        jitter.set_strength(-1.0);
        jitter.set_rate(-5.0);
        assert_eq!(jitter.strength(), 2.0);
        assert_eq!(jitter.rate(), 10.0);
    }
}
