use serde::{Deserialize, Serialize};

/// Held movement input for the free-flying camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Motion {
    pub const ALL: [Motion; 6] = [
        Motion::Forward,
        Motion::Backward,
        Motion::Left,
        Motion::Right,
        Motion::Up,
        Motion::Down,
    ];
}

/// Controller - reports which motions are currently held
pub trait Controller {
    /// Check if a motion is currently held
    fn is_held(&self, motion: Motion) -> bool;

    /// Get all currently held motions
    fn held(&self) -> &[Motion];

    /// Signed axis value: +1, -1 or 0 when both or neither are held
    fn axis(&self, positive: Motion, negative: Motion) -> f32 {
        match (self.is_held(positive), self.is_held(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

/// Plain set of held motions, fed by press/release events
#[derive(Debug, Clone, Default)]
pub struct HeldMotions {
    held: Vec<Motion>,
}

impl HeldMotions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, motion: Motion) {
        if !self.held.contains(&motion) {
            self.held.push(motion);
        }
    }

    pub fn release(&mut self, motion: Motion) {
        self.held.retain(|&m| m != motion);
    }
}

impl Controller for HeldMotions {
    fn is_held(&self, motion: Motion) -> bool {
        self.held.contains(&motion)
    }

    fn held(&self) -> &[Motion] {
        &self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_motion_hash() {
        let set: HashSet<_> = Motion::ALL.iter().collect();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_press_is_idempotent() {
        let mut held = HeldMotions::new();
        held.press(Motion::Forward);
        held.press(Motion::Forward);
        assert_eq!(held.held().len(), 1);
        assert!(held.is_held(Motion::Forward));
    }

    #[test]
    fn test_release() {
        let mut held = HeldMotions::new();
        held.press(Motion::Left);
        held.press(Motion::Up);
        held.release(Motion::Left);
        assert!(!held.is_held(Motion::Left));
        assert!(held.is_held(Motion::Up));
    }

    #[test]
    fn test_axis_cancels_opposites() {
        let mut held = HeldMotions::new();
        assert_eq!(held.axis(Motion::Forward, Motion::Backward), 0.0);
        held.press(Motion::Forward);
        assert_eq!(held.axis(Motion::Forward, Motion::Backward), 1.0);
        held.press(Motion::Backward);
        assert_eq!(held.axis(Motion::Forward, Motion::Backward), 0.0);
        held.release(Motion::Forward);
        assert_eq!(held.axis(Motion::Forward, Motion::Backward), -1.0);
    }

    #[test]
    fn test_no_motions_held() {
        let held = HeldMotions::new();
        for motion in Motion::ALL {
            assert!(!held.is_held(motion));
        }
        assert!(held.held().is_empty());
    }
}
