use anyhow::{Context, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Camera rig parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Path segments per second
    pub path_speed: f32,
    pub shake_strength: f32,
    /// Shake offsets drawn per second
    pub shake_rate: f32,
    /// Seconds a triggered shake lasts
    pub shake_duration: f32,
    /// Free-fly units per second
    pub fly_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            path_speed: 1.0,
            shake_strength: 2.0,
            shake_rate: 15.0,
            shake_duration: 100.0,
            fly_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub points: Vec<Vec3>,
    pub target: Vec3,
    /// Start in orbit mode instead of free-fly
    pub enabled: bool,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            points: vec![
                Vec3::new(5.0, 5.0, 5.0),
                Vec3::new(-5.0, 5.0, 5.0),
                Vec3::new(-5.0, 5.0, -5.0),
                Vec3::new(5.0, 5.0, -5.0),
            ],
            target: Vec3::ZERO,
            enabled: false,
        }
    }
}

/// Scale applied to each input step of an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// World units per pipe move step
    pub pipe_move_step: f32,
    /// Degrees per pipe pan step
    pub pipe_pan_step: f32,
    /// Degrees per segment twist step
    pub rotate_step: f32,
    /// Degrees per camera look step (one pixel of mouse travel)
    pub look_step: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            pipe_move_step: 0.1,
            pipe_pan_step: 1.0,
            rotate_step: 1.0,
            look_step: 0.1,
        }
    }
}

/// Everything tunable about a scene. Missing fields fall back to defaults,
/// so a file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub controls: ControlConfig,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scene config")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_json(&json).context(format!("Invalid config file: {:?}", path))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialise scene config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(config.camera.shake_rate, 15.0);
        assert_eq!(config.orbit.points.len(), 4);
        assert_eq!(config.controls.look_step, 0.1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(r#"{ "camera": { "path_speed": 2.5 } }"#).unwrap();
        assert_eq!(config.camera.path_speed, 2.5);
        assert_eq!(config.camera.shake_strength, 2.0);
        assert_eq!(config.orbit, OrbitConfig::default());
    }

    #[test]
    fn test_vectors_as_arrays() {
        let config =
            SceneConfig::from_json(r#"{ "orbit": { "points": [[1, 2, 3]], "target": [0, 1, 0] } }"#)
                .unwrap();
        assert_eq!(config.orbit.points, vec![Vec3::new(1.0, 2.0, 3.0)]);
        assert_eq!(config.orbit.target, Vec3::Y);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SceneConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SceneConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(SceneConfig::from_json("{ camera: ").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = SceneConfig::load("/nonexistent/pipes.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
