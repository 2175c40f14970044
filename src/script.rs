use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::scene::{Action, Scene};

/// An action scheduled for a given frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u32,
    pub action: Action,
}

/// Actions ordered by frame; steps sharing a frame keep their file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl Script {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|step| step.frame);
        Self { steps, cursor: 0 }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let steps: Vec<ScriptStep> =
            serde_json::from_str(json).context("Failed to parse action script")?;
        Ok(Self::new(steps))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read script file: {:?}", path))?;
        Self::from_json(&json).context(format!("Invalid script file: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps not yet applied
    pub fn remaining(&self) -> usize {
        self.steps.len() - self.cursor
    }

    /// Applies every step due at or before `frame`. Returns how many ran.
    pub fn apply_due(&mut self, frame: u32, scene: &mut Scene) -> usize {
        let start = self.cursor;
        while let Some(step) = self.steps.get(self.cursor) {
            if step.frame > frame {
                break;
            }
            log::debug!("frame {}: {:?}", frame, step.action);
            scene.apply(&step.action);
            self.cursor += 1;
        }
        self.cursor - start
    }
}
