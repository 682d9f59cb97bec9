use std::{fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// The overlay used to mark the solution, a light blue that keeps the maze visible beneath it
pub const DEFAULT_OVERLAY: [u8; 4] = [50, 150, 255, 150];

/// Settings for solving and rendering a maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct SolverConfig {
    /// RGBA color blended over the solution pixels
    pub overlay: [u8; 4],
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            overlay: DEFAULT_OVERLAY,
        }
    }
}

impl SolverConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| MazeError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| MazeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}

/// An RGBA color written as `r,g,b,a`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayColor(pub [u8; 4]);

impl FromStr for OverlayColor {
    type Err = MazeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let channels = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| MazeError::Config(format!("invalid color {}: {}", s, e)))?;

        match channels.as_slice() {
            [r, g, b, a] => Ok(OverlayColor([*r, *g, *b, *a])),
            [r, g, b] => Ok(OverlayColor([*r, *g, *b, 255])),
            _ => Err(MazeError::Config(format!(
                "invalid color {}: expected 3 or 4 channels",
                s
            ))),
        }
    }
}
