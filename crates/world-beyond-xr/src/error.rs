//! Error types for the experience core

use std::path::PathBuf;

use crate::chapter::ExperiencePhase;

/// Why the room geometry could not be built from the scanned scene.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomInitError {
    #[error("no scene data available for this room")]
    NoSceneData,

    #[error("floorplan is not closed: {vertices} vertices")]
    DegenerateFloorplan { vertices: usize },

    #[error("invalid scene anchor: {0}")]
    InvalidAnchor(String),
}

/// Errors raised by phase transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChapterError {
    #[error("experience halted after room initialization failed: {0}")]
    Halted(RoomInitError),

    #[error("cannot move backwards from {from:?} to {to:?}")]
    BackwardTransition {
        from: ExperiencePhase,
        to: ExperiencePhase,
    },
}

/// Errors raised while loading an experience configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ChapterError>;
