//! world-beyond-xr: experience core for a passthrough mixed-reality game
//!
//! This crate provides the state machine and input handling behind the
//! experience:
//! - Hand tracking and controller input merged into one active input
//! - Fist detection with hysteresis
//! - Edge-triggered room boundary monitoring
//! - Frame-rate independent, cancellable timed sequences
//! - A chapter controller that drives injected collaborators (room,
//!   passthrough, environment, tool, tutorial text, haptics)

pub mod chapter;
pub mod config;
pub mod error;
pub mod input;
pub mod observer;
pub mod room;
pub mod sequence;
pub mod spatial;
pub mod visual;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use chapter::{
    ChapterController, Collaborators, Components, Cue, ExperiencePhase, MessageKind,
};
pub use config::ExperienceConfig;
pub use error::{ChapterError, ConfigError, RoomInitError};
pub use input::{DeviceFrame, GestureClassifier, GestureEvent, InputArbiter, InputSource};
pub use room::{FloorplanRoom, RoomComplianceMonitor, RoomModel};
pub use sequence::{Easing, EventSequencer, TimedSequence};
pub use spatial::{Floorplan, Point3D, Pose, Quaternion, Vector3D};
pub use visual::{Color, PassthroughStyle};
