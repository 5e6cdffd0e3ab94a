//! Chapter state machine
//!
//! The [`ChapterController`] owns the experience phase and advances the
//! input, gesture, room and sequence components once per tick. Everything
//! outside the core (room geometry, passthrough styling, the environment,
//! the held tool, tutorial text and haptics) is reached through the
//! collaborator traits re-exported here.

pub mod choreography;
mod collaborators;
mod controller;
mod phase;

pub use choreography::{is_grey_passthrough, saturation_distance, Cue};
pub use collaborators::{
    Collaborators, EnvironmentController, Haptics, MessageDisplay, MessageKind,
    PassthroughStylist, ToolController, ToolKind,
};
pub use controller::{ChapterController, Components};
pub use phase::{ExperiencePhase, PhaseChange};
