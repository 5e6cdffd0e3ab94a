//! Timed sequences advanced by the frame tick
//!
//! A [`TimedSequence`] is a list of waits, instantaneous cues and eased
//! ramps. The [`EventSequencer`] owns every running sequence, advances them
//! by accumulated frame time and collects the cues they produce.

mod easing;
mod sequencer;
mod timed;

pub use easing::Easing;
pub use sequencer::{EventSequencer, SequenceId};
pub use timed::TimedSequence;
