//! Registry of running timed sequences

use std::fmt;
use std::time::Duration;

use super::TimedSequence;

/// Handle to a started sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(u64);

/// Owns every running sequence and advances them from the tick loop.
///
/// Sequences advance in the order they were started. Cancelling removes a
/// sequence immediately, so none of its remaining cues or completions are
/// ever produced.
pub struct EventSequencer<C> {
    next_id: u64,
    running: Vec<(SequenceId, TimedSequence<C>)>,
}

impl<C> Default for EventSequencer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventSequencer<C> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            running: Vec::new(),
        }
    }

    pub fn start(&mut self, sequence: TimedSequence<C>) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            "Starting sequence '{}' ({:?}, {:?})",
            sequence.label(),
            id,
            sequence.duration()
        );
        self.running.push((id, sequence));
        id
    }

    /// Stop one sequence; returns false if it already finished
    pub fn cancel(&mut self, id: SequenceId) -> bool {
        match self.running.iter().position(|(running, _)| *running == id) {
            Some(index) => {
                let (_, sequence) = self.running.remove(index);
                tracing::debug!("Cancelled sequence '{}'", sequence.label());
                true
            }
            None => false,
        }
    }

    /// Stop everything, returning how many sequences were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.running.len();
        if count > 0 {
            tracing::debug!("Cancelling {} running sequences", count);
        }
        self.running.clear();
        count
    }

    /// Advance all sequences by `dt` and collect the cues they produce
    pub fn tick(&mut self, dt: Duration) -> Vec<C> {
        let mut cues = Vec::new();
        for (_, sequence) in &mut self.running {
            sequence.advance(dt, &mut cues);
        }
        self.running.retain(|(_, sequence)| {
            if sequence.is_finished() {
                tracing::debug!("Sequence '{}' complete", sequence.label());
            }
            !sequence.is_finished()
        });
        cues
    }

    pub fn is_running(&self, id: SequenceId) -> bool {
        self.running.iter().any(|(running, _)| *running == id)
    }

    pub fn progress(&self, id: SequenceId) -> Option<f32> {
        self.running
            .iter()
            .find(|(running, _)| *running == id)
            .map(|(_, sequence)| sequence.progress())
    }

    /// Labels of running sequences, in start order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.running.iter().map(|(_, sequence)| sequence.label())
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

impl<C> fmt::Debug for EventSequencer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSequencer")
            .field("next_id", &self.next_id)
            .field("running", &self.running)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Easing;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_sequences_advance_in_start_order() {
        let mut sequencer = EventSequencer::new();
        sequencer.start(TimedSequence::new("a").wait(ms(100)).cue("a"));
        sequencer.start(TimedSequence::new("b").wait(ms(50)).cue("b"));
        sequencer.start(TimedSequence::new("c").cue("c"));

        assert_eq!(sequencer.tick(ms(100)), vec!["a", "b", "c"]);
        assert!(sequencer.is_empty());
    }

    #[test]
    fn test_cancel_single_sequence() {
        let mut sequencer = EventSequencer::new();
        let keep = sequencer.start(TimedSequence::new("keep").wait(ms(100)).cue(1));
        let dropped = sequencer.start(
            TimedSequence::new("drop")
                .wait(ms(100))
                .cue(2)
                .on_complete(3),
        );

        assert!(sequencer.cancel(dropped));
        assert!(!sequencer.cancel(dropped));
        assert!(sequencer.is_running(keep));
        assert_eq!(sequencer.tick(ms(200)), vec![1]);
        assert!(!sequencer.is_running(keep));
    }

    #[test]
    fn test_cancel_all_suppresses_every_completion() {
        let mut sequencer = EventSequencer::new();
        for i in 0..5u64 {
            sequencer.start(
                TimedSequence::new("pending")
                    .ramp(ms(100 * (i + 1)), Easing::Linear, |_| "ramp")
                    .on_complete("done"),
            );
        }
        let partial = sequencer.tick(ms(50));
        assert_eq!(partial.len(), 5);
        assert!(!partial.contains(&"done"));

        assert_eq!(sequencer.cancel_all(), 5);
        for _ in 0..20 {
            assert!(sequencer.tick(ms(100)).is_empty());
        }
        assert_eq!(sequencer.cancel_all(), 0);
    }

    #[test]
    fn test_progress_and_labels() {
        let mut sequencer = EventSequencer::new();
        let id = sequencer.start(TimedSequence::<()>::new("long").wait(ms(400)));
        sequencer.start(TimedSequence::<()>::new("short").wait(ms(100)));
        sequencer.tick(ms(100));

        assert_eq!(sequencer.labels().collect::<Vec<_>>(), vec!["long"]);
        assert_eq!(sequencer.progress(id), Some(0.25));
        assert_eq!(sequencer.len(), 1);
    }
}
