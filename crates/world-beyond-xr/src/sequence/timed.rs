//! A single cancellable, time-bounded sequence

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use super::Easing;

type RampFn<C> = Box<dyn FnMut(f32) -> C>;

enum Step<C> {
    Wait(Duration),
    Cue(C),
    Ramp {
        duration: Duration,
        easing: Easing,
        on_tick: RampFn<C>,
    },
}

fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Waits, cues and eased ramps that run one after another.
///
/// Time is accumulated from frame deltas, so the same sequence produces the
/// same cues at any frame rate. Time left over when a step finishes carries
/// into the next step. A ramp always reports its final value at exactly
/// `t = 1` and the completion cues are produced exactly once.
pub struct TimedSequence<C> {
    label: &'static str,
    steps: VecDeque<Step<C>>,
    step_elapsed: Duration,
    elapsed: Duration,
    duration: Duration,
    on_complete: Vec<C>,
    finished: bool,
}

impl<C> TimedSequence<C> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            steps: VecDeque::new(),
            step_elapsed: Duration::ZERO,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            on_complete: Vec::new(),
            finished: false,
        }
    }

    /// Idle for `duration`
    pub fn wait(mut self, duration: Duration) -> Self {
        self.duration += duration;
        self.steps.push_back(Step::Wait(duration));
        self
    }

    /// Produce `cue` as soon as the previous step ends
    pub fn cue(mut self, cue: C) -> Self {
        self.steps.push_back(Step::Cue(cue));
        self
    }

    /// Produce `on_tick(eased t)` every tick for `duration`
    pub fn ramp(
        mut self,
        duration: Duration,
        easing: Easing,
        on_tick: impl FnMut(f32) -> C + 'static,
    ) -> Self {
        self.duration += duration;
        self.steps.push_back(Step::Ramp {
            duration,
            easing,
            on_tick: Box::new(on_tick),
        });
        self
    }

    /// Produce `cue` once every step has finished
    pub fn on_complete(mut self, cue: C) -> Self {
        self.on_complete.push(cue);
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Sum of all wait and ramp durations
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Normalized progress through the whole sequence
    pub fn progress(&self) -> f32 {
        if self.finished {
            return 1.0;
        }
        if self.duration.is_zero() {
            return 0.0;
        }
        normalized_progress(self.elapsed, self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt`, pushing produced cues to `out`. Returns true once the
    /// sequence has finished.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<C>) -> bool {
        if self.finished {
            return true;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        let mut budget = dt;

        loop {
            let Some(step) = self.steps.front_mut() else {
                self.finished = true;
                out.append(&mut self.on_complete);
                return true;
            };

            match step {
                Step::Cue(_) => {
                    if let Some(Step::Cue(cue)) = self.steps.pop_front() {
                        out.push(cue);
                    }
                }
                Step::Wait(duration) => {
                    let remaining = duration.saturating_sub(self.step_elapsed);
                    if budget < remaining {
                        self.step_elapsed += budget;
                        return false;
                    }
                    budget -= remaining;
                    self.step_elapsed = Duration::ZERO;
                    self.steps.pop_front();
                }
                Step::Ramp {
                    duration,
                    easing,
                    on_tick,
                } => {
                    // A ramp starts on the first tick that has time to give it
                    if budget.is_zero() && self.step_elapsed.is_zero() && !duration.is_zero() {
                        return false;
                    }
                    let remaining = duration.saturating_sub(self.step_elapsed);
                    if budget < remaining {
                        self.step_elapsed += budget;
                        let t = normalized_progress(self.step_elapsed, *duration);
                        out.push(on_tick(easing.apply(t)));
                        return false;
                    }
                    budget -= remaining;
                    out.push(on_tick(easing.apply(1.0)));
                    self.step_elapsed = Duration::ZERO;
                    self.steps.pop_front();
                }
            }
        }
    }
}

impl<C> fmt::Debug for TimedSequence<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedSequence")
            .field("label", &self.label)
            .field("steps", &self.steps.len())
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("finished", &self.finished)
            .finish()
    }
}
