//! Fist gesture classification

use crate::config::GestureConfig;
use crate::observer::Observers;

use super::{DeviceFrame, HandJoint, HandSkeleton, InputArbiter};

/// Discrete hand state derived from fist strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandState {
    #[default]
    Open,
    Closed,
}

/// Notifications raised by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// The hand just closed into a fist
    Closed,
    /// The hand just opened
    Opened,
    /// The hand stayed closed this tick
    Held,
}

/// Curl score of a hand: 0 for a flat hand, 1 for a tight fist.
///
/// Each finger's distal segment is compared against the palm direction
/// (wrist to middle knuckle). Extended fingers point along the palm,
/// curled fingers point back toward the wrist.
pub fn fist_strength(skeleton: &HandSkeleton) -> f32 {
    let segment = |base: HandJoint, tip: HandJoint| {
        (skeleton.joint(tip) - skeleton.joint(base)).normalize()
    };
    let fingers = [
        segment(HandJoint::Index3, HandJoint::IndexTip),
        segment(HandJoint::Middle3, HandJoint::MiddleTip),
        segment(HandJoint::Ring3, HandJoint::RingTip),
        segment(HandJoint::Pinky3, HandJoint::PinkyTip),
    ];
    let palm = segment(HandJoint::WristRoot, HandJoint::Middle1);

    let average = (fingers[0] + fingers[1] + fingers[2] + fingers[3]) * 0.25;
    let score = (-palm).dot(&average.normalize()) * 0.5 + 0.5;
    score.clamp(0.0, 1.0)
}

/// Derives grip strength from the active hand and tracks open/closed with
/// hysteresis so pose noise inside the band never flips the state.
#[derive(Debug)]
pub struct GestureClassifier {
    open_threshold: f32,
    close_threshold: f32,
    strength: f32,
    state: HandState,
    observers: Observers<GestureEvent>,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl GestureClassifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            open_threshold: config.open_threshold,
            close_threshold: config.close_threshold,
            strength: 0.0,
            state: HandState::Open,
            observers: Observers::new(),
        }
    }

    /// Adopt a new hysteresis band, keeping the current state
    pub fn configure(&mut self, config: &GestureConfig) {
        self.open_threshold = config.open_threshold;
        self.close_threshold = config.close_threshold;
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GestureEvent) + 'static) {
        self.observers.subscribe(listener);
    }

    /// Recompute strength from the active input and step the state machine.
    ///
    /// Controllers, hidden hands and invalid skeletons all read as a full
    /// fist so that anything shown only for an open hand stays hidden.
    pub fn update(&mut self, arbiter: &InputArbiter, frame: &DeviceFrame) -> Option<GestureEvent> {
        let strength = if arbiter.using_hands() && arbiter.is_active_hand_visible() {
            frame
                .hand(arbiter.active_input().side())
                .skeleton
                .as_ref()
                .map(fist_strength)
                .unwrap_or(1.0)
        } else {
            1.0
        };
        self.classify(strength)
    }

    /// Feed a strength sample through the hysteresis band
    pub fn classify(&mut self, strength: f32) -> Option<GestureEvent> {
        self.strength = strength.clamp(0.0, 1.0);
        let event = match self.state {
            HandState::Closed if self.strength < self.open_threshold => {
                self.state = HandState::Open;
                tracing::debug!("Hand opened at strength {:.2}", self.strength);
                Some(GestureEvent::Opened)
            }
            HandState::Closed => Some(GestureEvent::Held),
            HandState::Open if self.strength > self.close_threshold => {
                self.state = HandState::Closed;
                tracing::debug!("Hand closed at strength {:.2}", self.strength);
                Some(GestureEvent::Closed)
            }
            HandState::Open => None,
        };
        if let Some(event) = &event {
            self.observers.emit(event);
        }
        event
    }

    pub fn fist_strength(&self) -> f32 {
        self.strength
    }

    pub fn state(&self) -> HandState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == HandState::Closed
    }
}
