//! The top-level experience state machine

use std::time::Duration;

use crate::config::{secs, ExperienceConfig};
use crate::error::{ChapterError, ConfigError, Result, RoomInitError};
use crate::input::{
    DeviceFrame, GestureClassifier, GestureEvent, Handedness, InputArbiter, InputSource,
    ModalityChange,
};
use crate::observer::Observers;
use crate::room::{BoundaryEdge, RoomBoundaryStatus, RoomComplianceMonitor};
use crate::sequence::{EventSequencer, SequenceId, TimedSequence};
use crate::spatial::Pose;
use crate::visual::{Color, PassthroughStyle};

use super::choreography::{self, is_grey_passthrough, Cue};
use super::{Collaborators, ExperiencePhase, MessageKind, PhaseChange};

/// Frequency used for every controller pulse
const VIBRATION_FREQUENCY: f32 = 1.0;

/// The four core components, owned by the controller.
///
/// The gesture band is taken from the controller's config on construction.
#[derive(Debug, Default)]
pub struct Components {
    pub arbiter: InputArbiter,
    pub gesture: GestureClassifier,
    pub monitor: RoomComplianceMonitor,
    pub sequencer: EventSequencer<Cue>,
}

/// Owns the current phase and drives every other component once per tick.
///
/// Each tick runs in a fixed order: input arbitration, gesture
/// classification, room compliance, running sequences, then phase logic.
/// Phase logic therefore always sees this tick's input.
pub struct ChapterController {
    config: ExperienceConfig,
    phase: ExperiencePhase,
    arbiter: InputArbiter,
    gesture: GestureClassifier,
    monitor: RoomComplianceMonitor,
    sequencer: EventSequencer<Cue>,
    collaborators: Collaborators,
    scene_loaded: bool,
    settle_ticks: u32,
    fatal: Option<RoomInitError>,
    floor_height_offset: f32,
    tutorial_visible: Option<bool>,
    deferred_message: Option<MessageKind>,
    phase_observers: Observers<PhaseChange>,
}

impl ChapterController {
    /// Validates `config` and tunes the components from it
    pub fn new(
        config: ExperienceConfig,
        components: Components,
        collaborators: Collaborators,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let Components {
            arbiter,
            mut gesture,
            monitor,
            sequencer,
        } = components;
        gesture.configure(&config.gesture);
        Ok(Self {
            config,
            phase: ExperiencePhase::Void,
            arbiter,
            gesture,
            monitor,
            sequencer,
            collaborators,
            scene_loaded: false,
            settle_ticks: 0,
            fatal: None,
            floor_height_offset: 0.0,
            tutorial_visible: None,
            deferred_message: None,
            phase_observers: Observers::new(),
        })
    }

    /// Put the player in the dark void while the scene loads
    pub fn start(&mut self) {
        let Collaborators {
            stylist, tools, ..
        } = &mut self.collaborators;
        stylist.force_style(&PassthroughStyle::dark());
        stylist.set_background_tint(Color::CAMERA_DARK);
        tools.set_tool(self.phase.tool_index());
        tracing::info!("Experience started in {}", self.phase);
    }

    /// Scene loading finished; the room is built on a later tick
    pub fn notify_scene_loaded(&mut self) {
        if self.scene_loaded || self.phase != ExperiencePhase::Void {
            return;
        }
        tracing::debug!("Scene model loaded, deferring room initialization");
        self.scene_loaded = true;
        self.settle_ticks = self.config.scene.settle_ticks;
    }

    pub fn on_phase_change(&mut self, listener: impl FnMut(&PhaseChange) + 'static) {
        self.phase_observers.subscribe(listener);
    }

    pub fn on_gesture(&mut self, listener: impl FnMut(&GestureEvent) + 'static) {
        self.gesture.subscribe(listener);
    }

    pub fn on_modality_change(&mut self, listener: impl FnMut(&ModalityChange) + 'static) {
        self.arbiter.subscribe(listener);
    }

    pub fn tick(&mut self, dt: Duration, frame: &DeviceFrame) {
        if let Some(change) = self.arbiter.update(frame) {
            self.apply_modality_change(change);
        }
        self.update_tutorial_visibility();

        self.gesture.update(&self.arbiter, frame);

        if self.phase.tracks_room() {
            let edge = self
                .monitor
                .update(self.collaborators.room.as_ref(), frame.head);
            if let Some(edge) = edge {
                self.apply_boundary_edge(edge);
            }
        }

        for cue in self.sequencer.tick(dt) {
            self.apply_cue(cue);
        }

        match self.phase {
            ExperiencePhase::Void => self.poll_scene_load(frame),
            ExperiencePhase::BaitPresented => self.check_bait_proximity(frame),
            ExperiencePhase::SearchingForSubject => {}
        }
    }

    /// Move to `target`, tearing down everything the current phase started.
    ///
    /// Forcing the current phase again does nothing. Phases never move
    /// backwards and nothing moves once room initialization has failed.
    pub fn force_phase(&mut self, target: ExperiencePhase) -> Result<()> {
        if let Some(err) = &self.fatal {
            return Err(ChapterError::Halted(err.clone()));
        }
        if target == self.phase {
            return Ok(());
        }
        if target < self.phase {
            return Err(ChapterError::BackwardTransition {
                from: self.phase,
                to: target,
            });
        }
        self.enter_phase(target);
        Ok(())
    }

    /// Run an extra sequence; it is cancelled with the others on the next
    /// phase change
    pub fn run_sequence(&mut self, sequence: TimedSequence<Cue>) -> SequenceId {
        self.sequencer.start(sequence)
    }

    pub fn phase(&self) -> ExperiencePhase {
        self.phase
    }

    /// Pose of the tool-holding input; stale while the active hand is lost
    pub fn dominant_hand_pose(&self) -> Pose {
        self.arbiter.dominant_hand_pose()
    }

    pub fn active_input(&self) -> InputSource {
        self.arbiter.active_input()
    }

    /// Side of the controlling input, for attaching UI to it
    pub fn active_side(&self) -> Handedness {
        self.arbiter.active_input().side()
    }

    pub fn using_hands(&self) -> bool {
        self.arbiter.using_hands()
    }

    pub fn fist_strength(&self) -> f32 {
        self.gesture.fist_strength()
    }

    pub fn is_fist_closed(&self) -> bool {
        self.gesture.is_closed()
    }

    pub fn floor_height_offset(&self) -> f32 {
        self.floor_height_offset
    }

    pub fn room_status(&self) -> RoomBoundaryStatus {
        self.monitor.status()
    }

    pub fn running_sequences(&self) -> usize {
        self.sequencer.len()
    }

    /// The room failure that halted the experience, if any
    pub fn fatal_error(&self) -> Option<&RoomInitError> {
        self.fatal.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn config(&self) -> &ExperienceConfig {
        &self.config
    }

    fn poll_scene_load(&mut self, frame: &DeviceFrame) {
        if self.fatal.is_some() || !self.scene_loaded {
            return;
        }
        if self.settle_ticks > 0 {
            self.settle_ticks -= 1;
            return;
        }
        self.scene_loaded = false;

        if let Err(err) = self.collaborators.room.initialize() {
            tracing::error!("Room initialization failed: {}", err);
            self.collaborators
                .messages
                .display_message(MessageKind::NoSceneData);
            self.fatal = Some(err);
            return;
        }

        let room = &self.collaborators.room;
        let inside = room.is_player_inside(frame.head);
        self.floor_height_offset = room.floor_height();
        if !inside {
            tracing::warn!("Player started outside of the room at {:?}", frame.head);
            self.collaborators
                .messages
                .display_message(MessageKind::StartedOutsideOfRoom);
        }
        self.monitor.arm(RoomBoundaryStatus::from_inside(inside));

        let environment = &mut self.collaborators.environment;
        environment.initialize();
        environment.move_ground_floor(self.floor_height_offset);
        tracing::info!(
            "Room initialized, floor at {:.3} m",
            self.floor_height_offset
        );

        self.enter_phase(ExperiencePhase::BaitPresented);
    }

    fn check_bait_proximity(&mut self, frame: &DeviceFrame) {
        let bait = self.collaborators.tools.bait_position();
        let range = self.config.proximity.bait_grab_range;
        let using_hands = self.arbiter.using_hands();
        let grabbed = [Handedness::Left, Handedness::Right].into_iter().find(|side| {
            frame
                .input_position(*side, using_hands)
                .is_some_and(|position| position.distance(&bait) <= range)
        });

        if let Some(side) = grabbed {
            tracing::info!("Bait grabbed with the {:?} input", side);
            self.enter_phase(ExperiencePhase::SearchingForSubject);
        }
    }

    fn enter_phase(&mut self, target: ExperiencePhase) {
        let from = self.phase;

        let cancelled = self.sequencer.cancel_all();
        self.stop_vibration();
        let Collaborators {
            stylist,
            environment,
            tools,
            ..
        } = &mut self.collaborators;
        environment.show_environment(target.shows_environment());
        if target.uses_dark_camera() {
            stylist.set_background_tint(Color::CAMERA_DARK);
        }
        environment.set_phase_visuals(target.index());
        tools.set_tool(target.tool_index());

        self.phase = target;
        tracing::info!(
            "Phase {} -> {} ({} sequences cancelled)",
            from,
            target,
            cancelled
        );

        match target {
            ExperiencePhase::Void => {}
            ExperiencePhase::BaitPresented => self.present_bait(),
            ExperiencePhase::SearchingForSubject => self.begin_search(),
        }

        self.phase_observers.emit(&PhaseChange { from, to: target });
    }

    fn present_bait(&mut self) {
        let timing = &self.config.timing;
        let right_handed = self.active_side() == Handedness::Right;
        let Collaborators { stylist, tools, .. } = &mut self.collaborators;

        stylist.reset(secs(timing.passthrough_reset));
        stylist.show_stylized(
            &PassthroughStyle::normal(),
            secs(timing.passthrough_reveal),
        );
        tools.show_passthrough_glove(true, right_handed);

        self.sequencer.start(choreography::place_bait(timing));
    }

    fn begin_search(&mut self) {
        let timing = &self.config.timing;
        let Collaborators {
            room,
            stylist,
            environment,
            ..
        } = &mut self.collaborators;

        room.hide_effect_mesh();
        stylist.reset(secs(timing.passthrough_reset));
        environment.enable_sun(true);

        self.sequencer.start(choreography::countdown_to_tool(timing));
        self.sequencer.start(choreography::camera_flicker(timing));
        self.sequencer
            .start(choreography::environment_desaturation(timing, is_grey_passthrough()));
        self.sequencer
            .start(choreography::secondary_tool_unlock(timing));
    }

    fn apply_modality_change(&mut self, change: ModalityChange) {
        let right_handed = change.source.side() == Handedness::Right;
        let Collaborators {
            tools, messages, ..
        } = &mut self.collaborators;
        tools.use_hands(change.using_hands, right_handed);
        tools.enable_tool_collision(!change.using_hands);
        messages.refresh_for_input();
    }

    /// The tutorial panel follows the controlling hand while it is tracked
    fn update_tutorial_visibility(&mut self) {
        let visible = !self.arbiter.using_hands() || self.arbiter.is_active_hand_visible();
        if self.tutorial_visible != Some(visible) {
            self.tutorial_visible = Some(visible);
            self.collaborators.messages.set_visible(visible);
        }
    }

    fn apply_boundary_edge(&mut self, edge: BoundaryEdge) {
        let messages = &mut self.collaborators.messages;
        match edge {
            BoundaryEdge::LeftRoom => {
                messages.display_message(MessageKind::WalkedOutsideOfRoom);
            }
            BoundaryEdge::ReturnedToRoom => {
                if messages.current_message().is_boundary_warning() {
                    let next = self.deferred_message.take().unwrap_or(MessageKind::None);
                    messages.display_message(next);
                }
            }
        }
    }

    /// Show a message unless a boundary warning is up, in which case it
    /// waits until the player is back inside
    fn show_message(&mut self, kind: MessageKind) {
        let warning_up = self.monitor.status() == RoomBoundaryStatus::Outside
            && self.collaborators.messages.current_message().is_boundary_warning();
        if warning_up {
            tracing::debug!("Deferring {:?} until the player returns", kind);
            self.deferred_message = Some(kind);
        } else {
            self.collaborators.messages.display_message(kind);
        }
    }

    fn apply_cue(&mut self, cue: Cue) {
        if cue == Cue::FlashlightHint {
            if self.arbiter.using_hands() {
                self.show_message(MessageKind::EnableFlashlight);
            }
            return;
        }

        let side = self.active_side();
        let Collaborators {
            room,
            stylist,
            environment,
            tools,
            haptics,
            ..
        } = &mut self.collaborators;

        match cue {
            Cue::BackgroundTint(tint) => stylist.set_background_tint(tint),
            Cue::RevealRoom => {
                room.show_all_walls(true);
                room.show_dark_room(false);
                room.set_room_saturation(if is_grey_passthrough() { 0.0 } else { 1.0 });
                environment.show_environment(true);
                tracing::debug!("Room revealed");
            }
            Cue::Vibrate { amplitude } => {
                haptics.set_vibration(side, VIBRATION_FREQUENCY, amplitude);
            }
            Cue::StopVibration => haptics.set_vibration(side, VIBRATION_FREQUENCY, 0.0),
            Cue::EnableToolCone => tools.enable_tool_cone(true),
            Cue::FlashlightHint => {}
            Cue::FlickerTime(time) => tools.set_flicker_time(time),
            Cue::ShowTool => tools.show_tool(true),
            Cue::ToolMesh(kind) => tools.set_tool_mesh(kind),
            Cue::UnlockSecondaryTool => {
                tracing::info!("Secondary tool unlocked");
                tools.unlock_secondary_tool();
            }
            Cue::EnvironmentSaturation(saturation) => environment.set_saturation(saturation),
        }
    }

    fn stop_vibration(&mut self) {
        let side = self.active_side();
        self.collaborators
            .haptics
            .set_vibration(side, VIBRATION_FREQUENCY, 0.0);
    }
}
