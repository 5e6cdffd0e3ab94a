//! Logging collaborators backing the simulated scene

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use world_beyond_xr::chapter::{
    saturation_distance, Collaborators, EnvironmentController, Haptics, MessageDisplay,
    MessageKind, PassthroughStylist, ToolController, ToolKind,
};
use world_beyond_xr::input::Handedness;
use world_beyond_xr::{Color, FloorplanRoom, PassthroughStyle, Point3D, RoomInitError, RoomModel};

/// What the simulated scene currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct StageState {
    pub message: MessageKind,
    /// Every message change, in order
    pub message_log: Vec<MessageKind>,
    pub tutorial_visible: bool,
    pub background_tint: Color,
    pub tool_index: usize,
    pub tool_mesh: Option<ToolKind>,
    pub tool_visible: bool,
    pub tool_cone: bool,
    pub flicker_time: f32,
    pub secondary_tool_unlocked: bool,
    pub environment_visible: bool,
    pub environment_saturation: f32,
    pub walls_visible: bool,
    pub vibration: f32,
}

impl Default for StageState {
    fn default() -> Self {
        Self {
            message: MessageKind::None,
            message_log: Vec::new(),
            tutorial_visible: true,
            background_tint: Color::BLACK,
            tool_index: 0,
            tool_mesh: None,
            tool_visible: false,
            tool_cone: false,
            flicker_time: 0.0,
            secondary_tool_unlocked: false,
            environment_visible: false,
            environment_saturation: 0.0,
            walls_visible: false,
            vibration: 0.0,
        }
    }
}

/// Shared handle to the scene state the collaborators write into
pub type Stage = Rc<RefCell<StageState>>;

struct SimRoom {
    room: FloorplanRoom,
    stage: Stage,
}

impl RoomModel for SimRoom {
    fn initialize(&mut self) -> Result<(), RoomInitError> {
        self.room.initialize()?;
        tracing::info!("Room built from scene");
        Ok(())
    }

    fn is_player_inside(&self, head: Point3D) -> bool {
        self.room.is_player_inside(head)
    }

    fn floor_height(&self) -> f32 {
        self.room.floor_height()
    }

    fn show_all_walls(&mut self, visible: bool) {
        self.room.show_all_walls(visible);
        self.stage.borrow_mut().walls_visible = visible;
    }

    fn show_dark_room(&mut self, visible: bool) {
        tracing::debug!("Dark room visible: {}", visible);
        self.room.show_dark_room(visible);
    }

    fn set_room_saturation(&mut self, saturation: f32) {
        tracing::debug!("Room saturation {:.2}", saturation);
        self.room.set_room_saturation(saturation);
    }

    fn hide_effect_mesh(&mut self) {
        tracing::debug!("Effect mesh hidden");
        self.room.hide_effect_mesh();
    }
}

struct SimStylist(Stage);

impl PassthroughStylist for SimStylist {
    fn force_style(&mut self, style: &PassthroughStyle) {
        tracing::debug!("Passthrough style forced: {:?}", style);
    }

    fn show_stylized(&mut self, style: &PassthroughStyle, fade: Duration) {
        tracing::debug!("Passthrough style over {:?}: {:?}", fade, style);
    }

    fn reset(&mut self, fade: Duration) {
        tracing::debug!("Passthrough reset over {:?}", fade);
    }

    fn set_background_tint(&mut self, tint: Color) {
        self.0.borrow_mut().background_tint = tint;
    }
}

struct SimEnvironment(Stage);

impl EnvironmentController for SimEnvironment {
    fn initialize(&mut self) {
        tracing::info!("Environment generated");
    }

    fn show_environment(&mut self, visible: bool) {
        let mut stage = self.0.borrow_mut();
        if stage.environment_visible != visible {
            tracing::info!("Environment {}", if visible { "shown" } else { "hidden" });
        }
        stage.environment_visible = visible;
    }

    fn set_phase_visuals(&mut self, phase_index: usize) {
        tracing::debug!("Environment visuals for phase {}", phase_index);
    }

    fn set_saturation(&mut self, saturation: f32) {
        tracing::trace!(
            "Environment saturation {:.2} (distance {:.2})",
            saturation,
            saturation_distance(saturation)
        );
        self.0.borrow_mut().environment_saturation = saturation;
    }

    fn move_ground_floor(&mut self, height: f32) {
        tracing::debug!("Ground floor moved to {:.3}", height);
    }

    fn enable_sun(&mut self, enabled: bool) {
        tracing::debug!("Sun enabled: {}", enabled);
    }
}

struct SimTools {
    stage: Stage,
    bait: Point3D,
}

impl ToolController for SimTools {
    fn set_tool(&mut self, index: usize) {
        self.stage.borrow_mut().tool_index = index;
    }

    fn set_tool_mesh(&mut self, kind: ToolKind) {
        tracing::info!("Tool mesh set to {:?}", kind);
        self.stage.borrow_mut().tool_mesh = Some(kind);
    }

    fn show_tool(&mut self, visible: bool) {
        self.stage.borrow_mut().tool_visible = visible;
    }

    fn enable_tool_collision(&mut self, enabled: bool) {
        tracing::debug!("Tool collision enabled: {}", enabled);
    }

    fn use_hands(&mut self, using_hands: bool, right_handed: bool) {
        tracing::debug!(
            "Tool attached to {} {}",
            if right_handed { "right" } else { "left" },
            if using_hands { "hand" } else { "controller" }
        );
    }

    fn enable_tool_cone(&mut self, enabled: bool) {
        self.stage.borrow_mut().tool_cone = enabled;
    }

    fn set_flicker_time(&mut self, time: f32) {
        self.stage.borrow_mut().flicker_time = time;
    }

    fn unlock_secondary_tool(&mut self) {
        self.stage.borrow_mut().secondary_tool_unlocked = true;
    }

    fn bait_position(&self) -> Point3D {
        self.bait
    }

    fn show_passthrough_glove(&mut self, visible: bool, right_handed: bool) {
        tracing::debug!(
            "Passthrough glove visible: {} (right handed: {})",
            visible,
            right_handed
        );
    }
}

struct SimMessages(Stage);

impl MessageDisplay for SimMessages {
    fn display_message(&mut self, kind: MessageKind) {
        let mut stage = self.0.borrow_mut();
        if stage.message == kind {
            return;
        }
        match kind {
            MessageKind::None => tracing::info!("Message cleared"),
            MessageKind::NoSceneData => tracing::error!("Message: {:?}", kind),
            _ => tracing::info!("Message: {:?}", kind),
        }
        stage.message = kind;
        stage.message_log.push(kind);
    }

    fn current_message(&self) -> MessageKind {
        self.0.borrow().message
    }

    fn refresh_for_input(&mut self) {
        tracing::debug!("Message text refreshed for input");
    }

    fn set_visible(&mut self, visible: bool) {
        self.0.borrow_mut().tutorial_visible = visible;
    }
}

struct SimHaptics(Stage);

impl Haptics for SimHaptics {
    fn set_vibration(&mut self, side: Handedness, frequency: f32, amplitude: f32) {
        let mut stage = self.0.borrow_mut();
        if stage.vibration != amplitude {
            tracing::debug!(
                "Vibration {:?} at {:.1} Hz, amplitude {:.1}",
                side,
                frequency,
                amplitude
            );
        }
        stage.vibration = amplitude;
    }
}

/// Build the simulator collaborators for `room`, with the bait at `bait`
pub fn build(room: FloorplanRoom, bait: Point3D) -> (Collaborators, Stage) {
    let stage = Stage::default();
    let collaborators = Collaborators {
        room: Box::new(SimRoom {
            room,
            stage: Rc::clone(&stage),
        }),
        stylist: Box::new(SimStylist(Rc::clone(&stage))),
        environment: Box::new(SimEnvironment(Rc::clone(&stage))),
        tools: Box::new(SimTools {
            stage: Rc::clone(&stage),
            bait,
        }),
        messages: Box::new(SimMessages(Rc::clone(&stage))),
        haptics: Box::new(SimHaptics(Rc::clone(&stage))),
    };
    (collaborators, stage)
}
