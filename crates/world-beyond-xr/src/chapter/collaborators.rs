//! Interfaces to the systems the chapter controller drives

use std::time::Duration;

use crate::input::Handedness;
use crate::room::RoomModel;
use crate::spatial::Point3D;
use crate::visual::{Color, PassthroughStyle};

/// Tutorial and error panel contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    #[default]
    None,
    WalkedOutsideOfRoom,
    StartedOutsideOfRoom,
    NoSceneData,
    EnableFlashlight,
}

impl MessageKind {
    /// Warnings that clear once the player is back inside the room
    pub fn is_boundary_warning(&self) -> bool {
        matches!(
            self,
            MessageKind::WalkedOutsideOfRoom | MessageKind::StartedOutsideOfRoom
        )
    }
}

/// Meshes the held tool can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Flashlight,
    WallToggler,
}

/// Passthrough color grading and the camera background behind it
pub trait PassthroughStylist {
    /// Apply a style immediately
    fn force_style(&mut self, style: &PassthroughStyle);

    fn show_stylized(&mut self, style: &PassthroughStyle, fade: Duration);

    /// Fade back to unstyled passthrough
    fn reset(&mut self, fade: Duration);

    fn set_background_tint(&mut self, tint: Color);
}

/// Procedural environment outside the room
pub trait EnvironmentController {
    fn initialize(&mut self);

    fn show_environment(&mut self, visible: bool);

    fn set_phase_visuals(&mut self, phase_index: usize);

    /// Normalized saturation; see [`saturation_distance`](super::saturation_distance)
    fn set_saturation(&mut self, saturation: f32);

    fn move_ground_floor(&mut self, height: f32);

    fn enable_sun(&mut self, enabled: bool);
}

/// The held multi-purpose tool
pub trait ToolController {
    fn set_tool(&mut self, index: usize);

    fn set_tool_mesh(&mut self, kind: ToolKind);

    fn show_tool(&mut self, visible: bool);

    fn enable_tool_collision(&mut self, enabled: bool);

    fn use_hands(&mut self, using_hands: bool, right_handed: bool);

    fn enable_tool_cone(&mut self, enabled: bool);

    fn set_flicker_time(&mut self, time: f32);

    fn unlock_secondary_tool(&mut self);

    /// Where the tool waits to be grabbed
    fn bait_position(&self) -> Point3D;

    fn show_passthrough_glove(&mut self, visible: bool, right_handed: bool);
}

/// Tutorial text panel
pub trait MessageDisplay {
    /// Show a message; repeating the current message is a no-op
    fn display_message(&mut self, kind: MessageKind);

    fn current_message(&self) -> MessageKind;

    /// Re-render the current text for the new input modality
    fn refresh_for_input(&mut self);

    fn set_visible(&mut self, visible: bool);
}

/// Controller vibration
pub trait Haptics {
    /// An amplitude of zero stops vibration on that side
    fn set_vibration(&mut self, side: Handedness, frequency: f32, amplitude: f32);
}

/// Every external system, injected at construction
pub struct Collaborators {
    pub room: Box<dyn RoomModel>,
    pub stylist: Box<dyn PassthroughStylist>,
    pub environment: Box<dyn EnvironmentController>,
    pub tools: Box<dyn ToolController>,
    pub messages: Box<dyn MessageDisplay>,
    pub haptics: Box<dyn Haptics>,
}
