//! Room geometry collaborator

use crate::error::RoomInitError;
use crate::spatial::Point3D;

/// The scanned room, built from scene anchors once the scene has loaded.
///
/// Containment and floor height are only meaningful after a successful
/// [`RoomModel::initialize`].
pub trait RoomModel {
    /// Build walls and floor from the loaded scene
    fn initialize(&mut self) -> Result<(), RoomInitError>;

    /// Whether `head` lies within the polygonal floorplan
    fn is_player_inside(&self, head: Point3D) -> bool;

    /// Height of the scanned floor relative to tracking-space zero
    fn floor_height(&self) -> f32;

    fn show_all_walls(&mut self, visible: bool);

    /// Black-out shell shown around the player before the reveal
    fn show_dark_room(&mut self, visible: bool);

    fn set_room_saturation(&mut self, saturation: f32);

    fn hide_effect_mesh(&mut self);
}
