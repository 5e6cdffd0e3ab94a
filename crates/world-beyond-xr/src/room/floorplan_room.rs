//! Room model backed by a floorplan polygon

use crate::error::RoomInitError;
use crate::spatial::{Floorplan, Point3D};

use super::RoomModel;

/// A room described directly by its floor outline.
///
/// Used by the simulator and tests in place of a scene-anchor backed room.
#[derive(Debug, Clone, Default)]
pub struct FloorplanRoom {
    /// Outline handed over by the scene; `None` when no scene data exists
    source: Option<Floorplan>,
    floorplan: Option<Floorplan>,
    floor_height: f32,
    walls_visible: bool,
    dark_room_visible: bool,
    saturation: f32,
    effect_mesh_visible: bool,
}

impl FloorplanRoom {
    pub fn new(floorplan: Floorplan, floor_height: f32) -> Self {
        Self {
            source: Some(floorplan),
            floor_height,
            dark_room_visible: true,
            effect_mesh_visible: true,
            ..Default::default()
        }
    }

    /// A room whose scene never produced any anchors
    pub fn without_scene() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.floorplan.is_some()
    }

    pub fn walls_visible(&self) -> bool {
        self.walls_visible
    }

    pub fn dark_room_visible(&self) -> bool {
        self.dark_room_visible
    }

    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    pub fn effect_mesh_visible(&self) -> bool {
        self.effect_mesh_visible
    }
}

impl RoomModel for FloorplanRoom {
    fn initialize(&mut self) -> Result<(), RoomInitError> {
        let source = self.source.as_ref().ok_or(RoomInitError::NoSceneData)?;
        if !source.is_closed() {
            return Err(RoomInitError::DegenerateFloorplan {
                vertices: source.vertices().len(),
            });
        }
        if !self.floor_height.is_finite() {
            return Err(RoomInitError::InvalidAnchor(format!(
                "floor anchor at non-finite height {}",
                self.floor_height
            )));
        }
        self.floorplan = Some(source.clone());
        Ok(())
    }

    fn is_player_inside(&self, head: Point3D) -> bool {
        self.floorplan
            .as_ref()
            .is_some_and(|floorplan| floorplan.contains(head))
    }

    fn floor_height(&self) -> f32 {
        self.floor_height
    }

    fn show_all_walls(&mut self, visible: bool) {
        self.walls_visible = visible;
    }

    fn show_dark_room(&mut self, visible: bool) {
        self.dark_room_visible = visible;
    }

    fn set_room_saturation(&mut self, saturation: f32) {
        self.saturation = saturation;
    }

    fn hide_effect_mesh(&mut self) {
        self.effect_mesh_visible = false;
    }
}
