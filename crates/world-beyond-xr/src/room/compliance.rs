//! Edge-triggered room boundary monitoring

use crate::spatial::Point3D;

use super::RoomModel;

/// Where the player's head is relative to the floorplan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomBoundaryStatus {
    #[default]
    Inside,
    Outside,
}

impl RoomBoundaryStatus {
    pub fn from_inside(inside: bool) -> Self {
        if inside {
            RoomBoundaryStatus::Inside
        } else {
            RoomBoundaryStatus::Outside
        }
    }
}

/// Status transitions, raised once per crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryEdge {
    LeftRoom,
    ReturnedToRoom,
}

/// Tracks the player against the room outline once the room exists.
///
/// The monitor stays disarmed (and silent) until the room model has been
/// initialized and [`arm`](Self::arm) is called with the measured status.
#[derive(Debug, Default)]
pub struct RoomComplianceMonitor {
    status: RoomBoundaryStatus,
    armed: bool,
}

impl RoomComplianceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start monitoring from a known status without raising an edge
    pub fn arm(&mut self, status: RoomBoundaryStatus) {
        self.status = status;
        self.armed = true;
    }

    pub fn status(&self) -> RoomBoundaryStatus {
        self.status
    }

    /// Ask the room whether the head is inside and report any crossing
    pub fn update(&mut self, room: &dyn RoomModel, head: Point3D) -> Option<BoundaryEdge> {
        if !self.armed {
            return None;
        }
        self.observe(RoomBoundaryStatus::from_inside(room.is_player_inside(head)))
    }

    /// Record a measured status, returning the edge if it changed
    pub fn observe(&mut self, status: RoomBoundaryStatus) -> Option<BoundaryEdge> {
        if !self.armed || status == self.status {
            return None;
        }
        self.status = status;
        let edge = match status {
            RoomBoundaryStatus::Outside => BoundaryEdge::LeftRoom,
            RoomBoundaryStatus::Inside => BoundaryEdge::ReturnedToRoom,
        };
        tracing::info!("Room boundary crossed: {:?}", edge);
        Some(edge)
    }
}
