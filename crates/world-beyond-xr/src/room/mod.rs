//! Room geometry and boundary compliance

mod compliance;
mod floorplan_room;
mod model;

pub use compliance::{BoundaryEdge, RoomBoundaryStatus, RoomComplianceMonitor};
pub use floorplan_room::FloorplanRoom;
pub use model::RoomModel;
