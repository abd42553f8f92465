//! Die drei Gesten-Konsumenten eines Interaktions-Wrappers bzw. der Szene.

pub mod elevation;
pub mod placement;
pub mod selection;

pub use elevation::{ElevationController, ElevationLine, ElevationSession};
pub use placement::{
    faces_camera, PlacedObject, PlacementController, PlacementOutcome, PlacementRejection,
};
pub use selection::SelectionController;
