//! AR Object Placement Library.
//! Gesten-gesteuerte Selektion, Elevation und Platzierung als Library für Hosts und Tests.

pub mod app;
pub mod core;
pub mod shared;
pub mod sim;

pub use app::{
    Interactable, InteractionCommand, InteractionController, InteractionState, PlacementOutcome,
    PlacementRegistry,
};
pub use core::{
    AnchorHandle, AnchorStore, DragGesture, GestureEvent, GestureEventSource, GestureId, Hit,
    ObjectRef, PlaneFilter, Pose, SceneGraph, SurfaceQuery, TapGesture, ViewContext,
};
pub use shared::InteractionOptions;
