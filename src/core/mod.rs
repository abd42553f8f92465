//! Core-Domänentypen: Transformationen, Gesten, Szenengraph, Raycast und Anker.

pub mod anchor;
pub mod gesture;
pub mod scene;
pub mod surface;
pub mod transform;
pub mod view;

pub use anchor::{AnchorHandle, AnchorStore};
pub use gesture::{
    DragGesture, DragPhase, GestureEvent, GestureEventSource, GestureId, InteractorKind,
    TapGesture, TapPhase,
};
pub use scene::{NodeKind, ObjectRef, SceneGraph, SceneNode};
pub use surface::{Hit, PlaneFilter, SurfaceQuery};
pub use transform::{is_vertical_axis, Frame, LocalTransform, Pose};
pub use view::ViewContext;
