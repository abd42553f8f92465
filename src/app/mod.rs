//! Application-Layer: Controller, State, Commands und Gesten-Konsumenten.

pub mod command_log;
pub mod controller;
pub mod events;
mod gesture_router;
pub mod interactables;
pub mod placement_registry;
/// Interaction State
///
/// Dieses Modul verwaltet den Zustand der Interaktionsschicht (Szene, Interactables, Platzierungen).
pub mod state;

pub use command_log::CommandLog;
pub use controller::InteractionController;
pub use events::InteractionCommand;
pub use gesture_router::GestureRouter;
pub use interactables::{
    ElevationController, ElevationLine, ElevationSession, PlacedObject, PlacementController,
    PlacementOutcome, PlacementRejection, SelectionController,
};
pub use placement_registry::{PlacementRecord, PlacementRegistry};
pub use state::{Interactable, InteractionState};
