//! InteractionCommand-Enum: mutierende Schritte, die aus Gesten-Events entstehen.

use crate::core::{DragGesture, ObjectRef, TapGesture};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
///
/// Der `GestureRouter` erzeugt pro akzeptiertem Konsumenten einer Geste
/// genau einen Command; der `InteractionController` führt sie aus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionCommand {
    /// Tap-Abschluss an einen Selektions-Controller zustellen
    CompleteSelectionTap { object: ObjectRef, tap: TapGesture },
    /// Tap-Abschluss an den Platzierungs-Controller zustellen
    CompletePlacementTap { tap: TapGesture },
    /// Elevation eines Wrappers starten
    BeginElevation {
        object: ObjectRef,
        gesture: DragGesture,
    },
    /// Drag-Delta auf eine laufende Elevation anwenden
    ContinueElevation {
        object: ObjectRef,
        gesture: DragGesture,
    },
    /// Elevation beenden (regulär oder abgebrochen)
    EndElevation {
        object: ObjectRef,
        gesture: DragGesture,
    },
}

impl InteractionCommand {
    /// Ziel-Wrapper des Commands (None für Platzierungen).
    pub fn object(&self) -> Option<ObjectRef> {
        match self {
            Self::CompleteSelectionTap { object, .. }
            | Self::BeginElevation { object, .. }
            | Self::ContinueElevation { object, .. }
            | Self::EndElevation { object, .. } => Some(*object),
            Self::CompletePlacementTap { .. } => None,
        }
    }
}
