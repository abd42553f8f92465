//! Gesten-Events aus der vorgelagerten Touch-Erkennung.
//!
//! Die Erkennung selbst (Entprellen, Mehrfinger-Auswertung) liegt außerhalb;
//! hier kommen nur fertige Tap- und Zwei-Finger-Drag-Events an.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ObjectRef;

/// Identität einer logischen Geste über alle ihre Phasen hinweg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GestureId(pub u64);

/// Phase eines Taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapPhase {
    /// Finger aufgesetzt
    Started,
    /// Finger gehoben oder Geste abgebrochen
    Ended,
}

/// Einzelner Tap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapGesture {
    /// Identität der Geste
    pub id: GestureId,
    /// Aktuelle Phase
    pub phase: TapPhase,
    /// Screen-Position beim Aufsetzen
    pub start_position: Vec2,
    /// Aktuelle Screen-Position
    pub position: Vec2,
    /// Vom Recognizer getroffenes Objekt (falls vorhanden)
    #[serde(default)]
    pub target: Option<ObjectRef>,
    /// true, wenn die Geste abgebrochen wurde
    #[serde(default)]
    pub was_cancelled: bool,
}

impl TapGesture {
    /// Tap-Start an einer Position ohne Ziel.
    pub fn started(id: GestureId, position: Vec2) -> Self {
        Self {
            id,
            phase: TapPhase::Started,
            start_position: position,
            position,
            target: None,
            was_cancelled: false,
        }
    }

    /// Abschluss dieses Taps an der gleichen Position.
    pub fn ended(self) -> Self {
        Self {
            phase: TapPhase::Ended,
            ..self
        }
    }

    /// Setzt das getroffene Objekt.
    pub fn with_target(self, target: Option<ObjectRef>) -> Self {
        Self { target, ..self }
    }

    /// Markiert die Geste als abgebrochen.
    pub fn cancelled(self) -> Self {
        Self {
            was_cancelled: true,
            ..self
        }
    }
}

/// Phase einer Zwei-Finger-Drag-Geste.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragPhase {
    /// Drag beginnt
    Start,
    /// Drag läuft (pro Frame)
    Continue,
    /// Drag beendet oder abgebrochen
    End,
}

/// Zwei-Finger-Drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragGesture {
    /// Identität der Geste
    pub id: GestureId,
    /// Aktuelle Phase
    pub phase: DragPhase,
    /// Screen-Delta seit dem letzten Update (Pixel)
    #[serde(default)]
    pub delta: Vec2,
    /// Screen-Position beim Aufsetzen
    pub start_position: Vec2,
    /// Bereits von einer anderen Interaktion beanspruchtes Objekt
    #[serde(default)]
    pub target: Option<ObjectRef>,
    /// true, wenn die Geste abgebrochen wurde
    #[serde(default)]
    pub was_cancelled: bool,
}

impl DragGesture {
    /// Drag-Start an einer Position ohne Ziel.
    pub fn start(id: GestureId, start_position: Vec2) -> Self {
        Self {
            id,
            phase: DragPhase::Start,
            delta: Vec2::ZERO,
            start_position,
            target: None,
            was_cancelled: false,
        }
    }

    /// Update dieses Drags mit einem neuen Delta.
    pub fn continued(self, delta: Vec2) -> Self {
        Self {
            phase: DragPhase::Continue,
            delta,
            ..self
        }
    }

    /// Ende dieses Drags.
    pub fn ended(self, was_cancelled: bool) -> Self {
        Self {
            phase: DragPhase::End,
            delta: Vec2::ZERO,
            was_cancelled,
            ..self
        }
    }
}

/// Ein Gesten-Event pro Dispatch-Tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GestureEvent {
    /// Tap (Selektion oder Platzierung)
    Tap(TapGesture),
    /// Zwei-Finger-Drag (Elevation)
    TwoFingerDrag(DragGesture),
}

impl GestureEvent {
    /// Identität der zugrunde liegenden Geste.
    pub fn id(&self) -> GestureId {
        match self {
            GestureEvent::Tap(tap) => tap.id,
            GestureEvent::TwoFingerDrag(drag) => drag.id,
        }
    }
}

/// Art des Interaktors, der eine Selektierbarkeit abfragt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractorKind {
    /// Touch-Gesten auf dem Bildschirm
    Gesture,
    /// Controller- oder Blick-Strahl
    Ray,
    /// Direkter Handkontakt
    Direct,
}

/// Quelle für Gesten-Events (pro Tick abgefragt).
pub trait GestureEventSource {
    /// Liefert alle Events dieses Ticks in Zustellreihenfolge.
    fn poll(&mut self) -> Vec<GestureEvent>;
}
