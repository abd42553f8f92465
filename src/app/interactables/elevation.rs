//! Elevations-Controller: Zwei-Finger-Drag → vertikale Verschiebung über der Anker-Ebene.
//!
//! Lebenszyklus: `can_start_manipulation` (einmal beim Start) → `on_start`
//! → `on_continue`* → `on_end`. Abbruch stoppt nur, bereits angewandte
//! Verschiebung bleibt bestehen.

use glam::Vec3;

use super::SelectionController;
use crate::core::{
    is_vertical_axis, DragGesture, GestureId, InteractorKind, ObjectRef, SceneGraph, ViewContext,
};
use crate::shared::ELEVATION_SCALE;

/// Linien-Visualisierung vom Ursprung zur aktuellen Höhe.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElevationLine {
    /// Erster Endpunkt (Ursprung auf der Ebene, Welt)
    pub start: Vec3,
    /// Zweiter Endpunkt (aktuelle Objekt-Position, Welt)
    pub end: Vec3,
    /// Sichtbarkeit
    pub enabled: bool,
}

/// Zustand einer laufenden Elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationSession {
    /// Geste, die diese Session treibt
    pub gesture: GestureId,
    /// Ursprung auf der Anker-Ebene (Welt)
    pub origin: Vec3,
    /// Lokale Höhe des Ursprungs im Frame des Eltern-Ankers
    pub origin_local_y: f32,
    /// Ob die Linien-Visualisierung aktiv ist
    pub visualization_active: bool,
}

/// Elevation eines Interaktions-Wrappers relativ zu seinem Anker.
#[derive(Debug, Clone)]
pub struct ElevationController {
    object: ObjectRef,
    session: Option<ElevationSession>,
    visualization: Option<ElevationLine>,
}

impl ElevationController {
    /// Erstellt einen Controller; ohne Linie laufen nur die Transform-Berechnungen.
    pub fn new(object: ObjectRef, visualization: Option<ElevationLine>) -> Self {
        Self {
            object,
            session: None,
            visualization,
        }
    }

    /// Wrapper, zu dem dieser Controller gehört.
    pub fn object(&self) -> ObjectRef {
        self.object
    }

    /// Laufende Session (falls vorhanden).
    pub fn session(&self) -> Option<&ElevationSession> {
        self.session.as_ref()
    }

    /// Zustand der Linien-Visualisierung.
    pub fn visualization(&self) -> Option<&ElevationLine> {
        self.visualization.as_ref()
    }

    /// Start-Bedingungen: selektiert, keine laufende Session, Geste ohne Ziel,
    /// Anker horizontal.
    pub fn can_start_manipulation(
        &self,
        gesture: &DragGesture,
        selection: &SelectionController,
        scene: &SceneGraph,
    ) -> bool {
        if !selection.is_selectable_by(InteractorKind::Gesture) {
            log::debug!("Elevation {}: nicht selektiert", self.object);
            return false;
        }

        if let Some(session) = &self.session {
            log::debug!(
                "Elevation {}: Session von {:?} läuft noch",
                self.object,
                session.gesture
            );
            return false;
        }

        if gesture.target.is_some() {
            log::debug!("Elevation {}: Geste hat bereits ein Ziel", self.object);
            return false;
        }

        let Some(parent) = scene.parent_of(self.object) else {
            log::debug!("Elevation {}: kein Anker (unverankert)", self.object);
            return false;
        };
        let Some(parent_rotation) = scene.world_rotation(parent) else {
            return false;
        };

        // Nur Boden-/Decken-Ebenen erlauben vertikales Anheben
        if !is_vertical_axis(parent_rotation * Vec3::Y) {
            log::debug!("Elevation {}: Anker nicht horizontal", self.object);
            return false;
        }

        true
    }

    /// Erfasst den Ursprung auf der Anker-Ebene und startet die Visualisierung.
    pub fn on_start(&mut self, gesture: &DragGesture, scene: &SceneGraph) {
        let Some(node) = scene.get(self.object) else {
            return;
        };
        let Some(parent) = node.parent else {
            return;
        };
        let (Some(object_world), Some(parent_world)) =
            (scene.world_frame(self.object), scene.world_frame(parent))
        else {
            return;
        };

        let mut origin = node.local.translation;
        origin.y = object_world.inverse_transform_point(parent_world.position).y;
        let origin = object_world.transform_point(origin);
        let origin_local_y = parent_world.inverse_transform_point(origin).y;

        log::debug!(
            "Elevation {} gestartet (Ursprung lokal y={:.3})",
            self.object,
            origin_local_y
        );

        let visualization_active = match self.visualization.as_mut() {
            Some(line) => {
                line.start = origin;
                line.end = object_world.position;
                line.enabled = true;
                true
            }
            None => false,
        };

        self.session = Some(ElevationSession {
            gesture: gesture.id,
            origin,
            origin_local_y,
            visualization_active,
        });
    }

    /// Wendet ein Drag-Delta an (mit Boden-Klemmung) und meldet die Elevation.
    pub fn on_continue(
        &mut self,
        gesture: &DragGesture,
        view: &ViewContext,
        selection: &mut SelectionController,
        scene: &mut SceneGraph,
    ) {
        let Some(session) = self.session else {
            return;
        };
        if session.gesture != gesture.id {
            return;
        }

        let rotated_delta = view.camera.rotation * gesture.delta.extend(0.0);
        let elevation_amount = rotated_delta.y / view.screen_dpi * ELEVATION_SCALE;
        scene.translate_self(self.object, Vec3::new(0.0, elevation_amount, 0.0));

        // Nicht unter die Start-Höhe
        if let Some(node) = scene.get(self.object) {
            let local = node.local.translation;
            if local.y < session.origin_local_y {
                scene.set_local_position(
                    self.object,
                    Vec3::new(local.x, session.origin_local_y, local.z),
                );
            }
        }

        let Some(current) = scene.world_position(self.object) else {
            return;
        };
        selection.on_elevation_changed_scaled((current.y - session.origin.y).abs(), scene);

        if let Some(line) = self.visualization.as_mut() {
            line.end = current;
        }
    }

    /// Beendet die Session (auch bei Abbruch ohne Rücksetzen).
    ///
    /// Das Ende einer fremden Geste lässt die laufende Session unberührt.
    pub fn on_end(&mut self, gesture: &DragGesture) {
        match self.session {
            Some(session) if session.gesture == gesture.id => {}
            _ => return,
        }
        if gesture.was_cancelled {
            log::debug!("Elevation {} abgebrochen", self.object);
        }
        if let Some(line) = self.visualization.as_mut() {
            line.enabled = false;
        }
        self.session = None;
    }
}
