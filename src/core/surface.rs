//! Raycast-Schnittstelle gegen erkannte Ebenen der Umgebung.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::transform::Pose;
use super::ViewContext;

/// Einschränkung, gegen welche Ebenen-Kategorien geraycastet wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaneFilter {
    /// Alle erkannten Ebenen (unendlich ausgedehnt)
    AllPlanes,
    /// Nur innerhalb des erkannten Polygons einer Ebene
    PlaneWithinPolygon,
}

/// Ein Raycast-Treffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Treffer-Pose: Position auf der Ebene, Rotation der Ebene
    pub pose: Pose,
    /// Flächennormale am Treffer
    pub surface_normal: Vec3,
    /// Abstand vom Strahl-Ursprung
    pub distance: f32,
}

impl Hit {
    /// Treffer aus einer Pose; die Normale ist die lokale Y-Achse der Pose.
    pub fn from_pose(pose: Pose, distance: f32) -> Self {
        Self {
            pose,
            surface_normal: pose.up(),
            distance,
        }
    }
}

/// Raycast gegen die Umgebung.
pub trait SurfaceQuery {
    /// Treffer für einen Screen-Punkt, nächster Treffer zuerst. Darf leer sein.
    fn raycast(&self, screen_point: Vec2, filter: PlaneFilter) -> Vec<Hit>;

    /// Wird einmal pro Tick vor dem Dispatch mit der aktuellen Kamera aufgerufen.
    fn update_view(&mut self, _view: &ViewContext) {}
}
