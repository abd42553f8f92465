//! Raycast gegen eine feste Menge erkannter Ebenen (Lochkamera-Modell).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{Hit, PlaneFilter, Pose, SurfaceQuery, ViewContext};

/// Eine erkannte Ebene: Pose (Normale = lokale Y-Achse) und rechteckiges Polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedPlane {
    /// Mittelpunkt und Orientierung
    pub pose: Pose,
    /// Halbe Ausdehnung entlang lokal X und lokal Z
    pub half_extents: Vec2,
}

impl DetectedPlane {
    /// Horizontale Ebene (Normale nach oben) mit Mittelpunkt `center`.
    pub fn floor(center: Vec3, half_extents: Vec2) -> Self {
        Self {
            pose: Pose::from_position(center),
            half_extents,
        }
    }

    fn contains(&self, point: Vec3) -> bool {
        let local = self.pose.rotation.inverse() * (point - self.pose.position);
        local.x.abs() <= self.half_extents.x && local.z.abs() <= self.half_extents.y
    }
}

/// Surface-Query über simulierte Ebenen.
///
/// Screen-Koordinaten: Ursprung unten links, Y nach oben. Die Kamera blickt
/// entlang ihrer lokalen +Z-Achse.
#[derive(Debug, Clone)]
pub struct PlaneSurfaceQuery {
    planes: Vec<DetectedPlane>,
    camera: Pose,
    viewport: Vec2,
    vertical_fov: f32,
}

impl PlaneSurfaceQuery {
    /// Erstellt eine Query ohne Ebenen.
    pub fn new(viewport: Vec2, vertical_fov_degrees: f32) -> Self {
        Self {
            planes: Vec::new(),
            camera: Pose::IDENTITY,
            viewport,
            vertical_fov: vertical_fov_degrees.to_radians(),
        }
    }

    /// Fügt eine Ebene hinzu (Builder).
    pub fn with_plane(mut self, plane: DetectedPlane) -> Self {
        self.planes.push(plane);
        self
    }

    /// Setzt die Kamera-Pose direkt.
    pub fn set_camera(&mut self, camera: Pose) {
        self.camera = camera;
    }

    /// Strahl (Ursprung, normierte Richtung) durch einen Screen-Punkt.
    pub fn screen_ray(&self, screen_point: Vec2) -> (Vec3, Vec3) {
        let ndc = (screen_point / self.viewport) * 2.0 - Vec2::ONE;
        let tan_half = (self.vertical_fov * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let local_dir = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, 1.0).normalize();
        (self.camera.position, self.camera.rotation * local_dir)
    }
}

impl SurfaceQuery for PlaneSurfaceQuery {
    fn raycast(&self, screen_point: Vec2, filter: PlaneFilter) -> Vec<Hit> {
        let (origin, dir) = self.screen_ray(screen_point);

        let mut hits: Vec<Hit> = self
            .planes
            .iter()
            .filter_map(|plane| {
                let normal = plane.pose.up();
                let denom = dir.dot(normal);
                if denom.abs() < 1e-6 {
                    return None;
                }
                let t = (plane.pose.position - origin).dot(normal) / denom;
                if t <= 0.0 {
                    return None;
                }
                let point = origin + dir * t;
                if filter == PlaneFilter::PlaneWithinPolygon && !plane.contains(point) {
                    return None;
                }
                Some(Hit {
                    pose: Pose::new(point, plane.pose.rotation),
                    surface_normal: normal,
                    distance: t,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn update_view(&mut self, view: &ViewContext) {
        self.camera = view.camera;
    }
}
