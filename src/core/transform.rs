//! Posen, lokale Transformationen und reine Umrechnungen lokal ↔ Welt.
//!
//! Die Hierarchie wird nicht über eine Engine aufgelöst, sondern als Daten:
//! jeder Knoten speichert seine `LocalTransform`, die Welt-Transformation
//! ergibt sich durch Komposition der Eltern-Kette zu einem `Frame`.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Toleranz für Achsen-Vergleiche (Vektor-Gleichheit mit 1e-5 Abstand).
pub const AXIS_EPSILON: f32 = 1e-5;

/// Position + Orientierung in Weltkoordinaten (z.B. Raycast-Treffer, Anker).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in Weltkoordinaten
    pub position: Vec3,
    /// Orientierung in Weltkoordinaten
    pub rotation: Quat,
}

impl Pose {
    /// Ursprung ohne Rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Erstellt eine neue Pose.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose an einer Position ohne Rotation.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Lokale Y-Achse der Pose in Weltkoordinaten.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Transformation eines Knotens relativ zu seinem Eltern-Knoten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position im Eltern-Frame
    pub translation: Vec3,
    /// Rotation relativ zum Eltern-Frame
    pub rotation: Quat,
    /// Skalierung pro Achse (nicht zwingend uniform)
    pub scale: Vec3,
}

impl LocalTransform {
    /// Keine Verschiebung, keine Rotation, Skalierung 1.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Übernimmt eine Pose als lokale Transformation mit Skalierung 1.
    pub fn from_pose(pose: Pose) -> Self {
        Self {
            translation: pose.position,
            rotation: pose.rotation,
            scale: Vec3::ONE,
        }
    }

    /// Reine Verschiebung.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Welt-Transformation eines Knotens (Position, Rotation, verlustbehaftete Skalierung).
///
/// Scherung durch rotierte, nicht-uniforme Eltern wird nicht abgebildet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Ursprung des Frames in Weltkoordinaten
    pub position: Vec3,
    /// Orientierung des Frames in Weltkoordinaten
    pub rotation: Quat,
    /// Akkumulierte Skalierung der Kette
    pub scale: Vec3,
}

impl Frame {
    /// Welt-Frame (Wurzel ohne Eltern).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Frame eines Kindes mit der gegebenen lokalen Transformation.
    pub fn compose(&self, local: &LocalTransform) -> Frame {
        Frame {
            position: self.transform_point(local.translation),
            rotation: self.rotation * local.rotation,
            scale: self.scale * local.scale,
        }
    }

    /// Lokaler Punkt → Weltpunkt.
    pub fn transform_point(&self, local_point: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * local_point)
    }

    /// Weltpunkt → lokaler Punkt.
    pub fn inverse_transform_point(&self, world_point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (world_point - self.position)) / self.scale
    }

    /// Lokale Richtung → Welt-Richtung (ohne Skalierung).
    pub fn transform_direction(&self, local_direction: Vec3) -> Vec3 {
        self.rotation * local_direction
    }

    /// Lokale Transformation, die ein Kind mit Welt-Frame `child` unter diesem Frame hätte.
    pub fn relative_local(&self, child: &Frame) -> LocalTransform {
        LocalTransform {
            translation: self.inverse_transform_point(child.position),
            rotation: self.rotation.inverse() * child.rotation,
            scale: child.scale / self.scale,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Prüft, ob eine Achse parallel zu Welt-Oben oder Welt-Unten liegt.
pub fn is_vertical_axis(axis: Vec3) -> bool {
    let eps_sq = AXIS_EPSILON * AXIS_EPSILON;
    (axis - Vec3::Y).length_squared() < eps_sq || (axis + Vec3::Y).length_squared() < eps_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn compose_and_inverse_are_consistent() {
        let parent = Frame {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
            scale: Vec3::new(1.0, 2.0, 1.0),
        };
        let local = Vec3::new(0.5, 1.0, -0.25);

        let world = parent.transform_point(local);
        let back = parent.inverse_transform_point(world);

        assert_abs_diff_eq!(back.x, local.x, epsilon = 1e-5);
        assert_abs_diff_eq!(back.y, local.y, epsilon = 1e-5);
        assert_abs_diff_eq!(back.z, local.z, epsilon = 1e-5);
    }

    #[test]
    fn relative_local_of_identical_frames_is_exact_identity_translation() {
        let frame = Frame {
            position: Vec3::new(0.3, 0.0, -1.7),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        };
        let local = frame.relative_local(&frame);
        assert_eq!(local.translation, Vec3::ZERO);
        assert_eq!(local.scale, Vec3::ONE);
    }

    #[test]
    fn vertical_axis_accepts_up_and_down_only() {
        assert!(is_vertical_axis(Vec3::Y));
        assert!(is_vertical_axis(-Vec3::Y));
        assert!(!is_vertical_axis(Vec3::X));
        assert!(!is_vertical_axis(Quat::from_rotation_x(0.1) * Vec3::Y));
    }
}
