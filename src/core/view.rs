//! Kamera- und Bildschirm-Kontext eines Ticks.

use super::transform::Pose;

/// Kamera-Pose und Bildschirmdichte, die für einen Tick gelten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewContext {
    /// Welt-Pose der AR-Kamera
    pub camera: Pose,
    /// Bildschirmdichte in Pixeln pro Zoll (positiv und endlich)
    pub screen_dpi: f32,
}

impl ViewContext {
    /// Erstellt einen neuen Kontext.
    pub fn new(camera: Pose, screen_dpi: f32) -> Self {
        Self { camera, screen_dpi }
    }
}
