//! Geteilte Konfiguration und Konstanten.

pub mod options;

pub use options::InteractionOptions;
pub use options::{BACK_FACE_DOT_THRESHOLD, DEFAULT_SCREEN_DPI, ELEVATION_SCALE};
