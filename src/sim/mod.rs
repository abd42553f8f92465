//! In-Memory-Kollaborateure für Hosts ohne Tracking-Backend und für Tests.
//!
//! - `planes`: Raycast gegen simulierte Ebenen
//! - `anchors`: Anker-Store mit simulierbarer Drift
//! - `script`: JSON-Gesten-Skripte und skriptbasierte Event-Quelle

mod anchors;
mod planes;
mod script;

pub use anchors::InMemoryAnchorStore;
pub use planes::{DetectedPlane, PlaneSurfaceQuery};
pub use script::{GestureScript, ScriptTick, ScriptedGestureSource};
