//! Schnittstelle zum Anker-Store (Tracking mit Drift-Korrektur).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::transform::Pose;

/// Opakes Handle auf einen getrackten Anker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorHandle(pub u64);

impl fmt::Display for AnchorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// Store für räumliche Anker.
///
/// Der Kern legt nur Anker an und liest ihre Posen; Entfernen und
/// Tracking-Lebenszeit liegen beim Store.
pub trait AnchorStore {
    /// Legt einen Anker an einer Welt-Pose an.
    ///
    /// `None`, wenn das Tracking noch nicht bereit ist.
    fn create_anchor(&mut self, pose: Pose) -> Option<AnchorHandle>;

    /// Aktuelle (ggf. drift-korrigierte) Pose eines Ankers.
    fn pose(&self, handle: AnchorHandle) -> Option<Pose>;
}
