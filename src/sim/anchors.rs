//! In-Memory-Anker-Store mit simulierbarer Drift-Korrektur.

use indexmap::IndexMap;

use crate::core::{AnchorHandle, AnchorStore, Pose};

/// Anker-Store ohne Tracking-Backend.
#[derive(Debug, Clone)]
pub struct InMemoryAnchorStore {
    anchors: IndexMap<AnchorHandle, Pose>,
    next_id: u64,
    tracking_ready: bool,
}

impl Default for InMemoryAnchorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAnchorStore {
    /// Erstellt einen leeren Store mit bereitem Tracking.
    pub fn new() -> Self {
        Self {
            anchors: IndexMap::new(),
            next_id: 1,
            tracking_ready: true,
        }
    }

    /// Simuliert (nicht) bereites Tracking; ohne Tracking schlägt `create_anchor` fehl.
    pub fn set_tracking_ready(&mut self, ready: bool) {
        self.tracking_ready = ready;
    }

    /// Simuliert eine Drift-Korrektur des Trackings.
    pub fn apply_drift(&mut self, handle: AnchorHandle, corrected: Pose) -> bool {
        match self.anchors.get_mut(&handle) {
            Some(pose) => {
                *pose = corrected;
                true
            }
            None => false,
        }
    }

    /// Anzahl angelegter Anker.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Gibt `true` zurück, wenn noch kein Anker angelegt wurde.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl AnchorStore for InMemoryAnchorStore {
    fn create_anchor(&mut self, pose: Pose) -> Option<AnchorHandle> {
        if !self.tracking_ready {
            return None;
        }
        let handle = AnchorHandle(self.next_id);
        self.next_id += 1;
        self.anchors.insert(handle, pose);
        Some(handle)
    }

    fn pose(&self, handle: AnchorHandle) -> Option<Pose> {
        self.anchors.get(&handle).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn create_and_drift() {
        let mut store = InMemoryAnchorStore::new();
        let handle = store
            .create_anchor(Pose::from_position(Vec3::ONE))
            .expect("Tracking bereit");

        let corrected = Pose::from_position(Vec3::new(1.0, 1.0, 1.1));
        assert!(store.apply_drift(handle, corrected));
        assert_eq!(store.pose(handle), Some(corrected));
        assert!(!store.apply_drift(AnchorHandle(77), corrected));
    }

    #[test]
    fn not_ready_tracking_creates_nothing() {
        let mut store = InMemoryAnchorStore::new();
        store.set_tracking_ready(false);
        assert!(store.create_anchor(Pose::IDENTITY).is_none());
        assert!(store.is_empty());
    }
}
