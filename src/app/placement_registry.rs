//! In-Session-Registry aller platzierten Objekte.
//!
//! Die Registry ist transient und gilt nur für die aktuelle Session; sie wird
//! nicht persistiert. Der Controller nutzt sie, um Anker-Korrekturen auf die
//! zugehörigen Anker-Knoten zu übertragen.

use crate::app::interactables::PlacedObject;
use crate::core::{AnchorHandle, ObjectRef, Pose};

/// Ein gespeicherter Platzierungs-Datensatz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRecord {
    /// Eindeutige Registry-ID (nicht identisch mit Knoten-IDs)
    pub id: u64,
    /// Interaktions-Wrapper
    pub wrapper: ObjectRef,
    /// Sichtbares Modell
    pub model: ObjectRef,
    /// Anker-Handle (None im unverankerten Modus)
    pub anchor: Option<AnchorHandle>,
    /// Transform-Knoten des Ankers
    pub anchor_node: Option<ObjectRef>,
    /// Pose zum Zeitpunkt der Platzierung
    pub pose: Pose,
}

/// In-Session-Registry aller Platzierungen.
#[derive(Debug, Clone, Default)]
pub struct PlacementRegistry {
    records: Vec<PlacementRecord>,
    next_id: u64,
}

impl PlacementRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert eine Platzierung und gibt die vergebene ID zurück.
    pub fn register(&mut self, placed: &PlacedObject) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(PlacementRecord {
            id,
            wrapper: placed.wrapper,
            model: placed.model,
            anchor: placed.anchor,
            anchor_node: placed.anchor_node,
            pose: placed.pose,
        });
        id
    }

    /// Gibt den Record mit der angegebenen ID zurück (falls vorhanden).
    pub fn get(&self, record_id: u64) -> Option<&PlacementRecord> {
        self.records.iter().find(|r| r.id == record_id)
    }

    /// Sucht den Record eines Wrappers.
    pub fn find_by_wrapper(&self, wrapper: ObjectRef) -> Option<&PlacementRecord> {
        self.records.iter().find(|r| r.wrapper == wrapper)
    }

    /// Entfernt den Record mit der angegebenen ID.
    pub fn remove(&mut self, record_id: u64) {
        self.records.retain(|r| r.id != record_id);
    }

    /// Alle Records mit Anker (Handle und Knoten).
    pub fn anchored(&self) -> impl Iterator<Item = (AnchorHandle, ObjectRef)> + '_ {
        self.records
            .iter()
            .filter_map(|r| Some((r.anchor?, r.anchor_node?)))
    }

    /// Iteriert über alle Records in Registrierungsreihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &PlacementRecord> {
        self.records.iter()
    }

    /// Anzahl gespeicherter Records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Gibt `true` zurück, wenn keine Records vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(wrapper: u64, anchored: bool) -> PlacedObject {
        PlacedObject {
            wrapper: ObjectRef(wrapper),
            model: ObjectRef(wrapper - 1),
            anchor: anchored.then_some(AnchorHandle(wrapper)),
            anchor_node: anchored.then_some(ObjectRef(wrapper + 1)),
            pose: Pose::IDENTITY,
        }
    }

    #[test]
    fn register_assigns_increasing_ids() {
        let mut registry = PlacementRegistry::new();
        let a = registry.register(&placed(2, true));
        let b = registry.register(&placed(5, false));

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.find_by_wrapper(ObjectRef(5)).map(|r| r.id),
            Some(1)
        );
    }

    #[test]
    fn anchored_skips_unanchored_records() {
        let mut registry = PlacementRegistry::new();
        registry.register(&placed(2, true));
        registry.register(&placed(5, false));

        let anchored: Vec<_> = registry.anchored().collect();
        assert_eq!(anchored, vec![(AnchorHandle(2), ObjectRef(3))]);
    }

    #[test]
    fn remove_drops_record() {
        let mut registry = PlacementRegistry::new();
        let id = registry.register(&placed(2, true));
        registry.remove(id);
        assert!(registry.get(id).is_none());
        assert!(registry.is_empty());
    }
}
