//! Interaction State: zentrale Datenhaltung aller mutierbaren Zustände.

use indexmap::IndexMap;

use super::interactables::{ElevationController, ElevationLine, SelectionController};
use super::{CommandLog, PlacementRegistry};
use crate::core::{LocalTransform, NodeKind, ObjectRef, SceneGraph};
use crate::shared::InteractionOptions;

/// Controller-Paar eines Interaktions-Wrappers.
#[derive(Debug, Clone)]
pub struct Interactable {
    /// Selektion und Selektions-Indikator
    pub selection: SelectionController,
    /// Elevation relativ zum Anker
    pub elevation: ElevationController,
}

/// Gesamter Zustand der Interaktionsschicht.
pub struct InteractionState {
    /// Szene mit allen gespawnten Knoten
    pub scene: SceneGraph,
    /// Registrierte Interaktions-Wrapper in Registrierungsreihenfolge
    pub interactables: IndexMap<ObjectRef, Interactable>,
    /// Platzierungen dieser Session
    pub placements: PlacementRegistry,
    /// Log ausgeführter Commands
    pub command_log: CommandLog,
    /// Host-Optionen
    pub options: InteractionOptions,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionState {
    /// Erstellt einen leeren Zustand mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(InteractionOptions::default())
    }

    /// Erstellt einen leeren Zustand mit den gegebenen Optionen.
    pub fn with_options(options: InteractionOptions) -> Self {
        Self {
            scene: SceneGraph::new(),
            interactables: IndexMap::new(),
            placements: PlacementRegistry::new(),
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Verdrahtet Selektion und Elevation mit einem vorhandenen Wrapper-Knoten.
    ///
    /// Legt je nach Optionen einen (inaktiven) Selektions-Indikator als Kind
    /// und eine Elevations-Linie an. Gibt `false` zurück, wenn der Knoten
    /// fehlt oder bereits registriert ist.
    pub fn register_interactable(&mut self, wrapper: ObjectRef) -> bool {
        if !self.scene.contains(wrapper) {
            log::warn!("Interactable {} existiert nicht in der Szene", wrapper);
            return false;
        }
        if self.interactables.contains_key(&wrapper) {
            return false;
        }

        let indicator = if self.options.selection_indicator {
            let indicator = self.scene.spawn_child(
                NodeKind::SelectionIndicator,
                wrapper,
                LocalTransform::IDENTITY,
            );
            if let Some(indicator) = indicator {
                self.scene.set_active(indicator, false);
            }
            indicator
        } else {
            None
        };
        let line = self.options.elevation_line.then(ElevationLine::default);

        self.interactables.insert(
            wrapper,
            Interactable {
                selection: SelectionController::new(wrapper, indicator),
                elevation: ElevationController::new(wrapper, line),
            },
        );
        log::debug!("Interactable {} registriert", wrapper);
        true
    }

    /// Controller-Paar eines Wrappers.
    pub fn interactable(&self, wrapper: ObjectRef) -> Option<&Interactable> {
        self.interactables.get(&wrapper)
    }

    /// Aktuell selektierter Wrapper (höchstens einer).
    pub fn selected_object(&self) -> Option<ObjectRef> {
        self.interactables
            .values()
            .find(|i| i.selection.is_selected())
            .map(|i| i.selection.object())
    }

    /// Anzahl selektierter Wrapper.
    pub fn selected_count(&self) -> usize {
        self.interactables
            .values()
            .filter(|i| i.selection.is_selected())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pose;

    fn wrapper(state: &mut InteractionState) -> ObjectRef {
        state.scene.spawn(
            NodeKind::InteractionWrapper {
                prefab: "interactable".into(),
            },
            Pose::IDENTITY,
        )
    }

    #[test]
    fn register_spawns_inactive_indicator_child() {
        let mut state = InteractionState::new();
        let id = wrapper(&mut state);

        assert!(state.register_interactable(id));

        let interactable = state.interactable(id).expect("registriert");
        let indicator = interactable
            .selection
            .visualization()
            .expect("Indikator angelegt");
        assert_eq!(state.scene.parent_of(indicator), Some(id));
        assert!(!state.scene.get(indicator).expect("Knoten").active);
        assert!(interactable.elevation.visualization().is_some());
    }

    #[test]
    fn register_twice_or_unknown_is_rejected() {
        let mut state = InteractionState::new();
        let id = wrapper(&mut state);

        assert!(state.register_interactable(id));
        assert!(!state.register_interactable(id));
        assert!(!state.register_interactable(ObjectRef(999)));
        assert_eq!(state.interactables.len(), 1);
    }

    #[test]
    fn options_disable_visualizations() {
        let options = InteractionOptions {
            selection_indicator: false,
            elevation_line: false,
            ..InteractionOptions::default()
        };
        let mut state = InteractionState::with_options(options);
        let id = wrapper(&mut state);

        assert!(state.register_interactable(id));
        let interactable = state.interactable(id).expect("registriert");
        assert!(interactable.selection.visualization().is_none());
        assert!(interactable.elevation.visualization().is_none());
        assert_eq!(state.scene.len(), 1);
    }
}
