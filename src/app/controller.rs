//! Interaction Controller für die zentrale Gesten-Verarbeitung pro Tick.

use super::gesture_router::GestureRouter;
use super::interactables::{PlacementController, PlacementOutcome};
use super::{InteractionCommand, InteractionState};
use crate::core::{AnchorStore, GestureEvent, GestureEventSource, SurfaceQuery, ViewContext};
use crate::shared::InteractionOptions;

/// Orchestriert Gesten-Events und Controller-Aufrufe auf den InteractionState.
///
/// Die externen Kollaborateure werden bei der Konstruktion übergeben. Ohne
/// Anker-Store laufen Platzierungen im unverankerten Modus.
pub struct InteractionController {
    surface: Box<dyn SurfaceQuery>,
    anchors: Option<Box<dyn AnchorStore>>,
    placement: PlacementController,
    router: GestureRouter,
}

impl InteractionController {
    /// Erstellt einen Controller mit Standard-Prefabs.
    pub fn new(surface: Box<dyn SurfaceQuery>, anchors: Option<Box<dyn AnchorStore>>) -> Self {
        Self::from_options(surface, anchors, &InteractionOptions::default())
    }

    /// Erstellt einen Controller mit den Prefab-Namen aus den Optionen.
    pub fn from_options(
        surface: Box<dyn SurfaceQuery>,
        anchors: Option<Box<dyn AnchorStore>>,
        options: &InteractionOptions,
    ) -> Self {
        Self {
            surface,
            anchors,
            placement: PlacementController::from_options(options),
            router: GestureRouter::new(),
        }
    }

    /// Platzierungs-Controller (read-only).
    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    /// Router mit den laufenden Gesten (read-only).
    pub fn router(&self) -> &GestureRouter {
        &self.router
    }

    /// Verarbeitet alle Events eines Ticks in Reihenfolge.
    pub fn process_frame(
        &mut self,
        state: &mut InteractionState,
        view: &ViewContext,
        events: impl IntoIterator<Item = GestureEvent>,
    ) {
        self.surface.update_view(view);
        for event in events {
            self.handle_event(state, view, &event);
        }
    }

    /// Fragt eine Event-Quelle ab und verarbeitet den Tick.
    ///
    /// Gibt die Anzahl verarbeiteter Events zurück.
    pub fn poll_source(
        &mut self,
        state: &mut InteractionState,
        view: &ViewContext,
        source: &mut dyn GestureEventSource,
    ) -> usize {
        let events = source.poll();
        let count = events.len();
        self.process_frame(state, view, events);
        count
    }

    /// Verarbeitet ein einzelnes Event über Event->Command Mapping.
    pub fn handle_event(
        &mut self,
        state: &mut InteractionState,
        view: &ViewContext,
        event: &GestureEvent,
    ) {
        let commands = self.router.route(state, &self.placement, event);
        for command in commands {
            self.handle_command(state, view, command);
        }
    }

    /// Führt mutierende Commands auf dem InteractionState aus.
    pub fn handle_command(
        &mut self,
        state: &mut InteractionState,
        view: &ViewContext,
        command: InteractionCommand,
    ) {
        state.command_log.record(command);

        match command {
            InteractionCommand::CompleteSelectionTap { object, tap } => {
                if let Some(interactable) = state.interactables.get_mut(&object) {
                    interactable
                        .selection
                        .on_gesture_complete(&tap, &mut state.scene);
                }
            }
            InteractionCommand::CompletePlacementTap { tap } => {
                let anchors = self
                    .anchors
                    .as_deref_mut()
                    .map(|store| store as &mut dyn AnchorStore);
                let outcome = self.placement.on_gesture_complete(
                    &tap,
                    view,
                    self.surface.as_ref(),
                    anchors,
                    &mut state.scene,
                );
                match outcome {
                    PlacementOutcome::Placed(placed) => {
                        state.register_interactable(placed.wrapper);
                        let record = state.placements.register(&placed);
                        if let Some(anchor) = placed.anchor {
                            log::info!("Anker {} angelegt (Platzierung #{})", anchor, record);
                        }
                    }
                    PlacementOutcome::Rejected(reason) => {
                        log::debug!("Platzierung verworfen: {:?}", reason);
                    }
                }
            }
            InteractionCommand::BeginElevation { object, gesture } => {
                if let Some(interactable) = state.interactables.get_mut(&object) {
                    interactable.elevation.on_start(&gesture, &state.scene);
                }
            }
            InteractionCommand::ContinueElevation { object, gesture } => {
                if let Some(interactable) = state.interactables.get_mut(&object) {
                    interactable.elevation.on_continue(
                        &gesture,
                        view,
                        &mut interactable.selection,
                        &mut state.scene,
                    );
                }
            }
            InteractionCommand::EndElevation { object, gesture } => {
                if let Some(interactable) = state.interactables.get_mut(&object) {
                    interactable.elevation.on_end(&gesture);
                }
            }
        }
    }

    /// Überträgt korrigierte Anker-Posen aus dem Store auf die Anker-Knoten.
    ///
    /// Gibt die Anzahl aktualisierter Anker zurück.
    pub fn sync_anchors(&self, state: &mut InteractionState) -> usize {
        let Some(store) = self.anchors.as_deref() else {
            return 0;
        };

        let mut updated = 0;
        for (handle, node) in state.placements.anchored() {
            let Some(pose) = store.pose(handle) else {
                log::debug!("Anker {} nicht mehr im Store", handle);
                continue;
            };
            if state.scene.contains(node) {
                state.scene.set_world_pose(node, pose);
                updated += 1;
            }
        }
        updated
    }
}
