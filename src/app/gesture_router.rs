//! Mapping von Gesten-Events auf mutierende Interaction-Commands.
//!
//! Die Eignung eines Konsumenten wird genau einmal beim Start einer Geste
//! geprüft. Folge-Phasen gehen nur an die Konsumenten, die beim Start
//! akzeptiert haben, ohne die Start-Bedingungen erneut zu prüfen.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::interactables::PlacementController;
use super::{InteractionCommand, InteractionState};
use crate::core::{DragGesture, DragPhase, GestureEvent, GestureId, ObjectRef, TapGesture, TapPhase};

/// Konsumenten eines laufenden Taps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TapRoute {
    selection: Vec<ObjectRef>,
    placement: bool,
}

/// Merkt sich pro Geste, welche Konsumenten sie beim Start angenommen haben.
///
/// Ein Eintrag lebt bis zum Ende seiner Geste. Offene Taps sind auf
/// `MAX_PENDING_TAPS` begrenzt; bei Überlauf werden die ältesten verworfen,
/// deren Ende wird dann implizit neu bewertet.
#[derive(Debug, Default)]
pub struct GestureRouter {
    taps: IndexMap<GestureId, TapRoute>,
    drags: HashMap<GestureId, Vec<ObjectRef>>,
}

impl GestureRouter {
    const MAX_PENDING_TAPS: usize = 64;
}

impl GestureRouter {
    /// Erstellt einen Router ohne laufende Gesten.
    pub fn new() -> Self {
        Self::default()
    }

    /// Übersetzt ein Event in eine Sequenz ausführbarer Commands.
    pub fn route(
        &mut self,
        state: &InteractionState,
        placement: &PlacementController,
        event: &GestureEvent,
    ) -> Vec<InteractionCommand> {
        log::trace!("Route {:?}", event.id());
        match event {
            GestureEvent::Tap(tap) => self.route_tap(state, placement, tap),
            GestureEvent::TwoFingerDrag(drag) => self.route_drag(state, drag),
        }
    }

    /// Anzahl gestarteter, noch nicht abgeschlossener Taps.
    pub fn active_taps(&self) -> usize {
        self.taps.len()
    }

    /// Anzahl laufender Drags mit mindestens einem Konsumenten.
    pub fn active_drags(&self) -> usize {
        self.drags.len()
    }

    fn route_tap(
        &mut self,
        state: &InteractionState,
        placement: &PlacementController,
        tap: &TapGesture,
    ) -> Vec<InteractionCommand> {
        match tap.phase {
            TapPhase::Started => {
                if self.taps.contains_key(&tap.id) {
                    log::debug!("Tap {:?} bereits gestartet, Start ignoriert", tap.id);
                } else {
                    if self.taps.len() >= Self::MAX_PENDING_TAPS {
                        log::warn!(
                            "{} offene Taps ohne Ende, älteste Hälfte verworfen",
                            self.taps.len()
                        );
                        self.taps.drain(..Self::MAX_PENDING_TAPS / 2);
                    }
                    self.taps
                        .insert(tap.id, Self::evaluate_tap(state, placement, tap));
                }
                Vec::new()
            }
            TapPhase::Ended => {
                // Ende ohne gesehenen Start gilt als implizit gestartet
                let route = self
                    .taps
                    .shift_remove(&tap.id)
                    .unwrap_or_else(|| Self::evaluate_tap(state, placement, tap));

                let mut commands: Vec<InteractionCommand> = route
                    .selection
                    .into_iter()
                    .filter(|object| state.interactables.contains_key(object))
                    .map(|object| InteractionCommand::CompleteSelectionTap { object, tap: *tap })
                    .collect();
                if route.placement {
                    commands.push(InteractionCommand::CompletePlacementTap { tap: *tap });
                }
                commands
            }
        }
    }

    fn evaluate_tap(
        state: &InteractionState,
        placement: &PlacementController,
        tap: &TapGesture,
    ) -> TapRoute {
        TapRoute {
            selection: state
                .interactables
                .values()
                .filter(|i| i.selection.can_select(tap))
                .map(|i| i.selection.object())
                .collect(),
            placement: placement.can_start_placement(tap),
        }
    }

    fn route_drag(&mut self, state: &InteractionState, drag: &DragGesture) -> Vec<InteractionCommand> {
        match drag.phase {
            DragPhase::Start => {
                if self.drags.contains_key(&drag.id) {
                    log::debug!("Drag {:?} bereits aktiv, Start ignoriert", drag.id);
                    return Vec::new();
                }

                let accepted: Vec<ObjectRef> = state
                    .interactables
                    .values()
                    .filter(|i| {
                        i.elevation
                            .can_start_manipulation(drag, &i.selection, &state.scene)
                    })
                    .map(|i| i.elevation.object())
                    .collect();
                if accepted.is_empty() {
                    return Vec::new();
                }

                let commands = accepted
                    .iter()
                    .map(|&object| InteractionCommand::BeginElevation {
                        object,
                        gesture: *drag,
                    })
                    .collect();
                self.drags.insert(drag.id, accepted);
                commands
            }
            DragPhase::Continue => self
                .drags
                .get(&drag.id)
                .map(|objects| {
                    objects
                        .iter()
                        .map(|&object| InteractionCommand::ContinueElevation {
                            object,
                            gesture: *drag,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            DragPhase::End => self
                .drags
                .remove(&drag.id)
                .map(|objects| {
                    objects
                        .into_iter()
                        .map(|object| InteractionCommand::EndElevation {
                            object,
                            gesture: *drag,
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
