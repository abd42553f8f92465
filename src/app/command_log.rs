//! Begrenztes Protokoll ausgeführter Interaktions-Commands.
//!
//! Dient Hosts und Tests zur Nachverfolgung, welcher Konsument welche
//! Gesten-Phase erhalten hat.

use super::InteractionCommand;
use crate::core::ObjectRef;

/// Ausgeführte Commands in Ausführungsreihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<InteractionCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Protokoll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Protokolliert einen ausgeführten Command.
    ///
    /// Bei `MAX_ENTRIES` wird die ältere Hälfte verworfen.
    pub fn record(&mut self, command: InteractionCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            log::debug!(
                "Command-Log voll, {} älteste Einträge verworfen",
                Self::MAX_ENTRIES / 2
            );
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        log::trace!("Command: {:?}", command);
        self.entries.push(command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alle protokollierten Commands.
    pub fn entries(&self) -> &[InteractionCommand] {
        &self.entries
    }

    /// Zuletzt ausgeführter Command.
    pub fn last(&self) -> Option<&InteractionCommand> {
        self.entries.last()
    }

    /// Commands, die an einen bestimmten Wrapper zugestellt wurden.
    pub fn for_object(&self, object: ObjectRef) -> impl Iterator<Item = &InteractionCommand> {
        self.entries
            .iter()
            .filter(move |command| command.object() == Some(object))
    }

    /// Anzahl zugestellter Platzierungs-Taps (inklusive verworfener Treffer).
    pub fn placement_attempts(&self) -> usize {
        self.entries
            .iter()
            .filter(|command| matches!(command, InteractionCommand::CompletePlacementTap { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DragGesture, GestureId, TapGesture};
    use glam::Vec2;

    fn placement_tap(n: u64) -> InteractionCommand {
        InteractionCommand::CompletePlacementTap {
            tap: TapGesture::started(GestureId(n), Vec2::ZERO).ended(),
        }
    }

    #[test]
    fn overflow_drops_oldest_half() {
        let mut log = CommandLog::new();
        for n in 0..1000 {
            log.record(placement_tap(n));
        }
        assert_eq!(log.len(), 1000);

        log.record(placement_tap(1000));
        assert_eq!(log.len(), 501);
        assert_eq!(log.entries()[0], placement_tap(500));
        assert_eq!(log.last(), Some(&placement_tap(1000)));
    }

    #[test]
    fn filters_by_object_and_counts_placements() {
        let mut log = CommandLog::new();
        let drag = DragGesture::start(GestureId(5), Vec2::ZERO);
        log.record(placement_tap(1));
        log.record(InteractionCommand::BeginElevation {
            object: ObjectRef(2),
            gesture: drag,
        });
        log.record(InteractionCommand::BeginElevation {
            object: ObjectRef(7),
            gesture: drag,
        });
        log.record(InteractionCommand::EndElevation {
            object: ObjectRef(2),
            gesture: drag.ended(false),
        });
        log.record(placement_tap(6));

        assert_eq!(log.for_object(ObjectRef(2)).count(), 2);
        assert_eq!(log.for_object(ObjectRef(9)).count(), 0);
        assert_eq!(log.placement_attempts(), 2);
    }
}
