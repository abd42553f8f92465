//! Aufgezeichnete Gesten-Skripte (JSON) und eine darauf basierende Event-Quelle.

use std::collections::VecDeque;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{
    DragGesture, GestureEvent, GestureEventSource, GestureId, ObjectRef, Pose, TapGesture,
};

/// Ein Tick eines Skripts: optionale Kamera-Pose und alle Events dieses Ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptTick {
    /// Neue Kamera-Pose (None = letzte beibehalten)
    #[serde(default)]
    pub camera: Option<Pose>,
    /// Events in Zustellreihenfolge
    #[serde(default)]
    pub events: Vec<GestureEvent>,
}

/// Ein vollständiges Gesten-Skript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureScript {
    /// Kamera-Pose vor dem ersten Tick
    pub initial_camera: Pose,
    /// Ticks in Abspielreihenfolge
    pub ticks: Vec<ScriptTick>,
}

impl GestureScript {
    /// Lädt ein Skript aus einer JSON-Datei.
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let script = serde_json::from_str(&content)?;
        log::info!("Gesten-Skript geladen aus: {}", path.display());
        Ok(script)
    }

    /// Serialisiert das Skript als JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Eingebautes Demo-Skript: Platzieren, Selektieren, Anheben.
    ///
    /// Die Kamera steht 1.5 m über dem Boden, 2 m vor dem Ursprung und blickt
    /// auf ihn. Der Wrapper der ersten Platzierung erhält die ID 2
    /// (Modell = 1, Wrapper = 2, Anker = 3).
    pub fn builtin(viewport: Vec2) -> Self {
        let camera_position = Vec3::new(0.0, 1.5, -2.0);
        let forward = (Vec3::ZERO - camera_position).normalize();
        let initial_camera = Pose::new(camera_position, Quat::from_rotation_arc(Vec3::Z, forward));
        let center = viewport * 0.5;
        let wrapper = ObjectRef(2);

        let place = TapGesture::started(GestureId(1), center);
        let select = TapGesture::started(GestureId(2), center).with_target(Some(wrapper));
        let lift = DragGesture::start(GestureId(3), center);

        let tick = |events: Vec<GestureEvent>| ScriptTick {
            camera: None,
            events,
        };

        Self {
            initial_camera,
            ticks: vec![
                tick(vec![GestureEvent::Tap(place)]),
                tick(vec![GestureEvent::Tap(place.ended())]),
                tick(vec![GestureEvent::Tap(select)]),
                tick(vec![GestureEvent::Tap(select.ended())]),
                tick(vec![GestureEvent::TwoFingerDrag(lift)]),
                tick(vec![GestureEvent::TwoFingerDrag(
                    lift.continued(Vec2::new(0.0, 120.0)),
                )]),
                tick(vec![GestureEvent::TwoFingerDrag(
                    lift.continued(Vec2::new(0.0, 80.0)),
                )]),
                tick(vec![GestureEvent::TwoFingerDrag(lift.ended(false))]),
            ],
        }
    }
}

/// Event-Quelle, die pro `poll` die Events eines Ticks liefert.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGestureSource {
    ticks: VecDeque<Vec<GestureEvent>>,
}

impl ScriptedGestureSource {
    /// Erstellt eine Quelle aus vorbereiteten Ticks.
    pub fn new(ticks: impl IntoIterator<Item = Vec<GestureEvent>>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }

    /// Übernimmt die Events eines Skripts (Kamera-Posen werden ignoriert).
    pub fn from_script(script: &GestureScript) -> Self {
        Self::new(script.ticks.iter().map(|t| t.events.clone()))
    }

    /// Anzahl verbleibender Ticks.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl GestureEventSource for ScriptedGestureSource {
    fn poll(&mut self) -> Vec<GestureEvent> {
        self.ticks.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_script_survives_json() {
        let script = GestureScript::builtin(Vec2::new(1080.0, 1920.0));
        let json = script.to_json().expect("Serialisierung");
        let parsed: GestureScript = serde_json::from_str(&json).expect("Deserialisierung");
        assert_eq!(parsed.ticks.len(), script.ticks.len());
        assert_eq!(parsed.ticks[2].events, script.ticks[2].events);
    }

    #[test]
    fn hand_written_tap_event_parses_with_defaults() {
        let json = r#"{
            "type": "Tap",
            "id": 5,
            "phase": "Ended",
            "start_position": [10.0, 20.0],
            "position": [11.0, 21.0]
        }"#;
        let event: GestureEvent = serde_json::from_str(json).expect("Event parsebar");
        let GestureEvent::Tap(tap) = event else {
            panic!("Tap erwartet");
        };
        assert_eq!(tap.id, GestureId(5));
        assert!(tap.target.is_none());
        assert!(!tap.was_cancelled);
    }

    #[test]
    fn source_drains_ticks_then_returns_empty() {
        let mut source = ScriptedGestureSource::from_script(&GestureScript::builtin(Vec2::new(
            100.0, 100.0,
        )));
        let total = source.remaining();
        for _ in 0..total {
            assert_eq!(source.poll().len(), 1);
        }
        assert!(source.poll().is_empty());
    }
}
