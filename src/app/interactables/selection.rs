//! Selektions-Controller: Tap-Toggle und Selektions-Indikator eines Wrappers.

use glam::Vec3;

use crate::core::{InteractorKind, ObjectRef, SceneGraph, TapGesture};

/// Verwaltet das `selected`-Flag eines Interaktions-Wrappers.
///
/// Das Flag gehört ausschließlich diesem Controller. Der optionale
/// Indikator-Knoten wird im Gleichschritt mit dem Flag (de)aktiviert.
#[derive(Debug, Clone)]
pub struct SelectionController {
    object: ObjectRef,
    selected: bool,
    scaled_elevation: f32,
    visualization: Option<ObjectRef>,
}

impl SelectionController {
    /// Erstellt einen unselektierten Controller für `object`.
    pub fn new(object: ObjectRef, visualization: Option<ObjectRef>) -> Self {
        Self {
            object,
            selected: false,
            scaled_elevation: 0.0,
            visualization,
        }
    }

    /// Wrapper, zu dem dieser Controller gehört.
    pub fn object(&self) -> ObjectRef {
        self.object
    }

    /// Aktueller Selektionszustand.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Knoten des Selektions-Indikators.
    pub fn visualization(&self) -> Option<ObjectRef> {
        self.visualization
    }

    /// Zuletzt gemeldete, mit der Y-Skalierung multiplizierte Elevation.
    pub fn scaled_elevation(&self) -> f32 {
        self.scaled_elevation
    }

    /// Jeder Tap darf die Selektion beeinflussen; entschieden wird erst beim Abschluss.
    pub fn can_select(&self, _tap: &TapGesture) -> bool {
        true
    }

    /// Abschluss eines Taps: Toggle bei Treffer, sonst Deselektion.
    pub fn on_gesture_complete(&mut self, tap: &TapGesture, scene: &mut SceneGraph) {
        if tap.was_cancelled {
            return;
        }

        let selected = if tap.target == Some(self.object) {
            !self.selected
        } else {
            false
        };
        self.set_selected(selected, scene);
    }

    fn set_selected(&mut self, selected: bool, scene: &mut SceneGraph) {
        if self.selected != selected {
            log::debug!(
                "{} {}",
                self.object,
                if selected { "selektiert" } else { "deselektiert" }
            );
        }
        self.selected = selected;
        if let Some(visualization) = self.visualization {
            scene.set_active(visualization, selected);
        }
    }

    /// Selektiert nur gegenüber dem Gesten-Interaktor.
    pub fn is_selectable_by(&self, interactor: InteractorKind) -> bool {
        interactor == InteractorKind::Gesture && self.selected
    }

    /// Hält den Indikator auf Ebenenhöhe: `local_y = -scaled_elevation / scale.y`.
    pub fn on_elevation_changed_scaled(&mut self, scaled_elevation: f32, scene: &mut SceneGraph) {
        self.scaled_elevation = scaled_elevation;
        let Some(visualization) = self.visualization else {
            return;
        };
        let Some(scale_y) = scene.get(self.object).map(|n| n.local.scale.y) else {
            return;
        };
        scene.set_local_position(
            visualization,
            Vec3::new(0.0, -scaled_elevation / scale_y, 0.0),
        );
    }

    /// Wie `on_elevation_changed_scaled`, aber mit unskalierter Elevation.
    pub fn on_elevation_changed(&mut self, elevation: f32, scene: &mut SceneGraph) {
        let Some(scale_y) = scene.get(self.object).map(|n| n.local.scale.y) else {
            return;
        };
        self.scaled_elevation = elevation * scale_y;
        if let Some(visualization) = self.visualization {
            scene.set_local_position(visualization, Vec3::new(0.0, -elevation, 0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GestureId, LocalTransform, NodeKind, Pose};
    use glam::Vec2;

    fn setup() -> (SceneGraph, SelectionController) {
        let mut scene = SceneGraph::new();
        let wrapper = scene.spawn(
            NodeKind::InteractionWrapper {
                prefab: "interactable".into(),
            },
            Pose::IDENTITY,
        );
        let indicator = scene
            .spawn_child(
                NodeKind::SelectionIndicator,
                wrapper,
                LocalTransform::IDENTITY,
            )
            .expect("Wrapper vorhanden");
        scene.set_active(indicator, false);
        (scene, SelectionController::new(wrapper, Some(indicator)))
    }

    fn tap_on(target: Option<ObjectRef>) -> TapGesture {
        TapGesture::started(GestureId(1), Vec2::new(10.0, 10.0))
            .with_target(target)
            .ended()
    }

    #[test]
    fn tap_on_self_toggles_and_drives_indicator() {
        let (mut scene, mut selection) = setup();
        let me = selection.object();
        let indicator = selection.visualization().expect("Indikator vorhanden");

        selection.on_gesture_complete(&tap_on(Some(me)), &mut scene);
        assert!(selection.is_selected());
        assert!(scene.get(indicator).expect("Indikator").active);

        selection.on_gesture_complete(&tap_on(Some(me)), &mut scene);
        assert!(!selection.is_selected());
        assert!(!scene.get(indicator).expect("Indikator").active);
    }

    #[test]
    fn tap_elsewhere_always_deselects() {
        let (mut scene, mut selection) = setup();
        let me = selection.object();

        selection.on_gesture_complete(&tap_on(Some(me)), &mut scene);
        selection.on_gesture_complete(&tap_on(Some(ObjectRef(999))), &mut scene);
        assert!(!selection.is_selected());

        selection.on_gesture_complete(&tap_on(None), &mut scene);
        assert!(!selection.is_selected());
    }

    #[test]
    fn cancelled_tap_changes_nothing() {
        let (mut scene, mut selection) = setup();
        let me = selection.object();

        selection.on_gesture_complete(&tap_on(Some(me)), &mut scene);
        selection.on_gesture_complete(&tap_on(None).cancelled(), &mut scene);
        assert!(selection.is_selected());
    }

    #[test]
    fn only_gesture_interactor_sees_selection() {
        let (mut scene, mut selection) = setup();
        let me = selection.object();
        selection.on_gesture_complete(&tap_on(Some(me)), &mut scene);

        assert!(selection.is_selectable_by(InteractorKind::Gesture));
        assert!(!selection.is_selectable_by(InteractorKind::Ray));
        assert!(!selection.is_selectable_by(InteractorKind::Direct));
    }

    #[test]
    fn scaled_elevation_pins_indicator_to_plane() {
        let (mut scene, mut selection) = setup();
        let me = selection.object();
        let indicator = selection.visualization().expect("Indikator vorhanden");
        scene.get_mut(me).expect("Wrapper").local.scale = Vec3::new(1.0, 2.5, 1.0);

        selection.on_elevation_changed_scaled(0.75, &mut scene);

        let local_y = scene.get(indicator).expect("Indikator").local.translation.y;
        assert_eq!(local_y, -0.75 / 2.5);
        assert_eq!(selection.scaled_elevation(), 0.75);
    }

    #[test]
    fn unscaled_elevation_stores_scaled_value() {
        let (mut scene, mut selection) = setup();
        let me = selection.object();
        let indicator = selection.visualization().expect("Indikator vorhanden");
        scene.get_mut(me).expect("Wrapper").local.scale = Vec3::new(1.0, 2.0, 1.0);

        selection.on_elevation_changed(0.5, &mut scene);

        assert_eq!(selection.scaled_elevation(), 1.0);
        let local_y = scene.get(indicator).expect("Indikator").local.translation.y;
        assert_eq!(local_y, -0.5);
    }

    #[test]
    fn missing_indicator_is_a_no_op() {
        let mut scene = SceneGraph::new();
        let wrapper = scene.spawn(
            NodeKind::InteractionWrapper {
                prefab: "interactable".into(),
            },
            Pose::IDENTITY,
        );
        let mut selection = SelectionController::new(wrapper, None);

        selection.on_gesture_complete(&tap_on(Some(wrapper)), &mut scene);
        selection.on_elevation_changed_scaled(1.0, &mut scene);

        assert!(selection.is_selected());
        assert_eq!(selection.scaled_elevation(), 1.0);
    }
}
