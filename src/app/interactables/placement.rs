//! Platzierungs-Controller: Tap ins Leere → Raycast → Modell + Wrapper + Anker.

use glam::Vec3;

use crate::core::{
    AnchorHandle, AnchorStore, Hit, NodeKind, ObjectRef, PlaneFilter, Pose, SceneGraph,
    SurfaceQuery, TapGesture, ViewContext,
};
use crate::shared::{InteractionOptions, BACK_FACE_DOT_THRESHOLD};

/// Grund, aus dem ein Tap nicht zu einer Platzierung geführt hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRejection {
    /// Geste wurde abgebrochen
    Cancelled,
    /// Tap hat während seiner Laufzeit ein Objekt getroffen
    TargetAcquired,
    /// Raycast ohne Treffer
    NoSurfaceHit,
    /// Treffer auf der Rückseite der Ebene
    BackFace,
}

/// Ergebnis einer erfolgreichen Platzierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedObject {
    /// Interaktions-Wrapper (Eltern des Modells)
    pub wrapper: ObjectRef,
    /// Sichtbares Modell
    pub model: ObjectRef,
    /// Angelegter Anker (None im unverankerten Modus)
    pub anchor: Option<AnchorHandle>,
    /// Transform-Knoten des Ankers
    pub anchor_node: Option<ObjectRef>,
    /// Treffer-Pose der Platzierung
    pub pose: Pose,
}

/// Ergebnis eines abgeschlossenen Platzierungs-Taps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementOutcome {
    /// Objekt wurde gespawnt
    Placed(PlacedObject),
    /// Nichts passiert
    Rejected(PlacementRejection),
}

/// Prüft, ob die Kamera auf der Vorderseite der getroffenen Ebene steht.
pub fn faces_camera(camera_position: Vec3, hit: &Hit) -> bool {
    let to_camera = camera_position - hit.pose.position;
    to_camera.dot(hit.pose.rotation * Vec3::Y) >= BACK_FACE_DOT_THRESHOLD
}

/// Spawnt neue Objekte auf erkannten Ebenen.
#[derive(Debug, Clone)]
pub struct PlacementController {
    visual_model_prefab: String,
    interaction_wrapper_prefab: String,
}

impl PlacementController {
    /// Erstellt einen Controller mit den gegebenen Prefab-Namen.
    pub fn new(
        visual_model_prefab: impl Into<String>,
        interaction_wrapper_prefab: impl Into<String>,
    ) -> Self {
        Self {
            visual_model_prefab: visual_model_prefab.into(),
            interaction_wrapper_prefab: interaction_wrapper_prefab.into(),
        }
    }

    /// Übernimmt die Prefab-Namen aus den Optionen.
    pub fn from_options(options: &InteractionOptions) -> Self {
        Self::new(
            options.visual_model_prefab.clone(),
            options.interaction_wrapper_prefab.clone(),
        )
    }

    /// Nur Taps ins Leere starten eine Platzierung.
    pub fn can_start_placement(&self, tap: &TapGesture) -> bool {
        tap.target.is_none()
    }

    /// Abschluss eines Taps: Raycast an der Start-Position und ggf. Spawn.
    pub fn on_gesture_complete(
        &self,
        tap: &TapGesture,
        view: &ViewContext,
        surface: &dyn SurfaceQuery,
        anchors: Option<&mut dyn AnchorStore>,
        scene: &mut SceneGraph,
    ) -> PlacementOutcome {
        if tap.was_cancelled {
            return PlacementOutcome::Rejected(PlacementRejection::Cancelled);
        }

        if tap.target.is_some() {
            return PlacementOutcome::Rejected(PlacementRejection::TargetAcquired);
        }

        let hits = surface.raycast(tap.start_position, PlaneFilter::AllPlanes);
        let Some(hit) = hits.first() else {
            log::debug!("Platzierung: kein Ebenen-Treffer bei {}", tap.start_position);
            return PlacementOutcome::Rejected(PlacementRejection::NoSurfaceHit);
        };

        if !faces_camera(view.camera.position, hit) {
            log::debug!("Platzierung: Treffer auf Ebenen-Rückseite verworfen");
            return PlacementOutcome::Rejected(PlacementRejection::BackFace);
        }

        let pose = hit.pose;
        let model = scene.spawn(
            NodeKind::VisualModel {
                prefab: self.visual_model_prefab.clone(),
            },
            pose,
        );
        let wrapper = scene.spawn(
            NodeKind::InteractionWrapper {
                prefab: self.interaction_wrapper_prefab.clone(),
            },
            pose,
        );
        scene.set_parent(model, Some(wrapper));

        let (anchor, anchor_node) = match anchors {
            Some(store) => match store.create_anchor(pose) {
                Some(handle) => {
                    let node = scene.spawn(NodeKind::Anchor(handle), pose);
                    scene.set_parent(wrapper, Some(node));
                    (Some(handle), Some(node))
                }
                None => {
                    log::warn!("Anker konnte nicht angelegt werden, {} bleibt unverankert", wrapper);
                    (None, None)
                }
            },
            None => {
                log::warn!("Kein Anker-Store verfügbar, {} bleibt unverankert", wrapper);
                (None, None)
            }
        };

        log::info!(
            "Objekt platziert: Modell {} unter Wrapper {} bei {}",
            model,
            wrapper,
            pose.position
        );

        PlacementOutcome::Placed(PlacedObject {
            wrapper,
            model,
            anchor,
            anchor_node,
            pose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GestureId, Pose};
    use crate::sim::InMemoryAnchorStore;
    use glam::{Quat, Vec2};

    struct FixedHits(Vec<Hit>);

    impl SurfaceQuery for FixedHits {
        fn raycast(&self, _screen_point: Vec2, _filter: PlaneFilter) -> Vec<Hit> {
            self.0.clone()
        }
    }

    fn floor_hit() -> Hit {
        Hit::from_pose(Pose::from_position(Vec3::new(0.0, 0.0, 2.0)), 2.5)
    }

    fn view() -> ViewContext {
        ViewContext::new(Pose::from_position(Vec3::new(0.0, 1.5, 0.0)), 160.0)
    }

    fn empty_tap() -> TapGesture {
        TapGesture::started(GestureId(1), Vec2::new(500.0, 900.0)).ended()
    }

    fn controller() -> PlacementController {
        PlacementController::new("model", "wrapper")
    }

    #[test]
    fn tap_with_target_cannot_start() {
        let tap = empty_tap().with_target(Some(ObjectRef(3)));
        assert!(!controller().can_start_placement(&tap));
        assert!(controller().can_start_placement(&empty_tap()));
    }

    #[test]
    fn places_anchored_chain() {
        let mut scene = SceneGraph::new();
        let mut store = InMemoryAnchorStore::new();
        let outcome = controller().on_gesture_complete(
            &empty_tap(),
            &view(),
            &FixedHits(vec![floor_hit()]),
            Some(&mut store),
            &mut scene,
        );

        let PlacementOutcome::Placed(placed) = outcome else {
            panic!("Platzierung erwartet, erhalten: {outcome:?}");
        };
        assert_eq!(scene.parent_of(placed.model), Some(placed.wrapper));
        assert_eq!(scene.parent_of(placed.wrapper), placed.anchor_node);
        assert!(placed.anchor.is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn failing_store_leaves_wrapper_unanchored() {
        let mut scene = SceneGraph::new();
        let mut store = InMemoryAnchorStore::new();
        store.set_tracking_ready(false);

        let outcome = controller().on_gesture_complete(
            &empty_tap(),
            &view(),
            &FixedHits(vec![floor_hit()]),
            Some(&mut store),
            &mut scene,
        );

        let PlacementOutcome::Placed(placed) = outcome else {
            panic!("Platzierung erwartet, erhalten: {outcome:?}");
        };
        assert_eq!(scene.parent_of(placed.model), Some(placed.wrapper));
        assert_eq!(scene.parent_of(placed.wrapper), None);
        assert!(placed.anchor.is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn back_face_hit_spawns_nothing() {
        let mut scene = SceneGraph::new();
        let mut store = InMemoryAnchorStore::new();
        // Ebene zeigt nach unten, Kamera steht darüber
        let hit = Hit::from_pose(
            Pose::new(Vec3::new(0.0, 0.0, 2.0), Quat::from_rotation_x(std::f32::consts::PI)),
            2.5,
        );

        let outcome = controller().on_gesture_complete(
            &empty_tap(),
            &view(),
            &FixedHits(vec![hit]),
            Some(&mut store),
            &mut scene,
        );

        assert_eq!(
            outcome,
            PlacementOutcome::Rejected(PlacementRejection::BackFace)
        );
        assert!(scene.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn empty_raycast_and_cancel_and_target_are_rejected() {
        let mut scene = SceneGraph::new();
        let c = controller();

        let no_hit = c.on_gesture_complete(&empty_tap(), &view(), &FixedHits(vec![]), None, &mut scene);
        assert_eq!(
            no_hit,
            PlacementOutcome::Rejected(PlacementRejection::NoSurfaceHit)
        );

        let cancelled = c.on_gesture_complete(
            &empty_tap().cancelled(),
            &view(),
            &FixedHits(vec![floor_hit()]),
            None,
            &mut scene,
        );
        assert_eq!(
            cancelled,
            PlacementOutcome::Rejected(PlacementRejection::Cancelled)
        );

        let targeted = c.on_gesture_complete(
            &empty_tap().with_target(Some(ObjectRef(9))),
            &view(),
            &FixedHits(vec![floor_hit()]),
            None,
            &mut scene,
        );
        assert_eq!(
            targeted,
            PlacementOutcome::Rejected(PlacementRejection::TargetAcquired)
        );
        assert!(scene.is_empty());
    }

    #[test]
    fn uses_nearest_hit() {
        let mut scene = SceneGraph::new();
        let near = floor_hit();
        let far = Hit::from_pose(Pose::from_position(Vec3::new(0.0, 0.0, 5.0)), 5.2);

        let outcome = controller().on_gesture_complete(
            &empty_tap(),
            &view(),
            &FixedHits(vec![near, far]),
            None,
            &mut scene,
        );

        let PlacementOutcome::Placed(placed) = outcome else {
            panic!("Platzierung erwartet, erhalten: {outcome:?}");
        };
        assert_eq!(placed.pose, near.pose);
    }

    #[test]
    fn grazing_hit_on_threshold_is_accepted() {
        let hit = Hit::from_pose(Pose::from_position(Vec3::new(0.0, 1.5, 2.0)), 2.0);
        assert!(faces_camera(Vec3::new(0.0, 1.5, 0.0), &hit));
    }
}
