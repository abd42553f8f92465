//! Expliziter Szenengraph: Knoten mit Eltern-Referenz und lokaler Transformation.
//!
//! Der Graph ist die produzierte Schnittstelle zum Host: Spawn-, Reparent- und
//! Sichtbarkeits-Anfragen landen hier, der Host liest sie zum Rendern aus.
//! Objekte werden vom Interaktionskern nie gelöscht.

use std::fmt;

use glam::{Quat, Vec3};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::transform::{Frame, LocalTransform, Pose};
use super::AnchorHandle;

/// Referenz auf einen Knoten im Szenengraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef(pub u64);

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Art eines Szenenknotens.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Transform-Knoten eines getrackten Ankers
    Anchor(AnchorHandle),
    /// Interaktions-Wrapper (trägt Selektion und Elevation)
    InteractionWrapper {
        /// Prefab-Name
        prefab: String,
    },
    /// Sichtbares Modell
    VisualModel {
        /// Prefab-Name
        prefab: String,
    },
    /// Selektions-Indikator unter einem Wrapper
    SelectionIndicator,
}

/// Ein Knoten im Szenengraph.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Identität
    pub id: ObjectRef,
    /// Art des Knotens
    pub kind: NodeKind,
    /// Transformation relativ zum Eltern-Knoten (bzw. Welt ohne Eltern)
    pub local: LocalTransform,
    /// Eltern-Knoten (None = Wurzel im Welt-Raum)
    pub parent: Option<ObjectRef>,
    /// Aktivierungs-Flag (Sichtbarkeit)
    pub active: bool,
}

/// Szenengraph mit deterministischer Einfüge-Reihenfolge.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: IndexMap<ObjectRef, SceneNode>,
    next_id: u64,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Erstellt einen leeren Graph. IDs beginnen bei 1.
    pub fn new() -> Self {
        Self {
            nodes: IndexMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ObjectRef {
        let id = ObjectRef(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawnt einen Wurzel-Knoten an einer Welt-Pose.
    pub fn spawn(&mut self, kind: NodeKind, pose: Pose) -> ObjectRef {
        let id = self.allocate_id();
        self.nodes.insert(
            id,
            SceneNode {
                id,
                kind,
                local: LocalTransform::from_pose(pose),
                parent: None,
                active: true,
            },
        );
        id
    }

    /// Spawnt einen Kind-Knoten mit lokaler Transformation.
    ///
    /// Gibt `None` zurück, wenn der Eltern-Knoten nicht existiert.
    pub fn spawn_child(
        &mut self,
        kind: NodeKind,
        parent: ObjectRef,
        local: LocalTransform,
    ) -> Option<ObjectRef> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = self.allocate_id();
        self.nodes.insert(
            id,
            SceneNode {
                id,
                kind,
                local,
                parent: Some(parent),
                active: true,
            },
        );
        Some(id)
    }

    /// Gibt einen Knoten zurück.
    pub fn get(&self, id: ObjectRef) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Gibt einen Knoten mutable zurück.
    pub fn get_mut(&mut self, id: ObjectRef) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }

    /// Prüft, ob ein Knoten existiert.
    pub fn contains(&self, id: ObjectRef) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Anzahl aller Knoten.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt `true` zurück, wenn der Graph leer ist.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Alle Knoten in Einfüge-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    /// Anzahl der Knoten einer bestimmten Art.
    pub fn count_where(&self, pred: impl Fn(&NodeKind) -> bool) -> usize {
        self.nodes.values().filter(|n| pred(&n.kind)).count()
    }

    /// Eltern-Knoten eines Knotens.
    pub fn parent_of(&self, id: ObjectRef) -> Option<ObjectRef> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Direkte Kinder eines Knotens in Einfüge-Reihenfolge.
    pub fn children_of(&self, id: ObjectRef) -> Vec<ObjectRef> {
        self.nodes
            .values()
            .filter(|n| n.parent == Some(id))
            .map(|n| n.id)
            .collect()
    }

    /// Prüft, ob `ancestor` in der Eltern-Kette von `id` liegt (inklusive `id` selbst).
    fn is_ancestor_or_self(&self, ancestor: ObjectRef, id: ObjectRef) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.parent_of(node_id);
        }
        false
    }

    /// Welt-Frame eines Knotens (Komposition der Eltern-Kette).
    pub fn world_frame(&self, id: ObjectRef) -> Option<Frame> {
        let node = self.nodes.get(&id)?;
        let parent_frame = match node.parent {
            Some(parent) => self.world_frame(parent)?,
            None => Frame::IDENTITY,
        };
        Some(parent_frame.compose(&node.local))
    }

    /// Frame des Eltern-Knotens bzw. Welt-Frame für Wurzeln.
    pub fn parent_frame(&self, id: ObjectRef) -> Option<Frame> {
        let node = self.nodes.get(&id)?;
        match node.parent {
            Some(parent) => self.world_frame(parent),
            None => Some(Frame::IDENTITY),
        }
    }

    /// Welt-Position eines Knotens.
    pub fn world_position(&self, id: ObjectRef) -> Option<Vec3> {
        self.world_frame(id).map(|f| f.position)
    }

    /// Welt-Rotation eines Knotens.
    pub fn world_rotation(&self, id: ObjectRef) -> Option<Quat> {
        self.world_frame(id).map(|f| f.rotation)
    }

    /// Hängt einen Knoten um und erhält dabei seine Welt-Transformation.
    ///
    /// Gibt `false` zurück bei unbekannten Knoten oder wenn der neue Eltern-Knoten
    /// im eigenen Teilbaum liegt (Zyklus).
    pub fn set_parent(&mut self, child: ObjectRef, new_parent: Option<ObjectRef>) -> bool {
        let Some(child_world) = self.world_frame(child) else {
            return false;
        };
        let parent_world = match new_parent {
            Some(parent) => {
                if self.is_ancestor_or_self(child, parent) {
                    log::warn!("Reparent {} unter {} würde einen Zyklus bilden", child, parent);
                    return false;
                }
                let Some(frame) = self.world_frame(parent) else {
                    return false;
                };
                frame
            }
            None => Frame::IDENTITY,
        };

        let local = parent_world.relative_local(&child_world);
        let Some(node) = self.nodes.get_mut(&child) else {
            return false;
        };
        node.local = local;
        node.parent = new_parent;
        true
    }

    /// Setzt die lokale Position eines Knotens.
    pub fn set_local_position(&mut self, id: ObjectRef, position: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.translation = position;
        }
    }

    /// Setzt die Welt-Position eines Knotens (Rotation/Skalierung bleiben).
    pub fn set_world_position(&mut self, id: ObjectRef, position: Vec3) {
        let Some(parent) = self.parent_frame(id) else {
            return;
        };
        self.set_local_position(id, parent.inverse_transform_point(position));
    }

    /// Setzt Welt-Position und -Rotation eines Knotens (Skalierung bleibt).
    pub fn set_world_pose(&mut self, id: ObjectRef, pose: Pose) {
        let Some(parent) = self.parent_frame(id) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.translation = parent.inverse_transform_point(pose.position);
            node.local.rotation = parent.rotation.inverse() * pose.rotation;
        }
    }

    /// Verschiebt einen Knoten entlang seiner eigenen Achsen (ohne Skalierung).
    pub fn translate_self(&mut self, id: ObjectRef, local_offset: Vec3) {
        let Some(world) = self.world_frame(id) else {
            return;
        };
        let target = world.position + world.transform_direction(local_offset);
        self.set_world_position(id, target);
    }

    /// Setzt das Aktivierungs-Flag eines Knotens.
    pub fn set_active(&mut self, id: ObjectRef, active: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.active = active;
        }
    }
}
