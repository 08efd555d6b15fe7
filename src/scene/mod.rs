//! Minimal scene graph for UI views
//!
//! Holds the instantiated window views and their transforms, plus the
//! registry of named container slots windows attach under. The window
//! manager owns a `Scene` and mutates it from its entry points only;
//! nothing here is shared across threads.

use cgmath::{Vector2, Vector3};
use log::debug;
use std::collections::HashMap;

use crate::window::{ContainerSlot, WindowViewSpec};


/// Local transform of a view node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub local_position: Vector3<f32>,
    pub local_scale: Vector3<f32>,
    /// Stretch anchor offsets (bottom-left)
    pub offset_min: Vector2<f32>,
    /// Stretch anchor offsets (top-right)
    pub offset_max: Vector2<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            local_position: Vector3::new(0.0, 0.0, 0.0),
            local_scale: Vector3::new(1.0, 1.0, 1.0),
            offset_min: Vector2::new(0.0, 0.0),
            offset_max: Vector2::new(0.0, 0.0),
        }
    }
}

impl Transform {
    /// Reset position, scale, and stretch offsets to defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One instantiated visual object in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub id: u64,
    pub name: String,
    pub parent: Option<u64>,
    pub transform: Transform,
    /// Whether the view is drawn this frame
    pub active: bool,
    /// Draw ordering stamped by the layer service
    pub sort_order: i32,
    /// Window-view capability declared by the prefab, if any
    pub window_view: Option<WindowViewSpec>,
}

/// Scene graph: view nodes plus named container slots
pub struct Scene {
    nodes: HashMap<u64, ViewNode>,
    containers: HashMap<ContainerSlot, u64>,
    next_id: u64,
}

impl Scene {
    /// Create a scene with the current set of container slots registered
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: HashMap::new(),
            containers: HashMap::new(),
            next_id: 1,
        };
        scene.register_container(ContainerSlot::Center, "Container_Center");
        scene
    }

    /// Register a container slot backed by a fresh node
    pub fn register_container(&mut self, slot: ContainerSlot, name: &str) -> u64 {
        let id = self.spawn(name, None);
        self.containers.insert(slot, id);
        id
    }

    /// Resolve a container slot to its parent node
    pub fn container(&self, slot: ContainerSlot) -> Option<u64> {
        self.containers.get(&slot).copied()
    }

    /// Instantiate a view node with a default transform, inactive parent-less
    pub fn spawn(&mut self, name: &str, window_view: Option<WindowViewSpec>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.nodes.insert(
            id,
            ViewNode {
                id,
                name: name.to_string(),
                parent: None,
                transform: Transform::default(),
                active: true,
                sort_order: 0,
                window_view,
            },
        );

        debug!("Spawned view {} ({})", id, name);
        id
    }

    /// Release a view node; returns false for unknown ids
    pub fn despawn(&mut self, id: u64) -> bool {
        if let Some(node) = self.nodes.remove(&id) {
            debug!("Despawned view {} ({})", id, node.name);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: u64) -> Option<&ViewNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: u64) -> Option<&mut ViewNode> {
        self.nodes.get_mut(&id)
    }

    /// Attach a view under a parent node (`None` detaches to the scene root)
    pub fn set_parent(&mut self, id: u64, parent: Option<u64>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    pub fn set_active(&mut self, id: u64, active: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.active = active;
        }
    }

    /// Total node count, container nodes included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
