//! The maze tree: node kinds, per-node bookkeeping and the arena that owns
//! every node.
//!
//! Ownership is strictly hierarchical (a node belongs to its parent's
//! `children`). The lateral connector-to-cell edges created during growth are
//! stored as [`NodeId`] handles in [`NodeProperties::target_link`], so they never
//! own anything.

use crate::collision::{AABB, OrientedBox, boxes_overlap};
use crate::math::{Mat4, Quat, Transform, Vec3};

/// Every kind of node a maze can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The first cell, grown from the origin.
    Root,
    Room,
    /// Long and narrow cell.
    Corridor,
    /// Large square cell.
    Challenge,
    /// Regular polygon cell with 3 to 8 sides.
    Round,
    /// Wall segment. Also what an unused connector turns into.
    Solid,
    /// Connector opening in a wall.
    Transparent,
    /// Floor slab under a cell.
    Base,
    /// Support slab between an elevated floor and the ground.
    Concrete,
    /// Bevel under a floor that replaces the support slab.
    Wedge,
    /// The maze root itself.
    Maze,
    None,
    Shadow,
}

impl NodeKind {
    /// Kinds the layout dispatcher can build as top-level cells.
    pub const GENERATABLE: [NodeKind; 5] = [
        NodeKind::Root,
        NodeKind::Room,
        NodeKind::Corridor,
        NodeKind::Challenge,
        NodeKind::Round,
    ];

    pub fn is_generatable(&self) -> bool {
        Self::GENERATABLE.contains(self)
    }
}

/// Handle into the [`Maze`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Growth bookkeeping carried by every node. Only connectors use it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProperties {
    /// The connector may still be used for an attachment.
    pub is_available: bool,
    /// How many placements were attempted through this connector.
    pub available_count: u32,
    /// The cell on the other side of this connector.
    pub target_link: Option<NodeId>,
}

impl Default for NodeProperties {
    fn default() -> Self {
        Self {
            is_available: true,
            available_count: 0,
            target_link: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MazeNode {
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
    /// Placement relative to `parent`.
    pub transform: Transform,
    /// Size of the node's own volume in its local frame. Sub-parts keep their
    /// size in `transform.scale` and use `(1, 1, 1)` here; cells keep unit scale
    /// and store their footprint here.
    pub extent: Vec3,
    pub children: Vec<NodeId>,
    pub properties: NodeProperties,
}

/// Arena-backed maze tree. Node 0 is the maze root.
#[derive(Debug, Clone)]
pub struct Maze {
    nodes: Vec<MazeNode>,
    volume_inset: f32,
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Maze {
    pub fn new() -> Self {
        Self::with_volume_inset(0.0)
    }

    /// A maze whose cell volumes are shrunk by `volume_inset` on each horizontal
    /// side, so that cells sharing a wall line do not touch.
    pub fn with_volume_inset(volume_inset: f32) -> Self {
        let root = MazeNode {
            parent: None,
            kind: NodeKind::Maze,
            transform: Transform::IDENTITY,
            extent: Vec3::ONE,
            children: Vec::new(),
            properties: NodeProperties::default(),
        };
        Self {
            nodes: vec![root],
            volume_inset,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &MazeNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut MazeNode {
        &mut self.nodes[id.0]
    }

    pub fn properties_mut(&mut self, id: NodeId) -> &mut NodeProperties {
        &mut self.nodes[id.0].properties
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn volume_inset(&self) -> f32 {
        self.volume_inset
    }

    /// Creates a node and appends it to `parent`'s children.
    pub fn create_node(&mut self, parent: NodeId, kind: NodeKind, transform: Transform) -> NodeId {
        let id = self.create_detached(parent, kind, transform, Vec3::ONE);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Creates a node that knows its parent but is not yet listed among the
    /// parent's children. Used for trial cells that may still be discarded.
    pub fn create_detached(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        transform: Transform,
        extent: Vec3,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MazeNode {
            parent: Some(parent),
            kind,
            transform,
            extent,
            children: Vec::new(),
            properties: NodeProperties::default(),
        });
        id
    }

    /// Lists a detached node among its parent's children.
    pub fn attach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent
            && !self.nodes[parent.0].children.contains(&child)
        {
            self.nodes[parent.0].children.push(child);
        }
    }

    /// Drops every node created after the arena had `len` nodes.
    ///
    /// Only valid while nothing older refers to the dropped nodes, which holds
    /// for a rejected trial cell: it is the newest subtree and was never linked.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len.max(1));
    }

    pub fn change_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.0].kind = kind;
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Top-level cells, i.e. the maze root's children.
    pub fn cells(&self) -> &[NodeId] {
        self.children(self.root())
    }

    /// `parent.world * node.model`, recomputed on every call.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = &self.nodes[id.0];
        let parent_world = match node.parent {
            Some(parent) => self.world_matrix(parent),
            None => Mat4::identity(),
        };
        parent_world.multiply(&node.transform.model())
    }

    /// World placement as a transform, composed from the root down.
    pub fn world_transform(&self, id: NodeId) -> Transform {
        let node = &self.nodes[id.0];
        match node.parent {
            Some(parent) => self.world_transform(parent).compose(&node.transform),
            None => node.transform,
        }
    }

    /// World-space collision box of a node.
    ///
    /// Cells stand on their origin: the box spans `extent` horizontally (minus
    /// the inset) and `extent.y` upwards. Sub-parts are boxes of their own scale.
    pub fn cell_box(&self, id: NodeId) -> OrientedBox {
        let node = &self.nodes[id.0];
        let world = self.world_transform(id);
        if !node.kind.is_generatable() {
            return OrientedBox::from(&world);
        }

        let inset = self.volume_inset * 2.0;
        let volume = Transform {
            position: Vec3::new(0.0, node.extent.y() * 0.5, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::new(
                (node.extent.x() - inset).max(0.0),
                node.extent.y(),
                (node.extent.z() - inset).max(0.0),
            ),
        };
        OrientedBox::from(&world.compose(&volume))
    }

    /// Every box the cell occupies, in world space.
    ///
    /// The first box is [`Maze::cell_box`]. A round cell's polygon is wider than
    /// that box, so each of its wall segments follows, shrunk by the inset on
    /// both horizontal axes. The wall ring closes the polygon and stays behind
    /// every side line.
    pub fn cell_volumes(&self, id: NodeId) -> Vec<OrientedBox> {
        let mut volumes = vec![self.cell_box(id)];
        if self.nodes[id.0].kind != NodeKind::Round {
            return volumes;
        }

        let inset = self.volume_inset * 2.0;
        for &child in self.children(id) {
            if !matches!(self.nodes[child.0].kind, NodeKind::Solid | NodeKind::Transparent) {
                continue;
            }
            let mut wall = self.world_transform(child);
            wall.scale = Vec3::new(
                (wall.scale.x() - inset).max(0.0),
                wall.scale.y(),
                (wall.scale.z() - inset).max(0.0),
            );
            volumes.push(OrientedBox::from(&wall));
        }
        volumes
    }

    /// `true` when any volume of `a` meets any volume of `b`.
    pub fn cells_overlap(&self, a: NodeId, b: NodeId) -> bool {
        let others = self.cell_volumes(b);
        self.cell_volumes(a)
            .iter()
            .any(|volume| others.iter().any(|other| boxes_overlap(volume, other)))
    }

    /// Connector children of a cell, whatever their availability.
    pub fn connectors(&self, cell: NodeId) -> Vec<NodeId> {
        self.children(cell)
            .iter()
            .copied()
            .filter(|&child| self.nodes[child.0].kind == NodeKind::Transparent)
            .collect()
    }

    /// Connector children that can still host an attachment.
    pub fn available_connectors(&self, cell: NodeId) -> Vec<NodeId> {
        self.children(cell)
            .iter()
            .copied()
            .filter(|&child| {
                let node = &self.nodes[child.0];
                node.kind == NodeKind::Transparent && node.properties.is_available
            })
            .collect()
    }

    /// Connectors anywhere under the top-level cells that lead nowhere.
    pub fn unlinked_connectors(&self) -> Vec<NodeId> {
        self.cells()
            .iter()
            .flat_map(|&cell| self.connectors(cell))
            .filter(|&connector| self.nodes[connector.0].properties.target_link.is_none())
            .collect()
    }

    /// Union of the bounds of every top-level cell.
    pub fn bounds(&self) -> Option<AABB> {
        self.cells()
            .iter()
            .flat_map(|&cell| self.cell_volumes(cell))
            .map(|volume| volume.bounds)
            .reduce(|mut acc, bounds| {
                acc.expand(&bounds);
                acc
            })
    }
}
