//! Camera-driven quadtree over the ground plane
//!
//! Rebuilt from scratch for every camera query: a node splits while the
//! camera is closer to its center than its side length, down to the
//! minimum node size. Leaves are the chunk footprints for the frame.

use crate::core::types::Vec2;
use crate::math::Rect;

/// A square node; either a leaf or exactly four equal children
#[derive(Clone, Debug)]
pub struct QuadNode {
    pub bounds: Rect,
    pub children: Option<Box<[QuadNode; 4]>>,
}

impl QuadNode {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds, children: None }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Side length
    pub fn size(&self) -> f32 {
        self.bounds.size().x
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    fn subdivide(&mut self, camera: Vec2, min_size: f32) {
        let size = self.size();
        if self.center().distance(camera) >= size || size <= min_size {
            return;
        }
        let mut children = Box::new([0u8, 1, 2, 3].map(|i| QuadNode::new(self.bounds.child_quadrant(i))));
        // Corners past f32 precision can no longer be halved
        if children.iter().any(|c| c.size() >= size) {
            return;
        }
        for child in children.iter_mut() {
            child.subdivide(camera, min_size);
        }
        self.children = Some(children);
    }

    fn collect_leaves(&self, out: &mut Vec<Rect>) {
        match &self.children {
            None => out.push(self.bounds),
            Some(children) => children.iter().for_each(|c| c.collect_leaves(out)),
        }
    }
}

/// Quadtree over a fixed square world
#[derive(Clone, Debug)]
pub struct QuadTree {
    root: QuadNode,
    min_node_size: f32,
}

impl QuadTree {
    pub fn new(bounds: Rect, min_node_size: f32) -> Self {
        Self { root: QuadNode::new(bounds), min_node_size }
    }

    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    pub fn min_node_size(&self) -> f32 {
        self.min_node_size
    }

    /// Rebuild the tree for a camera at `camera` (world x, z)
    pub fn insert(&mut self, camera: Vec2) {
        self.root.children = None;
        self.root.subdivide(camera, self.min_node_size);
    }

    /// All leaf footprints, depth first in child order
    pub fn leaves(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut out);
        out
    }
}
