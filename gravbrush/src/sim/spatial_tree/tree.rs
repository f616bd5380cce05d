use cgmath::Point2;

use crate::sim::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// x on even depths, y on odd ones.
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Axis::X } else { Axis::Y }
    }

    pub fn coord(self, p: &Point2<f64>) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

#[derive(Debug)]
pub struct KdNode {
    /// Index into the body slice the tree was built from.
    pub body: usize,
    pub depth: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl KdNode {
    pub fn axis(&self) -> Axis {
        Axis::at_depth(self.depth)
    }
}

/// Balanced 2-d tree over a body slice, stored in an arena.
///
/// The tree holds indices, not identities, so it is only meaningful for the exact slice it
/// was last built from. Every rebuild starts from an empty arena.
#[derive(Debug, Default)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    root: Option<NodeId>,
}

impl KdTree {
    pub fn new(bodies: &[Body]) -> Self {
        let mut tree = Self::default();
        tree.rebuild(bodies);
        tree
    }

    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.nodes.clear();
        self.nodes.reserve(bodies.len());
        let mut indices: Vec<usize> = (0..bodies.len()).collect();
        self.root = self.build_node(bodies, &mut indices, 0);
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &KdNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }

    /// Body indices in left, node, right order.
    pub fn in_order(&self) -> Vec<usize> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.get(id).left;
            }
            if let Some(id) = stack.pop() {
                let node = self.get(id);
                result.push(node.body);
                current = node.right;
            }
        }
        result
    }

    fn build_node(
        &mut self,
        bodies: &[Body],
        indices: &mut [usize],
        depth: usize,
    ) -> Option<NodeId> {
        if indices.is_empty() {
            return None;
        }

        let axis = Axis::at_depth(depth);
        let key = |i: usize| axis.coord(&bodies[i].pos);
        indices.sort_by(|&a, &b| key(a).total_cmp(&key(b)));
        // Lower median: with two elements the smaller one becomes the node and the larger one
        // its right child.
        let mid = (indices.len() - 1) / 2;

        let id = NodeId(self.nodes.len());
        self.nodes.push(KdNode {
            body: indices[mid],
            depth,
            left: None,
            right: None,
        });

        let (below, rest) = indices.split_at_mut(mid);
        let above = &mut rest[1..];
        let left = self.build_node(bodies, below, depth + 1);
        let right = self.build_node(bodies, above, depth + 1);

        let node = &mut self.nodes[id.0];
        node.left = left;
        node.right = right;
        Some(id)
    }
}
