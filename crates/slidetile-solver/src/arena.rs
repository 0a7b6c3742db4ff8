//! Search nodes stored by index.

use std::cmp::Ordering;

use slidetile_core::BoardState;

/// Index of a node in a [`SearchArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

/// A board state reached during a search, with its costs and back-pointer.
#[derive(Debug, Clone)]
pub(crate) struct SearchNode {
    pub(crate) state: BoardState,
    pub(crate) g: usize,
    pub(crate) h: usize,
    pub(crate) parent: Option<NodeId>,
}

/// Owns every node created by one search. Parents are referenced by index.
#[derive(Debug, Default)]
pub(crate) struct SearchArena {
    nodes: Vec<SearchNode>,
}

impl SearchArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the states from the root to `id`.
    pub(crate) fn path_to(&self, id: NodeId) -> Vec<BoardState> {
        let mut path = Vec::with_capacity(self.get(id).g + 1);
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.get(id);
            path.push(node.state.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// How the frontier ranks nodes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FrontierOrder {
    /// `f = g + h`; the first goal dequeued is optimal.
    #[default]
    #[display("optimal")]
    Optimal,
    /// `f = h`; finds a path quickly without an optimality guarantee.
    #[display("greedy")]
    Greedy,
}

/// A frontier entry. Smaller entries are dequeued first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    f: usize,
    g: usize,
    id: NodeId,
}

impl FrontierEntry {
    pub(crate) fn new(order: FrontierOrder, node: &SearchNode, id: NodeId) -> Self {
        let f = match order {
            FrontierOrder::Optimal => node.g + node.h,
            FrontierOrder::Greedy => node.h,
        };
        Self { f, g: node.g, id }
    }

    pub(crate) fn id(self) -> NodeId {
        self.id
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal f: prefer the deeper node, then the older one.
        self.f
            .cmp(&other.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
