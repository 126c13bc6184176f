//! Search-tree nodes and the arena that owns them.
//!
//! Nodes never point at each other directly. Each node stores the [`NodeId`] of its
//! parent, and the [`NodeArena`] owning all nodes of one search resolves those ids
//! when a path is reconstructed. Dropping the arena frees the whole tree at once.

use crate::engine::Cell;

/// Index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A record in the search tree: the cell reached, how many steps it took, the
/// target cell, and where the search came from.
///
/// A node is immutable once created.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    cell: Cell,
    depth: usize,
    goal: Cell,
    parent: Option<NodeId>,
}

impl Node {
    /// Creates the root node of a search from `start` towards `goal`.
    ///
    /// # Examples
    /// ```
    /// use gridpath_solver::engine::{Cell, CellKind};
    /// use gridpath_solver::node::Node;
    /// let start = Cell::new(0, 0, CellKind::Start);
    /// let root = Node::root(start, Cell::new(0, 0, CellKind::Goal));
    /// assert!(root.is_goal());
    /// assert_eq!(root.depth(), 0);
    /// ```
    pub fn root(start: Cell, goal: Cell) -> Self {
        Node {
            cell: start,
            depth: 0,
            goal,
            parent: None,
        }
    }

    /// Creates a node reached from `parent` in one step.
    pub fn child(cell: Cell, parent_id: NodeId, parent: &Node) -> Self {
        Node {
            cell,
            depth: parent.depth + 1,
            goal: parent.goal,
            parent: Some(parent_id),
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Number of steps from the root to this node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if this node stands on the goal cell.
    pub fn is_goal(&self) -> bool {
        self.cell == self.goal
    }
}

/// Growable store of the nodes created during one search.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    /// Creates an arena with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Stores `node` and returns its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this arena.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks parent links from `id` back to the root and returns the cells in
    /// root-to-`id` order, both ends included.
    ///
    /// # Examples
    /// ```
    /// use gridpath_solver::engine::{Cell, CellKind};
    /// use gridpath_solver::node::{Node, NodeArena};
    ///
    /// let goal = Cell::new(0, 2, CellKind::Goal);
    /// let mut arena = NodeArena::new();
    /// let root = Node::root(Cell::new(0, 0, CellKind::Start), goal);
    /// let root_id = arena.push(root);
    /// let mid = Node::child(Cell::new(0, 1, CellKind::Free), root_id, &root);
    /// let mid_id = arena.push(mid);
    /// let end_id = arena.push(Node::child(goal, mid_id, &mid));
    ///
    /// let cols: Vec<usize> = arena.reconstruct_path(end_id).iter().map(|c| c.col()).collect();
    /// assert_eq!(cols, vec![0, 1, 2]);
    /// ```
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.get(id).depth + 1);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            cells.push(node.cell);
            current = node.parent;
        }
        cells.reverse();
        cells
    }
}
