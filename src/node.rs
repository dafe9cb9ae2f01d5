use tracing::trace;

use crate::entity::EntityId;
use crate::geometry::{Bound, Point, Quadrant};
use crate::list::List;

pub(crate) type NodeId = usize;

/// An entity handle as stored in a leaf, with its center cached for routing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Member {
    pub(crate) id: EntityId,
    pub(crate) center: Point,
}

/// A leaf holds members and no children; a branch holds exactly four
/// children (in [`Quadrant`] order) and no members.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) bound: Bound,
    pub(crate) members: Vec<Member>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) depth: u32,
}

impl Node {
    fn leaf(parent: Option<NodeId>, bound: Bound, depth: u32, capacity: usize) -> Self {
        Self {
            parent,
            bound,
            members: Vec::with_capacity(capacity),
            children: None,
            depth,
        }
    }

    pub(crate) fn is_branch(&self) -> bool {
        self.children.is_some()
    }
}

/// Arena of tree nodes. Parent and child links are indices into the arena.
#[derive(Clone, Debug)]
pub(crate) struct Nodes {
    list: List<Node>,
    root: NodeId,
    capacity: usize,
}

impl Nodes {
    pub(crate) fn new(bound: Bound, capacity: usize) -> Self {
        let mut list = List::new();
        let root = list.insert(Node::leaf(None, bound, 0, capacity));
        Self {
            list,
            root,
            capacity,
        }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.list[id]
    }

    /// Walks down from `start` to the leaf whose quadrant contains `point`.
    fn find_leaf(&self, start: NodeId, point: Point) -> NodeId {
        let mut id = start;
        while let Some(children) = self.list[id].children {
            let center = self.list[id].bound.center();
            id = children[Quadrant::containing(center, point).index()];
        }
        id
    }

    /// Places `member` in the leaf under `start` that its center routes to,
    /// splitting that leaf if it is full and still allowed to go deeper.
    pub(crate) fn insert(&mut self, start: NodeId, member: Member, max_depth: u32) {
        let leaf = self.find_leaf(start, member.center);
        let capacity = self.capacity;
        let node = &mut self.list[leaf];

        // Max depth wins over capacity.
        if node.members.len() + 1 > capacity && node.depth < max_depth {
            let mut members = std::mem::take(&mut node.members);
            members.push(member);
            self.split(leaf, members, max_depth);
        } else {
            node.members.push(member);
        }
    }

    fn split(&mut self, id: NodeId, members: Vec<Member>, max_depth: u32) {
        let (bound, depth) = {
            let node = &self.list[id];
            (node.bound, node.depth)
        };
        trace!(node = id, depth, members = members.len(), "splitting node");

        // Initialize 4 child nodes.
        let capacity = self.capacity;
        let list = &mut self.list;
        let children = Quadrant::ALL.map(|quadrant| {
            list.insert(Node::leaf(Some(id), bound.quadrant(quadrant), depth + 1, capacity))
        });
        self.list[id].children = Some(children);

        // Transfer the members of the former leaf to its new children.
        for member in members {
            let child = children[Quadrant::containing(bound.center(), member.center).index()];
            self.insert(child, member, max_depth);
        }
    }

    /// Removes the member with exactly this `id` from the leaf that `center`
    /// routes to, then gives that leaf's parent a chance to collapse.
    /// Returns false when the leaf does not hold it.
    pub(crate) fn remove(&mut self, id: EntityId, center: Point) -> bool {
        let leaf = self.find_leaf(self.root, center);
        let capacity = self.capacity;
        let node = &mut self.list[leaf];

        let Some(pos) = node.members.iter().position(|member| member.id == id) else {
            return false;
        };
        if node.members.len() == 1 {
            node.members = Vec::with_capacity(capacity);
        } else {
            node.members.remove(pos);
        }

        let parent = node.parent;
        if let Some(parent) = parent {
            self.collapse(parent);
        }
        true
    }

    /// Folds the four children of `id` back into it when together they hold
    /// fewer members than the node capacity. Only looks at this one level.
    fn collapse(&mut self, id: NodeId) {
        let Some(children) = self.list[id].children else {
            return;
        };
        // A branch child holds its members further down; merging would lose them.
        if children.iter().any(|&child| self.list[child].is_branch()) {
            return;
        }
        let count: usize = children.iter().map(|&child| self.list[child].members.len()).sum();
        if count >= self.capacity {
            return;
        }

        let mut merged = Vec::with_capacity(self.capacity);
        for &child in &children {
            merged.append(&mut self.list[child].members);
        }

        // Remove all 4 children in reverse order so that they are reclaimed
        // in quadrant order on the next split.
        for &child in children.iter().rev() {
            let _ = self.list.erase(child);
        }

        let node = &mut self.list[id];
        node.members = merged;
        node.children = None;
        trace!(node = id, depth = node.depth, members = count, "collapsed node");
    }

    /// Members of the leaf that `point` routes to. These are candidates only;
    /// they are not checked against `point` geometrically.
    pub(crate) fn retrieve(&self, point: Point) -> &[Member] {
        &self.list[self.find_leaf(self.root, point)].members
    }
}
