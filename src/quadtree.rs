use tracing::debug;

use crate::entity::{Entity, EntityId};
use crate::error::{QuadtreeError, Result};
use crate::geometry::{Bound, Point};
use crate::list::List;
use crate::node::{Member, Nodes};
use crate::QuadtreeVisitor;

/// Settings for a new [`QuadTree`].
///
/// The root bound spans `(0, 0)` to `(width, height)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Options {
    pub width: f64,
    pub height: f64,
    /// Entities a leaf holds before it splits, and the threshold below which
    /// four sibling leaves collapse back into their parent.
    pub max_entities: usize,
    /// Deepest level a split may create. The root is depth 0.
    pub max_depth: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            max_entities: 10,
            max_depth: 2,
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_max_entities(mut self, max_entities: usize) -> Self {
        self.max_entities = max_entities;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Region quadtree over axis-aligned rectangles.
///
/// Each entity lives in exactly one leaf, the one its center routes to.
/// Queries route their representative point (a point, or a bound's center)
/// the same way and only look at that leaf, so an entity that extends
/// into a neighbouring leaf is not reported for queries landing there.
#[derive(Debug)]
pub struct QuadTree<T = ()> {
    nodes: Nodes,
    entities: List<Entity<T>>,
    max_depth: u32,
}

impl<T> Default for QuadTree<T> {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl<T> QuadTree<T> {
    /// # Panics
    ///
    /// Panics if `width` or `height` is negative or NaN.
    pub fn new(options: Options) -> Self {
        let bound = Bound::new(0.0, 0.0, options.width, options.height);
        debug!(
            width = options.width,
            height = options.height,
            max_entities = options.max_entities,
            max_depth = options.max_depth,
            "creating quadtree"
        );
        Self {
            nodes: Nodes::new(bound, options.max_entities),
            entities: List::new(),
            max_depth: options.max_depth,
        }
    }

    /// A tree of the given size with default limits.
    ///
    /// # Panics
    ///
    /// Same as [`QuadTree::new`].
    pub fn with_bounds(width: f64, height: f64) -> Self {
        Self::new(Options::default().with_bounds(width, height))
    }

    pub fn bound(&self) -> Bound {
        self.nodes.get(self.nodes.root()).bound
    }

    pub fn max_entities(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn len(&self) -> usize {
        self.entities.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity<T>> {
        self.entities.get(id.index, id.generation)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity<T>> {
        self.entities.get_mut(id.index, id.generation)
    }

    /// Inserts a new entity covering `bound` that carries `objects`.
    pub fn insert(&mut self, bound: Bound, objects: Vec<T>) -> EntityId {
        self.insert_entity(Entity::new(bound, objects))
    }

    /// Inserts a new entity covering `bound` with a caller-invoked action.
    pub fn insert_with_action<F>(&mut self, bound: Bound, action: F) -> EntityId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.insert_entity(Entity::with_action(bound, action))
    }

    pub fn insert_entity(&mut self, entity: Entity<T>) -> EntityId {
        let center = entity.center();
        let index = self.entities.insert(entity);
        let id = EntityId {
            index,
            generation: self.entities.generation(index),
        };
        let root = self.nodes.root();
        self.nodes.insert(root, Member { id, center }, self.max_depth);
        id
    }

    /// Inserts every entity, returning their ids in input order.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::InvalidArgument`] if `entities` is empty.
    pub fn insert_entities<I>(&mut self, entities: I) -> Result<Vec<EntityId>>
    where
        I: IntoIterator<Item = Entity<T>>,
    {
        let mut entities = entities.into_iter().peekable();
        if entities.peek().is_none() {
            return Err(QuadtreeError::InvalidArgument("no entities given to insert_entities"));
        }
        Ok(entities.map(|entity| self.insert_entity(entity)).collect())
    }

    /// Takes the entity out of the tree and hands it back.
    ///
    /// # Errors
    ///
    /// [`QuadtreeError::NotFound`] if `id` is not in the tree. Nothing is
    /// changed in that case.
    pub fn remove(&mut self, id: EntityId) -> Result<Entity<T>> {
        let Some(center) = self.get(id).map(Entity::center) else {
            debug!(%id, "entity to remove is not in the tree");
            return Err(QuadtreeError::NotFound(id));
        };
        if !self.nodes.remove(id, center) {
            debug!(%id, "entity to remove is missing from its leaf");
            return Err(QuadtreeError::NotFound(id));
        }
        self.entities.erase(id.index).ok_or(QuadtreeError::NotFound(id))
    }

    /// Ids of the entities sharing a leaf with `point`. No geometric filtering.
    pub fn retrieve_from_point(&self, point: Point) -> Vec<EntityId> {
        self.nodes.retrieve(point).iter().map(|member| member.id).collect()
    }

    /// Same as [`QuadTree::retrieve_from_point`] for the center of `bound`.
    pub fn retrieve_from_bound(&self, bound: &Bound) -> Vec<EntityId> {
        self.retrieve_from_point(bound.center())
    }

    pub fn is_entity(&self, id: EntityId) -> bool {
        match self.get(id) {
            Some(entity) => self
                .nodes
                .retrieve(entity.center())
                .iter()
                .any(|member| member.id == id),
            None => false,
        }
    }

    pub fn is_intersecting_point(&self, point: Point) -> bool {
        self.candidates(point)
            .any(|(_, entity)| entity.is_intersecting_point(point))
    }

    pub fn is_intersecting_bound(&self, bound: &Bound) -> bool {
        self.candidates(bound.center())
            .any(|(_, entity)| entity.is_intersecting_bound(bound))
    }

    pub fn intersecting_point(&self, point: Point) -> Vec<EntityId> {
        self.candidates(point)
            .filter(|(_, entity)| entity.is_intersecting_point(point))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn intersecting_bound(&self, bound: &Bound) -> Vec<EntityId> {
        self.candidates(bound.center())
            .filter(|(_, entity)| entity.is_intersecting_bound(bound))
            .map(|(id, _)| id)
            .collect()
    }

    /// Walks the tree depth first. Each leaf is reported before its entities.
    pub fn traverse<V>(&self, visitor: &mut V)
    where
        V: QuadtreeVisitor<T>,
    {
        let mut to_process = vec![self.nodes.root()];

        while let Some(idx) = to_process.pop() {
            let node = self.nodes.get(idx);
            match node.children {
                Some(children) => {
                    visitor.branch(node.depth, &node.bound);
                    // Push in reverse so children are visited in quadrant order.
                    to_process.extend(children.iter().rev());
                }
                None => {
                    visitor.leaf(node.depth, &node.bound);
                    for member in &node.members {
                        if let Some(entity) = self.get(member.id) {
                            visitor.entity(member.id, entity);
                        }
                    }
                }
            }
        }
    }

    fn candidates(&self, point: Point) -> impl Iterator<Item = (EntityId, &Entity<T>)> + '_ {
        self.nodes
            .retrieve(point)
            .iter()
            .filter_map(|member| self.get(member.id).map(|entity| (member.id, entity)))
    }
}
