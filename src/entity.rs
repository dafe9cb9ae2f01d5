use std::fmt;

use crate::geometry::{Bound, Point};

/// Caller-invoked callback carried by an entity. The tree never calls it.
pub type Action = Box<dyn Fn() + Send + Sync>;

/// Stable handle to an entity stored in a [`QuadTree`](crate::QuadTree).
///
/// Handles compare by identity: two entities with equal bounds still get
/// distinct ids, and the id of a removed entity never matches a later one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A rectangle plus whatever the caller wants to carry along with it.
///
/// The bound and its center are fixed for the life of the entity; to move
/// one, remove it from the tree and insert a new entity.
pub struct Entity<T> {
    bound: Bound,
    center: Point,
    objects: Vec<T>,
    action: Option<Action>,
}

impl<T> Entity<T> {
    pub fn new(bound: Bound, objects: Vec<T>) -> Self {
        Self {
            bound,
            center: bound.center(),
            objects,
            action: None,
        }
    }

    pub fn with_action<F>(bound: Bound, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            bound,
            center: bound.center(),
            objects: Vec::new(),
            action: Some(Box::new(action)),
        }
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn objects(&self) -> &[T] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Vec<T> {
        &mut self.objects
    }

    pub fn action(&self) -> Option<&(dyn Fn() + Send + Sync)> {
        self.action.as_deref()
    }

    /// Calls the action if one is set. Returns whether it ran.
    pub fn run_action(&self) -> bool {
        match &self.action {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn is_intersecting_point(&self, point: Point) -> bool {
        self.bound.intersects_point(point)
    }

    pub fn is_intersecting_bound(&self, bound: &Bound) -> bool {
        self.bound.intersects(bound)
    }
}

impl<T: fmt::Debug> fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("bound", &self.bound)
            .field("center", &self.center)
            .field("objects", &self.objects)
            .field("action", &self.action.as_ref().map(|_| "Fn()"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn center_is_copied_from_bound() {
        let entity = Entity::new(Bound::new(0.0, 350.0, 50.0, 500.0), vec!["a", "b"]);
        assert_eq!(entity.center(), Point::new(25.0, 425.0));
        assert_eq!(entity.objects(), &["a", "b"]);
        assert!(entity.action().is_none());
    }

    #[test]
    fn action_runs_only_when_asked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let entity: Entity<()> = Entity::with_action(Bound::new(0.0, 0.0, 50.0, 50.0), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(entity.run_action());
        assert!(entity.action().is_some());
        if let Some(action) = entity.action() {
            action();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        let plain: Entity<()> = Entity::new(Bound::new(0.0, 0.0, 1.0, 1.0), Vec::new());
        assert!(!plain.run_action());
    }

    #[test]
    fn intersection_delegates_to_bound() {
        let entity = Entity::new(Bound::new(0.0, 0.0, 50.0, 50.0), vec![1]);
        assert!(entity.is_intersecting_point(Point::new(5.0, 5.0)));
        assert!(!entity.is_intersecting_point(Point::new(60.0, 60.0)));
        assert!(entity.is_intersecting_bound(&Bound::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!entity.is_intersecting_bound(&Bound::new(60.0, 60.0, 70.0, 70.0)));
    }

    #[test]
    fn debug_hides_action_body() {
        let entity: Entity<u8> = Entity::with_action(Bound::new(0.0, 0.0, 1.0, 1.0), || {});
        let out = format!("{entity:?}");
        assert!(out.contains("Some(\"Fn()\")"), "{out}");
    }
}
