//! A region quadtree for axis-aligned rectangles.
//!
//! Entities are routed to a single leaf by their center. Leaves split into
//! four quadrants once they exceed the configured entity count (until the
//! configured max depth), and four sibling leaves collapse back into their
//! parent when removals leave them under that count.

mod entity;
mod error;
mod geometry;
mod list;
mod node;
mod quadtree;

/// Receives the structure of a tree from [`QuadTree::traverse`].
pub trait QuadtreeVisitor<T> {
    fn entity(&mut self, id: EntityId, entity: &Entity<T>);
    fn leaf(&mut self, depth: u32, bound: &Bound);
    fn branch(&mut self, depth: u32, bound: &Bound);
}

pub use entity::{Action, Entity, EntityId};
pub use error::{QuadtreeError, Result};
pub use geometry::{Bound, Point, Quadrant};
pub use quadtree::{Options, QuadTree};

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Outline {
        lines: Vec<String>,
    }

    impl QuadtreeVisitor<&'static str> for Outline {
        fn entity(&mut self, _id: EntityId, entity: &Entity<&'static str>) {
            self.lines.push(format!("entity {}", entity.objects().join(",")));
        }

        fn leaf(&mut self, depth: u32, bound: &Bound) {
            self.lines.push(format!("leaf {depth} {}x{}", bound.width(), bound.height()));
        }

        fn branch(&mut self, depth: u32, bound: &Bound) {
            self.lines.push(format!("branch {depth} {}x{}", bound.width(), bound.height()));
        }
    }

    #[test]
    fn traverse_outlines_the_tree() {
        let mut tree = QuadTree::new(Options::default().with_bounds(800.0, 600.0).with_max_entities(1));
        let _ = tree.insert(Bound::new(0.0, 0.0, 50.0, 50.0), vec!["a"]);
        let _ = tree.insert(Bound::new(450.0, 350.0, 600.0, 500.0), vec!["b", "c"]);

        let mut outline = Outline::default();
        tree.traverse(&mut outline);
        assert_eq!(
            outline.lines,
            vec![
                "branch 0 800x600",
                "leaf 1 400x300",
                "entity a",
                "leaf 1 400x300",
                "leaf 1 400x300",
                "leaf 1 400x300",
                "entity b,c",
            ]
        );
    }
}
