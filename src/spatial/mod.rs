//! Broad-phase spatial index.
//!
//! The quadtree stores only bounding boxes, so a query returns a superset
//! of the exact answer (never a false negative); callers follow up with the
//! narrow-phase predicate in [`hit_test`].


pub use hit_test::hit_test;

use std::collections::HashSet;
use std::hash::Hash;

use crate::math::Point2;

/// Smallest quadrant extent the tree will still split into.
const MIN_NODE_EXTENT: f64 = 1e-6;

/// An axis-aligned query region given by its min corner and extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rectangle {
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Boundary-inclusive point containment.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Boundary-inclusive overlap test.
    #[must_use]
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x <= other.x + other.w
            && self.x + self.w >= other.x
            && self.y <= other.y + other.h
            && self.y + self.h >= other.y
    }
}

/// A quadtree over keyed bounding boxes, stored as a flat node arena.
///
/// A leaf holds up to `capacity` items; on overflow it splits into four
/// equal quadrants and re-distributes. An item spanning several quadrants
/// is referenced from every leaf it touches, so [`QuadTree::retrieve`]
/// deduplicates through the caller-supplied seen set.
///
/// The tree has no change notification: rebuild or re-insert whenever the
/// indexed entities change.
#[derive(Debug, Clone)]
pub struct QuadTree<K> {
    nodes: Vec<Node<K>>,
    capacity: usize,
}

#[derive(Debug, Clone)]
struct Node<K> {
    boundary: Rectangle,
    items: Vec<(K, Rectangle)>,
    /// Indices of the NW/NE/SW/SE children; `None` for a leaf.
    children: Option<[usize; 4]>,
}

impl<K: Copy + Eq + Hash> QuadTree<K> {
    /// An empty tree over `boundary`. `capacity` is clamped to at least 1.
    #[must_use]
    pub fn new(boundary: Rectangle, capacity: usize) -> Self {
        Self {
            nodes: vec![Node {
                boundary,
                items: Vec::new(),
                children: None,
            }],
            capacity: capacity.max(1),
        }
    }

    /// Inserts a keyed bounding box. Returns `false` when the box does not
    /// intersect the tree boundary at all.
    pub fn insert(&mut self, key: K, bbox: Rectangle) -> bool {
        if !self.nodes[0].boundary.intersects(&bbox) {
            return false;
        }
        self.insert_at(0, key, bbox);
        true
    }

    fn insert_at(&mut self, node: usize, key: K, bbox: Rectangle) {
        // Walk down already-split nodes iteratively; recursion is only one
        // level deep, at the split itself.
        let mut stack = vec![node];
        while let Some(idx) = stack.pop() {
            match self.nodes[idx].children {
                Some(children) => {
                    for child in children {
                        if self.nodes[child].boundary.intersects(&bbox) {
                            stack.push(child);
                        }
                    }
                }
                None => {
                    let b = self.nodes[idx].boundary;
                    // Stop splitting once quadrants would be degenerate, or
                    // identical straddling boxes could split forever.
                    let splittable = b.w * 0.5 > MIN_NODE_EXTENT && b.h * 0.5 > MIN_NODE_EXTENT;
                    if self.nodes[idx].items.len() < self.capacity || !splittable {
                        self.nodes[idx].items.push((key, bbox));
                    } else {
                        self.subdivide(idx);
                        stack.push(idx);
                    }
                }
            }
        }
    }

    /// Splits a leaf into four equal quadrants and re-distributes its items.
    fn subdivide(&mut self, node: usize) {
        let b = self.nodes[node].boundary;
        let (hw, hh) = (b.w * 0.5, b.h * 0.5);
        let quadrants = [
            Rectangle::new(b.x, b.y + hh, hw, hh),
            Rectangle::new(b.x + hw, b.y + hh, hw, hh),
            Rectangle::new(b.x, b.y, hw, hh),
            Rectangle::new(b.x + hw, b.y, hw, hh),
        ];

        let base = self.nodes.len();
        for boundary in quadrants {
            self.nodes.push(Node {
                boundary,
                items: Vec::new(),
                children: None,
            });
        }
        let children = [base, base + 1, base + 2, base + 3];
        self.nodes[node].children = Some(children);

        let items = std::mem::take(&mut self.nodes[node].items);
        for (key, bbox) in items {
            for child in children {
                if self.nodes[child].boundary.intersects(&bbox) {
                    self.nodes[child].items.push((key, bbox));
                }
            }
        }
    }

    /// All keys whose bounding box intersects `range`.
    ///
    /// The seen set deduplicates multi-leaf references; reuse one set across
    /// calls only if duplicate suppression across those calls is wanted.
    pub fn retrieve(&self, range: &Rectangle, seen: &mut HashSet<K>) -> Vec<K> {
        let mut out = Vec::new();
        let mut stack = vec![0usize];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if !node.boundary.intersects(range) {
                continue;
            }
            for (key, bbox) in &node.items {
                if bbox.intersects(range) && seen.insert(*key) {
                    out.push(*key);
                }
            }
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
        out
    }

    /// Discards every item and subtree, keeping the boundary and capacity.
    pub fn clear(&mut self) {
        let boundary = self.nodes[0].boundary;
        self.nodes.clear();
        self.nodes.push(Node {
            boundary,
            items: Vec::new(),
            children: None,
        });
    }

    /// The root boundary.
    #[must_use]
    pub fn boundary(&self) -> Rectangle {
        self.nodes[0].boundary
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_boxes(n: usize) -> Vec<(usize, Rectangle)> {
        // A diagonal spread of small boxes across a 100x100 world.
        (0..n)
            .map(|i| {
                let t = i as f64 * 97.0 % 100.0;
                (i, Rectangle::new(t * 0.9, (100.0 - t) * 0.9, 2.0, 2.0))
            })
            .collect()
    }

    #[test]
    fn rectangle_contains_and_intersects() {
        let r = Rectangle::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(&Point2::new(10.0, 5.0)));
        assert!(!r.contains(&Point2::new(10.1, 5.0)));
        assert!(r.intersects(&Rectangle::new(9.0, 4.0, 10.0, 10.0)));
        assert!(r.intersects(&Rectangle::new(10.0, 0.0, 1.0, 1.0)));
        assert!(!r.intersects(&Rectangle::new(11.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn retrieve_matches_brute_force_scan() {
        let world = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let mut tree = QuadTree::new(world, 4);
        let boxes = unit_boxes(60);
        for &(key, bbox) in &boxes {
            assert!(tree.insert(key, bbox));
        }

        for range in [
            Rectangle::new(10.0, 10.0, 30.0, 30.0),
            Rectangle::new(0.0, 0.0, 100.0, 100.0),
            Rectangle::new(48.0, 48.0, 4.0, 4.0),
            Rectangle::new(90.0, 0.0, 10.0, 10.0),
        ] {
            let mut seen = HashSet::new();
            let mut got = tree.retrieve(&range, &mut seen);
            got.sort_unstable();
            let mut expected: Vec<usize> = boxes
                .iter()
                .filter(|(_, b)| b.intersects(&range))
                .map(|&(k, _)| k)
                .collect();
            expected.sort_unstable();
            assert_eq!(got, expected, "range {range:?}");
        }
    }

    #[test]
    fn spanning_item_is_returned_once() {
        let world = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let mut tree = QuadTree::new(world, 1);
        // Center-straddling box ends up in all four quadrants after splits.
        tree.insert(0, Rectangle::new(45.0, 45.0, 10.0, 10.0));
        tree.insert(1, Rectangle::new(1.0, 1.0, 2.0, 2.0));
        tree.insert(2, Rectangle::new(90.0, 90.0, 2.0, 2.0));

        let mut seen = HashSet::new();
        let got = tree.retrieve(&Rectangle::new(0.0, 0.0, 100.0, 100.0), &mut seen);
        assert_eq!(got.len(), 3);
    }

    #[test]
    fn outside_insert_is_rejected() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 10.0, 10.0), 4);
        assert!(!tree.insert(0, Rectangle::new(20.0, 20.0, 1.0, 1.0)));
        let mut seen = HashSet::new();
        assert!(tree
            .retrieve(&Rectangle::new(0.0, 0.0, 100.0, 100.0), &mut seen)
            .is_empty());
    }

    #[test]
    fn clear_discards_the_subtree() {
        let mut tree = QuadTree::new(Rectangle::new(0.0, 0.0, 10.0, 10.0), 1);
        for i in 0..8 {
            tree.insert(i, Rectangle::new(f64::from(i), f64::from(i), 0.5, 0.5));
        }
        tree.clear();
        let mut seen = HashSet::new();
        assert!(tree
            .retrieve(&Rectangle::new(0.0, 0.0, 10.0, 10.0), &mut seen)
            .is_empty());
        assert!((tree.boundary().w - 10.0).abs() < f64::EPSILON);
    }
}
