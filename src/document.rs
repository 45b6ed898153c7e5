//! The drawing store.
//!
//! Entities live in a slot map keyed by [`EntityKey`]; block definitions are
//! named entity lists expanded on demand through [`BlockSource`]. The store
//! also builds the broad-phase index over its current contents — the index
//! is a snapshot, so rebuild it after edits.

use std::collections::{HashMap, HashSet};

use slotmap::{new_key_type, SlotMap};

use crate::entity::{BlockRef, BlockSource, BoundingBox, Entity};
use crate::error::{DocumentError, GeometryError, Result};
use crate::math::{Point2, Vector2};
use crate::operations::transform::{move_entity, rotate_entity, scale_entity};
use crate::spatial::{hit_test, QuadTree, Rectangle};

new_key_type! {
    /// Stable handle to an entity in a [`Drawing`].
    pub struct EntityKey;
}

/// A drawing: keyed entities plus named block definitions.
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    entities: SlotMap<EntityKey, Entity>,
    blocks: HashMap<String, Vec<Entity>>,
}

impl Drawing {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, validating its radial fields.
    ///
    /// # Errors
    /// [`GeometryError::NegativeRadius`] for a negative radius,
    /// [`GeometryError::Degenerate`] for a donut with the inner radius
    /// beyond the outer.
    pub fn add_entity(&mut self, entity: Entity) -> Result<EntityKey> {
        validate(&entity)?;
        Ok(self.entities.insert(entity))
    }

    /// Looks an entity up by key.
    ///
    /// # Errors
    /// [`DocumentError::EntityNotFound`] for a stale or foreign key.
    pub fn entity(&self, key: EntityKey) -> Result<&Entity> {
        self.entities
            .get(key)
            .ok_or_else(|| DocumentError::EntityNotFound.into())
    }

    /// Replaces an entity in place.
    ///
    /// # Errors
    /// [`DocumentError::EntityNotFound`] for a stale key; the same
    /// validation errors as [`Drawing::add_entity`].
    pub fn replace_entity(&mut self, key: EntityKey, entity: Entity) -> Result<()> {
        validate(&entity)?;
        match self.entities.get_mut(key) {
            Some(slot) => {
                *slot = entity;
                Ok(())
            }
            None => Err(DocumentError::EntityNotFound.into()),
        }
    }

    /// Removes an entity, returning it.
    ///
    /// # Errors
    /// [`DocumentError::EntityNotFound`] for a stale key.
    pub fn remove_entity(&mut self, key: EntityKey) -> Result<Entity> {
        self.entities
            .remove(key)
            .ok_or_else(|| DocumentError::EntityNotFound.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registers (or replaces) a named block definition. Definition
    /// entities are in block-local coordinates around the origin.
    ///
    /// # Errors
    /// The same validation errors as [`Drawing::add_entity`], for any
    /// definition entity.
    pub fn define_block(&mut self, name: impl Into<String>, entities: Vec<Entity>) -> Result<()> {
        for entity in &entities {
            validate(entity)?;
        }
        self.blocks.insert(name.into(), entities);
        Ok(())
    }

    /// Adds a reference to a defined block.
    ///
    /// # Errors
    /// [`DocumentError::BlockNotFound`] when no definition carries `block`.
    pub fn insert_block_ref(
        &mut self,
        block: &str,
        insert: Point2,
        rotation: f64,
        scale: f64,
    ) -> Result<EntityKey> {
        if !self.blocks.contains_key(block) {
            return Err(DocumentError::BlockNotFound(block.to_owned()).into());
        }
        Ok(self.entities.insert(Entity::BlockRef(BlockRef {
            block: block.to_owned(),
            insert,
            rotation,
            scale,
        })))
    }

    /// Builds a fresh broad-phase index over the current contents. `None`
    /// for an empty drawing.
    #[must_use]
    pub fn build_index(&self, capacity: usize) -> Option<QuadTree<EntityKey>> {
        let world = self
            .entities
            .values()
            .map(|e| e.bounding_box(self))
            .reduce(|a, b| a.union(&b))?
            .inflated(1.0);
        let mut tree = QuadTree::new(to_rect(&world), capacity);
        for (key, entity) in &self.entities {
            tree.insert(key, to_rect(&entity.bounding_box(self)));
        }
        Some(tree)
    }

    /// Two-phase pick: broad-phase query around `point`, then the exact
    /// narrow-phase hit test. Results carry no particular order.
    #[must_use]
    pub fn entities_at(
        &self,
        tree: &QuadTree<EntityKey>,
        point: &Point2,
        tolerance: f64,
    ) -> Vec<EntityKey> {
        let probe = Rectangle::new(
            point.x - tolerance,
            point.y - tolerance,
            2.0 * tolerance,
            2.0 * tolerance,
        );
        let mut seen = HashSet::new();
        tree.retrieve(&probe, &mut seen)
            .into_iter()
            .filter(|&key| {
                self.entities
                    .get(key)
                    .is_some_and(|e| hit_test(point, e, tolerance, self))
            })
            .collect()
    }
}

impl BlockSource for Drawing {
    /// Expands a block reference into drawing coordinates: definition
    /// entities scaled, rotated, then translated by the insertion point.
    fn block_entities(&self, block_ref: &BlockRef) -> Vec<Entity> {
        let Some(definition) = self.blocks.get(&block_ref.block) else {
            return Vec::new();
        };
        let origin = Point2::new(0.0, 0.0);
        let delta = Vector2::new(block_ref.insert.x, block_ref.insert.y);
        definition
            .iter()
            .map(|e| {
                let scaled = scale_entity(e, &origin, block_ref.scale);
                let rotated = rotate_entity(&scaled, &origin, block_ref.rotation);
                move_entity(&rotated, &delta)
            })
            .collect()
    }
}

fn validate(entity: &Entity) -> Result<()> {
    let negative = |r: f64| -> Result<()> {
        if r < 0.0 {
            Err(GeometryError::NegativeRadius(r).into())
        } else {
            Ok(())
        }
    };
    match entity {
        Entity::Circle(c) => negative(c.radius),
        Entity::Arc(a) => negative(a.radius),
        Entity::Ellipse(e) => {
            negative(e.major_radius)?;
            negative(e.minor_radius)
        }
        Entity::Donut(d) => {
            negative(d.inner_radius)?;
            negative(d.outer_radius)?;
            if d.inner_radius > d.outer_radius {
                return Err(GeometryError::Degenerate(
                    "donut inner radius exceeds outer radius".to_owned(),
                )
                .into());
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn to_rect(b: &BoundingBox) -> Rectangle {
    Rectangle::new(b.min_x, b.min_y, b.width(), b.height())
}
