use std::{fmt::Display, str::FromStr};

use cgmath::{InnerSpace, Point2, Vector2, Vector3};
use rand::Rng;
use serde::Deserialize;

use crate::{
    constants::{G, RADIUS_JITTER, SOFTENING},
    error::{Error, Result},
};

mod direct;
pub mod integrator;
pub mod spatial_tree;

pub use spatial_tree::tree::{Axis, KdNode, KdTree, NodeId};

/// Identity of a body for its whole lifetime. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub pos: Point2<f64>,
    pub vel: Vector2<f64>,
    pub mass: f64,
    pub radius: f64,
    pub color: Vector3<f32>,
    pub fixed: bool,
}

impl Body {
    /// Add the acceleration `other` exerts on `self` to `out`.
    #[inline]
    pub fn get_acc_towards(&self, other: &Body, out: &mut Vector2<f64>) {
        if other.id == self.id {
            return;
        }
        let rel = other.pos - self.pos;
        let dist_sq = rel.magnitude2();
        // Coincident bodies have no direction to pull along.
        if dist_sq == 0.0 {
            return;
        }
        let force = G * self.mass * other.mass / (dist_sq + SOFTENING);
        let acc = force / self.mass;
        *out += rel / dist_sq.sqrt() * acc;
    }
}

/// Everything needed to insert a body. Identity and radius are assigned on insertion.
#[derive(Debug, Clone)]
pub struct NewBody {
    pub pos: Point2<f64>,
    pub vel: Vector2<f64>,
    pub mass: f64,
    pub color: Vector3<f32>,
    pub fixed: bool,
}

impl NewBody {
    pub fn at_rest(pos: Point2<f64>, mass: f64, color: Vector3<f32>) -> Self {
        Self {
            pos,
            vel: Vector2::new(0.0, 0.0),
            mass,
            color,
            fixed: false,
        }
    }

    pub fn fixed(pos: Point2<f64>, mass: f64, color: Vector3<f32>) -> Self {
        Self {
            fixed: true,
            ..Self::at_rest(pos, mass, color)
        }
    }

    pub fn with_velocity(mut self, vel: Vector2<f64>) -> Self {
        self.vel = vel;
        self
    }
}

/// Ordered body collection. Insertion order is preserved across culling.
#[derive(Debug, Default)]
pub struct Bodies {
    items: Vec<Body>,
    next_id: u64,
}

impl Bodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, new: NewBody, rng: &mut impl Rng) -> Result<BodyId> {
        if !(new.mass.is_finite() && new.mass > 0.0) {
            return Err(Error::InvalidBody(format!(
                "mass must be positive and finite, got {}",
                new.mass
            )));
        }
        if !(new.pos.x.is_finite() && new.pos.y.is_finite()) {
            return Err(Error::InvalidBody(format!(
                "position must be finite, got {:?}",
                new.pos
            )));
        }

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.items.push(Body {
            id,
            pos: new.pos,
            vel: new.vel,
            mass: new.mass,
            radius: new.mass.cbrt() * rng.random_range(RADIUS_JITTER),
            color: new.color,
            fixed: new.fixed,
        });
        Ok(id)
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.items.iter()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.items.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn fixed_count(&self) -> usize {
        self.items.iter().filter(|b| b.fixed).count()
    }

    pub fn retain(&mut self, keep: impl FnMut(&Body) -> bool) {
        self.items.retain(keep);
    }
}

/// Strategy producing one acceleration per body per step.
pub trait ForceField {
    /// Add the acceleration of every non-fixed body to the matching slot of `out`.
    /// Slots of fixed bodies are left untouched.
    fn accumulate(&mut self, bodies: &[Body], out: &mut [Vector2<f64>]);
}

/// Exact O(n²) summation over all pairs.
#[derive(Debug, Default)]
pub struct PairwiseField;

impl ForceField for PairwiseField {
    fn accumulate(&mut self, bodies: &[Body], out: &mut [Vector2<f64>]) {
        direct::iter(bodies, out);
    }
}

/// Single-path descent through a kd-tree rebuilt on every call.
#[derive(Debug, Default)]
pub struct SpatialTreeField {
    pub tree: KdTree,
}

impl SpatialTreeField {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ForceField for SpatialTreeField {
    fn accumulate(&mut self, bodies: &[Body], out: &mut [Vector2<f64>]) {
        spatial_tree::iter(bodies, out, &mut self.tree);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Pairwise,
    SpatialTree,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pairwise" => Ok(Algorithm::Pairwise),
            "spatial_tree" | "spatial-tree" => Ok(Algorithm::SpatialTree),
            _ => Err(Error::UnknownAlgorithm(s.to_owned())),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Pairwise => write!(f, "pairwise"),
            Algorithm::SpatialTree => write!(f, "spatial_tree"),
        }
    }
}
