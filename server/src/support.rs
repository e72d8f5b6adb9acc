//! Structural support.
//!
//! A structure resting on the ground has full support. Anything else takes the best support
//! offered by a supporting neighbor in range, minus a fixed loss per link.

use crate::schema::{Structure, structure};
use nalgebra::Point3;
use spacetimedb::{ReducerContext, Table};

pub const FULL_SUPPORT: f32 = 100.0;

/// Support lost per link.
pub const SUPPORT_LOSS: f32 = 20.0;

/// Neighbors farther than this (meters) never support each other.
pub const SUPPORT_RADIUS_M: f32 = 2.5;

/// Structures at or below this height (meters) rest on the ground.
pub const GROUND_HEIGHT_M: f32 = 0.1;

/// A neighbor as seen by the support computation.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub position: Point3<f32>,
    pub supports: bool,
    pub support: f32,
}

pub fn compute_support(
    position: &Point3<f32>,
    neighbors: impl IntoIterator<Item = Neighbor>,
) -> f32 {
    if position.y <= GROUND_HEIGHT_M {
        return FULL_SUPPORT;
    }
    neighbors
        .into_iter()
        .filter(|n| n.supports)
        .filter(|n| {
            nalgebra::distance_squared(&n.position, position) <= SUPPORT_RADIUS_M * SUPPORT_RADIUS_M
        })
        .map(|n| n.support - SUPPORT_LOSS)
        .fold(0.0_f32, f32::max)
}

/// Support of `row` given every other structure in the world.
pub fn support_for(ctx: &ReducerContext, row: &Structure) -> f32 {
    let neighbors = ctx
        .db
        .structure()
        .iter()
        .filter(|other| other.id != row.id)
        .map(|other| Neighbor {
            position: other.translation.into(),
            supports: other.supports,
            support: other.support,
        });
    compute_support(&row.translation.into(), neighbors)
}
