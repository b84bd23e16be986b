//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use shart::{Group, Transform2D, float_types::Real};
use std::fmt::Debug;

pub const EPS: Real = 1e-6;

pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// `[min_x, min_y, max_x, max_y]` of a group, or all zeros when it is empty.
pub fn bounds<V: Clone + Debug + Send + Sync>(group: &Group<V>) -> [Real; 4] {
    group
        .bounding_box()
        .map_or([0.0; 4], |r| [r.min().x, r.min().y, r.max().x, r.max().y])
}

pub fn assert_bounds<V: Clone + Debug + Send + Sync>(group: &Group<V>, expected: [Real; 4]) {
    let actual = bounds(group);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(approx_eq(*a, *e, EPS), "bounds {actual:?} != expected {expected:?}");
    }
}

/// Centroid of each element, in order.
pub fn element_centroids<V: Clone + Debug + Send + Sync>(group: &Group<V>) -> Vec<(Real, Real)> {
    group
        .explode()
        .filter_map(|g| g.centroid())
        .map(|p| (p.x(), p.y()))
        .collect()
}

/// Total area of a polygon group.
pub fn total_area<V: Clone + Debug + Send + Sync>(group: &Group<V>) -> Real {
    use geo::Area;
    group.polygons().iter().map(|p| p.unsigned_area()).sum()
}
