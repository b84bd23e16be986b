//! Affine transforms of a `Group`.
//!
//! Transforms never change how many elements a group has, so the attribute
//! store is carried over untouched.

use crate::errors::GroupError;
use crate::float_types::Real;
use crate::group::{Elements, Group};
use crate::traits::Transform2D;
use crate::utils;
use geo::{AffineOps, AffineTransform, Point, Rect};
use nalgebra::Matrix3;
use std::fmt::Debug;
use std::sync::Arc;

impl<V: Clone + Debug + Send + Sync> Transform2D for Group<V> {
    fn transform(&self, m: &Matrix3<Real>) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let affine = AffineTransform::new(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
        );
        let elements = match &self.elements {
            Elements::Polygons(p) => Elements::Polygons(Arc::new(
                p.iter().map(|poly| poly.affine_transform(&affine)).collect(),
            )),
            Elements::Polylines(l) => Elements::Polylines(Arc::new(
                l.iter().map(|line| line.affine_transform(&affine)).collect(),
            )),
        };
        Group::from_parts(elements, self.attributes.clone())
    }

    fn bounding_box(&self) -> Option<Rect<Real>> {
        self.compute_bounding_box()
    }

    fn centroid(&self) -> Option<Point<Real>> {
        self.compute_centroid()
    }

    fn anchor(&self) -> Self {
        let (dx, dy) = match &self.elements {
            Elements::Polygons(p) => utils::anchor_offset(p.iter()),
            Elements::Polylines(l) => utils::anchor_offset(l.iter()),
        };
        self.translate(dx, dy)
    }
}

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// Translates so that `center` (or, when `None`, the centroid) lands on `(x, y)`.
    pub fn to(&self, x: Real, y: Real, center: Option<(Real, Real)>) -> Result<Self, GroupError> {
        let (cx, cy) = match center {
            Some(c) => c,
            None => self
                .centroid()
                .map(|p| (p.x(), p.y()))
                .ok_or(GroupError::EmptyOperation("to"))?,
        };
        Ok(self.translate(x - cx, y - cy))
    }
}
