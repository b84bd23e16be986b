//! Structural composition: concatenation, filtering and per-element mapping.

use crate::errors::GroupError;
use crate::float_types::Real;
use crate::group::{Elements, Group, GroupBuilder, Kind};
use crate::traits::Transform2D;
use std::fmt::Debug;

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// `self`'s elements followed by `other`'s.
    ///
    /// `other`'s attribute indices are shifted by `self.len()`, so every
    /// element keeps its own attributes. An empty group of either kind is the
    /// identity; otherwise both groups must be of the same kind.
    pub fn add(&self, other: &Self) -> Result<Self, GroupError> {
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(other.clone());
        }
        let mut builder = GroupBuilder::new(self.kind());
        builder.push_group(self)?;
        builder.push_group(other)?;
        Ok(builder.build())
    }

    /// Concatenates `self` and every group in `groups`, in order.
    pub fn add_all<'a>(&self, groups: impl IntoIterator<Item = &'a Self>) -> Result<Self, GroupError>
    where
        V: 'a,
    {
        let mut builder = GroupBuilder::new(self.kind());
        builder.push_group(self)?;
        for group in groups {
            builder.push_group(group)?;
        }
        Ok(builder.build())
    }

    /// Keeps the elements for which `predicate` holds, in their original order.
    ///
    /// The predicate sees each element as a single-element group carrying that
    /// element's attributes. Survivors keep their attributes at their new index.
    pub fn filter(&self, mut predicate: impl FnMut(&Self) -> bool) -> Self {
        let mut builder = GroupBuilder::new(self.kind());
        for (index, element) in self.elements.iter().enumerate() {
            let Some(single) = self.subgroup(index) else {
                continue;
            };
            if predicate(&single) {
                builder.push_element(element, self.attributes.shared(index));
            }
        }
        builder.build()
    }

    /// One single-element group per element, each with its own attributes at index 0.
    ///
    /// Nothing is consumed; calling it again starts over.
    pub fn explode(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.len()).filter_map(move |i| self.subgroup(i))
    }

    /// Applies `f` to every exploded element and concatenates the results.
    pub fn map_subgroups(&self, mut f: impl FnMut(Self) -> Self) -> Result<Self, GroupError> {
        let mut builder = GroupBuilder::new(self.kind());
        for single in self.explode() {
            builder.push_group(&f(single))?;
        }
        Ok(builder.build())
    }

    /// Feeds the group to `f`; handy in long method chains.
    pub fn then<T>(&self, f: impl FnOnce(&Self) -> T) -> T {
        f(self)
    }

    /// `self` followed by whatever `f` derives from it.
    pub fn do_and_add(&self, f: impl FnOnce(&Self) -> Self) -> Result<Self, GroupError> {
        self.add(&f(self))
    }

    /// Turns every polygon ring (exterior first, then holes) into a polyline.
    ///
    /// Each ring carries a copy of its polygon's attributes.
    pub fn to_boundary(&self) -> Result<Self, GroupError> {
        let Elements::Polygons(polygons) = &self.elements else {
            return Err(GroupError::KindMismatch {
                expected: Kind::Polygon,
                found: Kind::Polyline,
            });
        };
        let mut builder = GroupBuilder::new(Kind::Polyline);
        for (index, polygon) in polygons.iter().enumerate() {
            let attributes = self.attributes.shared(index);
            for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                builder.push_polyline_fragment(ring.clone(), attributes.clone());
            }
        }
        Ok(builder.build())
    }

    /// Lays `groups` out left to right, each anchored at the origin and
    /// separated from the previous one by `clearance`.
    pub fn arrange(groups: &[Self], clearance: Real) -> Result<Self, GroupError> {
        let kind = groups.first().map_or(Kind::Polygon, Group::kind);
        let mut builder = GroupBuilder::new(kind);
        let mut x = 0.0;
        for group in groups {
            builder.push_group(&group.anchor().translate(x, 0.0))?;
            x += group.bounds_width() + clearance;
        }
        Ok(builder.build())
    }
}
