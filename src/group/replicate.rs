//! Replication: circular arrays, parametrised arrays and self-similar recursion.
//!
//! Every copy is concatenated with [`Group::add`] semantics, so attributes are
//! replicated with their copy and renumbered.

use crate::errors::GroupError;
use crate::float_types::Real;
use crate::group::{Group, GroupBuilder};
use crate::traits::{Origin, Transform2D};
use crate::utils::circular_array_placements;
use std::collections::VecDeque;
use std::fmt::Debug;

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// `count` copies of `self` at equal angular steps around `(cx, cy)`.
    ///
    /// The circle's radius is the distance from `(cx, cy)` to `pivot`, which
    /// defaults to the group's centroid. Copy `i` is translated so that the
    /// pivot lands on the circle at angle `2πi/count`. With
    /// `rotate_each_copy` the copy is also turned by that angle about the
    /// placed pivot; otherwise its orientation is left alone.
    pub fn spin(
        &self,
        cx: Real,
        cy: Real,
        count: usize,
        pivot: Option<(Real, Real)>,
        rotate_each_copy: bool,
    ) -> Result<Self, GroupError> {
        let Some(centroid) = self.centroid() else {
            return Ok(self.clone());
        };
        let (px, py) = pivot.unwrap_or((centroid.x(), centroid.y()));
        let radius = (px - cx).hypot(py - cy);

        let mut builder = GroupBuilder::new(self.kind());
        for (x, y, angle) in circular_array_placements(radius, count) {
            let mut copy = self.translate(cx + x - px, cy + y - py);
            if rotate_each_copy {
                copy = copy.rotate(angle, Origin::Point(cx + x, cy + y));
            }
            builder.push_group(&copy)?;
        }
        log::debug!("spin: {} copies of {} elements", count, self.len());
        Ok(builder.build())
    }

    /// Concatenates `f(0, self)`, `f(1, self)`, ... `f(count - 1, self)`.
    pub fn linarray(
        &self,
        count: usize,
        mut f: impl FnMut(usize, &Self) -> Self,
    ) -> Result<Self, GroupError> {
        let mut builder = GroupBuilder::new(self.kind());
        for index in 0..count {
            builder.push_group(&f(index, self))?;
        }
        Ok(builder.build())
    }

    /// Applies `f` to `self`, then to every group it produced, and so on for
    /// `depth` levels, concatenating `self` with every generated group.
    ///
    /// Levels are expanded breadth first: all groups `f` made from `self`
    /// come first, then everything made from those, and so on. A node for
    /// which `f` returns nothing ends its branch. A depth of zero gives `self`
    /// back.
    pub fn recurse(
        &self,
        mut f: impl FnMut(&Self) -> Vec<Self>,
        depth: usize,
    ) -> Result<Self, GroupError> {
        let mut builder = GroupBuilder::new(self.kind());
        builder.push_group(self)?;

        let mut frontier: VecDeque<(Self, usize)> = VecDeque::from([(self.clone(), 0)]);
        let mut generated = 0usize;
        while let Some((group, level)) = frontier.pop_front() {
            if level == depth {
                continue;
            }
            for child in f(&group) {
                builder.push_group(&child)?;
                generated += 1;
                frontier.push_back((child, level + 1));
            }
        }
        log::debug!("recurse: depth {} generated {} groups", depth, generated);
        Ok(builder.build())
    }
}
