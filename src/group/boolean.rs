//! Boolean combination of groups.
//!
//! Polygon geometry goes through `geo`'s `BooleanOps`. Polylines are overlaid
//! here: two polylines only share one-dimensional parts where their segments
//! run collinearly, so intersection, difference and union reduce to interval
//! arithmetic along each segment.
//!
//! Attribute policy:
//! - intersection and difference: every fragment of element `i` gets a
//!   (shared) copy of element `i`'s attributes;
//! - union: the kernel cannot say which input produced which output region,
//!   so all input dictionaries are merged, later inputs winning on key
//!   collisions, and the merged dictionary is attached to every fragment.

use crate::attributes::Attributes;
use crate::errors::GroupError;
use crate::float_types::{Real, tolerance};
use crate::group::{Elements, Group, GroupBuilder};
use geo::{BooleanOps, Coord, Line, LineString, MultiPolygon, Polygon};
use std::fmt::Debug;
use std::sync::Arc;

/// Unions `polygons` into disjoint pieces by folding pairwise unions in order.
pub(crate) fn dissolve<'a>(polygons: impl IntoIterator<Item = &'a Polygon<Real>>) -> MultiPolygon<Real> {
    let mut polygons = polygons.into_iter();
    let Some(first) = polygons.next() else {
        return MultiPolygon::new(Vec::new());
    };
    let mut accumulated = MultiPolygon(vec![first.clone()]);
    for polygon in polygons {
        accumulated = accumulated.union(&MultiPolygon(vec![polygon.clone()]));
    }
    accumulated
}

impl<V: Clone + Debug + Send + Sync> Group<V> {
    fn check_same_kind(&self, other: &Self) -> Result<(), GroupError> {
        if self.is_empty() || other.is_empty() || self.kind() == other.kind() {
            Ok(())
        } else {
            Err(GroupError::KindMismatch {
                expected: self.kind(),
                found: other.kind(),
            })
        }
    }

    /// Intersects every element with the whole of `other`.
    ///
    /// Fragments inherit the attributes of the element they came from; parts
    /// of lower dimension than the group's kind are dropped.
    pub fn intersection(&self, other: &Self) -> Result<Self, GroupError> {
        self.check_same_kind(other)?;
        let result = self.clip_each(other, Clip::Keep);
        log::debug!(
            "intersection: {} elements against {} -> {} fragments",
            self.len(),
            other.len(),
            result.len()
        );
        Ok(result)
    }

    /// Removes the whole of `other` from every element.
    ///
    /// An element may split into several fragments, each inheriting its
    /// attributes, or vanish along with its attributes.
    pub fn difference(&self, other: &Self) -> Result<Self, GroupError> {
        self.check_same_kind(other)?;
        if other.is_empty() {
            return Ok(self.clone());
        }
        let result = self.clip_each(other, Clip::Remove);
        log::debug!(
            "difference: {} elements minus {} -> {} fragments",
            self.len(),
            other.len(),
            result.len()
        );
        Ok(result)
    }

    /// Merges all elements into the fewest disjoint pieces.
    ///
    /// Every piece receives the merge of all element attributes, in element
    /// order, with later elements winning on key collisions.
    pub fn union_all(&self) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let merged = Arc::new(self.attributes.fold_all());
        let result = self.merged_union(std::iter::once(self), merged);
        log::debug!("union_all: {} elements -> {} pieces", self.len(), result.len());
        result
    }

    /// Unions `self` with `other`.
    ///
    /// When `other` holds a single element, each element of `self` is unioned
    /// with it separately and its pieces get that element's attributes merged
    /// with `other`'s. Otherwise both groups are merged wholesale as in
    /// [`Group::union_all`], `self`'s attributes before `other`'s. An empty
    /// `other` leaves `self` unchanged.
    pub fn union(&self, other: &Self) -> Result<Self, GroupError> {
        self.check_same_kind(other)?;
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.is_empty() {
            return Ok(other.clone());
        }

        if other.len() > 1 {
            let mut merged = self.attributes.fold_all();
            merged.extend(other.attributes.fold_all());
            return Ok(self.merged_union([self, other].into_iter(), Arc::new(merged)));
        }

        let other_attributes = other.attributes.get(0);
        let mut builder = GroupBuilder::new(self.kind());
        for index in 0..self.len() {
            let mut attributes = self.attributes.get(index);
            attributes.extend(other_attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
            let attributes = non_empty(attributes);

            match (&self.elements, &other.elements) {
                (Elements::Polygons(mine), Elements::Polygons(theirs)) => {
                    for piece in dissolve([&mine[index], &theirs[0]]) {
                        builder.push_polygon_fragment(piece, attributes.clone());
                    }
                },
                (Elements::Polylines(mine), Elements::Polylines(theirs)) => {
                    for piece in union_lines([&mine[index], &theirs[0]]) {
                        builder.push_polyline_fragment(piece, attributes.clone());
                    }
                },
                _ => return Err(GroupError::KindMismatch {
                    expected: self.kind(),
                    found: other.kind(),
                }),
            }
        }
        let result = builder.build();
        log::debug!(
            "union: {} elements with 1 -> {} pieces",
            self.len(),
            result.len()
        );
        Ok(result)
    }

    fn clip_each(&self, other: &Self, clip: Clip) -> Self {
        let mut builder = GroupBuilder::new(self.kind());
        match (&self.elements, &other.elements) {
            (Elements::Polygons(mine), Elements::Polygons(theirs)) => {
                let mask = dissolve(theirs.iter());
                for (index, polygon) in mine.iter().enumerate() {
                    let single = MultiPolygon(vec![polygon.clone()]);
                    let fragments = match clip {
                        Clip::Keep => single.intersection(&mask),
                        Clip::Remove => single.difference(&mask),
                    };
                    let attributes = self.attributes.shared(index);
                    for fragment in fragments {
                        builder.push_polygon_fragment(fragment, attributes.clone());
                    }
                }
            },
            (Elements::Polylines(mine), Elements::Polylines(theirs)) => {
                let mask: Vec<Line<Real>> = theirs.iter().flat_map(|l| l.lines()).collect();
                for (index, line) in mine.iter().enumerate() {
                    let attributes = self.attributes.shared(index);
                    for fragment in split_by_overlap(line, &mask, clip) {
                        builder.push_polyline_fragment(fragment, attributes.clone());
                    }
                }
            },
            // `other` is empty (and of the other kind): nothing overlaps it
            _ => {
                if clip == Clip::Remove {
                    return self.clone();
                }
            },
        }
        builder.build()
    }

    fn merged_union<'a>(
        &self,
        groups: impl Iterator<Item = &'a Self>,
        attributes: Arc<Attributes<V>>,
    ) -> Self
    where
        V: 'a,
    {
        let attributes = non_empty_shared(attributes);
        let mut builder = GroupBuilder::new(self.kind());
        match &self.elements {
            Elements::Polygons(_) => {
                let pieces = dissolve(groups.flat_map(|g| g.polygons().iter()));
                for piece in pieces {
                    builder.push_polygon_fragment(piece, attributes.clone());
                }
            },
            Elements::Polylines(_) => {
                for piece in union_lines(groups.flat_map(|g| g.polylines().iter())) {
                    builder.push_polyline_fragment(piece, attributes.clone());
                }
            },
        }
        builder.build()
    }
}

fn non_empty<V: Clone + Debug + Send + Sync>(attributes: Attributes<V>) -> Option<Arc<Attributes<V>>> {
    (!attributes.is_empty()).then(|| Arc::new(attributes))
}

fn non_empty_shared<V: Clone + Debug + Send + Sync>(
    attributes: Arc<Attributes<V>>,
) -> Option<Arc<Attributes<V>>> {
    (!attributes.is_empty()).then_some(attributes)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Clip {
    /// keep the parts covered by the mask
    Keep,
    /// keep the parts outside the mask
    Remove,
}

fn cross(a: Coord<Real>, b: Coord<Real>) -> Real {
    a.x * b.y - a.y * b.x
}

fn dot(a: Coord<Real>, b: Coord<Real>) -> Real {
    a.x * b.x + a.y * b.y
}

/// Parameter ranges of `segment` (in `[0, 1]`) lying collinearly on any line of `mask`.
/// Sorted and merged.
fn covered_intervals(segment: &Line<Real>, mask: &[Line<Real>]) -> Vec<(Real, Real)> {
    let direction = segment.delta();
    let length_sq = dot(direction, direction);
    if length_sq <= 0.0 {
        return Vec::new();
    }
    let length = length_sq.sqrt();
    let eps = tolerance();

    let mut intervals: Vec<(Real, Real)> = mask
        .iter()
        .filter_map(|other| {
            let a = other.start - segment.start;
            let b = other.end - segment.start;
            // distance of both mask endpoints from the segment's supporting line
            if cross(direction, a).abs() / length > eps || cross(direction, b).abs() / length > eps {
                return None;
            }
            let ta = dot(a, direction) / length_sq;
            let tb = dot(b, direction) / length_sq;
            let lo = ta.min(tb).max(0.0);
            let hi = ta.max(tb).min(1.0);
            ((hi - lo) * length > eps).then_some((lo, hi))
        })
        .collect();

    intervals.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(Real, Real)> = Vec::with_capacity(intervals.len());
    for (lo, hi) in intervals {
        match merged.last_mut() {
            Some(last) if lo <= last.1 => last.1 = last.1.max(hi),
            _ => merged.push((lo, hi)),
        }
    }
    merged
}

/// The parts of `[0, 1]` not covered by sorted, disjoint `intervals`.
fn complement(intervals: &[(Real, Real)], eps: Real) -> Vec<(Real, Real)> {
    let mut gaps = Vec::with_capacity(intervals.len() + 1);
    let mut cursor = 0.0;
    for &(lo, hi) in intervals {
        if lo - cursor > eps {
            gaps.push((cursor, lo));
        }
        cursor = hi.max(cursor);
    }
    if 1.0 - cursor > eps {
        gaps.push((cursor, 1.0));
    }
    gaps
}

fn point_at(segment: &Line<Real>, t: Real) -> Coord<Real> {
    if t >= 1.0 {
        return segment.end;
    }
    segment.start + segment.delta() * t
}

/// Cuts `line` into the pieces that do (`Clip::Keep`) or do not
/// (`Clip::Remove`) run along `mask`. Consecutive kept pieces that meet at a
/// vertex are joined back into one polyline.
fn split_by_overlap(line: &LineString<Real>, mask: &[Line<Real>], clip: Clip) -> Vec<LineString<Real>> {
    let mut pieces = Vec::new();
    let mut current: Vec<Coord<Real>> = Vec::new();

    let mut flush = |current: &mut Vec<Coord<Real>>| {
        if current.len() >= 2 {
            pieces.push(LineString::new(std::mem::take(current)));
        } else {
            current.clear();
        }
    };

    for segment in line.lines() {
        let length = segment.delta().x.hypot(segment.delta().y);
        if length <= 0.0 {
            continue;
        }
        let eps = tolerance() / length;
        let covered = covered_intervals(&segment, mask);
        let kept = match clip {
            Clip::Keep => covered,
            Clip::Remove => complement(&covered, eps),
        };
        if kept.is_empty() {
            flush(&mut current);
            continue;
        }
        for (lo, hi) in kept {
            // a piece starting at the segment's first vertex continues the previous one
            if lo > eps || current.is_empty() {
                flush(&mut current);
                current.push(point_at(&segment, lo));
            }
            current.push(point_at(&segment, hi));
            if hi < 1.0 - eps {
                flush(&mut current);
            }
        }
    }
    flush(&mut current);
    pieces
}

/// Unions polylines in order: each contributes only the parts not already
/// laid down by the ones before it.
fn union_lines<'a>(lines: impl IntoIterator<Item = &'a LineString<Real>>) -> Vec<LineString<Real>> {
    let mut laid: Vec<Line<Real>> = Vec::new();
    let mut pieces = Vec::new();
    for line in lines {
        pieces.extend(split_by_overlap(line, &laid, Clip::Remove));
        laid.extend(line.lines());
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    #[test]
    fn overlap_intervals_merge() {
        let segment = Line::new((0.0, 0.0), (10.0, 0.0));
        let mask = vec![
            Line::new((2.0, 0.0), (4.0, 0.0)),
            Line::new((3.0, 0.0), (5.0, 0.0)),
            Line::new((8.0, 0.0), (12.0, 0.0)),
            Line::new((0.0, 1.0), (10.0, 1.0)), // parallel, not collinear
            Line::new((5.0, -1.0), (5.0, 1.0)), // crossing point only
        ];
        let intervals = covered_intervals(&segment, &mask);
        assert_eq!(intervals, vec![(0.2, 0.5), (0.8, 1.0)]);
        assert_eq!(
            complement(&intervals, 1e-12),
            vec![(0.0, 0.2), (0.5, 0.8)]
        );
    }

    #[test]
    fn removal_splits_and_rejoins_at_vertices() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)];
        let mask = vec![Line::new((4.0, 0.0), (6.0, 0.0))];

        let removed = split_by_overlap(&line, &mask, Clip::Remove);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed[0], line_string![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0)]);
        assert_eq!(
            removed[1],
            line_string![(x: 6.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0)]
        );

        let kept = split_by_overlap(&line, &mask, Clip::Keep);
        assert_eq!(kept, vec![line_string![(x: 4.0, y: 0.0), (x: 6.0, y: 0.0)]]);
    }

    #[test]
    fn line_union_drops_repeated_parts() {
        let a = line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)];
        let b = line_string![(x: 5.0, y: 0.0), (x: 15.0, y: 0.0)];
        let pieces = union_lines([&a, &b]);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1], line_string![(x: 10.0, y: 0.0), (x: 15.0, y: 0.0)]);
    }

    #[test]
    fn dissolve_merges_overlapping_squares() {
        let squares: Vec<Polygon<Real>> = [0.0, 5.0, 20.0]
            .iter()
            .map(|&x| {
                geo::polygon![(x: x, y: 0.0), (x: x + 10.0, y: 0.0), (x: x + 10.0, y: 10.0), (x: x, y: 10.0)]
            })
            .collect();
        assert_eq!(dissolve(squares.iter()).0.len(), 2);
        assert!(dissolve(std::iter::empty()).0.is_empty());
    }
}
