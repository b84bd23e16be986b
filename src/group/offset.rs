//! Growing and shrinking groups.
//!
//! Polygon groups are offset with `geo-buf`. Polyline groups are stroked: every
//! segment becomes a band of half-width `distance`, closed off by the chosen
//! caps and joins. Buffered outlines of neighbouring elements may run into each
//! other, so the pieces are dissolved and the result follows the attribute
//! policy of [`Group::union_all`]: every piece carries the merged attributes
//! of all elements.

use crate::errors::GroupError;
use crate::float_types::{EPSILON, Real};
use crate::group::boolean::dissolve;
use crate::group::shapes::{DEFAULT_RESOLUTION, disc};
use crate::group::{Group, GroupBuilder, Kind};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use geo_buf::{buffer_multi_polygon, buffer_multi_polygon_rounded};
use std::fmt::Debug;
use std::sync::Arc;

/// Longest mitre, as a multiple of the distance, before a corner is bevelled.
const MITRE_LIMIT: Real = 4.0;

/// How offset edges are joined at convex corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JoinStyle {
    /// circular arcs around the original vertex
    #[default]
    Round,
    /// offset edges extended until they meet
    Mitre,
}

/// How the open ends of a buffered polyline are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CapStyle {
    /// half disc around the end point
    #[default]
    Round,
    /// cut square at the end point
    Flat,
    /// cut square `distance` past the end point
    Square,
}

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// Offsets the outline of the whole group by `distance` and returns a
    /// polygon group.
    ///
    /// Polygon groups grow, or shrink for negative `distance`. Polylines are
    /// turned into outlines `2 * distance` wide, finished with `cap` at open
    /// ends; a polyline has no inside to shrink, so a non-positive distance
    /// leaves nothing.
    pub fn buffer(
        &self,
        distance: Real,
        join: JoinStyle,
        cap: CapStyle,
    ) -> Result<Self, GroupError> {
        if self.is_empty() {
            return Ok(self.clone());
        }

        let buffered = match self.kind() {
            Kind::Polygon => {
                let outline = dissolve(self.polygons().iter());
                match join {
                    JoinStyle::Round => buffer_multi_polygon_rounded(&outline, distance),
                    JoinStyle::Mitre => buffer_multi_polygon(&outline, distance),
                }
            },
            Kind::Polyline if distance <= 0.0 => MultiPolygon::new(Vec::new()),
            Kind::Polyline => {
                let parts: Vec<Polygon<Real>> = self
                    .polylines()
                    .iter()
                    .flat_map(|line| stroke_parts(line, distance, join, cap))
                    .collect();
                dissolve(parts.iter())
            },
        };

        let merged = self.attributes.fold_all();
        let attributes = (!merged.is_empty()).then(|| Arc::new(merged));
        let mut builder = GroupBuilder::new(Kind::Polygon);
        for piece in buffered {
            builder.push_polygon_fragment(piece, attributes.clone());
        }
        let result = builder.build();
        log::debug!(
            "buffer: {} {:?} elements by {} ({:?}, {:?}) -> {} pieces",
            self.len(),
            self.kind(),
            distance,
            join,
            cap,
            result.len()
        );
        Ok(result)
    }
}

/// Overlapping polygons whose union is the stroke of `line`.
fn stroke_parts(
    line: &LineString<Real>,
    distance: Real,
    join: JoinStyle,
    cap: CapStyle,
) -> Vec<Polygon<Real>> {
    let mut points: Vec<Coord<Real>> = Vec::with_capacity(line.0.len());
    for &c in line.coords() {
        if points.last().is_none_or(|last| length(c - *last) > EPSILON) {
            points.push(c);
        }
    }
    let closed = points.len() > 3 && length(points[0] - points[points.len() - 1]) <= EPSILON;
    if closed {
        points.pop();
    }

    let mut parts = Vec::new();
    match points.as_slice() {
        [] => return parts,
        [p] => {
            match cap {
                CapStyle::Round => parts.push(disc(p.x, p.y, distance, DEFAULT_RESOLUTION)),
                CapStyle::Square => parts.push(band(
                    *p - Coord { x: distance, y: 0.0 },
                    *p + Coord { x: distance, y: 0.0 },
                    distance,
                )),
                CapStyle::Flat => {},
            }
            return parts;
        },
        _ => {},
    }

    let segment_count = if closed { points.len() } else { points.len() - 1 };
    let segment = |i: usize| (points[i], points[(i + 1) % points.len()]);

    for i in 0..segment_count {
        let (mut a, mut b) = segment(i);
        if !closed && cap == CapStyle::Square {
            let u = unit(b - a);
            if i == 0 {
                a = a - u * distance;
            }
            if i == segment_count - 1 {
                b = b + u * distance;
            }
        }
        parts.push(band(a, b, distance));
    }

    if !closed && cap == CapStyle::Round {
        for end in [points[0], points[points.len() - 1]] {
            parts.push(disc(end.x, end.y, distance, DEFAULT_RESOLUTION));
        }
    }

    // corners between consecutive segments; a closed ring also joins its last
    // segment back to the first
    let corners = if closed { 0..segment_count } else { 1..segment_count };
    for i in corners {
        let (before, vertex) = segment((i + segment_count - 1) % segment_count);
        let (_, after) = segment(i);
        match join {
            JoinStyle::Round => parts.push(disc(vertex.x, vertex.y, distance, DEFAULT_RESOLUTION)),
            JoinStyle::Mitre => parts.extend(mitre(before, vertex, after, distance)),
        }
    }
    parts
}

/// Rectangle of half-width `distance` around the segment `a`-`b`.
fn band(a: Coord<Real>, b: Coord<Real>, distance: Real) -> Polygon<Real> {
    let n = normal(b - a) * distance;
    Polygon::new(LineString::from(vec![a + n, b + n, b - n, a - n, a + n]), vec![])
}

/// Fills the gap on the outer side of the corner at `vertex`. Corners sharper
/// than [`MITRE_LIMIT`] are bevelled.
fn mitre(
    before: Coord<Real>,
    vertex: Coord<Real>,
    after: Coord<Real>,
    distance: Real,
) -> Option<Polygon<Real>> {
    let u1 = unit(vertex - before);
    let u2 = unit(after - vertex);
    let turn = u1.x * u2.y - u1.y * u2.x;
    if turn.abs() <= EPSILON {
        return None;
    }
    // a left turn opens the gap on the right-hand side
    let side = if turn > 0.0 { -1.0 } else { 1.0 };
    let n1 = normal(u1) * side;
    let n2 = normal(u2) * side;
    let p1 = vertex + n1 * distance;
    let p2 = vertex + n2 * distance;

    let bisector = n1 + n2;
    let squared = bisector.x * bisector.x + bisector.y * bisector.y;
    let ring = if squared > EPSILON && 2.0 / squared.sqrt() <= MITRE_LIMIT {
        let tip = vertex + bisector * (2.0 * distance / squared);
        vec![vertex, p1, tip, p2, vertex]
    } else {
        vec![vertex, p1, p2, vertex]
    };
    Some(Polygon::new(LineString::from(ring), vec![]))
}

fn length(v: Coord<Real>) -> Real {
    v.x.hypot(v.y)
}

fn unit(v: Coord<Real>) -> Coord<Real> {
    v / length(v)
}

/// Left-hand unit normal of `v`.
fn normal(v: Coord<Real>) -> Coord<Real> {
    let u = unit(v);
    Coord { x: -u.y, y: u.x }
}
