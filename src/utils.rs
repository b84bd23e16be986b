//! Free-standing geometry helpers used by [`Group`](crate::group::Group).

use crate::float_types::{Real, TAU};
use geo::{BoundingRect, Geometry, Rect, coord};

/// Recursively expands multi-geometries and geometry collections into their
/// simple parts, keeping the input order.
pub fn flatten(geometries: impl IntoIterator<Item = Geometry<Real>>) -> Vec<Geometry<Real>> {
    let mut flat = Vec::new();
    let mut stack: Vec<Geometry<Real>> = geometries.into_iter().collect();
    stack.reverse();

    // explicit stack so deeply nested collections cannot overflow
    while let Some(geometry) = stack.pop() {
        match geometry {
            Geometry::MultiPolygon(mp) => {
                stack.extend(mp.0.into_iter().rev().map(Geometry::Polygon));
            },
            Geometry::MultiLineString(mls) => {
                stack.extend(mls.0.into_iter().rev().map(Geometry::LineString));
            },
            Geometry::MultiPoint(mp) => {
                stack.extend(mp.0.into_iter().rev().map(Geometry::Point));
            },
            Geometry::GeometryCollection(gc) => {
                stack.extend(gc.0.into_iter().rev());
            },
            simple => flat.push(simple),
        }
    }
    flat
}

/// Smallest rectangle enclosing every geometry in `geometries`.
pub fn bounds<'a, G>(geometries: impl IntoIterator<Item = &'a G>) -> Option<Rect<Real>>
where
    G: BoundingRect<Real, Output = Option<Rect<Real>>> + 'a,
{
    geometries
        .into_iter()
        .filter_map(|g| g.bounding_rect())
        .reduce(|a, b| {
            Rect::new(
                coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}

/// Translation that moves the bounding box's minimum corner to the origin.
///
/// Empty input needs no translation.
pub fn anchor_offset<'a, G>(geometries: impl IntoIterator<Item = &'a G>) -> (Real, Real)
where
    G: BoundingRect<Real, Output = Option<Rect<Real>>> + 'a,
{
    bounds(geometries).map_or((0.0, 0.0), |rect| (-rect.min().x, -rect.min().y))
}

/// `count` points evenly spaced on a circle of `radius` around the origin,
/// starting at angle 0, as `(x, y, angle)`. The closing point at 2π is not repeated.
pub fn circular_array_placements(radius: Real, count: usize) -> Vec<(Real, Real, Real)> {
    (0..count)
        .map(|i| {
            let angle = TAU * (i as Real) / (count as Real);
            (radius * angle.cos(), radius * angle.sin(), angle)
        })
        .collect()
}
