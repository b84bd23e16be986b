//! Primitive shapes as single-element `Group`s

use crate::errors::GroupError;
use crate::float_types::{EPSILON, FRAC_PI_2, PI, Real, TAU};
use crate::group::{Group, Kind};
use crate::traits::Transform2D;
use geo::{LineString, Polygon, coord, line_string};
use std::fmt::Debug;

/// Default arc resolution: at least one circle step per half unit of quarter arc.
pub const DEFAULT_RESOLUTION: Real = 0.5;

/// Number of steps per quarter circle so that no step spans more than
/// `resolution` units of arc-quarter length.
pub fn quarter_circle_steps(diameter: Real, resolution: Real) -> usize {
    let steps = (PI * diameter * 0.25 / resolution).ceil();
    if steps.is_finite() && steps >= 1.0 {
        steps as usize
    } else {
        1
    }
}

/// Regular polygon approximating the circle of `radius` around `(cx, cy)`,
/// with a vertex on each axis.
pub(crate) fn disc(cx: Real, cy: Real, radius: Real, resolution: Real) -> Polygon<Real> {
    let segments = 4 * quarter_circle_steps(2.0 * radius, resolution);
    let coords: Vec<(Real, Real)> = (0..=segments)
        .map(|i| {
            // the last step lands back on the first vertex
            let theta = TAU * ((i % segments) as Real) / (segments as Real);
            (cx + radius * theta.cos(), cy + radius * theta.sin())
        })
        .collect();
    Polygon::new(LineString::from(coords), vec![])
}

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// Axis-aligned rectangle with its minimum corner at `(x, y)`.
    ///
    /// # Example
    /// ```
    /// use shart::Group;
    /// let r = Group::<()>::rect(0.0, 0.0, 10.0, 5.0);
    /// assert_eq!(r.len(), 1);
    /// ```
    pub fn rect(x: Real, y: Real, width: Real, height: Real) -> Self {
        let outer = line_string![
            (x: x,         y: y),
            (x: x + width, y: y),
            (x: x + width, y: y + height),
            (x: x,         y: y + height),
            (x: x,         y: y), // close explicitly
        ];
        Self::from_polygons([Polygon::new(outer, vec![])])
    }

    /// Rectangle centred on `(cx, cy)`.
    pub fn rect_centered(cx: Real, cy: Real, width: Real, height: Real) -> Self {
        Self::rect(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Circle approximated by a regular polygon.
    ///
    /// Each quarter of the circle gets `max(1, ceil(π·diameter/4 / resolution))`
    /// steps, so smaller `resolution` means a finer outline.
    pub fn circle(cx: Real, cy: Real, diameter: Real, resolution: Real) -> Self {
        Self::from_polygons([disc(cx, cy, diameter / 2.0, resolution)])
    }

    /// Straight polyline from `(x0, y0)` to `(x1, y1)`.
    pub fn line(x0: Real, y0: Real, x1: Real, y1: Real) -> Self {
        Self::from_polylines([line_string![(x: x0, y: y0), (x: x1, y: y1)]])
    }

    /// Polygon through `points`, closed automatically.
    pub fn polygon(points: &[[Real; 2]]) -> Self {
        if points.len() < 3 {
            return Self::new();
        }
        let coords: Vec<(Real, Real)> = points.iter().map(|p| (p[0], p[1])).collect();
        // Polygon::new closes the exterior ring
        Self::from_polygons([Polygon::new(LineString::from(coords), vec![])])
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[[Real; 2]]) -> Self {
        let coords: Vec<(Real, Real)> = points.iter().map(|p| (p[0], p[1])).collect();
        Self::from_polylines([LineString::from(coords)])
    }

    /// Rectangle with rounded corners, minimum corner at `(x, y)`.
    /// Each 90° corner is approximated with `corner_segments` steps.
    pub fn rounded_rect(
        x: Real,
        y: Real,
        width: Real,
        height: Real,
        corner_radius: Real,
        corner_segments: usize,
    ) -> Self {
        let r = corner_radius.min(width * 0.5).min(height * 0.5);
        if r <= EPSILON || corner_segments == 0 {
            return Self::rect(x, y, width, height);
        }
        let step = FRAC_PI_2 / corner_segments as Real;

        let corner = |cx: Real, cy: Real, start_angle: Real| {
            (0..=corner_segments).map(move |i| {
                let angle = start_angle + (i as Real) * step;
                coord! { x: cx + r * angle.cos(), y: cy + r * angle.sin() }
            })
        };

        let coords: Vec<_> = corner(x + r, y + r, PI) // bottom-left
            .chain(corner(x + width - r, y + r, 1.5 * PI)) // bottom-right
            .chain(corner(x + width - r, y + height - r, 0.0)) // top-right
            .chain(corner(x + r, y + height - r, 0.5 * PI)) // top-left
            .collect();

        Self::from_polygons([Polygon::new(LineString::new(coords), vec![])])
    }

    /// Adds a rounded frame around the whole group.
    ///
    /// The frame encloses the bounding box grown by `thickness` on every
    /// side, with corners of `radius`. Polyline groups get the frame's outline.
    pub fn border(&self, thickness: Real, radius: Real) -> Result<Self, GroupError> {
        let bounds = self
            .bounding_box()
            .ok_or(GroupError::EmptyOperation("border"))?;
        let frame = Self::rounded_rect(
            bounds.min().x - thickness,
            bounds.min().y - thickness,
            bounds.width() + 2.0 * thickness,
            bounds.height() + 2.0 * thickness,
            radius,
            quarter_circle_steps(2.0 * radius, DEFAULT_RESOLUTION),
        );
        let frame = match self.kind() {
            Kind::Polygon => frame,
            Kind::Polyline => frame.to_boundary()?,
        };
        self.add(&frame)
    }
}
