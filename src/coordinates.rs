//! Point lattices for placing copies of a drawing.
//!
//! These are plain point lists; client code feeds them to `translate`,
//! `linarray` and friends or turns them into a polygon outline.

use crate::float_types::{FRAC_PI_2, Real, TAU};
use crate::group::Group;
use crate::traits::Transform2D;
use geo::{LineString, Polygon};
use std::fmt::Debug;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Coordinates {
    pub values: Vec<(Real, Real)>,
}

impl FromIterator<(Real, Real)> for Coordinates {
    fn from_iter<I: IntoIterator<Item = (Real, Real)>>(iter: I) -> Self {
        Coordinates {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Coordinates {
    type Item = (Real, Real);
    type IntoIter = std::vec::IntoIter<(Real, Real)>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// `count` evenly spaced values from `start` to `stop`, optionally including `stop`.
fn linspace(start: Real, stop: Real, count: usize, endpoint: bool) -> impl Iterator<Item = Real> {
    let divisions = if endpoint { count.saturating_sub(1) } else { count };
    let step = if divisions == 0 {
        0.0
    } else {
        (stop - start) / divisions as Real
    };
    (0..count).map(move |i| start + step * i as Real)
}

/// Grows `count` by one when its evenness disagrees with `even`.
fn with_parity(count: usize, even: Option<bool>) -> usize {
    match even {
        Some(even) if (count % 2 == 0) != even => count + 1,
        _ => count,
    }
}

impl Coordinates {
    pub fn new(values: Vec<(Real, Real)>) -> Self {
        Coordinates { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Real, Real)> + '_ {
        self.values.iter()
    }

    pub fn offset(&self, dx: Real, dy: Real) -> Self {
        self.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
    }

    pub fn multiply(&self, fx: Real, fy: Real) -> Self {
        self.iter().map(|&(x, y)| (x * fx, y * fy)).collect()
    }

    /// The points as the outline of a single polygon.
    pub fn to_polygon_group<V: Clone + Debug + Send + Sync>(&self) -> Group<V> {
        if self.len() < 3 {
            return Group::new();
        }
        Group::from_polygons([Polygon::new(LineString::from(self.values.clone()), vec![])])
    }

    /// `count` points stepping by `(dx, dy)`, starting at the origin or, with
    /// `centered_on`, centred on that point.
    pub fn linear(count: usize, dx: Real, dy: Real, centered_on: Option<(Real, Real)>) -> Self {
        let span = count.saturating_sub(1) as Real;
        let (x0, y0) = centered_on.map_or((0.0, 0.0), |(cx, cy)| {
            (cx - dx * span / 2.0, cy - dy * span / 2.0)
        });
        (0..count)
            .map(|i| (x0 + dx * i as Real, y0 + dy * i as Real))
            .collect()
    }

    /// Hexagonal lattice, row by row from the bottom.
    ///
    /// Even rows hold `columns` points; odd rows are shifted right by half a
    /// spacing and hold one point fewer. Rows are `spacing·√3/2` apart.
    pub fn hex(columns: usize, rows: usize, spacing: Real, centered_on: Option<(Real, Real)>) -> Self {
        let row_spacing = (0.75 as Real).sqrt() * spacing;
        let (x0, y0) = centered_on.map_or((0.0, 0.0), |(cx, cy)| {
            (
                cx - columns.saturating_sub(1) as Real * spacing / 2.0,
                cy - rows.saturating_sub(1) as Real * row_spacing / 2.0,
            )
        });

        let mut values = Vec::new();
        for row in 0..rows {
            let (count, shift) = if row % 2 == 0 {
                (columns, 0.0)
            } else {
                (columns.saturating_sub(1), spacing / 2.0)
            };
            let y = y0 + row as Real * row_spacing;
            values.extend((0..count).map(|col| (x0 + shift + col as Real * spacing, y)));
        }
        Coordinates { values }
    }

    /// Hexagonal lattice covering the bounding box of `group`, centred on it.
    ///
    /// `even_rows` / `even_columns` force an even (`Some(true)`) or odd
    /// (`Some(false)`) number of rows or columns by adding one where needed.
    /// An empty group, or a spacing that is not positive, gives no points.
    pub fn hex_covering<V: Clone + Debug + Send + Sync>(
        spacing: Real,
        group: &Group<V>,
        even_rows: Option<bool>,
        even_columns: Option<bool>,
    ) -> Self {
        let Some(bounds) = group.bounding_box() else {
            return Coordinates::default();
        };
        // no lattice without a positive spacing
        if spacing.is_nan() || spacing <= 0.0 {
            return Coordinates::default();
        }
        let row_spacing = (0.75 as Real).sqrt() * spacing;
        let columns = with_parity((bounds.width() / spacing).ceil() as usize, even_columns);
        let rows = with_parity((bounds.height() / row_spacing).ceil() as usize, even_rows);
        let center = bounds.center();
        Self::hex(columns, rows, spacing, Some((center.x, center.y)))
    }

    /// `steps` points at radius `radius(θ)` for angles from `theta_start` towards `theta_stop`.
    ///
    /// `theta_stop` itself is included unless both angles point the same way
    /// modulo a quarter turn, so a full circle does not repeat its first point.
    pub fn polar(
        steps: usize,
        mut radius: impl FnMut(Real) -> Real,
        theta_start: Real,
        theta_stop: Real,
    ) -> Self {
        let endpoint = theta_start.rem_euclid(FRAC_PI_2) != theta_stop.rem_euclid(FRAC_PI_2);
        linspace(theta_start, theta_stop, steps, endpoint)
            .map(|theta| {
                let r = radius(theta);
                (r * theta.cos(), r * theta.sin())
            })
            .collect()
    }

    /// [`Coordinates::polar`] over a full turn.
    pub fn circle(steps: usize, radius: Real) -> Self {
        Self::polar(steps, |_| radius, 0.0, TAU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (Real, Real), b: (Real, Real)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn linear_centres_on_point() {
        let c = Coordinates::linear(3, 2.0, 0.0, Some((10.0, 5.0)));
        assert_eq!(c.values, vec![(8.0, 5.0), (10.0, 5.0), (12.0, 5.0)]);
        assert_eq!(Coordinates::linear(2, 1.0, 1.0, None).values, vec![(0.0, 0.0), (1.0, 1.0)]);
    }

    #[test]
    fn hex_odd_rows_are_shorter_and_shifted() {
        let c = Coordinates::hex(3, 2, 2.0, None);
        assert_eq!(c.len(), 5);
        assert!(close(c.values[3], (1.0, (0.75 as Real).sqrt() * 2.0)));
    }

    #[test]
    fn hex_covering_respects_parity() {
        let group = Group::<()>::rect(0.0, 0.0, 3.0, 0.5);
        // 3 columns, 1 row before parity
        assert_eq!(Coordinates::hex_covering(1.0, &group, None, None).len(), 3);
        // even columns: 4 columns, odd row count kept at 1
        assert_eq!(Coordinates::hex_covering(1.0, &group, Some(false), Some(true)).len(), 4);
        assert!(Coordinates::hex_covering(1.0, &Group::<()>::new(), None, None).is_empty());
    }

    #[test]
    fn hex_covering_needs_positive_spacing() {
        let group = Group::<()>::rect(0.0, 0.0, 3.0, 3.0);
        for spacing in [0.0, -1.0, Real::NAN] {
            assert!(Coordinates::hex_covering(spacing, &group, None, None).is_empty());
        }
    }

    #[test]
    fn full_circle_skips_duplicate_endpoint() {
        let c = Coordinates::circle(4, 1.0);
        assert_eq!(c.len(), 4);
        assert!(close(c.values[1], (0.0, 1.0)));
        assert!(close(c.values[3], (0.0, -1.0)));

        let half = Coordinates::polar(3, |_| 2.0, 0.0, 1.0);
        assert!(close(half.values[2], (2.0 * (1.0 as Real).cos(), 2.0 * (1.0 as Real).sin())));
    }

    #[test]
    fn offset_and_multiply_are_pointwise() {
        let c = Coordinates::new(vec![(1.0, 2.0)]).offset(1.0, 1.0).multiply(2.0, 3.0);
        assert_eq!(c.values, vec![(4.0, 9.0)]);
    }

    #[test]
    fn outline_needs_three_points() {
        assert!(Coordinates::linear(2, 1.0, 0.0, None).to_polygon_group::<()>().is_empty());
        let tri = Coordinates::new(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(tri.to_polygon_group::<()>().len(), 1);
    }
}
