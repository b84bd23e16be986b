use crate::float_types::Real;
use geo::{Point, Rect};
use nalgebra::{Matrix3, Rotation2, Translation2, Vector2};

/// Reference point for scaling and rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Origin {
    /// Centre of the bounding box
    Center,
    /// Area (or length) weighted centroid
    Centroid,
    /// An explicit point
    Point(Real, Real),
}

/// Affine transformations in the XY plane.
///
/// Implementors supply [`transform`](Transform2D::transform) plus bounds and
/// centroid queries; everything else is expressed through them.
pub trait Transform2D: Sized + Clone {
    /// Applies a homogeneous 2D matrix to every coordinate.
    fn transform(&self, matrix: &Matrix3<Real>) -> Self;
    fn bounding_box(&self) -> Option<Rect<Real>>;
    fn centroid(&self) -> Option<Point<Real>>;

    /// Resolves `origin` against this shape; `None` when the shape is empty.
    fn origin_point(&self, origin: Origin) -> Option<(Real, Real)> {
        match origin {
            Origin::Center => self.bounding_box().map(|r| {
                let c = r.center();
                (c.x, c.y)
            }),
            Origin::Centroid => self.centroid().map(|p| (p.x(), p.y())),
            Origin::Point(x, y) => Some((x, y)),
        }
    }

    /// Returns a new Self translated by `dx` and `dy`.
    fn translate(&self, dx: Real, dy: Real) -> Self {
        self.transform(&Translation2::new(dx, dy).to_homogeneous())
    }

    /// Scales by `sx`, `sy` about `origin`.
    fn scale(&self, sx: Real, sy: Real, origin: Origin) -> Self {
        let Some((ox, oy)) = self.origin_point(origin) else {
            return self.clone();
        };
        let to_origin = Translation2::new(-ox, -oy).to_homogeneous();
        let back = Translation2::new(ox, oy).to_homogeneous();
        let scaling = Matrix3::new_nonuniform_scaling(&Vector2::new(sx, sy));
        self.transform(&(back * scaling * to_origin))
    }

    /// Rotates counter-clockwise by `angle` radians about `origin`.
    fn rotate(&self, angle: Real, origin: Origin) -> Self {
        let Some((ox, oy)) = self.origin_point(origin) else {
            return self.clone();
        };
        let to_origin = Translation2::new(-ox, -oy).to_homogeneous();
        let back = Translation2::new(ox, oy).to_homogeneous();
        let rotation = Rotation2::new(angle).to_homogeneous();
        self.transform(&(back * rotation * to_origin))
    }

    /// Mirrors left-to-right about the vertical line through the bounding-box centre.
    fn mirror_x(&self) -> Self {
        self.scale(-1.0, 1.0, Origin::Center)
    }

    /// Mirrors top-to-bottom about the horizontal line through the bounding-box centre.
    fn mirror_y(&self) -> Self {
        self.scale(1.0, -1.0, Origin::Center)
    }

    /// Returns a new Self translated so that its bounding-box center is at the origin (0,0).
    fn center(&self) -> Self {
        match self.bounding_box() {
            Some(rect) => {
                let c = rect.center();
                self.translate(-c.x, -c.y)
            },
            None => self.clone(),
        }
    }

    /// Translates so that the bounding box's minimum corner sits at the origin.
    fn anchor(&self) -> Self {
        match self.bounding_box() {
            Some(rect) => self.translate(-rect.min().x, -rect.min().y),
            None => self.clone(),
        }
    }
}
