//! SVG output for `Group`.
//!
//! The canvas is exactly the group's bounding box and the geometry is shifted
//! so that the box's minimum corner sits at the canvas origin. Every element
//! becomes one `<path>`; its attributes are written onto that path and take
//! precedence over the default stroke style.

use crate::float_types::Real;
use crate::group::{Element, Group};
use crate::traits::Transform2D;
use geo::{Coord, LineString};
use std::fmt::{Debug, Display};
use ::svg::Document;
use ::svg::node::element::path::Data;
use ::svg::node::element::{Path, Rectangle};

/// Knobs for [`ToSVG::to_svg_with`].
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Paint a white rectangle under the drawing
    pub fill_background: bool,
    pub stroke: String,
    pub stroke_width: Real,
}

impl Default for SvgOptions {
    fn default() -> Self {
        SvgOptions {
            fill_background: false,
            stroke: "black".to_string(),
            stroke_width: 1.0,
        }
    }
}

pub trait ToSVG {
    /// Renders with [`SvgOptions::default`].
    fn to_svg(&self) -> String {
        self.to_svg_with(&SvgOptions::default())
    }

    fn to_svg_with(&self, options: &SvgOptions) -> String;
}

fn push_ring(mut data: Data, ring: &LineString<Real>, offset: Coord<Real>, close: bool) -> Data {
    for (i, c) in ring.coords().enumerate() {
        let point = ((c.x - offset.x) as f32, (c.y - offset.y) as f32);
        data = if i == 0 {
            data.move_to(point)
        } else {
            data.line_to(point)
        };
    }
    if close { data.close() } else { data }
}

fn path_data(element: Element<'_>, offset: Coord<Real>) -> Data {
    match element {
        Element::Polygon(polygon) => std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .fold(Data::new(), |data, ring| push_ring(data, ring, offset, true)),
        Element::Polyline(line) => push_ring(Data::new(), line, offset, false),
    }
}

impl<V: Clone + Debug + Display + Send + Sync> ToSVG for Group<V> {
    fn to_svg_with(&self, options: &SvgOptions) -> String {
        let (offset, width, height) = match self.bounding_box() {
            Some(rect) => (rect.min(), rect.width(), rect.height()),
            None => (Coord { x: 0.0, y: 0.0 }, 0.0, 0.0),
        };

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, width, height));

        if options.fill_background {
            document = document.add(
                Rectangle::new()
                    .set("x", 0.0)
                    .set("y", 0.0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", "white"),
            );
        }

        for (element, attributes) in self.iter() {
            let mut path = Path::new()
                .set("fill", "none")
                .set("stroke", options.stroke.as_str())
                .set("stroke-width", options.stroke_width)
                .set("stroke-linejoin", "miter")
                .set("d", path_data(element, offset));
            for (key, value) in attributes.into_iter().flatten() {
                path = path.set(key.as_str(), value.to_string());
            }
            document = document.add(path);
        }

        log::debug!("svg: rendered {} elements on a {}x{} canvas", self.len(), width, height);
        document.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::svg::node::element::path::{Command, Position};
    use geo::{line_string, polygon};

    fn points(data: &Data) -> Vec<(char, Vec<f32>)> {
        data.iter()
            .map(|command| match command {
                Command::Move(Position::Absolute, p) => ('M', p.to_vec()),
                Command::Line(Position::Absolute, p) => ('L', p.to_vec()),
                Command::Close => ('Z', Vec::new()),
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn rings_are_shifted_and_closed() {
        let ring = line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 2.0), (x: 3.0, y: 4.0)];
        let data = push_ring(Data::new(), &ring, Coord { x: 1.0, y: 2.0 }, true);
        assert_eq!(
            points(&data),
            vec![
                ('M', vec![0.0, 0.0]),
                ('L', vec![2.0, 0.0]),
                ('L', vec![2.0, 2.0]),
                ('Z', vec![]),
            ]
        );
    }

    #[test]
    fn polylines_stay_open() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 0.0)];
        let data = path_data(Element::Polyline(&line), Coord { x: 0.0, y: 0.0 });
        assert_eq!(points(&data), vec![('M', vec![0.0, 0.0]), ('L', vec![5.0, 0.0])]);
    }

    #[test]
    fn holes_start_a_new_subpath() {
        let square = polygon![
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0)]],
        ];
        let commands = points(&path_data(Element::Polygon(&square), Coord { x: 0.0, y: 0.0 }));
        let moves = commands.iter().filter(|(c, _)| *c == 'M').count();
        let closes = commands.iter().filter(|(c, _)| *c == 'Z').count();
        assert_eq!((moves, closes), (2, 2));
    }
}
