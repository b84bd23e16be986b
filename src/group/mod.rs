//! `Group` struct: an immutable, ordered set of same-kind 2D geometries with
//! per-element attributes.
//!
//! Index `i` of the geometry sequence and index `i` of the [`AttributeStore`]
//! always describe the same element. Every operation that changes the number
//! of elements rebuilds both sides together through a [`GroupBuilder`].

use crate::attributes::{AttributeStore, AttributeStoreBuilder, Attributes};
use crate::errors::GroupError;
use crate::float_types::{Real, tolerance};
use crate::traits::Transform2D;
use crate::utils;
use geo::{
    Area, BoundingRect, Centroid, Geometry, GeometryCollection, LineString, MultiLineString,
    MultiPolygon, Point, Polygon, Rect,
};
use std::fmt::{self, Debug, Display};
use std::sync::{Arc, OnceLock};

pub mod boolean;
pub mod compose;
#[cfg(feature = "offset")]
pub mod offset;
pub mod predicates;
pub mod replicate;
pub mod shapes;
pub mod transform;

/// Whether a group holds areas or curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Polygon,
    Polyline,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Polygon => write!(f, "polygon"),
            Kind::Polyline => write!(f, "polyline"),
        }
    }
}

/// The geometry sequence of a group. Shared between groups derived from one another.
#[derive(Clone, Debug, PartialEq)]
pub enum Elements {
    Polygons(Arc<Vec<Polygon<Real>>>),
    Polylines(Arc<Vec<LineString<Real>>>),
}

/// Borrowed view of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Element<'a> {
    Polygon(&'a Polygon<Real>),
    Polyline(&'a LineString<Real>),
}

impl Element<'_> {
    pub const fn kind(&self) -> Kind {
        match self {
            Element::Polygon(_) => Kind::Polygon,
            Element::Polyline(_) => Kind::Polyline,
        }
    }

    pub fn bounding_rect(&self) -> Option<Rect<Real>> {
        match self {
            Element::Polygon(p) => p.bounding_rect(),
            Element::Polyline(l) => l.bounding_rect(),
        }
    }

    pub fn to_geometry(&self) -> Geometry<Real> {
        match self {
            Element::Polygon(p) => Geometry::Polygon((*p).clone()),
            Element::Polyline(l) => Geometry::LineString((*l).clone()),
        }
    }
}

impl Elements {
    pub fn empty(kind: Kind) -> Self {
        match kind {
            Kind::Polygon => Elements::Polygons(Arc::new(Vec::new())),
            Kind::Polyline => Elements::Polylines(Arc::new(Vec::new())),
        }
    }

    pub const fn kind(&self) -> Kind {
        match self {
            Elements::Polygons(_) => Kind::Polygon,
            Elements::Polylines(_) => Kind::Polyline,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Elements::Polygons(p) => p.len(),
            Elements::Polylines(l) => l.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Element<'_>> {
        match self {
            Elements::Polygons(p) => p.get(index).map(Element::Polygon),
            Elements::Polylines(l) => l.get(index).map(Element::Polyline),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Length of a polyline.
pub(crate) fn line_length(line: &LineString<Real>) -> Real {
    line.lines()
        .map(|l| (l.end.x - l.start.x).hypot(l.end.y - l.start.y))
        .sum()
}

pub(crate) fn is_degenerate_polygon(polygon: &Polygon<Real>) -> bool {
    polygon.exterior().0.len() < 3 || polygon.unsigned_area() <= tolerance()
}

pub(crate) fn is_degenerate_polyline(line: &LineString<Real>) -> bool {
    line.0.len() < 2 || line_length(line) <= tolerance()
}

#[derive(Clone, Debug)]
pub struct Group<V: Clone + Debug + Send + Sync> {
    /// Geometry sequence, homogeneous by construction
    pub(crate) elements: Elements,

    /// Attributes, indexed like `elements`
    pub(crate) attributes: AttributeStore<V>,

    /// Lazily calculated bounds of all elements
    pub(crate) bounding_box: OnceLock<Option<Rect<Real>>>,
}

impl<V: Clone + Debug + Send + Sync> Default for Group<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// An empty polygon-kind group.
    pub fn new() -> Self {
        Self::empty(Kind::Polygon)
    }

    /// An empty group of the given kind.
    pub fn empty(kind: Kind) -> Self {
        Self::from_parts(Elements::empty(kind), AttributeStore::new())
    }

    pub(crate) fn from_parts(elements: Elements, attributes: AttributeStore<V>) -> Self {
        debug_assert!(
            attributes.max_index().is_none_or(|max| max < elements.len()),
            "attribute index {:?} outside a group of {} elements",
            attributes.max_index(),
            elements.len()
        );
        Group {
            elements,
            attributes,
            bounding_box: OnceLock::new(),
        }
    }

    /// Same geometry, different attributes. Callers keep the store in range.
    pub(crate) fn with_attribute_store(&self, attributes: AttributeStore<V>) -> Self {
        Self::from_parts(self.elements.clone(), attributes)
    }

    /// Builds a polygon-kind group, dropping zero-area polygons.
    pub fn from_polygons(polygons: impl IntoIterator<Item = Polygon<Real>>) -> Self {
        let mut builder = GroupBuilder::new(Kind::Polygon);
        for polygon in polygons {
            builder.push_polygon_fragment(polygon, None);
        }
        builder.build()
    }

    /// Builds a polyline-kind group, dropping zero-length polylines.
    pub fn from_polylines(polylines: impl IntoIterator<Item = LineString<Real>>) -> Self {
        let mut builder = GroupBuilder::new(Kind::Polyline);
        for line in polylines {
            builder.push_polyline_fragment(line, None);
        }
        builder.build()
    }

    /// Builds a group from arbitrary `geo` geometry.
    ///
    /// Multi-geometries and geometry collections are flattened, `Rect` and
    /// `Triangle` become polygons and `Line` becomes a two-point polyline.
    /// Zero-area and zero-length parts are dropped. All remaining parts must be
    /// of one kind.
    pub fn from_geometries(
        geometries: impl IntoIterator<Item = Geometry<Real>>,
    ) -> Result<Self, GroupError> {
        let flat = utils::flatten(geometries);
        let Some(first) = flat.first() else {
            return Ok(Self::new());
        };
        let mut builder = GroupBuilder::new(geometry_kind(first)?);

        for geometry in flat {
            let kind = geometry_kind(&geometry)?;
            if kind != builder.kind {
                return Err(GroupError::KindMismatch {
                    expected: builder.kind,
                    found: kind,
                });
            }
            match geometry {
                Geometry::Polygon(p) => builder.push_polygon_fragment(p, None),
                Geometry::Rect(r) => builder.push_polygon_fragment(r.to_polygon(), None),
                Geometry::Triangle(t) => builder.push_polygon_fragment(t.to_polygon(), None),
                Geometry::LineString(l) => builder.push_polyline_fragment(l, None),
                Geometry::Line(l) => {
                    builder.push_polyline_fragment(LineString::from(vec![l.start, l.end]), None)
                },
                _ => false,
            };
        }
        Ok(builder.build())
    }

    /// Like [`Group::from_geometries`], attaching an existing attribute store.
    ///
    /// The store is taken as-is: keeping its indices in step with the
    /// flattened, filtered geometry is up to the caller. Only an index past the
    /// end of the result is rejected.
    pub fn from_geometries_with_attributes(
        geometries: impl IntoIterator<Item = Geometry<Real>>,
        attributes: AttributeStore<V>,
    ) -> Result<Self, GroupError> {
        let group = Self::from_geometries(geometries)?;
        if let Some(index) = attributes.max_index() {
            if index >= group.len() {
                return Err(GroupError::IndexOutOfRange {
                    index,
                    len: group.len(),
                });
            }
        }
        Ok(group.with_attribute_store(attributes))
    }

    pub const fn kind(&self) -> Kind {
        self.elements.kind()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub const fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<Element<'_>> {
        self.elements.get(index)
    }

    /// Polygons of a polygon-kind group; empty for polyline groups.
    pub fn polygons(&self) -> &[Polygon<Real>] {
        match &self.elements {
            Elements::Polygons(p) => p,
            Elements::Polylines(_) => &[],
        }
    }

    /// Polylines of a polyline-kind group; empty for polygon groups.
    pub fn polylines(&self) -> &[LineString<Real>] {
        match &self.elements {
            Elements::Polylines(l) => l,
            Elements::Polygons(_) => &[],
        }
    }

    /// Every element with its attributes, in order.
    ///
    /// This plus [`Transform2D::bounding_box`] is all a renderer gets to see.
    pub fn iter(&self) -> impl Iterator<Item = (Element<'_>, Option<&Attributes<V>>)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, element)| (element, self.attributes.lookup(i)))
    }

    /// The attributes of element `index`; empty if it has none.
    pub fn attributes(&self, index: usize) -> Attributes<V> {
        self.attributes.get(index)
    }

    pub const fn attribute_store(&self) -> &AttributeStore<V> {
        &self.attributes
    }

    /// Sets `key` to `value` on every element.
    pub fn add_attribute(&self, key: impl Into<String>, value: V) -> Self {
        let key = key.into();
        let mut builder = self.attributes.to_builder();
        for index in 0..self.len() {
            builder.set(index, key.clone(), value.clone());
        }
        self.with_attribute_store(builder.build())
    }

    /// Sets `key` to `value` on element `index`.
    pub fn set_attribute(
        &self,
        index: usize,
        key: impl Into<String>,
        value: V,
    ) -> Result<Self, GroupError> {
        if index >= self.len() {
            return Err(GroupError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.with_attribute_store(self.attributes.set(index, key, value)))
    }

    /// Element `index` as a group of its own, its attributes renumbered to 0.
    pub fn subgroup(&self, index: usize) -> Option<Self> {
        let element = self.element(index)?;
        let mut builder = GroupBuilder::new(self.kind());
        builder.push_element(element, self.attributes.shared(index));
        Some(builder.build())
    }

    pub fn bounds_x(&self) -> Real {
        self.bounding_box().map_or(0.0, |r| r.min().x)
    }

    pub fn bounds_y(&self) -> Real {
        self.bounding_box().map_or(0.0, |r| r.min().y)
    }

    pub fn bounds_width(&self) -> Real {
        self.bounding_box().map_or(0.0, |r| r.width())
    }

    pub fn bounds_height(&self) -> Real {
        self.bounding_box().map_or(0.0, |r| r.height())
    }

    pub fn bounds_mid_x(&self) -> Real {
        self.bounds_x() + self.bounds_width() / 2.0
    }

    pub fn bounds_mid_y(&self) -> Real {
        self.bounds_y() + self.bounds_height() / 2.0
    }

    pub(crate) fn compute_bounding_box(&self) -> Option<Rect<Real>> {
        *self.bounding_box.get_or_init(|| match &self.elements {
            Elements::Polygons(p) => utils::bounds(p.iter()),
            Elements::Polylines(l) => utils::bounds(l.iter()),
        })
    }

    pub(crate) fn compute_centroid(&self) -> Option<Point<Real>> {
        match &self.elements {
            Elements::Polygons(p) => MultiPolygon(p.to_vec()).centroid(),
            Elements::Polylines(l) => MultiLineString(l.to_vec()).centroid(),
        }
    }

    /// Elements as a `geo` collection, without attributes.
    pub fn to_geometry_collection(&self) -> GeometryCollection<Real> {
        GeometryCollection(self.elements.iter().map(|e| e.to_geometry()).collect())
    }
}

fn geometry_kind(geometry: &Geometry<Real>) -> Result<Kind, GroupError> {
    match geometry {
        Geometry::Polygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => Ok(Kind::Polygon),
        Geometry::LineString(_) | Geometry::Line(_) => Ok(Kind::Polyline),
        Geometry::Point(_) => Err(GroupError::UnsupportedGeometryKind("Point".into())),
        other => Err(GroupError::UnsupportedGeometryKind(format!("{other:?}"))),
    }
}

/// Accumulates elements and their attributes side by side while one
/// operation assembles a new group.
///
/// While nothing has been pushed the builder adopts the kind of the first
/// group appended to it, so an empty group is the identity for concatenation.
pub(crate) struct GroupBuilder<V: Clone + Debug + Send + Sync> {
    kind: Kind,
    polygons: Vec<Polygon<Real>>,
    polylines: Vec<LineString<Real>>,
    attributes: AttributeStoreBuilder<V>,
}

impl<V: Clone + Debug + Send + Sync> GroupBuilder<V> {
    pub(crate) fn new(kind: Kind) -> Self {
        GroupBuilder {
            kind,
            polygons: Vec::new(),
            polylines: Vec::new(),
            attributes: AttributeStoreBuilder::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.polygons.len() + self.polylines.len()
    }

    fn attach(&mut self, index: usize, attributes: Option<Arc<Attributes<V>>>) {
        if let Some(attributes) = attributes {
            self.attributes.insert_shared(index, attributes);
        }
    }

    pub(crate) fn push_element(&mut self, element: Element<'_>, attributes: Option<Arc<Attributes<V>>>) {
        match element {
            Element::Polygon(p) => self.push_polygon(p.clone(), attributes),
            Element::Polyline(l) => self.push_polyline(l.clone(), attributes),
        }
    }

    pub(crate) fn push_polygon(&mut self, polygon: Polygon<Real>, attributes: Option<Arc<Attributes<V>>>) {
        debug_assert!(self.kind == Kind::Polygon || self.len() == 0);
        self.kind = Kind::Polygon;
        let index = self.len();
        self.polygons.push(polygon);
        self.attach(index, attributes);
    }

    pub(crate) fn push_polyline(&mut self, line: LineString<Real>, attributes: Option<Arc<Attributes<V>>>) {
        debug_assert!(self.kind == Kind::Polyline || self.len() == 0);
        self.kind = Kind::Polyline;
        let index = self.len();
        self.polylines.push(line);
        self.attach(index, attributes);
    }

    /// Pushes a polygon unless it has no area. Returns whether it was kept.
    pub(crate) fn push_polygon_fragment(
        &mut self,
        polygon: Polygon<Real>,
        attributes: Option<Arc<Attributes<V>>>,
    ) -> bool {
        if is_degenerate_polygon(&polygon) {
            log::trace!("dropping degenerate polygon fragment: {:?}", polygon.exterior());
            return false;
        }
        self.push_polygon(polygon, attributes);
        true
    }

    /// Pushes a polyline unless it has no length. Returns whether it was kept.
    pub(crate) fn push_polyline_fragment(
        &mut self,
        line: LineString<Real>,
        attributes: Option<Arc<Attributes<V>>>,
    ) -> bool {
        if is_degenerate_polyline(&line) {
            log::trace!("dropping degenerate polyline fragment: {:?}", line);
            return false;
        }
        self.push_polyline(line, attributes);
        true
    }

    /// Appends every element of `group`, offsetting its attribute indices by
    /// the number of elements already pushed.
    pub(crate) fn push_group(&mut self, group: &Group<V>) -> Result<(), GroupError> {
        if group.is_empty() {
            return Ok(());
        }
        if self.len() == 0 {
            self.kind = group.kind();
        } else if self.kind != group.kind() {
            return Err(GroupError::KindMismatch {
                expected: self.kind,
                found: group.kind(),
            });
        }
        let offset = self.len();
        self.attributes.merge_disjoint(&group.attributes, offset)?;
        match &group.elements {
            Elements::Polygons(p) => self.polygons.extend(p.iter().cloned()),
            Elements::Polylines(l) => self.polylines.extend(l.iter().cloned()),
        }
        Ok(())
    }

    pub(crate) fn build(self) -> Group<V> {
        let elements = match self.kind {
            Kind::Polygon => Elements::Polygons(Arc::new(self.polygons)),
            Kind::Polyline => Elements::Polylines(Arc::new(self.polylines)),
        };
        Group::from_parts(elements, self.attributes.build())
    }
}
