//! Spatial predicates between groups. Attributes play no part here.

use crate::group::{Element, Group};
use geo::Relate;
use geo::algorithm::relate::IntersectionMatrix;
use std::fmt::Debug;

fn relate(a: Element<'_>, b: Element<'_>) -> IntersectionMatrix {
    match (a, b) {
        (Element::Polygon(a), Element::Polygon(b)) => a.relate(b),
        (Element::Polygon(a), Element::Polyline(b)) => a.relate(b),
        (Element::Polyline(a), Element::Polygon(b)) => a.relate(b),
        (Element::Polyline(a), Element::Polyline(b)) => a.relate(b),
    }
}

impl<V: Clone + Debug + Send + Sync> Group<V> {
    /// True when a single element of `self` covers every element of `other`.
    ///
    /// An empty `self` covers nothing, not even an empty `other`.
    pub fn covers<W: Clone + Debug + Send + Sync>(&self, other: &Group<W>) -> bool {
        self.elements.iter().any(|mine| {
            other
                .elements
                .iter()
                .all(|theirs| relate(mine, theirs).is_covers())
        })
    }

    /// Like [`Group::covers`], but no covered element may cross the coverer's boundary.
    pub fn contains<W: Clone + Debug + Send + Sync>(&self, other: &Group<W>) -> bool {
        self.elements.iter().any(|mine| {
            other.elements.iter().all(|theirs| {
                let matrix = relate(mine, theirs);
                matrix.is_covers() && !matrix.is_crosses()
            })
        })
    }

    /// True when any element of `self` intersects any element of `other`.
    pub fn intersects<W: Clone + Debug + Send + Sync>(&self, other: &Group<W>) -> bool {
        self.elements.iter().any(|mine| {
            other
                .elements
                .iter()
                .any(|theirs| relate(mine, theirs).is_intersects())
        })
    }
}
