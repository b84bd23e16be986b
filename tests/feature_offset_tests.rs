#![cfg(feature = "offset")]

mod support;

use shart::{CapStyle, Group, JoinStyle, Kind, float_types::PI};

use crate::support::{EPS, approx_eq, assert_bounds, total_area};

#[test]
fn mitre_buffer_grows_square_by_distance() {
    let square: Group<()> = Group::rect(0.0, 0.0, 10.0, 10.0);
    let grown = square.buffer(1.0, JoinStyle::Mitre, CapStyle::Round).unwrap();
    assert_eq!(grown.len(), 1);
    assert_bounds(&grown, [-1.0, -1.0, 11.0, 11.0]);
}

#[test]
fn round_buffer_cuts_corners() {
    let square: Group<()> = Group::rect(0.0, 0.0, 10.0, 10.0);
    let grown = square.buffer(1.0, JoinStyle::Round, CapStyle::Round).unwrap();
    let area = total_area(&grown);
    // strictly between the mitred square and the inscribed offset area
    assert!(area < 144.0 - EPS);
    assert!(area > 100.0 + 40.0);
}

#[test]
fn buffer_merges_neighbours_and_their_attributes() {
    let a: Group<String> = Group::rect(0.0, 0.0, 4.0, 4.0).add_attribute("a", "1".into());
    let b = Group::rect(5.0, 0.0, 4.0, 4.0).add_attribute("b", "2".into());
    let grown = a
        .add(&b)
        .unwrap()
        .buffer(1.0, JoinStyle::Mitre, CapStyle::Round)
        .unwrap();

    assert_eq!(grown.len(), 1);
    assert_eq!(grown.attributes(0)["a"], "1");
    assert_eq!(grown.attributes(0)["b"], "2");
}

#[test]
fn negative_buffer_shrinks() {
    let square: Group<()> = Group::rect(0.0, 0.0, 10.0, 10.0);
    let shrunk = square.buffer(-1.0, JoinStyle::Mitre, CapStyle::Round).unwrap();
    assert!(approx_eq(shrunk.bounds_width(), 8.0, 1e-6));
}

#[test]
fn empty_group_buffers_to_itself() {
    assert!(
        Group::<()>::new()
            .buffer(1.0, JoinStyle::Round, CapStyle::Round)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn flat_caps_stop_at_line_ends() {
    let line: Group<()> = Group::line(0.0, 0.0, 10.0, 0.0);
    let stroke = line.buffer(1.0, JoinStyle::Round, CapStyle::Flat).unwrap();

    assert_eq!(stroke.kind(), Kind::Polygon);
    assert_eq!(stroke.len(), 1);
    assert_bounds(&stroke, [0.0, -1.0, 10.0, 1.0]);
    assert!(approx_eq(total_area(&stroke), 20.0, 1e-6));
}

#[test]
fn square_caps_reach_past_line_ends() {
    let line: Group<()> = Group::line(0.0, 0.0, 10.0, 0.0);
    let stroke = line.buffer(1.0, JoinStyle::Round, CapStyle::Square).unwrap();
    assert_bounds(&stroke, [-1.0, -1.0, 11.0, 1.0]);
    assert!(approx_eq(total_area(&stroke), 24.0, 1e-6));
}

#[test]
fn round_caps_add_a_disc() {
    let line: Group<()> = Group::line(0.0, 0.0, 10.0, 0.0);
    let stroke = line.buffer(1.0, JoinStyle::Round, CapStyle::Round).unwrap();
    assert_bounds(&stroke, [-1.0, -1.0, 11.0, 1.0]);

    // the cap discs are polygons inscribed in the true circle
    let area = total_area(&stroke);
    assert!(area > 20.0 + 3.0);
    assert!(area < 20.0 + PI + EPS);
}

#[test]
fn mitre_join_fills_the_outer_corner() {
    let elbow: Group<()> = Group::polyline(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
    let mitred = elbow.buffer(1.0, JoinStyle::Mitre, CapStyle::Flat).unwrap();
    assert_eq!(mitred.len(), 1);
    assert_bounds(&mitred, [0.0, -1.0, 11.0, 10.0]);
    assert!(approx_eq(total_area(&mitred), 40.0, 1e-6));

    let rounded = elbow.buffer(1.0, JoinStyle::Round, CapStyle::Flat).unwrap();
    let area = total_area(&rounded);
    assert!(area > 39.0 && area < 40.0 - EPS);
}

#[test]
fn stroked_lines_merge_with_their_attributes() {
    let a: Group<String> = Group::line(0.0, 0.0, 10.0, 0.0).add_attribute("a", "1".into());
    let b = Group::line(5.0, -5.0, 5.0, 5.0).add_attribute("b", "2".into());
    let cross = a
        .add(&b)
        .unwrap()
        .buffer(0.5, JoinStyle::Round, CapStyle::Flat)
        .unwrap();

    assert_eq!(cross.len(), 1);
    assert_eq!(cross.attributes(0)["a"], "1");
    assert_eq!(cross.attributes(0)["b"], "2");
    // two 1-wide bands sharing a unit square
    assert!(approx_eq(total_area(&cross), 19.0, 1e-6));
}

#[test]
fn non_positive_distance_erases_polylines() {
    let line: Group<()> = Group::line(0.0, 0.0, 10.0, 0.0);
    for distance in [0.0, -1.0] {
        let stroke = line.buffer(distance, JoinStyle::Round, CapStyle::Round).unwrap();
        assert!(stroke.is_empty());
        assert_eq!(stroke.kind(), Kind::Polygon);
    }
}
