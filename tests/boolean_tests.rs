mod support;

use shart::{Group, GroupError, Kind, Transform2D};

use crate::support::{EPS, approx_eq, assert_bounds, total_area};

fn square(x: f64, y: f64, size: f64) -> Group<String> {
    Group::rect(x, y, size, size)
}

/// Plus-shaped mask of two bars crossing the middle of a 10x10 square.
fn cross() -> Group<String> {
    Group::rect(4.0, -1.0, 2.0, 12.0)
        .add(&Group::rect(-1.0, 4.0, 12.0, 2.0))
        .unwrap()
}

#[test]
fn difference_splits_and_copies_attributes() {
    let red = square(0.0, 0.0, 10.0).add_attribute("c", "red".to_string());
    let pieces = red.difference(&cross()).unwrap();

    assert_eq!(pieces.len(), 4);
    for i in 0..4 {
        assert_eq!(pieces.attributes(i)["c"], "red");
    }
    assert!(approx_eq(total_area(&pieces), 4.0 * 16.0, EPS));
    // the source is untouched
    assert_eq!(red.len(), 1);
}

#[test]
fn difference_can_erase_an_element_and_its_attributes() {
    let a = square(0.0, 0.0, 1.0).add_attribute("id", "a".to_string());
    let b = square(5.0, 0.0, 1.0).add_attribute("id", "b".to_string());
    let group = a.add(&b).unwrap();

    let left = group.difference(&square(-1.0, -1.0, 3.0)).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left.attributes(0)["id"], "b");

    assert_eq!(group.difference(&Group::new()).unwrap().len(), 2);
}

#[test]
fn intersection_clips_each_element_separately() {
    let a = square(0.0, 0.0, 4.0).add_attribute("id", "a".to_string());
    let b = square(6.0, 0.0, 4.0).add_attribute("id", "b".to_string());
    let group = a.add(&b).unwrap();

    // the mask overlaps both, and is itself two overlapping pieces
    let mask = Group::rect(2.0, 0.0, 6.0, 2.0)
        .add(&Group::rect(3.0, 0.0, 2.0, 2.0))
        .unwrap();
    let clipped = group.intersection(&mask).unwrap();

    assert_eq!(clipped.len(), 2);
    assert_eq!(clipped.attributes(0)["id"], "a");
    assert_eq!(clipped.attributes(1)["id"], "b");
    assert!(approx_eq(total_area(&clipped), 8.0, EPS));

    assert!(group.intersection(&Group::new()).unwrap().is_empty());
}

#[test]
fn touching_intersection_is_dropped() {
    let a = square(0.0, 0.0, 1.0);
    let b = square(1.0, 0.0, 1.0);
    assert!(a.intersection(&b).unwrap().is_empty());
}

#[test]
fn union_all_merges_overlaps() {
    let base = square(0.0, 0.0, 10.0);
    let merged = base.add(&base.translate(5.0, 0.0)).unwrap().union_all();

    assert_eq!(merged.len(), 1);
    assert_bounds(&merged, [0.0, 0.0, 15.0, 10.0]);
    assert!(approx_eq(total_area(&merged), 150.0, EPS));
}

#[test]
fn union_all_is_idempotent() {
    let group = square(0.0, 0.0, 2.0)
        .add(&square(1.0, 1.0, 2.0))
        .unwrap()
        .add(&square(10.0, 10.0, 1.0))
        .unwrap()
        .add_attribute("k", "v".to_string());
    let once = group.union_all();
    let twice = once.union_all();

    assert_eq!(once.len(), 2);
    assert_eq!(twice.len(), once.len());
    assert!(approx_eq(total_area(&once), total_area(&twice), EPS));
    assert_eq!(once.attributes(0), twice.attributes(0));
    assert_eq!(once.attributes(1)["k"], "v");
}

#[test]
fn union_merges_attributes_last_write_wins() {
    let a: Group<i32> = Group::rect(0.0, 0.0, 2.0, 2.0).add_attribute("a", 1);
    let b: Group<i32> = Group::rect(1.0, 0.0, 2.0, 2.0)
        .add_attribute("a", 2)
        .add_attribute("b", 3);
    let merged = a.union(&b).unwrap();

    assert_eq!(merged.len(), 1);
    let attributes = merged.attributes(0);
    assert_eq!(attributes["a"], 2);
    assert_eq!(attributes["b"], 3);
}

#[test]
fn union_with_single_element_keeps_elements_apart() {
    let row = square(0.0, 0.0, 1.0)
        .add_attribute("id", "left".to_string())
        .add(&square(10.0, 0.0, 1.0).add_attribute("id", "right".to_string()))
        .unwrap();
    let stamp = square(0.5, 0.0, 1.0).add_attribute("stamp", "yes".to_string());

    let result = row.union(&stamp).unwrap();
    // left grows, right becomes two disjoint pieces
    assert_eq!(result.len(), 3);
    assert_eq!(result.attributes(0)["id"], "left");
    assert!(result.explode().all(|g| g.attributes(0)["stamp"] == "yes"));
    assert!(approx_eq(result.element(0).and_then(|e| e.bounding_rect()).unwrap().width(), 1.5, EPS));
}

#[test]
fn union_with_empty_sides() {
    let a = square(0.0, 0.0, 1.0);
    assert_eq!(a.union(&Group::new()).unwrap().len(), 1);
    assert_eq!(Group::new().union(&a).unwrap().len(), 1);
    assert!(Group::<String>::new().union_all().is_empty());
}

#[test]
fn booleans_reject_mixed_kinds() {
    let polygons = square(0.0, 0.0, 1.0);
    let lines: Group<String> = Group::line(0.0, 0.0, 1.0, 1.0);
    for result in [
        polygons.union(&lines),
        polygons.intersection(&lines),
        polygons.difference(&lines),
    ] {
        assert!(matches!(result, Err(GroupError::KindMismatch { .. })));
    }
}

#[test]
fn polyline_difference_cuts_out_overlap() {
    let line: Group<String> =
        Group::line(0.0, 0.0, 10.0, 0.0).add_attribute("id", "l".to_string());
    let cutter = Group::line(4.0, 0.0, 6.0, 0.0);
    let pieces = line.difference(&cutter).unwrap();

    assert_eq!(pieces.kind(), Kind::Polyline);
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces.attributes(1)["id"], "l");
    assert_bounds(&pieces, [0.0, 0.0, 10.0, 0.0]);
}

#[test]
fn polyline_intersection_keeps_shared_runs_only() {
    let line: Group<String> = Group::line(0.0, 0.0, 10.0, 0.0);
    let other = Group::line(5.0, 0.0, 20.0, 0.0)
        .add(&Group::line(2.0, -1.0, 2.0, 1.0))
        .unwrap();
    let shared = line.intersection(&other).unwrap();

    assert_eq!(shared.len(), 1);
    assert_bounds(&shared, [5.0, 0.0, 10.0, 0.0]);
}

#[test]
fn polyline_union_dissolves_overlaps() {
    let a: Group<String> = Group::line(0.0, 0.0, 10.0, 0.0);
    let b = Group::line(5.0, 0.0, 15.0, 0.0);
    let merged = a.add(&b).unwrap().union_all();

    assert_eq!(merged.len(), 2);
    let length: f64 = merged
        .polylines()
        .iter()
        .flat_map(|l| l.lines())
        .map(|s| (s.end.x - s.start.x).hypot(s.end.y - s.start.y))
        .sum();
    assert!(approx_eq(length, 15.0, EPS));
}
