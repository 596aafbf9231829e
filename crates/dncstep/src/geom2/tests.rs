use super::*;

#[test]
fn point_set_rejects_duplicate_ids() {
    let pts = vec![Point::new(1, 0.0, 0.0), Point::new(1, 2.0, 2.0)];
    assert_eq!(
        PointSet::new(pts).unwrap_err(),
        InputError::DuplicateId { id: PointId(1) }
    );
}

#[test]
fn point_set_rejects_non_finite() {
    let pts = vec![Point::new(0, 0.0, 0.0), Point::new(7, f64::NAN, 1.0)];
    assert_eq!(
        PointSet::new(pts).unwrap_err(),
        InputError::NonFinite { id: PointId(7) }
    );
    assert!(PointSet::from_xy(&[(f64::INFINITY, 0.0)]).is_err());
}

#[test]
fn point_set_lookup_and_append() {
    let pts = PointSet::new(vec![Point::new(5, 1.0, 2.0), Point::new(2, 3.0, 4.0)]).unwrap();
    assert_eq!(pts[PointId(2)].x(), 3.0);
    assert_eq!(pts.get(PointId(9)), None);
    assert_eq!(pts.ids(), vec![PointId(5), PointId(2)]);
    assert_eq!(pts.next_id(), Some(PointId(6)));
    assert_eq!(PointSet::default().next_id(), Some(PointId(0)));

    let more = pts.with_point(0.5, 0.5).unwrap();
    assert_eq!(more.len(), 3);
    assert!(more.contains(PointId(6)));
    // the source set is untouched
    assert_eq!(pts.len(), 2);
}

#[test]
fn append_after_largest_id_is_an_error() {
    let pts = PointSet::new(vec![Point::new(usize::MAX, 0.0, 0.0)]).unwrap();
    assert_eq!(pts.next_id(), None);
    assert_eq!(pts.with_point(1.0, 1.0).unwrap_err(), InputError::IdsExhausted);
}

#[test]
fn ids_left_of_skips_endpoints_and_collinear() {
    let pts = PointSet::from_xy(&[(0.0, 0.0), (4.0, 0.0), (2.0, 1.0), (2.0, -1.0), (3.0, 0.0)])
        .unwrap();
    let all = pts.ids();
    let up = ids_left_of(&pts, PointId(0), PointId(1), &all, 1e-12);
    assert_eq!(up, vec![PointId(2)]);
    let down = ids_left_of(&pts, PointId(1), PointId(0), &all, 1e-12);
    assert_eq!(down, vec![PointId(3)]);
}
