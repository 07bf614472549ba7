use rampkit_core::CounterIds;
use rampkit_designer::{
    apply_patch, dimension_segments, snapshot_dimensions, AnchorOrientation, DimensionVariant,
    MeasurementAnchor, MeasurementKey, Object2D, ObjectPatch, Orientation, Point, Snapshot,
};

fn scenario_ramp() -> Object2D {
    let mut ids = CounterIds::new();
    let ramp = Object2D::new_ramp(&mut ids, Point::new(0.0, 0.0));
    let patch = ObjectPatch::new()
        .run(1000.0)
        .right_wing(true, 500.0)
        .measurement(MeasurementKey::L1, true)
        .measurement(MeasurementKey::L2, true)
        .measurement(MeasurementKey::W1, true)
        .measurement(MeasurementKey::W2, true)
        .measurement(MeasurementKey::WR, true);
    let mut ramp = apply_patch(&ramp, &patch).into_owned();
    ramp = apply_patch(&ramp, &ObjectPatch::new().size(1000.0, 1000.0)).into_owned();
    ramp
}

fn keys(obj: &Object2D) -> Vec<MeasurementKey> {
    dimension_segments(obj)
        .iter()
        .map(|s| s.measurement_key)
        .collect()
}

#[test]
fn test_ramp_scenario_labels() {
    let ramp = scenario_ramp();
    let segments = dimension_segments(&ramp);

    assert_eq!(
        keys(&ramp),
        vec![
            MeasurementKey::L1,
            MeasurementKey::L2,
            MeasurementKey::W1,
            MeasurementKey::W2,
            MeasurementKey::WR,
        ]
    );
    assert_eq!(segments[0].label, "1000mm");
    assert_eq!(segments[1].label, "1000mm");
    assert_eq!(segments[2].label, "1000mm");
    assert_eq!(segments[4].label, "500mm");
    assert_eq!(segments[4].variant, DimensionVariant::Wing);
}

#[test]
fn test_edge_segments_sit_outside_body() {
    let ramp = scenario_ramp();
    let segments = dimension_segments(&ramp);

    let l1 = &segments[0];
    assert_eq!(l1.orientation, Orientation::Horizontal);
    assert_eq!(l1.variant, DimensionVariant::Length);
    assert_eq!(l1.start_mm, Point::new(-500.0, -700.0));
    assert_eq!(l1.end_mm, Point::new(500.0, -700.0));
    assert_eq!(l1.anchor_offset_mm, Some(200.0));
    assert_eq!(l1.anchor_direction_mm, Some(Point::new(0.0, -1.0)));
    assert_eq!(l1.tick_length_mm, 60.0);

    let l2 = &segments[1];
    assert_eq!(l2.start_mm.y, 700.0);

    let w1 = &segments[2];
    assert_eq!(w1.orientation, Orientation::Vertical);
    assert_eq!(w1.start_mm, Point::new(-700.0, -500.0));
    assert_eq!(w1.end_mm, Point::new(-700.0, 500.0));

    let w2 = &segments[3];
    assert_eq!(w2.start_mm.x, 700.0);
}

#[test]
fn test_wing_segment_runs_along_length_axis() {
    let ramp = scenario_ramp();
    let wr = dimension_segments(&ramp)
        .into_iter()
        .find(|s| s.measurement_key == MeasurementKey::WR)
        .expect("WR segment");

    assert_eq!(wr.start_mm, Point::new(500.0, 0.0));
    assert_eq!(wr.end_mm, Point::new(1000.0, 0.0));
    assert_eq!(wr.anchor_direction_mm, Some(Point::new(1.0, 0.0)));
    assert_eq!(wr.label_position_mm, Some(Point::new(1200.0, 0.0)));
}

#[test]
fn test_left_wing_points_backwards() {
    let mut ids = CounterIds::new();
    let ramp = Object2D::new_ramp(&mut ids, Point::new(0.0, 0.0));
    let patch = ObjectPatch::new()
        .left_wing(true, 300.0)
        .measurement(MeasurementKey::L1, false)
        .measurement(MeasurementKey::W1, false)
        .measurement(MeasurementKey::WL, true);
    let ramp = apply_patch(&ramp, &patch).into_owned();

    let segments = dimension_segments(&ramp);
    assert_eq!(segments.len(), 1);
    let wl = &segments[0];
    assert_eq!(wl.label, "300mm");
    assert_eq!(wl.start_mm, Point::new(-1000.0, 0.0));
    assert_eq!(wl.end_mm, Point::new(-1300.0, 0.0));
    assert_eq!(wl.anchor_direction_mm, Some(Point::new(-1.0, 0.0)));
}

#[test]
fn test_disabled_wing_emits_nothing() {
    let mut ids = CounterIds::new();
    let ramp = Object2D::new_ramp(&mut ids, Point::new(0.0, 0.0));
    let patch = ObjectPatch::new()
        .measurement(MeasurementKey::WL, true)
        .measurement(MeasurementKey::WR, true);
    let ramp = apply_patch(&ramp, &patch).into_owned();
    assert_eq!(keys(&ramp), vec![MeasurementKey::L1, MeasurementKey::W1]);
}

#[test]
fn test_auto_orientation_at_quarter_turn() {
    let mut ids = CounterIds::new();
    let ramp = Object2D::new_ramp(&mut ids, Point::new(0.0, 0.0));
    let ramp = apply_patch(&ramp, &ObjectPatch::new().rotation(90.0)).into_owned();
    let segments = dimension_segments(&ramp);

    let l1 = &segments[0];
    assert_eq!(l1.orientation, Orientation::Vertical);
    assert_eq!(l1.label, "2000mm");
    let w1 = &segments[1];
    assert_eq!(w1.orientation, Orientation::Horizontal);
    assert_eq!(w1.label, "1000mm");
}

#[test]
fn test_explicit_anchor_orientation_overrides_auto() {
    let mut ids = CounterIds::new();
    let ramp = Object2D::new_ramp(&mut ids, Point::new(0.0, 0.0));
    let patch = ObjectPatch::new().anchor(
        MeasurementKey::L1,
        MeasurementAnchor::new(100.0, AnchorOrientation::Vertical),
    );
    let ramp = apply_patch(&ramp, &patch).into_owned();
    let l1 = &dimension_segments(&ramp)[0];

    assert_eq!(l1.orientation, Orientation::Vertical);
    assert_eq!(l1.label, "1000mm");
    assert_eq!(l1.start_mm.x, -1100.0);
}

#[test]
fn test_height_callout() {
    let mut ids = CounterIds::new();
    let landing = Object2D::new_landing(&mut ids, Point::new(100.0, 100.0));
    let patch = ObjectPatch::new()
        .measurement(MeasurementKey::L1, false)
        .measurement(MeasurementKey::W1, false)
        .measurement(MeasurementKey::H, true)
        .anchor(
            MeasurementKey::H,
            MeasurementAnchor::new(10.0, AnchorOrientation::Auto),
        );
    let landing = apply_patch(&landing, &patch).into_owned();

    let segments = dimension_segments(&landing);
    assert_eq!(segments.len(), 1);
    let h = &segments[0];
    assert_eq!(h.label, "H 150mm");
    assert_eq!(h.variant, DimensionVariant::Height);
    assert_eq!(h.start_mm, Point::new(100.0, 100.0));
    // Leader never shorter than a tick
    assert_eq!(h.end_mm, Point::new(100.0, 40.0));
}

#[test]
fn test_elevation_suppressed_at_zero() {
    let mut ids = CounterIds::new();
    let landing = Object2D::new_landing(&mut ids, Point::new(0.0, 0.0));
    let toggled = apply_patch(
        &landing,
        &ObjectPatch::new().measurement(MeasurementKey::E, true),
    )
    .into_owned();
    assert!(!keys(&toggled).contains(&MeasurementKey::E));

    let raised = apply_patch(&toggled, &ObjectPatch::new().elevation(300.0)).into_owned();
    let e = dimension_segments(&raised)
        .into_iter()
        .find(|s| s.measurement_key == MeasurementKey::E)
        .expect("E segment");
    assert_eq!(e.label, "E 300mm");
    assert_eq!(e.orientation, Orientation::Vertical);
    assert_eq!(e.start_mm, Point::new(-950.0, -750.0));
    assert_eq!(e.end_mm, Point::new(-950.0, 750.0));
}

#[test]
fn test_output_is_deterministic() {
    let ramp = scenario_ramp();
    let first = serde_json::to_string(&dimension_segments(&ramp)).expect("serialize");
    let second = serde_json::to_string(&dimension_segments(&ramp.clone())).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn test_snapshot_dimensions_follow_object_order() {
    let mut ids = CounterIds::new();
    let a = Object2D::new_landing(&mut ids, Point::new(0.0, 0.0));
    let b = Object2D::new_ramp(&mut ids, Point::new(4000.0, 0.0));
    let snapshot = Snapshot::new().add_object(a.clone()).add_object(b.clone());

    let all = snapshot_dimensions(&snapshot);
    assert_eq!(all.len(), 4);
    assert_eq!(&all[0].object_id, a.id());
    assert_eq!(&all[3].object_id, b.id());
}
