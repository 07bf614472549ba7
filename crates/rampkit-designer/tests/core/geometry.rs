use rampkit_core::CounterIds;
use rampkit_designer::geometry::{
    body_bounding_box, center_from_top_left, local_footprint, object_bounding_box, object_rect,
    top_left_from_center, world_outline,
};
use rampkit_designer::{apply_patch, Object2D, ObjectPatch, Point};

fn winged_ramp(rotation: f64) -> Object2D {
    let mut ids = CounterIds::new();
    let ramp = Object2D::new_ramp(&mut ids, Point::new(0.0, 0.0));
    let patch = ObjectPatch::new()
        .size(1000.0, 1000.0)
        .right_wing(true, 500.0)
        .rotation(rotation);
    apply_patch(&ramp, &patch).into_owned()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
}

#[test]
fn test_landing_bounding_box_is_centred() {
    let mut ids = CounterIds::new();
    let landing = Object2D::new_landing(&mut ids, Point::new(100.0, 50.0));
    let bbox = object_bounding_box(&landing);

    assert_close(bbox.width, 1500.0);
    assert_close(bbox.height, 1500.0);
    assert_close(bbox.offset_x, 0.0);
    assert_close(bbox.offset_y, 0.0);
}

#[test]
fn test_wing_extends_length_axis() {
    let ramp = winged_ramp(0.0);
    let footprint = local_footprint(&ramp, true);
    assert_close(footprint.min_x, -500.0);
    assert_close(footprint.max_x, 1000.0);
    assert_close(footprint.width(), 1500.0);
    assert_close(footprint.height(), 1000.0);

    let body = local_footprint(&ramp, false);
    assert_close(body.width(), 1000.0);
}

#[test]
fn test_winged_box_is_offset() {
    let ramp = winged_ramp(0.0);
    let bbox = object_bounding_box(&ramp);
    assert_close(bbox.width, 1500.0);
    assert_close(bbox.offset_x, 250.0);
    assert_close(bbox.offset_y, 0.0);

    let turned = winged_ramp(90.0);
    let bbox = object_bounding_box(&turned);
    assert_close(bbox.width, 1000.0);
    assert_close(bbox.height, 1500.0);
    assert_close(bbox.offset_x, 0.0);
    assert_close(bbox.offset_y, 250.0);
}

#[test]
fn test_body_box_ignores_wings() {
    let ramp = winged_ramp(0.0);
    let body = body_bounding_box(&ramp);
    assert_close(body.width, 1000.0);
    assert_close(body.offset_x, 0.0);
}

#[test]
fn test_top_left_roundtrip_for_right_angles() {
    for rotation in [0.0, 90.0, 180.0, 270.0] {
        let ramp = winged_ramp(rotation);
        let bbox = object_bounding_box(&ramp);
        let center = Point::new(1234.0, -567.0);

        let top_left = top_left_from_center(center, &bbox);
        let back = center_from_top_left(top_left, &bbox);

        assert_close(back.x, center.x);
        assert_close(back.y, center.y);
    }
}

#[test]
fn test_object_rect_and_outline() {
    let mut ids = CounterIds::new();
    let landing = Object2D::new_landing(&mut ids, Point::new(100.0, 50.0));

    let rect = object_rect(&landing);
    assert_close(rect.min_x, -650.0);
    assert_close(rect.min_y, -700.0);
    assert_close(rect.max_x, 850.0);
    assert_close(rect.max_y, 800.0);

    let outline = world_outline(&landing);
    assert_close(outline[0].x, -650.0);
    assert_close(outline[0].y, -700.0);
    assert_close(outline[2].x, 850.0);
    assert_close(outline[2].y, 800.0);
}

#[test]
fn test_rotated_ramp_rect_moves_with_wing() {
    let ramp = winged_ramp(180.0);
    let rect = object_rect(&ramp);
    // The right wing now points towards -x
    assert_close(rect.min_x, -1000.0);
    assert_close(rect.max_x, 500.0);
}
