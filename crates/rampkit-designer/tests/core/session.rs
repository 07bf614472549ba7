use rampkit_core::{CounterIds, ObjectId};
use rampkit_designer::geometry::object_rect;
use rampkit_designer::{
    Corner, EditorSession, Gesture, MeasurementKey, ObjectKind, ObjectPatch, Point,
    SnapIncrement, SnapKind, Tool,
};

/// Places a 1000x1000 landing at `center` and returns its id.
fn place_square(session: &mut EditorSession, ids: &mut CounterIds, center: Point) -> ObjectId {
    let id = session.place_object(ObjectKind::Landing, center, ids);
    session.update_selected(&ObjectPatch::new().size(1000.0, 1000.0));
    id
}

fn center_of(session: &EditorSession, id: &ObjectId) -> Point {
    session.snapshot().object(id).expect("object").center()
}

#[test]
fn test_place_selects_and_commits() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = session.place_object(ObjectKind::Ramp, Point::new(3.0, 4.0), &mut ids);

    assert_eq!(session.snapshot().selected_id.as_ref(), Some(&id));
    assert_eq!(session.history().undo_depth(), 1);
    // Top-left of a 2000x1000 ramp lands on the 10mm grid
    assert_eq!(center_of(&session, &id), Point::new(0.0, 0.0));
}

#[test]
fn test_drag_snaps_to_neighbour_and_commits_once() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let a = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    let b = place_square(&mut session, &mut ids, Point::new(3000.0, 0.0));
    let depth = session.history().undo_depth();

    assert!(session.pointer_down_on_object(&b, Point::new(3000.0, 0.0)));
    assert!(matches!(session.gesture(), Gesture::Dragging { .. }));
    session.pointer_move(Point::new(2000.0, 0.0));
    let feedback = session.pointer_move(Point::new(1010.0, 0.0));
    assert_eq!(feedback.guide.x.map(|s| s.kind), Some(SnapKind::Face));
    assert_eq!(session.history().undo_depth(), depth);

    assert!(session.pointer_up());
    assert_eq!(session.history().undo_depth(), depth + 1);
    assert_eq!(session.gesture(), &Gesture::Idle);

    let snapshot = session.snapshot();
    let a_rect = object_rect(snapshot.object(&a).expect("a"));
    let b_rect = object_rect(snapshot.object(&b).expect("b"));
    assert_eq!(a_rect.max_x, b_rect.min_x);

    assert!(session.undo());
    assert_eq!(center_of(&session, &b), Point::new(3000.0, 0.0));
}

#[test]
fn test_cancel_restores_committed_snapshot() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    let committed = session.snapshot().clone();

    session.pointer_down_on_object(&id, Point::new(0.0, 0.0));
    session.pointer_move(Point::new(750.0, 320.0));
    assert_ne!(session.snapshot(), &committed);

    session.cancel_gesture();
    assert_eq!(session.snapshot(), &committed);
    assert!(!session.pointer_up());
}

#[test]
fn test_click_without_motion_commits_nothing() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    let depth = session.history().undo_depth();

    session.pointer_down_on_object(&id, Point::new(20.0, 20.0));
    assert!(!session.pointer_up());
    assert_eq!(session.history().undo_depth(), depth);
}

#[test]
fn test_locked_object_selects_but_does_not_drag() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let a = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    session.update_selected(&ObjectPatch::new().locked(true));
    let _b = place_square(&mut session, &mut ids, Point::new(3000.0, 0.0));

    assert!(session.pointer_down_on_object(&a, Point::new(0.0, 0.0)));
    assert_eq!(session.gesture(), &Gesture::Idle);
    session.pointer_move(Point::new(500.0, 500.0));
    assert_eq!(center_of(&session, &a), Point::new(0.0, 0.0));

    // Selection change still becomes an undo step
    assert!(session.pointer_up());
    assert_eq!(session.snapshot().selected_id.as_ref(), Some(&a));
    assert!(!session.pointer_down_on_handle(&a, Corner::BottomRight));
}

#[test]
fn test_pan_reports_delta_only() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    let before = session.snapshot().clone();

    session.begin_pan(Point::new(10.0, 10.0));
    let feedback = session.pointer_move(Point::new(25.0, 5.0));
    assert_eq!(feedback.pan_delta, Some(Point::new(15.0, -5.0)));
    assert!(feedback.guide.is_empty());
    assert!(!session.pointer_up());
    assert_eq!(session.snapshot(), &before);
}

#[test]
fn test_resize_gesture() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));

    assert!(session.pointer_down_on_handle(&id, Corner::BottomRight));
    session.pointer_move(Point::new(1003.0, 698.0));
    assert!(session.pointer_up());

    let base = session.snapshot().object(&id).expect("object").base().clone();
    assert_eq!(base.length_mm, 1500);
    assert_eq!(base.width_mm, 1200);
    assert_eq!((base.x_mm, base.y_mm), (250, 100));
}

#[test]
fn test_nudge_uses_grid_step() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));

    assert!(session.nudge_selected(1, -2));
    assert_eq!(center_of(&session, &id), Point::new(10.0, -20.0));

    session.set_snap_config(false, true, SnapIncrement::Mm10);
    session.select(Some(&id));
    assert!(session.nudge_selected(-1, 0));
    assert_eq!(center_of(&session, &id), Point::new(9.0, -20.0));
    assert!(!session.nudge_selected(0, 0));
}

#[test]
fn test_rotate_wraps() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = session.place_object(ObjectKind::Ramp, Point::new(0.0, 0.0), &mut ids);

    assert!(session.rotate_selected(90.0));
    assert!(session.rotate_selected(-180.0));
    let rotation = session.snapshot().object(&id).expect("ramp").rotation_deg();
    assert_eq!(rotation, 270);
}

#[test]
fn test_delete_and_undo() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = session.place_object(ObjectKind::Landing, Point::new(0.0, 0.0), &mut ids);

    assert!(session.delete_selected());
    assert!(session.snapshot().objects.is_empty());
    assert_eq!(session.snapshot().selected_id, None);
    assert!(!session.delete_selected());

    assert!(session.undo());
    assert!(session.snapshot().object(&id).is_some());
}

#[test]
fn test_toggle_and_select_measurement() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = session.place_object(ObjectKind::Ramp, Point::new(0.0, 0.0), &mut ids);

    assert!(session.toggle_measurement(MeasurementKey::H));
    let enabled = session
        .snapshot()
        .object(&id)
        .expect("ramp")
        .base()
        .measurement_enabled(MeasurementKey::H);
    assert!(enabled);
    assert_eq!(session.dimensions().len(), 3);

    assert!(session.select_measurement(Some(MeasurementKey::H)));
    assert!(!session.select_measurement(Some(MeasurementKey::H)));
    assert_eq!(
        session.snapshot().selected_measurement_key,
        Some(MeasurementKey::H)
    );
}

#[test]
fn test_tool_click_places_objects() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    assert!(session.click_with_tool(Point::new(0.0, 0.0), &mut ids).is_none());

    session.set_tool(Tool::Landing);
    let id = session
        .click_with_tool(Point::new(0.0, 0.0), &mut ids)
        .expect("placed");
    assert_eq!(
        session.snapshot().object(&id).map(|o| o.kind()),
        Some(ObjectKind::Landing)
    );
}

#[test]
fn test_drag_streams_previews_then_commits_once() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let _a = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    let b = place_square(&mut session, &mut ids, Point::new(3000.0, 0.0));
    let depth = session.history().undo_depth();

    session.pointer_down_on_object(&b, Point::new(3000.0, 0.0));
    for i in 0..=20 {
        session.pointer_move(Point::new(3000.0 - 99.5 * f64::from(i), 0.0));
        assert_eq!(session.history().undo_depth(), depth);
    }
    assert!(session.pointer_up());

    assert_eq!(session.history().undo_depth(), depth + 1);
    assert_eq!(center_of(&session, &b), Point::new(1000.0, 0.0));

    assert!(session.undo());
    assert_eq!(center_of(&session, &b), Point::new(3000.0, 0.0));
    assert_eq!(session.history().undo_depth(), depth);
}

#[test]
fn test_resize_keeps_opposite_corner_over_many_moves() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    session.set_snap_config(false, false, SnapIncrement::Mm10);
    let depth = session.history().undo_depth();

    assert!(session.pointer_down_on_handle(&id, Corner::BottomRight));
    for i in 0..200 {
        session.pointer_move(Point::new(1.0 + 0.5 * f64::from(i), 500.0));
        let rect = object_rect(session.snapshot().object(&id).expect("object"));
        // Odd sizes put the centre on a half millimetre, never further
        assert!((rect.min_x + 500.0).abs() <= 0.5, "min_x drifted to {}", rect.min_x);
        assert_eq!(rect.min_y, -500.0);
    }
    session.pointer_move(Point::new(1000.0, 700.0));
    assert!(session.pointer_up());
    assert_eq!(session.history().undo_depth(), depth + 1);

    let base = session.snapshot().object(&id).expect("object").base().clone();
    assert_eq!((base.length_mm, base.width_mm), (1500, 1200));
    assert_eq!((base.x_mm, base.y_mm), (250, 100));
    let rect = object_rect(session.snapshot().object(&id).expect("object"));
    assert_eq!((rect.min_x, rect.min_y), (-500.0, -500.0));

    assert!(session.undo());
    let base = session.snapshot().object(&id).expect("object").base().clone();
    assert_eq!((base.length_mm, base.width_mm), (1000, 1000));
}

#[test]
fn test_rotated_resize_keeps_anchor_over_many_moves() {
    let mut ids = CounterIds::new();
    let mut session = EditorSession::default();
    let id = place_square(&mut session, &mut ids, Point::new(0.0, 0.0));
    assert!(session.rotate_selected(90.0));
    session.set_snap_config(false, false, SnapIncrement::Mm10);
    let depth = session.history().undo_depth();

    // Local top-left sits at world (500, -500) after a quarter turn
    assert!(session.pointer_down_on_handle(&id, Corner::BottomRight));
    for i in 0..100 {
        let step = 0.5 * f64::from(i);
        session.pointer_move(Point::new(-100.0 - step, 700.0 + step));
        let rect = object_rect(session.snapshot().object(&id).expect("object"));
        assert!((rect.max_x - 500.0).abs() <= 0.5 + 1e-6, "max_x drifted to {}", rect.max_x);
        assert!((rect.min_y + 500.0).abs() <= 0.5 + 1e-6, "min_y drifted to {}", rect.min_y);
    }
    session.pointer_move(Point::new(-100.0, 700.0));
    assert!(session.pointer_up());
    assert_eq!(session.history().undo_depth(), depth + 1);

    let base = session.snapshot().object(&id).expect("object").base().clone();
    assert_eq!((base.length_mm, base.width_mm), (1200, 600));
    assert_eq!((base.x_mm, base.y_mm), (200, 100));
}
