//! End-to-end drag gestures against the synthetic document

use draggable_shared::testing::{SyntheticElement, SyntheticSource};
use draggable_shared::{DragConfig, DragElement, Draggable, PointerEventKind, Rect};

type Fixture = (
    SyntheticSource,
    Draggable<SyntheticSource>,
    Vec<SyntheticElement>,
);

fn card(source: &SyntheticSource, name: &str, rect: Rect, class: &str) -> SyntheticElement {
    source.append(SyntheticElement::new(name, rect).with_class(class))
}

fn setup(rects: &[(&str, Rect)]) -> Fixture {
    let source = SyntheticSource::new();
    let elements = rects
        .iter()
        .map(|(name, rect)| card(&source, name, *rect, "draggable"))
        .collect();
    let draggable = Draggable::new(source.clone(), DragConfig::default()).unwrap();
    draggable.install(|_| {}).unwrap();
    (source, draggable, elements)
}

#[test]
fn test_mouse_drag_moves_by_pointer_delta() {
    let (source, draggable, elements) = setup(&[("box", Rect::new(10.0, 20.0, 40.0, 40.0))]);
    let element = &elements[0];

    source.mouse_down(element, 100.0, 100.0);
    assert_eq!(draggable.current_element().as_ref(), Some(element));
    assert!(element.has_class("dragging"));

    source.mouse_move(130.0, 115.0);
    assert_eq!(element.style("left").as_deref(), Some("40px"));
    assert_eq!(element.style("top").as_deref(), Some("35px"));

    source.mouse_up(130.0, 115.0);
    assert!(!draggable.is_dragging());
    assert_eq!(draggable.current_element(), None);
    assert!(!element.has_class("dragging"));
    assert_eq!(element.rect(), Rect::new(40.0, 35.0, 40.0, 40.0));
}

#[test]
fn test_touch_drag_ends_with_changed_touches_only() {
    let (source, draggable, elements) = setup(&[("box", Rect::new(0.0, 0.0, 40.0, 40.0))]);
    let element = &elements[0];

    source.touch_start(element, 5.0, 5.0);
    source.touch_move(25.0, 45.0);
    source.touch_end(25.0, 45.0);

    assert!(!draggable.is_dragging());
    assert_eq!(element.style("left").as_deref(), Some("20px"));
    assert_eq!(element.style("top").as_deref(), Some("40px"));
}

#[test]
fn test_touch_cancel_ends_like_touch_end() {
    let (source, draggable, elements) = setup(&[("box", Rect::new(0.0, 0.0, 40.0, 40.0))]);
    let element = &elements[0];

    source.touch_start(element, 5.0, 5.0);
    source.touch_move(15.0, 15.0);
    source.touch_cancel();

    assert!(!draggable.is_dragging());
    assert_eq!(draggable.current_element(), None);
    assert!(!element.has_class("dragging"));

    // Later moves belong to no gesture
    source.touch_move(90.0, 90.0);
    assert_eq!(element.style("left").as_deref(), Some("10px"));
}

#[test]
fn test_moves_while_idle_leave_elements_alone() {
    let (source, _draggable, elements) = setup(&[
        ("a", Rect::new(1.0, 2.0, 10.0, 10.0)),
        ("b", Rect::new(3.0, 4.0, 10.0, 10.0)),
    ]);

    source.mouse_move(200.0, 200.0);
    source.touch_move(300.0, 300.0);

    for element in &elements {
        assert_eq!(element.style("left"), None);
        assert_eq!(element.style("top"), None);
    }
    assert_eq!(elements[0].rect(), Rect::new(1.0, 2.0, 10.0, 10.0));
    assert_eq!(elements[1].rect(), Rect::new(3.0, 4.0, 10.0, 10.0));
}

#[test]
fn test_only_one_element_active_per_gesture() {
    let (source, draggable, elements) = setup(&[
        ("a", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("b", Rect::new(50.0, 0.0, 10.0, 10.0)),
    ]);

    for element in &elements {
        source.mouse_down(element, 0.0, 0.0);
        for step in 1..=5 {
            source.mouse_move(step as f64, step as f64);
            assert_eq!(draggable.current_element().as_ref(), Some(element));
            let marked = elements.iter().filter(|e| e.has_class("dragging")).count();
            assert_eq!(marked, 1);
        }
        source.mouse_up(5.0, 5.0);
        assert_eq!(draggable.current_element(), None);
    }
}

#[test]
fn test_rescan_wires_new_candidates_without_duplicating_globals() {
    let (source, draggable, _elements) = setup(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);

    let late = source.append(
        SyntheticElement::new("late", Rect::new(100.0, 100.0, 10.0, 10.0)).with_class("draggable"),
    );
    // Not a candidate until re-scanned
    assert_eq!(source.mouse_down(&late, 0.0, 0.0).listeners, 0);
    source.mouse_up(0.0, 0.0);

    assert_eq!(draggable.rescan().unwrap(), 1);
    assert_eq!(draggable.rescan().unwrap(), 0);
    assert_eq!(draggable.rescan().unwrap(), 0);

    for kind in PointerEventKind::GLOBAL {
        assert_eq!(source.global_listener_count(kind), 1);
    }
    assert_eq!(source.element_listener_count(&late, PointerEventKind::MouseDown), 1);
    assert_eq!(late.style("position").as_deref(), Some("absolute"));

    source.mouse_down(&late, 10.0, 10.0);
    assert_eq!(draggable.current_element().as_ref(), Some(&late));

    // One listener runs per move, so the element moves by the delta exactly once
    assert_eq!(source.mouse_move(15.0, 20.0).listeners, 1);
    assert_eq!(late.style("left").as_deref(), Some("105px"));
    assert_eq!(late.style("top").as_deref(), Some("110px"));
}

#[test]
fn test_second_start_takes_over_and_freezes_first() {
    let (source, draggable, elements) = setup(&[
        ("first", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ("second", Rect::new(100.0, 0.0, 10.0, 10.0)),
    ]);
    let (first, second) = (&elements[0], &elements[1]);

    source.mouse_down(first, 0.0, 0.0);
    source.mouse_move(7.0, 8.0);
    source.touch_start(second, 50.0, 50.0);

    assert_eq!(draggable.current_element().as_ref(), Some(second));
    assert!(!first.has_class("dragging"));
    assert!(second.has_class("dragging"));

    source.touch_move(60.0, 55.0);

    assert_eq!(first.style("left").as_deref(), Some("7px"));
    assert_eq!(first.style("top").as_deref(), Some("8px"));
    assert_eq!(second.style("left").as_deref(), Some("110px"));
    assert_eq!(second.style("top").as_deref(), Some("5px"));
}

#[test]
fn test_custom_selector_and_marker() {
    let source = SyntheticSource::new();
    let handle = card(&source, "handle", Rect::default(), "handle");
    let other = card(&source, "other", Rect::default(), "draggable");
    let config = DragConfig::from_toml_str(
        r#"
        candidate_selector = ".handle"
        active_class = "lifted"
        "#,
    )
    .unwrap();
    let draggable = Draggable::new(source.clone(), config).unwrap();
    draggable.install(|_| {}).unwrap();

    assert_eq!(source.element_listener_count(&other, PointerEventKind::MouseDown), 0);

    source.mouse_down(&handle, 0.0, 0.0);
    assert!(handle.has_class("lifted"));
    source.mouse_up(0.0, 0.0);
    assert!(!handle.has_class("lifted"));
}
