use glam::{Vec2, Vec4};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

use tableau_engine::input::{
    GestureConfig, GestureTracker, InputEvent, MouseButton, MouseButtonState, PointerButtonEvent,
};

use tableau_scene::picker::{pick_at, pick_id_at};
use tableau_scene::{
    ClickOutcome, GradientCircle, InteractionController, InteractionState, ObjectKind,
    SceneConfig, SceneObject, SpriteCatalog,
};

fn controller(seed: u64) -> InteractionController {
    InteractionController::new(SpriteCatalog::builtin(), SceneConfig::default(), StdRng::seed_from_u64(seed))
}

fn add_circle(ctl: &mut InteractionController, x: f32, y: f32) -> tableau_scene::ObjectId {
    let store = ctl.store_mut();
    let id = store.next_id();
    store.add_circle(GradientCircle::new(id, Vec2::new(50.0, 50.0), 1).with_position(Vec4::new(x, y, 0.0, 1.0)))
}

#[test]
fn circle_pick_and_remove_in_800x600() {
    let mut ctl = controller(1);
    let id = add_circle(&mut ctl, 100.0, 100.0);

    let hit = pick_at(ctl.store(), 110.0, 110.0).expect("circle under pointer");
    assert_eq!(hit.id(), id);
    assert_eq!(hit.kind(), ObjectKind::Circle);
    assert!(pick_at(ctl.store(), 200.0, 200.0).is_none());

    assert_eq!(ctl.on_double_click(110.0, 110.0), Some(id));
    assert!(pick_at(ctl.store(), 110.0, 110.0).is_none());
    assert_eq!(ctl.object_count(), 0);
}

#[test]
fn bounds_include_origin_and_exclude_far_corner() {
    let c = GradientCircle::new(tableau_scene::SceneStore::new().next_id(), Vec2::new(50.0, 50.0), 0)
        .with_position(Vec4::new(100.0, 100.0, 0.0, 1.0));
    assert!(c.contains(100.0, 100.0));
    assert!(!c.contains(150.0, 150.0));
}

#[test]
fn topmost_of_two_overlapping_wins() {
    let mut ctl = controller(2);
    let _a = add_circle(&mut ctl, 0.0, 0.0);
    let b = add_circle(&mut ctl, 25.0, 25.0);
    assert_eq!(pick_id_at(ctl.store(), 30.0, 30.0), Some(b));
}

#[test]
fn drag_keeps_offset_on_every_move() {
    let mut ctl = controller(3);
    let id = add_circle(&mut ctl, 100.0, 100.0);

    ctl.on_pointer_down(120.0, 130.0);
    let InteractionState::Dragging { target, offset } = ctl.state() else {
        panic!("press on the circle should start a drag");
    };
    assert_eq!(target, id);

    for (x, y) in [(121.0, 131.0), (300.0, 10.0), (-40.0, 599.0), (800.0, 600.0)] {
        ctl.on_pointer_move(x, y);
        let p = ctl.store().get(id).unwrap().position();
        assert_eq!(Vec2::new(p.x - x, p.y - y), offset);
    }

    ctl.on_pointer_up(800.0, 600.0);
    assert_eq!(ctl.state(), InteractionState::Idle);
}

#[test]
fn releasing_a_drag_does_not_spawn() {
    let mut ctl = controller(6);
    let id = add_circle(&mut ctl, 100.0, 100.0);
    let mut gestures = GestureTracker::new(GestureConfig::default());
    let now = Instant::now();
    let button = |state, x, y| PointerButtonEvent { button: MouseButton::Left, state, x, y };

    assert!(gestures.on_button(&button(MouseButtonState::Pressed, 120.0, 130.0), now).is_empty());
    ctl.on_pointer_down(120.0, 130.0);
    ctl.on_pointer_move(300.0, 320.0);
    ctl.on_pointer_up(300.0, 320.0);

    // The release still completes a click, now landing on the moved circle.
    let derived = gestures.on_button(&button(MouseButtonState::Released, 300.0, 320.0), now);
    let [InputEvent::Click(click)] = derived.as_slice() else {
        panic!("release after press should derive a single click, got {derived:?}");
    };
    assert_eq!(ctl.on_click(click.x, click.y).unwrap(), ClickOutcome::Hit(id));
    assert_eq!(ctl.object_count(), 1);
    assert_eq!(ctl.store().get(id).unwrap().position(), Vec4::new(280.0, 290.0, 0.0, 1.0));
}

#[test]
fn click_on_empty_space_spawns_exactly_one_object_at_the_point() {
    let mut ctl = controller(4);
    let before = ctl.object_count();

    let ClickOutcome::Spawned(id) = ctl.on_click(400.0, 300.0).unwrap() else {
        panic!("empty space should spawn");
    };
    assert_eq!(ctl.object_count(), before + 1);

    let p = ctl.store().get(id).unwrap().position();
    assert_eq!(p, Vec4::new(400.0, 300.0, 0.0, 1.0));

    // The spawned object now occupies the point.
    assert_eq!(ctl.on_click(401.0, 301.0).unwrap(), ClickOutcome::Hit(id));
    assert_eq!(ctl.object_count(), before + 1);
}

#[test]
fn removing_twice_is_harmless() {
    let mut ctl = controller(5);
    let id = add_circle(&mut ctl, 10.0, 10.0);

    assert!(ctl.store_mut().remove(id).is_some());
    assert!(ctl.store_mut().remove(id).is_none());
    assert_eq!(ctl.on_double_click(20.0, 20.0), None);
}

#[test]
fn same_seed_spawns_the_same_scene() {
    let clicks = [(50.0, 50.0), (200.0, 80.0), (350.0, 400.0), (600.0, 120.0), (700.0, 500.0)];

    let kinds = |seed| {
        let mut ctl = controller(seed);
        for (x, y) in clicks {
            ctl.on_click(x, y).unwrap();
        }
        ctl.store().visible_set().map(|o| (o.kind(), o.size())).collect::<Vec<_>>()
    };

    assert_eq!(kinds(99), kinds(99));
}
