use fortuna_core::config::WheelConfig;
use fortuna_core::item::ItemConfig;
use fortuna_core::physics::Direction;
use fortuna_core::{Point, Size, Wheel, WheelEvent};
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn build_wheel(labels: &[&str]) -> (Wheel, Rc<RefCell<Vec<WheelEvent>>>) {
    let items = labels.iter().map(|l| ItemConfig::labeled(*l)).collect();
    let mut wheel = Wheel::new(&WheelConfig::with_items(items)).with_rng(fastrand::Rng::with_seed(1));
    wheel.resize(Size::new(400.0, 400.0));

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    wheel.on_event(move |e| sink.borrow_mut().push(e.clone()));
    (wheel, events)
}

fn run_frames(wheel: &mut Wheel, start_ms: f64, frames: usize) -> f64 {
    let mut now = start_ms;
    for _ in 0..frames {
        let frame = wheel.advance(now);
        assert!(frame.velocity.abs() <= wheel.settings().max_speed);
        now += FRAME_MS;
    }
    now
}

fn rest_items(events: &[WheelEvent]) -> Vec<Option<usize>> {
    events
        .iter()
        .filter_map(|e| match e {
            WheelEvent::Rest { item } => Some(*item),
            _ => None,
        })
        .collect()
}

#[test]
fn programmatic_spin_comes_to_rest_once() {
    let (mut wheel, events) = build_wheel(&["apple", "pear", "plum", "fig"]);
    wheel.spin(180.0);
    run_frames(&mut wheel, 5_000.0, 60 * 10);

    assert_eq!(wheel.velocity(), 0.0);
    assert_eq!(wheel.direction(), Direction::Stopped);
    let rests = rest_items(&events.borrow());
    assert_eq!(rests.len(), 1);
    assert_eq!(rests[0], wheel.current_item());
}

#[test]
fn two_spins_two_rests() {
    let (mut wheel, events) = build_wheel(&["a", "b", "c"]);
    wheel.spin(50.0);
    let now = run_frames(&mut wheel, 0.0, 60 * 5);
    wheel.spin(-50.0);
    run_frames(&mut wheel, now, 60 * 5);

    assert_eq!(rest_items(&events.borrow()).len(), 2);
}

#[test]
fn flick_then_catch_then_release() {
    let (mut wheel, events) = build_wheel(&["a", "b", "c", "d", "e", "f"]);
    let mut now = run_frames(&mut wheel, 0.0, 2);

    // flick clockwise across the top of the wheel
    assert!(wheel.pointer_down(Point::new(150.0, 60.0)));
    for step in 1..=5 {
        now += FRAME_MS;
        wheel.pointer_move(Point::new(150.0 + step as f64 * 20.0, 60.0), now);
    }
    wheel.pointer_up(now);
    assert_eq!(wheel.direction(), Direction::Clockwise);
    let spin_speed = wheel.velocity();
    assert!(spin_speed > 0.0);

    now = run_frames(&mut wheel, now, 10);
    assert!(wheel.velocity() < spin_speed);

    // catch it, hold it for half a second, let go: it stays put
    assert!(wheel.pointer_down(Point::new(200.0, 60.0)));
    wheel.pointer_move(Point::new(205.0, 60.0), now);
    now = run_frames(&mut wheel, now, 30);
    let held_at = wheel.rotation();
    wheel.pointer_up(now);
    run_frames(&mut wheel, now, 30);

    assert_eq!(wheel.velocity(), 0.0);
    assert_eq!(wheel.rotation(), held_at);

    let events = events.borrow();
    let spins = events
        .iter()
        .filter(|e| matches!(e, WheelEvent::Spin { .. }))
        .count();
    assert_eq!(spins, 1);
    // the catch is not a rest
    assert!(rest_items(&events).is_empty());
}
