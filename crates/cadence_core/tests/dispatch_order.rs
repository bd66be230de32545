//! Integration tests for dispatch ordering and registration positions.
//!
//! Run with: cargo test --package cadence_core --test dispatch_order

use std::sync::Arc;

use cadence_core::{
    DispatchError, DispatchPolicy, EventBus, EventKind, Listener, Login, LoopTick, Position,
    RequestTogglePlay, TogglePlay,
};
use parking_lot::Mutex;

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(tag: &'static str, log: &Log) -> Listener<TogglePlay> {
    let log = Arc::clone(log);
    Listener::new(move |event: &TogglePlay| log.lock().push(format!("{tag}:{}", event.play)))
}

#[test]
fn test_listeners_run_in_registration_order_with_same_payload() {
    let bus = EventBus::new();
    let log: Log = Arc::default();

    bus.register(
        Position::Append,
        [recorder("l1", &log), recorder("l2", &log), recorder("l3", &log)],
    );
    bus.fire(TogglePlay { play: true }).unwrap();

    assert_eq!(*log.lock(), ["l1:true", "l2:true", "l3:true"]);
}

#[test]
fn test_separate_register_calls_append() {
    let bus = EventBus::new();
    let log: Log = Arc::default();

    bus.register(Position::Append, [recorder("a", &log)]);
    bus.register(Position::default(), [recorder("b", &log)]);
    bus.fire(TogglePlay { play: false }).unwrap();

    assert_eq!(*log.lock(), ["a:false", "b:false"]);
}

#[test]
fn test_insertion_index_splices_into_fire_order() {
    let bus = EventBus::new();
    let log: Log = Arc::default();

    bus.register(Position::Append, [recorder("a", &log), recorder("b", &log)]);
    bus.register(Position::At(1), [recorder("c", &log)]);
    bus.fire(TogglePlay { play: true }).unwrap();

    assert_eq!(*log.lock(), ["a:true", "c:true", "b:true"]);
}

#[test]
fn test_order_is_stable_across_fires() {
    let bus = EventBus::new();
    let log: Log = Arc::default();
    bus.register(Position::Append, [recorder("a", &log), recorder("b", &log)]);

    for play in [true, false, true] {
        bus.fire(TogglePlay { play }).unwrap();
    }

    assert_eq!(
        *log.lock(),
        ["a:true", "b:true", "a:false", "b:false", "a:true", "b:true"]
    );
}

#[test]
fn test_firing_every_empty_kind_is_silent() {
    let bus = EventBus::new();

    assert!(bus.fire(LoopTick { delta: 0.0 }).is_ok());
    assert!(bus.fire(TogglePlay { play: true }).is_ok());
    assert!(bus.fire(RequestTogglePlay { play: false }).is_ok());
    assert!(bus.fire(Login).is_ok());

    for kind in EventKind::ALL {
        assert_eq!(bus.listener_count(*kind), 0);
    }
}

#[test]
fn test_fail_fast_error_surfaces_to_caller() {
    let bus = EventBus::new();
    let log: Log = Arc::default();

    bus.register(Position::Append, [recorder("ok", &log)]);
    bus.register(
        Position::Append,
        [Listener::fallible(|_: &TogglePlay| Err("listener exploded".into()))],
    );
    bus.register(Position::Append, [recorder("never", &log)]);

    let err = bus.fire(TogglePlay { play: true }).unwrap_err();
    assert!(matches!(err, DispatchError::Aborted { index: 1, skipped: 1, .. }));
    assert!(err.to_string().contains("listener exploded"));
    assert_eq!(*log.lock(), ["ok:true"]);
}

#[test]
fn test_isolated_policy_reports_without_blocking_siblings() {
    let bus = EventBus::with_policy(DispatchPolicy::Isolated);
    let log: Log = Arc::default();

    bus.register(
        Position::Append,
        [Listener::fallible(|_: &TogglePlay| Err("first".into()))],
    );
    bus.register(Position::Append, [recorder("sibling", &log)]);

    let err = bus.fire(TogglePlay { play: true }).unwrap_err();
    assert_eq!(err.failure_count(), 1);
    assert_eq!(err.kind(), EventKind::TogglePlay);
    assert_eq!(*log.lock(), ["sibling:true"]);
}
