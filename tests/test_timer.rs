use rat_dropdown::timer::{TimerDef, Timers};
use std::time::{Duration, Instant};

#[test]
fn test_empty() {
    let t0 = Instant::now();
    let mut timers = Timers::new();

    assert_eq!(timers.is_empty(), true);
    assert_eq!(timers.sleep_time(t0), None);
    assert_eq!(timers.poll(t0), false);
    assert_eq!(timers.read(t0), None);
}

#[test]
fn test_order() {
    let t0 = Instant::now();
    let mut timers = Timers::new();

    let h3 = timers.add(TimerDef::new().timer(Duration::from_millis(30)), t0);
    let h1 = timers.add(TimerDef::new().timer(Duration::from_millis(10)), t0);
    let h2 = timers.add(TimerDef::new().next(t0 + Duration::from_millis(20)), t0);
    assert_eq!(timers.len(), 3);

    assert_eq!(timers.sleep_time(t0), Some(Duration::from_millis(10)));
    assert_eq!(timers.poll(t0 + Duration::from_millis(9)), false);
    assert_eq!(timers.read(t0 + Duration::from_millis(9)), None);

    let t = t0 + Duration::from_millis(100);
    assert_eq!(timers.poll(t), true);
    assert_eq!(timers.read(t).map(|v| v.handle), Some(h1));
    assert_eq!(timers.read(t).map(|v| v.handle), Some(h2));
    assert_eq!(timers.read(t).map(|v| v.handle), Some(h3));
    assert_eq!(timers.read(t), None);
    assert_eq!(timers.is_empty(), true);
}

#[test]
fn test_same_time() {
    let t0 = Instant::now();
    let mut timers = Timers::new();

    let h1 = timers.add(TimerDef::new().timer(Duration::from_millis(10)), t0);
    let h2 = timers.add(TimerDef::new().timer(Duration::from_millis(10)), t0);

    let t = t0 + Duration::from_millis(10);
    assert_eq!(timers.read(t).map(|v| v.handle), Some(h1));
    assert_eq!(timers.read(t).map(|v| v.handle), Some(h2));
}

#[test]
fn test_repeat() {
    let t0 = Instant::now();
    let mut timers = Timers::new();

    let h = timers.add(
        TimerDef::new().timer(Duration::from_millis(10)).repeat(3),
        t0,
    );

    let t = t0 + Duration::from_millis(10);
    let e = timers.read(t).expect("timeout");
    assert_eq!(e.handle, h);
    assert_eq!(e.counter, 0);
    assert_eq!(timers.read(t), None);

    let t = t0 + Duration::from_millis(20);
    assert_eq!(timers.read(t).map(|v| v.counter), Some(1));
    let t = t0 + Duration::from_millis(30);
    assert_eq!(timers.read(t).map(|v| v.counter), Some(2));

    assert_eq!(timers.is_empty(), true);
}

#[test]
fn test_remove() {
    let t0 = Instant::now();
    let mut timers = Timers::new();

    let h1 = timers.add(TimerDef::new().timer(Duration::from_millis(10)), t0);
    let h2 = timers.add(TimerDef::new().timer(Duration::from_millis(20)), t0);
    timers.remove(h1);

    let t = t0 + Duration::from_millis(50);
    assert_eq!(timers.read(t).map(|v| v.handle), Some(h2));
    assert_eq!(timers.read(t), None);
}
