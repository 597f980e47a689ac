use super::*;

use std::cell::Cell;

const FRAME_NANOS: u64 = 16_666_667;

/// Pump frames until the clock goes idle or `max_frames` elapse.
/// Returns the timestamp of the last drained frame.
fn pump(clock: &FrameClock, start_nanos: u64, max_frames: usize) -> u64 {
    let mut frame_time = start_nanos;
    for _ in 0..max_frames {
        if !clock.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        clock.drain_frame_callbacks(frame_time);
    }
    frame_time
}

#[test]
fn spring_interpolates_and_finishes_at_target() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let samples = Rc::new(RefCell::new(Vec::new()));
    let samples_clone = Rc::clone(&samples);
    let _subscription = animatable
        .state()
        .subscribe(move |value| samples_clone.borrow_mut().push(*value));
    let finished = Rc::new(Cell::new(false));
    let finished_clone = Rc::clone(&finished);

    animatable.animate_to_then(
        1.0,
        SpringSpec::default(),
        move || finished_clone.set(true),
    );
    assert!(animatable.is_running());

    pump(&clock, 0, 120);

    let samples = samples.borrow();
    assert!(samples.iter().any(|value| *value > 0.0 && *value < 1.0));
    assert_eq!(*samples.last().expect("samples recorded"), 1.0);
    assert!(finished.get());
    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), 1.0);
}

#[test]
fn settle_spring_reaches_target_with_small_overshoot() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let peak = Rc::new(Cell::new(0.0f32));
    let peak_clone = Rc::clone(&peak);
    let _subscription = animatable
        .state()
        .subscribe(move |value| peak_clone.set(peak_clone.get().max(*value)));

    animatable.animate_to(100.0, SpringSpec::settle());
    let end = pump(&clock, 0, 240);

    assert!(!animatable.is_running(), "spring should come to rest");
    assert_eq!(animatable.value(), 100.0);
    let elapsed_secs = end as f32 / 1e9;
    assert!(elapsed_secs > 0.25, "settled too fast: {elapsed_secs}s");
    assert!(elapsed_secs < 2.0, "settled too slowly: {elapsed_secs}s");
    assert!(peak.get() < 105.0, "overshoot too large: {}", peak.get());
}

#[test]
fn retarget_continues_from_current_value() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let first_finished = Rc::new(Cell::new(false));
    let first_finished_clone = Rc::clone(&first_finished);

    animatable.animate_to_then(
        100.0,
        SpringSpec::settle(),
        move || first_finished_clone.set(true),
    );
    let mut frame_time = 0;
    for _ in 0..4 {
        frame_time += FRAME_NANOS;
        clock.drain_frame_callbacks(frame_time);
    }
    let midway = animatable.value();
    assert!(midway > 0.0 && midway < 100.0);

    animatable.animate_to(0.0, SpringSpec::settle());
    assert_eq!(animatable.spring(), SpringSpec::settle());
    frame_time += FRAME_NANOS;
    clock.drain_frame_callbacks(frame_time);
    assert!(animatable.value() <= midway);

    pump(&clock, frame_time, 240);
    assert_eq!(animatable.value(), 0.0);
    assert!(!first_finished.get(), "replaced completion must not fire");
}

#[test]
fn snap_to_cancels_running_animation() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    animatable.animate_to(50.0, SpringSpec::default());
    assert!(clock.has_frame_callbacks());

    animatable.snap_to(-20.0);

    assert!(!animatable.is_running());
    assert!(!clock.has_frame_callbacks());
    assert_eq!(animatable.value(), -20.0);
    assert_eq!(animatable.target(), -20.0);
    assert_eq!(animatable.state().get(), -20.0);
}

#[test]
fn observers_may_query_the_animatable() {
    let clock = FrameClock::new();
    let animatable = Animatable::new(0.0f32, clock.clone());
    let reader = animatable.clone();
    let matched = Rc::new(Cell::new(true));
    let matched_clone = Rc::clone(&matched);
    let _subscription = animatable.state().subscribe(move |value| {
        if reader.value() != *value {
            matched_clone.set(false);
        }
    });

    animatable.animate_to(10.0, SpringSpec::default());
    pump(&clock, 0, 120);
    assert!(matched.get());
}

#[test]
fn dropped_animatable_stops_scheduling() {
    let clock = FrameClock::new();
    {
        let animatable = Animatable::new(0.0f32, clock.clone());
        animatable.animate_to(10.0, SpringSpec::default());
    }
    assert!(!clock.has_frame_callbacks());
}

#[test]
fn settle_spring_matches_requested_response() {
    let spec = SpringSpec::settle();
    assert!((spec.response() - 0.4).abs() < 1e-4);
    assert_eq!(spec.damping_ratio, 0.8);
    assert!(spec.damping_ratio < 1.0);
}
