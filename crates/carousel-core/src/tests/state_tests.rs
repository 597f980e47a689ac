use super::*;

#[test]
fn set_notifies_observers_with_new_value() {
    let state = MutableState::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = Rc::clone(&seen);
    let _subscription = state.subscribe(move |value| seen_clone.borrow_mut().push(*value));

    state.set(3);
    state.update(|value| *value += 1);

    assert_eq!(seen.borrow().as_slice(), &[3, 4]);
    assert_eq!(state.get(), 4);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let state = MutableState::new(0.0f32);
    let calls = Rc::new(Cell::new(0));
    let calls_clone = Rc::clone(&calls);
    let subscription = state.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
    assert_eq!(state.observer_count(), 1);

    state.set(1.0);
    drop(subscription);
    state.set(2.0);

    assert_eq!(calls.get(), 1);
    assert_eq!(state.observer_count(), 0);
}

#[test]
fn detached_subscription_stays_registered() {
    let state = MutableState::new(1u8);
    state.subscribe(|_| {}).detach();
    assert_eq!(state.observer_count(), 1);
}

#[test]
fn set_if_changed_skips_equal_values() {
    let state = MutableState::new(5);
    let calls = Rc::new(Cell::new(0));
    let calls_clone = Rc::clone(&calls);
    let _subscription = state.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

    assert!(!state.set_if_changed(5));
    assert!(state.set_if_changed(6));
    assert_eq!(calls.get(), 1);
}

#[test]
fn observers_run_in_registration_order() {
    let state = MutableState::new(());
    let order = Rc::new(RefCell::new(Vec::new()));
    let subscriptions: Vec<Subscription> = (0..6)
        .map(|n| {
            let order = Rc::clone(&order);
            state.subscribe(move |_| order.borrow_mut().push(n))
        })
        .collect();

    state.set(());
    assert_eq!(order.borrow().as_slice(), &[0, 1, 2, 3, 4, 5]);
    drop(subscriptions);
}

#[test]
fn observer_may_read_state_while_notified() {
    let state = MutableState::new(10);
    let reader = state.as_state();
    let seen = Rc::new(Cell::new(0));
    let seen_clone = Rc::clone(&seen);
    let _subscription = state.subscribe(move |_| seen_clone.set(reader.get()));

    state.set(42);
    assert_eq!(seen.get(), 42);
}

#[test]
fn subscription_outliving_state_is_harmless() {
    let subscription = {
        let state = MutableState::new(0);
        state.subscribe(|_| {})
    };
    drop(subscription);
}

#[test]
fn observer_may_write_back_into_its_own_state() {
    let state = MutableState::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let clamp = state.clone();
    let _clamp = state.subscribe(move |value| {
        if *value > 10 {
            clamp.set(10);
        }
    });
    let sink = Rc::clone(&seen);
    let _log = state.subscribe(move |value| sink.borrow_mut().push(*value));

    state.set(42);

    assert_eq!(state.get(), 10);
    // The second pass delivers the clamped value to every observer.
    assert_eq!(seen.borrow().as_slice(), &[42, 10]);
}

#[test]
fn nested_writes_coalesce_into_one_follow_up_pass() {
    let state = MutableState::new(0);
    let calls = Rc::new(Cell::new(0));

    let writer = state.clone();
    let counter = Rc::clone(&calls);
    let _subscription = state.subscribe(move |value| {
        counter.set(counter.get() + 1);
        if *value == 1 {
            writer.set(2);
            writer.set(3);
        }
    });

    state.set(1);

    assert_eq!(state.get(), 3);
    assert_eq!(calls.get(), 2);
}

#[test]
fn panicking_observer_does_not_wedge_notification() {
    let state = MutableState::new(0);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let _subscription = state.subscribe(move |value| {
        counter.set(counter.get() + 1);
        assert!(*value != 1, "rejects one");
    });

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| state.set(1)));
    assert!(outcome.is_err());

    state.set(2);
    assert_eq!(calls.get(), 2);
}
