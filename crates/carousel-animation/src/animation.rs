//! Frame-driven spring animations.
//!
//! Animations are driven by a [`FrameClock`]: an [`Animatable`] registers for
//! the next frame whenever it has work left and publishes every sample through
//! a [`MutableState`].

use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

use carousel_core::{FrameCallbackRegistration, FrameClock, MutableState, State};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Compute the current progress between the start and target values.
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let start_val = start.to_f32();
        let target_val = target.to_f32();
        let current_val = current.to_f32();

        if (target_val - start_val).abs() < f32::EPSILON {
            1.0
        } else {
            (current_val - start_val) / (target_val - start_val)
        }
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

/// Spring animation configuration.
///
/// Thresholds are expressed in progress units (fraction of the start→target
/// distance), so one spec works for any magnitude of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    pub velocity_threshold: f32,
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Spring described by its response (period of the undamped oscillation,
    /// in seconds) and damping ratio.
    pub fn with_response(response_secs: f32, damping_ratio: f32) -> Self {
        let response = response_secs.max(f32::EPSILON);
        let angular_frequency = TAU / response;
        Self {
            damping_ratio,
            stiffness: angular_frequency * angular_frequency,
            ..Self::default_spring()
        }
    }

    /// Soft, slightly under-damped spring used for settling a carousel row.
    pub fn settle() -> Self {
        Self::with_response(0.4, 0.8)
    }

    /// Period of the undamped oscillation in seconds.
    pub fn response(&self) -> f32 {
        TAU / self.stiffness.sqrt()
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Simulation step for spring integration (~60 fps).
const SPRING_TIMESTEP: f32 = 0.016;

/// Generic animatable value holder.
///
/// Clones share the same underlying animation.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    state: MutableState<T>,
    clock: FrameClock,
    current: T,
    /// Progress units per second.
    velocity: f32,
    start: T,
    target: T,
    spring: SpringSpec,
    last_frame_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_finished: Option<Box<dyn FnOnce()>>,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    fn settle_at_target(&mut self) {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.last_frame_nanos = None;
        self.velocity = 0.0;
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, clock: FrameClock) -> Self {
        let inner = AnimatableInner {
            state: MutableState::new(initial.clone()),
            clock,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            spring: SpringSpec::default(),
            last_frame_nanos: None,
            registration: None,
            on_finished: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate from the current value to `target`.
    ///
    /// A running animation is retargeted from wherever it currently is; its
    /// pending completion callback is dropped without being called.
    pub fn animate_to(&self, target: T, spring: SpringSpec) {
        self.animate_to_then(target, spring, || {});
    }

    /// Like [`Animatable::animate_to`], calling `on_finished` once the value
    /// rests at `target`.
    pub fn animate_to_then(
        &self,
        target: T,
        spring: SpringSpec,
        on_finished: impl FnOnce() + 'static,
    ) {
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }

            inner.start = inner.current.clone();
            inner.target = target;
            inner.spring = spring;
            inner.last_frame_nanos = None;
            inner.velocity = 0.0;
            inner.on_finished = Some(Box::new(on_finished));
        }
        log::trace!("animatable retargeted with {:?}", spring);
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to `target`, cancelling any running animation.
    pub fn snap_to(&self, target: T) {
        let state = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.on_finished = None;
            inner.target = target.clone();
            inner.settle_at_target();
            inner.state.clone()
        };
        state.set(target);
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn spring(&self) -> SpringSpec {
        self.inner.borrow().spring
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Observable stream of animated values.
    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.clock.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        // Published after the borrow is released so observers may query us.
        let (state, sample) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let spec = inner.spring;
            let previous_frame = inner.last_frame_nanos.replace(frame_time_nanos);
            let dt = previous_frame
                .map(|previous| frame_time_nanos.saturating_sub(previous) as f32 / 1e9)
                .unwrap_or(0.0);

            if dt == 0.0 {
                // First frame only establishes the time base.
                schedule_next = true;
            } else {
                // Damped harmonic oscillator over progress, target at 1.0.
                // Semi-implicit Euler in fixed substeps for stability.
                let stiffness = spec.stiffness;
                let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
                let mut progress = <T as SpringScalar>::spring_progress(
                    &inner.start,
                    &inner.target,
                    &inner.current,
                );

                let mut simulated = 0.0f32;
                while simulated < dt {
                    let step = SPRING_TIMESTEP.min(dt - simulated);
                    let displacement = progress - 1.0;
                    let force = -stiffness * displacement - damping * inner.velocity;
                    inner.velocity += force * step;
                    progress += inner.velocity * step;
                    simulated += step;
                }

                let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                let near_target = (progress - 1.0).abs() < spec.position_threshold;

                if at_rest && near_target {
                    inner.settle_at_target();
                    finished = inner.on_finished.take();
                } else {
                    inner.current = inner.start.lerp(&inner.target, progress.clamp(-1.0, 2.0));
                    schedule_next = true;
                }
            }
            (inner.state.clone(), inner.current.clone())
        };

        state.set(sample);

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(on_finished) = finished {
            log::trace!("animatable settled at frame {}", frame_time_nanos);
            on_finished();
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
