//! Decay specifications: where does a release velocity come to rest?
//!
//! A decay has no fixed target. It starts with a velocity and decelerates to
//! zero, so the resting value is a function of the initial value and velocity.
//! Gesture code uses this to predict the end of momentum before committing to
//! a snap target.

/// Tension curve inflection point of the platform fling spline.
const INFLECTION: f64 = 0.35;
/// Earth's gravity in SI units (m/s²).
const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
/// (ln(0.78) / ln(0.9)).abs()
const DECELERATION_RATE: f64 = 2.358_201_6;
/// Physical coefficient applied on top of the scroll friction.
const PHYSICAL_FRICTION: f32 = 0.84;
/// Friction scale of the exponential decay curve.
const EXPONENTIAL_DECAY_FRICTION: f32 = -4.2;

/// Physical deceleration for a friction at a given display density.
fn compute_deceleration(friction: f32, density: f32) -> f32 {
    GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * friction
}

/// Fling distance using the platform scroller physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    magic_physical_coefficient: f32,
}

impl FlingCalculator {
    /// Platform default scroll friction.
    pub const DEFAULT_FRICTION: f32 = 0.015;

    /// `density` is the number of pixels per logical pixel (1.0 at baseline).
    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            magic_physical_coefficient: compute_deceleration(PHYSICAL_FRICTION, density),
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        let friction = (self.friction * self.magic_physical_coefficient) as f64;
        (INFLECTION * velocity.abs() as f64 / friction).ln()
    }

    /// Unsigned distance a fling travels before coming to rest.
    pub fn fling_distance(&self, velocity: f32) -> f32 {
        let l = self.spline_deceleration(velocity);
        let decel_minus_one = DECELERATION_RATE - 1.0;
        self.friction
            * self.magic_physical_coefficient
            * (DECELERATION_RATE / decel_minus_one * l).exp() as f32
    }
}

impl Default for FlingCalculator {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

/// Where a value released with some velocity comes to rest.
pub trait DecaySpec {
    /// Resting value for a decay starting at `initial_value`.
    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Decay matching the platform's native fling deceleration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self {
            calculator: FlingCalculator::with_density(density),
        }
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }
}

impl DecaySpec for SplineBasedDecaySpec {
    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if initial_velocity == 0.0 || !initial_velocity.is_finite() {
            return initial_value;
        }
        let distance = self.calculator.fling_distance(initial_velocity);
        initial_value + distance * initial_velocity.signum()
    }
}

/// Exponential velocity decay, `v(t) = v0 * e^(friction * t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    friction: f32,
}

impl ExponentialDecaySpec {
    /// `friction_multiplier` > 1 stops sooner, < 1 glides further.
    pub fn new(friction_multiplier: f32) -> Self {
        Self {
            friction: friction_multiplier.max(0.0001) * EXPONENTIAL_DECAY_FRICTION,
        }
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl DecaySpec for ExponentialDecaySpec {
    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        if !initial_velocity.is_finite() {
            return initial_value;
        }
        initial_value - initial_velocity / self.friction
    }
}
