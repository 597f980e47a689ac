//! Animation system for the carousel crates.
//!
//! Frame-driven springs ([`Animatable`]) plus decay specs used to predict where
//! momentum comes to rest.

mod animation;
mod decay;

pub use animation::{Animatable, Lerp, SpringScalar, SpringSpec};
pub use decay::{DecaySpec, ExponentialDecaySpec, FlingCalculator, SplineBasedDecaySpec};
