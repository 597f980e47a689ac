//! Runtime primitives shared by the carousel crates.
//!
//! Everything here is single-threaded: state lives behind `Rc`/`RefCell` and
//! is mutated only from the host's event loop.

pub mod collections;
mod frame_clock;
mod state;

pub use frame_clock::{FrameCallbackId, FrameCallbackRegistration, FrameClock};
pub use state::{MutableState, State, Subscription};
