//! Core building blocks shared by every other module

pub mod error;
pub mod logging;
pub mod random;
pub mod vec2;

pub use error::{Diagnostic, SimError};
pub use random::SimRng;
pub use vec2::Vec2;
