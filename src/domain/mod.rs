//! Domain types: bodies, configuration and presets

pub mod body;
pub mod config;
pub mod presets;

pub use body::{Body, Kinematics, MassPolicy};
pub use config::{
    CorrectionSpec, CorrectionSplit, RadiusSpec, ResizePolicy, SimConfig, VelocitySpec, Viewport,
};
pub use presets::Preset;
