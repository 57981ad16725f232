//! Named configurations for the common looks of the effect.

use crate::core::SimError;

use super::body::MassPolicy;
use super::config::{
    CorrectionSpec, CorrectionSplit, RadiusSpec, ResizePolicy, SimConfig, VelocitySpec,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Grid broad phase, area mass, near-elastic impulses
    Drift,
    Calm,
    Soft,
    /// Gravity, speed clamp and stall kicks
    Sport,
    /// A few discs sized from the viewport
    Giants,
    Steady,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Drift,
        Preset::Calm,
        Preset::Soft,
        Preset::Sport,
        Preset::Giants,
        Preset::Steady,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Drift => "drift",
            Preset::Calm => "calm",
            Preset::Soft => "soft",
            Preset::Sport => "sport",
            Preset::Giants => "giants",
            Preset::Steady => "steady",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }

    pub fn by_name(name: &str) -> Result<Self, SimError> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SimError::UnknownPreset(name.to_string()))
    }

    pub fn config(self) -> SimConfig {
        match self {
            Preset::Drift => SimConfig {
                count: 12,
                count_bounds: (6, 15),
                radii: RadiusSpec::Curve { min: 20.0, max: 45.0, exponent: 1.5 },
                velocity: VelocitySpec::Polar { speed: 14.0, jitter: 0.2 },
                mass_policy: MassPolicy::Area,
                wall_damping: 0.96,
                spring_back: 0.1,
                restitution: 0.98,
                air_resistance: Some(0.0001),
                max_speed: None,
                gravity: None,
                stall_speed: None,
                correction: CorrectionSpec { split: CorrectionSplit::RadiusWeighted, overshoot: 1.2 },
                cell_size_factor: 2.5,
                placement_attempts: 100,
                resize_policy: ResizePolicy::Replace,
                seed: None,
            },
            Preset::Calm => SimConfig {
                count: 9,
                count_bounds: (6, 12),
                radii: RadiusSpec::Curve { min: 18.0, max: 36.0, exponent: 1.5 },
                velocity: VelocitySpec::Polar { speed: 12.0, jitter: 0.2 },
                restitution: 0.92,
                wall_damping: 0.97,
                air_resistance: Some(0.00005),
                correction: CorrectionSpec { split: CorrectionSplit::Equal, overshoot: 1.0 },
                cell_size_factor: 2.2,
                ..Preset::Drift.config()
            },
            Preset::Soft => SimConfig {
                count: 15,
                count_bounds: (5, 30),
                radii: RadiusSpec::Uniform { min: 20.0, max: 40.0 },
                velocity: VelocitySpec::InverseRadius { speed: 6.0, reference_radius: 40.0 },
                restitution: 0.8,
                wall_damping: 0.95,
                correction: CorrectionSpec { split: CorrectionSplit::Equal, overshoot: 1.0 },
                cell_size_factor: 2.0,
                placement_attempts: 50,
                resize_policy: ResizePolicy::Rescale,
                ..Preset::Drift.config()
            },
            Preset::Sport => SimConfig {
                count: 30,
                count_bounds: (10, 60),
                radii: RadiusSpec::Uniform { min: 10.0, max: 30.0 },
                velocity: VelocitySpec::Axis { speed: 5.0 },
                mass_policy: MassPolicy::Radius,
                wall_damping: 1.0,
                spring_back: 0.0,
                restitution: 1.0,
                air_resistance: None,
                max_speed: Some(10.0),
                gravity: Some(0.1),
                stall_speed: Some(0.1),
                correction: CorrectionSpec { split: CorrectionSplit::Equal, overshoot: 1.0 },
                cell_size_factor: 2.0,
                ..Preset::Drift.config()
            },
            Preset::Giants => SimConfig {
                count: 3,
                count_bounds: (1, 5),
                radii: RadiusSpec::ViewportFraction { min: 0.2, max: 0.33 },
                velocity: VelocitySpec::Axis { speed: 8.0 },
                mass_policy: MassPolicy::Radius,
                wall_damping: 0.9,
                spring_back: 0.0,
                restitution: 1.0,
                air_resistance: None,
                correction: CorrectionSpec { split: CorrectionSplit::Equal, overshoot: 1.0 },
                cell_size_factor: 2.0,
                placement_attempts: 200,
                ..Preset::Drift.config()
            },
            Preset::Steady => SimConfig {
                count: 10,
                count_bounds: (4, 20),
                radii: RadiusSpec::Uniform { min: 20.0, max: 40.0 },
                velocity: VelocitySpec::Axis { speed: 8.0 },
                mass_policy: MassPolicy::Radius,
                wall_damping: 0.92,
                restitution: 1.0,
                air_resistance: None,
                stall_speed: Some(0.15),
                correction: CorrectionSpec { split: CorrectionSplit::Equal, overshoot: 1.1 },
                cell_size_factor: 2.0,
                ..Preset::Drift.config()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_validates() {
        for preset in Preset::ALL {
            preset
                .config()
                .validate()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", preset.name()));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Preset::by_name("SPORT").unwrap(), Preset::Sport);
        assert!(matches!(Preset::by_name("nope"), Err(SimError::UnknownPreset(_))));
    }

    #[test]
    fn names_cover_all_presets() {
        assert_eq!(Preset::names().len(), Preset::ALL.len());
    }
}
