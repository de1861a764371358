//! Synth parameters: ids, ranges, snapshots and the lock-free store.
//!
//! Every float parameter is unit-less with range 0..1. The four `*Time`
//! parameters are read as seconds, `sTime` doubles as the sustain level, and
//! `aVel` sets the attack peak. `dVel`, `sVel` and `rVel` are stored and
//! automatable but do not shape the amplitude envelope.

mod shared;
mod snapshot;

use std::{fmt, str::FromStr};

use crate::error::ParamError;

pub use shared::{AtomicParam, SharedParams};
pub use snapshot::ParamSnapshot;

/// Identifier for each continuous parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Level,
    AttackTime,
    DecayTime,
    SustainTime,
    ReleaseTime,
    AttackVel,
    DecayVel,
    SustainVel,
    ReleaseVel,
}

/// Range, default and UI step of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub step: f32,
}

impl ParamSpec {
    const fn unit(default: f32) -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            default,
            step: 0.05,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        value.clamp(self.min, self.max)
    }
}

impl ParamId {
    pub const ALL: [ParamId; 9] = [
        ParamId::Level,
        ParamId::AttackTime,
        ParamId::DecayTime,
        ParamId::SustainTime,
        ParamId::ReleaseTime,
        ParamId::AttackVel,
        ParamId::DecayVel,
        ParamId::SustainVel,
        ParamId::ReleaseVel,
    ];

    /// Host-facing id string.
    pub fn id(self) -> &'static str {
        match self {
            ParamId::Level => "level",
            ParamId::AttackTime => "aTime",
            ParamId::DecayTime => "dTime",
            ParamId::SustainTime => "sTime",
            ParamId::ReleaseTime => "rTime",
            ParamId::AttackVel => "aVel",
            ParamId::DecayVel => "dVel",
            ParamId::SustainVel => "sVel",
            ParamId::ReleaseVel => "rVel",
        }
    }

    pub fn spec(self) -> ParamSpec {
        match self {
            ParamId::Level => ParamSpec::unit(0.5),
            ParamId::AttackTime => ParamSpec::unit(0.0),
            ParamId::DecayTime => ParamSpec::unit(0.1),
            ParamId::SustainTime => ParamSpec::unit(0.5),
            ParamId::ReleaseTime => ParamSpec::unit(0.1),
            ParamId::AttackVel => ParamSpec::unit(0.8),
            ParamId::DecayVel => ParamSpec::unit(0.5),
            ParamId::SustainVel => ParamSpec::unit(0.5),
            ParamId::ReleaseVel => ParamSpec::unit(0.5),
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ParamId {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| ParamError::UnknownParam(s.to_string()))
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_back() {
        for param in ParamId::ALL {
            assert_eq!(param.id().parse::<ParamId>(), Ok(param));
        }
        assert_eq!(
            "cutoff".parse::<ParamId>(),
            Err(ParamError::UnknownParam("cutoff".into()))
        );
    }

    #[test]
    fn index_matches_table_position() {
        for (i, param) in ParamId::ALL.into_iter().enumerate() {
            assert_eq!(param.index(), i);
        }
    }

    #[test]
    fn clamp_keeps_values_in_range() {
        let spec = ParamId::Level.spec();
        assert_eq!(spec.clamp(1.5), 1.0);
        assert_eq!(spec.clamp(-0.2), 0.0);
        assert_eq!(spec.clamp(f32::NAN), spec.default);
    }
}
