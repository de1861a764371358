#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ParamId;
use crate::dsp::oscillator::Waveform;

/// A plain copy of every parameter value at one instant.
///
/// The audio thread takes one per rendered sample from
/// [`SharedParams::snapshot`](super::SharedParams::snapshot); patches are
/// stored and loaded in this form. Serialized field names match the host ids.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub level: f32,
    #[cfg_attr(feature = "serde", serde(rename = "aTime"))]
    pub attack_time: f32,
    #[cfg_attr(feature = "serde", serde(rename = "dTime"))]
    pub decay_time: f32,
    #[cfg_attr(feature = "serde", serde(rename = "sTime"))]
    pub sustain_time: f32,
    #[cfg_attr(feature = "serde", serde(rename = "rTime"))]
    pub release_time: f32,
    #[cfg_attr(feature = "serde", serde(rename = "aVel"))]
    pub attack_vel: f32,
    #[cfg_attr(feature = "serde", serde(rename = "dVel"))]
    pub decay_vel: f32,
    #[cfg_attr(feature = "serde", serde(rename = "sVel"))]
    pub sustain_vel: f32,
    #[cfg_attr(feature = "serde", serde(rename = "rVel"))]
    pub release_vel: f32,
    pub waveform: Waveform,
}

impl ParamSnapshot {
    pub fn get(&self, param: ParamId) -> f32 {
        match param {
            ParamId::Level => self.level,
            ParamId::AttackTime => self.attack_time,
            ParamId::DecayTime => self.decay_time,
            ParamId::SustainTime => self.sustain_time,
            ParamId::ReleaseTime => self.release_time,
            ParamId::AttackVel => self.attack_vel,
            ParamId::DecayVel => self.decay_vel,
            ParamId::SustainVel => self.sustain_vel,
            ParamId::ReleaseVel => self.release_vel,
        }
    }

    /// Store `value` clamped to the parameter's range.
    pub fn set(&mut self, param: ParamId, value: f32) {
        let value = param.spec().clamp(value);
        let slot = match param {
            ParamId::Level => &mut self.level,
            ParamId::AttackTime => &mut self.attack_time,
            ParamId::DecayTime => &mut self.decay_time,
            ParamId::SustainTime => &mut self.sustain_time,
            ParamId::ReleaseTime => &mut self.release_time,
            ParamId::AttackVel => &mut self.attack_vel,
            ParamId::DecayVel => &mut self.decay_vel,
            ParamId::SustainVel => &mut self.sustain_vel,
            ParamId::ReleaseVel => &mut self.release_vel,
        };
        *slot = value;
    }

    pub fn with(mut self, param: ParamId, value: f32) -> Self {
        self.set(param, value);
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Every value pulled back into range. Used on patches read from disk.
    pub fn clamped(mut self) -> Self {
        for param in ParamId::ALL {
            self.set(param, self.get(param));
        }
        self
    }
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            level: ParamId::Level.spec().default,
            attack_time: ParamId::AttackTime.spec().default,
            decay_time: ParamId::DecayTime.spec().default,
            sustain_time: ParamId::SustainTime.spec().default,
            release_time: ParamId::ReleaseTime.spec().default,
            attack_vel: ParamId::AttackVel.spec().default,
            decay_vel: ParamId::DecayVel.spec().default,
            sustain_vel: ParamId::SustainVel.spec().default,
            release_vel: ParamId::ReleaseVel.spec().default,
            waveform: Waveform::Sine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_parameter_table() {
        let snapshot = ParamSnapshot::default();
        for param in ParamId::ALL {
            assert_eq!(snapshot.get(param), param.spec().default, "{param}");
        }
        assert_eq!(snapshot.waveform, Waveform::Sine);
    }

    #[test]
    fn set_clamps_out_of_range_values() {
        let snapshot = ParamSnapshot::default()
            .with(ParamId::Level, 4.0)
            .with(ParamId::ReleaseTime, -1.0);
        assert_eq!(snapshot.level, 1.0);
        assert_eq!(snapshot.release_time, 0.0);
    }
}
