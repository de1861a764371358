use std::sync::atomic::{AtomicU32, AtomicU64, AtomicU8, Ordering};

use super::{ParamId, ParamSnapshot, ParamSpec};
use crate::{dsp::oscillator::Waveform, error::ParamError};

/// A thread-safe atomic parameter using bit-cast f32.
///
/// Control thread writes, audio thread reads. No locks, no allocations.
#[derive(Debug)]
pub struct AtomicParam {
    value: AtomicU32,
    spec: ParamSpec,
}

impl AtomicParam {
    pub fn new(spec: ParamSpec) -> Self {
        Self {
            value: AtomicU32::new(spec.default.to_bits()),
            spec,
        }
    }

    /// Set the parameter value, clamped to its range.
    #[inline]
    pub fn set(&self, v: f32) {
        let clamped = self.spec.clamp(v);
        self.value.store(clamped.to_bits(), Ordering::Release);
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.value.load(Ordering::Acquire))
    }

    pub fn spec(&self) -> ParamSpec {
        self.spec
    }

    /// Reset to default value.
    pub fn reset(&self) {
        self.set(self.spec.default);
    }
}

/// The live parameter set shared between the control thread and the engine.
///
/// Wrap it in an `Arc`; the engine keeps one clone and reads it every sample,
/// the control side keeps another and writes whenever a knob moves. Each value
/// is individually atomic, so a snapshot taken mid-update may mix old and new
/// values for one sample, never a torn float.
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicParam; 9],
    waveform: AtomicU8,
    version: AtomicU64,
}

impl SharedParams {
    pub fn new() -> Self {
        Self {
            values: ParamId::ALL.map(|p| AtomicParam::new(p.spec())),
            waveform: AtomicU8::new(Waveform::default().index()),
            version: AtomicU64::new(0),
        }
    }

    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        let params = Self::new();
        params.load(snapshot);
        params
    }

    #[inline]
    pub fn get(&self, param: ParamId) -> f32 {
        self.values[param.index()].get()
    }

    pub fn set(&self, param: ParamId, value: f32) {
        self.values[param.index()].set(value);
        self.bump();
        tracing::trace!(param = param.id(), value, "parameter changed");
    }

    /// Set a parameter by its host id (`"aTime"`, `"level"`, ...).
    pub fn set_by_name(&self, id: &str, value: f32) -> Result<(), ParamError> {
        let param: ParamId = id.parse()?;
        self.set(param, value);
        Ok(())
    }

    #[inline]
    pub fn waveform(&self) -> Waveform {
        // only valid indices are ever stored
        Waveform::try_from(self.waveform.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn set_waveform(&self, waveform: Waveform) {
        self.waveform.store(waveform.index(), Ordering::Release);
        self.bump();
        tracing::trace!(waveform = waveform.name(), "waveform changed");
    }

    /// Select the waveform by choice index, as a host automation lane would.
    pub fn set_waveform_index(&self, index: u8) -> Result<(), ParamError> {
        self.set_waveform(Waveform::try_from(index)?);
        Ok(())
    }

    /// Copy every current value. Lock-free; safe on the audio thread.
    #[inline]
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            level: self.get(ParamId::Level),
            attack_time: self.get(ParamId::AttackTime),
            decay_time: self.get(ParamId::DecayTime),
            sustain_time: self.get(ParamId::SustainTime),
            release_time: self.get(ParamId::ReleaseTime),
            attack_vel: self.get(ParamId::AttackVel),
            decay_vel: self.get(ParamId::DecayVel),
            sustain_vel: self.get(ParamId::SustainVel),
            release_vel: self.get(ParamId::ReleaseVel),
            waveform: self.waveform(),
        }
    }

    /// Overwrite every value from a snapshot (patch load).
    pub fn load(&self, snapshot: &ParamSnapshot) {
        for param in ParamId::ALL {
            self.values[param.index()].set(snapshot.get(param));
        }
        self.waveform
            .store(snapshot.waveform.index(), Ordering::Release);
        self.bump();
        tracing::debug!(?snapshot, "parameters loaded");
    }

    /// Put every parameter back to its default.
    pub fn reset(&self) {
        for value in &self.values {
            value.reset();
        }
        self.waveform
            .store(Waveform::default().index(), Ordering::Release);
        self.bump();
    }

    /// Monotonic counter bumped on every write.
    ///
    /// A UI polls this to learn that values changed without diffing them.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    fn bump(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}
