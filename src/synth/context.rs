use crate::{dsp::envelope::EnvelopeShape, params::ParamSnapshot};

/// Everything a voice needs to render one sample.
///
/// Built once per sample by the engine and shared by every voice, so the
/// parameter snapshot and the derived envelope shape are computed once rather
/// than once per voice.
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub params: ParamSnapshot,
    pub shape: EnvelopeShape,
}

impl RenderCtx {
    pub fn new(sample_rate: f32, params: ParamSnapshot) -> Self {
        Self {
            sample_rate,
            shape: EnvelopeShape::from_params(&params),
            params,
        }
    }
}
