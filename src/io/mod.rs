// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

/// Planar output: one buffer per channel, all the same length.
///
/// The host allocates it once; the engine only writes into it.
#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    /// Frames writable in every channel (the shortest channel wins).
    pub fn frames(&self) -> usize {
        self.buffers.iter().map(Vec::len).min().unwrap_or(0)
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.buffers[index]
    }
}
