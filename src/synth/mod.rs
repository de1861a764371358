// Purpose: Voice management, polyphony, note routing
// This layer sits above the dsp primitives and turns note events into a mix

pub mod allocator;
pub mod context;
pub mod event;
pub mod message;
pub mod poly;
pub mod voice;

pub use context::RenderCtx;
pub use message::{MessageReceiver, SynthMessage};
pub use voice::{Voice, VoiceState};
