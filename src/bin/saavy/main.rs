//! saavy - play a demo phrase through the voice engine
//!
//! Run with: cargo run -- [config.toml] [name=value ...]
//!
//! Overrides such as `aTime=0.2` or `waveform=Saw` are applied on top of the
//! config file's patch. `RUST_LOG=debug` shows engine and parameter events.

use std::{sync::Arc, thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, RingBuffer};
use tracing_subscriber::EnvFilter;

use saavy_synth::{
    dsp::Waveform,
    synth::SynthMessage,
    EngineConfig, PolySynth, SharedParams, SynthConfig,
};

/// Control messages buffered between the player thread and the audio callback
const MESSAGE_QUEUE_SIZE: usize = 256;

/// Chords of the demo phrase, one per bar
const PHRASE: &[[u8; 3]] = &[[57, 60, 64], [53, 57, 60], [48, 52, 55], [55, 59, 62]];

const BEAT: Duration = Duration::from_millis(250);

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = load_config()?;
    run(config)
}

fn load_config() -> EyreResult<SynthConfig> {
    let mut args = std::env::args().skip(1).peekable();

    let mut config = match args.next_if(|arg| !arg.contains('=')) {
        Some(path) => SynthConfig::load(&path).wrap_err_with(|| format!("loading {path}"))?,
        None => SynthConfig::default(),
    };
    for assignment in args {
        config
            .apply_override(&assignment)
            .wrap_err_with(|| format!("applying override '{assignment}'"))?;
    }
    Ok(config)
}

fn run(config: SynthConfig) -> EyreResult<()> {
    // Set up audio
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0 as f32;
    let channels = stream_config.channels() as usize;

    tracing::info!(sample_rate, channels, "audio device ready");
    tracing::info!(
        voices = config.engine.max_voices,
        stealing = ?config.engine.stealing,
        waveform = %config.patch.waveform,
        "engine config"
    );

    let params = Arc::new(SharedParams::from_snapshot(&config.patch));
    let engine = EngineConfig {
        sample_rate,
        ..config.engine
    };
    let mut synth = PolySynth::new(&engine, Arc::clone(&params));
    synth.prepare(sample_rate);

    let (mut tx, mut rx) = RingBuffer::<SynthMessage>::new(MESSAGE_QUEUE_SIZE);

    // The synth moves into the callback; from here on only the audio thread touches it
    let stream = device.build_output_stream(
        &stream_config.into(),
        move |data: &mut [f32], _| {
            synth.drain_messages(&mut rx);
            synth.render_interleaved(&[], data, channels);
        },
        |err| tracing::error!(%err, "audio stream error"),
        None,
    )?;

    stream.play()?;
    tracing::info!("playing demo phrase");

    for waveform in Waveform::ALL {
        params.set_waveform(waveform);
        tracing::info!(%waveform, "waveform");
        play_phrase(&mut tx);
    }

    // Let the last release ring out
    send(&mut tx, SynthMessage::AllNotesOff);
    thread::sleep(Duration::from_secs_f32(config.patch.release_time + 0.25));
    Ok(())
}

fn play_phrase(tx: &mut Producer<SynthMessage>) {
    for chord in PHRASE {
        // Arpeggiate up, hold, then release the chord
        for &note in chord {
            send(tx, SynthMessage::NoteOn { note, velocity: 100 });
            thread::sleep(BEAT);
        }
        thread::sleep(BEAT);
        for &note in chord {
            send(tx, SynthMessage::NoteOff { note, velocity: 0 });
        }
    }
}

fn send(tx: &mut Producer<SynthMessage>, msg: SynthMessage) {
    if tx.push(msg).is_err() {
        tracing::warn!(?msg, "message queue full, dropping");
    }
}
