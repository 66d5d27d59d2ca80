#![allow(
    // Sample maths mixes f32/f64 freely; precision is irrelevant at audio scale
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use anyhow::Result;
use bevy_ecs::prelude::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use fundsp::hacker32::*;
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::config::AudioConfig;

// Volume sliders move in 5% steps
pub const VOLUME_STEP: f32 = 0.05;

// Length of the pre-rendered background loop
const MUSIC_LOOP_SECONDS: f64 = 8.0;

// Sound effects types that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Eat,
    JumpUp,
    JumpDown,
    GameStart,
    GameOver,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Eat,
        SoundEffect::JumpUp,
        SoundEffect::JumpDown,
        SoundEffect::GameStart,
        SoundEffect::GameOver,
    ];

    /// Seconds after which the effect is silent.
    #[must_use]
    pub fn duration(self) -> f64 {
        match self {
            SoundEffect::Eat => 0.12,
            SoundEffect::JumpUp | SoundEffect::JumpDown => 0.15,
            SoundEffect::GameStart => 0.6,
            SoundEffect::GameOver => 1.5,
        }
    }
}

// Command to control the audio thread
enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool), // true to start from the top, false to stop
    SetVolumes { music: f32, sfx: f32 },
}

// Global audio state
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    available: Arc<AtomicBool>,
    sound_enabled: bool,
    music_playing: bool,
    music_volume: f32,
    sfx_volume: f32,
}

impl AudioState {
    pub fn new() -> Self {
        Self::from_config(&AudioConfig::default())
    }

    /// Starts the audio thread with the given preferences.
    pub fn from_config(config: &AudioConfig) -> Self {
        let (sender, receiver) = bounded(64);
        let available = Arc::new(AtomicBool::new(true));
        let thread_available = Arc::clone(&available);
        let config = config.clone().sanitized();
        let (music, sfx) = (config.music_volume, config.sfx_volume);

        // Start the audio thread
        thread::spawn(move || {
            if let Err(e) = run_audio_thread(receiver, music, sfx) {
                thread_available.store(false, Ordering::Relaxed);
                error!("Audio thread error: {e}");
            }
        });

        Self {
            sender: Some(sender),
            available,
            sound_enabled: config.sound_enabled,
            music_playing: false,
            music_volume: config.music_volume,
            sfx_volume: config.sfx_volume,
        }
    }

    /// An audio state with no output thread; every call is a no-op.
    pub fn silent(config: &AudioConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            sender: None,
            available: Arc::new(AtomicBool::new(false)),
            sound_enabled: config.sound_enabled,
            music_playing: false,
            music_volume: config.music_volume,
            sfx_volume: config.sfx_volume,
        }
    }

    pub fn is_audio_available(&self) -> bool {
        self.sender.is_some() && self.available.load(Ordering::Relaxed)
    }

    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if !self.sound_enabled {
            return false;
        }
        self.send(AudioCommand::PlaySound(effect));
        true
    }

    pub fn start_music(&mut self) {
        self.music_playing = true;
        if self.sound_enabled {
            self.send(AudioCommand::PlayMusic(true));
        }
    }

    pub fn stop_music(&mut self) {
        self.music_playing = false;
        self.send(AudioCommand::PlayMusic(false));
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing && self.sound_enabled
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Flips sound on or off. Music that should be playing resumes from the top.
    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
        self.send(AudioCommand::PlayMusic(
            self.sound_enabled && self.music_playing,
        ));
    }

    pub fn get_music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn get_sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = round_to_step(volume);
        self.send_volumes();
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = round_to_step(volume);
        self.send_volumes();
    }

    /// Current preferences, for writing back to the config file.
    pub fn to_config(&self) -> AudioConfig {
        AudioConfig {
            sound_enabled: self.sound_enabled,
            music_volume: self.music_volume,
            sfx_volume: self.sfx_volume,
        }
    }

    fn send_volumes(&self) {
        self.send(AudioCommand::SetVolumes {
            music: self.music_volume,
            sfx: self.sfx_volume,
        });
    }

    fn send(&self, command: AudioCommand) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(command);
        }
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new()
    }
}

// Clamp into 0..=1 and snap to the slider step so repeated nudges don't drift
fn round_to_step(volume: f32) -> f32 {
    ((volume.clamp(0.0, 1.0) / VOLUME_STEP).round() * VOLUME_STEP).clamp(0.0, 1.0)
}

fn run_audio_thread(receiver: Receiver<AudioCommand>, music: f32, sfx: f32) -> Result<()> {
    // Get the default audio device
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;
    debug!("Audio output: {:?}", config);

    let mixer = Mixer::new(f64::from(config.sample_rate().0), music, sfx);

    // Set up audio stream based on the device's sample format
    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => run_audio_stream::<f32>(&device, &config.into(), receiver, mixer)?,
        cpal::SampleFormat::I16 => run_audio_stream::<i16>(&device, &config.into(), receiver, mixer)?,
        cpal::SampleFormat::U16 => run_audio_stream::<u16>(&device, &config.into(), receiver, mixer)?,
        _ => return Err(anyhow::anyhow!("Unsupported audio format")),
    };

    // The stream lives as long as this thread; park until the process exits
    loop {
        thread::park();
    }
}

/// Mixes active effects and the music loop into stereo samples.
pub struct Mixer {
    sample_rate: f64,
    music: Vec<f32>,
    music_cursor: usize,
    music_on: bool,
    music_volume: f32,
    sfx_volume: f32,
    active: Vec<(SoundEffect, f64)>,
    current_time: f64,
}

impl Mixer {
    pub fn new(sample_rate: f64, music_volume: f32, sfx_volume: f32) -> Self {
        Self {
            sample_rate,
            music: render_music_loop(sample_rate),
            music_cursor: 0,
            music_on: false,
            music_volume,
            sfx_volume,
            active: Vec::new(),
            current_time: 0.0,
        }
    }

    fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::PlaySound(effect) => self.active.push((effect, self.current_time)),
            AudioCommand::PlayMusic(on) => {
                self.music_on = on;
                self.music_cursor = 0;
            }
            AudioCommand::SetVolumes { music, sfx } => {
                self.music_volume = music;
                self.sfx_volume = sfx;
            }
        }
    }

    pub fn next_sample(&mut self) -> (f32, f32) {
        let now = self.current_time;
        self.active
            .retain(|(effect, start)| now - start <= effect.duration());

        let (mut left, mut right) = (0.0, 0.0);
        for (effect, start) in &self.active {
            let (l, r) = generate_sound_sample(*effect, now - start);
            left += l * self.sfx_volume;
            right += r * self.sfx_volume;
        }

        if self.music_on && !self.music.is_empty() {
            let sample = self.music[self.music_cursor] * self.music_volume;
            self.music_cursor = (self.music_cursor + 1) % self.music.len();
            left += sample;
            right += sample;
        }

        self.current_time += 1.0 / self.sample_rate;

        // Limiter
        (left.clamp(-1.0, 1.0), right.clamp(-1.0, 1.0))
    }
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    receiver: Receiver<AudioCommand>,
    mut mixer: Mixer,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;

    // Callback for error handling
    let err_fn = |err| error!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            while let Ok(command) = receiver.try_recv() {
                mixer.apply(command);
            }
            for frame in data.chunks_mut(channels) {
                let (left, right) = mixer.next_sample();
                let left = T::from_sample(left);
                let right = T::from_sample(right);

                for (channel, sample) in frame.iter_mut().enumerate() {
                    *sample = if channel & 1 == 0 { left } else { right };
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(stream)
}

// Generate a sound sample for a given effect and time
pub fn generate_sound_sample(effect: SoundEffect, t: f64) -> (f32, f32) {
    if t > effect.duration() {
        return (0.0, 0.0);
    }
    let t = t as f32;

    match effect {
        SoundEffect::Eat => {
            // Quick "chomp": a falling blip with a bit of noise
            let freq = 520.0 - 1800.0 * t;
            let amp = (0.12 - t).max(0.0) * 4.0;
            let tone = (t * freq * std::f32::consts::TAU).sin() * 0.3;
            let noise = (fastrand::f32() - 0.5) * 0.1;
            let sample = (tone + noise) * amp;
            (sample, sample)
        }
        SoundEffect::JumpUp => {
            // Rising chirp
            let freq = 400.0 + 2400.0 * t;
            let amp = (0.15 - t).max(0.0) * 3.0;
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp * 0.3;
            (sample, sample)
        }
        SoundEffect::JumpDown => {
            // Falling chirp
            let freq = 760.0 - 2400.0 * t;
            let amp = (0.15 - t).max(0.0) * 3.0;
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp * 0.3;
            (sample, sample)
        }
        SoundEffect::GameStart => {
            // C-E-G arpeggio
            let (freq, amp) = if t < 0.2 {
                (523.25, 0.4)
            } else if t < 0.4 {
                (659.25, 0.4)
            } else {
                (783.99, (0.6 - t).max(0.0) * 2.0)
            };
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp * 0.4;
            (sample, sample)
        }
        SoundEffect::GameOver => {
            // The silence wins: slow descending pitch
            let freq = 440.0 - 250.0 * t;
            let amp = (1.5 - t).max(0.0) * 0.5;
            let sample = (t * freq * std::f32::consts::TAU).sin() * amp * 0.4;
            (sample, sample)
        }
    }
}

// Background music: a walking bass under a pentatonic melody
fn create_background_music() -> Box<dyn AudioUnit> {
    let bass = lfo(|t| {
        let notes = [65.41, 82.41, 98.0, 82.41];
        notes[((t * 2.0) as usize) % notes.len()]
    }) >> sine() * 0.12;

    let melody = lfo(|t| {
        let notes = [261.63, 293.66, 329.63, 392.0, 440.0, 392.0, 329.63, 293.66];
        notes[((t * 4.0) as usize) % notes.len()]
    }) >> sine() * 0.08;

    // Gentle pulse on each beat
    let pulse = lfo(|t| if (t * 2.0) % 1.0 < 0.08 { 0.04 } else { 0.0 }) * sine_hz(880.0);

    Box::new((bass + melody + pulse) * 0.6)
}

/// Renders one pass of the music loop at `sample_rate`.
pub fn render_music_loop(sample_rate: f64) -> Vec<f32> {
    let mut music = create_background_music();
    music.set_sample_rate(sample_rate);
    music.reset();

    let sample_count = (sample_rate * MUSIC_LOOP_SECONDS) as usize;
    (0..sample_count).map(|_| music.get_mono()).collect()
}
