// Tone engine - CPAL realtime callback
//
// # Format Support
//
// The engine renders f32 internally and converts when writing the device
// buffer. F32, I16 and U16 devices are supported; the format is picked from
// the device's `default_output_config()`.
//
// # Threading
//
// The game loop pushes `SynthCommand`s into a ringbuf; the callback owns the
// consumer and the mixer, so nothing is shared behind a lock.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig};
use ringbuf::traits::{Consumer, Producer};

use crate::audio::DEFAULT_VOLUME;
use crate::audio::dsp_utils::{OnePoleSmoother, flush_denormals_to_zero, soft_clip};
use crate::audio::format_conversion::write_mono_to_interleaved_frame;
use crate::audio::mixer::ToneMixer;
use crate::audio::platform::ToneSink;
use crate::audio::tone::Tone;
use crate::connection::status::{AtomicDeviceStatus, DeviceStatus};
use crate::error::{PitchJumpError, Result};
use crate::messaging::channels::{CommandConsumer, CommandProducer, create_command_channel};
use crate::messaging::command::SynthCommand;

const COMMAND_CAPACITY: usize = 64;

pub struct ToneEngine {
    _device: Device,
    _stream: Stream,
    command_tx: CommandProducer,
    status: AtomicDeviceStatus,
}

impl ToneEngine {
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| PitchJumpError::Initialization("no audio output device".to_string()))?;

        log::info!(
            "Audio device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let supported_config = device
            .default_output_config()
            .map_err(|e| PitchJumpError::Initialization(format!("audio config: {}", e)))?;

        let sample_format = supported_config.sample_format();
        let sample_rate = supported_config.sample_rate().0 as f32;
        let channels = supported_config.channels() as usize;
        let config: StreamConfig = supported_config.into();

        log::debug!("Sample format: {:?}, {} channels", sample_format, channels);

        let (command_tx, command_rx) = create_command_channel(COMMAND_CAPACITY);
        let status = AtomicDeviceStatus::new(DeviceStatus::Connecting);

        let parts = CallbackParts {
            command_rx,
            mixer: ToneMixer::new(sample_rate),
            target_gain: DEFAULT_VOLUME,
            smoother: OnePoleSmoother::new(DEFAULT_VOLUME, 10.0, sample_rate),
            status: status.clone(),
        };

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, channels, parts),
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, channels, parts),
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, channels, parts),
            other => {
                return Err(PitchJumpError::PlatformUnsupported(format!(
                    "sample format {:?} (supported: F32, I16, U16)",
                    other
                )));
            }
        }?;

        stream
            .play()
            .map_err(|e| PitchJumpError::Initialization(format!("audio stream start: {}", e)))?;

        status.set(DeviceStatus::Connected);
        log::info!("Tone engine started: {} Hz, {} channels", sample_rate, channels);

        Ok(Self {
            _device: device,
            _stream: stream,
            command_tx,
            status,
        })
    }

    fn send(&mut self, command: SynthCommand) {
        if self.command_tx.try_push(command).is_err() {
            log::warn!("Synth command buffer full, {:?} dropped", command);
        }
    }

    fn build_stream<T>(
        device: &Device,
        config: &StreamConfig,
        channels: usize,
        parts: CallbackParts,
    ) -> Result<Stream>
    where
        T: SizedSample + FromSample<f32> + Send + 'static,
    {
        let CallbackParts {
            mut command_rx,
            mut mixer,
            mut target_gain,
            mut smoother,
            status,
        } = parts;

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    // ========== SACRED ZONE ==========
                    // No allocations, No I/O, No blocking locks

                    while let Some(command) = command_rx.try_pop() {
                        match command {
                            SynthCommand::Play(tone) => mixer.play(tone),
                            SynthCommand::SetVolume(v) => target_gain = v,
                        }
                    }

                    for frame in data.chunks_mut(channels) {
                        let gain = smoother.process(target_gain);
                        let mut sample = flush_denormals_to_zero(mixer.next_sample());
                        sample = soft_clip(sample * gain);
                        write_mono_to_interleaved_frame(sample, frame);
                    }
                    // ========== SACRED ZONE END ==========
                },
                move |err| {
                    // Runs outside the audio callback, I/O is fine here
                    log::error!("Audio stream error: {}", err);
                    status.set(DeviceStatus::Error);
                },
                None,
            )
            .map_err(|e| PitchJumpError::Initialization(format!("audio stream creation: {}", e)))?;

        Ok(stream)
    }
}

impl ToneSink for ToneEngine {
    fn play(&mut self, tone: Tone) {
        if !self.status.is_usable() {
            log::warn!("Audio stream {:?}, tone dropped", self.status.get());
            return;
        }
        self.send(SynthCommand::Play(tone));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(SynthCommand::SetVolume(volume.clamp(0.0, 1.0)));
    }
}

/// State moved into the realtime closure
struct CallbackParts {
    command_rx: CommandConsumer,
    mixer: ToneMixer,
    /// Master volume; the smoother glides toward it
    target_gain: f32,
    smoother: OnePoleSmoother,
    status: AtomicDeviceStatus,
}
