//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and a looping background arpeggio -
//! no external files needed. Effects and music run through separate gain
//! buses so each can be toggled independently.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Powerup collected
    Power,
    /// Short blip (game over)
    Blip,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FoodEaten { .. } => Some(SoundEffect::Eat),
            GameEvent::PowerupCollected(_) => Some(SoundEffect::Power),
            GameEvent::GameOver => Some(SoundEffect::Blip),
            GameEvent::SpeedBoostExpired => None,
        }
    }
}

/// Arpeggio notes (Hz), one every quarter second
pub const ARPEGGIO: [f32; 4] = [220.0, 277.18, 329.63, 196.0];
/// Seconds between music loop restarts
pub const MUSIC_LOOP_SECS: f64 = 1.0;

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{ARPEGGIO, MUSIC_LOOP_SECS, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music_bus: Option<GainNode>,
        sfx_bus: Option<GainNode>,
        settings: Settings,
        /// Context time at which the music loop next restarts
        next_music_at: f64,
    }

    impl AudioManager {
        /// Build the context lazily; browsers only allow it after a user gesture
        pub fn new(settings: Settings) -> Self {
            Self {
                ctx: None,
                music_bus: None,
                sfx_bus: None,
                settings,
                next_music_at: 0.0,
            }
        }

        /// Create the context and buses on first use
        pub fn ensure_started(&mut self) {
            if self.ctx.is_some() {
                return;
            }
            let Ok(ctx) = AudioContext::new() else {
                log::warn!("Failed to create AudioContext - audio disabled");
                return;
            };
            self.music_bus = Self::create_bus(&ctx, self.settings.effective_music_gain());
            self.sfx_bus = Self::create_bus(&ctx, self.settings.effective_sfx_gain());
            self.next_music_at = ctx.current_time();
            self.ctx = Some(ctx);
            log::info!("Audio started");
        }

        fn create_bus(ctx: &AudioContext, gain: f32) -> Option<GainNode> {
            let bus = ctx.create_gain().ok()?;
            bus.gain().set_value(gain);
            bus.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(bus)
        }

        /// Apply new toggles/volumes to the buses
        pub fn apply_settings(&mut self, settings: Settings) {
            if let Some(bus) = &self.music_bus {
                bus.gain().set_value(settings.effective_music_gain());
            }
            if let Some(bus) = &self.sfx_bus {
                bus.gain().set_value(settings.effective_sfx_gain());
            }
            if settings.music_enabled && !self.settings.music_enabled {
                if let Some(ctx) = &self.ctx {
                    self.next_music_at = ctx.current_time();
                }
            }
            self.settings = settings;
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if !self.settings.sfx_enabled {
                return;
            }
            let (Some(ctx), Some(bus)) = (&self.ctx, &self.sfx_bus) else {
                return;
            };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Eat => {
                    Self::play_tone(ctx, bus, OscillatorType::Square, 660.0, 0.25, 0.15)
                }
                SoundEffect::Power => {
                    Self::play_tone(ctx, bus, OscillatorType::Sawtooth, 300.0, 0.18, 0.28)
                }
                SoundEffect::Blip => {
                    Self::play_tone(ctx, bus, OscillatorType::Sine, 880.0, 0.06, 0.1)
                }
            }
        }

        /// Restart the music loop when it is due; call once per frame
        pub fn update_music(&mut self) {
            if !self.settings.music_enabled {
                return;
            }
            let (Some(ctx), Some(bus)) = (&self.ctx, &self.music_bus) else {
                return;
            };
            let now = ctx.current_time();
            if now < self.next_music_at {
                return;
            }
            Self::play_music_phrase(ctx, bus, now);
            self.next_music_at = now + MUSIC_LOOP_SECS;
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope routed into `bus`
        fn create_osc(
            ctx: &AudioContext,
            bus: &GainNode,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(bus).ok()?;

            Some((osc, gain))
        }

        /// Single decaying tone
        fn play_tone(
            ctx: &AudioContext,
            bus: &GainNode,
            osc_type: OscillatorType,
            freq: f32,
            level: f32,
            secs: f64,
        ) {
            let Some((osc, gain)) = Self::create_osc(ctx, bus, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + secs)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + secs).ok();
        }

        /// Low pad plus a four-note arpeggio
        fn play_music_phrase(ctx: &AudioContext, bus: &GainNode, t: f64) {
            if let Some((pad, pad_gain)) = Self::create_osc(ctx, bus, 110.0, OscillatorType::Sine) {
                pad_gain.gain().set_value(0.02);
                pad.start_with_when(t).ok();
                pad.stop_with_when(t + MUSIC_LOOP_SECS).ok();
            }

            for (i, freq) in ARPEGGIO.iter().enumerate() {
                let osc_type = if i % 2 == 0 {
                    OscillatorType::Triangle
                } else {
                    OscillatorType::Sine
                };
                let start = t + i as f64 * 0.25;
                if let Some((osc, gain)) = Self::create_osc(ctx, bus, *freq, osc_type) {
                    gain.gain().set_value_at_time(0.08, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.001, start + 0.22)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.24).ok();
                }
            }
        }
    }
}
