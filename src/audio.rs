//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::MatchEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Shuttle served
    Serve,
    /// Shuttle hits a racket
    RacketHit,
    /// Shuttle hits the net
    NetHit,
    /// A rally ended
    Point,
    /// A side won the round
    MatchWon,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &MatchEvent) -> Option<Self> {
        match event {
            MatchEvent::Served(_) => Some(SoundEffect::Serve),
            MatchEvent::RacketHit(_) => Some(SoundEffect::RacketHit),
            MatchEvent::NetHit => Some(SoundEffect::NetHit),
            MatchEvent::PointScored { .. } => Some(SoundEffect::Point),
            MatchEvent::MatchWon(_) => Some(SoundEffect::MatchWon),
            MatchEvent::Restarted | MatchEvent::QuitRequested => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: settings.master_volume.clamp(0.0, 1.0),
                sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
                muted: settings.muted,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Serve => self.play_serve(ctx, vol),
                SoundEffect::RacketHit => self.play_racket_hit(ctx, vol),
                SoundEffect::NetHit => self.play_net_hit(ctx, vol),
                SoundEffect::Point => self.play_point(ctx, vol),
                SoundEffect::MatchWon => self.play_match_won(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short decaying blip, optionally sliding in pitch
        fn blip(
            &self,
            ctx: &AudioContext,
            vol: f32,
            osc_type: OscillatorType,
            (from_hz, to_hz): (f32, f32),
            start: f64,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from_hz, osc_type) else {
                return;
            };

            gain.gain().set_value_at_time(vol, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + duration)
                .ok();
            osc.frequency().set_value_at_time(from_hz, start).ok();
            if to_hz != from_hz {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(to_hz, start + duration)
                    .ok();
            }

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + duration + 0.05).ok();
        }

        /// Serve - rising whoosh
        fn play_serve(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.blip(ctx, vol * 0.3, OscillatorType::Triangle, (220.0, 660.0), t, 0.12);
        }

        /// Racket hit - crisp thwack
        fn play_racket_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.blip(ctx, vol * 0.5, OscillatorType::Square, (900.0, 300.0), t, 0.06);
        }

        /// Net hit - dull thud
        fn play_net_hit(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.blip(ctx, vol * 0.5, OscillatorType::Sine, (140.0, 70.0), t, 0.15);
        }

        /// Point - two falling notes
        fn play_point(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            self.blip(ctx, vol * 0.3, OscillatorType::Sine, (660.0, 660.0), t, 0.1);
            self.blip(ctx, vol * 0.3, OscillatorType::Sine, (440.0, 440.0), t + 0.1, 0.15);
        }

        /// Round won - rising arpeggio
        fn play_match_won(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.25, 659.25, 783.99, 1046.5].into_iter().enumerate() {
                let start = t + i as f64 * 0.12;
                self.blip(ctx, vol * 0.3, OscillatorType::Triangle, (freq, freq), start, 0.2);
            }
        }
    }
}
