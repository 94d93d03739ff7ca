//! Sound cues
//!
//! The simulation never plays sound itself. It records [`GameEvent`]s and
//! the host hands them to an [`AudioSink`], fire-and-forget.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A projectile left the ship
    Fire,
}

impl SoundEffect {
    /// Cue for an event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ProjectileFired => Some(SoundEffect::Fire),
            _ => None,
        }
    }
}

/// Something that can play a cue. Nothing is returned to the simulation.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Play the cue for every event at full volume
pub fn dispatch<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        sink.play(effect, 1.0);
    }
}

/// Volume and mute control in front of a sink
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink + Default> Default for AudioManager<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play one cue; silent volume skips the sink entirely
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the cues for a tick's events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
