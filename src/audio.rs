//! Sound cue routing.
//!
//! The session reports events; this module turns them into [`AudioCue`]s and
//! hands them to a sink. The terminal build has no mixer: its sink logs every
//! cue, tracks whether background music would be playing and can ask the
//! front-end to ring the bell for one-shot sounds.

use crate::types::{AudioCue, GameEvent};

/// Receiver of sound cues.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

impl AudioSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}

/// Forward the cue of every event that has one, in order.
pub fn dispatch<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for cue in events.iter().filter_map(GameEvent::audio_cue) {
        sink.play(cue);
    }
}

/// Terminal sink: logs cues and optionally requests a bell.
#[derive(Debug, Default)]
pub struct TerminalAudio {
    bell: bool,
    music_playing: bool,
    bell_pending: bool,
}

impl TerminalAudio {
    pub fn new(bell: bool) -> Self {
        Self {
            bell,
            ..Self::default()
        }
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Whether a bell was requested since the last call.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::MusicLoopStart => self.music_playing = true,
            AudioCue::MusicLoopStop => self.music_playing = false,
            _ => self.bell_pending |= self.bell,
        }
        tracing::debug!(cue = cue.as_str(), music = self.music_playing, "audio cue");
    }
}
