//! Transient playback instances

use std::rc::Rc;

use super::sample::SampleData;

/// What happens when playback reaches the end of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Pause at the end. Every freshly created instance starts here.
    #[default]
    Once,
    /// Wrap around and keep playing.
    Loop,
}

/// Who is responsible for destroying an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Created by fire-and-forget play; the pool reclaims it once paused.
    Pooled,
    /// Created explicitly; the caller drops it, the pool never touches it.
    Owned,
}

/// A playback handle over a sample's decoded data.
///
/// Progression is driven externally: the mixing side (out of scope here)
/// calls [`advance_frames`](Self::advance_frames) as it consumes audio. A
/// play-once instance pauses itself at the end of the data, which is what
/// makes a pooled instance eligible for reclamation.
#[derive(Debug)]
pub struct SampleInstance {
    data: Rc<SampleData>,
    playing: bool,
    mode: PlayMode,
    ownership: Ownership,
    /// Playback position in frames.
    frame: usize,
}

impl SampleInstance {
    /// Created playing, play-once.
    pub(crate) fn new(data: Rc<SampleData>, ownership: Ownership) -> Self {
        Self {
            data,
            playing: true,
            mode: PlayMode::Once,
            ownership,
            frame: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    pub fn play_mode(&self) -> PlayMode {
        self.mode
    }

    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Current position in frames.
    pub fn position(&self) -> usize {
        self.frame
    }

    /// Rewinds to the start without changing the play state.
    pub fn rewind(&mut self) {
        self.frame = 0;
    }

    /// Total length in frames.
    pub fn frames(&self) -> usize {
        self.data.frames()
    }

    /// Advances playback by `frames`, called by the consuming mixer.
    ///
    /// A play-once instance that reaches the end pauses at the last frame;
    /// a looping instance wraps.
    pub fn advance_frames(&mut self, frames: usize) {
        if !self.playing {
            return;
        }
        let total = self.frames();
        if total == 0 {
            self.playing = false;
            return;
        }
        self.frame += frames;
        if self.frame >= total {
            match self.mode {
                PlayMode::Once => {
                    self.frame = total;
                    self.playing = false;
                }
                PlayMode::Loop => {
                    self.frame %= total;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(frames: usize) -> Rc<SampleData> {
        Rc::new(SampleData {
            samples: vec![0.0; frames],
            channels: 1,
            sample_rate: 44_100,
        })
    }

    #[test]
    fn test_play_once_pauses_at_end() {
        let mut instance = SampleInstance::new(data(100), Ownership::Pooled);
        assert!(instance.is_playing());
        instance.advance_frames(60);
        assert!(instance.is_playing());
        instance.advance_frames(60);
        assert!(!instance.is_playing());
        assert_eq!(instance.position(), 100);
    }

    #[test]
    fn test_loop_mode_wraps() {
        let mut instance = SampleInstance::new(data(100), Ownership::Owned);
        instance.set_play_mode(PlayMode::Loop);
        instance.advance_frames(250);
        assert!(instance.is_playing());
        assert_eq!(instance.position(), 50);
    }

    #[test]
    fn test_paused_instance_does_not_advance() {
        let mut instance = SampleInstance::new(data(100), Ownership::Owned);
        instance.pause();
        instance.advance_frames(10);
        assert_eq!(instance.position(), 0);
    }
}
