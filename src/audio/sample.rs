//! Audio sample resource

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;

use rodio::Source;
use tracing::debug;

use crate::error::Error;
use crate::resource::LowLevelResource;

use super::instance::{Ownership, SampleInstance};
use super::pool::{InstanceId, InstancePool};

/// Decoded PCM payload shared between a sample and its playback instances.
#[derive(Debug)]
pub struct SampleData {
    /// Interleaved samples.
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl SampleData {
    /// Number of interleaved frames.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }
}

/// A low-level resource owning decoded sample data.
///
/// Loaded from a file (or synthesized via [`from_pcm`](Self::from_pcm)) and
/// explicitly released with [`free`](LowLevelResource::free) by its owning
/// manager before audio shutdown. Playback instances hold the decoded data
/// alive, but the sample resource itself is freed exactly once.
#[derive(Debug)]
pub struct AudioSample {
    /// `None` once freed.
    data: Option<Rc<SampleData>>,
}

impl AudioSample {
    /// Decodes an audio file into memory.
    ///
    /// Fails with a typed error on a bad path or unsupported format; never
    /// yields a partially-constructed sample.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::AudioLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let decoder = rodio::Decoder::new(BufReader::new(file))?;
        let channels: u16 = decoder.channels().into();
        let sample_rate: u32 = decoder.sample_rate().into();
        let samples: Vec<f32> = decoder.collect();

        let data = SampleData {
            samples,
            channels,
            sample_rate,
        };
        debug!(
            path = %path.display(),
            frames = data.frames(),
            channels,
            sample_rate,
            "decoded audio sample"
        );
        Ok(Self {
            data: Some(Rc::new(data)),
        })
    }

    /// Wraps already-decoded interleaved PCM.
    pub fn from_pcm(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            data: Some(Rc::new(SampleData {
                samples,
                channels,
                sample_rate,
            })),
        }
    }

    fn data(&self) -> &Rc<SampleData> {
        self.data.as_ref().expect("audio sample used after free")
    }

    /// The decoded payload.
    pub fn sample_data(&self) -> &SampleData {
        self.data()
    }

    /// Fire-and-forget playback: creates a pooled instance in the playing
    /// state, configured for play-once, and hands it to the pool.
    ///
    /// The returned id may be used to query the instance while it lives,
    /// but the pool owns it and reclaims it once playback pauses.
    pub fn play(&self, pool: &mut InstancePool) -> Result<InstanceId, Error> {
        let instance = SampleInstance::new(self.data().clone(), Ownership::Pooled);
        pool.adopt(instance)
    }

    /// Creates a caller-owned instance in the paused, play-once state.
    ///
    /// The caller keeps it valid for as long as it needs and destroys it
    /// explicitly by dropping; the pool never reclaims it.
    pub fn create_instance(&self) -> SampleInstance {
        let mut instance = SampleInstance::new(self.data().clone(), Ownership::Owned);
        instance.pause();
        instance
    }
}

impl LowLevelResource for AudioSample {
    fn free(&mut self) {
        assert!(self.data.is_some(), "audio sample freed twice");
        self.data = None;
    }

    fn is_freed(&self) -> bool {
        self.data.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pcm_frame_count() {
        let sample = AudioSample::from_pcm(vec![0.0; 440], 2, 44_100);
        assert_eq!(sample.sample_data().frames(), 220);
        assert!(!sample.is_freed());
    }

    #[test]
    fn test_free_releases_data() {
        let mut sample = AudioSample::from_pcm(vec![0.0; 8], 1, 22_050);
        sample.free();
        assert!(sample.is_freed());
    }

    #[test]
    #[should_panic(expected = "freed twice")]
    fn test_double_free_panics() {
        let mut sample = AudioSample::from_pcm(vec![0.0; 8], 1, 22_050);
        sample.free();
        sample.free();
    }

    #[test]
    #[should_panic(expected = "used after free")]
    fn test_use_after_free_panics() {
        let mut sample = AudioSample::from_pcm(vec![0.0; 8], 1, 22_050);
        sample.free();
        let _ = sample.create_instance();
    }

    #[test]
    fn test_load_missing_file_is_typed_error() {
        let err = AudioSample::load("/definitely/not/here.wav").unwrap_err();
        assert!(matches!(err, Error::AudioLoad { .. }));
    }
}
