use log::debug;
use raylib::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output available")]
    Unavailable,
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// A background track the player can drive.
pub trait AudioTrack {
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
    fn rewind(&mut self);
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    /// Called once per frame; streaming backends refill their buffers here.
    fn update(&mut self) {}
}

impl<T: AudioTrack + ?Sized> AudioTrack for Box<T> {
    fn play(&mut self) -> Result<(), AudioError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause()
    }

    fn rewind(&mut self) {
        (**self).rewind()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }

    fn set_muted(&mut self, muted: bool) {
        (**self).set_muted(muted)
    }

    fn update(&mut self) {
        (**self).update()
    }
}

pub struct SilentTrack; // No music file or no audio device

impl AudioTrack for SilentTrack {
    fn play(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
    fn pause(&mut self) {}
    fn rewind(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn set_muted(&mut self, _muted: bool) {}
}

pub struct MusicTrack<'aud> {
    music: Music<'aud>,
    volume: f32,
    muted: bool,
    started: bool,
}

impl<'aud> MusicTrack<'aud> {
    pub fn new(music: Music<'aud>) -> Self {
        Self { music, volume: 1.0, muted: false, started: false }
    }

    fn apply_volume(&mut self) {
        let volume = if self.muted { 0.0 } else { self.volume };
        self.music.set_volume(volume);
    }
}

impl AudioTrack for MusicTrack<'_> {
    fn play(&mut self) -> Result<(), AudioError> {
        // PlayMusicStream starts over from the beginning, so only use it once
        if self.started {
            self.music.resume_stream();
        } else {
            self.music.play_stream();
            self.started = true;
        }
        Ok(())
    }

    fn pause(&mut self) {
        if self.started {
            self.music.pause_stream();
        }
    }

    fn rewind(&mut self) {
        self.music.stop_stream();
        self.started = false;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.apply_volume();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    fn update(&mut self) {
        if self.started {
            self.music.update_stream();
        }
    }
}

/// Reconciles the two things that drive the track: the player's lifetime
/// (mount starts it, unmount stops and rewinds it) and the pause flag.
pub struct Soundtrack<T: AudioTrack> {
    track: T,
    volume: f32,
    mounted: bool,
}

impl<T: AudioTrack> Soundtrack<T> {
    pub fn new(track: T, volume: f32) -> Self {
        Self { track, volume, mounted: false }
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, muted: bool) {
        self.mounted = true;
        self.track.set_volume(self.volume);
        self.track.set_muted(muted);
        self.try_play();
    }

    pub fn sync_pause(&mut self, paused: bool) {
        if !self.mounted {
            return;
        }
        if paused {
            self.track.pause();
        } else {
            self.try_play();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        if self.mounted {
            self.track.set_muted(muted);
        }
    }

    pub fn restart(&mut self) {
        if !self.mounted {
            return;
        }
        self.track.rewind();
        self.try_play();
    }

    pub fn update(&mut self) {
        if self.mounted {
            self.track.update();
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.track.pause();
        self.track.rewind();
        self.mounted = false;
    }

    fn try_play(&mut self) {
        // A refused start is not an error; the next resume tries again
        if let Err(e) = self.track.play() {
            debug!("Soundtrack did not start: {}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Play,
        Pause,
        Rewind,
        Volume(f32),
        Muted(bool),
    }

    /// Records calls into a log shared with the test.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingTrack {
        pub calls: Rc<RefCell<Vec<Call>>>,
        pub refuse: bool,
    }

    impl RecordingTrack {
        pub(crate) fn take(&self) -> Vec<Call> {
            self.calls.borrow_mut().drain(..).collect()
        }
    }

    impl AudioTrack for RecordingTrack {
        fn play(&mut self) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(Call::Play);
            if self.refuse {
                Err(AudioError::Rejected("autoplay policy".into()))
            } else {
                Ok(())
            }
        }
        fn pause(&mut self) {
            self.calls.borrow_mut().push(Call::Pause);
        }
        fn rewind(&mut self) {
            self.calls.borrow_mut().push(Call::Rewind);
        }
        fn set_volume(&mut self, volume: f32) {
            self.calls.borrow_mut().push(Call::Volume(volume));
        }
        fn set_muted(&mut self, muted: bool) {
            self.calls.borrow_mut().push(Call::Muted(muted));
        }
    }

    #[test]
    fn mount_sets_volume_and_starts() {
        let track = RecordingTrack::default();
        let mut soundtrack = Soundtrack::new(track.clone(), 0.5);
        soundtrack.mount(false);
        assert_eq!(track.take(), [Call::Volume(0.5), Call::Muted(false), Call::Play]);
    }

    #[test]
    fn refused_start_is_swallowed() {
        let track = RecordingTrack { refuse: true, ..Default::default() };
        let mut soundtrack = Soundtrack::new(track.clone(), 0.5);
        soundtrack.mount(true);
        soundtrack.sync_pause(false);
        assert!(soundtrack.is_mounted());
        assert_eq!(track.take().iter().filter(|c| **c == Call::Play).count(), 2);
    }

    #[test]
    fn pause_and_unmount_never_leave_it_running() {
        let track = RecordingTrack::default();
        let mut soundtrack = Soundtrack::new(track.clone(), 0.5);
        soundtrack.mount(false);
        track.take();

        soundtrack.sync_pause(true);
        assert_eq!(track.take(), [Call::Pause]);

        soundtrack.unmount();
        assert_eq!(track.take(), [Call::Pause, Call::Rewind]);

        soundtrack.sync_pause(false);
        soundtrack.restart();
        soundtrack.unmount();
        assert!(track.take().is_empty());
    }

    #[test]
    fn restart_rewinds_then_plays() {
        let track = RecordingTrack::default();
        let mut soundtrack = Soundtrack::new(track.clone(), 0.5);
        soundtrack.mount(false);
        track.take();
        soundtrack.restart();
        assert_eq!(track.take(), [Call::Rewind, Call::Play]);
    }

    #[test]
    fn silent_track_reports_unavailable() {
        assert!(matches!(SilentTrack.play(), Err(AudioError::Unavailable)));
    }
}
