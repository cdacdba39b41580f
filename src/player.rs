use log::info;
use rand::Rng;
use crate::audio::{AudioTrack, Soundtrack};
use crate::camera::{CameraAnimator, ViewportQuery};
use crate::config::PlayerConfig;
use crate::ending;
use crate::input::TapTracker;
use crate::slide::Slide;
use crate::state::{Phase, PlaybackState};
use crate::timeline::{Intent, Timeline};

/// The reel player: one playback session over a fixed list of slides.
///
/// All time-dependent operations take the host's clock in milliseconds.
/// Nothing happens between calls; the host calls [`Player::update`] once
/// per frame to let autoplay fire and the camera move.
pub struct Player<T: AudioTrack> {
    slides: Vec<Slide>,
    config: PlayerConfig,
    view_only: bool,
    state: PlaybackState,
    timeline: Timeline,
    taps: TapTracker,
    camera: CameraAnimator,
    soundtrack: Soundtrack<T>,
    centered_index: Option<usize>,
    on_close: Option<Box<dyn FnOnce()>>,
    closed: bool,
}

impl<T: AudioTrack> Player<T> {
    pub fn mount(slides: Vec<Slide>, config: PlayerConfig, track: T, muted: bool, now_ms: u64) -> Self {
        let mut player = Self {
            timeline: Timeline::new(slides.len(), config.autoplay_interval_ms),
            taps: TapTracker::new(config.double_tap_window_ms),
            camera: CameraAnimator::new(config.scroll_duration_ms, config.settle_delay_ms),
            soundtrack: Soundtrack::new(track, config.music_volume),
            state: PlaybackState::new(muted),
            slides,
            config,
            view_only: false,
            centered_index: Some(0),
            on_close: None,
            closed: false,
        };

        player.timeline.start(&mut player.state, now_ms);
        player.camera.schedule_initial_centering(now_ms);
        player.soundtrack.mount(muted);
        info!("Player mounted with {} slides", player.slides.len());
        player
    }

    pub fn on_close(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn view_only(mut self, view_only: bool) -> Self {
        self.view_only = view_only;
        self
    }

    pub fn is_view_only(&self) -> bool {
        self.view_only
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn autoplay_deadline(&self) -> Option<u64> {
        self.timeline.autoplay_deadline()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn tap(&mut self, now_ms: u64, x: f32, viewport_width: f32) -> Option<Intent> {
        if self.closed {
            return None;
        }
        let intent = self.taps.interpret(now_ms, x, viewport_width, &self.state)?;
        self.dispatch(intent, now_ms);
        Some(intent)
    }

    /// Applies an intent and keeps the music in step with the pause flag.
    pub fn dispatch(&mut self, intent: Intent, now_ms: u64) -> bool {
        if self.closed {
            return false;
        }
        let was_paused = self.state.is_paused;
        let was_playing = self.state.phase == Phase::Playing;

        let changed = self.timeline.dispatch(&mut self.state, intent, now_ms);

        if self.state.is_paused != was_paused {
            self.soundtrack.sync_pause(self.state.is_paused);
        }
        if was_playing && self.state.phase == Phase::Ended {
            info!("Reached the end of the reel");
        }
        changed
    }

    pub fn advance(&mut self, now_ms: u64) -> bool {
        self.dispatch(Intent::Advance, now_ms)
    }

    pub fn retreat(&mut self, now_ms: u64) -> bool {
        self.dispatch(Intent::Retreat, now_ms)
    }

    pub fn jump_to(&mut self, index: usize, now_ms: u64) -> bool {
        self.dispatch(Intent::JumpTo(index), now_ms)
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        let intent = if self.state.is_paused { Intent::Resume } else { Intent::Pause };
        self.dispatch(intent, now_ms)
    }

    pub fn toggle_mute(&mut self) {
        if self.closed {
            return;
        }
        self.state.is_muted = !self.state.is_muted;
        self.soundtrack.set_muted(self.state.is_muted);
    }

    pub fn accept(&mut self) -> bool {
        !self.closed && ending::accept(&mut self.state)
    }

    pub fn decline<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        !self.closed && ending::decline(&mut self.state, rng, self.config.dodge_range_px)
    }

    /// Back to the first slide with the music from the top.
    pub fn replay(&mut self, now_ms: u64) {
        if self.closed {
            return;
        }
        info!("Replaying the reel");
        self.timeline.restart(&mut self.state, now_ms);
        self.taps.reset();
        self.camera.schedule_initial_centering(now_ms);
        self.centered_index = Some(0);
        self.soundtrack.restart();
    }

    // --- Per-frame ---

    /// Per-frame tick: fires a due autoplay advance, follows the active
    /// slide with the camera and returns the scroll offset to draw with.
    pub fn update(&mut self, now_ms: u64, viewport: &dyn ViewportQuery) -> f32 {
        self.tick(now_ms);
        self.follow(now_ms, viewport)
    }

    pub fn tick(&mut self, now_ms: u64) {
        if self.closed {
            return;
        }
        if self.timeline.autoplay_due(now_ms) {
            log::debug!("Autoplay at {}ms", now_ms);
            self.dispatch(Intent::Advance, now_ms);
        }
        self.soundtrack.update();
    }

    pub fn follow(&mut self, now_ms: u64, viewport: &dyn ViewportQuery) -> f32 {
        if self.closed {
            return self.camera.offset();
        }
        if self.state.phase == Phase::Playing && self.centered_index != Some(self.state.active_index) {
            // A miss is not retried until the active slide changes again
            self.camera.center_on(self.state.active_index, now_ms, viewport);
            self.centered_index = Some(self.state.active_index);
        }
        self.camera.update(now_ms, viewport)
    }

    /// Stops everything, then tells the host. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.teardown();
        info!("Player closed");
        if let Some(callback) = self.on_close.take() {
            callback();
        }
    }

    fn teardown(&mut self) {
        self.closed = true;
        self.timeline.stop();
        self.camera.stop();
        self.soundtrack.unmount();
    }
}

impl<T: AudioTrack> Drop for Player<T> {
    fn drop(&mut self) {
        if !self.closed {
            self.teardown();
        }
    }
}
