use log::debug;
use crate::state::{Phase, PlaybackState};

/// What a gesture, a control or the autoplay timer asks the timeline to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Pause,
    Resume,
    Advance,
    Retreat,
    JumpTo(usize),
}

/// Single-shot delay on the player's millisecond clock.
///
/// Arming replaces whatever was pending, so there is never more than one
/// outstanding deadline.
#[derive(Debug, Default, Clone)]
pub struct Countdown {
    deadline: Option<u64>,
}

impl Countdown {
    pub fn arm(&mut self, now_ms: u64, delay_ms: u64) {
        self.deadline = Some(now_ms.saturating_add(delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

pub struct Timeline {
    slide_count: usize,
    interval_ms: u64,
    autoplay: Countdown,
}

impl Timeline {
    pub fn new(slide_count: usize, interval_ms: u64) -> Self {
        Self {
            slide_count,
            interval_ms,
            autoplay: Countdown::default(),
        }
    }

    pub fn autoplay_deadline(&self) -> Option<u64> {
        self.autoplay.deadline()
    }

    /// Starts a session on a freshly reset state. An empty reel goes
    /// straight to the ending and never arms the timer.
    pub fn start(&mut self, state: &mut PlaybackState, now_ms: u64) {
        if self.slide_count == 0 {
            state.phase = Phase::Ended;
        }
        self.reschedule(state, now_ms);
    }

    pub fn restart(&mut self, state: &mut PlaybackState, now_ms: u64) {
        state.reset();
        self.start(state, now_ms);
    }

    pub fn stop(&mut self) {
        self.autoplay.cancel();
    }

    /// Applies `intent` and restarts the autoplay countdown if the active
    /// index, the pause flag or the phase changed. Returns whether anything
    /// changed.
    pub fn dispatch(&mut self, state: &mut PlaybackState, intent: Intent, now_ms: u64) -> bool {
        let before = state.autoplay_key();
        self.reduce(state, intent);
        let changed = state.autoplay_key() != before;
        if changed {
            debug!("{:?} -> slide {} paused={} {:?}", intent, state.active_index, state.is_paused, state.phase);
            self.reschedule(state, now_ms);
        }
        changed
    }

    pub fn advance(&mut self, state: &mut PlaybackState, now_ms: u64) -> bool {
        self.dispatch(state, Intent::Advance, now_ms)
    }

    pub fn retreat(&mut self, state: &mut PlaybackState, now_ms: u64) -> bool {
        self.dispatch(state, Intent::Retreat, now_ms)
    }

    pub fn jump_to(&mut self, state: &mut PlaybackState, index: usize, now_ms: u64) -> bool {
        self.dispatch(state, Intent::JumpTo(index), now_ms)
    }

    pub fn toggle_pause(&mut self, state: &mut PlaybackState, now_ms: u64) -> bool {
        let intent = if state.is_paused { Intent::Resume } else { Intent::Pause };
        self.dispatch(state, intent, now_ms)
    }

    /// Consumes the autoplay deadline if it has passed. The caller then
    /// dispatches `Intent::Advance`.
    pub fn autoplay_due(&mut self, now_ms: u64) -> bool {
        self.autoplay.poll(now_ms)
    }

    fn reduce(&self, state: &mut PlaybackState, intent: Intent) {
        if state.phase == Phase::Ended {
            return;
        }

        match intent {
            Intent::Pause => state.is_paused = true,
            Intent::Resume => state.is_paused = false,
            Intent::Advance => {
                if state.active_index + 1 < self.slide_count {
                    state.active_index += 1;
                } else {
                    state.phase = Phase::Ended;
                }
            }
            Intent::Retreat => {
                if state.active_index > 0 {
                    state.active_index -= 1;
                }
            }
            Intent::JumpTo(index) => {
                if index >= self.slide_count {
                    log::warn!("Ignoring jump to slide {} of {}", index, self.slide_count);
                    return;
                }
                state.active_index = index;
                state.is_paused = false;
            }
        }
    }

    fn reschedule(&mut self, state: &PlaybackState, now_ms: u64) {
        self.autoplay.cancel();
        if state.phase == Phase::Playing && !state.is_paused && self.slide_count > 0 {
            self.autoplay.arm(now_ms, self.interval_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::AUTOPLAY_INTERVAL_MS;

    fn started(slides: usize) -> (Timeline, PlaybackState) {
        let mut timeline = Timeline::new(slides, AUTOPLAY_INTERVAL_MS);
        let mut state = PlaybackState::default();
        timeline.start(&mut state, 0);
        (timeline, state)
    }

    #[test]
    fn countdown_fires_once() {
        let mut countdown = Countdown::default();
        countdown.arm(100, 50);
        assert!(!countdown.poll(149));
        assert!(countdown.poll(150));
        assert!(!countdown.poll(500));
        assert!(!countdown.is_armed());
    }

    #[test]
    fn advance_and_retreat_stay_in_bounds() {
        let (mut timeline, mut state) = started(3);

        assert!(!timeline.retreat(&mut state, 10));
        assert_eq!(state.active_index, 0);

        let moves = [
            Intent::Advance, Intent::Retreat, Intent::Advance, Intent::Advance,
            Intent::Retreat, Intent::Retreat, Intent::Retreat, Intent::Advance,
        ];
        for (i, intent) in moves.into_iter().enumerate() {
            timeline.dispatch(&mut state, intent, i as u64);
            assert!(state.active_index < 3);
        }
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn advance_past_last_slide_ends_instead_of_overflowing() {
        let (mut timeline, mut state) = started(3);
        timeline.advance(&mut state, 1);
        timeline.advance(&mut state, 2);
        assert_eq!(state.active_index, 2);

        timeline.advance(&mut state, 3);
        assert_eq!(state.active_index, 2);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(timeline.autoplay_deadline(), None);
    }

    #[test]
    fn ended_phase_ignores_navigation_and_pause() {
        let (mut timeline, mut state) = started(1);
        timeline.advance(&mut state, 5);
        assert_eq!(state.phase, Phase::Ended);

        assert!(!timeline.advance(&mut state, 6));
        assert!(!timeline.retreat(&mut state, 7));
        assert!(!timeline.toggle_pause(&mut state, 8));
        assert!(!state.is_paused);
    }

    #[test]
    fn autoplay_waits_a_full_interval_after_manual_navigation() {
        let (mut timeline, mut state) = started(5);
        assert_eq!(timeline.autoplay_deadline(), Some(6000));

        timeline.advance(&mut state, 4000);
        assert!(!timeline.autoplay_due(6000));
        assert!(!timeline.autoplay_due(9999));
        assert!(timeline.autoplay_due(10_000));

        timeline.dispatch(&mut state, Intent::Advance, 10_000);
        timeline.retreat(&mut state, 12_500);
        assert_eq!(timeline.autoplay_deadline(), Some(18_500));

        timeline.jump_to(&mut state, 4, 13_000);
        assert_eq!(timeline.autoplay_deadline(), Some(19_000));
    }

    #[test]
    fn pause_cancels_and_resume_restarts_the_full_interval() {
        let (mut timeline, mut state) = started(4);

        timeline.toggle_pause(&mut state, 5000);
        assert!(state.is_paused);
        assert_eq!(timeline.autoplay_deadline(), None);
        assert!(!timeline.autoplay_due(60_000));

        timeline.toggle_pause(&mut state, 7000);
        assert!(!state.is_paused);
        assert_eq!(timeline.autoplay_deadline(), Some(13_000));
    }

    #[test]
    fn jump_clears_pause_and_rejects_out_of_range() {
        let (mut timeline, mut state) = started(3);
        timeline.toggle_pause(&mut state, 1);

        assert!(!timeline.jump_to(&mut state, 3, 2));
        assert_eq!(state.active_index, 0);
        assert!(state.is_paused);

        assert!(timeline.jump_to(&mut state, 2, 3));
        assert_eq!(state.active_index, 2);
        assert!(!state.is_paused);
    }

    #[test]
    fn retreat_at_first_slide_keeps_the_running_countdown() {
        let (mut timeline, mut state) = started(3);
        timeline.retreat(&mut state, 2000);
        assert_eq!(timeline.autoplay_deadline(), Some(6000));
    }

    #[test]
    fn empty_reel_ends_immediately_without_a_timer() {
        let (mut timeline, mut state) = started(0);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(timeline.autoplay_deadline(), None);

        timeline.advance(&mut state, 10);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.active_index, 0);

        timeline.restart(&mut state, 20);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(timeline.autoplay_deadline(), None);
    }

    #[test]
    fn restart_rearms_from_slide_zero() {
        let (mut timeline, mut state) = started(2);
        timeline.advance(&mut state, 1);
        timeline.advance(&mut state, 2);
        assert_eq!(state.phase, Phase::Ended);

        timeline.restart(&mut state, 500);
        assert_eq!(state.active_index, 0);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(timeline.autoplay_deadline(), Some(6500));
    }
}
