#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Playing, // Carousel visible, autoplay and gestures active
    Ended,   // Ending sequence showing
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProposalChoice {
    None,
    Accepted,
}

/// Mutable core of a playback session.
///
/// `decline_nudges` and `decline_offset` only feed the ending screen's
/// decline button; they are display state derived from decline presses and
/// never influence `phase` or `proposal_choice`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub active_index: usize,
    pub is_paused: bool,
    pub phase: Phase,
    pub proposal_choice: ProposalChoice,
    pub is_muted: bool,
    pub decline_nudges: u32,
    pub decline_offset: (f32, f32),
}

impl PlaybackState {
    pub fn new(muted: bool) -> Self {
        Self {
            active_index: 0,
            is_paused: false,
            phase: Phase::Playing,
            proposal_choice: ProposalChoice::None,
            is_muted: muted,
            decline_nudges: 0,
            decline_offset: (0.0, 0.0),
        }
    }

    /// Back to the start of the reel. Mute is a listener preference and survives.
    pub fn reset(&mut self) {
        *self = Self::new(self.is_muted);
    }

    // Any change restarts the autoplay countdown
    pub fn autoplay_key(&self) -> (usize, bool, Phase) {
        (self.active_index, self.is_paused, self.phase)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(false)
    }
}
