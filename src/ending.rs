use log::{debug, info};
use rand::Rng;
use crate::state::{Phase, PlaybackState, ProposalChoice};

pub const ACCEPT_LABEL: &str = "YES!";
pub const DECLINE_LABEL: &str = "No...";
pub const DECLINE_COAX_LABEL: &str = "Try 'Yes' ;)";
pub const REPLAY_LABEL: &str = "Replay Story";

/// Everything the ending screen shows, derived from the playback state.
#[derive(Debug, Clone, PartialEq)]
pub struct EndingView {
    pub heading: &'static str,
    pub lines: &'static [&'static str],
    pub accepted: bool,
    pub show_choices: bool,
    pub decline_label: &'static str,
    pub decline_offset: (f32, f32),
}

pub fn view(state: &PlaybackState) -> EndingView {
    let accepted = state.proposal_choice == ProposalChoice::Accepted;
    let (heading, lines): (&'static str, &'static [&'static str]) = if accepted {
        (
            "She Said YES!",
            &["\"Our story just began...\"", "\"Forever starts today.\"", "\"Best decision of my life.\""],
        )
    } else {
        (
            "Happy Valentine's Day",
            &[
                "\"In all the world, there is no heart for me like yours.\"",
                "Will you be my Valentine forever?",
            ],
        )
    };

    EndingView {
        heading,
        lines,
        accepted,
        show_choices: !accepted,
        decline_label: if state.decline_nudges == 0 { DECLINE_LABEL } else { DECLINE_COAX_LABEL },
        decline_offset: state.decline_offset,
    }
}

/// Takes the proposal. Permanent until the reel is replayed.
pub fn accept(state: &mut PlaybackState) -> bool {
    if state.phase != Phase::Ended || state.proposal_choice == ProposalChoice::Accepted {
        return false;
    }
    state.proposal_choice = ProposalChoice::Accepted;
    info!("Proposal accepted");
    true
}

/// Makes the decline button dodge. Only the button's label and offset
/// change; the choice itself is never recorded. Unavailable once accepted.
pub fn decline<R: Rng + ?Sized>(state: &mut PlaybackState, rng: &mut R, range_px: f32) -> bool {
    if state.phase != Phase::Ended || state.proposal_choice == ProposalChoice::Accepted {
        return false;
    }
    state.decline_nudges = state.decline_nudges.saturating_add(1);
    state.decline_offset = if range_px > 0.0 {
        (rng.random_range(-range_px..range_px), rng.random_range(-range_px..range_px))
    } else {
        (0.0, 0.0)
    };
    debug!("Decline dodged to {:?} ({} times)", state.decline_offset, state.decline_nudges);
    true
}
