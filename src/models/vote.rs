use serde::{Deserialize, Serialize};

/// What kind of entity a vote points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetKind {
    Post,
    Comment,
}

impl TargetKind {
    /// Text form used in the `votes.target_kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::Post => "post",
            TargetKind::Comment => "comment",
        }
    }
}

/// Polarity of a stored vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Text form used in the `votes.direction` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    pub fn from_column(value: &str) -> Option<Self> {
        match value {
            "up" => Some(VoteDirection::Up),
            "down" => Some(VoteDirection::Down),
            _ => None,
        }
    }
}

/// A voter's current relationship to a target.
///
/// This is both the API-visible state and the domain of the toggle state
/// machine. The same transition table drives the authoritative ledger and the
/// client-side optimistic controller, so the two can never disagree on what a
/// toggle means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteState {
    None,
    Up,
    Down,
}

impl VoteState {
    pub fn from_direction(direction: Option<VoteDirection>) -> Self {
        match direction {
            None => VoteState::None,
            Some(VoteDirection::Up) => VoteState::Up,
            Some(VoteDirection::Down) => VoteState::Down,
        }
    }

    /// Apply one toggle action and return the next state plus the score delta
    /// this voter contributes.
    ///
    /// Re-applying the current direction clears the vote; applying the
    /// opposite direction flips it (a two-point swing).
    pub fn apply(self, direction: VoteDirection) -> (VoteState, i64) {
        match (self, direction) {
            (VoteState::None, VoteDirection::Up) => (VoteState::Up, 1),
            (VoteState::None, VoteDirection::Down) => (VoteState::Down, -1),
            (VoteState::Up, VoteDirection::Up) => (VoteState::None, -1),
            (VoteState::Down, VoteDirection::Down) => (VoteState::None, 1),
            (VoteState::Up, VoteDirection::Down) => (VoteState::Down, -2),
            (VoteState::Down, VoteDirection::Up) => (VoteState::Up, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_covers_every_state_direction_pair() {
        let cases = [
            (VoteState::None, VoteDirection::Up, VoteState::Up, 1),
            (VoteState::None, VoteDirection::Down, VoteState::Down, -1),
            (VoteState::Up, VoteDirection::Up, VoteState::None, -1),
            (VoteState::Down, VoteDirection::Down, VoteState::None, 1),
            (VoteState::Up, VoteDirection::Down, VoteState::Down, -2),
            (VoteState::Down, VoteDirection::Up, VoteState::Up, 2),
        ];
        for (from, action, expected_state, expected_delta) in cases {
            let (next, delta) = from.apply(action);
            assert_eq!(next, expected_state, "{:?} --{:?}-->", from, action);
            assert_eq!(delta, expected_delta, "{:?} --{:?}-->", from, action);
        }
    }

    #[test]
    fn upvote_twice_returns_to_none_with_zero_net_delta() {
        let (state, d1) = VoteState::None.apply(VoteDirection::Up);
        assert_eq!(state, VoteState::Up);
        let (state, d2) = state.apply(VoteDirection::Up);
        assert_eq!(state, VoteState::None);
        assert_eq!(d1 + d2, 0);
    }

    #[test]
    fn switching_direction_is_a_two_point_swing() {
        let (state, delta) = VoteState::Up.apply(VoteDirection::Down);
        assert_eq!(state, VoteState::Down);
        assert_eq!(delta, -2);
    }

    #[test]
    fn direction_column_roundtrip() {
        assert_eq!(
            VoteDirection::from_column(VoteDirection::Up.as_str()),
            Some(VoteDirection::Up)
        );
        assert_eq!(
            VoteDirection::from_column(VoteDirection::Down.as_str()),
            Some(VoteDirection::Down)
        );
        assert_eq!(VoteDirection::from_column("sideways"), None);
    }
}
