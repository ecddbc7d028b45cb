//! One speak-discuss-vote cycle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// A single recorded vote: one voter naming one suspect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ballot {
    pub voter: PlayerId,
    pub accused: PlayerId,
}

/// One round of play.
///
/// `speaking_order` is a permutation of the players active when the round was
/// created; later eliminations do not shrink it. `votes` holds at most one
/// ballot per voter; `decision` is the group's single chosen suspect, set by
/// `cast_decision`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// 1-based position in the round history.
    pub number: u32,

    /// Clue order for this round, fixed at round start.
    pub speaking_order: SmallVec<[PlayerId; 8]>,

    /// The word shown to every non-impostor player this round.
    pub secret_word: String,

    /// Individual ballots, at most one per voter.
    pub votes: Vec<Ballot>,

    /// The group's accusation, once cast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<PlayerId>,
}

impl Round {
    /// Create a round with an empty ballot box.
    pub fn new(
        number: u32,
        speaking_order: impl IntoIterator<Item = PlayerId>,
        secret_word: impl Into<String>,
    ) -> Self {
        Self {
            number,
            speaking_order: speaking_order.into_iter().collect(),
            secret_word: secret_word.into(),
            votes: Vec::new(),
            decision: None,
        }
    }

    /// Look up a voter's ballot.
    #[must_use]
    pub fn ballot_for(&self, voter: PlayerId) -> Option<PlayerId> {
        self.votes
            .iter()
            .find(|ballot| ballot.voter == voter)
            .map(|ballot| ballot.accused)
    }

    /// Record a ballot. The first ballot per voter stands; there is no undo,
    /// so a repeat voter is ignored. Returns whether the ballot was recorded.
    pub(crate) fn record_ballot(&mut self, voter: PlayerId, accused: PlayerId) -> bool {
        if self.ballot_for(voter).is_some() {
            return false;
        }
        self.votes.push(Ballot { voter, accused });
        true
    }
}
