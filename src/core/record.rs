//! The root game aggregate.
//!
//! `GameRecord` is the single authoritative value for one game: phase,
//! roster, settings, and round history. It is a plain data structure; all
//! transitions go through `GameEngine`, which is the only mutator. `im`
//! vectors keep clones cheap, so snapshots and compute-new-from-old updates
//! never copy the whole history.

use im::Vector;
use serde::{Deserialize, Serialize};
use rustc_hash::FxHashSet;

use super::player::{Player, PlayerId};
use super::round::Round;
use super::settings::GameSettings;
use crate::error::EngineError;

/// Current phase of the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// No game in progress.
    Idle,
    /// Roster and settings fixed, roles not yet assigned.
    Setup,
    /// Roles assigned; players are privately reading their words.
    Reveal,
    /// Players give clues in speaking order.
    Speaking,
    /// Open discussion before the vote.
    Discussion,
    /// The group is choosing a suspect.
    Voting,
    /// A wrong accusation was resolved; the game continues.
    RoundResult,
    /// Terminal. No further round may start.
    GameOver,
}

impl GamePhase {
    /// Wire name of the phase, as it appears in snapshots.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Setup => "setup",
            GamePhase::Reveal => "reveal",
            GamePhase::Speaking => "speaking",
            GamePhase::Discussion => "discussion",
            GamePhase::Voting => "voting",
            GamePhase::RoundResult => "roundResult",
            GamePhase::GameOver => "gameOver",
        }
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    /// The group named the impostor.
    GroupWins,
    /// The impostor survived to the last two players.
    JorgeWins,
}

/// Complete record of one game.
///
/// Serializes to a self-describing snapshot; `GameRecord::validate` is the
/// structural gate applied when restoring one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub(crate) phase: GamePhase,
    pub(crate) players: Vector<Player>,
    pub(crate) settings: GameSettings,
    pub(crate) rounds: Vector<Round>,
    /// The running word, fixed at role assignment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) secret_word: Option<String>,
    /// Set only when the game ended through a vote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) outcome: Option<GameOutcome>,
}

impl GameRecord {
    /// Create a record in the setup phase.
    pub(crate) fn new(players: Vector<Player>, settings: GameSettings) -> Self {
        Self {
            phase: GamePhase::Setup,
            players,
            settings,
            rounds: Vector::new(),
            secret_word: None,
            outcome: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Full roster in join order, eliminated players included.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Game settings.
    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Round history, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &Vector<Round> {
        &self.rounds
    }

    /// The round in progress (last of the history), if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.back()
    }

    /// The running secret word, once roles are assigned.
    #[must_use]
    pub fn secret_word(&self) -> Option<&str> {
        self.secret_word.as_deref()
    }

    /// Terminal outcome, if the game ended through a vote.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// The impostor, once roles are assigned.
    #[must_use]
    pub fn impostor(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_impostor)
    }

    /// Players still in the game, in join order.
    #[must_use]
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_active()).collect()
    }

    /// Number of players still in the game.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Structural validation for restored snapshots.
    ///
    /// Checks everything a malformed or hand-edited blob could break: roster
    /// identity, round numbering, speaking orders, ballots, and role flags.
    /// Phase-reachability is intentionally not re-derived; a snapshot only
    /// has to be a state the engine could hold.
    pub fn validate(&self) -> Result<(), EngineError> {
        let corrupt = |message: &str| EngineError::CorruptState(message.to_string());

        let mut ids = FxHashSet::default();
        let mut names = FxHashSet::default();
        for player in &self.players {
            if player.name.trim().is_empty() {
                return Err(corrupt("player with empty name"));
            }
            if !ids.insert(player.id) {
                return Err(corrupt("duplicate player id"));
            }
            if !names.insert(player.name.trim().to_string()) {
                return Err(corrupt("duplicate player name"));
            }
        }

        let impostor_count = self.players.iter().filter(|p| p.is_impostor).count();
        if impostor_count > 1 {
            return Err(corrupt("more than one impostor"));
        }

        for (index, round) in self.rounds.iter().enumerate() {
            if round.number as usize != index + 1 {
                return Err(corrupt("round numbers do not form a 1..n sequence"));
            }
            if round.speaking_order.is_empty() {
                return Err(corrupt("round with empty speaking order"));
            }
            let mut speakers = FxHashSet::default();
            for &speaker in &round.speaking_order {
                if !ids.contains(&speaker) {
                    return Err(corrupt("speaking order references unknown player"));
                }
                if !speakers.insert(speaker) {
                    return Err(corrupt("duplicate player in speaking order"));
                }
            }
            let mut voters = FxHashSet::default();
            for ballot in &round.votes {
                if !ids.contains(&ballot.voter) || !ids.contains(&ballot.accused) {
                    return Err(corrupt("ballot references unknown player"));
                }
                if !voters.insert(ballot.voter) {
                    return Err(corrupt("more than one ballot from the same voter"));
                }
            }
            if let Some(decision) = round.decision {
                if !ids.contains(&decision) {
                    return Err(corrupt("decision references unknown player"));
                }
            }
        }

        if self.settings.validate().is_err() {
            return Err(corrupt("invalid settings"));
        }

        // In-round phases need a round in progress.
        let in_round_phase = matches!(
            self.phase,
            GamePhase::Speaking | GamePhase::Discussion | GamePhase::Voting | GamePhase::RoundResult
        );
        if in_round_phase && self.rounds.is_empty() {
            return Err(corrupt("phase requires a round in progress"));
        }

        // Once play has started there must be exactly one impostor and a word.
        if !self.rounds.is_empty() || self.phase == GamePhase::Reveal {
            if impostor_count != 1 {
                return Err(corrupt("roles not assigned for a started game"));
            }
            if self.secret_word.is_none() {
                return Err(corrupt("started game without a secret word"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vector<Player> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(PlayerId::new(i as u32), *name))
            .collect()
    }

    fn setup_record(names: &[&str]) -> GameRecord {
        GameRecord::new(roster(names), GameSettings::default())
    }

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(GamePhase::RoundResult.as_str(), "roundResult");
        assert_eq!(GamePhase::GameOver.as_str(), "gameOver");
        assert_eq!(
            serde_json::to_string(&GamePhase::RoundResult).unwrap(),
            "\"roundResult\""
        );
    }

    #[test]
    fn test_outcome_wire_names() {
        assert_eq!(
            serde_json::to_string(&GameOutcome::JorgeWins).unwrap(),
            "\"jorge_wins\""
        );
        assert_eq!(
            serde_json::to_string(&GameOutcome::GroupWins).unwrap(),
            "\"group_wins\""
        );
    }

    #[test]
    fn test_new_record() {
        let record = setup_record(&["Ana", "Rui", "Sofia"]);

        assert_eq!(record.phase(), GamePhase::Setup);
        assert_eq!(record.players().len(), 3);
        assert_eq!(record.active_count(), 3);
        assert!(record.current_round().is_none());
        assert!(record.impostor().is_none());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let record = setup_record(&["Ana", "Ana"]);
        assert!(matches!(
            record.validate(),
            Err(EngineError::CorruptState(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_round_numbers() {
        let mut record = setup_record(&["Ana", "Rui", "Sofia"]);
        record.secret_word = Some("praia".to_string());
        if let Some(p) = record.players.get_mut(0) {
            p.is_impostor = true;
        }
        record
            .rounds
            .push_back(Round::new(2, [PlayerId::new(0), PlayerId::new(1)], "praia"));

        assert!(matches!(
            record.validate(),
            Err(EngineError::CorruptState(_))
        ));
    }

    #[test]
    fn test_validate_rejects_two_impostors() {
        let mut record = setup_record(&["Ana", "Rui"]);
        for p in record.players.iter_mut() {
            p.is_impostor = true;
        }
        assert!(matches!(
            record.validate(),
            Err(EngineError::CorruptState(_))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_speaker() {
        let mut record = setup_record(&["Ana", "Rui", "Sofia"]);
        record.secret_word = Some("praia".to_string());
        if let Some(p) = record.players.get_mut(0) {
            p.is_impostor = true;
        }
        record
            .rounds
            .push_back(Round::new(1, [PlayerId::new(0), PlayerId::new(42)], "praia"));

        assert!(matches!(
            record.validate(),
            Err(EngineError::CorruptState(_))
        ));
    }

    #[test]
    fn test_validate_rejects_in_round_phase_without_rounds() {
        let mut record = setup_record(&["Ana", "Rui", "Sofia"]);
        record.phase = GamePhase::Voting;

        assert!(matches!(
            record.validate(),
            Err(EngineError::CorruptState(_))
        ));
    }

    #[test]
    fn test_validate_requires_roles_once_started() {
        let mut record = setup_record(&["Ana", "Rui", "Sofia"]);
        record.secret_word = Some("praia".to_string());
        record
            .rounds
            .push_back(Round::new(1, [PlayerId::new(0), PlayerId::new(1)], "praia"));

        // A round exists but nobody holds the impostor role.
        assert!(matches!(
            record.validate(),
            Err(EngineError::CorruptState(_))
        ));
    }
}
