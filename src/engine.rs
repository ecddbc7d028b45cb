//! The game engine: authoritative state machine for one game.
//!
//! Driven synchronously by the UI, one command per transition:
//!
//! ```text
//! setup --(assign_roles)--> reveal
//! reveal --(start_round)--> speaking
//! speaking --(finish_speaking)--> discussion
//! discussion --(begin_voting)--> voting
//! voting --(cast_decision)--> roundResult | gameOver
//! roundResult --(next_round)--> speaking
//! roundResult --(end_game)--> gameOver
//! ```
//!
//! The engine holds the record and the RNG and nothing else; timers, screens
//! and audio live outside and only call in. Persistence is a JSON snapshot of
//! both, so a restored engine is observably identical to the saved one and
//! continues the same random sequence.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::player::{Player, PlayerId};
use crate::core::record::{GameOutcome, GamePhase, GameRecord};
use crate::core::rng::{GameRng, GameRngState};
use crate::core::round::Round;
use crate::core::settings::GameSettings;
use crate::error::EngineError;
use crate::words::WordCatalog;

/// The clue word shown to the impostor instead of the secret word.
pub const IMPOSTOR_CLUE: &str = "jorge";

/// What `assign_roles` decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleAssignment {
    /// The word drawn for this game.
    pub secret_word: String,
    /// Who received the impostor role.
    pub impostor: PlayerId,
}

/// How a group decision resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteResolution {
    /// The accused player.
    pub accused: PlayerId,
    /// The actual impostor (for the result screen).
    pub impostor: PlayerId,
    /// Whether the accusation named the impostor.
    pub caught: bool,
    /// Players still active after resolution.
    pub remaining_active: usize,
    /// Terminal outcome, if this decision ended the game.
    pub outcome: Option<GameOutcome>,
}

/// Serialized engine: the record plus the RNG position.
#[derive(Serialize, Deserialize)]
struct GameSnapshot {
    record: GameRecord,
    rng: GameRngState,
}

/// Authoritative engine for one game.
#[derive(Debug)]
pub struct GameEngine {
    record: GameRecord,
    rng: GameRng,
}

impl GameEngine {
    /// Create an engine in the setup phase with a fresh roster.
    ///
    /// Names are trimmed and must be non-empty and unique. Player ids are
    /// allocated in join order. Fails with `InvalidConfiguration` on a bad
    /// roster or bad settings; the two-player minimum is checked later, at
    /// role assignment.
    pub fn new<I, S>(names: I, settings: GameSettings, seed: u64) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        settings.validate()?;

        let mut players: Vector<Player> = Vector::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        for (index, name) in names.into_iter().enumerate() {
            let name = name.into();
            let name = name.trim();
            if name.is_empty() {
                return Err(EngineError::InvalidConfiguration(
                    "player names must not be empty".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "duplicate player name \"{name}\""
                )));
            }
            players.push_back(Player::new(PlayerId::new(index as u32), name));
        }

        Ok(Self {
            record: GameRecord::new(players, settings),
            rng: GameRng::new(seed),
        })
    }

    // === Views ===

    /// The full game record.
    #[must_use]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.record.phase()
    }

    /// Full roster in join order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        self.record.players()
    }

    /// Players still in the game.
    #[must_use]
    pub fn active_players(&self) -> Vec<&Player> {
        self.record.active_players()
    }

    /// The round in progress, if any.
    #[must_use]
    pub fn current_round(&self) -> Option<&Round> {
        self.record.current_round()
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.record.player(id)
    }

    /// Terminal outcome, if the game ended through a vote.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.record.outcome()
    }

    /// The clue word a player should be shown: the impostor gets the fixed
    /// sentinel, everyone else the secret word. `None` before roles are
    /// assigned or for an unknown id.
    #[must_use]
    pub fn clue_word(&self, id: PlayerId) -> Option<&str> {
        let player = self.record.player(id)?;
        let secret = self.record.secret_word()?;
        if player.is_impostor {
            Some(IMPOSTOR_CLUE)
        } else {
            Some(secret)
        }
    }

    // === Transitions ===

    /// Draw the secret word and hand out roles. Valid only in setup, exactly
    /// once per game; a second call fails loudly rather than silently
    /// reassigning a role mid-game.
    pub fn assign_roles(&mut self, catalog: &WordCatalog) -> Result<RoleAssignment, EngineError> {
        self.expect_phase("assign_roles", &[GamePhase::Setup])?;

        if self.record.players.len() < 2 {
            return Err(EngineError::InvalidConfiguration(
                "at least two players are required".to_string(),
            ));
        }

        let pool = catalog.resolve_pool(&self.record.settings)?;
        let secret_word = self
            .rng
            .choose(&pool)
            .cloned()
            .ok_or_else(|| {
                EngineError::InvalidConfiguration("empty word pool".to_string())
            })?;

        let impostor_index = self.rng.gen_range_usize(0..self.record.players.len());
        let mut impostor = PlayerId::new(0);
        for (index, player) in self.record.players.iter_mut().enumerate() {
            player.is_impostor = index == impostor_index;
            if player.is_impostor {
                impostor = player.id;
            }
        }

        self.record.secret_word = Some(secret_word.clone());
        self.record.phase = GamePhase::Reveal;

        Ok(RoleAssignment {
            secret_word,
            impostor,
        })
    }

    /// Begin a round with the given word. Valid from reveal or roundResult.
    ///
    /// The word is an explicit parameter: callers normally pass the running
    /// word from `assign_roles` (and `next_round` does exactly that), but the
    /// interface permits re-rolling it. Generates a fresh speaking-order
    /// permutation of the players active right now.
    pub fn start_round(&mut self, secret_word: impl Into<String>) -> Result<&Round, EngineError> {
        self.expect_phase("start_round", &[GamePhase::Reveal, GamePhase::RoundResult])?;
        self.push_round(secret_word.into())
    }

    /// All clues have been given. speaking -> discussion.
    pub fn finish_speaking(&mut self) -> Result<(), EngineError> {
        self.expect_phase("finish_speaking", &[GamePhase::Speaking])?;
        self.record.phase = GamePhase::Discussion;
        Ok(())
    }

    /// Discussion timer expired or was skipped. discussion -> voting.
    pub fn begin_voting(&mut self) -> Result<(), EngineError> {
        self.expect_phase("begin_voting", &[GamePhase::Discussion])?;
        self.record.phase = GamePhase::Voting;
        Ok(())
    }

    /// Record one voter's ballot. Valid only while voting. The first ballot
    /// per voter stands; returns whether this one was recorded.
    pub fn record_ballot(
        &mut self,
        voter: PlayerId,
        accused: PlayerId,
    ) -> Result<bool, EngineError> {
        self.expect_phase("record_ballot", &[GamePhase::Voting])?;
        if self.record.player(voter).is_none() {
            return Err(EngineError::UnknownPlayer(voter));
        }
        if self.record.player(accused).is_none() {
            return Err(EngineError::UnknownPlayer(accused));
        }

        let index = self.record.rounds.len() - 1;
        let round = self
            .record
            .rounds
            .get_mut(index)
            .expect("voting phase implies a current round");
        Ok(round.record_ballot(voter, accused))
    }

    /// Resolve the group's accusation. Valid only while voting.
    ///
    /// Naming the impostor ends the game with `group_wins` and eliminates
    /// nobody. Otherwise the accused is eliminated (the only place that flag
    /// is ever set), and the impostor wins by attrition once two or fewer
    /// players remain.
    pub fn cast_decision(&mut self, accused: PlayerId) -> Result<VoteResolution, EngineError> {
        self.expect_phase("cast_decision", &[GamePhase::Voting])?;

        let caught = self
            .record
            .player(accused)
            .ok_or(EngineError::UnknownPlayer(accused))?
            .is_impostor;
        let impostor = self
            .record
            .impostor()
            .map(|p| p.id)
            .ok_or_else(|| {
                EngineError::CorruptState("voting phase without an impostor".to_string())
            })?;

        let index = self.record.rounds.len() - 1;
        if let Some(round) = self.record.rounds.get_mut(index) {
            round.decision = Some(accused);
        }

        if caught {
            self.record.phase = GamePhase::GameOver;
            self.record.outcome = Some(GameOutcome::GroupWins);
            return Ok(VoteResolution {
                accused,
                impostor,
                caught: true,
                remaining_active: self.record.active_count(),
                outcome: Some(GameOutcome::GroupWins),
            });
        }

        if let Some(player) = self.record.players.iter_mut().find(|p| p.id == accused) {
            player.is_eliminated = true;
        }
        let remaining_active = self.record.active_count();

        let outcome = if remaining_active <= 2 {
            self.record.phase = GamePhase::GameOver;
            self.record.outcome = Some(GameOutcome::JorgeWins);
            Some(GameOutcome::JorgeWins)
        } else {
            self.record.phase = GamePhase::RoundResult;
            None
        };

        Ok(VoteResolution {
            accused,
            impostor,
            caught: false,
            remaining_active,
            outcome,
        })
    }

    /// Start the next round, reusing the running secret word. Valid only
    /// from roundResult.
    pub fn next_round(&mut self) -> Result<&Round, EngineError> {
        self.expect_phase("next_round", &[GamePhase::RoundResult])?;
        let word = self.record.secret_word.clone().ok_or_else(|| {
            EngineError::CorruptState("roundResult phase without a secret word".to_string())
        })?;
        self.push_round(word)
    }

    /// Abandon a game that is between rounds. roundResult -> gameOver, with
    /// no outcome recorded.
    pub fn end_game(&mut self) -> Result<(), EngineError> {
        self.expect_phase("end_game", &[GamePhase::RoundResult])?;
        self.record.phase = GamePhase::GameOver;
        Ok(())
    }

    /// Discard the game in progress: clears rounds, outcome, the secret
    /// word, and every player's flags, keeping the roster and settings.
    /// Valid from any phase.
    pub fn reset(&mut self) {
        self.record.phase = GamePhase::Idle;
        self.record.rounds = Vector::new();
        self.record.secret_word = None;
        self.record.outcome = None;
        for player in self.record.players.iter_mut() {
            player.is_eliminated = false;
            player.is_impostor = false;
        }
    }

    // === Persistence ===

    /// Produce a self-describing JSON snapshot of the record and RNG state.
    pub fn serialize(&self) -> Result<String, EngineError> {
        let snapshot = GameSnapshot {
            record: self.record.clone(),
            rng: self.rng.state(),
        };
        serde_json::to_string(&snapshot).map_err(|e| EngineError::CorruptState(e.to_string()))
    }

    /// Rebuild an engine from a snapshot, re-validating its structure.
    ///
    /// Fails with `CorruptState` on anything that does not parse into a
    /// valid record; callers treat that as "no saved game".
    pub fn restore(blob: &str) -> Result<Self, EngineError> {
        let snapshot: GameSnapshot =
            serde_json::from_str(blob).map_err(|e| EngineError::CorruptState(e.to_string()))?;
        snapshot.record.validate()?;
        Ok(Self {
            record: snapshot.record,
            rng: GameRng::from_state(&snapshot.rng),
        })
    }

    // === Internals ===

    fn expect_phase(
        &self,
        command: &'static str,
        allowed: &[GamePhase],
    ) -> Result<(), EngineError> {
        let from = self.record.phase;
        if allowed.contains(&from) {
            Ok(())
        } else {
            Err(EngineError::IllegalTransition { command, from })
        }
    }

    fn push_round(&mut self, secret_word: String) -> Result<&Round, EngineError> {
        let mut order: Vec<PlayerId> = self
            .record
            .players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.id)
            .collect();
        if order.len() < 2 {
            return Err(EngineError::NoActivePlayers);
        }
        self.rng.shuffle(&mut order);

        let number = self.record.rounds.len() as u32 + 1;
        self.record.secret_word = Some(secret_word.clone());
        self.record
            .rounds
            .push_back(Round::new(number, order, secret_word));
        self.record.phase = GamePhase::Speaking;

        Ok(self
            .record
            .rounds
            .back()
            .expect("round was just appended"))
    }
}
