//! Engine error taxonomy.
//!
//! Every failure is synchronous and returned to the caller; nothing here
//! crashes the process. `CorruptState` is special-cased by the store helpers,
//! which treat it as "no saved game".

use crate::core::player::PlayerId;
use crate::core::record::GamePhase;

/// Errors surfaced by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Bad roster or word pool at setup time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A command was invoked from a phase that does not permit it.
    #[error("{command} is not allowed in the {from} phase")]
    IllegalTransition {
        command: &'static str,
        from: GamePhase,
    },

    /// A player id was not found in the roster.
    #[error("unknown {0}")]
    UnknownPlayer(PlayerId),

    /// Fewer than two active players remain. Defensive: win evaluation ends
    /// the game before this can happen through normal play.
    #[error("fewer than two active players remain")]
    NoActivePlayers,

    /// A persisted snapshot did not parse into a structurally valid record.
    #[error("corrupt saved game: {0}")]
    CorruptState(String),
}
