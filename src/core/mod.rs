//! Core types: players, settings, rounds, the game record, and RNG.

pub mod player;
pub mod record;
pub mod rng;
pub mod round;
pub mod settings;

pub use player::{Player, PlayerId};
pub use record::{GameOutcome, GamePhase, GameRecord};
pub use rng::{GameRng, GameRngState};
pub use round::{Ballot, Round};
pub use settings::GameSettings;
