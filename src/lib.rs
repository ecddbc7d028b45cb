//! # jorge-engine
//!
//! Rules engine for the Jorge social-deduction party game: one hidden
//! impostor receives a sentinel clue word instead of the shared secret word;
//! players give clues, discuss, and vote out a suspect each round.
//!
//! ## Design Principles
//!
//! 1. **One explicit record**: a game is a single `GameRecord` value owned by
//!    a `GameEngine`; no global state, so tests and multiple games coexist.
//!
//! 2. **Synchronous and single-threaded**: the UI drives the engine one
//!    command at a time. Timers, screens and audio live outside.
//!
//! 3. **Deterministic randomness**: word draw, impostor pick, and speaking
//!    order all flow through a seeded, serializable `GameRng`.
//!
//! 4. **Persistence as a contract**: `serialize`/`restore` round-trip the
//!    whole observable record; a corrupt snapshot is "no saved game", never
//!    a crash.
//!
//! ## Modules
//!
//! - `core`: players, settings, rounds, the game record, RNG
//! - `engine`: the state machine and its snapshot format
//! - `words`: word-list catalog collaborator
//! - `store`: best-effort key-value persistence helpers
//! - `error`: error taxonomy

pub mod core;
pub mod engine;
pub mod error;
pub mod store;
pub mod words;

// Re-export commonly used types
pub use crate::core::{
    Ballot, GameOutcome, GamePhase, GameRecord, GameRng, GameRngState, GameSettings, Player,
    PlayerId, Round,
};

pub use crate::engine::{GameEngine, RoleAssignment, VoteResolution, IMPOSTOR_CLUE};

pub use crate::error::EngineError;

pub use crate::store::{BlobStore, MemoryStore, StoreError, SAVE_KEY};

pub use crate::words::{WordCatalog, GENERAL_CATEGORY};
