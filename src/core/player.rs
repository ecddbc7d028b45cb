//! Player identity and per-game flags.
//!
//! ## PlayerId
//!
//! Type-safe player identifier, allocated sequentially in join order and
//! stable for the player's lifetime in a game.
//!
//! ## Player
//!
//! Roster entry with the two flags the engine tracks: elimination (monotonic,
//! false to true only) and the impostor role (assigned once per game).

use serde::{Deserialize, Serialize};

/// Player identifier, stable within one game.
///
/// Ids are 0-based and assigned in join order by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// A roster entry.
///
/// `is_impostor` is set exactly once, at role assignment, and never changes
/// afterwards (even for eliminated players). `is_eliminated` only ever flips
/// from false to true; `cast_decision` on the engine is the sole mutator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable identifier.
    pub id: PlayerId,
    /// Display name; non-empty and unique within a game.
    pub name: String,
    /// Voted out in an earlier round.
    pub is_eliminated: bool,
    /// Holds the impostor role for this game.
    pub is_impostor: bool,
}

impl Player {
    /// Create a new active, unassigned player.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_eliminated: false,
            is_impostor: false,
        }
    }

    /// A player still in the game.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_eliminated
    }
}
