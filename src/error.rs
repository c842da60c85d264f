//! Error types shared by the whole engine.
//!
//! Every failure carries a stable kind tag so callers can branch on the
//! category without matching on message text.

use thiserror::Error;

use crate::tile::Tile;

/// All the ways an evaluation can fail.
///
/// Parsing and scoring are the only fallible surfaces; shanten and wait
/// enumeration always succeed on well-formed count vectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Unknown token in a tile list.
    #[error("unknown tile token: {0:?}")]
    MalformedTile(String),

    /// Hand size does not match what the operation expects.
    #[error("{0}")]
    HandLengthMismatch(String),

    /// More than four copies of one tile across all inputs.
    #[error("more than four copies of {0} across hand, melds and win tile")]
    TileOverCount(Tile),

    /// A declared meld is not a valid triplet, sequence or kan.
    #[error("invalid meld: {0}")]
    InvalidMeld(String),

    /// Declared meld tiles are not actually present in the hand.
    #[error("meld accounting mismatch: {0}")]
    MeldAccountingMismatch(String),

    /// The 14-tile hand is not a winning shape under any archetype.
    #[error("hand is not a winning shape with the provided win tile")]
    NoWinningDecomposition,

    /// Riichi was declared on a hand that contains open melds.
    #[error("riichi is not allowed when the hand is open (furo)")]
    RiichiRequiresClosed,

    /// Structurally winning, but no yaku and no yakuman.
    #[error("winning hand has no yaku (dora and red fives do not count as yaku)")]
    NoYaku,
}

impl EngineError {
    /// Stable machine-readable tag for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::MalformedTile(_) => "malformed-tile",
            EngineError::HandLengthMismatch(_) => "hand-length-mismatch",
            EngineError::TileOverCount(_) => "tile-over-count",
            EngineError::InvalidMeld(_) => "invalid-meld",
            EngineError::MeldAccountingMismatch(_) => "meld-accounting-mismatch",
            EngineError::NoWinningDecomposition => "no-winning-decomposition",
            EngineError::RiichiRequiresClosed => "riichi-requires-closed",
            EngineError::NoYaku => "no-yaku",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Suit, Tile};

    #[test]
    fn kind_tags_are_stable() {
        assert_eq!(
            EngineError::MalformedTile("xx".into()).kind(),
            "malformed-tile"
        );
        assert_eq!(EngineError::NoYaku.kind(), "no-yaku");
        assert_eq!(
            EngineError::TileOverCount(Tile::suited(Suit::Man, 5)).kind(),
            "tile-over-count"
        );
    }

    #[test]
    fn messages_are_human_readable() {
        let err = EngineError::MalformedTile("8z".into());
        assert!(err.to_string().contains("8z"));

        let err = EngineError::RiichiRequiresClosed;
        assert!(err.to_string().contains("riichi"));
    }
}
