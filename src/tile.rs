//! Tile types and the 0..34 index space.
//!
//! Every tile kind maps to one index: 0-8 are the man suit 1-9, 9-17 pin,
//! 18-26 sou, 27-33 the honours in the fixed order East, South, West, North,
//! White, Green, Red. Red fives are accepted on input but share the index of
//! the ordinary five; see the parse module for the bookkeeping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of distinct tile kinds.
pub const TILE_KINDS: usize = 34;

/// Indices of the thirteen terminal and honour tiles (for kokushi and
/// terminal/honour predicates).
pub const TERMINAL_HONOR_INDICES: [usize; 13] =
    [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Man, // Characters
    Pin, // Circles
    Sou, // Bamboo
}

impl Suit {
    /// The suit letter used in tile tokens.
    pub fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
        }
    }

    fn index_base(self) -> usize {
        match self {
            Suit::Man => 0,
            Suit::Pin => 9,
            Suit::Sou => 18,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Honor {
    // Winds
    East,
    South,
    West,
    North,
    // Dragons
    White,
    Green,
    Red,
}

impl Honor {
    /// The single-letter token for this honour (winds by compass letter,
    /// dragons P/F/C for white/green/red).
    pub fn letter(self) -> char {
        match self {
            Honor::East => 'E',
            Honor::South => 'S',
            Honor::West => 'W',
            Honor::North => 'N',
            Honor::White => 'P',
            Honor::Green => 'F',
            Honor::Red => 'C',
        }
    }

    pub fn is_wind(self) -> bool {
        matches!(self, Honor::East | Honor::South | Honor::West | Honor::North)
    }

    pub fn is_dragon(self) -> bool {
        matches!(self, Honor::White | Honor::Green | Honor::Red)
    }

    fn ordinal(self) -> usize {
        match self {
            Honor::East => 0,
            Honor::South => 1,
            Honor::West => 2,
            Honor::North => 3,
            Honor::White => 4,
            Honor::Green => 5,
            Honor::Red => 6,
        }
    }
}

/// A single mahjong tile kind.
///
/// The derived ordering matches index order, so sorting tiles sorts by
/// (suit ordinal, rank) with honours last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    Suited { suit: Suit, rank: u8 }, // rank is 1..=9
    Honor(Honor),
}

impl Tile {
    /// Create a suited tile (e.g. 5-man).
    pub fn suited(suit: Suit, rank: u8) -> Self {
        Tile::Suited { suit, rank }
    }

    /// Create an honour tile.
    pub fn honor(honor: Honor) -> Self {
        Tile::Honor(honor)
    }

    /// Index in the 0..34 space.
    pub fn index(self) -> usize {
        match self {
            Tile::Suited { suit, rank } => suit.index_base() + rank as usize - 1,
            Tile::Honor(honor) => 27 + honor.ordinal(),
        }
    }

    /// Inverse of [`Tile::index`]. Indices outside 0..34 are a caller bug.
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < TILE_KINDS, "tile index out of range: {idx}");
        if idx < 27 {
            let suit = match idx / 9 {
                0 => Suit::Man,
                1 => Suit::Pin,
                _ => Suit::Sou,
            };
            Tile::suited(suit, (idx % 9) as u8 + 1)
        } else {
            let honor = match idx - 27 {
                0 => Honor::East,
                1 => Honor::South,
                2 => Honor::West,
                3 => Honor::North,
                4 => Honor::White,
                5 => Honor::Green,
                _ => Honor::Red,
            };
            Tile::honor(honor)
        }
    }

    /// Is this a simple tile (2-8 of a suit)?
    pub fn is_simple(self) -> bool {
        match self {
            Tile::Suited { rank, .. } => (2..=8).contains(&rank),
            Tile::Honor(_) => false,
        }
    }

    /// Is this a terminal (1 or 9 of a suit)?
    pub fn is_terminal(self) -> bool {
        matches!(self, Tile::Suited { rank: 1 | 9, .. })
    }

    pub fn is_honor(self) -> bool {
        matches!(self, Tile::Honor(_))
    }

    pub fn is_terminal_or_honor(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    pub fn is_dragon(self) -> bool {
        matches!(self, Tile::Honor(h) if h.is_dragon())
    }

    pub fn is_wind(self) -> bool {
        matches!(self, Tile::Honor(h) if h.is_wind())
    }

    /// The suit, for suited tiles.
    pub fn suit(self) -> Option<Suit> {
        match self {
            Tile::Suited { suit, .. } => Some(suit),
            Tile::Honor(_) => None,
        }
    }

    /// The rank 1..=9, for suited tiles.
    pub fn rank(self) -> Option<u8> {
        match self {
            Tile::Suited { rank, .. } => Some(rank),
            Tile::Honor(_) => None,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tile::Suited { suit, rank } => write!(f, "{}{}", rank, suit.letter()),
            Tile::Honor(honor) => write!(f, "{}", honor.letter()),
        }
    }
}

impl FromStr for Tile {
    type Err = EngineError;

    /// Parse a canonical tile token: `1m`..`9s` or one of `E S W N P F C`.
    /// Red-five tokens (`0m` etc.) are handled by the parse module, not here.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = || EngineError::MalformedTile(token.to_string());

        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), None, None) => {
                let honor = match c {
                    'E' => Honor::East,
                    'S' => Honor::South,
                    'W' => Honor::West,
                    'N' => Honor::North,
                    'P' => Honor::White,
                    'F' => Honor::Green,
                    'C' => Honor::Red,
                    _ => return Err(malformed()),
                };
                Ok(Tile::honor(honor))
            }
            (Some(digit), Some(letter), None) => {
                let suit = match letter {
                    'm' => Suit::Man,
                    'p' => Suit::Pin,
                    's' => Suit::Sou,
                    _ => return Err(malformed()),
                };
                let rank = digit.to_digit(10).ok_or_else(malformed)? as u8;
                if !(1..=9).contains(&rank) {
                    return Err(malformed());
                }
                Ok(Tile::suited(suit, rank))
            }
            _ => Err(malformed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrip() {
        for idx in 0..TILE_KINDS {
            let tile = Tile::from_index(idx);
            assert_eq!(tile.index(), idx, "index {idx} did not round-trip");
        }
    }

    #[test]
    fn token_roundtrip() {
        for idx in 0..TILE_KINDS {
            let tile = Tile::from_index(idx);
            let token = tile.to_string();
            assert_eq!(token.parse::<Tile>().unwrap(), tile);
        }
    }

    #[test]
    fn specific_indices() {
        assert_eq!(Tile::suited(Suit::Man, 1).index(), 0);
        assert_eq!(Tile::suited(Suit::Man, 9).index(), 8);
        assert_eq!(Tile::suited(Suit::Pin, 1).index(), 9);
        assert_eq!(Tile::suited(Suit::Sou, 1).index(), 18);
        assert_eq!(Tile::honor(Honor::East).index(), 27);
        assert_eq!(Tile::honor(Honor::Red).index(), 33);
    }

    #[test]
    fn tile_predicates() {
        assert!(Tile::suited(Suit::Pin, 5).is_simple());
        assert!(!Tile::suited(Suit::Pin, 9).is_simple());
        assert!(Tile::suited(Suit::Sou, 1).is_terminal());
        assert!(!Tile::honor(Honor::East).is_terminal());
        assert!(Tile::honor(Honor::White).is_terminal_or_honor());
        assert!(Tile::honor(Honor::Green).is_dragon());
        assert!(Tile::honor(Honor::North).is_wind());
        assert!(!Tile::honor(Honor::North).is_dragon());
    }

    #[test]
    fn terminal_honor_indices_match_predicate() {
        for idx in 0..TILE_KINDS {
            let listed = TERMINAL_HONOR_INDICES.contains(&idx);
            assert_eq!(listed, Tile::from_index(idx).is_terminal_or_honor());
        }
    }

    #[test]
    fn rejects_unknown_tokens() {
        for token in ["", "x", "0z", "10m", "E1", "e", "5x", "mm"] {
            assert!(token.parse::<Tile>().is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn ordering_follows_index_order() {
        let mut tiles: Vec<Tile> = (0..TILE_KINDS).rev().map(Tile::from_index).collect();
        tiles.sort();
        for (idx, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.index(), idx);
        }
    }
}
