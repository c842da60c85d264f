//! Scoring context: everything about the win besides the tiles themselves.

use serde::{Deserialize, Serialize};

use crate::tile::{Honor, Tile};

/// How the hand was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinType {
    /// Self-drawn winning tile.
    Tsumo,
    /// Winning tile taken from another player's discard.
    Ron,
}

/// The context a winning hand is scored under.
#[derive(Debug, Clone)]
pub struct ScoreContext {
    pub win_type: WinType,
    pub is_dealer: bool,
    pub seat_wind: Honor,
    pub round_wind: Honor,
    pub riichi: bool,

    /// Number of open melds, kans included.
    pub furo_sets: u8,
    /// How many of the open melds are kans.
    pub kan_sets: u8,

    /// Tiles that are dora (the tiles themselves, not indicators). Each
    /// occurrence in the hand is one extra han.
    pub dora_tiles: Vec<Tile>,
    /// Concealed-kan tile identities.
    pub ankan_tiles: Vec<Tile>,
    /// Open-kan tile identities, matching `kan_sets`.
    pub kan_tiles: Vec<Tile>,
}

impl ScoreContext {
    pub fn new(win_type: WinType, seat_wind: Honor, round_wind: Honor) -> Self {
        ScoreContext {
            win_type,
            is_dealer: false,
            seat_wind,
            round_wind,
            riichi: false,
            furo_sets: 0,
            kan_sets: 0,
            dora_tiles: Vec::new(),
            ankan_tiles: Vec::new(),
            kan_tiles: Vec::new(),
        }
    }

    /// Builder-style: the winner is the dealer.
    pub fn dealer(mut self) -> Self {
        self.is_dealer = true;
        self
    }

    /// Builder-style: riichi was declared.
    pub fn riichi(mut self) -> Self {
        self.riichi = true;
        self
    }

    /// Builder-style: set the dora tiles.
    pub fn with_dora(mut self, tiles: Vec<Tile>) -> Self {
        self.dora_tiles = tiles;
        self
    }

    /// Builder-style: declare open melds, `kan_sets` of them open kans with
    /// the given tile identities.
    pub fn with_furo(mut self, furo_sets: u8, kan_sets: u8, kan_tiles: Vec<Tile>) -> Self {
        self.furo_sets = furo_sets;
        self.kan_sets = kan_sets;
        self.kan_tiles = kan_tiles;
        self
    }

    /// Builder-style: declare concealed kans.
    pub fn with_ankan(mut self, tiles: Vec<Tile>) -> Self {
        self.ankan_tiles = tiles;
        self
    }

    /// Total kan count, open and concealed.
    pub fn total_kans(&self) -> usize {
        self.ankan_tiles.len() + self.kan_tiles.len()
    }

    /// Is this tile worth yakuhai han and pair fu: a dragon, the seat wind
    /// or the round wind?
    pub fn is_value_tile(&self, tile: Tile) -> bool {
        match tile {
            Tile::Honor(honor) => {
                honor.is_dragon() || honor == self.seat_wind || honor == self.round_wind
            }
            Tile::Suited { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Suit;

    #[test]
    fn value_tiles() {
        let ctx = ScoreContext::new(WinType::Ron, Honor::South, Honor::East);

        assert!(ctx.is_value_tile(Tile::honor(Honor::White)));
        assert!(ctx.is_value_tile(Tile::honor(Honor::Green)));
        assert!(ctx.is_value_tile(Tile::honor(Honor::Red)));
        assert!(ctx.is_value_tile(Tile::honor(Honor::South))); // seat
        assert!(ctx.is_value_tile(Tile::honor(Honor::East))); // round
        assert!(!ctx.is_value_tile(Tile::honor(Honor::West)));
        assert!(!ctx.is_value_tile(Tile::suited(Suit::Man, 5)));
    }

    #[test]
    fn builder_accumulates() {
        let ctx = ScoreContext::new(WinType::Tsumo, Honor::East, Honor::East)
            .dealer()
            .riichi()
            .with_dora(vec![Tile::suited(Suit::Pin, 4)])
            .with_ankan(vec![Tile::honor(Honor::White)]);

        assert!(ctx.is_dealer);
        assert!(ctx.riichi);
        assert_eq!(ctx.dora_tiles.len(), 1);
        assert_eq!(ctx.total_kans(), 1);
    }

    #[test]
    fn win_type_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&WinType::Tsumo).unwrap(), "\"tsumo\"");
        let parsed: WinType = serde_json::from_str("\"ron\"").unwrap();
        assert_eq!(parsed, WinType::Ron);
    }
}
