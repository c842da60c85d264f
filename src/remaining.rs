//! Remaining-tile bookkeeping: four copies of each kind minus what has been
//! seen in the hand and the river.

use crate::parse::TileCounts;
use crate::tile::{TILE_KINDS, Tile};

/// Counts how many of each tile are still unseen.
#[derive(Debug, Clone)]
pub struct RemainingTiles {
    used: TileCounts,
}

impl Default for RemainingTiles {
    fn default() -> Self {
        Self {
            used: [0; TILE_KINDS],
        }
    }
}

impl RemainingTiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.used = [0; TILE_KINDS];
    }

    pub fn add_used(&mut self, tiles: &[Tile]) {
        for tile in tiles {
            self.used[tile.index()] += 1;
        }
    }

    pub fn set_used(&mut self, tiles: &[Tile]) {
        self.reset();
        self.add_used(tiles);
    }

    /// Tiles left per kind, floored at zero if the inputs oversubscribe.
    pub fn remaining_counts(&self) -> TileCounts {
        let mut left = [0u8; TILE_KINDS];
        for (slot, &used) in left.iter_mut().zip(self.used.iter()) {
            *slot = 4u8.saturating_sub(used);
        }
        left
    }

    /// `token:count` pairs in index order.
    pub fn pretty_remaining(&self, only_nonzero: bool) -> String {
        self.remaining_counts()
            .iter()
            .enumerate()
            .filter(|&(_, &count)| !(only_nonzero && count == 0))
            .map(|(idx, count)| format!("{}:{}", Tile::from_index(idx), count))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_tiles;

    #[test]
    fn counts_down_from_four() {
        let mut counter = RemainingTiles::new();
        counter.set_used(&parse_tiles("1m 1m E").unwrap());

        let left = counter.remaining_counts();
        assert_eq!(left[0], 2);
        assert_eq!(left[27], 3);
        assert_eq!(left[33], 4);
    }

    #[test]
    fn oversubscription_floors_at_zero() {
        let mut counter = RemainingTiles::new();
        counter.add_used(&parse_tiles("9s 9s 9s 9s").unwrap());
        counter.add_used(&parse_tiles("9s").unwrap());
        assert_eq!(counter.remaining_counts()[26], 0);
    }

    #[test]
    fn pretty_output_skips_exhausted_kinds() {
        let mut counter = RemainingTiles::new();
        counter.set_used(&parse_tiles("1m 1m 1m 1m").unwrap());

        let text = counter.pretty_remaining(true);
        assert!(!text.contains("1m:"));
        assert!(text.contains("2m:4"));
        assert!(text.contains("C:4"));
    }

    #[test]
    fn reset_clears_usage() {
        let mut counter = RemainingTiles::new();
        counter.add_used(&parse_tiles("5p 5p").unwrap());
        counter.reset();
        assert_eq!(counter.remaining_counts()[13], 4);
    }
}
