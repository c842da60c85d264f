//! Melds and hand decomposition.
//!
//! A winning standard hand splits into a pair plus four melds. The
//! decomposition engine enumerates every such split of a 14-count vector,
//! optionally around a set of pre-fixed melds (declared kans and open furo).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::parse::TileCounts;
use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeldKind {
    /// Three consecutive tiles of one suit.
    Sequence,
    /// Three identical tiles.
    Triplet,
    /// Four identical tiles. Stored as the tile index repeated three times;
    /// the fourth copy is implied.
    Kong,
}

/// One meld of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub open: bool,
    pub tiles: [Tile; 3],
}

impl Meld {
    /// A sequence starting from its lowest tile. The caller guarantees the
    /// start is rank 1..=7 of a suit.
    pub fn sequence(lowest: Tile, open: bool) -> Self {
        let (suit, rank) = match lowest {
            Tile::Suited { suit, rank } => (suit, rank),
            Tile::Honor(_) => unreachable!("honour tiles cannot start a sequence"),
        };
        Meld {
            kind: MeldKind::Sequence,
            open,
            tiles: [
                lowest,
                Tile::suited(suit, rank + 1),
                Tile::suited(suit, rank + 2),
            ],
        }
    }

    pub fn triplet(tile: Tile, open: bool) -> Self {
        Meld {
            kind: MeldKind::Triplet,
            open,
            tiles: [tile; 3],
        }
    }

    pub fn kong(tile: Tile, open: bool) -> Self {
        Meld {
            kind: MeldKind::Kong,
            open,
            tiles: [tile; 3],
        }
    }

    /// The representative tile: the lowest of a sequence, otherwise the
    /// repeated tile.
    pub fn tile(&self) -> Tile {
        self.tiles[0]
    }

    pub fn is_sequence(&self) -> bool {
        self.kind == MeldKind::Sequence
    }

    /// Triplet or kong.
    pub fn is_set(&self) -> bool {
        matches!(self.kind, MeldKind::Triplet | MeldKind::Kong)
    }

    pub fn is_kong(&self) -> bool {
        self.kind == MeldKind::Kong
    }

    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// Physical tiles in the meld (a kong holds four).
    pub fn tile_count(&self) -> u8 {
        if self.is_kong() { 4 } else { 3 }
    }
}

/// A full split of a winning standard hand: the pair plus four melds.
///
/// Two decompositions differing only in meld order are the same
/// decomposition; the engine below emits each set once, fixed melds first
/// and extracted melds in ascending tile order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    pub pair: Tile,
    pub melds: Vec<Meld>,
}

impl Decomposition {
    /// Total tile multiset of the decomposition as a count vector.
    pub fn tile_counts(&self) -> TileCounts {
        let mut counts = [0u8; crate::tile::TILE_KINDS];
        counts[self.pair.index()] += 2;
        for meld in &self.melds {
            if meld.is_kong() {
                counts[meld.tile().index()] += 4;
            } else {
                for tile in meld.tiles {
                    counts[tile.index()] += 1;
                }
            }
        }
        counts
    }
}

/// Enumerate every (pair, four melds) split of a winning 14-count.
pub fn decompose_standard(counts: &TileCounts) -> Vec<Decomposition> {
    decompose_with_fixed(counts, &[])
}

/// Enumerate splits of a count vector around pre-fixed melds.
///
/// `counts` must already have the fixed melds' tiles removed; the fixed
/// melds are prepended to every emitted decomposition. With `fixed` empty
/// this is the plain 14-count decomposition.
pub fn decompose_with_fixed(counts: &TileCounts, fixed: &[Meld]) -> Vec<Decomposition> {
    let needed = 4 - fixed.len();
    let mut results = Vec::new();
    let mut seen = HashSet::new();

    for pair_idx in 0..counts.len() {
        if counts[pair_idx] < 2 {
            continue;
        }
        let mut work = *counts;
        work[pair_idx] -= 2;

        // Honour tiles only form triplets, so anything not divisible by
        // three can never decompose.
        if work[27..].iter().any(|&c| c % 3 != 0) {
            continue;
        }

        let pair = Tile::from_index(pair_idx);
        let mut melds = Vec::with_capacity(needed);
        extract_melds(&mut work, needed, &mut melds, &mut |found| {
            let mut all = fixed.to_vec();
            all.extend_from_slice(found);

            let mut signature = all.clone();
            signature.sort();
            if seen.insert((pair, signature)) {
                results.push(Decomposition { pair, melds: all });
            }
        });
    }

    results
}

/// Recursive meld extraction at the lowest occupied index.
fn extract_melds(
    counts: &mut TileCounts,
    needed: usize,
    melds: &mut Vec<Meld>,
    emit: &mut impl FnMut(&[Meld]),
) {
    let Some(i) = counts.iter().position(|&c| c > 0) else {
        if melds.len() == needed {
            emit(melds);
        }
        return;
    };
    if melds.len() >= needed {
        return;
    }

    let tile = Tile::from_index(i);

    if counts[i] >= 3 {
        counts[i] -= 3;
        melds.push(Meld::triplet(tile, false));
        extract_melds(counts, needed, melds, emit);
        melds.pop();
        counts[i] += 3;
    }

    if i <= 26 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
        counts[i] -= 1;
        counts[i + 1] -= 1;
        counts[i + 2] -= 1;
        melds.push(Meld::sequence(tile, false));
        extract_melds(counts, needed, melds, emit);
        melds.pop();
        counts[i] += 1;
        counts[i + 1] += 1;
        counts[i + 2] += 1;
    }
}

/// Parse three sorted tiles into a closed pon or chi shape, if they form one.
pub fn classify_triple(tiles: &mut [Tile; 3], open: bool) -> Option<Meld> {
    tiles.sort();
    if tiles[0] == tiles[1] && tiles[1] == tiles[2] {
        return Some(Meld::triplet(tiles[0], open));
    }
    let (suit, rank) = match tiles[0] {
        Tile::Suited { suit, rank } if rank <= 7 => (suit, rank),
        _ => return None,
    };
    let consecutive = tiles[1] == Tile::suited(suit, rank + 1)
        && tiles[2] == Tile::suited(suit, rank + 2);
    consecutive.then(|| Meld::sequence(tiles[0], open))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_tiles, tiles_to_counts, total_tiles};
    use crate::tile::{Honor, Suit};

    fn counts(hand: &str) -> TileCounts {
        tiles_to_counts(&parse_tiles(hand).unwrap())
    }

    #[test]
    fn unique_decomposition() {
        let c = counts("1m 2m 3m 4p 5p 6p 7s 8s 9s E E E S S");
        let decomps = decompose_standard(&c);
        assert_eq!(decomps.len(), 1);

        let d = &decomps[0];
        assert_eq!(d.pair, Tile::honor(Honor::South));
        assert_eq!(d.melds.len(), 4);
        assert_eq!(d.melds.iter().filter(|m| m.is_sequence()).count(), 3);
    }

    #[test]
    fn triplet_run_decomposes_both_ways() {
        // 111222333m can split as three triplets or three parallel sequences.
        let c = counts("1m 1m 1m 2m 2m 2m 3m 3m 3m E E E S S");
        let decomps = decompose_standard(&c);
        assert!(decomps.len() >= 2, "got {}", decomps.len());

        let all_sets = decomps
            .iter()
            .any(|d| d.melds.iter().all(|m| m.is_set()));
        let has_sequences = decomps
            .iter()
            .any(|d| d.melds.iter().filter(|m| m.is_sequence()).count() == 3);
        assert!(all_sets);
        assert!(has_sequences);
    }

    #[test]
    fn decomposition_conserves_tiles() {
        let c = counts("2m 2m 3m 3m 4m 4m 5m 5m 6m 6m 7m 7m 8m 8m");
        let decomps = decompose_standard(&c);
        assert!(!decomps.is_empty());
        for d in &decomps {
            assert_eq!(d.tile_counts(), c, "decomposition does not re-sum");
        }
    }

    #[test]
    fn no_decomposition_for_losing_hand() {
        let c = counts("1m 2m 3m 4m 4p 5p 6p 7p 8p 9s 1s 2s 3s E");
        assert!(decompose_standard(&c).is_empty());
    }

    #[test]
    fn duplicate_splits_are_emitted_once() {
        // Two identical sequences reachable through different recursion
        // orders must appear once.
        let c = counts("1m 1m 2m 2m 3m 3m 4p 5p 6p 7s 8s 9s C C");
        let decomps = decompose_standard(&c);
        assert_eq!(decomps.len(), 1);
        let twin = Meld::sequence(Tile::suited(Suit::Man, 1), false);
        assert_eq!(
            decomps[0].melds.iter().filter(|&&m| m == twin).count(),
            2
        );
    }

    #[test]
    fn fixed_melds_are_prepended() {
        // An open pon of C plus a closed kan of E fixed outside the counts.
        let fixed = [
            Meld::triplet(Tile::honor(Honor::Red), true),
            Meld::kong(Tile::honor(Honor::East), false),
        ];
        let c = counts("4p 5p 6p 7s 8s 9s S S");
        assert_eq!(total_tiles(&c), 8);

        let decomps = decompose_with_fixed(&c, &fixed);
        assert_eq!(decomps.len(), 1);

        let d = &decomps[0];
        assert_eq!(d.melds.len(), 4);
        assert_eq!(d.melds[0], fixed[0]);
        assert_eq!(d.melds[1], fixed[1]);
        assert_eq!(d.pair, Tile::honor(Honor::South));
    }

    #[test]
    fn classify_triple_shapes() {
        let mut pon = [
            Tile::honor(Honor::White),
            Tile::honor(Honor::White),
            Tile::honor(Honor::White),
        ];
        let meld = classify_triple(&mut pon, true).unwrap();
        assert_eq!(meld.kind, MeldKind::Triplet);
        assert!(meld.open);

        let mut chi = [
            Tile::suited(Suit::Pin, 9),
            Tile::suited(Suit::Pin, 7),
            Tile::suited(Suit::Pin, 8),
        ];
        let meld = classify_triple(&mut chi, true).unwrap();
        assert_eq!(meld.kind, MeldKind::Sequence);
        assert_eq!(meld.tile(), Tile::suited(Suit::Pin, 7));

        let mut honour_run = [
            Tile::honor(Honor::East),
            Tile::honor(Honor::South),
            Tile::honor(Honor::West),
        ];
        assert!(classify_triple(&mut honour_run, true).is_none());

        let mut gapped = [
            Tile::suited(Suit::Sou, 1),
            Tile::suited(Suit::Sou, 2),
            Tile::suited(Suit::Sou, 4),
        ];
        assert!(classify_triple(&mut gapped, true).is_none());
    }

    #[test]
    fn kong_counts_four_tiles() {
        let kong = Meld::kong(Tile::suited(Suit::Man, 1), false);
        assert_eq!(kong.tile_count(), 4);
        assert!(kong.is_set());
        assert!(!kong.is_sequence());
    }
}
