//! Shanten calculation.
//!
//! Shanten is the number of tile exchanges needed to reach a winning shape.
//! Tenpai is shanten 0. Values are reported per archetype (standard hand,
//! seven pairs, thirteen orphans) together with their minimum, and are never
//! negative: a complete 14-tile hand reports 0.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::parse::{TileCounts, total_tiles};
use crate::tile::TERMINAL_HONOR_INDICES;

/// Shanten per archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShantenResult {
    pub standard: u8,
    pub chiitoitsu: u8,
    pub kokushi: u8,
}

impl ShantenResult {
    /// The best shanten across all archetypes.
    pub fn minimum(&self) -> u8 {
        self.standard.min(self.chiitoitsu).min(self.kokushi)
    }
}

/// Calculate shanten under every archetype.
pub fn calculate_shanten(counts: &TileCounts) -> ShantenResult {
    ShantenResult {
        standard: shanten_standard(counts),
        chiitoitsu: shanten_chiitoitsu(counts),
        kokushi: shanten_kokushi(counts),
    }
}

/// Seven pairs: `6 - pairs + max(0, 7 - distinct)`.
///
/// The second term penalises duplicate concentration; seven pairs needs
/// seven distinct tile kinds.
pub fn shanten_chiitoitsu(counts: &TileCounts) -> u8 {
    let pairs: i8 = counts.iter().map(|&c| (c / 2) as i8).sum::<i8>().min(7);
    let distinct: i8 = counts.iter().filter(|&&c| c > 0).count() as i8;
    let value = 6 - pairs + (7 - distinct).max(0);
    value.max(0) as u8
}

/// Thirteen orphans: `13 - distinct terminal/honour kinds - (1 if paired)`.
pub fn shanten_kokushi(counts: &TileCounts) -> u8 {
    let mut distinct = 0i8;
    let mut has_pair = false;
    for &idx in &TERMINAL_HONOR_INDICES {
        if counts[idx] > 0 {
            distinct += 1;
        }
        if counts[idx] >= 2 {
            has_pair = true;
        }
    }
    let value = 13 - distinct - i8::from(has_pair);
    value.max(0) as u8
}

/// Standard hand (four melds and a pair).
///
/// A 14-tile input reduces to the minimum over all single-tile removals.
/// A 13-tile input runs the extraction search directly.
pub fn shanten_standard(counts: &TileCounts) -> u8 {
    if total_tiles(counts) == 14 {
        let mut best = 8;
        let mut work = *counts;
        for idx in 0..work.len() {
            if work[idx] == 0 {
                continue;
            }
            work[idx] -= 1;
            best = best.min(shanten_standard(&work));
            work[idx] += 1;
        }
        return best;
    }

    let mut search = StandardSearch {
        best: 8,
        seen: HashSet::new(),
    };
    let mut work = *counts;
    search.walk(&mut work, 0, 0, false);
    search.best.max(0) as u8
}

/// Depth-first extraction search for the standard archetype.
///
/// At the first occupied index the branches are: drop an isolated tile,
/// extract a triplet, extract a sequence (suited, position 1-7), take the
/// pair as the head (once), or take a two-tile partial meld while fewer than
/// four are held. Honours only admit the triplet and pair shapes. The value
/// of a state is `8 - 2*melds - min(taatsu, 4 - melds) - pair`.
///
/// States are memoised per call and pruned once even the most optimistic
/// remaining extractions cannot beat the best value found so far.
struct StandardSearch {
    best: i8,
    seen: HashSet<(TileCounts, u8, u8, bool)>,
}

impl StandardSearch {
    fn walk(&mut self, counts: &mut TileCounts, melds: u8, taatsu: u8, has_pair: bool) {
        if melds > 4 {
            return;
        }
        if !self.seen.insert((*counts, melds, taatsu, has_pair)) {
            return;
        }

        let slots = 4 - melds;
        let value = 8 - 2 * melds as i8 - taatsu.min(slots) as i8 - i8::from(has_pair);
        if value < self.best {
            self.best = value;
        }

        let remaining = total_tiles(counts);
        // Optimistic improvement caps: two points per future meld but never
        // more than two points per three remaining tiles.
        let cap = (3 * slots as i8 + 1).min((2 * remaining as i8 + 2) / 3);
        if value - cap >= self.best {
            return;
        }

        let Some(i) = counts.iter().position(|&c| c > 0) else {
            return;
        };

        // Drop one tile as isolated.
        counts[i] -= 1;
        self.walk(counts, melds, taatsu, has_pair);
        counts[i] += 1;

        // Triplet.
        if counts[i] >= 3 {
            counts[i] -= 3;
            self.walk(counts, melds + 1, taatsu, has_pair);
            counts[i] += 3;
        }

        // Sequence, suited only, no wrap across the 1-9 boundary.
        if i <= 26 && i % 9 <= 6 && counts[i + 1] > 0 && counts[i + 2] > 0 {
            counts[i] -= 1;
            counts[i + 1] -= 1;
            counts[i + 2] -= 1;
            self.walk(counts, melds + 1, taatsu, has_pair);
            counts[i] += 1;
            counts[i + 1] += 1;
            counts[i + 2] += 1;
        }

        // Pair as the head, at most once.
        if !has_pair && counts[i] >= 2 {
            counts[i] -= 2;
            self.walk(counts, melds, taatsu, true);
            counts[i] += 2;
        }

        // Partial melds.
        if taatsu < 4 {
            if counts[i] >= 2 {
                counts[i] -= 2;
                self.walk(counts, melds, taatsu + 1, has_pair);
                counts[i] += 2;
            }

            if i <= 26 {
                if i % 9 <= 7 && counts[i + 1] > 0 {
                    counts[i] -= 1;
                    counts[i + 1] -= 1;
                    self.walk(counts, melds, taatsu + 1, has_pair);
                    counts[i] += 1;
                    counts[i + 1] += 1;
                }
                if i % 9 <= 6 && counts[i + 2] > 0 {
                    counts[i] -= 1;
                    counts[i + 2] -= 1;
                    self.walk(counts, melds, taatsu + 1, has_pair);
                    counts[i] += 1;
                    counts[i + 2] += 1;
                }
            }
        }
    }
}
