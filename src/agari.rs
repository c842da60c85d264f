//! Winning-shape (agari) tests for 14-tile count vectors.

use std::collections::HashMap;

use crate::parse::{TileCounts, total_tiles};
use crate::tile::TERMINAL_HONOR_INDICES;

/// Seven pairs: fourteen tiles forming seven distinct pairs.
///
/// Every occupied slot must hold exactly two tiles; a quad masked as two
/// pairs does not count.
pub fn is_agari_chiitoitsu(counts: &TileCounts) -> bool {
    total_tiles(counts) == 14 && counts.iter().all(|&c| c == 0 || c == 2)
}

/// Thirteen orphans: every terminal and honour present, one of them paired.
pub fn is_agari_kokushi(counts: &TileCounts) -> bool {
    if total_tiles(counts) != 14 {
        return false;
    }
    let occupied = TERMINAL_HONOR_INDICES
        .iter()
        .filter(|&&idx| counts[idx] > 0)
        .count();
    occupied == 13 && TERMINAL_HONOR_INDICES.iter().any(|&idx| counts[idx] >= 2)
}

/// Standard hand: some pair removal leaves every honour count divisible by
/// three and every suit decomposable into triplets and sequences.
pub fn is_agari_standard(counts: &TileCounts) -> bool {
    if total_tiles(counts) != 14 {
        return false;
    }

    let mut memo = HashMap::new();
    for pair_idx in 0..counts.len() {
        if counts[pair_idx] < 2 {
            continue;
        }
        let mut work = *counts;
        work[pair_idx] -= 2;
        if honors_in_triplets(&work) && suits_meldable(&work, &mut memo) {
            return true;
        }
    }
    false
}

/// Any archetype.
pub fn is_agari(counts: &TileCounts) -> bool {
    is_agari_standard(counts) || is_agari_chiitoitsu(counts) || is_agari_kokushi(counts)
}

fn honors_in_triplets(counts: &TileCounts) -> bool {
    counts[27..].iter().all(|&c| c % 3 == 0)
}

fn suits_meldable(counts: &TileCounts, memo: &mut HashMap<[u8; 9], bool>) -> bool {
    for start in [0, 9, 18] {
        let suit: [u8; 9] = std::array::from_fn(|k| counts[start + k]);
        if !suit_meldable(suit, memo) {
            return false;
        }
    }
    true
}

/// Can this 9-slot suit vector be fully split into triplets and sequences?
/// Memoised depth-first scan from the lowest occupied rank.
fn suit_meldable(counts: [u8; 9], memo: &mut HashMap<[u8; 9], bool>) -> bool {
    let Some(i) = counts.iter().position(|&c| c > 0) else {
        return true;
    };
    if let Some(&known) = memo.get(&counts) {
        return known;
    }

    let mut ok = false;
    let mut work = counts;

    if work[i] >= 3 {
        work[i] -= 3;
        ok = suit_meldable(work, memo);
        work[i] += 3;
    }

    if !ok && i <= 6 && work[i + 1] > 0 && work[i + 2] > 0 {
        work[i] -= 1;
        work[i + 1] -= 1;
        work[i + 2] -= 1;
        ok = suit_meldable(work, memo);
    }

    memo.insert(counts, ok);
    ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_tiles, tiles_to_counts};

    fn counts(hand: &str) -> TileCounts {
        tiles_to_counts(&parse_tiles(hand).unwrap())
    }

    #[test]
    fn standard_hand_with_honour_triplet() {
        let c = counts("1m 2m 3m 4p 5p 6p 7s 8s 9s E E E S S");
        assert!(is_agari_standard(&c));
        assert!(is_agari(&c));
    }

    #[test]
    fn standard_all_triplets() {
        let c = counts("1m 1m 1m 2p 2p 2p 3s 3s 3s P P P C C");
        assert!(is_agari_standard(&c));
    }

    #[test]
    fn standard_rejects_near_miss() {
        let c = counts("1m 2m 3m 4m 4p 5p 6p 7p 8p 9s 1s 2s 3s E");
        assert!(!is_agari_standard(&c));
        assert!(!is_agari(&c));
    }

    #[test]
    fn standard_rejects_honour_sequence() {
        let c = counts("E S W 1m 2m 3m 4p 5p 6p 7s 8s 9s C C");
        assert!(!is_agari_standard(&c));
    }

    #[test]
    fn chiitoitsu_seven_distinct_pairs() {
        let c = counts("1m 1m 2m 2m 3p 3p 4p 4p 5s 5s 6s 6s C C");
        assert!(is_agari_chiitoitsu(&c));
    }

    #[test]
    fn chiitoitsu_rejects_quad() {
        let c = counts("1m 1m 1m 1m 2m 2m 3p 3p 4p 4p 5s 5s 6s 6s");
        assert!(!is_agari_chiitoitsu(&c));
    }

    #[test]
    fn kokushi_accepts_any_terminal_pair() {
        let c = counts("1m 9m 1p 9p 1s 9s E S W N P F C C");
        assert!(is_agari_kokushi(&c));

        let c = counts("1m 1m 9m 1p 9p 1s 9s E S W N P F C");
        assert!(is_agari_kokushi(&c));
    }

    #[test]
    fn kokushi_rejects_missing_orphan() {
        let c = counts("1m 1m 9m 1p 9p 1s 9s E S W N P F F");
        assert!(!is_agari_kokushi(&c));
    }

    #[test]
    fn chiitoitsu_agari_implies_tenpai_after_any_discard() {
        let full = counts("1m 1m 2m 2m 3p 3p 4p 4p 5s 5s 6s 6s C C");
        assert!(is_agari_chiitoitsu(&full));

        let mut work = full;
        for idx in 0..work.len() {
            if work[idx] == 0 {
                continue;
            }
            work[idx] -= 1;
            assert_eq!(crate::shanten::shanten_chiitoitsu(&work), 0);
            work[idx] += 1;
        }
    }
}
