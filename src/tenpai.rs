//! Tenpai detection and wait enumeration for 13-tile hands.
//!
//! The enumeration is a brute probe: for every tile kind still available,
//! add one copy and test the resulting 14-count under each archetype. At
//! most 34 agari checks, and by construction the reference oracle for the
//! wait contract.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::agari::{is_agari_chiitoitsu, is_agari_kokushi, is_agari_standard};
use crate::error::EngineError;
use crate::parse::{TileCounts, total_tiles};
use crate::tile::Tile;

/// The tiles that complete a 13-tile hand, per archetype.
///
/// Each list is sorted by (suit ordinal, rank) with honours last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenpaiWaits {
    pub is_tenpai: bool,
    pub standard: Vec<Tile>,
    pub chiitoitsu: Vec<Tile>,
    pub kokushi: Vec<Tile>,
}

impl TenpaiWaits {
    /// Union of all archetype waits, sorted.
    pub fn all_waits(&self) -> Vec<Tile> {
        let mut set = BTreeSet::new();
        set.extend(self.standard.iter().copied());
        set.extend(self.chiitoitsu.iter().copied());
        set.extend(self.kokushi.iter().copied());
        set.into_iter().collect()
    }
}

/// Enumerate the waits of a 13-tile hand.
pub fn waits_for_13(counts: &TileCounts) -> Result<TenpaiWaits, EngineError> {
    let total = total_tiles(counts);
    if total != 13 {
        return Err(EngineError::HandLengthMismatch(format!(
            "wait enumeration expects exactly 13 tiles, got {total}"
        )));
    }

    let mut standard = Vec::new();
    let mut chiitoitsu = Vec::new();
    let mut kokushi = Vec::new();

    let mut probe = *counts;
    for idx in 0..probe.len() {
        if probe[idx] >= 4 {
            continue;
        }
        probe[idx] += 1;
        let tile = Tile::from_index(idx);
        if is_agari_standard(&probe) {
            standard.push(tile);
        }
        if is_agari_chiitoitsu(&probe) {
            chiitoitsu.push(tile);
        }
        if is_agari_kokushi(&probe) {
            kokushi.push(tile);
        }
        probe[idx] -= 1;
    }

    Ok(TenpaiWaits {
        is_tenpai: !(standard.is_empty() && chiitoitsu.is_empty() && kokushi.is_empty()),
        standard,
        chiitoitsu,
        kokushi,
    })
}
