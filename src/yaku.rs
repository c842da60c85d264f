//! Yaku and yakuman patterns, with per-decomposition detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::{ScoreContext, WinType};
use crate::hand::Decomposition;
use crate::parse::TileCounts;
use crate::tile::{Suit, Tile};

/// Regular scoring patterns this engine awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yaku {
    /// Declared riichi (closed hands only).
    Riichi,
    /// Self-draw on a closed hand.
    MenzenTsumo,
    /// All sequences, valueless pair, open wait.
    Pinfu,
    /// All simples: every tile is 2-8 of a suit.
    Tanyao,
    /// Seven pairs.
    Chiitoitsu,
    /// Every meld is a triplet or kan.
    Toitoi,
    /// Three kans.
    Sankantsu,
    /// Triplet or kan of a dragon, the seat wind or the round wind.
    Yakuhai(crate::tile::Honor),
    /// One suit plus honours.
    Honitsu,
    /// One suit, no honours.
    Chinitsu,
}

impl Yaku {
    /// Han awarded, given whether the hand is closed. Honitsu and chinitsu
    /// lose one han open; the closed-only yaku never reach an open hand
    /// because the pipeline does not emit them there.
    pub fn han(&self, closed: bool) -> u8 {
        match self {
            Yaku::Riichi => 1,
            Yaku::MenzenTsumo => 1,
            Yaku::Pinfu => 1,
            Yaku::Tanyao => 1,
            Yaku::Yakuhai(_) => 1,
            Yaku::Chiitoitsu => 2,
            Yaku::Toitoi => 2,
            Yaku::Sankantsu => 2,
            Yaku::Honitsu => {
                if closed {
                    3
                } else {
                    2
                }
            }
            Yaku::Chinitsu => {
                if closed {
                    6
                } else {
                    5
                }
            }
        }
    }
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Yaku::Riichi => write!(f, "Riichi"),
            Yaku::MenzenTsumo => write!(f, "Menzen Tsumo"),
            Yaku::Pinfu => write!(f, "Pinfu"),
            Yaku::Tanyao => write!(f, "Tanyao"),
            Yaku::Chiitoitsu => write!(f, "Chiitoitsu"),
            Yaku::Toitoi => write!(f, "Toitoi"),
            Yaku::Sankantsu => write!(f, "Sankantsu"),
            Yaku::Yakuhai(honor) => write!(f, "Yakuhai ({})", honor.letter()),
            Yaku::Honitsu => write!(f, "Honitsu"),
            Yaku::Chinitsu => write!(f, "Chinitsu"),
        }
    }
}

/// Limit hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yakuman {
    /// Thirteen orphans.
    KokushiMusou,
    /// Four kans.
    Suukantsu,
    /// Triplets or kans of all three dragons.
    Daisangen,
    /// Nine gates: 1112345678999 of one suit plus any tile of it.
    ChuurenPoutou,
    /// Four concealed triplets, completed by self-draw.
    Suuankou,
    /// Four concealed triplets won on the pair wait. Double yakuman.
    SuuankouTanki,
}

impl Yakuman {
    /// Limit multiplier: payouts scale on 8000 times this value.
    pub fn multiplier(&self) -> u8 {
        match self {
            Yakuman::SuuankouTanki => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Yakuman {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Yakuman::KokushiMusou => "Kokushi Musou",
            Yakuman::Suukantsu => "Suukantsu",
            Yakuman::Daisangen => "Daisangen",
            Yakuman::ChuurenPoutou => "Chuuren Poutou",
            Yakuman::Suuankou => "Suuankou",
            Yakuman::SuuankouTanki => "Suuankou Tanki",
        };
        write!(f, "{name}")
    }
}

// ============================================================================
// Detection
// ============================================================================

/// Yakuman visible on one decomposition. Kokushi and suukantsu are decided
/// before decomposition and are not re-checked here.
pub fn detect_yakuman(
    decomp: &Decomposition,
    full_counts: &TileCounts,
    win_type: WinType,
    win_tile: Tile,
    is_closed: bool,
) -> Vec<Yakuman> {
    let mut found = Vec::new();

    if check_daisangen(decomp) {
        found.push(Yakuman::Daisangen);
    }

    if is_closed && check_chuuren(full_counts) {
        found.push(Yakuman::ChuurenPoutou);
    }

    if is_closed && let Some(suuankou) = check_suuankou(decomp, win_type, win_tile) {
        found.push(suuankou);
    }

    found
}

fn check_daisangen(decomp: &Decomposition) -> bool {
    use crate::tile::Honor::{Green, Red, White};
    [White, Green, Red].iter().all(|&dragon| {
        decomp
            .melds
            .iter()
            .any(|m| m.is_set() && m.tile() == Tile::honor(dragon))
    })
}

/// Nine gates: the full 14-count is one suit containing 1112345678999 plus
/// exactly one extra tile of that suit.
fn check_chuuren(full_counts: &TileCounts) -> bool {
    if full_counts[27..].iter().any(|&c| c > 0) {
        return false;
    }

    for start in [0usize, 9, 18] {
        let suit = &full_counts[start..start + 9];
        if suit.iter().sum::<u8>() != 14 {
            continue;
        }
        const BASE: [u8; 9] = [3, 1, 1, 1, 1, 1, 1, 1, 3];
        let covers = suit.iter().zip(BASE).all(|(&c, b)| c >= b);
        let extra: u8 = suit.iter().zip(BASE).map(|(&c, b)| c - b.min(c)).sum();
        return covers && extra == 1;
    }
    false
}

fn check_suuankou(
    decomp: &Decomposition,
    win_type: WinType,
    win_tile: Tile,
) -> Option<Yakuman> {
    if !decomp.melds.iter().all(|m| m.is_set()) {
        return None;
    }
    match win_type {
        WinType::Tsumo => Some(Yakuman::Suuankou),
        // On ron, only the pair wait keeps all four triplets concealed.
        WinType::Ron if decomp.pair == win_tile => Some(Yakuman::SuuankouTanki),
        WinType::Ron => None,
    }
}

/// All simples: no terminal or honour anywhere in the hand.
pub fn is_tanyao(full_counts: &TileCounts) -> bool {
    full_counts
        .iter()
        .enumerate()
        .all(|(idx, &c)| c == 0 || Tile::from_index(idx).is_simple())
}

/// Honitsu or chinitsu, if the hand stays within one suit.
pub fn flush_yaku(full_counts: &TileCounts) -> Option<Yaku> {
    let mut suits_used = [false; 3];
    let mut has_honors = false;
    for (idx, &count) in full_counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        match Tile::from_index(idx) {
            Tile::Suited { suit, .. } => {
                suits_used[match suit {
                    Suit::Man => 0,
                    Suit::Pin => 1,
                    Suit::Sou => 2,
                }] = true;
            }
            Tile::Honor(_) => has_honors = true,
        }
    }

    match suits_used.iter().filter(|&&used| used).count() {
        1 if has_honors => Some(Yaku::Honitsu),
        1 => Some(Yaku::Chinitsu),
        _ => None,
    }
}

/// Every meld is a triplet or kan.
pub fn is_toitoi(decomp: &Decomposition) -> bool {
    decomp.melds.iter().all(|m| m.is_set())
}

/// One yakuhai entry per triplet or kan of a value tile. A wind that is both
/// the seat and the round wind still counts once.
pub fn yakuhai_entries(decomp: &Decomposition, ctx: &ScoreContext) -> Vec<Yaku> {
    decomp
        .melds
        .iter()
        .filter(|m| m.is_set() && ctx.is_value_tile(m.tile()))
        .map(|m| match m.tile() {
            Tile::Honor(honor) => Yaku::Yakuhai(honor),
            Tile::Suited { .. } => unreachable!("value tiles are honours"),
        })
        .collect()
}

/// Shape half of the pinfu test: all sequences and a pair without value.
/// The wait half (an open two-sided wait) is approximated by zero wait fu
/// and applied by the scoring pipeline.
pub fn pinfu_candidate(decomp: &Decomposition, ctx: &ScoreContext) -> bool {
    decomp.melds.iter().all(|m| m.is_sequence()) && !ctx.is_value_tile(decomp.pair)
}
