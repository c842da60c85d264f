//! Fu computation and the hand-scoring pipeline.
//!
//! Scoring takes the 13-plus-kongs concealed tiles, the winning tile and a
//! [`ScoreContext`], enumerates every interpretation of the hand (seven
//! pairs where it applies, plus every standard decomposition), scores each
//! one, and keeps the interpretation that pays the most.

use serde::Serialize;

use crate::agari::{is_agari_chiitoitsu, is_agari_kokushi};
use crate::context::{ScoreContext, WinType};
use crate::error::EngineError;
use crate::hand::{Decomposition, Meld, classify_triple, decompose_with_fixed};
use crate::parse::{TileCounts, check_tile_counts, parse_tiles_tracking_red, tiles_to_counts};
use crate::points::{PointsResult, estimate_points, yakuman_points};
use crate::tile::Tile;
use crate::yaku::{
    Yaku, Yakuman, detect_yakuman, flush_yaku, is_tanyao, is_toitoi, pinfu_candidate,
    yakuhai_entries,
};

/// One awarded yaku with the han it was worth in this hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YakuEntry {
    pub yaku: Yaku,
    pub han: u8,
}

/// The scored result of a winning hand.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub win_type: WinType,
    pub is_dealer: bool,
    pub yaku: Vec<YakuEntry>,
    pub yakuman: Vec<Yakuman>,
    /// Total han including dora; zero for yakuman hands.
    pub han: u8,
    /// Fu, or `None` for yakuman hands where fu is meaningless.
    pub fu: Option<u8>,
    pub dora_han: u8,
    pub aka_dora_han: u8,
    pub points: PointsResult,
}

// ============================================================================
// Fu
// ============================================================================

/// Pair fu: two for a dragon pair, two per matching wind. A wind that is
/// both the seat and the round wind stacks to four.
fn pair_fu(pair: Tile, ctx: &ScoreContext) -> u8 {
    match pair {
        Tile::Honor(honor) => {
            let mut fu = 0;
            if honor.is_dragon() {
                fu += 2;
            }
            if honor == ctx.seat_wind {
                fu += 2;
            }
            if honor == ctx.round_wind {
                fu += 2;
            }
            fu
        }
        Tile::Suited { .. } => 0,
    }
}

/// Meld fu. Sequences are worth nothing; triplets start at two and double
/// for closed and for terminal-or-honour tiles; kans are worth four times
/// the triplet value.
fn meld_fu(melds: &[Meld]) -> u8 {
    let mut fu = 0;
    for meld in melds {
        if !meld.is_set() {
            continue;
        }
        let edge = meld.tile().is_terminal_or_honor();
        let base = if meld.is_kong() {
            if edge { 16 } else { 8 }
        } else if edge {
            4
        } else {
            2
        };
        fu += if meld.open { base } else { base * 2 };
    }
    fu
}

/// Wait fu: two for a pair wait, a closed (middle) wait, or an edge wait
/// (1-2 waiting on 3, 8-9 waiting on 7); zero otherwise. The first group
/// containing the winning tile decides.
fn wait_fu(decomp: &Decomposition, win_tile: Tile) -> u8 {
    if decomp.pair == win_tile {
        return 2;
    }
    for meld in &decomp.melds {
        if !meld.contains(win_tile) {
            continue;
        }
        if meld.is_set() {
            return 0;
        }
        let [low, mid, high] = meld.tiles;
        let low_rank = low.rank().unwrap_or(0);
        if (win_tile == high && low_rank == 1) || (win_tile == low && low_rank == 7) {
            return 2;
        }
        if win_tile == mid {
            return 2;
        }
        return 0;
    }
    0
}

/// Fu for one standard decomposition.
fn fu_standard(
    decomp: &Decomposition,
    ctx: &ScoreContext,
    win_tile: Tile,
    is_pinfu: bool,
    is_closed: bool,
) -> u8 {
    // Pinfu tsumo is flat twenty with no rounding.
    if is_pinfu && ctx.win_type == WinType::Tsumo {
        return 20;
    }

    let mut fu: u8 = 20;
    match ctx.win_type {
        WinType::Ron if is_closed => fu += 10,
        WinType::Ron => {}
        WinType::Tsumo => fu += 2,
    }
    fu += pair_fu(decomp.pair, ctx);
    fu += meld_fu(&decomp.melds);
    fu += wait_fu(decomp, win_tile);

    // Pinfu carries no shape fu at all.
    if is_pinfu {
        fu = if ctx.win_type == WinType::Ron && is_closed {
            30
        } else {
            20
        };
    }

    (fu.div_ceil(10) * 10).max(30)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Score a claimed winning hand.
///
/// `hand_text` holds the concealed tiles without the winning tile, open furo
/// tiles at the tail; its length must be 13 plus one per declared kan.
/// `win_tile_text` is exactly one tile. Red fives in either list count as
/// aka dora.
pub fn score_hand(
    hand_text: &str,
    win_tile_text: &str,
    ctx: &ScoreContext,
) -> Result<ScoreBreakdown, EngineError> {
    let hand = parse_tiles_tracking_red(hand_text)?;
    let win = parse_tiles_tracking_red(win_tile_text)?;
    if win.tiles.len() != 1 {
        return Err(EngineError::HandLengthMismatch(format!(
            "win_tile must be exactly one tile, got {}",
            win.tiles.len()
        )));
    }
    let win_tile = win.tiles[0];

    if ctx.kan_tiles.len() != ctx.kan_sets as usize {
        return Err(EngineError::InvalidMeld(
            "kan_sets must match the number of kan_tiles".into(),
        ));
    }
    if ctx.kan_sets > ctx.furo_sets {
        return Err(EngineError::InvalidMeld(
            "kan_sets cannot exceed furo_sets".into(),
        ));
    }
    if ctx.furo_sets as usize + ctx.ankan_tiles.len() > 4 {
        return Err(EngineError::InvalidMeld(
            "more than four melds declared".into(),
        ));
    }

    let total_kans = ctx.total_kans();
    let expected_len = 13 + total_kans;
    if hand.tiles.len() != expected_len {
        return Err(EngineError::HandLengthMismatch(format!(
            "hand must contain exactly {expected_len} tiles (13 plus one per kan), got {}",
            hand.tiles.len()
        )));
    }

    let mut full_tiles = hand.tiles.clone();
    full_tiles.push(win_tile);
    let full_counts = tiles_to_counts(&full_tiles);
    check_tile_counts(&full_counts)?;

    let fixed = extract_fixed_melds(&hand.tiles, ctx)?;
    let is_closed = !fixed.iter().any(|m| m.open);
    if ctx.riichi && !is_closed {
        return Err(EngineError::RiichiRequiresClosed);
    }

    let aka_dora_han = hand.red_fives + win.red_fives;
    let dora_han = count_dora(&full_counts, &ctx.dora_tiles);

    // Remove the fixed melds to get the free tiles for decomposition.
    let mut free_counts = full_counts;
    for meld in &fixed {
        subtract_meld(&mut free_counts, meld)?;
    }

    // Four kongs leave exactly the pair and outrank everything else.
    if total_kans == 4 {
        let leftover_is_pair = free_counts.iter().all(|&c| c == 0 || c == 2)
            && free_counts.iter().filter(|&&c| c > 0).count() == 1;
        if !leftover_is_pair {
            return Err(EngineError::NoWinningDecomposition);
        }
        return Ok(yakuman_breakdown(vec![Yakuman::Suukantsu], ctx));
    }

    if fixed.is_empty() && is_agari_kokushi(&full_counts) {
        return Ok(yakuman_breakdown(vec![Yakuman::KokushiMusou], ctx));
    }

    let mut candidates: Vec<ScoreBreakdown> = Vec::new();
    let mut saw_structure = false;

    // Seven pairs is one interpretation among the others; a hand that also
    // splits into melds may still score higher the standard way.
    if fixed.is_empty() && is_agari_chiitoitsu(&full_counts) {
        saw_structure = true;
        let mut yaku = vec![Yaku::Chiitoitsu];
        if ctx.riichi {
            yaku.push(Yaku::Riichi);
        }
        if ctx.win_type == WinType::Tsumo {
            yaku.push(Yaku::MenzenTsumo);
        }
        candidates.push(regular_breakdown(
            yaku, true, 25, dora_han, aka_dora_han, ctx,
        ));
    }

    for decomp in decompose_with_fixed(&free_counts, &fixed) {
        saw_structure = true;

        let yakuman = detect_yakuman(&decomp, &full_counts, ctx.win_type, win_tile, is_closed);
        if !yakuman.is_empty() {
            candidates.push(yakuman_breakdown(yakuman, ctx));
            continue;
        }

        let mut yaku = Vec::new();
        if ctx.riichi {
            yaku.push(Yaku::Riichi);
        }
        if ctx.win_type == WinType::Tsumo && is_closed {
            yaku.push(Yaku::MenzenTsumo);
        }
        if total_kans == 3 {
            yaku.push(Yaku::Sankantsu);
        }
        if is_tanyao(&full_counts) {
            yaku.push(Yaku::Tanyao);
        }
        if let Some(flush) = flush_yaku(&full_counts) {
            yaku.push(flush);
        }
        if is_toitoi(&decomp) {
            yaku.push(Yaku::Toitoi);
        }
        yaku.extend(yakuhai_entries(&decomp, ctx));

        let is_pinfu =
            is_closed && pinfu_candidate(&decomp, ctx) && wait_fu(&decomp, win_tile) == 0;
        if is_pinfu {
            yaku.push(Yaku::Pinfu);
        }

        // This split scores nothing; another interpretation may still win.
        if yaku.is_empty() {
            continue;
        }

        let fu = fu_standard(&decomp, ctx, win_tile, is_pinfu, is_closed);
        candidates.push(regular_breakdown(
            yaku, is_closed, fu, dora_han, aka_dora_han, ctx,
        ));
    }

    let mut candidates = candidates.into_iter();
    let Some(mut best) = candidates.next() else {
        return Err(if saw_structure {
            EngineError::NoYaku
        } else {
            EngineError::NoWinningDecomposition
        });
    };
    for candidate in candidates {
        if candidate.points.winning_total() > best.points.winning_total() {
            best = candidate;
        }
    }
    Ok(best)
}

/// Pull the declared melds off the tail of the hand: open kans first, then
/// open pons and chis, then the concealed kans listed in the context.
fn extract_fixed_melds(
    hand_tiles: &[Tile],
    ctx: &ScoreContext,
) -> Result<Vec<Meld>, EngineError> {
    let mut remaining = hand_tiles.to_vec();
    let mut fixed = Vec::new();

    let mut kan_pool = ctx.kan_tiles.clone();
    for _ in 0..ctx.kan_sets {
        if remaining.len() < 4 {
            return Err(EngineError::InvalidMeld(
                "not enough tiles at the end of the hand for the declared open kans".into(),
            ));
        }
        let four = remaining.split_off(remaining.len() - 4);
        if !four.iter().all(|&t| t == four[0]) {
            return Err(EngineError::InvalidMeld(
                "an open kan must be four identical tiles".into(),
            ));
        }
        let tile = four[0];
        match kan_pool.iter().position(|&t| t == tile) {
            Some(pos) => {
                kan_pool.remove(pos);
            }
            None => {
                return Err(EngineError::MeldAccountingMismatch(format!(
                    "open kan of {tile} is not listed in kan_tiles"
                )));
            }
        }
        fixed.push(Meld::kong(tile, true));
    }

    for _ in 0..(ctx.furo_sets - ctx.kan_sets) {
        if remaining.len() < 3 {
            return Err(EngineError::InvalidMeld(
                "not enough tiles at the end of the hand for the declared open melds".into(),
            ));
        }
        let three = remaining.split_off(remaining.len() - 3);
        let mut triple = [three[0], three[1], three[2]];
        let meld = classify_triple(&mut triple, true).ok_or_else(|| {
            EngineError::InvalidMeld(format!(
                "open meld {} {} {} is neither a triplet nor a single-suit sequence",
                triple[0], triple[1], triple[2]
            ))
        })?;
        fixed.push(meld);
    }

    for &tile in &ctx.ankan_tiles {
        fixed.push(Meld::kong(tile, false));
    }

    Ok(fixed)
}

fn subtract_meld(counts: &mut TileCounts, meld: &Meld) -> Result<(), EngineError> {
    let mismatch = || {
        EngineError::MeldAccountingMismatch(format!(
            "tiles of the declared meld around {} are not present in the hand",
            meld.tile()
        ))
    };
    if meld.is_set() {
        let idx = meld.tile().index();
        let need = meld.tile_count();
        if counts[idx] < need {
            return Err(mismatch());
        }
        counts[idx] -= need;
    } else {
        for tile in meld.tiles {
            let idx = tile.index();
            if counts[idx] == 0 {
                return Err(mismatch());
            }
            counts[idx] -= 1;
        }
    }
    Ok(())
}

/// Han for each distinct dora tile times its occurrences. Listing the same
/// dora tile twice does not double it.
fn count_dora(full_counts: &TileCounts, dora_tiles: &[Tile]) -> u8 {
    let mut counted = [false; crate::tile::TILE_KINDS];
    let mut total = 0;
    for tile in dora_tiles {
        let idx = tile.index();
        if !counted[idx] {
            counted[idx] = true;
            total += full_counts[idx];
        }
    }
    total
}

fn yakuman_breakdown(yakuman: Vec<Yakuman>, ctx: &ScoreContext) -> ScoreBreakdown {
    let multiplier = yakuman.iter().map(|y| y.multiplier()).sum();
    ScoreBreakdown {
        win_type: ctx.win_type,
        is_dealer: ctx.is_dealer,
        yaku: Vec::new(),
        yakuman,
        han: 0,
        fu: None,
        dora_han: 0,
        aka_dora_han: 0,
        points: yakuman_points(multiplier, ctx.is_dealer, ctx.win_type),
    }
}

fn regular_breakdown(
    yaku: Vec<Yaku>,
    is_closed: bool,
    fu: u8,
    dora_han: u8,
    aka_dora_han: u8,
    ctx: &ScoreContext,
) -> ScoreBreakdown {
    let entries: Vec<YakuEntry> = yaku
        .into_iter()
        .map(|yaku| YakuEntry {
            yaku,
            han: yaku.han(is_closed),
        })
        .collect();
    let han = entries.iter().map(|e| e.han).sum::<u8>() + dora_han + aka_dora_han;
    ScoreBreakdown {
        win_type: ctx.win_type,
        is_dealer: ctx.is_dealer,
        yaku: entries,
        yakuman: Vec::new(),
        han,
        fu: Some(fu),
        dora_han,
        aka_dora_han,
        points: estimate_points(han, fu, ctx.is_dealer, ctx.win_type),
    }
}
