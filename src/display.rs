//! Terminal rendering of analysis and score reports.

use colored::Colorize;

use crate::remaining::RemainingTiles;
use crate::scoring::ScoreBreakdown;
use crate::shanten::ShantenResult;
use crate::tenpai::TenpaiWaits;
use crate::tile::Tile;

/// Space-separated tile tokens.
pub fn format_tiles(tiles: &[Tile]) -> String {
    tiles
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The shanten block of the analysis report.
pub fn format_shanten(shanten: &ShantenResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Shanten".bold()));
    out.push_str(&format!("  Standard   : {}\n", shanten.standard));
    out.push_str(&format!("  Chiitoitsu : {}\n", shanten.chiitoitsu));
    out.push_str(&format!("  Kokushi    : {}\n", shanten.kokushi));
    out.push_str(&format!(
        "  Minimum    : {}\n",
        shanten.minimum().to_string().cyan()
    ));
    out
}

/// The tenpai block of the analysis report.
pub fn format_waits(waits: &TenpaiWaits) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Tenpai / waits".bold()));
    let verdict = if waits.is_tenpai {
        "YES".green().bold().to_string()
    } else {
        "NO".red().to_string()
    };
    out.push_str(&format!("  Tenpai: {verdict}\n"));
    if !waits.standard.is_empty() {
        out.push_str(&format!(
            "  Standard waits   : {}\n",
            format_tiles(&waits.standard)
        ));
    }
    if !waits.chiitoitsu.is_empty() {
        out.push_str(&format!(
            "  Chiitoitsu waits : {}\n",
            format_tiles(&waits.chiitoitsu)
        ));
    }
    if !waits.kokushi.is_empty() {
        out.push_str(&format!(
            "  Kokushi waits    : {}\n",
            format_tiles(&waits.kokushi)
        ));
    }
    if waits.is_tenpai {
        out.push_str(&format!(
            "  All waits        : {}\n",
            format_tiles(&waits.all_waits()).cyan()
        ));
    }
    out
}

/// The remaining-tile tally.
pub fn format_remaining(counter: &RemainingTiles) -> String {
    format!(
        "{}\n  {}\n",
        "Remaining tiles (nonzero)".bold(),
        counter.pretty_remaining(true)
    )
}

/// A full score report: yaku, han/fu, limit and payouts.
pub fn format_score(breakdown: &ScoreBreakdown) -> String {
    let mut out = String::new();

    if breakdown.yakuman.is_empty() {
        out.push_str(&format!("{}\n", "Yaku".bold()));
        for entry in &breakdown.yaku {
            out.push_str(&format!("  - {} ({} han)\n", entry.yaku, entry.han));
        }
        if breakdown.dora_han > 0 {
            out.push_str(&format!("  - Dora ({} han)\n", breakdown.dora_han));
        }
        if breakdown.aka_dora_han > 0 {
            out.push_str(&format!(
                "  - Red fives ({} han)\n",
                breakdown.aka_dora_han
            ));
        }
        if let Some(fu) = breakdown.fu {
            out.push_str(&format!(
                "\n{}\n",
                format!("{} han / {} fu", breakdown.han, fu).bold()
            ));
        }
    } else {
        out.push_str(&format!("{}\n", "Yakuman".bold()));
        for yakuman in &breakdown.yakuman {
            out.push_str(&format!("  - {}\n", yakuman.to_string().yellow().bold()));
        }
    }

    if let Some(limit) = breakdown.points.limit {
        out.push_str(&format!("{}\n", limit.to_string().yellow().bold()));
    }

    out.push('\n');
    if let Some(ron) = breakdown.points.ron {
        out.push_str(&format!("Ron: {} from the discarder\n", ron.to_string().green().bold()));
    } else if breakdown.is_dealer {
        if let Some(each) = breakdown.points.tsumo_from_non_dealer {
            let total = breakdown.points.tsumo_total().unwrap_or(0);
            out.push_str(&format!(
                "Tsumo: {} all ({} total)\n",
                each.to_string().green().bold(),
                total
            ));
        }
    } else if let (Some(from_dealer), Some(from_non_dealer)) = (
        breakdown.points.tsumo_from_dealer,
        breakdown.points.tsumo_from_non_dealer,
    ) {
        let total = breakdown.points.tsumo_total().unwrap_or(0);
        out.push_str(&format!(
            "Tsumo: {}/{} ({} total)\n",
            from_dealer.to_string().green().bold(),
            from_non_dealer,
            total
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ScoreContext, WinType};
    use crate::parse::{parse_tiles, tiles_to_counts};
    use crate::scoring::score_hand;
    use crate::shanten::calculate_shanten;
    use crate::tenpai::waits_for_13;
    use crate::tile::Honor;

    #[test]
    fn analysis_blocks_mention_key_facts() {
        let tiles = parse_tiles("1m 2m 3m 4m 5m 6m 7m 8m 9m E E S S").unwrap();
        let counts = tiles_to_counts(&tiles);

        let shanten_text = format_shanten(&calculate_shanten(&counts));
        assert!(shanten_text.contains("Standard"));
        assert!(shanten_text.contains("Minimum"));

        let waits_text = format_waits(&waits_for_13(&counts).unwrap());
        assert!(waits_text.contains("YES"));
        assert!(waits_text.contains("E S"));
    }

    #[test]
    fn score_report_mentions_yaku_and_points() {
        let ctx = ScoreContext::new(WinType::Ron, Honor::East, Honor::East);
        let breakdown = score_hand("2m 2m 3m 3m 4m 4m 5m 5m 6m 6m 7m 7m 8m", "8m", &ctx).unwrap();

        let text = format_score(&breakdown);
        assert!(text.contains("Pinfu"));
        assert!(text.contains("Tanyao"));
        assert!(text.contains("fu"));
        assert!(text.contains("Ron:"));
    }

    #[test]
    fn yakuman_report_names_the_limit() {
        let ctx = ScoreContext::new(WinType::Tsumo, Honor::South, Honor::East);
        let breakdown =
            score_hand("1m 1m 1m 9m 9m 9m 1p 1p 1p 9p 9p 9p 5s", "5s", &ctx).unwrap();

        let text = format_score(&breakdown);
        assert!(text.contains("Suuankou"));
        assert!(text.contains("Yakuman"));
        assert!(text.contains("Tsumo:"));
    }
}
