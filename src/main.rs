//! machi - Riichi Mahjong hand analyzer.
//!
//! Two modes: `analyze` reports shanten, tenpai waits and remaining tiles
//! for a hand in progress; `score` evaluates a claimed winning hand.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use machi::{
    context::{ScoreContext, WinType},
    display::{format_remaining, format_score, format_shanten, format_tiles, format_waits},
    parse::{check_tile_counts, parse_tiles, tiles_to_counts},
    remaining::RemainingTiles,
    scoring::{ScoreBreakdown, score_hand},
    shanten::calculate_shanten,
    tenpai::waits_for_13,
    tile::Honor,
};

const AFTER_HELP: &str = r#"TILE FORMAT:
    Suited tiles: rank then suit letter: 1m..9m, 1p..9p, 1s..9s
    Honours: E S W N (winds), P F C (white, green, red dragon)
    Red fives: 0m 0p 0s (count as the plain five plus one aka dora)
    Tile lists are whitespace- or comma-separated: "1m 2m 3m E E"

EXAMPLES:
    machi analyze --hand "1m 2m 3m 4m 5m 6m 7m 8m 9m E E S S"
    machi analyze -c table.json --river "1s 2s 5p"
    machi score --hand "2m 2m 3m 3m 4m 4m 5m 5m 6m 6m 7m 7m 8m" -w 8m
    machi score --hand "1m 9m 1p 9p 1s 9s E S W N P F C" -w C --tsumo
    machi score -c win.toml --json"#;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser)]
#[command(name = "machi")]
#[command(version)]
#[command(styles = styles())]
#[command(about = "Riichi Mahjong shanten, tenpai and scoring analyzer")]
#[command(after_help = AFTER_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shanten, tenpai waits and remaining tiles for a hand in progress
    Analyze(AnalyzeArgs),
    /// Score a claimed winning hand
    Score(ScoreArgs),
}

#[derive(clap::Args)]
struct AnalyzeArgs {
    /// Hand tiles (13 or 14), e.g. "1m 2m 3m E E ..."
    #[arg(long)]
    hand: Option<String>,

    /// River/discard tiles, counted against the remaining-tile tally
    #[arg(long)]
    river: Option<String>,

    /// Config file (.json or .toml) with 'hand' and optional 'river'
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct ScoreArgs {
    /// Config file (.json or .toml) with the scoring fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Concealed tiles excluding the win tile, open furo tiles at the tail
    #[arg(long)]
    hand: Option<String>,

    /// The winning tile
    #[arg(short = 'w', long = "win")]
    win_tile: Option<String>,

    /// Win by self-draw (default: ron)
    #[arg(short, long)]
    tsumo: bool,

    /// The winner is the dealer
    #[arg(long)]
    dealer: bool,

    /// Seat wind: E/S/W/N
    #[arg(long, default_value = "E")]
    seat: String,

    /// Round wind: E/S/W/N
    #[arg(long, default_value = "E")]
    round: String,

    /// Riichi declared (closed hands only)
    #[arg(short, long)]
    riichi: bool,

    /// Dora tiles (the tiles themselves, not indicators)
    #[arg(short, long)]
    dora: Option<String>,

    /// Number of open melds, kans included
    #[arg(long, default_value_t = 0)]
    furo_sets: u8,

    /// How many of the open melds are kans
    #[arg(long, default_value_t = 0)]
    kan_sets: u8,

    /// Concealed kan tiles, one token per kan
    #[arg(long)]
    ankan: Option<String>,

    /// Open kan tiles, one token per kan
    #[arg(long)]
    kan_tiles: Option<String>,

    /// Output JSON instead of the text report
    #[arg(long)]
    json: bool,
}

// ============================================================================
// Config files
// ============================================================================

/// A tile list in a config file: either one string or a list of tokens.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TilesField {
    Text(String),
    List(Vec<String>),
}

impl TilesField {
    fn joined(&self) -> String {
        match self {
            TilesField::Text(text) => text.clone(),
            TilesField::List(tokens) => tokens.join(" "),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeConfig {
    hand: Option<TilesField>,
    river: Option<TilesField>,
}

#[derive(Debug, Deserialize)]
struct ScoreConfig {
    hand_tiles: TilesField,
    win_tile: String,
    win_type: WinType,
    #[serde(default)]
    is_dealer: bool,
    #[serde(default = "default_wind")]
    seat_wind: String,
    #[serde(default = "default_wind")]
    round_wind: String,
    #[serde(default)]
    dora_tiles: Option<TilesField>,
    #[serde(default)]
    riichi: bool,
    #[serde(default)]
    furo_sets: u8,
    #[serde(default)]
    kan_sets: u8,
    #[serde(default)]
    ankan_tiles: Vec<String>,
    #[serde(default)]
    kan_tiles: Vec<String>,
}

fn default_wind() -> String {
    "E".to_string()
}

fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw)
            .with_context(|| format!("invalid JSON in {}", path.display())),
        Some("toml") => {
            toml::from_str(&raw).with_context(|| format!("invalid TOML in {}", path.display()))
        }
        other => bail!("unsupported config type {other:?}, use .json or .toml"),
    }
}

fn parse_wind(token: &str) -> Result<Honor> {
    match token.trim() {
        "E" | "e" => Ok(Honor::East),
        "S" | "s" => Ok(Honor::South),
        "W" | "w" => Ok(Honor::West),
        "N" | "n" => Ok(Honor::North),
        other => bail!("invalid wind {other:?}, use one of E/S/W/N"),
    }
}

fn context_from_config(cfg: &ScoreConfig) -> Result<ScoreContext> {
    let mut ctx = ScoreContext::new(
        cfg.win_type,
        parse_wind(&cfg.seat_wind)?,
        parse_wind(&cfg.round_wind)?,
    );
    ctx.is_dealer = cfg.is_dealer;
    ctx.riichi = cfg.riichi;
    ctx.furo_sets = cfg.furo_sets;
    ctx.kan_sets = cfg.kan_sets;
    if let Some(dora) = &cfg.dora_tiles {
        ctx.dora_tiles = parse_tiles(&dora.joined())?;
    }
    ctx.ankan_tiles = parse_tiles(&cfg.ankan_tiles.join(" "))?;
    ctx.kan_tiles = parse_tiles(&cfg.kan_tiles.join(" "))?;
    Ok(ctx)
}

// ============================================================================
// JSON output
// ============================================================================

#[derive(Serialize)]
struct JsonShanten {
    standard: u8,
    chiitoitsu: u8,
    kokushi: u8,
    minimum: u8,
}

#[derive(Serialize)]
struct JsonWaits {
    is_tenpai: bool,
    standard: Vec<String>,
    chiitoitsu: Vec<String>,
    kokushi: Vec<String>,
    all: Vec<String>,
}

#[derive(Serialize)]
struct JsonAnalyze {
    hand: Vec<String>,
    river: Vec<String>,
    shanten: JsonShanten,
    #[serde(skip_serializing_if = "Option::is_none")]
    waits: Option<JsonWaits>,
    remaining: String,
}

#[derive(Serialize)]
struct JsonYakuEntry {
    name: String,
    han: u8,
}

#[derive(Serialize)]
struct JsonScore {
    win_type: &'static str,
    is_dealer: bool,
    yaku: Vec<JsonYakuEntry>,
    yakuman: Vec<String>,
    han: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    fu: Option<u8>,
    dora_han: u8,
    aka_dora_han: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ron: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tsumo_from_dealer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tsumo_from_non_dealer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tsumo_total: Option<u32>,
}

impl JsonScore {
    fn from_breakdown(b: &ScoreBreakdown) -> Self {
        JsonScore {
            win_type: match b.win_type {
                WinType::Tsumo => "tsumo",
                WinType::Ron => "ron",
            },
            is_dealer: b.is_dealer,
            yaku: b
                .yaku
                .iter()
                .map(|e| JsonYakuEntry {
                    name: e.yaku.to_string(),
                    han: e.han,
                })
                .collect(),
            yakuman: b.yakuman.iter().map(|y| y.to_string()).collect(),
            han: b.han,
            fu: b.fu,
            dora_han: b.dora_han,
            aka_dora_han: b.aka_dora_han,
            limit: b.points.limit.map(|l| l.to_string()),
            ron: b.points.ron,
            tsumo_from_dealer: b.points.tsumo_from_dealer,
            tsumo_from_non_dealer: b.points.tsumo_from_non_dealer,
            tsumo_total: b.points.tsumo_total(),
        }
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let config: AnalyzeConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalyzeConfig::default(),
    };

    let hand_text = args
        .hand
        .or_else(|| config.hand.as_ref().map(|f| f.joined()))
        .ok_or_else(|| anyhow!("missing hand tiles: pass --hand or set 'hand' in the config"))?;
    let river_text = args
        .river
        .or_else(|| config.river.as_ref().map(|f| f.joined()))
        .unwrap_or_default();

    let hand = parse_tiles(&hand_text)?;
    let river = parse_tiles(&river_text)?;

    let counts = tiles_to_counts(&hand);
    check_tile_counts(&counts)?;
    let shanten = calculate_shanten(&counts);
    let waits = if hand.len() == 13 {
        Some(waits_for_13(&counts)?)
    } else {
        None
    };

    let mut counter = RemainingTiles::new();
    counter.add_used(&hand);
    counter.add_used(&river);

    if args.json {
        let report = JsonAnalyze {
            hand: hand.iter().map(|t| t.to_string()).collect(),
            river: river.iter().map(|t| t.to_string()).collect(),
            shanten: JsonShanten {
                standard: shanten.standard,
                chiitoitsu: shanten.chiitoitsu,
                kokushi: shanten.kokushi,
                minimum: shanten.minimum(),
            },
            waits: waits.as_ref().map(|w| JsonWaits {
                is_tenpai: w.is_tenpai,
                standard: w.standard.iter().map(|t| t.to_string()).collect(),
                chiitoitsu: w.chiitoitsu.iter().map(|t| t.to_string()).collect(),
                kokushi: w.kokushi.iter().map(|t| t.to_string()).collect(),
                all: w.all_waits().iter().map(|t| t.to_string()).collect(),
            }),
            remaining: counter.pretty_remaining(true),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Hand".bold());
    println!("  Hand  ({}): {}", hand.len(), format_tiles(&hand));
    println!("  River ({}): {}", river.len(), format_tiles(&river));
    println!();
    print!("{}", format_shanten(&shanten));
    println!();
    if let Some(waits) = &waits {
        print!("{}", format_waits(waits));
        println!();
    }
    print!("{}", format_remaining(&counter));
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let (hand_text, win_text, ctx) = match &args.config {
        Some(path) => {
            let cfg: ScoreConfig = load_config(path)?;
            let ctx = context_from_config(&cfg)?;
            (cfg.hand_tiles.joined(), cfg.win_tile, ctx)
        }
        None => {
            let hand = args
                .hand
                .ok_or_else(|| anyhow!("missing hand tiles: pass --hand or use --config"))?;
            let win = args
                .win_tile
                .ok_or_else(|| anyhow!("missing winning tile: pass --win or use --config"))?;

            let win_type = if args.tsumo {
                WinType::Tsumo
            } else {
                WinType::Ron
            };
            let mut ctx =
                ScoreContext::new(win_type, parse_wind(&args.seat)?, parse_wind(&args.round)?);
            ctx.is_dealer = args.dealer;
            ctx.riichi = args.riichi;
            ctx.furo_sets = args.furo_sets;
            ctx.kan_sets = args.kan_sets;
            if let Some(dora) = &args.dora {
                ctx.dora_tiles = parse_tiles(dora)?;
            }
            if let Some(ankan) = &args.ankan {
                ctx.ankan_tiles = parse_tiles(ankan)?;
            }
            if let Some(kan) = &args.kan_tiles {
                ctx.kan_tiles = parse_tiles(kan)?;
            }
            (hand, win, ctx)
        }
    };

    let breakdown = score_hand(&hand_text, &win_text, &ctx)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonScore::from_breakdown(&breakdown))?
        );
        return Ok(());
    }

    println!("{}", "Hand".bold());
    println!("  Tiles: {hand_text}");
    println!("  Win  : {win_text}");
    println!();
    print!("{}", format_score(&breakdown));
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Analyze(args) => run_analyze(args),
        Command::Score(args) => run_score(args),
    };
    if let Err(err) = result {
        eprintln!("{} {err:#}", "error:".red().bold());
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_config_from_json() {
        let raw = r#"{
            "hand_tiles": "2m 2m 3m 3m 4m 4m 5m 5m 6m 6m 7m 7m 8m",
            "win_tile": "8m",
            "win_type": "ron",
            "seat_wind": "S",
            "dora_tiles": ["4m"]
        }"#;
        let cfg: ScoreConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.win_type, WinType::Ron);
        assert!(!cfg.is_dealer);
        assert_eq!(cfg.round_wind, "E");

        let ctx = context_from_config(&cfg).unwrap();
        assert_eq!(ctx.seat_wind, Honor::South);
        assert_eq!(ctx.dora_tiles.len(), 1);
    }

    #[test]
    fn score_config_from_toml() {
        let raw = r#"
            hand_tiles = ["1m", "9m", "1p", "9p", "1s", "9s", "E", "S", "W", "N", "P", "F", "C"]
            win_tile = "C"
            win_type = "tsumo"
            is_dealer = true
            riichi = true
        "#;
        let cfg: ScoreConfig = toml::from_str(raw).unwrap();
        assert_eq!(cfg.win_type, WinType::Tsumo);
        assert!(cfg.is_dealer);
        assert_eq!(cfg.hand_tiles.joined().split(' ').count(), 13);
    }

    #[test]
    fn analyze_config_accepts_string_or_list() {
        let as_text: AnalyzeConfig = serde_json::from_str(r#"{"hand": "1m 2m 3m"}"#).unwrap();
        let as_list: AnalyzeConfig =
            serde_json::from_str(r#"{"hand": ["1m", "2m", "3m"]}"#).unwrap();
        assert_eq!(as_text.hand.unwrap().joined(), "1m 2m 3m");
        assert_eq!(as_list.hand.unwrap().joined(), "1m 2m 3m");
    }

    #[test]
    fn wind_parsing() {
        assert_eq!(parse_wind("E").unwrap(), Honor::East);
        assert_eq!(parse_wind("n").unwrap(), Honor::North);
        assert!(parse_wind("P").is_err());
        assert!(parse_wind("EE").is_err());
    }
}
