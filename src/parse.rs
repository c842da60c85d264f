//! Tile-list parsing and count vectors.
//!
//! Tile lists are whitespace- or comma-separated tokens. Red fives are
//! written `0m`, `0p`, `0s`; they normalise to the ordinary five of their
//! suit, with the number of red tokens tracked separately so scoring can
//! award aka dora.

use crate::error::EngineError;
use crate::tile::{TILE_KINDS, Tile};

/// A multiset of tiles as counts per index. Each entry is at most 4 for a
/// legal hand.
pub type TileCounts = [u8; TILE_KINDS];

/// Tiles parsed from text, with the number of red-five tokens seen.
#[derive(Debug, Clone, Default)]
pub struct ParsedTiles {
    pub tiles: Vec<Tile>,
    pub red_fives: u8,
}

/// Parse a tile list, normalising red fives to ordinary fives.
pub fn parse_tiles(text: &str) -> Result<Vec<Tile>, EngineError> {
    Ok(parse_tiles_tracking_red(text)?.tiles)
}

/// Parse a tile list and report how many red-five tokens it contained.
pub fn parse_tiles_tracking_red(text: &str) -> Result<ParsedTiles, EngineError> {
    let mut parsed = ParsedTiles::default();

    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        parsed.tiles.push(parse_token(token, &mut parsed.red_fives)?);
    }

    Ok(parsed)
}

fn parse_token(token: &str, red_fives: &mut u8) -> Result<Tile, EngineError> {
    if let Some(suit_letter) = token.strip_prefix('0') {
        let normalised = format!("5{suit_letter}");
        let tile: Tile = normalised
            .parse()
            .map_err(|_| EngineError::MalformedTile(token.to_string()))?;
        *red_fives += 1;
        return Ok(tile);
    }
    token.parse()
}

/// Build a count vector from a tile list.
pub fn tiles_to_counts(tiles: &[Tile]) -> TileCounts {
    let mut counts = [0u8; TILE_KINDS];
    for tile in tiles {
        counts[tile.index()] += 1;
    }
    counts
}

/// Total number of tiles in a count vector.
pub fn total_tiles(counts: &TileCounts) -> u8 {
    counts.iter().sum()
}

/// Reject count vectors that use more than four copies of any tile.
pub fn check_tile_counts(counts: &TileCounts) -> Result<(), EngineError> {
    for (idx, &count) in counts.iter().enumerate() {
        if count > 4 {
            return Err(EngineError::TileOverCount(Tile::from_index(idx)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Honor, Suit};

    #[test]
    fn parse_simple_list() {
        let tiles = parse_tiles("1m 2m 3m E E").unwrap();
        assert_eq!(tiles.len(), 5);
        assert_eq!(tiles[0], Tile::suited(Suit::Man, 1));
        assert_eq!(tiles[3], Tile::honor(Honor::East));
    }

    #[test]
    fn parse_comma_separated() {
        let tiles = parse_tiles("1p,2p,3p, C").unwrap();
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[3], Tile::honor(Honor::Red));
    }

    #[test]
    fn red_fives_normalise() {
        let parsed = parse_tiles_tracking_red("0m 0p 0s 5m").unwrap();
        assert_eq!(parsed.red_fives, 3);
        assert_eq!(parsed.tiles[0], Tile::suited(Suit::Man, 5));
        assert_eq!(parsed.tiles[1], Tile::suited(Suit::Pin, 5));
        assert_eq!(parsed.tiles[2], Tile::suited(Suit::Sou, 5));
        assert_eq!(parsed.tiles[3], Tile::suited(Suit::Man, 5));
    }

    #[test]
    fn normalisation_is_idempotent() {
        let once = parse_tiles("0m 5m E").unwrap();
        let text: Vec<String> = once.iter().map(|t| t.to_string()).collect();
        let twice = parse_tiles(&text.join(" ")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_token_fails() {
        let err = parse_tiles("1m xx 3m").unwrap_err();
        assert_eq!(err.kind(), "malformed-tile");

        // A red-looking token with a bad suit is still malformed.
        let err = parse_tiles("0z").unwrap_err();
        assert_eq!(err.kind(), "malformed-tile");
    }

    #[test]
    fn counts_accumulate() {
        let tiles = parse_tiles("1m 1m 1m 9s E E").unwrap();
        let counts = tiles_to_counts(&tiles);
        assert_eq!(counts[0], 3);
        assert_eq!(counts[26], 1);
        assert_eq!(counts[27], 2);
        assert_eq!(total_tiles(&counts), 6);
    }

    #[test]
    fn over_count_detected() {
        let tiles = parse_tiles("1m 1m 1m 1m 1m").unwrap();
        let counts = tiles_to_counts(&tiles);
        let err = check_tile_counts(&counts).unwrap_err();
        assert_eq!(err.kind(), "tile-over-count");
    }
}
