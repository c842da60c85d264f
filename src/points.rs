//! Base points, limit caps and payout distribution.
//!
//! Base points are `fu × 2^(han+2)`, capped by the limit ladder. Payments
//! multiply the base by the seat/win-type factor and round up to the next
//! hundred.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::WinType;

/// Named score caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Limit {
    /// 5+ han, 4 han at 40+ fu, 3 han at 70+ fu, or a raw base over 2000.
    Mangan,
    /// 6-7 han.
    Haneman,
    /// 8-10 han.
    Baiman,
    /// 11-12 han.
    Sanbaiman,
    /// 13+ han counted from ordinary yaku and dora.
    KazoeYakuman,
    /// A limit hand; the field is the combined multiplier.
    Yakuman(u8),
}

impl Limit {
    pub fn base_points(&self) -> u32 {
        match self {
            Limit::Mangan => 2000,
            Limit::Haneman => 3000,
            Limit::Baiman => 4000,
            Limit::Sanbaiman => 6000,
            Limit::KazoeYakuman => 8000,
            Limit::Yakuman(multiplier) => 8000 * *multiplier as u32,
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Limit::Mangan => write!(f, "Mangan"),
            Limit::Haneman => write!(f, "Haneman"),
            Limit::Baiman => write!(f, "Baiman"),
            Limit::Sanbaiman => write!(f, "Sanbaiman"),
            Limit::KazoeYakuman => write!(f, "Kazoe Yakuman"),
            Limit::Yakuman(1) => write!(f, "Yakuman"),
            Limit::Yakuman(multiplier) => write!(f, "{multiplier}x Yakuman"),
        }
    }
}

/// Final payouts for one winning hand.
///
/// Only the fields for the actual win type are populated: `ron` for a
/// discard win, the two tsumo fields for a self-draw (a dealer win leaves
/// `tsumo_from_dealer` empty since the dealer is the winner).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResult {
    pub han: u8,
    pub fu: u8,
    pub limit: Option<Limit>,
    pub is_dealer: bool,
    pub ron: Option<u32>,
    pub tsumo_from_dealer: Option<u32>,
    pub tsumo_from_non_dealer: Option<u32>,
}

impl PointsResult {
    /// Total received on a tsumo win, if this was one.
    pub fn tsumo_total(&self) -> Option<u32> {
        match (self.tsumo_from_dealer, self.tsumo_from_non_dealer) {
            (None, None) => None,
            (from_dealer, from_non_dealer) => {
                let from_non_dealer = from_non_dealer.unwrap_or(0);
                Some(if self.is_dealer {
                    from_non_dealer * 3
                } else {
                    from_dealer.unwrap_or(0) + from_non_dealer * 2
                })
            }
        }
    }

    /// The single number to compare interpretations by: the ron payment or
    /// the tsumo total.
    pub fn winning_total(&self) -> u32 {
        self.ron.or_else(|| self.tsumo_total()).unwrap_or(0)
    }
}

fn ceil_to_100(value: u32) -> u32 {
    value.div_ceil(100) * 100
}

fn limit_for(han: u8, fu: u8, raw_base: u32) -> Option<Limit> {
    if han >= 13 {
        return Some(Limit::KazoeYakuman);
    }
    if han >= 11 {
        return Some(Limit::Sanbaiman);
    }
    if han >= 8 {
        return Some(Limit::Baiman);
    }
    if han >= 6 {
        return Some(Limit::Haneman);
    }
    let mangan =
        han >= 5 || (han == 4 && fu >= 40) || (han == 3 && fu >= 70) || raw_base >= 2000;
    mangan.then_some(Limit::Mangan)
}

fn distribute(base: u32, is_dealer: bool, win_type: WinType) -> (Option<u32>, Option<u32>, Option<u32>) {
    match win_type {
        WinType::Ron => {
            let factor = if is_dealer { 6 } else { 4 };
            (Some(ceil_to_100(base * factor)), None, None)
        }
        WinType::Tsumo => {
            if is_dealer {
                // Each of the three opponents pays double base.
                (None, None, Some(ceil_to_100(base * 2)))
            } else {
                (None, Some(ceil_to_100(base * 2)), Some(ceil_to_100(base)))
            }
        }
    }
}

/// Points for an ordinary hand with known han and fu.
pub fn estimate_points(han: u8, fu: u8, is_dealer: bool, win_type: WinType) -> PointsResult {
    // The exponent only matters below the limit ladder; clamping it keeps
    // absurd dora counts from overflowing.
    let raw_base = fu as u32 * 2u32.pow(han.min(13) as u32 + 2);
    let limit = limit_for(han, fu, raw_base);
    let base = limit.map_or(raw_base, |l| l.base_points());

    let (ron, tsumo_from_dealer, tsumo_from_non_dealer) = distribute(base, is_dealer, win_type);
    PointsResult {
        han,
        fu,
        limit,
        is_dealer,
        ron,
        tsumo_from_dealer,
        tsumo_from_non_dealer,
    }
}

/// Points for a limit hand. The multiplier is the sum over awarded yakuman.
pub fn yakuman_points(multiplier: u8, is_dealer: bool, win_type: WinType) -> PointsResult {
    let limit = Limit::Yakuman(multiplier);
    let (ron, tsumo_from_dealer, tsumo_from_non_dealer) =
        distribute(limit.base_points(), is_dealer, win_type);
    PointsResult {
        han: 0,
        fu: 0,
        limit: Some(limit),
        is_dealer,
        ron,
        tsumo_from_dealer,
        tsumo_from_non_dealer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_ron_scores() {
        // 1 han 30 fu: base 240, non-dealer ron 960 -> 1000.
        let p = estimate_points(1, 30, false, WinType::Ron);
        assert_eq!(p.ron, Some(1000));
        assert_eq!(p.limit, None);

        // 3 han 40 fu: base 1280, non-dealer ron 5120 -> 5200.
        let p = estimate_points(3, 40, false, WinType::Ron);
        assert_eq!(p.ron, Some(5200));

        // 4 han 30 fu: base 1920, not mangan; dealer ron 11520 -> 11600.
        let p = estimate_points(4, 30, true, WinType::Ron);
        assert_eq!(p.limit, None);
        assert_eq!(p.ron, Some(11600));
    }

    #[test]
    fn tsumo_split() {
        // 2 han 30 fu: base 480.
        let p = estimate_points(2, 30, false, WinType::Tsumo);
        assert_eq!(p.tsumo_from_dealer, Some(1000));
        assert_eq!(p.tsumo_from_non_dealer, Some(500));
        assert_eq!(p.tsumo_total(), Some(2000));
        assert_eq!(p.ron, None);

        // Dealer 2 han 30 fu: 1000 from everyone.
        let p = estimate_points(2, 30, true, WinType::Tsumo);
        assert_eq!(p.tsumo_from_non_dealer, Some(1000));
        assert_eq!(p.tsumo_from_dealer, None);
        assert_eq!(p.tsumo_total(), Some(3000));
    }

    #[test]
    fn limit_ladder() {
        assert_eq!(estimate_points(5, 30, false, WinType::Ron).limit, Some(Limit::Mangan));
        assert_eq!(estimate_points(4, 40, false, WinType::Ron).limit, Some(Limit::Mangan));
        assert_eq!(estimate_points(3, 70, false, WinType::Ron).limit, Some(Limit::Mangan));
        assert_eq!(estimate_points(6, 30, false, WinType::Ron).limit, Some(Limit::Haneman));
        assert_eq!(estimate_points(8, 30, false, WinType::Ron).limit, Some(Limit::Baiman));
        assert_eq!(estimate_points(11, 30, false, WinType::Ron).limit, Some(Limit::Sanbaiman));
        assert_eq!(
            estimate_points(13, 30, false, WinType::Ron).limit,
            Some(Limit::KazoeYakuman)
        );
    }

    #[test]
    fn high_fu_reaches_mangan_through_base() {
        // 4 han 60 fu would be base 3840; capped at mangan.
        let p = estimate_points(4, 60, false, WinType::Ron);
        assert_eq!(p.limit, Some(Limit::Mangan));
        assert_eq!(p.ron, Some(8000));
    }

    #[test]
    fn yakuman_payouts() {
        // Single yakuman, non-dealer ron: 8000 * 4 = 32000.
        let p = yakuman_points(1, false, WinType::Ron);
        assert_eq!(p.ron, Some(32000));
        assert_eq!(p.limit, Some(Limit::Yakuman(1)));

        // Dealer tsumo: 16000 from each opponent.
        let p = yakuman_points(1, true, WinType::Tsumo);
        assert_eq!(p.tsumo_from_non_dealer, Some(16000));
        assert_eq!(p.tsumo_total(), Some(48000));

        // Double yakuman non-dealer tsumo: 32000 + 2 * 16000.
        let p = yakuman_points(2, false, WinType::Tsumo);
        assert_eq!(p.tsumo_from_dealer, Some(32000));
        assert_eq!(p.tsumo_from_non_dealer, Some(16000));
        assert_eq!(p.tsumo_total(), Some(64000));
    }

    #[test]
    fn payouts_are_multiples_of_100() {
        for han in 1..=13u8 {
            for fu in [20u8, 25, 30, 40, 50, 70, 110] {
                for is_dealer in [false, true] {
                    let ron = estimate_points(han, fu, is_dealer, WinType::Ron);
                    assert_eq!(ron.winning_total() % 100, 0);

                    let tsumo = estimate_points(han, fu, is_dealer, WinType::Tsumo);
                    assert_eq!(tsumo.tsumo_from_non_dealer.unwrap() % 100, 0);
                    if let Some(from_dealer) = tsumo.tsumo_from_dealer {
                        assert_eq!(from_dealer % 100, 0);
                    }
                }
            }
        }
    }

    #[test]
    fn limit_names() {
        assert_eq!(Limit::Mangan.to_string(), "Mangan");
        assert_eq!(Limit::KazoeYakuman.to_string(), "Kazoe Yakuman");
        assert_eq!(Limit::Yakuman(1).to_string(), "Yakuman");
        assert_eq!(Limit::Yakuman(2).to_string(), "2x Yakuman");
    }
}
