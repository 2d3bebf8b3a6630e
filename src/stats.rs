// src/stats.rs
//! Summary numbers over an extracted bout list, for whatever presents them.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::{BoutRecord, Outcome, ProfileSummary};

/// What counts toward the knockout percentage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KoScope {
    /// Knockout wins over wins.
    #[default]
    WinsOnly,
    /// Every knockout-ended bout, won or lost, over all bouts.
    AllBouts,
}

impl FromStr for KoScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wins" | "wins-only" => Ok(KoScope::WinsOnly),
            "all" | "all-bouts" => Ok(KoScope::AllBouts),
            other => Err(format!("unknown KO scope: {other} (wins|all)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub unknown: usize,
    pub kos: usize,
    pub ko_scope: KoScope,
    pub win_percentage: f64,
    pub loss_percentage: f64,
    pub ko_percentage: f64,
    /// Bouts per calendar year; undated bouts are left out.
    pub by_year: BTreeMap<i32, usize>,
}

fn pct(n: usize, d: usize) -> f64 {
    if d == 0 { 0.0 } else { n as f64 * 100.0 / d as f64 }
}

impl Summary {
    pub fn compute(bouts: &[BoutRecord], ko_scope: KoScope) -> Self {
        let count = |o: Outcome| bouts.iter().filter(|b| b.outcome == o).count();
        let total = bouts.len();
        let wins = count(Outcome::Win);
        let losses = count(Outcome::Loss);

        let kos = bouts
            .iter()
            .filter(|b| b.method_kind().knockout)
            .filter(|b| ko_scope == KoScope::AllBouts || b.outcome == Outcome::Win)
            .count();
        let ko_base = match ko_scope {
            KoScope::WinsOnly => wins,
            KoScope::AllBouts => total,
        };

        let mut by_year = BTreeMap::new();
        for year in bouts.iter().filter_map(BoutRecord::year) {
            *by_year.entry(year).or_insert(0) += 1;
        }

        Self {
            total,
            wins,
            losses,
            draws: count(Outcome::Draw),
            unknown: count(Outcome::Unknown),
            kos,
            ko_scope,
            win_percentage: pct(wins, total),
            loss_percentage: pct(losses, total),
            ko_percentage: pct(kos, ko_base),
            by_year,
        }
    }
}

/// Totals as the page itself states them, for comparison with [`Summary`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileTotals {
    pub bouts: Option<u32>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub draws: Option<u32>,
    pub kos: Option<u32>,
}

impl ProfileTotals {
    pub fn from_profile(p: &ProfileSummary) -> Self {
        let first = |keys: &[&str]| keys.iter().find_map(|k| p.count(k));

        // "52-9-5" fills whatever the table left out
        let record: Vec<u32> = p
            .attribute("record")
            .map(|r| r.split('-').filter_map(|n| n.trim().parse().ok()).collect())
            .unwrap_or_default();
        let from_record = |i: usize| if record.len() == 3 { record.get(i).copied() } else { None };

        let wins = first(&["wins", "won"]).or_else(|| from_record(0));
        let losses = first(&["losses", "lost"]).or_else(|| from_record(1));
        let draws = first(&["draws", "drawn"]).or_else(|| from_record(2));
        let bouts = first(&["bouts", "fights"]).or_else(|| {
            match (wins, losses, draws) {
                (Some(w), Some(l), Some(d)) => w.checked_add(l)?.checked_add(d),
                _ => None,
            }
        });

        Self { bouts, wins, losses, draws, kos: first(&["kos", "ko"]) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bout(outcome: Outcome, method: Option<&str>, year: Option<i32>) -> BoutRecord {
        BoutRecord {
            raw_date: s!(),
            parsed_date: year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
            opponent: s!("X"),
            opponent_record: None,
            location: None,
            outcome,
            method: method.map(String::from),
            rounds: None,
        }
    }

    #[test]
    fn win_percentage_six_of_ten() {
        let mut bouts: Vec<_> = (0..6).map(|_| bout(Outcome::Win, None, None)).collect();
        bouts.extend((0..4).map(|_| bout(Outcome::Loss, None, None)));
        let s = Summary::compute(&bouts, KoScope::default());
        assert_eq!(s.win_percentage, 60.0);
        assert_eq!(s.loss_percentage, 40.0);
        assert_eq!(s.total, 10);
    }

    #[test]
    fn no_bouts_no_division() {
        let s = Summary::compute(&[], KoScope::AllBouts);
        assert_eq!(s.win_percentage, 0.0);
        assert_eq!(s.ko_percentage, 0.0);
        assert!(s.by_year.is_empty());
    }

    #[test]
    fn ko_scope_changes_numerator_and_denominator() {
        let bouts = vec![
            bout(Outcome::Win, Some("KO"), Some(1947)),
            bout(Outcome::Win, Some("PTS"), Some(1947)),
            bout(Outcome::Loss, Some("TKO"), Some(1948)),
            bout(Outcome::Draw, None, None),
        ];
        let wins_only = Summary::compute(&bouts, KoScope::WinsOnly);
        assert_eq!(wins_only.kos, 1);
        assert_eq!(wins_only.ko_percentage, 50.0);

        let all = Summary::compute(&bouts, KoScope::AllBouts);
        assert_eq!(all.kos, 2);
        assert_eq!(all.ko_percentage, 50.0);

        assert_eq!(all.by_year.get(&1947), Some(&2));
        assert_eq!(all.by_year.get(&1948), Some(&1));
        assert_eq!(all.draws, 1);
    }

    #[test]
    fn profile_totals_from_table_or_record() {
        let p = ProfileSummary::new(None, [("won", "52"), ("KOs", "21"), ("record", "52-9-5")]);
        let t = ProfileTotals::from_profile(&p);
        assert_eq!(t.wins, Some(52));
        assert_eq!(t.losses, Some(9));
        assert_eq!(t.draws, Some(5));
        assert_eq!(t.bouts, Some(66));
        assert_eq!(t.kos, Some(21));

        assert_eq!(ProfileTotals::from_profile(&ProfileSummary::unknown()), ProfileTotals::default());
    }

    #[test]
    fn oversized_page_counts_give_no_total() {
        let p = ProfileSummary::new(None, [("won", "4294967295"), ("lost", "1"), ("drawn", "0")]);
        let t = ProfileTotals::from_profile(&p);
        assert_eq!(t.wins, Some(u32::MAX));
        assert_eq!(t.bouts, None);
    }

    #[test]
    fn no_wins_means_no_ko_percentage() {
        let bouts = vec![bout(Outcome::Loss, Some("KO"), None), bout(Outcome::Draw, None, None)];
        let s = Summary::compute(&bouts, KoScope::WinsOnly);
        assert_eq!(s.wins, 0);
        assert_eq!(s.kos, 0);
        assert_eq!(s.ko_percentage, 0.0);
    }

    #[test]
    fn scope_from_str() {
        assert_eq!("all".parse::<KoScope>(), Ok(KoScope::AllBouts));
        assert_eq!("Wins".parse::<KoScope>(), Ok(KoScope::WinsOnly));
        assert!("some".parse::<KoScope>().is_err());
    }
}
