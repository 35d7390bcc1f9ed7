// Per-request scouting report assembly.
//
// This is the engine-to-presentation boundary: one call recomputes the
// cohort, percentiles, ranks, style verdict, and similarity list for a
// single player. Nothing is cached between calls and the season table is
// never mutated.

use crate::config::CohortConfig;
use crate::records::{HitterRecord, PitcherRecord};
use crate::scouting::cohort::{hitter_cohort, pitcher_cohort, HitterGrouping, PitcherGrouping};
use crate::scouting::percentile::{percentile, rank, Direction};
use crate::scouting::similarity::{
    similar_hitters, similar_pitchers, HitterNeighbor, PitcherNeighbor, SimilarityOutcome,
    DEFAULT_NEIGHBORS,
};
use crate::scouting::style::{badge, classify_hitter, classify_pitcher, luck, Badge, Luck, StyleVerdict};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("player '{name}' on team '{team}' not found")]
    PlayerNotFound { team: String, name: String },
}

// ---------------------------------------------------------------------------
// Pitcher report
// ---------------------------------------------------------------------------

/// Radar-chart percentiles for a pitcher, all in [0, 100]. `None` means the
/// value was not computable for the selected cohort.
#[derive(Debug, Clone)]
pub struct PitcherRadar {
    pub era: Option<f64>,
    pub whip: Option<f64>,
    pub k_per_9: Option<f64>,
    pub bb_per_9: Option<f64>,
    pub ops_against: Option<f64>,
    pub innings: Option<f64>,
}

/// Headline ordinal ranks for a pitcher; rank 1 is best in cohort.
#[derive(Debug, Clone)]
pub struct PitcherRanks {
    pub era: Option<usize>,
    pub ops_against: Option<usize>,
    pub whip: Option<usize>,
    pub strikeouts: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PitcherReport {
    pub player: PitcherRecord,
    pub grouping: PitcherGrouping,
    pub cohort_size: usize,
    pub radar: PitcherRadar,
    pub ranks: PitcherRanks,
    pub style: StyleVerdict,
    pub badge: Option<Badge>,
    pub luck: Option<Luck>,
    pub cohort_mean_babip: Option<f64>,
    pub similar: SimilarityOutcome<PitcherNeighbor>,
}

/// Build the full scouting report for one pitcher, identified by team and
/// display name (the raw name also matches; with unresolved duplicates the
/// first matching row wins).
pub fn pitcher_report(
    all: &[PitcherRecord],
    team: &str,
    name: &str,
    grouping: PitcherGrouping,
    cfg: &CohortConfig,
) -> Result<PitcherReport, ReportError> {
    let focal = find_pitcher(all, team, name)?;
    let cohort = pitcher_cohort(all, focal, grouping, cfg);

    let eras = column(&cohort, |r| r.era);
    let whips = column(&cohort, |r| r.whip);
    let k9s = column(&cohort, |r| r.k_per_9);
    let bb9s = column(&cohort, |r| r.bb_per_9);
    let opses = column(&cohort, |r| r.ops_against);
    let innings = column(&cohort, |r| r.innings);
    let strikeouts = column(&cohort, |r| r.strikeouts as f64);

    let radar = PitcherRadar {
        era: percentile(focal.era, &eras, Direction::LowerIsBetter),
        whip: percentile(focal.whip, &whips, Direction::LowerIsBetter),
        k_per_9: percentile(focal.k_per_9, &k9s, Direction::HigherIsBetter),
        bb_per_9: percentile(focal.bb_per_9, &bb9s, Direction::LowerIsBetter),
        ops_against: percentile(focal.ops_against, &opses, Direction::LowerIsBetter),
        innings: percentile(focal.innings, &innings, Direction::HigherIsBetter),
    };

    let ranks = PitcherRanks {
        era: rank(focal.era, &eras, Direction::LowerIsBetter),
        ops_against: rank(focal.ops_against, &opses, Direction::LowerIsBetter),
        whip: rank(focal.whip, &whips, Direction::LowerIsBetter),
        strikeouts: rank(focal.strikeouts as f64, &strikeouts, Direction::HigherIsBetter),
    };

    let cohort_mean_babip = finite_mean(&column(&cohort, |r| r.babip_against));

    Ok(PitcherReport {
        player: focal.clone(),
        grouping,
        cohort_size: cohort.len(),
        radar,
        ranks,
        style: classify_pitcher(focal),
        badge: badge(focal),
        luck: cohort_mean_babip.map(|mean| luck(focal.babip_against, mean)),
        cohort_mean_babip,
        similar: similar_pitchers(focal, &cohort, DEFAULT_NEIGHBORS),
    })
}

// ---------------------------------------------------------------------------
// Hitter report
// ---------------------------------------------------------------------------

/// Five-tool radar percentiles for a hitter.
#[derive(Debug, Clone)]
pub struct HitterRadar {
    pub avg: Option<f64>,
    pub isop: Option<f64>,
    pub bb_per_k: Option<f64>,
    pub risp: Option<f64>,
    pub gpa: Option<f64>,
}

/// Headline ordinal ranks for a hitter.
#[derive(Debug, Clone)]
pub struct HitterRanks {
    pub avg: Option<usize>,
    pub home_runs: Option<usize>,
    pub rbi: Option<usize>,
    pub ops: Option<usize>,
    pub gpa: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct HitterReport {
    pub player: HitterRecord,
    pub grouping: HitterGrouping,
    pub cohort_size: usize,
    pub radar: HitterRadar,
    pub ranks: HitterRanks,
    pub style: StyleVerdict,
    pub similar: SimilarityOutcome<HitterNeighbor>,
}

/// Build the full scouting report for one hitter. With `grouping` left as
/// `None` the report compares against regulars when the focal player clears
/// the regulars threshold and against all hitters otherwise.
pub fn hitter_report(
    all: &[HitterRecord],
    team: &str,
    name: &str,
    grouping: Option<HitterGrouping>,
    cfg: &CohortConfig,
) -> Result<HitterReport, ReportError> {
    let focal = find_hitter(all, team, name)?;
    let grouping = grouping.unwrap_or_else(|| HitterGrouping::default_for(focal, cfg));
    let cohort = hitter_cohort(all, focal, grouping, cfg);

    let avgs = column(&cohort, |r| r.avg);
    let isops = column(&cohort, |r| r.isop);
    let bbks = column(&cohort, |r| r.bb_per_k);
    let risps = column(&cohort, |r| r.risp);
    let gpas = column(&cohort, |r| r.gpa);
    let hrs = column(&cohort, |r| r.home_runs as f64);
    let rbis = column(&cohort, |r| r.rbi as f64);
    let opses = column(&cohort, |r| r.ops);

    let radar = HitterRadar {
        avg: percentile(focal.avg, &avgs, Direction::HigherIsBetter),
        isop: percentile(focal.isop, &isops, Direction::HigherIsBetter),
        bb_per_k: percentile(focal.bb_per_k, &bbks, Direction::HigherIsBetter),
        risp: percentile(focal.risp, &risps, Direction::HigherIsBetter),
        gpa: percentile(focal.gpa, &gpas, Direction::HigherIsBetter),
    };

    let ranks = HitterRanks {
        avg: rank(focal.avg, &avgs, Direction::HigherIsBetter),
        home_runs: rank(focal.home_runs as f64, &hrs, Direction::HigherIsBetter),
        rbi: rank(focal.rbi as f64, &rbis, Direction::HigherIsBetter),
        ops: rank(focal.ops, &opses, Direction::HigherIsBetter),
        gpa: rank(focal.gpa, &gpas, Direction::HigherIsBetter),
    };

    Ok(HitterReport {
        player: focal.clone(),
        grouping,
        cohort_size: cohort.len(),
        radar,
        ranks,
        style: classify_hitter(focal),
        similar: similar_hitters(focal, &cohort, DEFAULT_NEIGHBORS),
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_pitcher<'a>(
    all: &'a [PitcherRecord],
    team: &str,
    name: &str,
) -> Result<&'a PitcherRecord, ReportError> {
    all.iter()
        .find(|r| r.team == team && (r.display_name == name || r.name == name))
        .ok_or_else(|| ReportError::PlayerNotFound {
            team: team.into(),
            name: name.into(),
        })
}

fn find_hitter<'a>(
    all: &'a [HitterRecord],
    team: &str,
    name: &str,
) -> Result<&'a HitterRecord, ReportError> {
    all.iter()
        .find(|r| r.team == team && (r.display_name == name || r.name == name))
        .ok_or_else(|| ReportError::PlayerNotFound {
            team: team.into(),
            name: name.into(),
        })
}

fn column<T>(cohort: &[&T], get: impl Fn(&T) -> f64) -> Vec<f64> {
    cohort.iter().map(|r| get(r)).collect()
}

fn finite_mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
