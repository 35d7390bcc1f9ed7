// Nearest-neighbor similarity search over standardized stat profiles.
//
// Each feature is standardized independently across the cohort survivors
// (mean / sample standard deviation, matching how the rest of the report
// treats cohort spread), then neighbors are ranked by Euclidean distance to
// the focal player's vector.

use crate::records::{HitterRecord, PitcherRecord};

/// Default number of neighbors returned.
pub const DEFAULT_NEIGHBORS: usize = 3;

/// Threshold below which a feature's spread is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Outcome of a similarity query. `InsufficientData` covers the cases where
/// a ranked answer would be misleading: the focal player was dropped by the
/// missing-value filter, or fewer than two cohort members survived it.
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityOutcome<N> {
    Ranked(Vec<N>),
    InsufficientData,
}

/// A pitcher ranked as similar to the focal player.
#[derive(Debug, Clone, PartialEq)]
pub struct PitcherNeighbor {
    pub display_name: String,
    pub team: String,
    pub era: f64,
    pub distance: f64,
}

/// A hitter ranked as similar to the focal player.
#[derive(Debug, Clone, PartialEq)]
pub struct HitterNeighbor {
    pub display_name: String,
    pub team: String,
    pub ops: f64,
    pub distance: f64,
}

// ---------------------------------------------------------------------------
// Feature vectors
// ---------------------------------------------------------------------------

fn pitcher_features(r: &PitcherRecord) -> [f64; 5] {
    [r.era, r.whip, r.k_per_9, r.bb_per_9, r.go_ao]
}

fn hitter_features(r: &HitterRecord) -> [f64; 5] {
    [r.avg, r.home_runs as f64, r.ops, r.bb_per_k, r.isop]
}

// ---------------------------------------------------------------------------
// Public queries
// ---------------------------------------------------------------------------

/// Find the `k` pitchers in `cohort` most similar to `focal` by standardized
/// Euclidean distance over ERA, WHIP, K/9, BB/9, and GO/AO. The focal player
/// never appears in their own result.
pub fn similar_pitchers(
    focal: &PitcherRecord,
    cohort: &[&PitcherRecord],
    k: usize,
) -> SimilarityOutcome<PitcherNeighbor> {
    match nearest_neighbors(cohort, focal, pitcher_features, k) {
        Some(ranked) => SimilarityOutcome::Ranked(
            ranked
                .into_iter()
                .map(|(r, distance)| PitcherNeighbor {
                    display_name: r.display_name.clone(),
                    team: r.team.clone(),
                    era: r.era,
                    distance,
                })
                .collect(),
        ),
        None => SimilarityOutcome::InsufficientData,
    }
}

/// Find the `k` hitters in `cohort` most similar to `focal` over AVG, HR,
/// OPS, BB/K, and ISOP. Same contract as [`similar_pitchers`].
pub fn similar_hitters(
    focal: &HitterRecord,
    cohort: &[&HitterRecord],
    k: usize,
) -> SimilarityOutcome<HitterNeighbor> {
    match nearest_neighbors(cohort, focal, hitter_features, k) {
        Some(ranked) => SimilarityOutcome::Ranked(
            ranked
                .into_iter()
                .map(|(r, distance)| HitterNeighbor {
                    display_name: r.display_name.clone(),
                    team: r.team.clone(),
                    ops: r.ops,
                    distance,
                })
                .collect(),
        ),
        None => SimilarityOutcome::InsufficientData,
    }
}

// ---------------------------------------------------------------------------
// Core ranking
// ---------------------------------------------------------------------------

/// Rank cohort members by standardized distance to the focal vector.
///
/// Members with any non-finite feature are dropped outright (no imputation).
/// Returns `None` when the focal player is among the dropped or fewer than
/// two members survive. Ties are broken by input order: the sort is stable,
/// so the first-seen member wins, keeping repeated queries deterministic.
fn nearest_neighbors<'a, T, const D: usize>(
    cohort: &[&'a T],
    focal: &T,
    features: fn(&T) -> [f64; D],
    k: usize,
) -> Option<Vec<(&'a T, f64)>> {
    // Drop members with missing feature values.
    let survivors: Vec<(&T, [f64; D])> = cohort
        .iter()
        .map(|r| (*r, features(r)))
        .filter(|(_, fs)| fs.iter().all(|v| v.is_finite()))
        .collect();

    let focal_idx = survivors
        .iter()
        .position(|(r, _)| std::ptr::eq(*r, focal))?;
    if survivors.len() < 2 {
        return None;
    }

    // Per-feature mean and sample standard deviation across the survivors.
    let n = survivors.len() as f64;
    let mut means = [0.0f64; D];
    let mut stdevs = [0.0f64; D];
    for d in 0..D {
        means[d] = survivors.iter().map(|(_, fs)| fs[d]).sum::<f64>() / n;
        let ss: f64 = survivors
            .iter()
            .map(|(_, fs)| (fs[d] - means[d]).powi(2))
            .sum();
        stdevs[d] = (ss / (n - 1.0)).sqrt();
    }

    // A zero-variance feature standardizes to 0.0 for everyone rather than
    // NaN, so it simply stops contributing to the distance.
    let standardize = |fs: &[f64; D]| -> [f64; D] {
        let mut z = [0.0f64; D];
        for d in 0..D {
            if stdevs[d] >= STDEV_EPSILON {
                z[d] = (fs[d] - means[d]) / stdevs[d];
            }
        }
        z
    };

    let focal_vec = standardize(&survivors[focal_idx].1);

    let mut ranked: Vec<(&T, f64)> = survivors
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != focal_idx)
        .map(|(_, (r, fs))| {
            let z = standardize(fs);
            let distance = focal_vec
                .iter()
                .zip(&z)
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            (*r, distance)
        })
        .collect();

    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);
    Some(ranked)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
