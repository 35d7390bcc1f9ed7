// Reference population selection.
//
// A cohort is the filtered subset of the season table a focal player is
// compared against. It is rebuilt for every analysis request and owned by
// that request; nothing here caches or mutates the underlying table.

use crate::config::CohortConfig;
use crate::records::{HitterRecord, PitcherRecord};

/// How to group pitchers for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitcherGrouping {
    /// Starters compared only to starters, relievers only to relievers.
    SameRole,
    AllPitchers,
}

/// How to group hitters for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitterGrouping {
    /// Hitters with at least the configured regular plate-appearance count.
    Regulars,
    AllHitters,
}

impl HitterGrouping {
    /// The grouping a report defaults to: regulars when the focal player
    /// clears the regulars threshold, everyone otherwise.
    pub fn default_for(focal: &HitterRecord, cfg: &CohortConfig) -> HitterGrouping {
        if focal.plate_appearances >= cfg.regular_pa {
            HitterGrouping::Regulars
        } else {
            HitterGrouping::AllHitters
        }
    }
}

/// Select the pitcher reference cohort for `focal`.
///
/// The innings floor applies before the role split so negligible samples
/// never dilute the comparison. The focal player is always part of the
/// cohort, even when they miss the floor themselves: percentile and rank
/// are defined relative to a population that contains the subject.
pub fn pitcher_cohort<'a>(
    all: &'a [PitcherRecord],
    focal: &'a PitcherRecord,
    grouping: PitcherGrouping,
    cfg: &CohortConfig,
) -> Vec<&'a PitcherRecord> {
    let mut cohort: Vec<&PitcherRecord> = all
        .iter()
        .filter(|r| r.innings >= cfg.min_innings)
        .filter(|r| match grouping {
            PitcherGrouping::SameRole => r.role == focal.role,
            PitcherGrouping::AllPitchers => true,
        })
        .collect();

    if !cohort.iter().any(|r| std::ptr::eq(*r, focal)) {
        cohort.push(focal);
    }
    cohort
}

/// Select the hitter reference cohort for `focal`. Same focal-retention
/// contract as [`pitcher_cohort`].
pub fn hitter_cohort<'a>(
    all: &'a [HitterRecord],
    focal: &'a HitterRecord,
    grouping: HitterGrouping,
    cfg: &CohortConfig,
) -> Vec<&'a HitterRecord> {
    let floor = match grouping {
        HitterGrouping::Regulars => cfg.regular_pa,
        HitterGrouping::AllHitters => cfg.min_pa,
    };
    let mut cohort: Vec<&HitterRecord> = all
        .iter()
        .filter(|r| r.plate_appearances >= floor)
        .collect();

    if !cohort.iter().any(|r| std::ptr::eq(*r, focal)) {
        cohort.push(focal);
    }
    cohort
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
