// Rule-based style classification, badge overlay, and the BABIP luck read.
//
// Classification is an ordered list of predicates evaluated top-down: the
// raw conditions overlap, so the order is part of the contract. Every rule
// is a standalone function so each branch can be tested in isolation.

use crate::records::{HitterRecord, PitcherRecord, Role};

/// A style category: fixed label, rationale text, and icon per branch. The
/// rationale is static copy, never generated from the input values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleVerdict {
    pub label: &'static str,
    pub rationale: &'static str,
    pub icon: &'static str,
}

// ---------------------------------------------------------------------------
// Pitcher classification
// ---------------------------------------------------------------------------

type PitcherRule = fn(&PitcherRecord) -> Option<StyleVerdict>;

/// Ordered pitcher rules; the first match wins. The batted-ball profile
/// fallback below is total, so classification never fails.
const PITCHER_RULES: &[PitcherRule] = &[workhorse, developing_pitcher, power, finesse, solid_arm];

/// Assign a pitching style. Deterministic and total.
pub fn classify_pitcher(record: &PitcherRecord) -> StyleVerdict {
    PITCHER_RULES
        .iter()
        .find_map(|rule| rule(record))
        .unwrap_or_else(|| batted_ball_profile(record))
}

fn workhorse(r: &PitcherRecord) -> Option<StyleVerdict> {
    (r.role == Role::Reliever && r.games >= 65 && r.innings >= 65.0).then_some(StyleVerdict {
        label: "Workhorse",
        rationale: "Logged 65+ games and 65+ innings out of the bullpen, \
                    carrying the pitching staff day after day.",
        icon: "\u{1F4AA}\u{1F40E}",
    })
}

fn developing_pitcher(r: &PitcherRecord) -> Option<StyleVerdict> {
    (r.era >= 6.00 || r.whip >= 1.70).then_some(StyleVerdict {
        label: "Developing Pitcher",
        rationale: "Still unrefined; needs growth in command and stuff \
                    before taking on a bigger role.",
        icon: "\u{1F331}",
    })
}

fn power(r: &PitcherRecord) -> Option<StyleVerdict> {
    if r.k_per_9 < 9.0 {
        return None;
    }
    Some(if r.go_ao > 1.3 {
        StyleVerdict {
            label: "Power Sinkerballer",
            rationale: "Overpowering stuff that piles up strikeouts and \
                        ground balls at the same time.",
            icon: "\u{1F525}\u{1FAA8}",
        }
    } else {
        StyleVerdict {
            label: "Power Pitcher",
            rationale: "Blows hitters away with pure stuff; a strikeout \
                        machine.",
            icon: "\u{1F525}",
        }
    })
}

fn finesse(r: &PitcherRecord) -> Option<StyleVerdict> {
    if r.bb_per_9 > 2.5 {
        return None;
    }
    Some(if r.go_ao > 1.3 {
        StyleVerdict {
            label: "Control Artist",
            rationale: "Pinpoint command that induces ground balls and keeps \
                        pitch counts low.",
            icon: "\u{1F3A8}\u{1FAA8}",
        }
    } else {
        StyleVerdict {
            label: "Finesse Pitcher",
            rationale: "Carves up hitters with command and sequencing rather \
                        than velocity.",
            icon: "\u{1F3A8}",
        }
    })
}

fn solid_arm(r: &PitcherRecord) -> Option<StyleVerdict> {
    (r.era <= 4.80).then_some(StyleVerdict {
        label: "Solid Regular",
        rationale: "Dependable arm that anchors the middle of the pitching \
                    staff.",
        icon: "\u{1F6E1}",
    })
}

/// Terminal rule: classify by batted-ball tendency. Always yields a verdict.
fn batted_ball_profile(r: &PitcherRecord) -> StyleVerdict {
    if r.go_ao > 1.15 {
        StyleVerdict {
            label: "Groundball Pitcher",
            rationale: "Pitches to contact on the ground; lives off the \
                        infield defense.",
            icon: "\u{1FAA8}",
        }
    } else if r.go_ao < 0.85 {
        StyleVerdict {
            label: "Flyball Pitcher",
            rationale: "Generates fly balls; plays best in a spacious park.",
            icon: "\u{2601}",
        }
    } else {
        StyleVerdict {
            label: "Balanced Pitcher",
            rationale: "No pronounced batted-ball lean; adapts the approach \
                        to the situation.",
            icon: "\u{2696}",
        }
    }
}

// ---------------------------------------------------------------------------
// Hitter classification
// ---------------------------------------------------------------------------

type HitterRule = fn(&HitterRecord) -> Option<StyleVerdict>;

const HITTER_RULES: &[HitterRule] = &[power_bat, contact_bat, eagle_eye, clutch_bat];

/// Assign a hitting style. Deterministic and total.
pub fn classify_hitter(record: &HitterRecord) -> StyleVerdict {
    HITTER_RULES
        .iter()
        .find_map(|rule| rule(record))
        .unwrap_or_else(|| production_profile(record))
}

fn power_bat(r: &HitterRecord) -> Option<StyleVerdict> {
    if r.isop < 0.200 && r.home_runs < 20 {
        return None;
    }
    Some(if r.avg >= 0.280 {
        StyleVerdict {
            label: "Elite Bomber",
            rationale: "Combines contact accuracy with top-shelf power; a \
                        franchise-grade slugger.",
            icon: "\u{1F4A3}\u{1F451}",
        }
    } else {
        StyleVerdict {
            label: "Power Slugger",
            rationale: "A classic bomber who can flip a game with one swing.",
            icon: "\u{1F4A3}",
        }
    })
}

fn contact_bat(r: &HitterRecord) -> Option<StyleVerdict> {
    if r.avg < 0.310 {
        return None;
    }
    Some(if r.strikeouts < r.walks {
        StyleVerdict {
            label: "Contact Master",
            rationale: "Masterful bat control; walks more often than he \
                        strikes out.",
            icon: "\u{1F3A8}\u{1FA84}",
        }
    } else {
        StyleVerdict {
            label: "Table-Setter",
            rationale: "A hit machine whose average keeps the top of the \
                        lineup moving.",
            icon: "\u{1F3C3}\u{1F3CF}",
        }
    })
}

fn eagle_eye(r: &HitterRecord) -> Option<StyleVerdict> {
    (r.bb_per_k >= 0.8 || r.obp >= 0.380).then_some(StyleVerdict {
        label: "Eagle Eye",
        rationale: "Wears pitchers down and reaches base relentlessly on a \
                    sharp batting eye.",
        icon: "\u{1F441}\u{1F94E}",
    })
}

fn clutch_bat(r: &HitterRecord) -> Option<StyleVerdict> {
    (r.risp >= r.avg + 0.05 && r.rbi > 50).then_some(StyleVerdict {
        label: "Clutch Hitter",
        rationale: "Thrives with runners in scoring position; a finisher's \
                    instinct.",
        icon: "\u{1F525}\u{1F4AA}",
    })
}

/// Terminal rule: split the remainder by overall production.
fn production_profile(r: &HitterRecord) -> StyleVerdict {
    if r.ops > 0.750 {
        StyleVerdict {
            label: "Solid Regular",
            rationale: "A dependable everyday bat in the middle of the \
                        lineup.",
            icon: "\u{1F6E1}",
        }
    } else {
        StyleVerdict {
            label: "Developing Hitter",
            rationale: "A prospect or depth piece still showing room to grow.",
            icon: "\u{1F331}",
        }
    }
}

// ---------------------------------------------------------------------------
// Badge overlay
// ---------------------------------------------------------------------------

/// Annotation layered on top of the style category; never alters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    TeamAce,
    SetupCloser,
}

impl Badge {
    pub fn label(&self) -> &'static str {
        match self {
            Badge::TeamAce => "\u{1F451} Team Ace",
            Badge::SetupCloser => "\u{1F512} Setup/Closer",
        }
    }
}

/// The ace and setup/closer bars are role-gated, so a pitcher can earn at
/// most one badge.
pub fn badge(r: &PitcherRecord) -> Option<Badge> {
    match r.role {
        Role::Starter => {
            (r.innings >= 100.0 && r.era <= 3.50).then_some(Badge::TeamAce)
        }
        Role::Reliever => {
            ((r.saves >= 10 || r.holds >= 10) && r.era <= 4.50).then_some(Badge::SetupCloser)
        }
    }
}

// ---------------------------------------------------------------------------
// BABIP luck indicator
// ---------------------------------------------------------------------------

/// Whether a BABIP sits meaningfully below, above, or near the cohort mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Luck {
    Lucky,
    Unlucky,
    Neutral,
}

impl Luck {
    pub fn label(&self) -> &'static str {
        match self {
            Luck::Lucky => "Lucky \u{1F340}",
            Luck::Unlucky => "Unlucky \u{2614}",
            Luck::Neutral => "Neutral \u{1F44C}",
        }
    }
}

/// Symmetric band around the cohort mean beyond which a BABIP reads as luck
/// rather than noise.
const LUCK_BAND: f64 = 0.035;

/// Compare a pitcher's BABIP-against to the cohort mean. A BABIP well below
/// the group suggests batted-ball fortune; well above suggests the opposite.
pub fn luck(babip: f64, cohort_mean_babip: f64) -> Luck {
    let diff = babip - cohort_mean_babip;
    if diff < -LUCK_BAND {
        Luck::Lucky
    } else if diff > LUCK_BAND {
        Luck::Unlucky
    } else {
        Luck::Neutral
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Baseline pitcher that reaches the batted-ball fallback: middling era,
    /// strikeout and walk rates outside every earlier rule.
    fn pitcher() -> PitcherRecord {
        PitcherRecord {
            team: "TST".into(),
            name: "Test Pitcher".into(),
            display_name: "Test Pitcher".into(),
            games: 30,
            games_started: 0,
            wins: 3,
            losses: 4,
            saves: 0,
            holds: 2,
            innings: 45.0,
            era: 5.10,
            whip: 1.45,
            strikeouts: 38,
            walks: 20,
            k_per_9: 7.6,
            bb_per_9: 4.0,
            go_ao: 1.00,
            ops_against: 0.740,
            babip_against: 0.300,
            role: Role::Reliever,
        }
    }

    fn starter() -> PitcherRecord {
        PitcherRecord {
            games: 28,
            games_started: 28,
            innings: 160.0,
            era: 3.80,
            whip: 1.20,
            k_per_9: 7.5,
            bb_per_9: 3.0,
            role: Role::Starter,
            ..pitcher()
        }
    }

    fn hitter() -> HitterRecord {
        HitterRecord {
            team: "TST".into(),
            name: "Test Hitter".into(),
            display_name: "Test Hitter".into(),
            plate_appearances: 500,
            at_bats: 450,
            hits: 117,
            home_runs: 10,
            rbi: 45,
            walks: 40,
            strikeouts: 80,
            avg: 0.260,
            obp: 0.330,
            slg: 0.390,
            ops: 0.720,
            isop: 0.130,
            bb_per_k: 0.50,
            risp: 0.265,
            gpa: 0.245,
        }
    }

    // ---- Pitcher priority and branches ----

    #[test]
    fn workhorse_beats_power() {
        // Satisfies both the workhorse and the power conditions; workhorse
        // is first in the rule order and must win.
        let p = PitcherRecord {
            games: 70,
            innings: 70.0,
            k_per_9: 10.5,
            era: 3.00,
            whip: 1.10,
            ..pitcher()
        };
        assert_eq!(classify_pitcher(&p).label, "Workhorse");
    }

    #[test]
    fn starter_never_a_workhorse() {
        let p = PitcherRecord {
            games: 70,
            innings: 70.0,
            role: Role::Starter,
            era: 6.50,
            ..pitcher()
        };
        assert_eq!(classify_pitcher(&p).label, "Developing Pitcher");
    }

    #[test]
    fn developing_at_exact_era_boundary() {
        let p = PitcherRecord { era: 6.00, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Developing Pitcher");

        let p = PitcherRecord { era: 5.99, whip: 1.70, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Developing Pitcher");
    }

    #[test]
    fn power_at_exact_k9_boundary() {
        let p = PitcherRecord { k_per_9: 9.0, era: 4.00, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Power Pitcher");
    }

    #[test]
    fn power_sinkerballer_needs_go_ao_above_1_3() {
        let p = PitcherRecord {
            k_per_9: 10.0,
            era: 4.00,
            go_ao: 1.31,
            ..pitcher()
        };
        assert_eq!(classify_pitcher(&p).label, "Power Sinkerballer");

        // Exactly 1.3 is not above the split.
        let p = PitcherRecord {
            k_per_9: 10.0,
            era: 4.00,
            go_ao: 1.30,
            ..pitcher()
        };
        assert_eq!(classify_pitcher(&p).label, "Power Pitcher");
    }

    #[test]
    fn finesse_at_exact_bb9_boundary() {
        let p = PitcherRecord {
            bb_per_9: 2.5,
            era: 4.00,
            ..pitcher()
        };
        assert_eq!(classify_pitcher(&p).label, "Finesse Pitcher");

        let p = PitcherRecord {
            bb_per_9: 2.5,
            go_ao: 1.4,
            era: 4.00,
            ..pitcher()
        };
        assert_eq!(classify_pitcher(&p).label, "Control Artist");
    }

    #[test]
    fn solid_regular_at_exact_era_ceiling() {
        let p = PitcherRecord { era: 4.80, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Solid Regular");
    }

    #[test]
    fn batted_ball_fallback_covers_remainder() {
        let p = PitcherRecord { go_ao: 1.16, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Groundball Pitcher");

        let p = PitcherRecord { go_ao: 0.84, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Flyball Pitcher");

        let p = PitcherRecord { go_ao: 1.00, ..pitcher() };
        assert_eq!(classify_pitcher(&p).label, "Balanced Pitcher");
    }

    #[test]
    fn pitcher_classification_is_total_at_boundaries() {
        // Sweep a grid of boundary values; every combination must classify.
        for &era in &[0.0, 3.50, 4.80, 6.00, 9.99] {
            for &whip in &[0.80, 1.70] {
                for &k9 in &[0.0, 9.0, 12.0] {
                    for &bb9 in &[0.0, 2.5, 5.0] {
                        for &go_ao in &[0.0, 0.85, 1.15, 1.3, 2.0] {
                            let p = PitcherRecord {
                                era,
                                whip,
                                k_per_9: k9,
                                bb_per_9: bb9,
                                go_ao,
                                ..pitcher()
                            };
                            let verdict = classify_pitcher(&p);
                            assert!(!verdict.label.is_empty());
                        }
                    }
                }
            }
        }
    }

    // ---- Hitter priority and branches ----

    #[test]
    fn elite_bomber_scenario() {
        let h = HitterRecord {
            isop: 0.210,
            avg: 0.290,
            ..hitter()
        };
        assert_eq!(classify_hitter(&h).label, "Elite Bomber");
    }

    #[test]
    fn power_slugger_below_avg_split() {
        let h = HitterRecord {
            home_runs: 24,
            avg: 0.241,
            ..hitter()
        };
        assert_eq!(classify_hitter(&h).label, "Power Slugger");
    }

    #[test]
    fn power_at_exact_isop_boundary() {
        let h = HitterRecord { isop: 0.200, ..hitter() };
        assert_eq!(classify_hitter(&h).label, "Power Slugger");
    }

    #[test]
    fn power_beats_contact() {
        // High-average slugger satisfies both the power and contact rules.
        let h = HitterRecord {
            isop: 0.250,
            avg: 0.330,
            ..hitter()
        };
        assert_eq!(classify_hitter(&h).label, "Elite Bomber");
    }

    #[test]
    fn contact_master_needs_more_walks_than_strikeouts() {
        let h = HitterRecord {
            avg: 0.320,
            walks: 60,
            strikeouts: 45,
            ..hitter()
        };
        assert_eq!(classify_hitter(&h).label, "Contact Master");

        let h = HitterRecord {
            avg: 0.320,
            walks: 40,
            strikeouts: 80,
            ..hitter()
        };
        assert_eq!(classify_hitter(&h).label, "Table-Setter");
    }

    #[test]
    fn eagle_eye_via_either_condition() {
        let h = HitterRecord { bb_per_k: 0.80, ..hitter() };
        assert_eq!(classify_hitter(&h).label, "Eagle Eye");

        let h = HitterRecord { obp: 0.380, bb_per_k: 0.30, ..hitter() };
        assert_eq!(classify_hitter(&h).label, "Eagle Eye");
    }

    #[test]
    fn clutch_needs_risp_edge_and_rbi() {
        let h = HitterRecord {
            risp: 0.320,
            rbi: 60,
            ..hitter()
        };
        assert_eq!(classify_hitter(&h).label, "Clutch Hitter");

        // RBI exactly 50 misses the strict bar.
        let h = HitterRecord {
            risp: 0.320,
            rbi: 50,
            ..hitter()
        };
        assert_ne!(classify_hitter(&h).label, "Clutch Hitter");
    }

    #[test]
    fn production_fallback_split() {
        let h = HitterRecord { ops: 0.760, ..hitter() };
        assert_eq!(classify_hitter(&h).label, "Solid Regular");

        // Exactly 0.750 falls to the developing side.
        let h = HitterRecord { ops: 0.750, ..hitter() };
        assert_eq!(classify_hitter(&h).label, "Developing Hitter");
    }

    #[test]
    fn hitter_classification_is_total_at_boundaries() {
        for &avg in &[0.180, 0.280, 0.310, 0.350] {
            for &isop in &[0.050, 0.200] {
                for &bbk in &[0.20, 0.80] {
                    for &ops in &[0.600, 0.750, 0.900] {
                        let h = HitterRecord {
                            avg,
                            isop,
                            bb_per_k: bbk,
                            ops,
                            ..hitter()
                        };
                        let verdict = classify_hitter(&h);
                        assert!(!verdict.label.is_empty());
                    }
                }
            }
        }
    }

    // ---- Badge overlay ----

    #[test]
    fn ace_badge_for_qualified_starter() {
        let p = PitcherRecord {
            innings: 160.0,
            era: 2.95,
            ..starter()
        };
        assert_eq!(badge(&p), Some(Badge::TeamAce));
    }

    #[test]
    fn starter_short_of_innings_gets_no_badge() {
        let p = PitcherRecord {
            innings: 99.9,
            era: 2.95,
            ..starter()
        };
        assert_eq!(badge(&p), None);
    }

    #[test]
    fn setup_closer_badge_for_qualified_reliever() {
        let p = PitcherRecord {
            saves: 25,
            era: 3.10,
            ..pitcher()
        };
        assert_eq!(badge(&p), Some(Badge::SetupCloser));

        let p = PitcherRecord {
            holds: 15,
            era: 4.50,
            ..pitcher()
        };
        assert_eq!(badge(&p), Some(Badge::SetupCloser));
    }

    #[test]
    fn reliever_never_gets_ace_badge() {
        // Reliever with ace-grade numbers still only qualifies through the
        // setup/closer gate.
        let p = PitcherRecord {
            innings: 110.0,
            era: 2.50,
            saves: 0,
            holds: 0,
            ..pitcher()
        };
        assert_eq!(badge(&p), None);
    }

    // ---- Luck indicator ----

    #[test]
    fn luck_band_is_symmetric_and_exclusive() {
        assert_eq!(luck(0.260, 0.300), Luck::Lucky);
        assert_eq!(luck(0.340, 0.300), Luck::Unlucky);
        assert_eq!(luck(0.300, 0.300), Luck::Neutral);
        // Exactly at the band edge is still neutral (strict inequality).
        assert_eq!(luck(0.035, 0.0), Luck::Neutral);
        assert_eq!(luck(-0.035, 0.0), Luck::Neutral);
    }
}
