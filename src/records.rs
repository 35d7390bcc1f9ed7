// Season record loading and normalization.
//
// Reads the KBO season-stat CSV exports: one file for pitchers, one for
// hitters. The source encodes innings pitched as mixed fractions ("156 2/3")
// and uses "-" as a no-data placeholder in rate columns, so every stat field
// is read as text and coerced leniently. A field that cannot be coerced is
// fixed at 0.0 (never a missing-value marker) and logged, so downstream math
// never sees a hole but data-quality regressions stay visible.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Whether a pitcher worked primarily as a starter or out of the bullpen.
/// Computed once at load time from G/GS, not recomputed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Starter,
    Reliever,
}

impl Role {
    /// Starter iff more than half of the appearances were starts.
    /// Zero appearances classifies as reliever.
    pub fn classify(games: u32, games_started: u32) -> Role {
        if games > 0 && (games_started as f64) > (games as f64) / 2.0 {
            Role::Starter
        } else {
            Role::Reliever
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Starter => "Starter",
            Role::Reliever => "Reliever",
        }
    }
}

/// One pitcher's season line, fully coerced to numeric fields.
#[derive(Debug, Clone)]
pub struct PitcherRecord {
    pub team: String,
    pub name: String,
    /// Name with a short player-id suffix appended when (team, name) is
    /// duplicated in the dataset; equals `name` otherwise.
    pub display_name: String,
    pub games: u32,
    pub games_started: u32,
    pub wins: u32,
    pub losses: u32,
    pub saves: u32,
    pub holds: u32,
    /// Innings pitched as a rational value (e.g. "156 2/3" -> 156.667).
    pub innings: f64,
    pub era: f64,
    pub whip: f64,
    pub strikeouts: u32,
    pub walks: u32,
    pub k_per_9: f64,
    pub bb_per_9: f64,
    pub go_ao: f64,
    pub ops_against: f64,
    pub babip_against: f64,
    pub role: Role,
}

/// One hitter's season line, fully coerced to numeric fields.
#[derive(Debug, Clone)]
pub struct HitterRecord {
    pub team: String,
    pub name: String,
    pub display_name: String,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub avg: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
    /// Isolated power: SLG minus AVG.
    pub isop: f64,
    pub bb_per_k: f64,
    /// Batting average with runners in scoring position.
    pub risp: f64,
    /// Gross production average, a weighted OBP/SLG composite.
    pub gpa: f64,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV serde structs (private)
// ---------------------------------------------------------------------------

/// Raw pitcher CSV row. Every stat column is read as text because the source
/// mixes numerals, mixed fractions, and "-" placeholders. Extra columns are
/// absorbed via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawPitcherRow {
    Team: String,
    Name: String,
    /// Stable secondary identifier; used only for duplicate-name display.
    #[serde(default)]
    PlayerId: String,
    G: String,
    #[serde(default)]
    GS: String,
    W: String,
    L: String,
    SV: String,
    #[serde(alias = "HD")]
    HLD: String,
    IP: String,
    ERA: String,
    WHIP: String,
    #[serde(alias = "K")]
    SO: String,
    BB: String,
    #[serde(rename = "K/9")]
    K9: String,
    #[serde(rename = "BB/9")]
    BB9: String,
    #[serde(rename = "GO/AO")]
    GOAO: String,
    OPS: String,
    BABIP: String,
    /// Absorb any extra columns the export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

/// Raw hitter CSV row. Same lenient-text policy as the pitcher rows.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawHitterRow {
    Team: String,
    Name: String,
    #[serde(default)]
    PlayerId: String,
    PA: String,
    AB: String,
    H: String,
    HR: String,
    RBI: String,
    BB: String,
    SO: String,
    #[serde(alias = "BA")]
    AVG: String,
    OBP: String,
    SLG: String,
    OPS: String,
    #[serde(alias = "ISO")]
    ISOP: String,
    #[serde(rename = "BB/K")]
    BBK: String,
    RISP: String,
    GPA: String,
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Lenient numeric parsing
// ---------------------------------------------------------------------------

/// Parse an innings-pitched string into a rational value.
///
/// Accepts a mixed number ("156 2/3"), a bare fraction ("2/3"), or a plain
/// decimal/integer ("7", "62.0"). Returns `None` for malformed text or a
/// zero/garbage denominator; the loader substitutes 0.0 in that case.
pub fn parse_innings(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let value = if let Some((whole, frac)) = raw.split_once(' ') {
        let whole: f64 = whole.parse().ok()?;
        whole + parse_fraction(frac)?
    } else if raw.contains('/') {
        parse_fraction(raw)?
    } else {
        raw.parse().ok()?
    };
    value.is_finite().then_some(value)
}

fn parse_fraction(raw: &str) -> Option<f64> {
    let (num, den) = raw.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let den: f64 = den.trim().parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}

/// Parse a single stat value. `"-"` is the source's no-data placeholder and
/// maps to 0.0 by policy; anything else must parse as a finite float.
pub fn parse_stat(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw == "-" {
        return Some(0.0);
    }
    let value: f64 = raw.parse().ok()?;
    value.is_finite().then_some(value)
}

fn stat_or_zero(player: &str, field: &str, raw: &str) -> f64 {
    parse_stat(raw).unwrap_or_else(|| {
        warn!("'{player}': unparseable {field} value '{raw}', substituting 0.0");
        0.0
    })
}

fn count_or_zero(player: &str, field: &str, raw: &str) -> u32 {
    stat_or_zero(player, field, raw).round() as u32
}

fn innings_or_zero(player: &str, raw: &str) -> f64 {
    parse_innings(raw).unwrap_or_else(|| {
        warn!("'{player}': unparseable IP value '{raw}', substituting 0.0");
        0.0
    })
}

// ---------------------------------------------------------------------------
// Duplicate-name disambiguation
// ---------------------------------------------------------------------------

/// Derive display names for a list of (team, name) keys with parallel player
/// ids. Rows whose (team, name) appears more than once and that carry an id
/// get a short id suffix appended; everything else keeps the raw name.
fn display_names(keys: &[(String, String)], ids: &[String]) -> Vec<String> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for (team, name) in keys {
        *counts.entry((team.as_str(), name.as_str())).or_default() += 1;
    }

    keys.iter()
        .zip(ids)
        .map(|((team, name), id)| {
            let duplicated = counts[&(team.as_str(), name.as_str())] > 1;
            if duplicated && !id.is_empty() {
                format!("{} ({})", name, short_suffix(id))
            } else {
                name.clone()
            }
        })
        .collect()
}

/// Last four characters of a player id.
fn short_suffix(id: &str) -> String {
    let len = id.chars().count();
    id.chars().skip(len.saturating_sub(4)).collect()
}

// ---------------------------------------------------------------------------
// Reader-based loaders
// ---------------------------------------------------------------------------

/// Load pitcher records from CSV text. A header missing a required column
/// fails the whole load; a malformed value inside a row does not.
pub fn load_pitchers<R: Read>(rdr: R) -> Result<Vec<PitcherRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut records = Vec::new();
    let mut keys = Vec::new();
    let mut ids = Vec::new();

    for result in reader.deserialize::<RawPitcherRow>() {
        let raw = result?;
        let name = raw.Name.trim().to_string();
        let team = raw.Team.trim().to_string();

        let games = count_or_zero(&name, "G", &raw.G);
        let games_started = count_or_zero(&name, "GS", &raw.GS);

        records.push(PitcherRecord {
            display_name: name.clone(),
            games,
            games_started,
            wins: count_or_zero(&name, "W", &raw.W),
            losses: count_or_zero(&name, "L", &raw.L),
            saves: count_or_zero(&name, "SV", &raw.SV),
            holds: count_or_zero(&name, "HLD", &raw.HLD),
            innings: innings_or_zero(&name, &raw.IP),
            era: stat_or_zero(&name, "ERA", &raw.ERA),
            whip: stat_or_zero(&name, "WHIP", &raw.WHIP),
            strikeouts: count_or_zero(&name, "SO", &raw.SO),
            walks: count_or_zero(&name, "BB", &raw.BB),
            k_per_9: stat_or_zero(&name, "K/9", &raw.K9),
            bb_per_9: stat_or_zero(&name, "BB/9", &raw.BB9),
            go_ao: stat_or_zero(&name, "GO/AO", &raw.GOAO),
            ops_against: stat_or_zero(&name, "OPS", &raw.OPS),
            babip_against: stat_or_zero(&name, "BABIP", &raw.BABIP),
            role: Role::classify(games, games_started),
            team: team.clone(),
            name: name.clone(),
        });
        keys.push((team, name));
        ids.push(raw.PlayerId.trim().to_string());
    }

    for (record, display) in records.iter_mut().zip(display_names(&keys, &ids)) {
        record.display_name = display;
    }

    Ok(records)
}

/// Load hitter records from CSV text. Same contract as [`load_pitchers`].
pub fn load_hitters<R: Read>(rdr: R) -> Result<Vec<HitterRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut records = Vec::new();
    let mut keys = Vec::new();
    let mut ids = Vec::new();

    for result in reader.deserialize::<RawHitterRow>() {
        let raw = result?;
        let name = raw.Name.trim().to_string();
        let team = raw.Team.trim().to_string();

        records.push(HitterRecord {
            display_name: name.clone(),
            plate_appearances: count_or_zero(&name, "PA", &raw.PA),
            at_bats: count_or_zero(&name, "AB", &raw.AB),
            hits: count_or_zero(&name, "H", &raw.H),
            home_runs: count_or_zero(&name, "HR", &raw.HR),
            rbi: count_or_zero(&name, "RBI", &raw.RBI),
            walks: count_or_zero(&name, "BB", &raw.BB),
            strikeouts: count_or_zero(&name, "SO", &raw.SO),
            avg: stat_or_zero(&name, "AVG", &raw.AVG),
            obp: stat_or_zero(&name, "OBP", &raw.OBP),
            slg: stat_or_zero(&name, "SLG", &raw.SLG),
            ops: stat_or_zero(&name, "OPS", &raw.OPS),
            isop: stat_or_zero(&name, "ISOP", &raw.ISOP),
            bb_per_k: stat_or_zero(&name, "BB/K", &raw.BBK),
            risp: stat_or_zero(&name, "RISP", &raw.RISP),
            gpa: stat_or_zero(&name, "GPA", &raw.GPA),
            team: team.clone(),
            name: name.clone(),
        });
        keys.push((team, name));
        ids.push(raw.PlayerId.trim().to_string());
    }

    for (record, display) in records.iter_mut().zip(display_names(&keys, &ids)) {
        record.display_name = display;
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load pitcher records from a CSV file. A file that yields zero records is
/// an error: the engine initializes all-or-nothing, never from a partial or
/// empty table.
pub fn load_pitchers_from_path(path: &Path) -> Result<Vec<PitcherRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = load_pitchers(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if records.is_empty() {
        return Err(LoadError::Validation(format!(
            "pitcher CSV {} produced zero rows",
            path.display()
        )));
    }
    Ok(records)
}

/// Load hitter records from a CSV file. Same contract as
/// [`load_pitchers_from_path`].
pub fn load_hitters_from_path(path: &Path) -> Result<Vec<HitterRecord>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let records = load_hitters(file).map_err(|e| LoadError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    if records.is_empty() {
        return Err(LoadError::Validation(format!(
            "hitter CSV {} produced zero rows",
            path.display()
        )));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
