// Scouting engine: cohort selection, percentiles, style, similarity, reports.

pub mod cohort;
pub mod percentile;
pub mod report;
pub mod similarity;
pub mod style;
