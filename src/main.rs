// Scouting report CLI.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so report output stays clean on stdout)
// 2. Parse arguments
// 3. Load config
// 4. Load the season table for the requested player kind
// 5. Build one report and print it
//
// Usage:
//   kbo-scout pitcher <team> <name> [--all]
//   kbo-scout hitter <team> <name> [--all | --regulars]

use kbo_scout::config;
use kbo_scout::records;
use kbo_scout::scouting::cohort::{HitterGrouping, PitcherGrouping};
use kbo_scout::scouting::report::{
    hitter_report, pitcher_report, HitterReport, PitcherReport,
};
use kbo_scout::scouting::similarity::SimilarityOutcome;

use anyhow::{bail, Context};
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (kind, team, name, flag) = match args.as_slice() {
        [kind, team, name] => (kind.as_str(), team.as_str(), name.as_str(), None),
        [kind, team, name, flag] => (kind.as_str(), team.as_str(), name.as_str(), Some(flag.as_str())),
        _ => {
            bail!(
                "usage: kbo-scout (pitcher|hitter) <team> <name> [--all | --regulars]"
            );
        }
    };

    let config = config::load_config().context("failed to load configuration")?;

    match kind {
        "pitcher" => {
            let grouping = match flag {
                Some("--all") => PitcherGrouping::AllPitchers,
                None => PitcherGrouping::SameRole,
                Some(other) => bail!("unknown flag for pitcher reports: {other}"),
            };
            let table = records::load_pitchers_from_path(Path::new(&config.data_paths.pitchers))
                .context("failed to load pitcher table")?;
            info!("loaded {} pitcher records", table.len());

            let report = pitcher_report(&table, team, name, grouping, &config.cohort)
                .context("failed to build pitcher report")?;
            print_pitcher_report(&report);
        }
        "hitter" => {
            let grouping = match flag {
                Some("--all") => Some(HitterGrouping::AllHitters),
                Some("--regulars") => Some(HitterGrouping::Regulars),
                None => None,
                Some(other) => bail!("unknown flag for hitter reports: {other}"),
            };
            let table = records::load_hitters_from_path(Path::new(&config.data_paths.hitters))
                .context("failed to load hitter table")?;
            info!("loaded {} hitter records", table.len());

            let report = hitter_report(&table, team, name, grouping, &config.cohort)
                .context("failed to build hitter report")?;
            print_hitter_report(&report);
        }
        other => bail!("unknown report kind '{other}' (expected pitcher or hitter)"),
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kbo_scout=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // A second invocation in the same process keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

// ---------------------------------------------------------------------------
// Plain-text rendering
// ---------------------------------------------------------------------------

fn fmt_pct(p: Option<f64>) -> String {
    match p {
        Some(p) => format!("{p:.0}%"),
        None => "-".into(),
    }
}

fn fmt_rank(rank: Option<usize>, total: usize) -> String {
    match rank {
        Some(r) => format!("#{r}/{total}"),
        None => "-".into(),
    }
}

fn print_pitcher_report(report: &PitcherReport) {
    let p = &report.player;
    let n = report.cohort_size;

    print!("\u{26BE} {} Scouting Report", p.display_name);
    if let Some(badge) = report.badge {
        print!("  [{}]", badge.label());
    }
    println!();
    println!("Team: {} | Role: {}", p.team, p.role.label());
    println!();

    println!(
        "ERA {:.2} ({})  WHIP {:.2} ({})  Record {}W-{}L  SO {} ({})  OPS {:.3} ({})",
        p.era,
        fmt_rank(report.ranks.era, n),
        p.whip,
        fmt_rank(report.ranks.whip, n),
        p.wins,
        p.losses,
        p.strikeouts,
        fmt_rank(report.ranks.strikeouts, n),
        p.ops_against,
        fmt_rank(report.ranks.ops_against, n),
    );
    println!();

    println!("Capability radar (percentile vs {} pitchers):", n);
    println!(
        "  ERA {}  WHIP {}  K/9 {}  BB/9 {}  OPS {}  IP {}",
        fmt_pct(report.radar.era),
        fmt_pct(report.radar.whip),
        fmt_pct(report.radar.k_per_9),
        fmt_pct(report.radar.bb_per_9),
        fmt_pct(report.radar.ops_against),
        fmt_pct(report.radar.innings),
    );
    println!();

    println!("{} {}", report.style.icon, report.style.label);
    println!("  {}", report.style.rationale);
    match (report.luck, report.cohort_mean_babip) {
        (Some(luck), Some(mean)) => {
            println!(
                "  BABIP analysis: {} (BABIP {:.3} vs group avg {:.3})",
                luck.label(),
                p.babip_against,
                mean
            );
        }
        _ => println!("  BABIP analysis: -"),
    }
    println!();

    println!("Similar pitchers:");
    match &report.similar {
        SimilarityOutcome::Ranked(neighbors) => {
            for neighbor in neighbors {
                println!(
                    "  {} ({})  ERA {:.2}  distance {:.3}",
                    neighbor.display_name, neighbor.team, neighbor.era, neighbor.distance
                );
            }
        }
        SimilarityOutcome::InsufficientData => {
            println!("  insufficient data in the selected comparison group");
        }
    }
}

fn print_hitter_report(report: &HitterReport) {
    let h = &report.player;
    let n = report.cohort_size;

    println!("\u{26BE} {} Scouting Report", h.display_name);
    println!(
        "Team: {} | PA: {} (AVG {:.3})",
        h.team, h.plate_appearances, h.avg
    );
    println!();

    println!(
        "AVG {:.3} ({})  HR {} ({})  RBI {} ({})  OPS {:.3} ({})  GPA {:.3} ({})",
        h.avg,
        fmt_rank(report.ranks.avg, n),
        h.home_runs,
        fmt_rank(report.ranks.home_runs, n),
        h.rbi,
        fmt_rank(report.ranks.rbi, n),
        h.ops,
        fmt_rank(report.ranks.ops, n),
        h.gpa,
        fmt_rank(report.ranks.gpa, n),
    );
    println!();

    println!("Five-tool radar (percentile vs {} hitters):", n);
    println!(
        "  Contact {}  Power {}  Eye {}  Clutch {}  Value {}",
        fmt_pct(report.radar.avg),
        fmt_pct(report.radar.isop),
        fmt_pct(report.radar.bb_per_k),
        fmt_pct(report.radar.risp),
        fmt_pct(report.radar.gpa),
    );
    println!();

    println!("{} {}", report.style.icon, report.style.label);
    println!("  {}", report.style.rationale);
    println!();

    println!("Similar hitters:");
    match &report.similar {
        SimilarityOutcome::Ranked(neighbors) => {
            for neighbor in neighbors {
                println!(
                    "  {} ({})  OPS {:.3}  distance {:.3}",
                    neighbor.display_name, neighbor.team, neighbor.ops, neighbor.distance
                );
            }
        }
        SimilarityOutcome::InsufficientData => {
            println!("  insufficient data in the selected comparison group");
        }
    }
}
