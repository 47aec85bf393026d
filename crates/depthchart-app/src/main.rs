// Depth chart command line entry point.
//
// Startup sequence:
// 1. Parse arguments, initialize tracing (stderr, stdout is for the chart)
// 2. Load and validate config, apply command line overrides
// 3. Answer --list-formations without touching the roster
// 4. Load the roster export
// 5. Answer --list-teams, or resolve the team to chart
// 6. Score, assign and print the chart

use std::path::Path;

use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use depthchart_app::cli::Cli;
use depthchart_app::pipeline;
use depthchart_app::report::{self, ReportOptions};
use depthchart_core::config::{self, OutputFormat};
use depthchart_football::formation;
use depthchart_football::roster;
use depthchart_football::scoring::RoleScoreCache;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Arguments and tracing
    let cli = Cli::parse();
    init_tracing()?;

    // 2. Config
    let mut config = match &cli.config_dir {
        Some(dir) => config::load_config_in(dir),
        None => config::load_config(),
    }
    .context("failed to load configuration")?;
    config::validate_formation_key(&config, formation::is_known)
        .context("invalid configuration")?;
    cli.apply_overrides(&mut config);
    info!(
        "Config loaded: formation={}, fallback={:?}, min_minutes={}",
        config.assignment.default_formation, config.assignment.fallback, config.scoring.min_minutes
    );

    // 3. Formation catalog
    if cli.list_formations {
        for key in formation::keys() {
            println!("{key}");
        }
        return Ok(());
    }

    // 4. Roster
    let roster_path = Path::new(&config.data.roster);
    let roster = roster::load_roster(roster_path)
        .with_context(|| format!("failed to load roster {}", roster_path.display()))?;

    // 5. Team selection
    if cli.list_teams {
        let leagues = roster.leagues();
        if leagues.is_empty() {
            for team in roster.teams(None) {
                println!("{team}");
            }
        }
        for league in leagues {
            println!("{league}");
            for team in roster.teams(Some(&league)) {
                println!("  {team}");
            }
        }
        return Ok(());
    }
    let selection = pipeline::select_team(&roster, cli.team.as_deref(), cli.league.as_deref())
        .context("failed to select a team")?;

    // 6. Chart
    let mut cache = RoleScoreCache::new();
    let chart = pipeline::build_chart(
        &mut cache,
        &config,
        &roster,
        &selection,
        cli.formation.as_deref(),
    );
    let opts = ReportOptions::new(&config.output, &roster, chrono::Local::now().year());
    match config.output.format {
        OutputFormat::Text => print!("{}", report::render_text(&chart, &selection, &opts)),
        OutputFormat::Json => {
            let json = report::render_json(&chart, &selection, &opts)
                .context("failed to serialize depth chart")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Initialize tracing to stderr so JSON on stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("depthchart=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
