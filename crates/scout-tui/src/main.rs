// FFCV scout entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the dataset (first existing candidate)
// 4. Build the team catalog and a session with the configured threshold
// 5. Either print a text report or run the TUI until the user quits

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};

use scout_core::catalog::TeamCatalog;
use scout_core::config;
use scout_core::dataset::DatasetLoader;
use scout_core::report::TextPresenter;
use scout_core::session::Session;
use scout_tui::tui::{self, ExportSettings, ViewState};

#[derive(Debug, clap::Parser, Clone)]
#[command(name = "ffcv-scout", about = "Panel de scouting de la liga FFCV")]
struct Args {
    /// dataset to load before the configured candidates
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// minimum minutes played (defaults to the configured threshold)
    #[arg(long)]
    min_minutes: Option<u32>,

    /// team to select on startup
    #[arg(long)]
    team: Option<String>,

    /// player to select within the team
    #[arg(long)]
    player: Option<String>,

    /// print the selection as text instead of starting the dashboard
    #[arg(long)]
    report: bool,
}

impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.player.is_some() && self.team.is_none() {
            bail!("--player requires --team");
        }
        if self.report && self.team.is_none() {
            bail!("--report requires --team");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.validate()?;

    // 1. Initialize tracing
    init_tracing()?;
    info!("ffcv-scout starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;

    // 3. Load the dataset
    let mut candidates: Vec<PathBuf> = args.dataset.iter().cloned().collect();
    candidates.extend(config.dataset_candidates(&cwd));
    let loader = DatasetLoader::new(candidates).with_delimiter(config.delimiter());
    let dataset = match loader.load() {
        Ok(table) => table,
        Err(e) => {
            error!("dataset unavailable: {}", e);
            return Err(anyhow::Error::new(e).context("failed to load dataset"));
        }
    };
    info!("Loaded {} player rows", dataset.len());

    // 4. Catalog and session
    let catalog = TeamCatalog::league().with_overrides(&config.teams);
    let min_minutes = args.min_minutes.unwrap_or(config.filters.default_min_minutes);
    let mut session = Session::new(dataset, min_minutes);
    if let Some(team) = &args.team {
        session.select_team(team);
    }
    if let Some(player) = &args.player {
        session
            .select_player(player)
            .with_context(|| format!("cannot select player '{}'", player))?;
    }

    // 5. Report or dashboard
    if args.report {
        let mut text = TextPresenter::new();
        session.view().present(&mut text);
        print!("{}", text.as_str());
        return Ok(());
    }

    let view_state = ViewState::new(
        session,
        &catalog,
        config.ui.team_grid_columns,
        config.filters.minutes_step,
    );
    let export = ExportSettings {
        dir: cwd.join(&config.export.dir),
        delimiter: config.delimiter(),
    };
    tui::run(view_state, export).await.context("TUI error")?;

    info!("ffcv-scout shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("ffcv-scout.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("ffcv_scout=info,scout_core=info,scout_tui=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
