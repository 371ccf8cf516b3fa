// ==========================================
// 手术室需求与产能规划 - 命令行入口
// ==========================================
// 子命令: run (导入 + 测算 + 导出), template (生成情景模板)
// ==========================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use theatre_capacity::app::AppState;
use theatre_capacity::config::{ConfigManager, ScenarioConfig};
use theatre_capacity::report::{render_report, SummaryRecord};
use theatre_capacity::{i18n, logging};

#[derive(Parser)]
#[command(name = "theatre-capacity")]
#[command(version, about = "Operating-theatre demand, capacity and waiting-list planner")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a planning scenario against a procedure table
    Run {
        /// Procedure table (.csv, .xlsx or .xls)
        #[arg(long)]
        procedures: PathBuf,
        /// Scenario JSON (defaults come from the config file)
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Config JSON (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Seed for the capacity fill simulation
        #[arg(long)]
        seed: Option<u64>,
        /// Write the summary record as CSV
        #[arg(long)]
        summary_csv: Option<PathBuf>,
        /// Write the waterfall rows as JSON
        #[arg(long)]
        waterfall_json: Option<PathBuf>,
        /// Report language (en or zh-CN)
        #[arg(long)]
        locale: Option<String>,
    },
    /// Write a scenario template populated from defaults
    Template {
        /// Output path for the scenario JSON
        #[arg(long)]
        output: PathBuf,
        /// Config JSON (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<ConfigManager> {
    match path {
        Some(path) => ConfigManager::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => ConfigManager::load_default().context("failed to load default config"),
    }
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid scenario {}", path.display()))
}

fn run(
    procedures: &Path,
    scenario: Option<&Path>,
    config: Option<&Path>,
    seed: Option<u64>,
    summary_csv: Option<&Path>,
    waterfall_json: Option<&Path>,
    locale: Option<&str>,
) -> Result<()> {
    let config_manager = load_config(config)?;

    let locale = locale
        .map(str::to_string)
        .unwrap_or_else(|| config_manager.get_locale());
    if !i18n::is_supported(&locale) {
        bail!("unsupported locale: {}", locale);
    }
    i18n::set_locale(&locale);

    let state = AppState::new(config_manager);
    let api = state.planning_api.clone();
    let mut scenario = match scenario {
        Some(path) => load_scenario(path)?,
        None => api.default_scenario()?,
    };
    if seed.is_some() {
        scenario.rng_seed = seed;
    }

    let import_summary = state
        .upload_procedures(procedures)
        .with_context(|| format!("failed to import {}", procedures.display()))?;
    tracing::info!(
        batch_id = %import_summary.batch_id,
        rows = import_summary.rows_imported,
        "procedures imported"
    );

    let records = state.snapshot_procedures()?;
    let report = api
        .run_scenario(records, &scenario)
        .context("planning run failed")?;

    print!("{}", render_report(&report));

    match summary_csv {
        Some(path) => {
            api.export_summary(&report, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            let summary = SummaryRecord::from_report(&report);
            tracing::debug!(?summary, "summary record");
        }
    }
    if let Some(path) = waterfall_json {
        api.export_waterfall(&report, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn template(output: &Path, config: Option<&Path>) -> Result<()> {
    let config_manager = load_config(config)?;
    let scenario = config_manager
        .default_scenario()
        .context("invalid config values")?;
    let json = serde_json::to_string_pretty(&scenario)?;
    fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::debug!(version = theatre_capacity::VERSION, "{}", theatre_capacity::APP_NAME);

    match cli.command {
        Commands::Run {
            procedures,
            scenario,
            config,
            seed,
            summary_csv,
            waterfall_json,
            locale,
        } => run(
            &procedures,
            scenario.as_deref(),
            config.as_deref(),
            seed,
            summary_csv.as_deref(),
            waterfall_json.as_deref(),
            locale.as_deref(),
        ),
        Commands::Template { output, config } => template(&output, config.as_deref()),
    }
}
