//! CLI entry point for the socroi calculator.
//!
//! Keeps a single user's last inputs in a state file, applies edits through
//! the derivation engine, and prints the cost comparison as text or JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use socroi_core::config::store_path;
use socroi_core::{BaseInputs, EngineConfig, FieldValue, InputRecord};
use socroi_engine::{report, RoiEngine};
use socroi_store::{load_or_default, FileStateStore, StateStore, StoredState, ViewMode};

#[derive(Parser)]
#[command(name = "socroi")]
#[command(about = "Autonomous SOC vs. human SOC cost and value estimator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: socroi).
    #[arg(short, long, default_value = "socroi", global = true)]
    config: String,

    /// State file path (overrides store.path from config).
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,
}

#[derive(Subcommand)]
enum Command {
    /// Show results for the stored inputs (or defaults).
    Show,
    /// Apply one or more `field=value` edits in order and save the inputs.
    Set {
        #[arg(required = true, value_name = "FIELD=VALUE")]
        edits: Vec<String>,
    },
    /// Evaluate base inputs read as JSON from stdin, without saving.
    Compute,
    /// Switch between simple and advanced output.
    View {
        mode: ViewMode,
    },
    /// Forget the stored inputs.
    Reset,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let engine = RoiEngine::new(EngineConfig::load(&cli.config)?)?;
    let store = FileStateStore::new(resolve_state_path(&cli)?);

    match cli.command {
        Command::Show => {
            let state = load_or_default(&store);
            let record = engine.calculate_computed_fields(&state.inputs);
            print_report(&engine, &record, state.view_mode, cli.format)?;
        }
        Command::Set { ref edits } => {
            let state = load_or_default(&store);
            let mut record = engine.calculate_computed_fields(&state.inputs);
            for edit in edits {
                let (field, value) = FieldValue::parse_edit(edit)?;
                record = engine.derive_fields(&record, field, value)?;
            }

            let saved = StoredState::new(record.base(), state.view_mode).seal();
            store.save(&saved)?;
            tracing::info!(snapshot_id = %saved.id, edits = edits.len(), "Inputs saved");

            print_report(&engine, &record, state.view_mode, cli.format)?;
        }
        Command::Compute => {
            let input = std::io::read_to_string(std::io::stdin())?;
            let base: BaseInputs = serde_json::from_str(&input)?;
            let record = engine.calculate_computed_fields(&base);
            let evaluation = engine.evaluate(&record);
            println!(
                "{}",
                report::render_json(&record, &evaluation, ViewMode::Advanced)?
            );
        }
        Command::View { mode } => {
            let state = load_or_default(&store);
            let saved = StoredState::new(state.inputs, mode).seal();
            store.save(&saved)?;
            tracing::info!(view_mode = ?mode, "View mode saved");
        }
        Command::Reset => {
            store.clear()?;
            tracing::info!(path = %store.path().display(), "Stored inputs cleared");
        }
    }

    Ok(())
}

fn print_report(
    engine: &RoiEngine,
    record: &InputRecord,
    view_mode: ViewMode,
    format: Format,
) -> anyhow::Result<()> {
    let evaluation = engine.evaluate(record);
    match format {
        Format::Text => print!("{}", report::render_text(record, &evaluation, view_mode)),
        Format::Json => println!("{}", report::render_json(record, &evaluation, view_mode)?),
    }
    Ok(())
}

fn resolve_state_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = &cli.state {
        return Ok(path.clone());
    }
    let configured = store_path(&cli.config)?;
    Ok(configured.unwrap_or_else(|| PathBuf::from("./socroi-state.json")))
}
