//! Roast loss calculator CLI
//!
//! Converts per-batch green charge and roasted drop weights into loss
//! metrics, classifies roast levels, aggregates across batches, and
//! accounts for cupping consumption. Session state persists between
//! invocations in a JSON key-value store.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod error;
mod session;
mod store;

pub use config::Config;

use session::SessionStore;
use shared::{compute, decode, encode, export_filename, to_number, Computation, RoastLevels};
use store::{JsonFileStore, KeyValueStore};

#[derive(Parser, Debug)]
#[command(
    name = "roast-loss",
    version,
    about = "Per-batch roast loss calculator with cupping accounting"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Deduct one cupping draw per batch with a recorded drop weight,
    /// instead of a fixed session count
    #[arg(global = true, long, default_value_t = false)]
    per_batch_cupping: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the batch table and aggregate metrics (default)
    Show,
    /// Append a batch row
    AddRow {
        /// Drop weight in grams
        #[arg(long)]
        drop: Option<String>,
        /// Agtron color reading
        #[arg(long)]
        agtron: Option<String>,
        /// Development time percentage
        #[arg(long)]
        dev_time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update fields of an existing row
    EditRow {
        id: u32,
        #[arg(long)]
        drop: Option<String>,
        #[arg(long)]
        agtron: Option<String>,
        #[arg(long)]
        dev_time: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a row by id
    RemoveRow { id: u32 },
    /// Restore a single empty row
    Reset,
    /// Update session inputs
    Set {
        /// Green charge weight in grams, shared by all rows
        #[arg(long)]
        charge: Option<String>,
        /// Grams consumed per cupping session
        #[arg(long)]
        cupping_per_session: Option<String>,
        /// Number of cupping sessions
        #[arg(long)]
        cupping_sessions: Option<String>,
        /// Target remaining weight for the charge suggestion
        #[arg(long)]
        target_remain: Option<String>,
    },
    /// Show or change roast level thresholds
    Levels {
        #[arg(long)]
        light_lo: Option<f64>,
        #[arg(long)]
        light_hi: Option<f64>,
        #[arg(long)]
        med_hi: Option<f64>,
        #[arg(long)]
        m_dark_hi: Option<f64>,
        /// Restore the default thresholds (11, 13, 15, 17)
        #[arg(long, default_value_t = false)]
        reset: bool,
    },
    /// Write the batch table as CSV
    Export {
        /// Output path; defaults to roast_loss_<today>.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replace the batch table from a CSV file
    Import { path: PathBuf },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::open(&config.storage.path);
    let mut sessions = SessionStore::load(store);
    sessions.session.per_batch_cupping = cli.per_batch_cupping;

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let computation = compute(&sessions.session);
            render(&computation, &sessions);
        }
        Commands::AddRow {
            drop,
            agtron,
            dev_time,
            notes,
        } => {
            let id = sessions.add_row(drop, agtron, dev_time, notes)?;
            info!("added row {}", id);
            render(&compute(&sessions.session), &sessions);
        }
        Commands::EditRow {
            id,
            drop,
            agtron,
            dev_time,
            notes,
        } => {
            sessions.edit_row(id, drop, agtron, dev_time, notes)?;
            render(&compute(&sessions.session), &sessions);
        }
        Commands::RemoveRow { id } => {
            sessions.remove_row(id)?;
            render(&compute(&sessions.session), &sessions);
        }
        Commands::Reset => {
            sessions.reset_rows()?;
            println!("Rows reset to a single empty batch.");
        }
        Commands::Set {
            charge,
            cupping_per_session,
            cupping_sessions,
            target_remain,
        } => {
            if let Some(v) = charge {
                sessions.set_charge(&v)?;
            }
            if let Some(v) = cupping_per_session {
                sessions.set_cupping_per_session(&v)?;
            }
            if let Some(v) = cupping_sessions {
                sessions.set_cupping_sessions(&v)?;
            }
            if let Some(v) = target_remain {
                sessions.set_target_remain(&v)?;
            }
            render(&compute(&sessions.session), &sessions);
        }
        Commands::Levels {
            light_lo,
            light_hi,
            med_hi,
            m_dark_hi,
            reset,
        } => {
            if reset {
                sessions.reset_levels()?;
            } else if light_lo.is_some()
                || light_hi.is_some()
                || med_hi.is_some()
                || m_dark_hi.is_some()
            {
                let current = sessions.session.levels;
                sessions.set_levels(RoastLevels {
                    light_lo: light_lo.unwrap_or(current.light_lo),
                    light_hi: light_hi.unwrap_or(current.light_hi),
                    med_hi: med_hi.unwrap_or(current.med_hi),
                    m_dark_hi: m_dark_hi.unwrap_or(current.m_dark_hi),
                })?;
            }
            let levels = sessions.session.levels;
            println!(
                "Roast level thresholds (loss %): light from {}, medium from {}, medium-dark from {}, dark from {}",
                levels.light_lo, levels.light_hi, levels.med_hi, levels.m_dark_hi
            );
        }
        Commands::Export { output } => {
            let computation = compute(&sessions.session);
            let path = output.unwrap_or_else(|| {
                PathBuf::from(export_filename(Local::now().date_naive()))
            });
            fs::write(&path, encode(&computation.items, computation.charge))?;
            info!("exported {} rows to {}", computation.items.len(), path.display());
            println!("Exported {} rows to {}", computation.items.len(), path.display());
        }
        Commands::Import { path } => {
            let text = fs::read_to_string(&path)?;
            let import = decode(&text);
            let count = sessions.import_rows(import)?;
            if count == 0 {
                println!("No rows found in {}; table unchanged.", path.display());
            } else {
                println!("Imported {} rows.", count);
                render(&compute(&sessions.session), &sessions);
            }
        }
    }

    Ok(())
}

/// Render the computed table and aggregates.
fn render<S: KeyValueStore>(computation: &Computation, sessions: &SessionStore<S>) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#", "Drop (g)", "Loss (g)", "Loss (%)", "Level", "Agtron", "DT (%)", "Notes",
    ]);

    for (idx, item) in computation.items.iter().enumerate() {
        // Rows without a typed drop weight show dashes, matching the form
        let has_drop = !item.source.drop_weight.trim().is_empty();
        let metric = |s: String| if has_drop { s } else { "-".to_string() };
        table.add_row(vec![
            (idx + 1).to_string(),
            item.source.drop_weight.clone(),
            metric(item.loss.to_string()),
            metric(format!("{:.2}", item.loss_percent)),
            metric(format!("{} {}", item.level, item.level.label_ko())),
            item.source.agtron.clone().unwrap_or_default(),
            item.source.dev_time.clone().unwrap_or_default(),
            item.source.notes.clone().unwrap_or_default(),
        ]);
    }
    println!("{table}");

    let agg = &computation.aggregates;
    println!(
        "Charge: {} g | Total drop: {} g | Avg drop: {} g | Avg loss: {:.2}%",
        computation.charge, agg.total_drop, agg.avg_drop, agg.avg_loss_percent
    );
    println!(
        "Cupping total: {} g | Remaining after cupping: {} g",
        agg.total_cupping, agg.remain_after_cupping
    );
    println!(
        "Suggested charge for {} g remaining: {} g",
        to_number(&sessions.session.target_remain),
        agg.suggested_charge
    );
}
