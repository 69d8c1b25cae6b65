//! Procura reconciliation CLI
//!
//! Evaluates receipt drafts against order snapshots and prorates totals.

mod snapshot;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use procura_core::ReconciliationError;
use procura_core::allocation::{Allocator, CostCodeLine, HoldbackBreakdown, ProrationItem};
use procura_core::fulfillment::{DraftReturnLine, Lifecycle, ReceiptRecord};
use procura_core::repository::CachedRepository;
use procura_core::service::{ReceiptEvaluation, ReconciliationService, StatusRefresh};
use procura_core::shortfall::OverReceivedError;
use procura_shared::types::NoteId;
use procura_shared::{AppConfig, AppError};

use snapshot::{Snapshot, read_json};

#[derive(Parser)]
#[command(name = "procura", about = "Procurement fulfillment reconciliation", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a receipt draft against an order snapshot and refresh its status
    Reconcile {
        #[arg(help = "Order snapshot (JSON)")]
        snapshot: PathBuf,
        #[arg(long, help = "Receipt note being edited; its stored lines are excluded")]
        note: Option<NoteId>,
        #[arg(long, help = "Keep the order open even if every line is received")]
        partial: bool,
    },
    /// Prorate a total across weighted items
    Prorate {
        #[arg(help = "Items (JSON array of {id, subtotal})")]
        items: PathBuf,
        #[arg(long, help = "Total to allocate")]
        total: Decimal,
        #[arg(long, help = "Round to this many decimal places with the largest remainder method")]
        scale: Option<u32>,
    },
    /// Break a holdback release down per cost code
    Holdback {
        #[arg(help = "Cost code lines (JSON array of {cost_code, subtotal})")]
        lines: PathBuf,
        #[arg(long, help = "Total withheld")]
        holdback: Decimal,
        #[arg(long, help = "Amount released")]
        release: Decimal,
    },
}

#[derive(Serialize)]
struct ReconcileReport {
    evaluation: ReceiptEvaluation,
    suggested_returns: Vec<DraftReturnLine>,
    status_refresh: Option<StatusRefresh>,
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "procura=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            let err = into_app_error(err);
            error!(code = err.error_code(), "{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Maps a failed command onto the application error taxonomy.
///
/// Domain errors keep their own mapping; anything else is unreadable input.
fn into_app_error(err: anyhow::Error) -> AppError {
    let err = match err.downcast::<AppError>() {
        Ok(app) => return app,
        Err(err) => err,
    };
    match err.downcast::<ReconciliationError>() {
        Ok(domain) => domain.into(),
        Err(err) => AppError::Validation(format!("{err:#}")),
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load().map_err(AppError::from)?;

    match cli.command {
        Commands::Reconcile {
            snapshot,
            note,
            partial,
        } => reconcile(&config, &snapshot, note, partial),
        Commands::Prorate {
            items,
            total,
            scale,
        } => prorate(&config, &items, total, scale),
        Commands::Holdback {
            lines,
            holdback,
            release,
        } => holdback_breakdown(&config, &lines, holdback, release),
    }
}

fn reconcile(
    config: &AppConfig,
    path: &Path,
    note: Option<NoteId>,
    partial: bool,
) -> Result<ExitCode> {
    let snapshot: Snapshot = read_json(path)?;
    let loaded = snapshot.load()?;
    let order = loaded.order;

    let repository = CachedRepository::new(loaded.repository, &config.cache);
    let service = ReconciliationService::new(repository, config.reconciliation.clone());

    let evaluation = service.evaluate_receipt(&order, &loaded.draft, note)?;
    if !evaluation.can_save() {
        let report = ReconcileReport {
            suggested_returns: Vec::new(),
            evaluation,
            status_refresh: None,
        };
        print_json(&report)?;
        let err = AppError::from(OverReceivedError {
            lines: report.evaluation.over_received,
        });
        error!(order = %order, code = err.error_code(), "{err}");
        return Ok(ExitCode::from(err.exit_code()));
    }

    // Commit the draft, then refresh the status from post-save history
    let note = note.unwrap_or_default();
    let stored = service.repository().inner();
    let replaced = stored.retire_receipt_note(&order, note);
    for line in &loaded.draft {
        stored.record_receipt(ReceiptRecord {
            note: Some(note),
            order,
            item: line.item.clone(),
            received_quantity: line.received_quantity,
            lifecycle: Lifecycle::Active,
        });
    }
    info!(
        order = %order,
        note = %note,
        lines = loaded.draft.len(),
        replaced,
        "Receipt draft saved"
    );

    let status_refresh = service.refresh_status(&order, loaded.note_corporation, partial);
    let report = ReconcileReport {
        suggested_returns: evaluation.suggested_returns(),
        evaluation,
        status_refresh: Some(status_refresh),
    };
    print_json(&report)?;

    Ok(ExitCode::SUCCESS)
}

fn prorate(
    config: &AppConfig,
    path: &Path,
    total: Decimal,
    scale: Option<u32>,
) -> Result<ExitCode> {
    let items: Vec<ProrationItem> = read_json(path)?;
    let allocations = match scale {
        Some(scale) => Allocator::allocate_rounded(&items, total, scale),
        None => Allocator::allocate_with(
            config.reconciliation.proration,
            config.reconciliation.amount_scale,
            &items,
            total,
        ),
    };

    match allocations {
        Some(allocations) => print_json(&allocations)?,
        None => {
            info!(
                items = items.len(),
                "Subtotals do not sum to a positive base, nothing allocated"
            );
            print_json(&items)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn holdback_breakdown(
    config: &AppConfig,
    path: &Path,
    holdback: Decimal,
    release: Decimal,
) -> Result<ExitCode> {
    let lines: Vec<CostCodeLine> = read_json(path)?;
    let breakdown = HoldbackBreakdown::compute_with(
        config.reconciliation.proration,
        config.reconciliation.amount_scale,
        &lines,
        holdback,
        release,
    )?;
    print_json(&breakdown)?;
    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
