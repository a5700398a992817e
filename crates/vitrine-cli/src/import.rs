//! The product import command.
//!
//! Resolves the run, reads and transforms the report, then writes products
//! to the store batch by batch, printing progress and a final summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use vitrine_core::{load_app_config, resolve_run_config, AppConfig, RunArgs, RunConfig};
use vitrine_ingest::{read_table, transform_rows};
use vitrine_store::{write_batches, BatchResult, ImportSummary, StoreClient, BATCH_SIZE};

/// Command-line surface of `vitrine-import`.
#[derive(Debug, Parser)]
#[command(name = "vitrine-import")]
#[command(about = "Import a product report into the storefront catalog")]
pub struct ImportCli {
    /// Tenant UUID that owns the imported products
    #[arg(long)]
    pub tenant: Option<String>,
    /// Path to the `;`-delimited product report
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Fall back to the publishable key when the service role key is missing
    #[arg(long)]
    pub allow_publishable: bool,
    /// Transform and report without writing to the store
    #[arg(long)]
    pub dry_run: bool,
    /// Tenant UUID and/or report path given without flags
    #[arg(value_name = "ARGS")]
    pub positionals: Vec<String>,
}

impl From<ImportCli> for RunArgs {
    fn from(cli: ImportCli) -> Self {
        Self {
            tenant: cli.tenant,
            file: cli.file,
            positionals: cli.positionals,
            allow_publishable: cli.allow_publishable,
            dry_run: cli.dry_run,
        }
    }
}

/// Runs one import and returns the process exit status.
///
/// Usage problems print the diagnostic followed by the usage text and fail
/// before any file or network work. Batch failures do not stop the run; they
/// are reported and turn the exit status into a failure after the summary.
///
/// # Errors
///
/// Returns an error if credentials are missing, logging cannot be set up,
/// the report cannot be read, or the store client cannot be built.
pub async fn run(cli: ImportCli) -> anyhow::Result<ExitCode> {
    run_with(cli, |allow_publishable| {
        let config = load_app_config(allow_publishable)?;
        crate::init_tracing(&config.log_level)?;
        Ok(config)
    })
    .await
}

/// Same as [`run`], with configuration supplied by `load_config`.
///
/// `load_config` receives the `--allow-publishable` flag and is only called
/// once the arguments have resolved.
///
/// # Errors
///
/// Returns an error if `load_config` fails, the report cannot be read or
/// parsed, or the store client cannot be built.
pub async fn run_with<F>(cli: ImportCli, load_config: F) -> anyhow::Result<ExitCode>
where
    F: FnOnce(bool) -> anyhow::Result<AppConfig>,
{
    let run = match resolve_run_config(cli.into()) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("{}", ImportCli::command().render_usage());
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = load_config(run.allow_fallback_credential)?;
    if config.is_publishable() {
        eprintln!(
            "warning: SUPABASE_SERVICE_ROLE_KEY is not set; using the publishable key. \
             Writes may be rejected by row-level security."
        );
        tracing::warn!(credential = %config.credential, "using fallback credential");
    }

    let rows = read_table(&run.file_path)?;
    let outcome = transform_rows(&rows, &run.tenant_id);
    let summary = ImportSummary::new(rows.len(), outcome.products.len(), outcome.skipped);
    let generated = outcome
        .products
        .iter()
        .filter(|p| p.has_generated_code())
        .count();

    print_header(&run, &summary, generated);

    if run.dry_run {
        println!("Dry run: nothing written.");
        return Ok(ExitCode::SUCCESS);
    }

    let client = StoreClient::from_config(&config)?;
    let summary = write_batches(
        &client,
        &outcome.products,
        BATCH_SIZE,
        summary,
        print_batch,
    )
    .await;

    println!("Total processed: {}", summary.processed);
    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Failures: {}", summary.failed);
        Ok(ExitCode::FAILURE)
    }
}

fn print_header(run: &RunConfig, summary: &ImportSummary, generated: usize) {
    println!("CSV: {}", run.file_path.display());
    println!("Tenant: {}", run.tenant_id);
    println!("Rows read: {}", summary.rows_read);
    println!("Valid records: {}", summary.valid);
    if summary.skipped > 0 {
        println!("Skipped (no code and no name): {}", summary.skipped);
    }
    if generated > 0 {
        println!("Generated codes: {generated}");
    }
}

fn print_batch(result: &BatchResult) {
    match &result.error {
        None => println!("Batch {}: {} upserted.", result.index, result.written),
        Some(e) => eprintln!("error: batch {}: {e}", result.index),
    }
}
