use std::process::ExitCode;

use clap::Parser;
use vitrine_cli::catalog::{self, CatalogCli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match CatalogCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = catalog::run(cli).await {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
