use std::process::ExitCode;

use clap::Parser;
use vitrine_cli::import::{self, ImportCli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match ImportCli::try_parse() {
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

    match import::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
