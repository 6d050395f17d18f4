use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;

use news_admin::cli::{self, Cli};
use news_admin::observability::init_logging;

fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("✗ Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("✗ {e}");
            if e.is_transient() {
                eprintln!("  The backend may be temporarily unavailable; try again shortly.");
            }
            ExitCode::FAILURE
        }
    }
}
