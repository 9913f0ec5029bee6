use std::io;

use clap::Parser;
use tracing::{debug, warn};

use ngtax_cli::app;
use ngtax_cli::cli::Cli;
use ngtax_cli::logging::{self, LogOptions};
use ngtax_cli::preferences::PreferenceStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&LogOptions {
        level: cli.log_level.as_deref(),
        file: cli.log_file.as_deref(),
    })?;

    let store = match PreferenceStore::from_env() {
        Ok(store) => {
            debug!(path = %store.path().display(), "using preferences file");
            Some(store)
        }
        Err(e) => {
            warn!(%e, "preferences unavailable");
            None
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(cli.command, store.as_ref(), &mut out).await
}
