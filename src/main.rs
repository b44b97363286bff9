use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_cart::{start, Config, LineConsole, VERSION};

fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_args(env::args());
    info!(version = VERSION, path = %config.catalog_path.display(), "starting catalog cart");

    let stdin = io::stdin();
    let mut console = LineConsole::new(stdin.lock(), io::stdout());
    let session = start(&config, &mut console)?;

    info!(items = session.store().len(), cart = session.cart().len(), "session finished");
    Ok(())
}
