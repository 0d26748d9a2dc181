use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::App;

mod cli;

fn main() -> anyhow::Result<()> {
    let app = App::parse();
    init_logging(app.verbose);
    app.cmd.run()
}

/// `RUST_LOG` wins over `-v` when it is set.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
