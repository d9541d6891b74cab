use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// Without `RUST_LOG` only errors are logged, keeping checker output clean.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    init_tracing();
    let cli = cli::Cli::parse();
    std::process::exit(cli::run(cli));
}
