use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Convert an edge list into the adjacency-list format read by Giraph.
#[derive(Parser)]
#[command(name = "convert_to_adjacency")]
struct Cli {
    /// Edge list with one `<src> <dst>` pair per line
    #[arg(default_value = "wiki-Vote.txt")]
    input: PathBuf,

    /// Destination of the adjacency list, overwritten if present
    #[arg(default_value = "wiki-Vote-adjacency.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    graph_adjacency::convert::<u64, _, _>(&cli.input, &cli.output).with_context(|| {
        format!(
            "converting {} to {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    Ok(())
}
