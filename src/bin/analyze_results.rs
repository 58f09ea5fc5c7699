use std::path::PathBuf;

use clap::Parser;
use graph_adjacency::compare::{Comparison, ToolTimings, METRICS};
use graph_adjacency::error::ReportError;
use tracing_subscriber::EnvFilter;

const RULE_WIDTH: usize = 80;

/// Compare Neo4j timings against the Giraph timings recorded in a CSV file.
#[derive(Parser)]
#[command(name = "analyze_results")]
struct Cli {
    /// Headerless `metric,seconds` table produced by the Giraph runs
    #[arg(default_value = "giraph_times.csv")]
    timings: PathBuf,

    /// Where the comparison table is saved
    #[arg(long, short, default_value = "comparison_results.csv")]
    output: PathBuf,
}

fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let baseline = ToolTimings::neo4j_baseline();
    let counterpart = match ToolTimings::load("Giraph", &cli.timings) {
        Ok(timings) => timings,
        Err(ReportError::TimingsNotFound { path, .. }) => {
            eprintln!(
                "Error: {} not found. Run Giraph computations first.",
                path.display()
            );
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let comparison = Comparison::new(&baseline, &counterpart, &METRICS);

    println!();
    rule();
    println!(
        "PERFORMANCE COMPARISON: {} vs {}",
        comparison.baseline(),
        comparison.counterpart()
    );
    rule();
    println!("{}", comparison.table());
    rule();

    comparison.save_csv(&cli.output)?;
    tracing::info!("Comparison saved to: {}", cli.output.display());

    println!();
    rule();
    println!("ANALYSIS");
    rule();

    if let Some(analysis) = comparison.analysis() {
        println!(
            "{} Total Time: {:.2}s",
            comparison.baseline(),
            analysis.baseline_total
        );
        println!(
            "{} Total Time: {:.2}s",
            comparison.counterpart(),
            analysis.counterpart_total
        );
        println!(
            "{} Speedup: {:.2}x faster",
            comparison.baseline(),
            analysis.speedup
        );

        let winner = if analysis.baseline_won() {
            comparison.baseline()
        } else {
            comparison.counterpart()
        };
        println!("\n✓ {} outperformed the other tool on this dataset", winner);
    }

    rule();
    Ok(())
}
