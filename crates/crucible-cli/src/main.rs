use clap::Parser;
use crucible_build::HarnessConfig;
use crucible_driver::Harness;
use crucible_run::{header_row, render_row, render_summary};
use miette::{miette, Result};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crucible")]
#[command(
    author,
    version,
    about = "Compile-and-run test harness for hand-rolled C++ container libraries"
)]
struct Cli {
    /// Include directory of the candidate implementation under test
    candidate: Option<PathBuf>,

    /// Configuration file (./crucible.toml is picked up when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suite to run
    #[arg(long, default_value = "vector")]
    suite: String,

    /// Emit the result records as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Keep the temp directory (synthesized sources and binaries)
    #[arg(long)]
    keep_temp: bool,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(candidate) = cli.candidate {
        config.candidate_path = candidate;
    }

    let harness = Harness::new(config);
    let results = harness.run_suite(&cli.suite)?;

    if cli.json {
        let rendered = serde_json::to_string_pretty(&results)
            .map_err(|e| miette!("Failed to serialize results: {e}"))?;
        println!("{rendered}");
    } else {
        println!("{}", header_row());
        for result in &results {
            println!("{}", render_row(result));
        }
        println!("{}", render_summary(&results));
    }

    if !cli.keep_temp {
        harness.cleanup();
    }

    // Individual test outcomes never fail the harness; only setup errors do.
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<HarnessConfig> {
    match path {
        Some(path) => HarnessConfig::from_file(path)
            .map_err(|e| miette!("Failed to load {}: {e}", path.display())),
        None => {
            let discovered = Path::new("crucible.toml");
            if discovered.is_file() {
                HarnessConfig::from_file(discovered)
                    .map_err(|e| miette!("Failed to load crucible.toml: {e}"))
            } else {
                Ok(HarnessConfig::default())
            }
        }
    }
}
