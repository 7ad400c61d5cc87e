//! Command line front end for the output variable mapper.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ovmap::cli::{Args, Command, OutputFormat};
use ovmap::output;
use ovmap::{classify_run_dir, map_build_dir, MapOptions};

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins when set; --verbose bumps the default otherwise.
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("ovmap=debug")
    } else {
        EnvFilter::new("ovmap=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Map {
            build_dir,
            output: out_dir,
            sequential,
        } => {
            let options = MapOptions {
                sequential,
                progress: true,
            };
            let outcome = map_build_dir(&build_dir, &options)?;
            output::write_map_files(&out_dir, &outcome.variable_map, &outcome.object_map)
                .with_context(|| {
                    format!("Failed to write map files under {}", out_dir.display())
                })?;
            eprintln!(
                "Classified {} of {} runs: {} variables across {} object types",
                outcome.runs_classified,
                outcome.runs_discovered,
                outcome.variable_map.len(),
                outcome.object_map.len()
            );
        }
        Command::Classify { run_dir, format } => {
            let (run_name, classifications) = classify_run_dir(&run_dir)?;
            match format {
                OutputFormat::Json => {
                    println!("{}", output::format_run_json(&run_name, &classifications)?);
                }
                OutputFormat::Terminal => {
                    print!("{}", output::format_run_terminal(&run_name, &classifications));
                }
            }
        }
    }

    Ok(())
}
