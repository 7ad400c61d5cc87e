//! ovmap - derives which input object types can emit each simulation
//! output variable, by mining the artifacts of completed test runs.
//!
//! A completed run leaves two artifacts behind: a listing of every output
//! variable the simulation offered (`output_vars.csv`) and the converted
//! epJSON input document. Matching variable report keys against input
//! object instance names, with rule tables covering the known exceptions,
//! yields a per-run classification; aggregating every run of a build tree
//! yields the canonical variable-to-type and type-to-variable maps.
//!
//! # Example
//!
//! ```no_run
//! use ovmap::{map_build_dir, MapOptions};
//!
//! let outcome = map_build_dir("/path/to/build", &MapOptions::default()).unwrap();
//! for (variable, types) in outcome.variable_map.iter() {
//!     println!("{}: {} candidate types", variable, types.len());
//! }
//! ```

pub mod aggregate;
pub mod catalog;
pub mod classify;
pub mod cli;
pub mod error;
pub mod output;
pub mod records;
pub mod rules;
pub mod runs;

#[cfg(test)]
mod classify_test;

// Re-export commonly used types at crate root
pub use aggregate::{ObjectMap, VariableMap};
pub use catalog::ObjectCatalog;
pub use classify::{classify_record, classify_run, Classification};
pub use error::MapperError;
pub use records::VariableRecord;

use std::io::IsTerminal;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

/// Options for mapping a build tree.
#[derive(Debug, Clone, Default)]
pub struct MapOptions {
    /// Process runs one at a time instead of in parallel.
    pub sequential: bool,
    /// Draw a progress bar when standard error is a terminal.
    pub progress: bool,
}

/// Result of mapping a build tree.
#[derive(Debug)]
pub struct MapOutcome {
    pub variable_map: VariableMap,
    pub object_map: ObjectMap,
    /// Runs discovered with both artifacts present.
    pub runs_discovered: usize,
    /// Runs successfully classified and merged.
    pub runs_classified: usize,
}

/// Classify every run under a build tree and aggregate the results.
///
/// This is the main entry point for batch mapping. Runs that fail to
/// load are logged and skipped; they never abort the remaining runs.
pub fn map_build_dir<P: AsRef<Path>>(build_dir: P, options: &MapOptions) -> Result<MapOutcome> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let build_dir = build_dir.as_ref();
    if !build_dir.is_dir() {
        anyhow::bail!("Build directory does not exist: {}", build_dir.display());
    }

    let started = Instant::now();
    let run_dirs = runs::discover_runs(build_dir)?;

    let bar = if options.progress && std::io::stderr().is_terminal() {
        let bar = ProgressBar::new(run_dirs.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        Some(bar)
    } else {
        None
    };

    let classify_one = |run: &runs::RunDir| -> Option<Vec<Classification>> {
        if let Some(ref bar) = bar {
            bar.set_message(format!("Classifying {}", run.name));
        }
        let result = match runs::load_run(run) {
            Ok(data) => Some(classify_run(&data.records, &data.catalog)),
            Err(e) => {
                warn!("Skipping run {}: {}", run.name, e);
                None
            }
        };
        if let Some(ref bar) = bar {
            bar.inc(1);
        }
        result
    };

    let per_run: Vec<Option<Vec<Classification>>> = if options.sequential {
        run_dirs.iter().map(classify_one).collect()
    } else {
        run_dirs.par_iter().map(classify_one).collect()
    };

    if let Some(ref bar) = bar {
        bar.finish_and_clear();
    }

    let mut variable_map = VariableMap::new();
    let mut runs_classified = 0;
    for classifications in per_run.into_iter().flatten() {
        variable_map.merge_run(&classifications);
        runs_classified += 1;
    }
    let object_map = variable_map.invert();

    info!(
        "Classified {} of {} runs into {} variables in {:?}",
        runs_classified,
        run_dirs.len(),
        variable_map.len(),
        started.elapsed()
    );

    Ok(MapOutcome {
        variable_map,
        object_map,
        runs_discovered: run_dirs.len(),
        runs_classified,
    })
}

/// Classify the variables of a single run directory.
///
/// Unlike [`map_build_dir`], missing artifacts are hard errors here: the
/// caller pointed at this run explicitly.
pub fn classify_run_dir<P: AsRef<Path>>(run_dir: P) -> Result<(String, Vec<Classification>)> {
    let run_dir = run_dir.as_ref();
    if !run_dir.is_dir() {
        anyhow::bail!("Run directory does not exist: {}", run_dir.display());
    }
    let run = runs::run_from_dir(run_dir)?;
    let data = runs::load_run(&run)?;
    let classifications = classify_run(&data.records, &data.catalog);
    Ok((run.name, classifications))
}
