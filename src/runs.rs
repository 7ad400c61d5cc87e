//! Discovery and loading of completed simulation runs inside a build tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::ObjectCatalog;
use crate::error::{MapperError, Result};
use crate::records::{self, VariableRecord, RECORDS_FILE_NAME};

/// Subdirectory of the build tree holding one directory per test run.
pub const TEST_FILES_DIR: &str = "testfiles";

/// Extension of the converted input documents.
const DOCUMENT_EXTENSION: &str = ".epJSON";

/// Runs whose converted document is knowingly absent because their
/// conversion ran the other way and produced no epJSON.
pub const KNOWN_SKIPPED_RUNS: &[&str] = &["RefBldgMediumOfficeNew2004_Chicago_epJSON"];

/// A run directory with both required artifacts located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    /// Directory name, used as the run's display name.
    pub name: String,
    /// The run's output variable listing.
    pub records_path: PathBuf,
    /// The run's converted input document.
    pub document_path: PathBuf,
}

/// Parsed artifacts of one run.
#[derive(Debug)]
pub struct RunData {
    pub records: Vec<VariableRecord>,
    pub catalog: ObjectCatalog,
}

/// Locate the converted input document for a run directory.
///
/// Several document spellings exist depending on how the run was driven;
/// they are probed in a fixed order and the first hit wins.
pub fn locate_input_document(dir: &Path, run_name: &str) -> Option<PathBuf> {
    let candidates = [
        dir.join(format!("{}{}", run_name, DOCUMENT_EXTENSION)),
        dir.join(format!("expanded{}", DOCUMENT_EXTENSION)),
        dir.join(format!("{}-000001{}", run_name, DOCUMENT_EXTENSION)),
        dir.join(format!("{}-G000{}", run_name, DOCUMENT_EXTENSION)),
    ];
    candidates.into_iter().find(|candidate| candidate.is_file())
}

/// Enumerate classifiable runs under a build tree.
///
/// Run directories live one level below `testfiles/` and are visited in
/// name order. Directories without a variable listing are ignored;
/// directories with a listing but no input document are skipped with a
/// log line, quietly so for the known pre-converted runs.
pub fn discover_runs(build_dir: &Path) -> Result<Vec<RunDir>> {
    let test_dir = build_dir.join(TEST_FILES_DIR);
    if !test_dir.is_dir() {
        return Err(MapperError::TestFilesMissing { path: test_dir });
    }
    let mut run_dirs: Vec<PathBuf> = WalkDir::new(&test_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    run_dirs.sort();

    let mut runs = Vec::new();
    for dir in run_dirs {
        let Some(name) = dir.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let records_path = dir.join(RECORDS_FILE_NAME);
        if !records_path.is_file() {
            debug!("No variable listing in {}, not a run directory", dir.display());
            continue;
        }
        match locate_input_document(&dir, &name) {
            Some(document_path) => runs.push(RunDir {
                name,
                records_path,
                document_path,
            }),
            None if KNOWN_SKIPPED_RUNS.contains(&name.as_str()) => {
                info!("Skipping known pre-converted run: {}", name);
            }
            None => {
                warn!("Skipping run with no input document: {}", name);
            }
        }
    }
    info!(
        "Discovered {} classifiable runs under {}",
        runs.len(),
        test_dir.display()
    );
    Ok(runs)
}

/// Treat a single directory as a run, without requiring a build tree.
pub fn run_from_dir(dir: &Path) -> Result<RunDir> {
    let dir = dir.canonicalize()?;
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    let records_path = dir.join(RECORDS_FILE_NAME);
    if !records_path.is_file() {
        return Err(MapperError::NotARunDirectory { path: dir });
    }
    let document_path =
        locate_input_document(&dir, &name).ok_or_else(|| MapperError::document_missing(&name))?;
    Ok(RunDir {
        name,
        records_path,
        document_path,
    })
}

/// Load and parse both artifacts of a run.
pub fn load_run(run: &RunDir) -> Result<RunData> {
    let records = records::read_records_file(&run.records_path)?;
    let raw = fs::read_to_string(&run.document_path)?;
    let document: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| MapperError::InputDocumentParse {
            path: run.document_path.clone(),
            source,
        })?;
    let catalog = ObjectCatalog::from_document(&document);
    debug!(
        "Loaded run {}: {} records, {} object types with {} instances",
        run.name,
        records.len(),
        catalog.type_count(),
        catalog.instance_count()
    );
    Ok(RunData { records, catalog })
}
