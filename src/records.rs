//! Parsing of the per-run output variable listing.
//!
//! Every completed simulation run leaves behind an `output_vars.csv` file in
//! which each line records one output variable the simulation offered, as
//! four comma-separated fields: `name,units,time_step,key`.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{MapperError, Result};

/// Records carrying this key belong to user-defined EMS output variables,
/// which never correspond to a concrete input object.
pub const EMS_KEY: &str = "EMS";

/// File name of the variable listing inside each run directory.
pub const RECORDS_FILE_NAME: &str = "output_vars.csv";

/// One line of an `output_vars.csv` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRecord {
    /// Variable name, e.g. `Zone Mean Air Temperature`.
    pub name: String,
    /// Reported units, possibly empty.
    pub units: String,
    /// Reporting frequency token.
    pub time_step: String,
    /// Key the variable was reported against, usually an input object
    /// instance name.
    pub key: String,
}

impl VariableRecord {
    /// Parse a single comma-separated line.
    ///
    /// The line is trimmed as a whole but the individual fields are not.
    /// Lines with more than four fields keep only the first four.
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        let fields: Vec<&str> = trimmed.split(',').collect();
        if fields.len() < 4 {
            return Err(MapperError::malformed_record(trimmed));
        }
        Ok(Self {
            name: fields[0].to_string(),
            units: fields[1].to_string(),
            time_step: fields[2].to_string(),
            key: fields[3].to_string(),
        })
    }

    /// True when this record belongs to a user-defined EMS variable.
    pub fn is_ems(&self) -> bool {
        self.key == EMS_KEY
    }
}

/// Parse every line of a variable listing. Blank lines are skipped,
/// malformed lines are logged and dropped; neither aborts the listing.
pub fn parse_records(contents: &str) -> Vec<VariableRecord> {
    let mut records = Vec::new();
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match VariableRecord::parse(line) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Dropping unparseable record line: {}", e),
        }
    }
    records
}

/// Read and parse the variable listing at `path`.
pub fn read_records_file(path: &Path) -> Result<Vec<VariableRecord>> {
    let contents = fs::read_to_string(path)?;
    let records = parse_records(&contents);
    debug!(
        "Parsed {} variable records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}
