use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SuiteError, SuiteResult};
use crate::testing::RunReport;

pub const REPORT_FILE: &str = "petstore-report.json";

/// Write `report` as pretty JSON to `<dir>/petstore-report.json`, creating
/// `dir` when missing. Returns the file written.
pub fn write_report(dir: &Path, report: &RunReport) -> SuiteResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| SuiteError::io(dir, e))?;

    let file = dir.join(REPORT_FILE);
    let raw = serde_json::to_string_pretty(report)?;
    fs::write(&file, raw).map_err(|e| SuiteError::io(&file, e))?;
    Ok(file)
}

pub fn load_report(file: &Path) -> SuiteResult<RunReport> {
    let raw = fs::read_to_string(file).map_err(|e| SuiteError::io(file, e))?;
    serde_json::from_str(&raw).map_err(|e| SuiteError::Parse {
        expected: "run report".to_string(),
        message: e.to_string(),
        body: raw.clone(),
    })
}
