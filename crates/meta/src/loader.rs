use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::PhotoMetadata;

/// Errors from the dataset loaders.
#[derive(Debug, Error)]
pub enum MetaError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON on line {line} of {path}: {source}")]
    JsonLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads every `.json` file under `dir` (recursively) as one photo record.
/// Files that fail to parse are skipped; the exports routinely contain a
/// few malformed entries and one bad record should not sink the load.
pub fn load_metadata_dir(dir: &Path) -> Result<Vec<PhotoMetadata>, MetaError> {
    let mut records = Vec::new();
    walk_dir(dir, &mut records)?;
    Ok(records)
}

fn walk_dir(dir: &Path, records: &mut Vec<PhotoMetadata>) -> Result<(), MetaError> {
    let entries = fs::read_dir(dir).map_err(|source| MetaError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| MetaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, records)?;
            continue;
        }
        if path.extension() != Some(std::ffi::OsStr::new("json")) {
            continue;
        }
        let data = fs::read_to_string(&path).map_err(|source| MetaError::Io {
            path: path.clone(),
            source,
        })?;
        if let Ok(record) = serde_json::from_str::<PhotoMetadata>(&data) {
            records.push(record);
        }
    }
    Ok(())
}

/// Loads a JSON-Lines dataset: one photo record per line. A leading UTF-8
/// BOM is skipped and blank lines are ignored; a malformed line is an error
/// because the JSONL exports are machine-written and a parse failure there
/// means the wrong file.
pub fn load_metadata_jsonl(path: &Path) -> Result<Vec<PhotoMetadata>, MetaError> {
    let data = fs::read_to_string(path).map_err(|source| MetaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = data.strip_prefix('\u{feff}').unwrap_or(&data);

    let mut records = Vec::new();
    for (index, line) in data.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let record =
            serde_json::from_str::<PhotoMetadata>(line).map_err(|source| MetaError::JsonLine {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        records.push(record);
    }
    Ok(records)
}
