use crate::io::{self, json};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// A JSON array written to a hidden sibling of its destination.
///
/// [`commit`](Self::commit) renames it into place; dropping it uncommitted
/// removes the temporary file and leaves the destination untouched.
pub struct StagedJson {
    tmp: PathBuf,
    dest: PathBuf,
    records: usize,
    committed: bool,
}

impl StagedJson {
    pub fn write<T: Serialize>(path: &Path, records: &[T]) -> Result<Self, io::Error> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let staged = Self {
            tmp: temp_path(path),
            dest: path.to_path_buf(),
            records: records.len(),
            committed: false,
        };
        let file = File::create(&staged.tmp)?;
        json::write(BufWriter::new(file), records)?;
        Ok(staged)
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn commit(mut self) -> Result<(), io::Error> {
        fs::rename(&self.tmp, &self.dest)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedJson {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Writes `records` to `path` through a sibling temporary file.
///
/// The destination is only replaced once the whole array has been written,
/// so a failed write leaves any previous output untouched.
pub fn write_json_atomic<T: Serialize>(path: &Path, records: &[T]) -> Result<(), io::Error> {
    StagedJson::write(path, records)?.commit()
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, io::Error> {
    let file = File::open(path)?;
    json::read(BufReader::new(file))
}

pub(super) fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{name}.tmp"))
}
