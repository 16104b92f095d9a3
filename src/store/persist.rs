use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::record::Collections;
use crate::StoreError;

/// Read and parse the backing file. `Ok(None)` when it does not exist.
pub(crate) fn read_document(path: &Path) -> Result<Option<Collections>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|err| StoreError::corrupt(path, err))
}

/// Replace the backing file with the serialized document.
///
/// The content goes to a sibling temporary file first and is renamed over
/// the target, so a crash mid-write leaves the previous file intact.
pub(crate) fn write_document(path: &Path, data: &Collections) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }

    let mut bytes = serde_json::to_vec_pretty(data)?;
    bytes.push(b'\n');

    let tmp = temp_path(path);
    if let Err(err) = write_synced(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(StoreError::io(&tmp, err));
    }
    fs::rename(&tmp, path).map_err(|err| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, err)
    })
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| path.as_os_str()));
    name.push(".tmp");
    path.with_file_name(name)
}
