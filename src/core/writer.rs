use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::document::{DocumentError, TabularDocument};

pub const FILE_PREFIX: &str = "YLE_News_Headlines_";
pub const DOCUMENT_EXTENSION: &str = "docx";

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to save document to {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

/// `YLE_News_Headlines_<DD_MM_YYYY>.<extension>` for the given day.
pub fn report_file_name(date: NaiveDate, extension: &str) -> String {
    format!("{FILE_PREFIX}{}.{extension}", date.format("%d_%m_%Y"))
}

/// Saves `doc` as `destination_dir/file_name`, creating the directory first.
/// An existing file with the same name is replaced.
pub fn write_document<D: TabularDocument>(
    doc: &D,
    destination_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, WriteError> {
    std::fs::create_dir_all(destination_dir).map_err(|source| WriteError::CreateDir {
        path: destination_dir.to_path_buf(),
        source,
    })?;

    let path = destination_dir.join(file_name);
    doc.save(&path).map_err(|source| WriteError::Save {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
