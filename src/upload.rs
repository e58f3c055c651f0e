//! Cover image hosting on the local filesystem.
//!
//! Images are content-addressed: the file name is the SHA-256 of the bytes,
//! so uploading the same image twice yields the same URL and one file.
//!
//! ```text
//! <home>/covers/<sha256>.<ext>
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::model::CoverFile;
use crate::workflow::ImageUploader;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Local image host for cover files.
pub struct CoverStore {
    dir: PathBuf,
}

impl CoverStore {
    /// Creates the cover directory if it doesn't exist.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Writes `bytes` and returns the path they are stored at.
    pub fn store(&self, bytes: &[u8], mime: &str) -> Result<PathBuf, UploadError> {
        let ext = extension_for(mime).ok_or_else(|| UploadError::UnsupportedType(mime.into()))?;
        let hash = hex::encode(Sha256::digest(bytes));
        let path = self.dir.join(format!("{hash}.{ext}"));
        if path.exists() {
            debug!(path = %path.display(), "cover already stored");
        } else {
            fs::write(&path, bytes)?;
            debug!(path = %path.display(), bytes = bytes.len(), "cover stored");
        }
        Ok(path)
    }
}

impl ImageUploader for CoverStore {
    type Error = UploadError;

    fn upload(&self, bytes: &[u8], _name: &str, mime: &str) -> Result<String, UploadError> {
        let path = self.store(bytes, mime)?;
        let path = fs::canonicalize(&path).unwrap_or(path);
        Ok(format!("file://{}", path.display()))
    }
}

fn extension_for(mime: &str) -> Option<&'static str> {
    match mime.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        other => mime_guess::get_mime_extensions_str(other).and_then(|exts| exts.first().copied()),
    }
}

/// Read an image from disk, guessing its MIME type from the file name.
pub fn read_cover(path: &Path) -> io::Result<CoverFile> {
    let bytes = fs::read(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let name = path
        .file_name()
        .map_or_else(|| "cover".to_string(), |n| n.to_string_lossy().into_owned());
    Ok(CoverFile::new(name, mime.essence_str(), bytes))
}
