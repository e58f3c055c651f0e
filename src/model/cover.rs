//! Cover image files selected for upload.

/// Largest cover image accepted for upload: 5 MiB.
pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for cover images.
pub const ALLOWED_COVER_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// An image file picked by the user, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl CoverFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check size and type against the upload rules.
    ///
    /// Returns a user-facing message on rejection.
    pub fn check(&self, max_bytes: usize) -> Result<(), String> {
        if self.len() > max_bytes {
            return Err(format!(
                "cover image is too large ({} bytes, limit {max_bytes})",
                self.len()
            ));
        }
        let mime = self.mime.to_ascii_lowercase();
        if !ALLOWED_COVER_TYPES.contains(&mime.as_str()) {
            return Err(format!(
                "cover image must be JPEG, PNG, or GIF (got {})",
                self.mime
            ));
        }
        Ok(())
    }
}

// Bytes are elided: covers can be megabytes.
impl std::fmt::Debug for CoverFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_types_at_the_limit() {
        for mime in ALLOWED_COVER_TYPES {
            let file = CoverFile::new("c", mime, vec![0; MAX_COVER_BYTES]);
            assert!(file.check(MAX_COVER_BYTES).is_ok(), "{mime}");
        }
    }

    #[test]
    fn rejects_oversized_file() {
        let file = CoverFile::new("big.png", "image/png", vec![0; MAX_COVER_BYTES + 1]);
        let err = file.check(MAX_COVER_BYTES).unwrap_err();
        assert!(err.contains("too large"));
    }

    #[test]
    fn rejects_disallowed_type() {
        let file = CoverFile::new("cover.webp", "image/webp", vec![1, 2, 3]);
        let err = file.check(MAX_COVER_BYTES).unwrap_err();
        assert!(err.contains("image/webp"));
    }

    #[test]
    fn mime_check_ignores_case() {
        let file = CoverFile::new("c.PNG", "IMAGE/PNG", vec![1]);
        assert!(file.check(MAX_COVER_BYTES).is_ok());
    }
}
