//! Storage of uploaded files under the uploads directory.
//!
//! Files are written as `{prefix}-{uuid}-{sanitised name}` and served back
//! under `/uploads/`.

use std::path::{Path, PathBuf};

use parkpro_core::intake::UploadedFile;
use tokio::fs;

/// URL prefix uploaded files are served under.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Writes uploaded files to a directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves a file and returns the URL path it is served at.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn save(&self, prefix: &str, file: &UploadedFile) -> std::io::Result<String> {
        fs::create_dir_all(&self.dir).await?;
        let name = format!(
            "{prefix}-{}-{}",
            uuid::Uuid::new_v4().simple(),
            sanitize_file_name(&file.file_name)
        );
        fs::write(self.dir.join(&name), &file.bytes).await?;
        Ok(format!("{UPLOADS_ROUTE}/{name}"))
    }
}

/// Reduces a client-supplied name to a safe, flat file name.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("avatar.png", "avatar.png")]
    #[case("../../etc/passwd", "passwd")]
    #[case("C:\\Users\\me\\letter final.pdf", "letterfinal.pdf")]
    #[case("..", "file")]
    #[case("", "file")]
    fn test_sanitize_file_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }

    #[tokio::test]
    async fn test_save_writes_under_dir() {
        let dir = std::env::temp_dir().join(format!("parkpro-uploads-{}", uuid::Uuid::new_v4()));
        let store = UploadStore::new(&dir);

        let url = store
            .save(
                "registration",
                &UploadedFile {
                    file_name: "reg.pdf".into(),
                    bytes: b"%PDF-1.4".to_vec(),
                },
            )
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/registration-"));
        assert!(url.ends_with("-reg.pdf"));
        let name = url.trim_start_matches("/uploads/");
        assert_eq!(std::fs::read(dir.join(name)).unwrap(), b"%PDF-1.4");
        std::fs::remove_dir_all(dir).unwrap();
    }
}
