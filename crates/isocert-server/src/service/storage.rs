//! Upload storage layout
//!
//! ```text
//! {root}/company_logos/{company_id}_{filename}
//! {root}/qms_documents/{qms_type_id}_{filename}
//! {root}/generated/{application_id}_{title}.docx
//! ```

use std::io;
use std::path::{Path, PathBuf};

use isocert_common::IsocertError;
use uuid::Uuid;

use crate::model::constants::{COMPANY_LOGOS_DIR, GENERATED_DIR, QMS_DOCUMENTS_DIR};

#[derive(Clone, Debug)]
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    /// Create the storage directories under `root`
    pub fn init(root: impl Into<PathBuf>) -> io::Result<Self> {
        let storage = Self { root: root.into() };

        for dir in [COMPANY_LOGOS_DIR, QMS_DOCUMENTS_DIR, GENERATED_DIR] {
            std::fs::create_dir_all(storage.root.join(dir))?;
        }

        tracing::info!(root = %storage.root.display(), "Upload storage ready");

        Ok(storage)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logo_path(&self, company_id: Uuid, filename: &str) -> PathBuf {
        self.root
            .join(COMPANY_LOGOS_DIR)
            .join(format!("{company_id}_{filename}"))
    }

    pub fn template_path(&self, qms_type_id: Uuid, filename: &str) -> PathBuf {
        self.root
            .join(QMS_DOCUMENTS_DIR)
            .join(format!("{qms_type_id}_{filename}"))
    }

    /// Output path of a rendered template; path separators in the title
    /// become `_`
    pub fn generated_path(&self, application_id: Uuid, title: &str) -> PathBuf {
        let title = title.replace(['/', '\\'], "_");
        self.root
            .join(GENERATED_DIR)
            .join(format!("{application_id}_{title}.docx"))
    }

    /// Remove a file stored under `{root}/{dir}`; a file that is already
    /// gone is not an error. Paths resolving anywhere else are left alone.
    pub fn remove_file(&self, dir: &str, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let resolved = match path.canonicalize() {
            Ok(resolved) => resolved,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Stored file already absent");
                return;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to resolve stored file");
                return;
            }
        };

        if !self.owns(dir, &resolved) {
            tracing::warn!(
                path = %path.display(),
                dir,
                "Refusing to remove file outside upload storage"
            );
            return;
        }

        match std::fs::remove_file(&resolved) {
            Ok(()) => tracing::info!(path = %path.display(), "Removed stored file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Stored file already absent");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove stored file");
            }
        }
    }

    /// Whether a canonical path is a file inside `{root}/{dir}`
    fn owns(&self, dir: &str, resolved: &Path) -> bool {
        self.root
            .join(dir)
            .canonicalize()
            .is_ok_and(|base| {
                resolved.starts_with(&base) && resolved != base.as_path() && resolved.is_file()
            })
    }
}

/// Reduce a client supplied filename to its final path component
pub fn sanitize_filename(filename: &str) -> Result<String, IsocertError> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(IsocertError::IllegalArgument(format!(
            "file: invalid filename '{filename}'"
        )));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::init(dir.path().join("uploads")).unwrap();

        for sub in [COMPANY_LOGOS_DIR, QMS_DOCUMENTS_DIR, GENERATED_DIR] {
            assert!(storage.root().join(sub).is_dir());
        }
    }

    #[test]
    fn test_paths() {
        let storage = UploadStorage {
            root: PathBuf::from("uploads"),
        };
        let id = Uuid::nil();

        assert_eq!(
            storage.logo_path(id, "logo.png"),
            PathBuf::from(format!("uploads/company_logos/{id}_logo.png"))
        );
        assert_eq!(
            storage.template_path(id, "manual.docx"),
            PathBuf::from(format!("uploads/qms_documents/{id}_manual.docx"))
        );
        assert_eq!(
            storage.generated_path(id, "Quality/Policy\\v2"),
            PathBuf::from(format!("uploads/generated/{id}_Quality_Policy_v2.docx"))
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("logo.png").unwrap(), "logo.png");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\manual.docx").unwrap(), "manual.docx");
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("dir/").is_err());
        assert!(sanitize_filename("..").is_err());
    }

    #[test]
    fn test_remove_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::init(dir.path()).unwrap();
        let path = storage.logo_path(Uuid::new_v4(), "gone.png");
        storage.remove_file(COMPANY_LOGOS_DIR, &path);

        std::fs::write(&path, b"png").unwrap();
        storage.remove_file(COMPANY_LOGOS_DIR, &path);
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_file_stays_inside_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = UploadStorage::init(dir.path().join("uploads")).unwrap();

        let outside = dir.path().join("victim.txt");
        std::fs::write(&outside, b"keep").unwrap();
        storage.remove_file(COMPANY_LOGOS_DIR, &outside);
        assert!(outside.exists());

        let escaped = storage
            .root()
            .join(COMPANY_LOGOS_DIR)
            .join("..")
            .join("..")
            .join("victim.txt");
        storage.remove_file(COMPANY_LOGOS_DIR, &escaped);
        assert!(outside.exists());

        let template = storage.template_path(Uuid::new_v4(), "manual.docx");
        std::fs::write(&template, b"docx").unwrap();
        storage.remove_file(COMPANY_LOGOS_DIR, &template);
        assert!(template.exists());

        storage.remove_file(COMPANY_LOGOS_DIR, storage.root().join(COMPANY_LOGOS_DIR));
        assert!(storage.root().join(COMPANY_LOGOS_DIR).is_dir());
    }
}
