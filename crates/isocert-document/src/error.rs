use std::path::PathBuf;

/// Document rendering failures
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid docx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("template part '{0}' is not valid UTF-8")]
    Encoding(String),
}

impl DocumentError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
