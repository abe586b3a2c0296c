use thiserror::Error;

/// Errors surfaced by document and catalog I/O.
///
/// Core operations (reconstruction, substitution, compatibility analysis)
/// never return these; they degrade with warnings instead. Only the edges
/// that touch the filesystem and wire formats are fallible.
#[derive(Debug, Error)]
pub enum DetailError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("document error: {0}")]
    Document(String),
}
