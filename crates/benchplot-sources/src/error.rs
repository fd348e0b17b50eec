//! Error type for benchplot-sources.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Nothing in `dir` matches `pattern`. The pipeline cannot run.
    #[error("no input available: nothing in {} matches {pattern:?}", .dir.display())]
    NoInputAvailable { dir: PathBuf, pattern: String },

    #[error("input file {} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid file pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl SourceError {
    /// Map an I/O error on `path`, turning not-found into [`FileNotFound`](Self::FileNotFound).
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            SourceError::FileNotFound(path)
        } else {
            SourceError::Io { path, source }
        }
    }
}
