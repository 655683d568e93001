use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Criterion output directory not found: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("No point estimate found for {0}")]
    MissingEstimate(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid chart options: {0}")]
    Options(String),

    #[error("Plot generation error: {0}")]
    PlotError(String),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
