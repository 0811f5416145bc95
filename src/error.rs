//! Module defining the errors which are exposed to the users of the crate

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input feed exists but contains no bytes
    #[error("input feed is empty: {}", path.display())]
    EmptyInput { path: PathBuf },

    /// The input feed could not be opened for reading
    #[error("failed to open input feed {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already opened input feed failed mid-stream
    #[error("failed to read from input feed: {0}")]
    ReadInput(#[source] std::io::Error),

    /// A line of the feed is not a valid order record. Fatal for the run:
    /// silently skipping lines would corrupt progress accounting.
    #[error("malformed order record on line {line}: {source}")]
    MalformedLine {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    /// The order timestamp is in none of the accepted source formats
    #[error("order {order_id}: unparseable order date '{value}'")]
    DateParse { order_id: u64, value: String },

    /// An order with no line items cannot have an average unit price
    #[error("order {order_id} has no line items")]
    EmptyOrder { order_id: u64 },

    /// Opening or writing the output artifact failed
    #[error("failed to write output artifact {}: {source}", path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A write was attempted before `start_writing` (or after `stop_writing`)
    #[error("output stream for {} is not open for writing", path.display())]
    WriterClosed { path: PathBuf },

    /// Encoding report records into the target format failed
    #[error("failed to render {format} output: {source}")]
    Render {
        format: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The pipeline reported completion but the artifact is not on disk:
    /// a writer/pipeline contract violation, not a user error
    #[error("report artifact was not created at {}", path.display())]
    MissingArtifact { path: PathBuf },
}

impl Error {
    pub(crate) fn render(
        format: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Render {
            format,
            source: Box::new(source),
        }
    }

    pub(crate) fn output_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::OutputIo {
            path: path.into(),
            source,
        }
    }
}
