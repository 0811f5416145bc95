//! Module defining the polymorphic output side: the encoding selector and
//! the writer owning the artifact lifecycle.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::domain::OrderReport;
use crate::error::Error;

mod render;


/// The report encodings. Selected once at startup; everything the pipeline
/// needs to know about a variant is exposed as a capability here, so the
/// streaming loop never branches on the encoding name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
    Jsonl,
    Xml,
    Yaml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Xml => "xml",
            OutputFormat::Yaml => "yaml",
        }
    }

    /// Whether records can be appended to the artifact as they arrive.
    /// Encodings returning `false` need the whole record sequence buffered
    /// and written once at the end of the run.
    pub fn supports_incremental_write(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Jsonl)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Owns one output artifact: its path, its append handle, and the encoding
/// used to render report records into it.
#[derive(Debug)]
pub struct ReportWriter {
    format: OutputFormat,
    path: PathBuf,
    handle: Option<File>,
}

impl ReportWriter {
    /// Computes the artifact path as `directory/name.<extension>` and
    /// deletes any pre-existing file there: each run starts from a clean
    /// artifact. The file itself is created by `start_writing`.
    pub fn create(
        directory: impl AsRef<Path>,
        name: &str,
        format: OutputFormat,
    ) -> Result<Self, Error> {
        let path = directory
            .as_ref()
            .join(format!("{name}.{}", format.extension()));

        if path.exists() {
            fs::remove_file(&path).map_err(|source| Error::output_io(&path, source))?;
        }

        Ok(Self {
            format,
            path,
            handle: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn supports_incremental_write(&self) -> bool {
        self.format.supports_incremental_write()
    }

    pub fn artifact_exists(&self) -> bool {
        self.path.exists()
    }

    /// Opens the artifact for append-mode writing, creating it if absent.
    pub fn start_writing(&mut self) -> Result<(), Error> {
        let handle = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| Error::output_io(&self.path, source))?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Renders zero or more report records into the open stream. Calling
    /// this without an open stream is a fail-fast contract violation.
    pub fn write(&mut self, reports: &[OrderReport]) -> Result<(), Error> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(Error::WriterClosed {
                path: self.path.clone(),
            });
        };

        match self.format {
            OutputFormat::Csv => render::write_csv(handle, reports, &self.path),
            OutputFormat::Json => render::write_json(handle, reports),
            OutputFormat::Jsonl => render::write_jsonl(handle, reports, &self.path),
            OutputFormat::Xml => render::write_xml(handle, reports),
            OutputFormat::Yaml => render::write_yaml(handle, reports),
        }
    }

    /// Closes the output stream. Idempotent; the handle also closes when
    /// the writer is dropped, so a failed run cannot leak it.
    pub fn stop_writing(&mut self) -> Result<(), Error> {
        drop(self.handle.take());
        Ok(())
    }

    /// Hook for format-specific structural validation of the finished
    /// artifact. Every current encoding accepts unconditionally.
    pub fn validate(&self) -> bool {
        true
    }
}
