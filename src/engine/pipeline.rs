//! The streaming pipeline driving the read-transform-write loop.
//!
//! One pipeline instance performs a single, non-resumable pass over one
//! input feed: Init (validate + open both streams), Streaming (one line at
//! a time), Finalizing (flush buffering writers), Done, or Failed from
//! any state. Progress is observed by the caller as a lazy sequence of
//! percentage values, one per input line.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::domain::OrderReport;
use crate::engine::build_report;
use crate::error::Error;
use crate::geo::Geolocate;
use crate::output::ReportWriter;

/// A configured, not-yet-started run over one input feed.
pub struct ReportPipeline {
    input_path: PathBuf,
    writer: ReportWriter,
    geolocator: Option<Box<dyn Geolocate>>,
}

impl ReportPipeline {
    pub fn new(
        input_path: impl Into<PathBuf>,
        writer: ReportWriter,
        geolocator: Option<Box<dyn Geolocate>>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            writer,
            geolocator,
        }
    }

    /// Validates the input feed, opens both streams, and hands back the
    /// progress sequence. The feed must exist, be non-empty, and open for
    /// reading; the writer's stream must open for appending.
    pub fn run(mut self) -> Result<ProgressStream, Error> {
        let metadata = fs::metadata(&self.input_path).map_err(|source| Error::OpenInput {
            path: self.input_path.clone(),
            source,
        })?;
        if metadata.len() == 0 {
            return Err(Error::EmptyInput {
                path: self.input_path,
            });
        }

        let input = File::open(&self.input_path).map_err(|source| Error::OpenInput {
            path: self.input_path.clone(),
            source,
        })?;
        self.writer.start_writing()?;

        tracing::info!(
            input = %self.input_path.display(),
            artifact = %self.writer.path().display(),
            total_bytes = metadata.len(),
            "pipeline streaming"
        );

        Ok(ProgressStream {
            reader: BufReader::new(input),
            total_bytes: metadata.len(),
            consumed_bytes: 0,
            line: 0,
            writer: self.writer,
            buffered: Vec::new(),
            geolocator: self.geolocator,
            state: State::Streaming,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Streaming,
    Finalizing,
    Done,
    Failed,
}

/// The lazy progress sequence of a running pipeline.
///
/// Each `next` consumes one input line and yields the cumulative progress
/// percentage: non-decreasing, rounded to 2 decimal places, exactly 100.0
/// after the final line. Skipped orders still consume their bytes and
/// yield a value. The first error fuses the iterator; partial artifacts
/// stay on disk. Both file handles are released by scope even when the
/// run fails mid-stream.
pub struct ProgressStream {
    reader: BufReader<File>,
    total_bytes: u64,
    consumed_bytes: u64,
    line: u64,
    writer: ReportWriter,
    buffered: Vec<OrderReport>,
    geolocator: Option<Box<dyn Geolocate>>,
    state: State,
}

impl ProgressStream {
    /// Report records held back for the single whole-set write. Populated
    /// only when the writer does not support incremental writes; the
    /// sequence is not drained by finalization, so it remains inspectable
    /// after the run completes.
    pub fn reports(&self) -> &[OrderReport] {
        &self.buffered
    }

    pub fn writer(&self) -> &ReportWriter {
        &self.writer
    }

    fn fail(&mut self, error: Error) -> Option<Result<f64, Error>> {
        self.state = State::Failed;
        Some(Err(error))
    }

    /// Whole-set write for buffering writers (invoked even when no record
    /// survived, so an empty-but-valid artifact is still produced), then
    /// stream close.
    fn finalize(&mut self) -> Result<(), Error> {
        self.state = State::Finalizing;
        if !self.writer.supports_incremental_write() {
            self.writer.write(&self.buffered)?;
        }
        self.writer.stop_writing()?;
        self.state = State::Done;
        Ok(())
    }

    fn progress(&self) -> f64 {
        let percent = self.consumed_bytes as f64 * 100.0 / self.total_bytes as f64;
        let percent = (percent * 100.0).round() / 100.0;
        percent.min(100.0)
    }
}

impl Iterator for ProgressStream {
    type Item = Result<f64, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Streaming {
            return None;
        }

        let mut raw = String::new();
        let bytes_read = match self.reader.read_line(&mut raw) {
            Ok(bytes_read) => bytes_read,
            Err(source) => return self.fail(Error::ReadInput(source)),
        };
        if bytes_read == 0 {
            return match self.finalize() {
                Ok(()) => None,
                Err(error) => self.fail(error),
            };
        }

        self.line += 1;
        self.consumed_bytes += bytes_read as u64;

        match build_report(&raw, self.line, self.geolocator.as_deref()) {
            Ok(Some(report)) => {
                if self.writer.supports_incremental_write() {
                    if let Err(error) = self.writer.write(std::slice::from_ref(&report)) {
                        return self.fail(error);
                    }
                } else {
                    self.buffered.push(report);
                }
            }
            Ok(None) => {
                tracing::debug!(line = self.line, "order excluded from report");
            }
            Err(error) => return self.fail(error),
        }

        Some(Ok(self.progress()))
    }
}
