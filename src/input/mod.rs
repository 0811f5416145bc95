//! Module defining the parsing logic used to convert one raw feed line into
//! the validated domain types consumed by the report engine.

use crate::domain::RawOrder;
use crate::error::Error;


/// Parses a single feed line (one self-contained JSON order record).
///
/// `line` is the 1-based position of the line in the feed, used only for
/// error context. A parse failure is fatal to the surrounding run.
pub(crate) fn parse_order(raw: &str, line: u64) -> Result<RawOrder, Error> {
    serde_json::from_str(raw).map_err(|source| Error::MalformedLine { line, source })
}
