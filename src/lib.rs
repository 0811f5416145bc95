//! Streaming order-report engine.
//!
//! A newline-delimited JSON order feed streams through [`ReportPipeline`],
//! each line becoming at most one [`OrderReport`] that a [`ReportWriter`]
//! renders into the selected encoding (CSV, JSON, JSONL, XML or YAML),
//! while the caller observes one progress percentage per input line.
//!
//! Encodings differ in one capability the pipeline cares about: CSV and
//! JSONL append records as they arrive, the document formats buffer the
//! whole record sequence and write once at the end of the run. Orders
//! whose post-discount total is exactly zero are excluded from the report
//! without failing the run; malformed input is fatal.
//!
//! # Example
//!
//! ```no_run
//! use order_report_rs::{OutputFormat, ReportPipeline, ReportWriter};
//!
//! # fn main() -> Result<(), order_report_rs::Error> {
//! let writer = ReportWriter::create("data", "orders", OutputFormat::Csv)?;
//! let mut run = ReportPipeline::new("data/orders.jsonl", writer, None).run()?;
//! for progress in &mut run {
//!     println!("{}%", progress?);
//! }
//! assert!(run.writer().artifact_exists());
//! # Ok(())
//! # }
//! ```

mod config;
mod domain;
mod engine;
mod error;
mod fetch;
mod geo;
mod input;
mod mail;
mod output;
mod telemetry;

pub use config::{Config, ConfigError, DEFAULT_GEOCODER_URL, MailConfig};
pub use domain::{
    Coordinates, Customer, Discount, DiscountKind, Money, OrderItem, OrderReport, Product,
    RawOrder, ShippingAddress,
};
pub use engine::{
    ProgressStream, ReportPipeline, apply_discounts, average_unit_price, build_report,
    distinct_unit_count, total_order_value, total_units_count,
};
pub use error::Error;
pub use fetch::{FetchError, download_feed};
pub use geo::{GeoError, Geolocate, OsmGeocoder};
pub use mail::{MailError, send_report};
pub use output::{OutputFormat, ReportWriter};
pub use telemetry::setup_logging;
