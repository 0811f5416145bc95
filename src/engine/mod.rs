//! Module for the core logic of the report engine: discount arithmetic,
//! per-order aggregation, the line-to-report transform, and the streaming
//! pipeline driving all three.

mod aggregate;
mod builder;
mod pipeline;


pub use aggregate::{
    apply_discounts, average_unit_price, distinct_unit_count, total_order_value, total_units_count,
};
pub use builder::build_report;
pub use pipeline::{ProgressStream, ReportPipeline};
