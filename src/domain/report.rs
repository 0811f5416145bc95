//! The derived, per-order summary record emitted to the output artifact.

use serde::Serialize;

use crate::domain::Money;

/// The report derived from one order. Field declaration order is the
/// column/key order of every output encoding.
///
/// `coordinates` is `None` unless geolocation enrichment was requested;
/// in that case the latitude/longitude keys are entirely absent from the
/// rendered record (not null, not zero), so encodings never emit empty
/// columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReport {
    pub order_id: u64,
    /// ISO-8601 UTC timestamp, `+00:00` offset form.
    pub order_datetime: String,
    pub total_order_value: Money,
    pub average_unit_price: Money,
    pub distinct_unit_count: usize,
    pub total_units_count: u64,
    pub customer_state: String,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Fallback when an enrichment lookup fails or returns nothing.
    pub const ZERO: Coordinates = Coordinates {
        latitude: 0.0,
        longitude: 0.0,
    };
}
