//! The line-to-report transform: parse one raw feed line, aggregate it,
//! and produce one report record or a skip decision.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::domain::{Coordinates, OrderReport, RawOrder, round_money};
use crate::engine::aggregate;
use crate::error::Error;
use crate::geo::Geolocate;
use crate::input::parse_order;

/// Builds the report record for one raw feed line.
///
/// Returns `Ok(None)` when the order's post-discount total is exactly zero:
/// such orders are excluded from the report by business rule, not by error.
/// `line` is the 1-based feed position, used for error context only.
///
/// Geolocation enrichment runs only when a `geolocator` is supplied and is
/// best-effort: any lookup failure degrades to zero coordinates instead of
/// failing the report. With no geolocator the coordinate fields are absent
/// from the record altogether.
pub fn build_report(
    raw: &str,
    line: u64,
    geolocator: Option<&dyn Geolocate>,
) -> Result<Option<OrderReport>, Error> {
    let order = parse_order(raw, line)?;

    let total_order_value = aggregate::total_order_value(&order);
    if total_order_value.is_zero() {
        return Ok(None);
    }

    Ok(Some(OrderReport {
        order_id: order.order_id,
        order_datetime: to_iso8601_utc(&order.order_date, order.order_id)?,
        total_order_value: round_money(total_order_value),
        average_unit_price: aggregate::average_unit_price(&order)?,
        distinct_unit_count: aggregate::distinct_unit_count(&order),
        total_units_count: aggregate::total_units_count(&order),
        customer_state: order.customer.shipping_address.state.clone(),
        coordinates: geolocator.map(|geolocator| locate_or_zero(geolocator, &order)),
    }))
}

fn locate_or_zero(geolocator: &dyn Geolocate, order: &RawOrder) -> Coordinates {
    match geolocator.locate(&order.customer.shipping_address) {
        Ok(coordinates) => coordinates,
        Err(error) => {
            tracing::warn!(
                order_id = order.order_id,
                %error,
                "geolocation lookup failed, falling back to zero coordinates"
            );
            Coordinates::ZERO
        }
    }
}

/// Converts a source-format order timestamp to ISO-8601 in UTC.
///
/// Accepted source forms: RFC 3339, `%Y-%m-%d %H:%M:%S %z`, and the naive
/// `%Y-%m-%d %H:%M:%S` (interpreted as UTC).
pub(crate) fn to_iso8601_utc(raw: &str, order_id: u64) -> Result<String, Error> {
    let parsed: DateTime<Utc> = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .map(|datetime| datetime.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|datetime| datetime.and_utc())
        })
        .map_err(|_| Error::DateParse {
            order_id,
            value: raw.to_string(),
        })?;

    Ok(parsed.to_rfc3339_opts(SecondsFormat::Secs, false))
}
