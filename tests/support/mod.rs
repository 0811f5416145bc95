//! Shared helpers for building synthetic order feeds.

use std::path::PathBuf;

use tempfile::TempDir;

/// One feed line: `items` as `(quantity, unit_price, product_id)`,
/// `discounts` as `(kind, value, priority)`.
pub fn order_line(order_id: u64, items: &[(u64, &str, u64)], discounts: &[(&str, &str, i32)]) -> String {
    let items: Vec<String> = items
        .iter()
        .map(|(quantity, unit_price, product_id)| {
            format!(
                r#"{{"quantity": {quantity}, "unit_price": {unit_price}, "product": {{"product_id": {product_id}}}}}"#
            )
        })
        .collect();
    let discounts: Vec<String> = discounts
        .iter()
        .map(|(kind, value, priority)| {
            format!(r#"{{"type": "{kind}", "value": {value}, "priority": {priority}}}"#)
        })
        .collect();

    format!(
        r#"{{"order_id": {order_id}, "order_date": "2021-03-07 12:13:29", "customer": {{"shipping_address": {{"street": "12 Example St", "suburb": "Richmond", "state": "VIC", "postcode": "3121"}}}}, "items": [{items}], "discounts": [{discounts}]}}"#,
        items = items.join(", "),
        discounts = discounts.join(", "),
    )
}

/// Writes the lines as a newline-terminated feed file inside `dir`.
pub fn write_feed(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("orders.jsonl");
    let mut feed = lines.join("\n");
    feed.push('\n');
    std::fs::write(&path, feed).expect("failed to write synthetic feed");
    path
}
