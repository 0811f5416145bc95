//! Pure per-order computations: the discount chain and the four aggregates
//! feeding the report record.

use std::collections::HashSet;

use crate::domain::{Discount, Money, RawOrder, round_money};
use crate::error::Error;

/// Applies a discount chain to a pre-discount total.
///
/// Discounts are applied ascending by priority; each one computes its
/// dollar reduction against the *running* total, not the original one.
/// The sort is stable, so discounts with equal priorities keep their feed
/// order. The result is rounded to 2 decimal places after the whole chain;
/// an empty chain returns the total unchanged.
pub fn apply_discounts(total: Money, discounts: &[Discount]) -> Money {
    if discounts.is_empty() {
        return total;
    }

    let mut ordered: Vec<&Discount> = discounts.iter().collect();
    ordered.sort_by_key(|discount| discount.priority);

    let mut running = total;
    for discount in ordered {
        running -= discount.amount_off(running);
    }

    round_money(running)
}

/// Total order value: Σ(unit_price × quantity) with the discount chain
/// applied. A result of exactly zero marks the order as excluded from the
/// report; that decision belongs to the report builder.
pub fn total_order_value(order: &RawOrder) -> Money {
    let gross: Money = order
        .items
        .iter()
        .map(|item| item.unit_price * Money::from(item.quantity))
        .sum();

    apply_discounts(gross, &order.discounts)
}

/// Average unit price over the order's line items, rounded to 2 decimal
/// places. An order without items is malformed input.
pub fn average_unit_price(order: &RawOrder) -> Result<Money, Error> {
    if order.items.is_empty() {
        return Err(Error::EmptyOrder {
            order_id: order.order_id,
        });
    }

    let price_sum: Money = order.items.iter().map(|item| item.unit_price).sum();
    Ok(round_money(
        price_sum / Money::from(order.items.len() as u64),
    ))
}

/// Number of distinct products referenced by the order's line items.
pub fn distinct_unit_count(order: &RawOrder) -> usize {
    order
        .items
        .iter()
        .map(|item| item.product.product_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Total number of units across all line items.
pub fn total_units_count(order: &RawOrder) -> u64 {
    order.items.iter().map(|item| item.quantity).sum()
}
