//! Module for the types defining the order-report domain.

mod order;
mod report;

pub use order::{Customer, Discount, DiscountKind, OrderItem, Product, RawOrder, ShippingAddress};
pub use report::{Coordinates, OrderReport};

use rust_decimal::{Decimal, RoundingStrategy};

pub type Money = Decimal;

/// Rounds a monetary amount to 2 decimal places, half away from zero.
pub(crate) fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
