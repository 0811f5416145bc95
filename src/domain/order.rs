//! Input-side order types, mirroring one line of the order feed.
//!
//! The feed carries more attributes than the report consumes (customer
//! contact details, product titles and brands, shipping price); the
//! deserializer only models the fields some computation reads and lets
//! serde skip the rest.

use serde::Deserialize;

use crate::domain::Money;

/// One customer purchase, parsed from a single feed line.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    pub order_id: u64,
    /// Source-format timestamp; converted to ISO-8601 UTC by the report builder.
    pub order_date: String,
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub discounts: Vec<Discount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub quantity: u64,
    pub unit_price: Money,
    pub product: Product,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub product_id: u64,
}

/// A single discount descriptor attached to an order.
#[derive(Debug, Clone, Deserialize)]
pub struct Discount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: Money,
    pub priority: i32,
}

impl Discount {
    /// Dollar amount this discount takes off the given running total.
    pub(crate) fn amount_off(&self, running_total: Money) -> Money {
        match self.kind {
            DiscountKind::FixedAmount => self.value,
            DiscountKind::Percentage => running_total * self.value / Money::ONE_HUNDRED,
        }
    }
}

/// Discount kinds understood by the discount chain. The feed historically
/// spells the fixed kind `DOLLAR`; both spellings are accepted. Anything
/// else fails line parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DiscountKind {
    #[serde(rename = "FIXED_AMOUNT", alias = "DOLLAR")]
    FixedAmount,
    #[serde(rename = "PERCENTAGE")]
    Percentage,
}
