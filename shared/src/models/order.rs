//! Order Snapshot Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a committed order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Committed order, as printed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub id: i64,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    /// None when the cashier did not pick one
    pub payment_method: Option<String>,
    #[serde(default)]
    pub operator_name: String,
    /// Unix timestamp (millis)
    pub created_at: i64,
}
