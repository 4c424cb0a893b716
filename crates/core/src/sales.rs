//! Sale status lifecycle, price computation, and sales statistics.
//!
//! Status strings must match the `sales.status` CHECK constraint.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_COMPLETED, STATUS_CANCELLED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl SaleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SaleStatus::Pending => STATUS_PENDING,
            SaleStatus::Completed => STATUS_COMPLETED,
            SaleStatus::Cancelled => STATUS_CANCELLED,
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(SaleStatus::Pending),
            STATUS_COMPLETED => Ok(SaleStatus::Completed),
            STATUS_CANCELLED => Ok(SaleStatus::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid status. Must be: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for SaleStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity <= 0 {
        return Err(CoreError::Validation(
            "Quantity must be a positive integer".into(),
        ));
    }
    Ok(())
}

/// Largest value `sales.total_price` (`NUMERIC(14,2)`) can hold.
pub fn max_total_price() -> Decimal {
    Decimal::new(99_999_999_999_999, 2)
}

/// Total price of a sale: unit price times quantity.
///
/// Quantity must be positive and the total must fit `sales.total_price`.
pub fn compute_total(unit_price: Decimal, quantity: i32) -> Result<Decimal, CoreError> {
    validate_quantity(quantity)?;
    unit_price
        .checked_mul(Decimal::from(quantity))
        .filter(|total| total.round_dp(2) <= max_total_price())
        .ok_or_else(|| CoreError::Validation("Total price is out of range".into()))
}

/// The parts of a sale that statistics are computed from.
#[derive(Debug, Clone, Copy)]
pub struct SaleLine<'a> {
    pub status: SaleStatus,
    pub quantity: i32,
    pub total_price: Decimal,
    /// `None` when the product has since been deleted.
    pub product_title: Option<&'a str>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// Aggregate figures over a set of sales.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_sales: i64,
    /// Sum of `total_price` across every sale, whatever its status.
    pub total_revenue: Decimal,
    pub sales_by_status: StatusCounts,
}

/// Summarize sales into counts and revenue.
pub fn summarize<'a>(lines: impl IntoIterator<Item = SaleLine<'a>>) -> SalesSummary {
    let mut summary = SalesSummary::default();
    for line in lines {
        summary.total_sales += 1;
        summary.total_revenue += line.total_price;
        match line.status {
            SaleStatus::Pending => summary.sales_by_status.pending += 1,
            SaleStatus::Completed => summary.sales_by_status.completed += 1,
            SaleStatus::Cancelled => summary.sales_by_status.cancelled += 1,
        }
    }
    summary
}

/// Units sold per product title. Sales whose product is gone are skipped.
pub fn units_by_product<'a>(
    lines: impl IntoIterator<Item = SaleLine<'a>>,
) -> BTreeMap<String, i64> {
    let mut units: BTreeMap<String, i64> = BTreeMap::new();
    for line in lines {
        if let Some(title) = line.product_title {
            *units.entry(title.to_string()).or_insert(0) += i64::from(line.quantity);
        }
    }
    units
}
