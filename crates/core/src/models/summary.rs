use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::order::UNKNOWN_CATEGORY;

/// Orders and revenue for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The calendar day (start-of-day bucket)
    pub date: NaiveDate,

    /// Distinct order ids purchased that day
    pub total_orders: usize,

    /// Sum of line item prices that day
    pub total_sales: f64,
}

impl DailySummary {
    /// A gap day with no purchases.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_orders: 0,
            total_sales: 0.0,
        }
    }
}

/// Orders and revenue for one product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category label; `None` groups line items without a category
    pub category: Option<String>,

    /// Distinct order ids with at least one line item in this category
    pub total_orders: usize,

    /// Sum of line item prices in this category
    pub total_sales: f64,
}

impl CategorySummary {
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }

    /// Label for rendered output. A real category spelled exactly like the
    /// missing-label placeholder is quoted so the two never print the same.
    pub fn display_label(&self) -> Cow<'_, str> {
        match self.category.as_deref() {
            None => Cow::Borrowed(UNKNOWN_CATEGORY),
            Some(UNKNOWN_CATEGORY) => Cow::Owned(format!("\"{UNKNOWN_CATEGORY}\"")),
            Some(label) => Cow::Borrowed(label),
        }
    }
}
