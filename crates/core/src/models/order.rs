use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Display label for line items with no product category.
pub const UNKNOWN_CATEGORY: &str = "(unknown)";

/// Wall-clock formats accepted for `order_purchase_timestamp`, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// One purchased line item. Several records may share an `order_id`.
///
/// Records are immutable inputs: services only ever borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier (not unique across line items)
    pub order_id: String,

    /// Purchase timestamp, the temporal axis of every report
    pub purchased_at: NaiveDateTime,

    /// Line item price
    pub price: f64,

    /// Product category label; `None` when the source field was empty
    #[serde(default)]
    pub category: Option<String>,
}

impl OrderRecord {
    pub fn new(
        order_id: impl Into<String>,
        purchased_at: NaiveDateTime,
        price: f64,
        category: Option<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            purchased_at,
            price,
            category,
        }
    }

    /// Calendar-day bucket of this line item.
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchased_at.date()
    }

    /// Category as shown to users (`(unknown)` for missing labels).
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }
}

/// Parse a purchase timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS[.fff]` (space or `T`), minute precision,
/// RFC 3339 (the offset is dropped, wall-clock time kept) and bare dates
/// (midnight). Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a price field. Non-finite values count as non-numeric.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Normalise a raw category field: empty means missing.
///
/// The label itself is kept verbatim (no trimming or case folding), so
/// `"electronics"` and `"Electronics"` stay distinct.
pub fn parse_category(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
