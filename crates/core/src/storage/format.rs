use csv::StringRecord;

use crate::errors::CoreError;
use crate::models::order::{parse_category, parse_price, parse_timestamp, OrderRecord};

/// Column holding the order identifier.
pub const ORDER_ID_COLUMN: &str = "order_id";

/// Column holding the purchase timestamp.
pub const TIMESTAMP_COLUMN: &str = "order_purchase_timestamp";

/// Column holding the line item price.
pub const PRICE_COLUMN: &str = "price";

/// Column holding the (nullable) product category.
pub const CATEGORY_COLUMN: &str = "product_category_name";

/// Columns every input file must provide. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    ORDER_ID_COLUMN,
    TIMESTAMP_COLUMN,
    PRICE_COLUMN,
    CATEGORY_COLUMN,
];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub order_id: usize,
    pub purchased_at: usize,
    pub price: usize,
    pub category: usize,
}

/// Locate the required columns in `headers`.
///
/// Header names are matched exactly after trimming surrounding whitespace
/// and a leading byte-order mark.
pub fn read_layout(headers: &StringRecord) -> Result<ColumnLayout, CoreError> {
    let find = |name: &str| -> Result<usize, CoreError> {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == name)
            .ok_or_else(|| CoreError::MissingColumn(name.to_string()))
    };

    Ok(ColumnLayout {
        order_id: find(ORDER_ID_COLUMN)?,
        purchased_at: find(TIMESTAMP_COLUMN)?,
        price: find(PRICE_COLUMN)?,
        category: find(CATEGORY_COLUMN)?,
    })
}

/// Turn one data row into an [`OrderRecord`].
///
/// `line` is the 1-based line in the source file, used in error messages.
pub fn parse_row(
    layout: &ColumnLayout,
    row: &StringRecord,
    line: u64,
) -> Result<OrderRecord, CoreError> {
    let order_id = field(row, layout.order_id, ORDER_ID_COLUMN, line)?.trim();
    if order_id.is_empty() {
        return Err(CoreError::InvalidField {
            row: line,
            column: ORDER_ID_COLUMN.to_string(),
            message: "order id is empty".to_string(),
        });
    }

    let raw_ts = field(row, layout.purchased_at, TIMESTAMP_COLUMN, line)?;
    let purchased_at = parse_timestamp(raw_ts).ok_or_else(|| CoreError::InvalidField {
        row: line,
        column: TIMESTAMP_COLUMN.to_string(),
        message: format!("unparseable timestamp '{raw_ts}'"),
    })?;

    let raw_price = field(row, layout.price, PRICE_COLUMN, line)?;
    let price = parse_price(raw_price).ok_or_else(|| CoreError::InvalidField {
        row: line,
        column: PRICE_COLUMN.to_string(),
        message: format!("non-numeric price '{raw_price}'"),
    })?;

    let category = parse_category(field(row, layout.category, CATEGORY_COLUMN, line)?);

    Ok(OrderRecord::new(order_id, purchased_at, price, category))
}

fn field<'r>(row: &'r StringRecord, idx: usize, column: &str, line: u64) -> Result<&'r str, CoreError> {
    row.get(idx).ok_or_else(|| CoreError::InvalidField {
        row: line,
        column: column.to_string(),
        message: "field is missing".to_string(),
    })
}
