use std::collections::{HashMap, HashSet};

use crate::errors::CoreError;
use crate::models::order::OrderRecord;
use crate::models::summary::CategorySummary;

/// Groups line items by product category.
///
/// Labels are compared by exact string equality. Line items without a
/// category share one `None` bucket instead of being dropped.
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `records` into one [`CategorySummary`] per distinct label,
    /// in order of first appearance.
    pub fn aggregate<'a, I>(&self, records: I) -> Result<Vec<CategorySummary>, CoreError>
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        let mut index: HashMap<Option<&'a str>, usize> = HashMap::new();
        let mut groups: Vec<(Option<&'a str>, HashSet<&'a str>, f64)> = Vec::new();

        for record in records {
            if !record.price.is_finite() {
                return Err(CoreError::InvalidInput(format!(
                    "order {} has non-numeric price {}",
                    record.order_id, record.price
                )));
            }
            let key = record.category.as_deref();
            let idx = *index.entry(key).or_insert_with(|| {
                groups.push((key, HashSet::new(), 0.0));
                groups.len() - 1
            });
            let (_, orders, sales) = &mut groups[idx];
            orders.insert(record.order_id.as_str());
            *sales += record.price;
        }

        Ok(groups
            .into_iter()
            .map(|(category, orders, sales)| CategorySummary {
                category: category.map(str::to_string),
                total_orders: orders.len(),
                total_sales: sales,
            })
            .collect())
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
