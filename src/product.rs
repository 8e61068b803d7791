use crate::{config::ImportConfig, records::ProductRow, sql::SqlValue};

/// A product ready to be written, with every default already applied.
#[derive(Debug, PartialEq, Clone)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub cat_15ml: Option<String>,
    pub cat_30ml: Option<String>,
    pub cat_70ml: Option<String>,
    pub price_15ml: f64,
    pub price_30ml: f64,
    pub price_70ml: f64,
    pub stock_total: i64,
    pub stock_15ml: i64,
    pub stock_30ml: i64,
    pub stock_70ml: i64,
    pub alert_threshold: i64,
}

impl Product {
    /// Builds a product from a decoded row, or `None` when the row has no
    /// name.
    ///
    /// Blank brand and category fall back to the configured labels, while
    /// blank sub-categories stay `None` and are written as `NULL`.
    pub fn from_row(row: &ProductRow, config: &ImportConfig) -> Option<Self> {
        let name = row.name.trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_owned(),
            brand: row
                .brand
                .clone()
                .unwrap_or_else(|| config.default_brand.clone()),
            category: row
                .category
                .clone()
                .unwrap_or_else(|| config.default_category.clone()),
            cat_15ml: row.cat_15ml.clone(),
            cat_30ml: row.cat_30ml.clone(),
            cat_70ml: row.cat_70ml.clone(),
            price_15ml: row.price_15ml,
            price_30ml: row.price_30ml,
            price_70ml: row.price_70ml,
            stock_total: row.stock_total,
            stock_15ml: row.stock_15ml,
            stock_30ml: row.stock_30ml,
            stock_70ml: row.stock_70ml,
            alert_threshold: config.alert_threshold,
        })
    }

    /// Column values in the order of `ImportConfig::columns`.
    pub fn values(&self) -> [SqlValue; 14] {
        [
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.brand.clone()),
            SqlValue::Text(self.category.clone()),
            SqlValue::from(self.cat_15ml.clone()),
            SqlValue::from(self.cat_30ml.clone()),
            SqlValue::from(self.cat_70ml.clone()),
            SqlValue::Float(self.price_15ml),
            SqlValue::Float(self.price_30ml),
            SqlValue::Float(self.price_70ml),
            SqlValue::Integer(self.stock_total),
            SqlValue::Integer(self.stock_15ml),
            SqlValue::Integer(self.stock_30ml),
            SqlValue::Integer(self.stock_70ml),
            SqlValue::Integer(self.alert_threshold),
        ]
    }
}
