use serde::{Deserialize, Serialize};

use super::Product;
use crate::browser::{Record, Value};

/// Quantity of one product held in one warehouse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product_id: i64,
    /// Joined product, absent when the product row is missing
    #[serde(default)]
    pub product: Option<Product>,
    pub warehouse: String,
    pub quantity: f64,
    #[serde(default)]
    pub reorder_level: f64,
}

impl StockLevel {
    pub fn new(product_id: i64, warehouse: &str, quantity: f64) -> Self {
        Self {
            product_id,
            product: None,
            warehouse: warehouse.to_string(),
            quantity,
            reorder_level: 0.0,
        }
    }

    pub fn with_reorder_level(mut self, reorder_level: f64) -> Self {
        self.reorder_level = reorder_level;
        self
    }

    pub fn is_low(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Stock valued at purchase price
    pub fn value(&self) -> Option<f64> {
        self.product.as_ref().map(|p| p.purchase_price * self.quantity)
    }
}

impl Record for StockLevel {
    fn field(&self, name: &str) -> Value {
        match name {
            "product_id" => Value::Int(self.product_id),
            "warehouse" => Value::from(self.warehouse.as_str()),
            "quantity" => Value::Float(self.quantity),
            "reorder_level" => Value::Float(self.reorder_level),
            "low" => Value::Bool(self.is_low()),
            "value" => self.value().map(Value::Money).unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    fn relation(&self, name: &str) -> Option<&dyn Record> {
        match name {
            "product" => self.product.as_ref().map(|p| p as &dyn Record),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_at_or_below_reorder_level() {
        let level = StockLevel::new(1, "Main", 5.0).with_reorder_level(5.0);
        assert!(level.is_low());
        assert!(!StockLevel::new(1, "Main", 6.0).with_reorder_level(5.0).is_low());
    }

    #[test]
    fn value_needs_joined_product() {
        let mut level = StockLevel::new(1, "Main", 4.0);
        assert!(level.field("value").is_null());

        level.product = Some(Product::new(1, "A-1", "Widget").with_prices(2.5, 4.0));
        assert_eq!(level.field("value"), Value::Money(10.0));
    }
}
