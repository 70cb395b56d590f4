use serde::{Deserialize, Serialize};

use crate::browser::{Record, Value};

/// A product the company buys and sells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub unit: String,
    pub purchase_price: f64,
    pub sale_price: f64,
    /// VAT rate in percent, e.g. 23.0
    pub vat_rate: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Product {
    pub fn new(id: i64, sku: &str, name: &str) -> Self {
        Self {
            id,
            sku: sku.to_string(),
            name: name.to_string(),
            category: None,
            unit: "pcs".to_string(),
            purchase_price: 0.0,
            sale_price: 0.0,
            vat_rate: 23.0,
            active: true,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_prices(mut self, purchase: f64, sale: f64) -> Self {
        self.purchase_price = purchase;
        self.sale_price = sale;
        self
    }

    pub fn with_vat_rate(mut self, vat_rate: f64) -> Self {
        self.vat_rate = vat_rate;
        self
    }

    pub fn margin(&self) -> f64 {
        self.sale_price - self.purchase_price
    }

    /// Margin as a percentage of the sale price
    pub fn margin_percent(&self) -> Option<f64> {
        if self.sale_price > 0.0 {
            Some(self.margin() / self.sale_price * 100.0)
        } else {
            None
        }
    }
}

impl Record for Product {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => Value::Int(self.id),
            "sku" => Value::from(self.sku.as_str()),
            "name" => Value::from(self.name.as_str()),
            "category" => Value::from(self.category.clone()),
            "unit" => Value::from(self.unit.as_str()),
            "purchase_price" => Value::Money(self.purchase_price),
            "sale_price" => Value::Money(self.sale_price),
            "vat_rate" => Value::Float(self.vat_rate),
            "margin" => Value::Money(self.margin()),
            "margin_percent" => Value::from(self.margin_percent()),
            "active" => Value::Bool(self.active),
            _ => Value::Null,
        }
    }
}
