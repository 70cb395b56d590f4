use serde::{Deserialize, Serialize};

/// The issuing company printed on invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub iban: String,
}

impl Default for Company {
    fn default() -> Self {
        Self {
            name: "My Trading Company".to_string(),
            tax_id: String::new(),
            address: String::new(),
            city: String::new(),
            email: String::new(),
            phone: String::new(),
            iban: String::new(),
        }
    }
}
