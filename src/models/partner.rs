use serde::{Deserialize, Serialize};
use std::fmt;

use crate::browser::{Record, Value};

/// Whether the company sells to, buys from, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartnerKind {
    Client,
    Supplier,
    Both,
}

impl Default for PartnerKind {
    fn default() -> Self {
        Self::Client
    }
}

impl fmt::Display for PartnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Supplier => write!(f, "supplier"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl From<&str> for PartnerKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "supplier" => Self::Supplier,
            "both" => Self::Both,
            _ => Self::Client,
        }
    }
}

impl PartnerKind {
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client | Self::Both)
    }

    pub fn is_supplier(&self) -> bool {
        matches!(self, Self::Supplier | Self::Both)
    }
}

/// A client or supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub kind: PartnerKind,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Partner {
    pub fn new(id: i64, name: &str, kind: PartnerKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            tax_id: None,
            email: None,
            phone: None,
            address: None,
            city: None,
        }
    }

    pub fn with_tax_id(mut self, tax_id: &str) -> Self {
        self.tax_id = Some(tax_id.to_string());
        self
    }

    pub fn with_contact(mut self, email: &str, phone: &str) -> Self {
        self.email = Some(email.to_string());
        self.phone = Some(phone.to_string());
        self
    }

    pub fn with_address(mut self, address: &str, city: &str) -> Self {
        self.address = Some(address.to_string());
        self.city = Some(city.to_string());
        self
    }
}

impl Record for Partner {
    fn field(&self, name: &str) -> Value {
        match name {
            "id" => Value::Int(self.id),
            "name" => Value::from(self.name.as_str()),
            "kind" => Value::from(self.kind.to_string()),
            "tax_id" => Value::from(self.tax_id.clone()),
            "email" => Value::from(self.email.clone()),
            "phone" => Value::from(self.phone.clone()),
            "address" => Value::from(self.address.clone()),
            "city" => Value::from(self.city.clone()),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_leniently() {
        assert_eq!(PartnerKind::from("Supplier"), PartnerKind::Supplier);
        assert_eq!(PartnerKind::from("BOTH"), PartnerKind::Both);
        assert_eq!(PartnerKind::from("anything"), PartnerKind::Client);
    }

    #[test]
    fn both_counts_as_client_and_supplier() {
        assert!(PartnerKind::Both.is_client());
        assert!(PartnerKind::Both.is_supplier());
        assert!(!PartnerKind::Client.is_supplier());
    }
}
