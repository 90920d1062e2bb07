//! Product records as the backend sends them. Read-only here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: Option<String>,
    pub alias: Option<String>,
    /// Number or numeric string; anything else reads as zero.
    pub selling_price: Option<Value>,
    pub price: Option<Value>,
    pub sku: Option<String>,
    pub upc: Option<String>,
}

impl Product {
    pub fn named(name: &str) -> Self {
        Product { name: Some(name.to_string()), ..Default::default() }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.selling_price = Some(Value::from(price));
        self
    }

    /// `selling_price`, else `price`, else 0. Zero and non-numeric values fall through.
    pub fn raw_price(&self) -> f64 {
        [&self.selling_price, &self.price]
            .into_iter()
            .filter_map(|field| field.as_ref().and_then(numeric))
            .find(|p| *p != 0.0)
            .unwrap_or(0.0)
    }
}

fn numeric(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
