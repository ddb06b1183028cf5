//! Product domain model.
//!
//! A product is an inventory line as reported by the stock-control API. The stock
//! status is computed by the server and only ever displayed here; the client never
//! derives it from the quantities.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default unit shown for products that have none and used by the add form.
pub const DEFAULT_UNIT: &str = "UNIDADE";

/// Default minimum-stock threshold used by the add form.
pub const DEFAULT_MINIMUM_STOCK: f64 = 5.0;

/// Stock status as computed by the server.
///
/// The wire values are `"OK"` and `"BAIXO"`; anything else is treated as
/// depleted (the server sends `"ESGOTADO"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    /// Stock above the minimum threshold.
    Ok,
    /// Stock at or below the minimum threshold but not empty.
    Low,
    /// No stock left.
    Depleted,
}

impl StockStatus {
    /// Wire value used by the API, both in responses and in the `status` filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Low => "BAIXO",
            Self::Depleted => "ESGOTADO",
        }
    }
}

impl From<String> for StockStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "OK" => Self::Ok,
            "BAIXO" => Self::Low,
            _ => Self::Depleted,
        }
    }
}

impl From<StockStatus> for String {
    fn from(value: StockStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory product as returned by `GET /api/produtos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub descricao: String,
    #[serde(default)]
    pub unidade: Option<String>,
    #[serde(default)]
    pub fornecimento: f64,
    #[serde(default)]
    pub estoque: f64,
    #[serde(default = "default_minimum_stock")]
    pub estoque_minimo: f64,
    pub status_estoque: StockStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

const fn default_minimum_stock() -> f64 {
    DEFAULT_MINIMUM_STOCK
}

impl Product {
    /// Unit to display, falling back to [`DEFAULT_UNIT`] when the server has none.
    #[must_use]
    pub fn display_unit(&self) -> &str {
        self.unidade
            .as_deref()
            .filter(|unit| !unit.is_empty())
            .unwrap_or(DEFAULT_UNIT)
    }
}

/// Payload of `POST /api/produtos`.
///
/// `Default` holds the values the add-product form starts from and returns to
/// whenever it is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub descricao: String,
    pub unidade: String,
    pub fornecimento: f64,
    pub estoque: f64,
    pub estoque_minimo: f64,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            descricao: String::new(),
            unidade: DEFAULT_UNIT.to_string(),
            fornecimento: 0.0,
            estoque: 0.0,
            estoque_minimo: DEFAULT_MINIMUM_STOCK,
        }
    }
}

/// Formats a quantity the way the web page displayed numbers.
///
/// Whole numbers lose their fractional part (`12.0` → `"12"`), everything else keeps
/// Rust's shortest round-trip representation.
///
/// # Examples
///
/// ```
/// use stockboard::domain::product::format_quantity;
///
/// assert_eq!(format_quantity(12.0), "12");
/// assert_eq!(format_quantity(2.5), "2.5");
/// assert_eq!(format_quantity(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_quantity(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values_and_falls_back_to_depleted() {
        let ok: StockStatus = serde_json::from_str("\"OK\"").unwrap();
        let low: StockStatus = serde_json::from_str("\"BAIXO\"").unwrap();
        let gone: StockStatus = serde_json::from_str("\"ESGOTADO\"").unwrap();
        let odd: StockStatus = serde_json::from_str("\"???\"").unwrap();

        assert_eq!(ok, StockStatus::Ok);
        assert_eq!(low, StockStatus::Low);
        assert_eq!(gone, StockStatus::Depleted);
        assert_eq!(odd, StockStatus::Depleted);
    }

    #[test]
    fn product_deserializes_server_payload() {
        let json = r#"{
            "id": 7,
            "descricao": "Leite integral 1L",
            "unidade": null,
            "fornecimento": 10.0,
            "estoque": 3.0,
            "estoque_minimo": 5.0,
            "created_at": "2024-03-01T10:15:30.123456",
            "updated_at": null,
            "status_estoque": "BAIXO"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.display_unit(), "UNIDADE");
        assert_eq!(product.status_estoque, StockStatus::Low);
        assert!(product.created_at.is_some());
        assert!(product.updated_at.is_none());
    }

    #[test]
    fn new_product_defaults_match_form_reset_values() {
        let defaults = NewProduct::default();

        assert_eq!(defaults.unidade, "UNIDADE");
        assert_eq!(defaults.fornecimento, 0.0);
        assert_eq!(defaults.estoque, 0.0);
        assert_eq!(defaults.estoque_minimo, 5.0);
        assert!(defaults.descricao.is_empty());
    }

    #[test]
    fn non_finite_fields_serialize_as_null() {
        let payload = NewProduct {
            descricao: "Caneta".to_string(),
            fornecimento: f64::NAN,
            ..NewProduct::default()
        };

        let value = serde_json::to_value(&payload).unwrap();

        assert!(value["fornecimento"].is_null());
        assert_eq!(value["estoque_minimo"], 5.0);
    }
}
