//! Stock movement types.
//!
//! A movement is either an entry (stock increase) or an exit (stock decrease,
//! "baixa") recorded against one product. Requests are transient; the recorded
//! history comes back from `GET /api/movimentacoes` as [`MovementRecord`]s.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Stock increase.
    #[serde(rename = "ENTRADA")]
    Entry,
    /// Stock decrease.
    #[serde(rename = "SAIDA")]
    Exit,
}

impl MovementKind {
    /// Path segment of the endpoint that records this kind of movement.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Entry => "entrada",
            Self::Exit => "baixa",
        }
    }

    /// Title of the movement modal.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Entry => "Entrada de Estoque",
            Self::Exit => "Baixa de Estoque",
        }
    }

    /// Label used in alerts and the history list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entrada",
            Self::Exit => "Baixa",
        }
    }
}

/// A movement to be recorded against a product.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRequest {
    pub product_id: i64,
    pub kind: MovementKind,
    pub quantidade: f64,
    pub observacao: String,
}

/// JSON body sent to the entry and exit endpoints.
#[derive(Debug, Serialize)]
pub struct MovementPayload<'a> {
    pub quantidade: f64,
    pub observacao: &'a str,
}

impl MovementRequest {
    #[must_use]
    pub fn payload(&self) -> MovementPayload<'_> {
        MovementPayload {
            quantidade: self.quantidade,
            observacao: &self.observacao,
        }
    }
}

/// A recorded movement from the history endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovementRecord {
    pub id: i64,
    pub produto_id: i64,
    #[serde(default)]
    pub produto_descricao: Option<String>,
    #[serde(deserialize_with = "deserialize_kind")]
    pub tipo: MovementKind,
    pub quantidade: f64,
    #[serde(default)]
    pub observacao: Option<String>,
    #[serde(default)]
    pub data_movimentacao: Option<NaiveDateTime>,
}

/// The server writes `"ENTRADA"` for entries and `"SAIDA"` for exits; unknown values
/// are shown as exits.
fn deserialize_kind<'de, D>(deserializer: D) -> Result<MovementKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(if raw == "ENTRADA" {
        MovementKind::Entry
    } else {
        MovementKind::Exit
    })
}

impl MovementRecord {
    /// Date in the `dd/mm/yyyy HH:MM` form, or an empty string when unknown.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.data_movimentacao
            .map(|date| date.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_depends_on_kind() {
        assert_eq!(MovementKind::Entry.endpoint(), "entrada");
        assert_eq!(MovementKind::Exit.endpoint(), "baixa");
    }

    #[test]
    fn payload_serializes_quantity_and_note() {
        let request = MovementRequest {
            product_id: 3,
            kind: MovementKind::Exit,
            quantidade: 2.5,
            observacao: "quebra".to_string(),
        };

        let value = serde_json::to_value(request.payload()).unwrap();

        assert_eq!(value, serde_json::json!({"quantidade": 2.5, "observacao": "quebra"}));
    }

    #[test]
    fn record_parses_history_entry() {
        let json = r#"{
            "id": 1,
            "produto_id": 3,
            "produto_descricao": "Arroz 5kg",
            "tipo": "SAIDA",
            "quantidade": 2.0,
            "observacao": "",
            "data_movimentacao": "2024-05-02T08:30:00"
        }"#;

        let record: MovementRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.tipo, MovementKind::Exit);
        assert_eq!(record.display_date(), "02/05/2024 08:30");
    }
}
