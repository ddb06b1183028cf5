//! Dashboard summary counts.

use serde::Deserialize;

/// Aggregate product counts by stock status, from `GET /api/dashboard`.
///
/// Replaced wholesale on every fetch. The server names the low-stock count
/// `produtos_baixo_estoque`; `produtos_baixo` is accepted as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_produtos: u64,
    #[serde(default)]
    pub produtos_ok: u64,
    #[serde(default, alias = "produtos_baixo_estoque")]
    pub produtos_baixo: u64,
    #[serde(default)]
    pub produtos_esgotados: u64,
}
