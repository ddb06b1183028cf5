//! Request identity and the latest-request-wins guard.
//!
//! Every request goes out with a small context map that the host hands back
//! untouched with the response. The map names the operation and a sequence number;
//! [`RequestTracker`] uses both to tell whether a response still matters.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::StockboardError;

const KIND_KEY: &str = "request";
const SEQ_KEY: &str = "seq";

/// The operation a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKind {
    Dashboard,
    Products,
    CreateProduct,
    MovementEntry,
    MovementExit,
    History,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Products => "products",
            Self::CreateProduct => "create_product",
            Self::MovementEntry => "movement_entry",
            Self::MovementExit => "movement_exit",
            Self::History => "history",
        }
    }

    /// Whether only the most recent response of this kind may be applied.
    ///
    /// Reads are superseded by newer reads. Mutations always report back.
    #[must_use]
    pub const fn latest_wins(self) -> bool {
        matches!(self, Self::Dashboard | Self::Products | Self::History)
    }
}

impl FromStr for RequestKind {
    type Err = StockboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dashboard" => Ok(Self::Dashboard),
            "products" => Ok(Self::Products),
            "create_product" => Ok(Self::CreateProduct),
            "movement_entry" => Ok(Self::MovementEntry),
            "movement_exit" => Ok(Self::MovementExit),
            "history" => Ok(Self::History),
            other => Err(StockboardError::Decode(format!("unknown request kind '{other}'"))),
        }
    }
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub kind: RequestKind,
    pub seq: u64,
}

impl RequestContext {
    /// Encodes the context into the map passed alongside `web_request`.
    #[must_use]
    pub fn to_map(self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (KIND_KEY.to_string(), self.kind.as_str().to_string()),
            (SEQ_KEY.to_string(), self.seq.to_string()),
        ])
    }

    /// Decodes the context the host returned with a response.
    ///
    /// # Errors
    ///
    /// Returns [`StockboardError::Decode`] when a key is missing or malformed,
    /// which happens for responses this plugin did not issue.
    pub fn from_map(map: &BTreeMap<String, String>) -> crate::Result<Self> {
        let kind = map
            .get(KIND_KEY)
            .ok_or_else(|| StockboardError::Decode("response without request kind".to_string()))?
            .parse()?;
        let seq = map
            .get(SEQ_KEY)
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| StockboardError::Decode("response without sequence number".to_string()))?;

        Ok(Self { kind, seq })
    }
}

/// Hands out sequence numbers and remembers the latest one per kind.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_seq: u64,
    latest: BTreeMap<RequestKind, u64>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new context for `kind`, superseding earlier ones of the same kind.
    pub fn issue(&mut self, kind: RequestKind) -> RequestContext {
        self.next_seq += 1;
        self.latest.insert(kind, self.next_seq);
        RequestContext {
            kind,
            seq: self.next_seq,
        }
    }

    /// Whether a response for `context` should be applied.
    #[must_use]
    pub fn is_current(&self, context: RequestContext) -> bool {
        if !context.kind.latest_wins() {
            return true;
        }
        self.latest.get(&context.kind) == Some(&context.seq)
    }

    /// Makes every outstanding request of `kind` stale.
    pub fn invalidate(&mut self, kind: RequestKind) {
        self.latest.remove(&kind);
    }
}
