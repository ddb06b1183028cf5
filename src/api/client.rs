//! Request builder for the stock-control REST API.
//!
//! The plugin cannot perform I/O itself: [`ApiClient`] only describes requests as
//! [`ApiRequest`] values, which the plugin shim hands to Zellij's `web_request`.
//! Responses come back later as events and are decoded by [`super::response`].

use std::collections::BTreeMap;

use crate::domain::{MovementRequest, NewProduct, ProductQuery};

use super::request::{RequestContext, RequestKind};
use super::trace;

/// Default base URL of the API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default number of products per page.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Number of history entries fetched for the movement history modal.
pub const HISTORY_PER_PAGE: u32 = 10;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully described HTTP request, ready to be executed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

/// Builds requests against one API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
    per_page: u32,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_PER_PAGE)
    }
}

impl ApiClient {
    /// Creates a client for `base_url`. A trailing slash is ignored and a zero
    /// `per_page` falls back to the default.
    #[must_use]
    pub fn new(base_url: &str, per_page: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page: if per_page == 0 { DEFAULT_PER_PAGE } else { per_page },
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// `GET /api/dashboard`.
    #[must_use]
    pub fn dashboard(&self, context: RequestContext) -> ApiRequest {
        debug_assert_eq!(context.kind, RequestKind::Dashboard);
        self.get("/api/dashboard", &[], context)
    }

    /// `GET /api/produtos` for one page of the product list.
    ///
    /// `search` is always sent, even when empty; `status` only when a filter is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockboard::api::{ApiClient, RequestTracker, RequestKind};
    /// use stockboard::domain::ProductQuery;
    ///
    /// let client = ApiClient::new("http://api.local/", 20);
    /// let mut tracker = RequestTracker::new();
    /// let query = ProductQuery { page: 2, search: "pão de mel".to_string(), status: None };
    ///
    /// let request = client.products(&query, tracker.issue(RequestKind::Products));
    /// assert_eq!(
    ///     request.url,
    ///     "http://api.local/api/produtos?page=2&per_page=20&search=p%C3%A3o%20de%20mel"
    /// );
    /// ```
    #[must_use]
    pub fn products(&self, query: &ProductQuery, context: RequestContext) -> ApiRequest {
        let page = query.page.to_string();
        let per_page = self.per_page.to_string();
        let mut params = vec![
            ("page", page.as_str()),
            ("per_page", per_page.as_str()),
            ("search", query.search.as_str()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.as_str()));
        }
        self.get("/api/produtos", &params, context)
    }

    /// `POST /api/produtos` with the product as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StockboardError::Encode`] if the payload cannot be serialized.
    pub fn create_product(
        &self,
        product: &NewProduct,
        context: RequestContext,
    ) -> crate::Result<ApiRequest> {
        let body = serde_json::to_vec(product)?;
        Ok(self.post("/api/produtos", body, context))
    }

    /// `POST /api/produtos/{id}/entrada` or `.../baixa`, depending on the movement kind.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StockboardError::Encode`] if the payload cannot be serialized.
    pub fn record_movement(
        &self,
        movement: &MovementRequest,
        context: RequestContext,
    ) -> crate::Result<ApiRequest> {
        let body = serde_json::to_vec(&movement.payload())?;
        let path = format!(
            "/api/produtos/{}/{}",
            movement.product_id,
            movement.kind.endpoint()
        );
        Ok(self.post(&path, body, context))
    }

    /// `GET /api/movimentacoes` for the latest movements of one product.
    #[must_use]
    pub fn movements(&self, product_id: i64, context: RequestContext) -> ApiRequest {
        let id = product_id.to_string();
        let per_page = HISTORY_PER_PAGE.to_string();
        self.get(
            "/api/movimentacoes",
            &[("produto_id", id.as_str()), ("per_page", per_page.as_str())],
            context,
        )
    }

    fn get(&self, path: &str, params: &[(&str, &str)], context: RequestContext) -> ApiRequest {
        let mut url = format!("{}{path}", self.base_url);
        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        ApiRequest {
            method: HttpMethod::Get,
            url,
            headers: base_headers(),
            body: Vec::new(),
            context,
        }
    }

    fn post(&self, path: &str, body: Vec<u8>, context: RequestContext) -> ApiRequest {
        let mut headers = base_headers();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        ApiRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
            context,
        }
    }
}

fn base_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::from([("Accept".to_string(), "application/json".to_string())]);
    trace::inject_traceparent(&mut headers);
    headers
}
