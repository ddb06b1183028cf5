//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single owner of everything the dashboard
//! shows: the current product page, the dashboard summary, the alert banner, the
//! search input and its debouncer, the modal forms and the request tracker. The
//! event handler mutates it; the renderer only reads it through
//! [`AppState::compute_viewmodel`].
//!
//! # State Components
//!
//! - **Page**: server-reported page coordinates plus the applied search term and filter
//! - **Products**: rows of the current page, replaced on every successful fetch
//! - **Selection**: cursor within the current page, target of row actions
//! - **Search input**: raw text being typed, applied after the debounce delay
//! - **Modals**: add-product form, movement form and movement history
//! - **Requests**: latest-request-wins bookkeeping for list and summary fetches
//!
//! # Example
//!
//! ```rust
//! use stockboard::api::ApiClient;
//! use stockboard::app::AppState;
//! use stockboard::ui::theme::Theme;
//!
//! let mut state = AppState::new(ApiClient::default(), Theme::default());
//! let actions = state.load_all();
//! assert_eq!(actions.len(), 2);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! ```

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use fuzzy_matcher::skim::SkimMatcherV2;

use super::alert::{Alert, AlertKind, DEFAULT_ALERT_TIMEOUT};
use super::debounce::Debouncer;
use super::forms::{Form, MovementForm, ProductForm};
use super::modes::{InputMode, ModalKind};
use super::Action;
use crate::api::response::{decode, decode_ack};
use crate::api::{ApiClient, RequestContext, RequestKind, RequestTracker};
use crate::domain::product::format_quantity;
use crate::domain::{
    DashboardSummary, MovementKind, MovementPage, MovementRecord, PageState, Product, ProductPage,
    StockboardError,
};
use crate::ui::layout;
use crate::ui::pagination::PaginationView;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AlertView, DashboardCards, DisplayItem, FieldView, FooterInfo, FormView, HeaderInfo,
    HistoryEntryView, HistoryView, ModalView, SearchBarInfo, TableBody, UIViewModel,
};

/// Default quiet period before a search edit is applied.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Placeholder shown when the current page has no products.
pub const EMPTY_TABLE_MESSAGE: &str = "Nenhum produto encontrado";

/// Alert prefix for failures that never got an answer from the API.
const CONNECTION_ERROR_PREFIX: &str = "Erro de conexão: ";

/// Movement history of one product, shown in the history modal.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryState {
    pub product_id: i64,
    pub description: String,
    /// `None` until the response arrives.
    pub entries: Option<Vec<MovementRecord>>,
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Request builder for the configured API.
    pub client: ApiClient,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Page, search term and status filter of the product list.
    pub page: PageState,

    /// Total number of products matching the search, as reported by the server.
    pub total_items: u64,

    /// Products of the current page.
    pub products: Vec<Product>,

    /// Zero-based index of the selected product within `products`.
    pub selected_index: usize,

    /// Last successfully loaded dashboard summary.
    pub summary: Option<DashboardSummary>,

    /// Whether a product-list request is outstanding.
    pub loading: bool,

    /// Alert banner, if one is showing.
    pub alert: Option<Alert>,

    /// How long alerts stay visible.
    pub alert_timeout: Duration,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Raw text of the search input.
    ///
    /// Applied to `page.search` only once the debouncer releases it.
    pub search_input: String,

    /// Debouncer between the search input and the product fetch.
    pub search_debounce: Debouncer<String>,

    /// The add-product form; reset to defaults whenever its modal closes.
    pub add_form: ProductForm,

    /// The movement form; cleared whenever its modal closes.
    pub movement_form: MovementForm,

    /// Movement history shown in the history modal.
    pub history: Option<HistoryState>,

    /// Latest-request-wins bookkeeping.
    pub requests: RequestTracker,

    /// Last rendered pane size as `(rows, cols)`.
    viewport: (usize, usize),
}

impl AppState {
    /// Creates a new application state with the default debounce and alert timings.
    ///
    /// The product list starts in the loading state: the first fetch is issued as
    /// soon as the plugin is allowed to use the network.
    #[must_use]
    pub fn new(client: ApiClient, theme: Theme) -> Self {
        Self {
            client,
            theme,
            page: PageState::default(),
            total_items: 0,
            products: Vec::new(),
            selected_index: 0,
            summary: None,
            loading: true,
            alert: None,
            alert_timeout: DEFAULT_ALERT_TIMEOUT,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            search_debounce: Debouncer::new(DEFAULT_SEARCH_DEBOUNCE),
            add_form: ProductForm::default(),
            movement_form: MovementForm::default(),
            history: None,
            requests: RequestTracker::new(),
            viewport: (0, 0),
        }
    }

    /// Overrides the search debounce delay and the alert timeout.
    #[must_use]
    pub fn with_timings(mut self, search_debounce: Duration, alert_timeout: Duration) -> Self {
        self.search_debounce = Debouncer::new(search_debounce);
        self.alert_timeout = alert_timeout;
        self
    }

    /// Remembers the pane size of the latest render, for hit-testing clicks.
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport = (rows, cols);
    }

    // Requests

    /// Fetches the dashboard summary and the current product page.
    pub fn load_all(&mut self) -> Vec<Action> {
        vec![self.fetch_dashboard(), self.fetch_products(self.page.current)]
    }

    pub fn fetch_dashboard(&mut self) -> Action {
        let context = self.requests.issue(RequestKind::Dashboard);
        Action::Http(self.client.dashboard(context))
    }

    /// Fetches `page` with the applied search term and filter.
    ///
    /// Any outstanding product request becomes stale.
    pub fn fetch_products(&mut self, page: u32) -> Action {
        let query = self.page.query(page);
        tracing::debug!(page = query.page, search = %query.search, status = ?query.status, "fetching products");
        self.loading = true;
        let context = self.requests.issue(RequestKind::Products);
        Action::Http(self.client.products(&query, context))
    }

    /// Fetches `page` if it differs from the current page and exists.
    pub fn go_to_page(&mut self, page: u32) -> Option<Action> {
        if page < 1 || page > self.page.total {
            tracing::debug!(page, total = self.page.total, "ignoring out of range page");
            return None;
        }
        Some(self.fetch_products(page))
    }

    /// Page targets of the pagination bar as `(prev, next)`.
    #[must_use]
    pub fn adjacent_pages(&self) -> (Option<u32>, Option<u32>) {
        let current = self.page.current;
        let prev = (current > 1).then(|| current - 1);
        let next = (current < self.page.total).then(|| current + 1);
        (prev, next)
    }

    // Search

    /// Records an edit of the search input.
    ///
    /// Returns the timer to schedule; the fetch happens in [`Self::on_tick`].
    pub fn search_edited(&mut self, now: Instant) -> Action {
        let wait = self.search_debounce.call(self.search_input.clone(), now);
        Action::ScheduleTimer(wait)
    }

    /// Cycles the status filter and refetches the first page.
    pub fn cycle_status_filter(&mut self) -> Action {
        let status = self.page.cycle_status();
        tracing::debug!(status = ?status, "status filter changed");
        self.fetch_products(1)
    }

    // Timers

    /// Handles a fired timer.
    ///
    /// Releases a debounced search term whose quiet period has elapsed and hides an
    /// alert whose deadline has passed. Returns whether anything visible changed.
    pub fn on_tick(&mut self, now: Instant) -> (bool, Vec<Action>) {
        let mut changed = false;
        let mut actions = Vec::new();

        if let Some(term) = self.search_debounce.poll(now) {
            tracing::debug!(search = %term, "applying search term");
            self.page.set_search(term);
            actions.push(self.fetch_products(1));
            changed = true;
        }

        if self.alert.as_ref().is_some_and(|alert| alert.is_expired(now)) {
            tracing::debug!("alert expired");
            self.alert = None;
            changed = true;
        }

        (changed, actions)
    }

    // Alerts

    /// Shows an alert, replacing any current one.
    pub fn show_alert(&mut self, message: impl Into<String>, kind: AlertKind, now: Instant) -> Action {
        let alert = Alert::new(message, kind, now, self.alert_timeout);
        tracing::debug!(message = %alert.message, kind = ?alert.kind, "showing alert");
        self.alert = Some(alert);
        Action::ScheduleTimer(self.alert_timeout)
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    // Selection

    pub fn move_selection_down(&mut self) {
        if self.products.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.products.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.products.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.products.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected_index)
    }

    // Modals

    pub fn open_add_modal(&mut self) {
        self.add_form = ProductForm::default();
        self.input_mode = InputMode::Modal(ModalKind::AddProduct);
    }

    /// Opens the movement form for the selected product. Returns `false` when no
    /// product is selected.
    pub fn open_movement_modal(&mut self, kind: MovementKind) -> bool {
        let Some(product) = self.selected_product() else {
            return false;
        };
        tracing::debug!(product_id = product.id, kind = ?kind, "opening movement modal");
        self.movement_form = MovementForm::for_product(product.id, &product.descricao, kind);
        self.input_mode = InputMode::Modal(ModalKind::Movement);
        true
    }

    /// Opens the history modal for the selected product and requests its movements.
    pub fn open_history_modal(&mut self) -> Option<Action> {
        let product = self.selected_product()?;
        let (product_id, description) = (product.id, product.descricao.clone());
        tracing::debug!(product_id, "opening history modal");
        self.history = Some(HistoryState {
            product_id,
            description,
            entries: None,
        });
        self.input_mode = InputMode::Modal(ModalKind::History);
        let context = self.requests.issue(RequestKind::History);
        Some(Action::Http(self.client.movements(product_id, context)))
    }

    /// Closes whichever modal is open and resets its form.
    pub fn close_modal(&mut self) {
        if let InputMode::Modal(kind) = self.input_mode {
            self.reset_modal(kind);
            self.input_mode = InputMode::Normal;
        }
    }

    /// Resets one modal's state. Leaves the input mode alone unless that modal is open.
    fn close_modal_kind(&mut self, kind: ModalKind) {
        self.reset_modal(kind);
        if self.input_mode == InputMode::Modal(kind) {
            self.input_mode = InputMode::Normal;
        }
    }

    fn reset_modal(&mut self, kind: ModalKind) {
        match kind {
            ModalKind::AddProduct => self.add_form = ProductForm::default(),
            ModalKind::Movement => self.movement_form = MovementForm::default(),
            ModalKind::History => {
                self.history = None;
                self.requests.invalidate(RequestKind::History);
            }
        }
    }

    /// Whether a pane position (0-based, as reported by mouse events) falls inside
    /// the open modal's box. `None` when no modal is open or the pane size is unknown.
    #[must_use]
    pub fn modal_contains(&self, line: usize, col: usize) -> Option<bool> {
        let kind = self.input_mode.modal()?;
        let (rows, cols) = self.viewport;
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(layout::modal_area(rows, cols, kind).contains(line + 1, col + 1))
    }

    /// Page targeted by a click at a 0-based pane position, if it hit an enabled
    /// item of the pagination bar.
    #[must_use]
    pub fn pagination_target(&self, line: usize, col: usize) -> Option<u32> {
        let (rows, _) = self.viewport;
        if self.loading || rows == 0 || line + 1 != layout::pagination_row(rows) {
            return None;
        }
        PaginationView::compute(self.page.current, self.page.total, self.total_items)?
            .item_at(col)?
            .target()
    }

    /// The form of the open modal, if it has one.
    pub fn active_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self.input_mode {
            InputMode::Modal(ModalKind::AddProduct) => Some(&mut self.add_form),
            InputMode::Modal(ModalKind::Movement) => Some(&mut self.movement_form),
            _ => None,
        }
    }

    /// Submits the open form.
    ///
    /// # Errors
    ///
    /// Returns [`StockboardError::Validation`] when the movement quantity is not
    /// positive, and [`StockboardError::Encode`] if the payload cannot be serialized.
    /// No request is made in either case.
    pub fn submit_modal(&mut self) -> crate::Result<Vec<Action>> {
        match self.input_mode {
            InputMode::Modal(ModalKind::AddProduct) => {
                let payload = self.add_form.to_payload();
                tracing::debug!(descricao = %payload.descricao, "submitting new product");
                let context = self.requests.issue(RequestKind::CreateProduct);
                Ok(vec![Action::Http(self.client.create_product(&payload, context)?)])
            }
            InputMode::Modal(ModalKind::Movement) => {
                let movement = self.movement_form.to_request()?;
                tracing::debug!(
                    product_id = movement.product_id,
                    kind = ?movement.kind,
                    quantidade = movement.quantidade,
                    "submitting movement"
                );
                let kind = match movement.kind {
                    MovementKind::Entry => RequestKind::MovementEntry,
                    MovementKind::Exit => RequestKind::MovementExit,
                };
                let context = self.requests.issue(kind);
                Ok(vec![Action::Http(self.client.record_movement(&movement, context)?)])
            }
            _ => Ok(Vec::new()),
        }
    }

    // Responses

    /// Applies an API response.
    ///
    /// Responses superseded by a newer request of the same kind are dropped. Returns
    /// whether anything visible changed and the follow-up actions.
    ///
    /// # Errors
    ///
    /// Returns [`StockboardError::Decode`] when the context map was not issued by
    /// this plugin.
    pub fn apply_response(
        &mut self,
        context: &BTreeMap<String, String>,
        status: u16,
        body: &[u8],
        now: Instant,
    ) -> crate::Result<(bool, Vec<Action>)> {
        let context = RequestContext::from_map(context)?;
        if !self.requests.is_current(context) {
            tracing::debug!(kind = ?context.kind, seq = context.seq, "dropping stale response");
            return Ok((false, Vec::new()));
        }
        tracing::debug!(kind = ?context.kind, seq = context.seq, status, "applying response");

        let actions = match context.kind {
            RequestKind::Dashboard => {
                match decode::<DashboardSummary>(status, body) {
                    Ok(summary) => self.summary = Some(summary),
                    Err(e) => tracing::warn!(error = %e, "failed to load dashboard"),
                }
                Vec::new()
            }
            RequestKind::Products => self.apply_products(decode(status, body), now),
            RequestKind::CreateProduct => match decode_ack(status, body) {
                Ok(()) => {
                    let mut actions = vec![self.show_alert(
                        "Produto adicionado com sucesso!",
                        AlertKind::Success,
                        now,
                    )];
                    self.close_modal_kind(ModalKind::AddProduct);
                    actions.extend(self.load_all());
                    actions
                }
                Err(e) => vec![self.show_failure("Erro ao adicionar produto: ", &e, now)],
            },
            RequestKind::MovementEntry | RequestKind::MovementExit => {
                match decode_ack(status, body) {
                    Ok(()) => {
                        let kind = if context.kind == RequestKind::MovementEntry {
                            MovementKind::Entry
                        } else {
                            MovementKind::Exit
                        };
                        let message = format!("{} realizada com sucesso!", kind.label());
                        let mut actions = vec![self.show_alert(message, AlertKind::Success, now)];
                        self.close_modal_kind(ModalKind::Movement);
                        actions.extend(self.load_all());
                        actions
                    }
                    Err(e) => vec![self.show_failure("Erro: ", &e, now)],
                }
            }
            RequestKind::History => match decode::<MovementPage>(status, body) {
                Ok(page) => {
                    if let Some(history) = self.history.as_mut() {
                        history.entries = Some(page.movimentacoes);
                    }
                    Vec::new()
                }
                Err(e) => {
                    if let Some(history) = self.history.as_mut() {
                        history.entries = Some(Vec::new());
                    }
                    vec![self.show_failure("Erro ao carregar histórico: ", &e, now)]
                }
            },
        };

        Ok((true, actions))
    }

    fn apply_products(&mut self, result: crate::Result<ProductPage>, now: Instant) -> Vec<Action> {
        self.loading = false;
        match result {
            Ok(page) => {
                let previous_page = self.page.current;
                self.page.apply_server(page.current_page, page.pages);
                self.total_items = page.total;
                self.products = page.produtos;
                if self.page.current != previous_page {
                    self.selected_index = 0;
                }
                self.selected_index = self
                    .selected_index
                    .min(self.products.len().saturating_sub(1));
                tracing::debug!(
                    count = self.products.len(),
                    current = self.page.current,
                    total = self.page.total,
                    "products loaded"
                );
                Vec::new()
            }
            Err(e) => vec![self.show_failure("Erro ao carregar produtos: ", &e, now)],
        }
    }

    /// Shows a failure alert: the operation's prefix for server errors, the
    /// connection prefix for everything else.
    pub fn show_failure(&mut self, prefix: &str, error: &StockboardError, now: Instant) -> Action {
        tracing::warn!(error = %error, "request failed");
        let message = if error.is_api() {
            format!("{prefix}{error}")
        } else {
            format!("{CONNECTION_ERROR_PREFIX}{error}")
        };
        self.show_alert(message, AlertKind::Error, now)
    }

    // View model

    /// Computes a renderable UI view model from current state and pane dimensions.
    ///
    /// The product table is windowed around the selection when the page has more
    /// rows than fit in the pane.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            dashboard: DashboardCards::from_summary(self.summary.as_ref()),
            alert: self.alert.as_ref().map(|alert| AlertView {
                message: alert.message.clone(),
                kind: alert.kind,
            }),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                focused: self.input_mode == InputMode::Search,
                status_filter: self.page.status,
            },
            table: self.compute_table(rows, cols),
            pagination: if self.loading {
                None
            } else {
                PaginationView::compute(self.page.current, self.page.total, self.total_items)
            },
            footer: self.compute_footer(),
            modal: self.compute_modal(),
        }
    }

    fn compute_table(&self, rows: usize, cols: usize) -> TableBody {
        if self.loading {
            return TableBody::Loading;
        }
        if self.products.is_empty() {
            return TableBody::Empty {
                message: EMPTY_TABLE_MESSAGE.to_string(),
            };
        }

        let available_rows = layout::table_capacity(rows).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.products.len());
        if visible_end - visible_start < available_rows && self.products.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = if self.page.search.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default().ignore_case())
        };

        let items = self.products[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, product)| {
                self.compute_display_item(product, visible_start + relative_idx, cols, matcher.as_ref())
            })
            .collect();

        TableBody::Rows {
            items,
            selected_index: self.selected_index.saturating_sub(visible_start),
        }
    }

    fn compute_display_item(
        &self,
        product: &Product,
        absolute_idx: usize,
        cols: usize,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let description = truncate(&product.descricao, layout::description_width(cols));
        let highlight_ranges =
            matcher.map_or_else(Vec::new, |m| self.compute_highlight_ranges(&description, m));

        DisplayItem {
            product_id: product.id,
            description,
            unit: product.display_unit().to_string(),
            supply: format_quantity(product.fornecimento),
            stock: format_quantity(product.estoque),
            minimum: format_quantity(product.estoque_minimo),
            status: product.status_estoque,
            is_selected: absolute_idx == self.selected_index,
            highlight_ranges,
        }
    }

    /// Marks the case-insensitive occurrence of the search term the server matched
    /// on, falling back to the matcher's character indices coalesced into
    /// `(start, end)` ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        if let Some(range) = find_ignore_case(text, &self.page.search) {
            return vec![range];
        }
        let Some((_score, indices)) = matcher.fuzzy_indices(text, &self.page.search) else {
            return Vec::new();
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: format!(
                " Controle de Estoque · Página {} de {} ",
                self.page.current, self.page.total
            ),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: select  h/l: page  /: search  f: filter  a: add  e/b: entry/exit  m: history  r: refresh  q: quit"
            }
            InputMode::Search => "Type to search  Backspace: delete  Enter/ESC: done",
            InputMode::Modal(ModalKind::History) => "ESC: close",
            InputMode::Modal(_) => "Tab/↓: next field  Shift+Tab/↑: previous  Enter: save  ESC: cancel",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_modal(&self) -> Option<ModalView> {
        match self.input_mode.modal()? {
            ModalKind::AddProduct => Some(ModalView::Form(form_view(
                &self.add_form,
                ModalKind::AddProduct,
                "Adicionar Produto".to_string(),
                None,
            ))),
            ModalKind::Movement => Some(ModalView::Form(form_view(
                &self.movement_form,
                ModalKind::Movement,
                self.movement_form.kind.title().to_string(),
                Some(self.movement_form.description.clone()),
            ))),
            ModalKind::History => {
                let history = self.history.as_ref()?;
                Some(ModalView::History(HistoryView {
                    title: format!("Movimentações · {}", history.description),
                    loading: history.entries.is_none(),
                    entries: history
                        .entries
                        .iter()
                        .flatten()
                        .map(|record| HistoryEntryView {
                            kind: record.tipo,
                            kind_label: record.tipo.label().to_string(),
                            quantity: format_quantity(record.quantidade),
                            note: record.observacao.clone().unwrap_or_default(),
                            date: record.display_date(),
                        })
                        .collect(),
                    hint: "ESC: fechar".to_string(),
                }))
            }
        }
    }
}

fn form_view(form: &dyn Form, kind: ModalKind, title: String, subtitle: Option<String>) -> FormView {
    let fields = form
        .labels()
        .iter()
        .enumerate()
        .map(|(index, label)| FieldView {
            label: (*label).to_string(),
            value: form.field(index).unwrap_or_default().to_string(),
            focused: index == form.focus(),
        })
        .collect();
    FormView {
        kind,
        title,
        subtitle,
        fields,
        hint: "Enter: salvar  ESC: cancelar".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Character range of the first case-insensitive occurrence of `needle` in `text`.
fn find_ignore_case(text: &str, needle: &str) -> Option<(usize, usize)> {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let haystack: Vec<char> = text.chars().map(fold).collect();
    let needle: Vec<char> = needle.chars().map(fold).collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())
        .map(|start| (start, start + needle.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpMethod;
    use crate::domain::StockStatus;

    fn state() -> AppState {
        AppState::new(ApiClient::default(), Theme::default())
    }

    fn product(id: i64, descricao: &str) -> Product {
        Product {
            id,
            descricao: descricao.to_string(),
            unidade: None,
            fornecimento: 0.0,
            estoque: 10.0,
            estoque_minimo: 5.0,
            status_estoque: StockStatus::Ok,
            created_at: None,
            updated_at: None,
        }
    }

    fn context_of(action: &Action) -> BTreeMap<String, String> {
        match action {
            Action::Http(request) => request.context.to_map(),
            other => panic!("expected an HTTP action, got {other:?}"),
        }
    }

    fn products_body(count: usize, current_page: u32, pages: u32, total: u64) -> Vec<u8> {
        let produtos: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": i + 1,
                    "descricao": format!("Produto {i}"),
                    "unidade": "KG",
                    "fornecimento": 1.0,
                    "estoque": 2.0,
                    "estoque_minimo": 5.0,
                    "status_estoque": "BAIXO"
                })
            })
            .collect();
        serde_json::to_vec(&serde_json::json!({
            "produtos": produtos,
            "current_page": current_page,
            "pages": pages,
            "total": total,
        }))
        .unwrap()
    }

    #[test]
    fn products_response_updates_page_from_server() {
        let mut state = state();
        let now = Instant::now();
        let fetch = state.fetch_products(3);

        let (render, actions) = state
            .apply_response(&context_of(&fetch), 200, &products_body(2, 3, 7, 130), now)
            .unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert!(!state.loading);
        assert_eq!((state.page.current, state.page.total), (3, 7));
        assert_eq!(state.total_items, 130);
        assert_eq!(state.products.len(), 2);
    }

    #[test]
    fn vanished_last_page_is_clamped_into_range() {
        let mut state = state();
        let now = Instant::now();
        let fetch = state.fetch_products(3);

        state
            .apply_response(&context_of(&fetch), 200, &products_body(0, 3, 2, 40), now)
            .unwrap();

        assert_eq!((state.page.current, state.page.total), (2, 2));
        assert_eq!(
            state.compute_viewmodel(30, 100).header.title,
            " Controle de Estoque · Página 2 de 2 "
        );
    }

    #[test]
    fn stale_products_response_is_dropped() {
        let mut state = state();
        let now = Instant::now();
        let first = state.fetch_products(1);
        let second = state.fetch_products(2);

        let (render, _) = state
            .apply_response(&context_of(&first), 200, &products_body(5, 1, 2, 25), now)
            .unwrap();

        assert!(!render);
        assert!(state.products.is_empty());
        assert!(state.loading);

        state
            .apply_response(&context_of(&second), 200, &products_body(1, 2, 2, 25), now)
            .unwrap();
        assert_eq!(state.page.current, 2);
    }

    #[test]
    fn empty_page_mid_range_keeps_pagination() {
        let mut state = state();
        let fetch = state.fetch_products(4);

        state
            .apply_response(&context_of(&fetch), 200, &products_body(0, 4, 6, 100), Instant::now())
            .unwrap();
        let vm = state.compute_viewmodel(24, 100);

        assert_eq!(
            vm.table,
            TableBody::Empty {
                message: "Nenhum produto encontrado".to_string()
            }
        );
        assert!(vm.pagination.is_some());
    }

    #[test]
    fn loading_hides_table_and_pagination() {
        let mut state = state();
        state.page.total = 5;
        state.products = vec![product(1, "Arroz")];
        let _ = state.fetch_products(2);

        let vm = state.compute_viewmodel(24, 100);

        assert_eq!(vm.table, TableBody::Loading);
        assert!(vm.pagination.is_none());
    }

    #[test]
    fn dashboard_failure_is_silent() {
        let mut state = state();
        let fetch = state.fetch_dashboard();

        let (_, actions) = state
            .apply_response(&context_of(&fetch), 500, br#"{"error": "boom"}"#, Instant::now())
            .unwrap();

        assert!(actions.is_empty());
        assert!(state.alert.is_none());
        assert!(state.summary.is_none());
    }

    #[test]
    fn products_failure_shows_server_message() {
        let mut state = state();
        let now = Instant::now();
        let fetch = state.fetch_products(1);

        let (_, actions) = state
            .apply_response(&context_of(&fetch), 500, br#"{"error": "db offline"}"#, now)
            .unwrap();

        assert_eq!(actions, vec![Action::ScheduleTimer(DEFAULT_ALERT_TIMEOUT)]);
        let alert = state.alert.unwrap();
        assert_eq!(alert.message, "Erro ao carregar produtos: db offline");
        assert_eq!(alert.kind, AlertKind::Error);
    }

    #[test]
    fn connection_failure_uses_connection_prefix() {
        let mut state = state();
        let fetch = state.fetch_products(1);

        state
            .apply_response(&context_of(&fetch), 502, b"Bad Gateway", Instant::now())
            .unwrap();

        assert_eq!(state.alert.unwrap().message, "Erro de conexão: Bad Gateway");
    }

    #[test]
    fn create_failure_keeps_modal_open() {
        let mut state = state();
        state.open_add_modal();
        state.add_form.descricao = "Caneta".to_string();
        state.add_form.fornecimento = "abc".to_string();
        let actions = state.submit_modal().unwrap();

        let Action::Http(request) = &actions[0] else {
            panic!("expected request");
        };
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert!(body["fornecimento"].is_null());
        assert_eq!(request.method, HttpMethod::Post);

        let error = br#"{"error": "float() argument must be a string or a real number, not 'NoneType'"}"#;
        state
            .apply_response(&context_of(&actions[0]), 400, error, Instant::now())
            .unwrap();

        assert_eq!(state.input_mode, InputMode::Modal(ModalKind::AddProduct));
        assert_eq!(state.add_form.descricao, "Caneta");
        assert_eq!(
            state.alert.unwrap().message,
            "Erro ao adicionar produto: float() argument must be a string or a real number, not 'NoneType'"
        );
    }

    #[test]
    fn create_success_closes_modal_and_refreshes() {
        let mut state = state();
        state.page.current = 2;
        state.page.total = 3;
        state.open_add_modal();
        state.add_form.descricao = "Caneta".to_string();
        let submit = state.submit_modal().unwrap();

        let (_, actions) = state
            .apply_response(&context_of(&submit[0]), 201, br#"{"id": 9}"#, Instant::now())
            .unwrap();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.add_form, ProductForm::default());
        assert_eq!(state.alert.as_ref().unwrap().message, "Produto adicionado com sucesso!");
        let urls: Vec<_> = actions
            .iter()
            .filter_map(|action| match action {
                Action::Http(request) => Some(request.url.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:5000/api/dashboard",
                "http://localhost:5000/api/produtos?page=2&per_page=20&search=",
            ]
        );
    }

    #[test]
    fn closing_add_modal_restores_defaults() {
        let mut state = state();
        state.open_add_modal();
        state.add_form.descricao = "Caneta".to_string();
        state.add_form.unidade = "CX".to_string();
        state.add_form.estoque_minimo = "1".to_string();

        state.close_modal();

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.add_form, ProductForm::default());
    }

    #[test]
    fn movement_success_reports_kind() {
        let mut state = state();
        state.products = vec![product(5, "Arroz")];
        assert!(state.open_movement_modal(MovementKind::Exit));
        state.movement_form.quantidade = "2".to_string();
        let submit = state.submit_modal().unwrap();

        state
            .apply_response(&context_of(&submit[0]), 200, br#"{"message": "ok"}"#, Instant::now())
            .unwrap();

        assert_eq!(state.alert.unwrap().message, "Baixa realizada com sucesso!");
        assert_eq!(state.movement_form, MovementForm::default());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn movement_failure_uses_generic_prefix() {
        let mut state = state();
        state.products = vec![product(5, "Arroz")];
        state.open_movement_modal(MovementKind::Exit);
        state.movement_form.quantidade = "200".to_string();
        let submit = state.submit_modal().unwrap();

        state
            .apply_response(
                &context_of(&submit[0]),
                400,
                br#"{"error": "Estoque insuficiente"}"#,
                Instant::now(),
            )
            .unwrap();

        assert_eq!(state.alert.unwrap().message, "Erro: Estoque insuficiente");
        assert_eq!(state.input_mode, InputMode::Modal(ModalKind::Movement));
    }

    #[test]
    fn movement_modal_needs_a_selected_product() {
        let mut state = state();

        assert!(!state.open_movement_modal(MovementKind::Entry));
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn history_response_after_close_is_dropped() {
        let mut state = state();
        state.products = vec![product(5, "Arroz")];
        let fetch = state.open_history_modal().unwrap();
        state.close_modal();

        let (render, _) = state
            .apply_response(&context_of(&fetch), 200, br#"{"movimentacoes": [], "total": 0}"#, Instant::now())
            .unwrap();

        assert!(!render);
        assert!(state.history.is_none());
    }

    #[test]
    fn history_entries_are_shown() {
        let mut state = state();
        state.products = vec![product(5, "Arroz")];
        let fetch = state.open_history_modal().unwrap();
        let body = br#"{"movimentacoes": [{"id": 1, "produto_id": 5, "tipo": "ENTRADA", "quantidade": 3.0, "observacao": "compra", "data_movimentacao": "2024-01-02T03:04:05"}], "total": 1}"#;

        state
            .apply_response(&context_of(&fetch), 200, body, Instant::now())
            .unwrap();
        let vm = state.compute_viewmodel(30, 100);

        let Some(ModalView::History(history)) = vm.modal else {
            panic!("expected history modal");
        };
        assert!(!history.loading);
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.entries[0].kind_label, "Entrada");
        assert_eq!(history.entries[0].date, "02/01/2024 03:04");
    }

    #[test]
    fn alert_hides_at_deadline() {
        let mut state = state();
        let shown = Instant::now();
        state.show_alert("Produto adicionado com sucesso!", AlertKind::Success, shown);

        let (early, _) = state.on_tick(shown + Duration::from_millis(4999));
        assert!(!early);
        assert!(state.alert.is_some());

        let (late, _) = state.on_tick(shown + Duration::from_millis(5000));
        assert!(late);
        assert!(state.alert.is_none());
    }

    #[test]
    fn newer_alert_survives_older_timer() {
        let mut state = state();
        let first = Instant::now();
        state.show_alert("primeiro", AlertKind::Success, first);
        let second = first + Duration::from_secs(3);
        state.show_alert("segundo", AlertKind::Error, second);

        state.on_tick(first + DEFAULT_ALERT_TIMEOUT);

        assert_eq!(state.alert.unwrap().message, "segundo");
    }

    #[test]
    fn rapid_search_edits_fetch_once_with_last_term() {
        let mut state = state();
        state.page.current = 4;
        let start = Instant::now();
        let mut timers = Vec::new();

        for (i, c) in "leite".chars().enumerate() {
            state.search_input.push(c);
            let now = start + Duration::from_millis(80 * i as u64);
            if let Action::ScheduleTimer(wait) = state.search_edited(now) {
                timers.push(now + wait);
            }
        }
        let fetches: Vec<Action> = timers
            .into_iter()
            .flat_map(|fired_at| state.on_tick(fired_at).1)
            .collect();

        assert_eq!(fetches.len(), 1);
        let Action::Http(request) = &fetches[0] else {
            panic!("expected fetch");
        };
        assert_eq!(
            request.url,
            "http://localhost:5000/api/produtos?page=1&per_page=20&search=leite"
        );
        assert_eq!(state.page.search, "leite");
    }

    #[test]
    fn selection_wraps_and_resets_on_page_change() {
        let mut state = state();
        let fetch = state.fetch_products(1);
        state
            .apply_response(&context_of(&fetch), 200, &products_body(3, 1, 2, 23), Instant::now())
            .unwrap();

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
        state.move_selection_down();

        let next = state.fetch_products(2);
        state
            .apply_response(&context_of(&next), 200, &products_body(3, 2, 2, 23), Instant::now())
            .unwrap();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn rows_carry_product_binding_and_highlights() {
        let mut state = state();
        state.loading = false;
        state.page.search = "arr".to_string();
        state.products = vec![product(11, "Arroz"), product(12, "Feijão")];

        let vm = state.compute_viewmodel(24, 100);

        let TableBody::Rows { items, selected_index } = vm.table else {
            panic!("expected rows");
        };
        assert_eq!(selected_index, 0);
        assert_eq!(items[0].product_id, 11);
        assert_eq!(items[0].unit, "UNIDADE");
        assert_eq!(items[0].stock, "10");
        assert_eq!(items[0].highlight_ranges, vec![(0, 3)]);
        assert!(items[1].highlight_ranges.is_empty());
    }

    #[test]
    fn highlight_ignores_case_and_prefers_the_substring() {
        let mut state = state();
        state.loading = false;
        state.page.search = "ARR".to_string();
        state.products = vec![product(11, "Arroz"), product(12, "Farinha de arroz")];

        let vm = state.compute_viewmodel(24, 100);

        let TableBody::Rows { items, .. } = vm.table else {
            panic!("expected rows");
        };
        assert_eq!(items[0].highlight_ranges, vec![(0, 3)]);
        assert_eq!(items[1].highlight_ranges, vec![(11, 14)]);
    }

    #[test]
    fn substring_search_counts_characters() {
        assert_eq!(find_ignore_case("Feijão Preto", "ÃO P"), Some((4, 8)));
        assert_eq!(find_ignore_case("Sal", "sal grosso"), None);
        assert_eq!(find_ignore_case("Sal", ""), None);
    }

    #[test]
    fn click_outside_modal_is_detected() {
        let mut state = state();
        state.set_viewport(30, 100);
        assert_eq!(state.modal_contains(0, 0), None);

        state.open_add_modal();

        assert_eq!(state.modal_contains(0, 0), Some(false));
        assert_eq!(state.modal_contains(14, 50), Some(true));
    }
}
