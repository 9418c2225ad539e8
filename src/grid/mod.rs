//! Generic client-side data grid: search, sort, paginate, size and
//! dispatch row activations for any row type.
//!
//! Rows are opaque to the grid; all row-shape knowledge lives in the
//! [`Column`] accessors. Derived sequences (filtered, sorted, page rows) are
//! recomputed from [`GridState`] on demand and never stored.

pub mod column;
pub mod filter;
pub mod navigator;
pub mod paginate;
pub mod sizing;
pub mod sort;
pub mod viewport;

pub use column::{CellValue, Column, Record, WidthHint};
pub use filter::SearchScope;
pub use navigator::{NoNavigation, Navigator};
pub use sizing::SizingMode;
pub use sort::{SortDirection, SortState};
pub use viewport::{Viewport, ViewportBus, ViewportSubscription};

use self::paginate::DEFAULT_PAGE_SIZE;

pub const INDEX_HEADER: &str = "#";
pub const EMPTY_MESSAGE: &str = "No results.";

/// Static per-table configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub page_size: usize,
    /// Presets offered by the page size selector; empty disables it
    pub page_size_options: Vec<usize>,
    pub show_index: bool,
    /// Leading data columns rendered left aligned
    pub left_aligned: usize,
    pub show_search: bool,
    pub sizing: SizingMode,
    pub viewport_padding: u16,
    pub column_spacing: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: Vec::new(),
            show_index: false,
            left_aligned: 1,
            show_search: true,
            sizing: SizingMode::Equal,
            viewport_padding: 4,
            column_spacing: 1,
        }
    }
}

/// View state owned by one grid instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub sort: Option<SortState>,
    pub query: String,
    pub scope: SearchScope,
    /// 1-based, always within `[1, total_pages]`
    pub page: usize,
    pub page_size: usize,
}

impl GridState {
    fn new(page_size: usize) -> Self {
        Self {
            sort: None,
            query: String::new(),
            scope: SearchScope::All,
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

/// One header cell as rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// `None` for the synthetic index column
    pub key: Option<String>,
    pub label: String,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

/// One row of the current page
#[derive(Debug)]
pub struct PageRow<'a, R> {
    /// Rank across all pages (1-based)
    pub index: usize,
    pub row: &'a R,
}

/// Snapshot of the derived pipeline for rendering
#[derive(Debug)]
pub struct GridView<'a, R> {
    pub rows: Vec<PageRow<'a, R>>,
    pub page: usize,
    pub total_pages: usize,
    pub matched: usize,
    pub total: usize,
}

impl<R> GridView<'_, R> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

pub struct Grid<R> {
    context: String,
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    config: GridConfig,
    state: GridState,
    navigator: Box<dyn Navigator<R>>,
    viewport: Option<ViewportSubscription>,
    viewport_width: u16,
    widths: Vec<u16>,
}

impl<R> Grid<R> {
    pub fn new(context: &str, columns: Vec<Column<R>>, config: GridConfig) -> Self {
        let state = GridState::new(config.page_size);
        let mut grid = Self {
            context: context.to_string(),
            columns,
            rows: Vec::new(),
            config,
            state,
            navigator: Box::new(NoNavigation),
            viewport: None,
            viewport_width: 0,
            widths: Vec::new(),
        };
        grid.recompute_widths();
        grid
    }

    pub fn with_navigator(mut self, navigator: impl Navigator<R> + 'static) -> Self {
        self.navigator = Box::new(navigator);
        self
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Swap in a new dataset. View state starts over; the page size
    /// selection survives.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.state = GridState::new(self.state.page_size);
    }

    /// Replace the column set, dropping sort/scope on columns that vanished
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
        let known = |key: &str| self.columns.iter().any(|c| c.key() == key);

        if let Some(sort) = &self.state.sort {
            if !known(&sort.key) {
                self.state.sort = None;
            }
        }
        if let SearchScope::Column(key) = &self.state.scope {
            if !known(key) {
                self.state.scope = SearchScope::All;
                self.state.page = 1;
            }
        }

        self.clamp_page();
        self.recompute_widths();
    }

    // ---- search ----

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn set_query(&mut self, query: &str) {
        if self.state.query != query {
            self.state.query = query.to_string();
            self.state.page = 1;
        }
    }

    pub fn scope(&self) -> &SearchScope {
        &self.state.scope
    }

    pub fn scope_label(&self) -> &str {
        self.state.scope.label(&self.columns)
    }

    pub fn set_scope(&mut self, scope: SearchScope) {
        if self.state.scope != scope {
            self.state.scope = scope;
            self.state.page = 1;
        }
    }

    pub fn cycle_scope(&mut self) {
        let next = self.state.scope.next(&self.columns);
        self.set_scope(next);
    }

    // ---- sort ----

    pub fn sort(&self) -> Option<&SortState> {
        self.state.sort.as_ref()
    }

    /// Header activation. Returns `false` for non-sortable headers.
    pub fn click_header(&mut self, key: &str) -> bool {
        match sort::next_sort(self.state.sort.as_ref(), &self.columns, key) {
            Some(next) => {
                tracing::trace!("{}: sort {} {:?}", self.context, next.key, next.direction);
                self.state.sort = Some(next);
                true
            }
            None => false,
        }
    }

    // ---- derived pipeline ----

    /// Row indices after filtering and sorting
    pub fn ordered_indices(&self) -> Vec<usize> {
        let mut indices = filter::filter_rows(&self.rows, &self.columns, &self.state.query, &self.state.scope);
        if let Some(sort) = &self.state.sort {
            sort::sort_indices(&mut indices, &self.rows, &self.columns, sort);
        }
        indices
    }

    pub fn matched_len(&self) -> usize {
        filter::filter_rows(&self.rows, &self.columns, &self.state.query, &self.state.scope).len()
    }

    pub fn view(&self) -> GridView<'_, R> {
        let ordered = self.ordered_indices();
        let matched = ordered.len();
        let page_size = self.state.page_size;
        let page = paginate::clamp_page(self.state.page, matched, page_size);
        let range = paginate::page_range(page, matched, page_size);

        let rows = ordered[range]
            .iter()
            .enumerate()
            .map(|(local, &i)| PageRow {
                index: paginate::global_index(page, page_size, local),
                row: &self.rows[i],
            })
            .collect();

        GridView {
            rows,
            page,
            total_pages: paginate::total_pages(matched, page_size),
            matched,
            total: self.rows.len(),
        }
    }

    /// Row at `local` position on the current page
    pub fn page_row(&self, local: usize) -> Option<&R> {
        self.view().rows.get(local).map(|r| r.row)
    }

    pub fn page_len(&self) -> usize {
        self.view().rows.len()
    }

    // ---- pagination ----

    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size
    }

    pub fn total_pages(&self) -> usize {
        paginate::total_pages(self.matched_len(), self.state.page_size)
    }

    pub fn has_next_page(&self) -> bool {
        self.state.page < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.state.page > 1
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.state.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev_page() {
            return false;
        }
        self.state.page -= 1;
        true
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.state.page = paginate::clamp_page(page, self.matched_len(), self.state.page_size);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(usize::MAX);
    }

    /// Pick a page size among the configured presets
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.config.page_size_options.contains(&size) {
            return false;
        }
        if self.state.page_size != size {
            self.state.page_size = size;
            self.state.page = 1;
        }
        true
    }

    pub fn cycle_page_size(&mut self) -> bool {
        let options = &self.config.page_size_options;
        if options.is_empty() {
            return false;
        }
        let next = options
            .iter()
            .position(|&s| s == self.state.page_size)
            .map(|i| options[(i + 1) % options.len()])
            .unwrap_or(options[0]);
        self.set_page_size(next)
    }

    fn clamp_page(&mut self) {
        self.state.page = paginate::clamp_page(self.state.page, self.matched_len(), self.state.page_size);
    }

    // ---- activation ----

    /// Hand the row at `local` on the current page to the navigator
    pub fn activate(&mut self, local: usize) -> bool {
        let ordered = self.ordered_indices();
        let page = paginate::clamp_page(self.state.page, ordered.len(), self.state.page_size);
        let range = paginate::page_range(page, ordered.len(), self.state.page_size);

        let Some(&index) = ordered[range].get(local) else {
            return false;
        };
        tracing::debug!("{}: activated row {}", self.context, index);
        self.navigator.navigate(&self.context, &self.rows[index]);
        true
    }

    // ---- rendering helpers ----

    pub fn headers(&self) -> Vec<HeaderCell> {
        let mut headers = Vec::with_capacity(self.visible_column_count());
        if self.config.show_index {
            headers.push(HeaderCell {
                key: None,
                label: INDEX_HEADER.to_string(),
                sortable: false,
                sorted: None,
            });
        }
        headers.extend(self.columns.iter().map(|c| HeaderCell {
            key: Some(c.key().to_string()),
            label: c.header().to_string(),
            sortable: c.is_sortable(),
            sorted: self
                .state
                .sort
                .as_ref()
                .filter(|s| s.key == c.key())
                .map(|s| s.direction),
        }));
        headers
    }

    /// Cell texts for a page row, index column included
    pub fn cells(&self, row: &PageRow<'_, R>) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.visible_column_count());
        if self.config.show_index {
            cells.push(row.index.to_string());
        }
        cells.extend(self.columns.iter().map(|c| c.cell_text(row.row)));
        cells
    }

    /// Whether visible column `position` (index column counted) is left aligned
    pub fn is_left_aligned(&self, position: usize) -> bool {
        let offset = usize::from(self.config.show_index);
        if position < offset {
            return false;
        }
        position - offset < self.config.left_aligned
    }

    pub fn visible_column_count(&self) -> usize {
        self.columns.len() + usize::from(self.config.show_index)
    }

    // ---- sizing ----

    /// Follow viewport changes published on the subscription's bus
    pub fn attach_viewport(&mut self, subscription: ViewportSubscription) {
        self.viewport_width = subscription.current().width;
        self.viewport = Some(subscription);
        self.recompute_widths();
    }

    pub fn detach_viewport(&mut self) {
        self.viewport = None;
    }

    /// Pick up a pending viewport change; returns whether widths changed
    pub fn sync_viewport(&mut self) -> bool {
        let changed = self
            .viewport
            .as_mut()
            .and_then(|sub| sub.poll_changed());
        match changed {
            Some(viewport) => {
                self.set_viewport_width(viewport.width);
                true
            }
            None => false,
        }
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        if self.viewport_width != width {
            self.viewport_width = width;
            self.recompute_widths();
        }
    }

    pub fn widths(&self) -> &[u16] {
        &self.widths
    }

    fn recompute_widths(&mut self) {
        let mut hints = Vec::with_capacity(self.visible_column_count());
        if self.config.show_index {
            hints.push(WidthHint::Fixed(sizing::INDEX_COLUMN_WIDTH));
        }
        hints.extend(self.columns.iter().map(|c| c.width_hint()));

        self.widths = sizing::column_widths(
            self.viewport_width,
            self.config.viewport_padding,
            self.config.column_spacing,
            &hints,
            self.config.sizing,
        );
    }
}
