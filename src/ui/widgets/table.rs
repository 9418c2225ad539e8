//! Terminal rendering and input handling for a [`Grid`]

use std::ops::Range;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::events::navigation_delta;
use crate::config::KeyBindings;
use crate::grid::{Grid, EMPTY_MESSAGE};
use crate::ui::layout::GridLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::searchbar::SearchBar;

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";

/// Screen regions recorded on the last draw, for mouse hit-testing
#[derive(Debug, Default)]
struct HitMap {
    header_y: u16,
    body: Rect,
    /// x span and sort key of each visible column
    columns: Vec<(Range<u16>, Option<String>)>,
    footer_y: u16,
    prev: Range<u16>,
    next: Range<u16>,
    page_size: Range<u16>,
}

/// A grid plus the widget state needed to show it in a terminal
pub struct GridTable<R> {
    grid: Grid<R>,
    title: String,
    table_state: TableState,
    search_bar: SearchBar,
    /// Data column the header cursor sits on
    header_cursor: usize,
    hits: HitMap,
}

impl<R> GridTable<R> {
    pub fn new(title: &str, grid: Grid<R>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));
        Self {
            grid,
            title: title.to_string(),
            table_state,
            search_bar: SearchBar::new(),
            header_cursor: 0,
            hits: HitMap::default(),
        }
    }

    pub fn grid(&self) -> &Grid<R> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<R> {
        &mut self.grid
    }

    /// New dataset: view state and the search text start over
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.grid.set_rows(rows);
        self.search_bar.clear();
        self.search_bar.deactivate();
        self.reset_selection();
    }

    /// Whether the search bar is capturing keystrokes
    pub fn is_editing(&self) -> bool {
        self.search_bar.active
    }

    fn reset_selection(&mut self) {
        let selected = (self.grid.page_len() > 0).then_some(0);
        self.table_state = TableState::default().with_selected(selected);
    }

    fn clamp_selection(&mut self) {
        let len = self.grid.page_len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    fn sort_at_cursor(&mut self) -> bool {
        let key = self
            .grid
            .columns()
            .get(self.header_cursor)
            .map(|c| c.key().to_string());
        match key {
            Some(key) => self.grid.click_header(&key),
            None => false,
        }
    }

    fn activate_selected(&mut self) -> bool {
        match self.table_state.selected() {
            Some(local) => self.grid.activate(local),
            None => false,
        }
    }

    /// Handle a key press; returns whether the grid consumed it
    pub fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings) -> bool {
        if self.search_bar.active {
            self.handle_search_key(key);
            return true;
        }

        let searchable = self.grid.config().show_search;
        if searchable && keys.filter.matches_event(&key) {
            self.search_bar.activate();
            return true;
        }
        if keys.clear_filter.matches_event(&key) {
            if self.grid.query().is_empty() {
                return false;
            }
            self.search_bar.clear();
            self.grid.set_query("");
            self.reset_selection();
            return true;
        }
        if searchable && keys.cycle_scope.matches_event(&key) {
            self.grid.cycle_scope();
            self.reset_selection();
            return true;
        }
        if keys.is_next_page(&key) {
            if self.grid.next_page() {
                self.reset_selection();
            }
            return true;
        }
        if keys.is_prev_page(&key) {
            if self.grid.prev_page() {
                self.reset_selection();
            }
            return true;
        }
        if keys.header_left.matches_event(&key) {
            self.header_cursor = self.header_cursor.saturating_sub(1);
            return true;
        }
        if keys.header_right.matches_event(&key) {
            let last = self.grid.columns().len().saturating_sub(1);
            self.header_cursor = (self.header_cursor + 1).min(last);
            return true;
        }
        if keys.sort.matches_event(&key) {
            self.sort_at_cursor();
            return true;
        }
        if keys.page_size.matches_event(&key) {
            if self.grid.cycle_page_size() {
                self.reset_selection();
            }
            return true;
        }
        if keys.activate.matches_event(&key) {
            return self.activate_selected();
        }

        if let Some(delta) = navigation_delta(&key) {
            let len = self.grid.page_len();
            if len == 0 {
                return true;
            }

            let current = self.table_state.selected().unwrap_or(0);
            let new_index = if delta == i32::MIN {
                0
            } else if delta == i32::MAX {
                len.saturating_sub(1)
            } else {
                (current as i32 + delta).clamp(0, len as i32 - 1) as usize
            };

            self.table_state.select(Some(new_index));
            return true;
        }

        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_bar.clear();
                self.search_bar.deactivate();
            }
            KeyCode::Enter => {
                self.search_bar.deactivate();
            }
            _ => {
                self.search_bar.edit(&key);
            }
        }

        if self.grid.query() != self.search_bar.query {
            self.grid.set_query(&self.search_bar.query);
            self.reset_selection();
        }
    }

    /// Handle a left click at a screen position; returns whether it hit the grid
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        if y == self.hits.footer_y {
            if self.hits.prev.contains(&x) {
                if self.grid.prev_page() {
                    self.reset_selection();
                }
                return true;
            }
            if self.hits.next.contains(&x) {
                if self.grid.next_page() {
                    self.reset_selection();
                }
                return true;
            }
            if self.hits.page_size.contains(&x) {
                if self.grid.cycle_page_size() {
                    self.reset_selection();
                }
                return true;
            }
            return false;
        }

        if y == self.hits.header_y {
            let key = self
                .hits
                .columns
                .iter()
                .find(|(span, _)| span.contains(&x))
                .and_then(|(_, key)| key.clone());
            return match key {
                Some(key) => {
                    if let Some(pos) = self.grid.columns().iter().position(|c| c.key() == key) {
                        self.header_cursor = pos;
                    }
                    self.grid.click_header(&key)
                }
                None => false,
            };
        }

        let body = self.hits.body;
        if body.height == 0 || y < body.y || y >= body.y + body.height || x < body.x || x >= body.x + body.width {
            return false;
        }
        let local = self.table_state.offset() + usize::from(y - body.y);
        if local >= self.grid.page_len() {
            return false;
        }
        self.table_state.select(Some(local));
        self.grid.activate(local)
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        self.grid.sync_viewport();
        self.clamp_selection();

        let layout = GridLayout::new(area, self.grid.config().show_search);
        if let Some(search_area) = layout.search {
            self.search_bar.render(
                frame,
                search_area,
                self.grid.scope_label(),
                theme.normal(),
                theme.border_focused(),
            );
        }

        self.render_table(frame, layout.table, theme, focused);
        self.render_footer(frame, layout.footer, theme);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let view = self.grid.view();
        let headers = self.grid.headers();
        let widths = self.grid.widths().to_vec();
        let index_offset = usize::from(self.grid.config().show_index);
        let align = |position: usize| {
            if self.grid.is_left_aligned(position) {
                Alignment::Left
            } else {
                Alignment::Right
            }
        };

        let header_cells: Vec<Cell> = headers
            .iter()
            .enumerate()
            .map(|(position, h)| {
                let mut label = h.label.clone();
                if let Some(direction) = h.sorted {
                    label.push(' ');
                    label.push_str(direction.indicator());
                }
                let mut style = theme.header();
                if focused && h.key.is_some() && position == self.header_cursor + index_offset {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                Cell::from(Line::from(label).alignment(align(position))).style(style)
            })
            .collect();
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = view
            .rows
            .iter()
            .map(|page_row| {
                let cells: Vec<Cell> = self
                    .grid
                    .cells(page_row)
                    .into_iter()
                    .enumerate()
                    .map(|(position, text)| {
                        let cell = Cell::from(Line::from(text).alignment(align(position)));
                        if position < index_offset {
                            cell.style(theme.dim())
                        } else {
                            cell
                        }
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        let title = if self.grid.query().is_empty() {
            format!(" {} ({}) ", self.title, view.total)
        } else {
            format!(" {} ({}/{}) ", self.title, view.matched, view.total)
        };
        let border_style = if focused { theme.border_focused() } else { theme.border() };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, theme.accent()));
        let inner = block.inner(area);
        let is_empty = view.is_empty();

        let constraints: Vec<Constraint> = widths.iter().map(|&w| Constraint::Length(w)).collect();
        let spacing = self.grid.config().column_spacing;
        let table = Table::new(rows, constraints)
            .header(header)
            .block(block)
            .flex(Flex::Start)
            .column_spacing(spacing)
            .row_highlight_style(theme.selected())
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut self.table_state);

        // Hit map mirrors the table's own column layout
        let mut x = inner.x + HIGHLIGHT_SYMBOL.chars().count() as u16;
        let right = inner.x + inner.width;
        self.hits.columns = headers
            .iter()
            .zip(widths.iter())
            .map(|(h, &w)| {
                let start = x.min(right);
                let end = x.saturating_add(w).min(right);
                x = end.saturating_add(spacing);
                (start..end, h.key.clone())
            })
            .collect();
        self.hits.header_y = inner.y;
        self.hits.body = Rect::new(inner.x, inner.y + 1, inner.width, inner.height.saturating_sub(1));

        if is_empty && inner.height > 1 {
            let message_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            frame.render_widget(
                Paragraph::new(EMPTY_MESSAGE)
                    .alignment(Alignment::Center)
                    .style(theme.dim()),
                message_area,
            );
        }
    }

    fn render_footer(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let page_text = format!(" Page {} of {}  ", self.grid.page(), self.grid.total_pages());
        let enabled = |on: bool| if on { theme.accent() } else { theme.dim() };

        let mut spans = vec![
            Span::styled(page_text.clone(), theme.normal()),
            Span::styled(PREV_LABEL, enabled(self.grid.has_prev_page())),
            Span::raw("  "),
            Span::styled(NEXT_LABEL, enabled(self.grid.has_next_page())),
        ];

        let mut x = area.x + page_text.chars().count() as u16;
        self.hits.footer_y = area.y;
        self.hits.prev = x..x + PREV_LABEL.chars().count() as u16;
        x = self.hits.prev.end + 2;
        self.hits.next = x..x + NEXT_LABEL.chars().count() as u16;
        x = self.hits.next.end;

        if self.grid.config().page_size_options.is_empty() {
            self.hits.page_size = 0..0;
        } else {
            let label = format!("Rows: {}", self.grid.page_size());
            spans.push(Span::raw("   "));
            x += 3;
            self.hits.page_size = x..x + label.chars().count() as u16;
            spans.push(Span::styled(label, theme.accent()));
        }

        if self.grid.config().show_search && !self.grid.query().is_empty() {
            spans.push(Span::styled(
                format!("   {} matching \"{}\"", self.grid.matched_len(), self.grid.query()),
                theme.dim(),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Column, GridConfig, WidthHint};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Prospect {
        name: String,
        team: String,
    }

    fn rows(n: usize) -> Vec<Prospect> {
        (1..=n)
            .map(|i| Prospect {
                name: format!("Player {:02}", i),
                team: if i % 2 == 0 { "Duke".into() } else { "Houston".into() },
            })
            .collect()
    }

    fn table(n: usize, show_search: bool) -> (GridTable<Prospect>, Arc<Mutex<Vec<String>>>) {
        let columns = vec![
            Column::value("name", "Name", |r: &Prospect| r.name.clone())
                .sortable()
                .width(WidthHint::Flex(2)),
            Column::value("team", "Team", |r: &Prospect| r.team.clone()).sortable(),
        ];
        let config = GridConfig {
            show_search,
            page_size_options: vec![5, 10],
            page_size: 5,
            ..GridConfig::default()
        };
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let sink = seen.clone();
        let mut grid = Grid::new("rankings", columns, config).with_navigator(move |_: &str, row: &Prospect| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(row.name.clone());
            }
        });
        grid.set_viewport_width(60);
        let mut table = GridTable::new("Players", grid);
        table.set_rows(rows(n));
        (table, seen)
    }

    fn draw(table: &mut GridTable<Prospect>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| table.render(f, f.area(), &Theme::default(), true))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn renders_rows_and_page_footer() {
        let (mut table, _) = table(12, false);
        let screen = draw(&mut table);
        assert!(screen.contains("Players (12)"));
        assert!(screen.contains("Player 01"));
        assert!(!screen.contains("Player 06"));
        assert!(screen.contains("Page 1 of 3"));
        assert!(screen.contains("Rows: 5"));
    }

    #[test]
    fn empty_grid_shows_message() {
        let (mut table, _) = table(0, false);
        let screen = draw(&mut table);
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(screen.contains("Page 1 of 1"));
    }

    #[test]
    fn typing_filters_and_escape_clears() {
        let keys = KeyBindings::default();
        let (mut table, _) = table(12, true);

        assert!(table.handle_key(press(KeyCode::Char('/')), &keys));
        assert!(table.is_editing());
        for c in "01".chars() {
            table.handle_key(press(KeyCode::Char(c)), &keys);
        }
        assert_eq!(table.grid().matched_len(), 1);

        table.handle_key(press(KeyCode::Backspace), &keys);
        table.handle_key(press(KeyCode::Backspace), &keys);
        for c in "houston".chars() {
            table.handle_key(press(KeyCode::Char(c)), &keys);
        }
        assert_eq!(table.grid().matched_len(), 6);

        table.handle_key(press(KeyCode::Enter), &keys);
        assert!(!table.is_editing());
        assert_eq!(table.grid().query(), "houston");

        assert!(table.handle_key(press(KeyCode::Esc), &keys));
        assert_eq!(table.grid().matched_len(), 12);
        assert!(!table.handle_key(press(KeyCode::Esc), &keys));
    }

    #[test]
    fn paging_keys_move_between_pages() {
        let keys = KeyBindings::default();
        let (mut table, _) = table(12, false);
        table.handle_key(press(KeyCode::Right), &keys);
        table.handle_key(press(KeyCode::Char('n')), &keys);
        assert_eq!(table.grid().page(), 3);
        table.handle_key(press(KeyCode::Char('n')), &keys);
        assert_eq!(table.grid().page(), 3);
        table.handle_key(press(KeyCode::Char('z')), &keys);
        assert_eq!(table.grid().page_size(), 10);
        assert_eq!(table.grid().page(), 1);
    }

    #[test]
    fn enter_activates_selected_row() {
        let keys = KeyBindings::default();
        let (mut table, seen) = table(12, false);
        table.handle_key(press(KeyCode::Down), &keys);
        table.handle_key(press(KeyCode::Down), &keys);
        assert!(table.handle_key(press(KeyCode::Enter), &keys));
        let seen = seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(seen, vec!["Player 03".to_string()]);
    }

    #[test]
    fn header_cursor_sorts() {
        let keys = KeyBindings::default();
        let (mut table, _) = table(3, false);
        table.handle_key(press(KeyCode::Char('s')), &keys);
        table.handle_key(press(KeyCode::Char('s')), &keys);
        let first = table.grid().page_row(0).map(|r| r.name.clone());
        assert_eq!(first.as_deref(), Some("Player 03"));

        table.handle_key(press(KeyCode::Char('.')), &keys);
        table.handle_key(press(KeyCode::Char('s')), &keys);
        let screen = draw(&mut table);
        assert!(screen.contains("Team ▲"));
    }

    #[test]
    fn clicks_hit_headers_rows_and_footer() {
        let (mut table, seen) = table(12, false);
        draw(&mut table);

        // Border at y=0, header at y=1, first body row at y=2; columns start after the symbol
        assert!(table.handle_click(4, 1));
        assert_eq!(table.grid().sort().map(|s| s.key.as_str()), Some("name"));

        assert!(table.handle_click(4, 3));
        let activated = seen.lock().map(|s| s.clone()).unwrap_or_default();
        assert_eq!(activated, vec!["Player 02".to_string()]);

        let next_x = table.hits.next.start;
        assert!(table.handle_click(next_x, 11));
        assert_eq!(table.grid().page(), 2);

        assert!(!table.handle_click(4, 9));
    }
}
