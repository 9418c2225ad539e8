//! Main TUI application

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::{broadcast, mpsc};

use crate::app::actions::{Route, Router, Screen};
use crate::app::events::{is_quit, left_click, tab_number, AppEvent, EventHandler};
use crate::app::state::{AppMessage, AppState, UiUpdateSignal};
use crate::config::{KeyBindings, Settings};
use crate::grid::{Viewport, ViewportBus};
use crate::ui::layout::{AppLayout, DialogLayout};
use crate::ui::tabs::{
    assistant::AssistantTab,
    breakdown::BreakdownTab,
    players::PlayersTab,
    rankings::RankingsTab,
};
use crate::ui::theme::Theme;
use crate::ui::widgets::{HelpOverlay, StatusSummary};

/// Tab under column `x` of the tab bar; each title is padded by one cell
/// on both sides and tabs are separated by a one-cell divider
fn tab_at(x: u16, area: Rect) -> Option<usize> {
    let mut start = area.x;
    for (i, screen) in Screen::all().iter().enumerate() {
        let width = screen.title().chars().count() as u16 + 4;
        if x >= start && x < start + width {
            return Some(i);
        }
        start += width + 1;
    }
    None
}

/// Main TUI application
pub struct TuiApp {
    state: Arc<AppState>,
    state_tx: mpsc::Sender<AppMessage>,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_handler: EventHandler,
    ui_update_rx: broadcast::Receiver<UiUpdateSignal>,
    viewport: ViewportBus,

    // UI state
    current: Screen,
    theme: Theme,
    keys: KeyBindings,
    show_help: bool,

    // Tabs
    players_tab: PlayersTab,
    rankings_tab: RankingsTab,
    breakdown_tab: BreakdownTab,
    assistant_tab: AssistantTab,
}

impl TuiApp {
    pub fn new(state: Arc<AppState>, state_tx: mpsc::Sender<AppMessage>, settings: &Settings) -> Result<Self> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let viewport = ViewportBus::new(Viewport::new(AppLayout::content_width(area), size.height));

        let ui_update_rx = state.ui_update_tx.subscribe();
        let router = Router::new(state_tx.clone());
        let config = settings.grid_config();

        Ok(Self {
            players_tab: PlayersTab::new(config.clone(), router.clone(), viewport.subscribe()),
            rankings_tab: RankingsTab::new(config.clone(), router, viewport.subscribe()),
            breakdown_tab: BreakdownTab::new(config, &viewport),
            assistant_tab: AssistantTab::new(),

            state,
            state_tx,
            terminal,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            ui_update_rx,
            viewport,

            current: Screen::Players,
            theme: Theme::by_name(&settings.theme),
            keys: KeyBindings::default(),
            show_help: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Check for UI update signals
            while let Ok(signal) = self.ui_update_rx.try_recv() {
                if let UiUpdateSignal::SwitchScreen(screen) = signal {
                    self.current = screen;
                }
            }

            // Update tab caches before drawing
            self.update_tab_caches().await;

            // Draw UI
            self.draw()?;

            // Handle input events
            let Some(event) = self.event_handler.next() else {
                continue;
            };
            match event {
                AppEvent::Key(key) => {
                    if self.show_help {
                        self.show_help = false;
                        continue;
                    }

                    // A focused text input gets every key
                    if self.is_editing() {
                        self.dispatch_key(key).await;
                        continue;
                    }

                    if self.keys.quit.matches_event(&key) || is_quit(&key) {
                        break;
                    }
                    if self.keys.help.matches_event(&key) {
                        self.show_help = true;
                        continue;
                    }
                    if self.keys.refresh.matches_event(&key) {
                        self.refresh().await;
                        continue;
                    }
                    if let Some(index) = tab_number(&key) {
                        if let Some(screen) = Screen::all().get(index) {
                            self.current = *screen;
                        }
                        continue;
                    }
                    if self.keys.next_tab.matches_event(&key) || self.keys.prev_tab.matches_event(&key) {
                        let delta = if self.keys.next_tab.matches_event(&key) { 1 } else { -1 };
                        let len = Screen::all().len() as i32;
                        let index = (self.current.index() as i32 + delta).rem_euclid(len) as usize;
                        self.current = Screen::all()[index];
                        continue;
                    }

                    self.dispatch_key(key).await;
                }
                AppEvent::Mouse(mouse) => {
                    let Some((x, y)) = left_click(&mouse) else {
                        continue;
                    };
                    if self.show_help {
                        self.show_help = false;
                        continue;
                    }
                    self.handle_click(x, y);
                }
                AppEvent::Resize(width, height) => {
                    let area = Rect::new(0, 0, width, height);
                    self.viewport
                        .publish(Viewport::new(AppLayout::content_width(area), height));
                }
                AppEvent::Tick => {}
            }
        }

        Ok(())
    }

    fn is_editing(&self) -> bool {
        match self.current {
            Screen::Players => self.players_tab.is_editing(),
            Screen::Rankings => self.rankings_tab.is_editing(),
            Screen::Breakdown => false,
            Screen::Assistant => self.assistant_tab.is_editing(),
        }
    }

    async fn dispatch_key(&mut self, key: KeyEvent) {
        let keys = &self.keys;
        match self.current {
            Screen::Players => {
                self.players_tab.handle_key(key, keys);
            }
            Screen::Rankings => {
                self.rankings_tab.handle_key(key, keys);
            }
            Screen::Breakdown => {
                self.breakdown_tab.handle_key(key, keys);
            }
            Screen::Assistant => {
                self.assistant_tab.handle_key(key, keys, &self.state_tx).await;
            }
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let size = match self.terminal.size() {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!("Failed to read terminal size: {}", e);
                return;
            }
        };
        let layout = AppLayout::new(Rect::new(0, 0, size.width, size.height));

        if y == layout.tabs.y {
            if let Some(index) = tab_at(x, layout.tabs) {
                self.current = Screen::all()[index];
            }
            return;
        }

        match self.current {
            Screen::Players => {
                self.players_tab.handle_click(x, y);
            }
            Screen::Rankings => {
                self.rankings_tab.handle_click(x, y);
            }
            Screen::Breakdown => {
                self.breakdown_tab.handle_click(x, y);
            }
            Screen::Assistant => {}
        }
    }

    /// Reload whatever the current screen shows
    async fn refresh(&mut self) {
        let msg = match self.current {
            Screen::Players => Some(AppMessage::LoadPlayers),
            Screen::Rankings => {
                let rankings = self.state.rankings.read().await;
                rankings.player.clone().map(|p| AppMessage::Navigate(Route::Rankings(p)))
            }
            Screen::Breakdown | Screen::Assistant => None,
        };
        if let Some(msg) = msg {
            if let Err(e) = self.state_tx.send(msg).await {
                tracing::error!("Failed to request refresh: {}", e);
            }
        }
    }

    async fn update_tab_caches(&mut self) {
        match self.current {
            Screen::Players => self.players_tab.update_cache(&self.state).await,
            Screen::Rankings => self.rankings_tab.update_cache(&self.state).await,
            Screen::Breakdown => self.breakdown_tab.update_cache(&self.state).await,
            Screen::Assistant => self.assistant_tab.update_cache(&self.state).await,
        }
    }

    fn draw(&mut self) -> Result<()> {
        let theme = &self.theme;
        let keys = &self.keys;
        let current = self.current;
        let show_help = self.show_help;

        let status = StatusSummary::capture(&self.state);

        self.terminal.draw(|frame| {
            let layout = AppLayout::new(frame.area());

            // Tab bar
            let tab_titles: Vec<Line> = Screen::all()
                .iter()
                .enumerate()
                .map(|(i, screen)| {
                    let style = if i == current.index() {
                        theme.tab_active()
                    } else {
                        theme.tab_inactive()
                    };
                    Line::from(Span::styled(format!(" {} ", screen.title()), style))
                })
                .collect();

            let tabs = Tabs::new(tab_titles)
                .select(current.index())
                .highlight_style(theme.tab_active())
                .divider("|");

            frame.render_widget(tabs, layout.tabs);

            // Content
            let content_block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(format!(" {} ", current.title()));

            let inner = content_block.inner(layout.content);
            frame.render_widget(content_block, layout.content);

            match current {
                Screen::Players => self.players_tab.render(frame, inner, theme),
                Screen::Rankings => self.rankings_tab.render(frame, inner, theme),
                Screen::Breakdown => self.breakdown_tab.render(frame, inner, theme),
                Screen::Assistant => self.assistant_tab.render(frame, inner, theme),
            }

            // Status bar
            frame.render_widget(Paragraph::new(status.line(theme)), layout.status);

            // Help overlay
            if show_help {
                render_help(frame, theme, keys);
            }
        })?;

        Ok(())
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn render_help(frame: &mut Frame, theme: &Theme, keys: &KeyBindings) {
    let help_area = DialogLayout::centered(frame.area(), 60, 26).dialog;
    HelpOverlay::new(keys).render(frame, help_area, theme);
}
