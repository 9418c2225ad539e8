//! Screen layout management

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Standard application layout areas
pub struct AppLayout {
    pub tabs: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Create layout from terminal area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        Self {
            tabs: chunks[0],
            content: chunks[1],
            status: chunks[2],
        }
    }

    /// Width available to screen content inside the content border
    pub fn content_width(area: Rect) -> u16 {
        Self::new(area).content.width.saturating_sub(2)
    }
}

/// Grid with optional search bar and a pagination footer
pub struct GridLayout {
    pub search: Option<Rect>,
    pub table: Rect,
    pub footer: Rect,
}

impl GridLayout {
    pub fn new(area: Rect, show_search: bool) -> Self {
        let search_height = if show_search { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(search_height), // Search bar
                Constraint::Min(3),                // Table
                Constraint::Length(1),             // Footer
            ])
            .split(area);

        Self {
            search: show_search.then_some(chunks[0]),
            table: chunks[1],
            footer: chunks[2],
        }
    }
}

/// Height of the "Top Transfers" strip: heading plus bordered cards
pub const TOP_TRANSFERS_HEIGHT: u16 = 6;
/// Narrowest card worth drawing
pub const CARD_MIN_WIDTH: u16 = 24;

/// Players screen: optional status line, optional card strip, grid
pub struct PlayersLayout {
    pub status: Option<Rect>,
    pub heading: Option<Rect>,
    pub cards: Vec<Rect>,
    pub grid: Rect,
}

impl PlayersLayout {
    /// The strip is dropped when the screen is too short to keep a usable grid
    pub fn new(area: Rect, show_status: bool, card_count: usize) -> Self {
        let status_height = u16::from(show_status);
        let fits = area.height >= status_height + TOP_TRANSFERS_HEIGHT + 10;
        let card_count = if fits {
            card_count.min(usize::from(area.width / CARD_MIN_WIDTH))
        } else {
            0
        };
        let strip_height = if card_count > 0 { TOP_TRANSFERS_HEIGHT } else { 0 };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(status_height), // Status line
                Constraint::Length(strip_height),  // Top transfers
                Constraint::Min(5),                // Grid
            ])
            .split(area);

        let (heading, cards) = if card_count > 0 {
            let strip = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(chunks[1]);
            let cards = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, card_count as u32); card_count])
                .split(strip[1]);
            (Some(strip[0]), cards.to_vec())
        } else {
            (None, Vec::new())
        };

        Self {
            status: show_status.then_some(chunks[0]),
            heading,
            cards,
            grid: chunks[2],
        }
    }
}

/// Rankings screen: title, summary cards, archetype/success panels, grid
pub struct RankingsLayout {
    pub title: Rect,
    pub cards: Vec<Rect>,
    pub panels: Vec<Rect>,
    pub grid: Rect,
}

impl RankingsLayout {
    pub fn new(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title + metadata
                Constraint::Length(4), // Summary cards
                Constraint::Length(9), // Panels
                Constraint::Min(8),    // Composite grid
            ])
            .split(area);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(main_chunks[1]);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(20),
                Constraint::Percentage(45),
            ])
            .split(main_chunks[2]);

        Self {
            title: main_chunks[0],
            cards: cards.to_vec(),
            panels: panels.to_vec(),
            grid: main_chunks[3],
        }
    }
}

/// Breakdown screen: title, status line, one slot per section
pub struct BreakdownLayout {
    pub title: Rect,
    pub status: Rect,
    pub sections: Vec<Rect>,
}

impl BreakdownLayout {
    pub fn new(area: Rect, sections: u32) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Status
                Constraint::Min(6),    // Sections
            ])
            .split(area);

        let ratios: Vec<Constraint> = (0..sections.max(1))
            .map(|_| Constraint::Ratio(1, sections.max(1)))
            .collect();
        let section_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(ratios)
            .split(chunks[2]);

        Self {
            title: chunks[0],
            status: chunks[1],
            sections: section_chunks.to_vec(),
        }
    }
}

/// Chat log above an input box
pub struct ChatLayout {
    pub subtitle: Rect,
    pub log: Rect,
    pub input: Rect,
}

impl ChatLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Subtitle
                Constraint::Min(5),    // Messages
                Constraint::Length(3), // Input
            ])
            .split(area);

        Self {
            subtitle: chunks[0],
            log: chunks[1],
            input: chunks[2],
        }
    }
}

/// Dialog/popup centered layout
pub struct DialogLayout {
    pub dialog: Rect,
}

impl DialogLayout {
    /// Create centered dialog with fixed dimensions
    pub fn centered(area: Rect, width: u16, height: u16) -> Self {
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;

        Self {
            dialog: Rect::new(x, y, width.min(area.width), height.min(area.height)),
        }
    }
}
