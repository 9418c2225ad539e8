//! Rankings tab: summary cards, archetype panels and the composite score table

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::actions::{Router, BREAKDOWN_CONTEXT};
use crate::app::state::AppState;
use crate::config::KeyBindings;
use crate::grid::{Grid, GridConfig, ViewportSubscription};
use crate::models::rank::{bss_success, ess_adequate, score_text};
use crate::models::{ArchetypeSplit, CompositeScore, HistComputeResponse, RankSummary, SuccStats, TransferPlayer};
use crate::ui::layout::RankingsLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::GridTable;
use crate::utils::{fixed, truncate};

const LOADING: &str = "Loading...";

/// One axis of the success comparison
#[derive(Debug, Clone, PartialEq)]
struct SuccessPoint {
    subject: &'static str,
    benchmark: Option<f64>,
    player: Option<f64>,
}

/// Scaled success stats, benchmark beside player
fn success_points(resp: &HistComputeResponse) -> Vec<SuccessPoint> {
    let bmark = resp.succ_bmark_scaled.as_ref();
    let plyr = resp.succ_plyr_scaled.as_ref();
    let axes: [(&'static str, fn(&SuccStats) -> Option<f64>); 6] = [
        ("TS%", |s| Some(s.ts_percent)),
        ("PORPAG", |s| Some(s.porpag)),
        ("DPORPAG", |s| Some(s.dporpag)),
        ("DReb%", |s| Some(s.dreb_percent)),
        ("AST%", |s| s.ast_percent),
        ("STL%", |s| s.stl_percent),
    ];

    axes.iter()
        .map(|(subject, get)| SuccessPoint {
            subject,
            benchmark: bmark.and_then(get),
            player: plyr.and_then(get),
        })
        .collect()
}

/// Cells of a bar for `value` on a `0..=max` scale; negatives draw nothing
fn bar_len(value: f64, max: f64, width: u16) -> u16 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * f64::from(width)).round().clamp(0.0, f64::from(width)) as u16
}

/// Split `width` cells by the visual ratios of an archetype split
fn segment_widths(ratios: &[f64], width: u16) -> Vec<u16> {
    match ratios {
        [] => Vec::new(),
        [_] => vec![width],
        [first, ..] => {
            let left = (first * f64::from(width)).round().clamp(0.0, f64::from(width)) as u16;
            vec![left, width - left]
        }
    }
}

pub struct RankingsTab {
    table: GridTable<CompositeScore>,
    player: Option<TransferPlayer>,
    data: Option<Arc<HistComputeResponse>>,
    status: Option<String>,
    revision: Option<u64>,
}

impl RankingsTab {
    pub fn new(mut config: GridConfig, router: Router, viewport: ViewportSubscription) -> Self {
        config.show_index = true;
        config.left_aligned = 2;
        let mut grid = Grid::new(BREAKDOWN_CONTEXT, CompositeScore::columns(), config).with_navigator(router);
        grid.attach_viewport(viewport);
        Self {
            table: GridTable::new("Replacement Candidates", grid),
            player: None,
            data: None,
            status: None,
            revision: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.table.is_editing()
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let rankings = state.rankings.read().await;
        if self.revision == Some(rankings.revision) {
            return;
        }
        self.revision = Some(rankings.revision);
        self.player = rankings.player.clone();
        self.status = rankings.data.status();
        self.data = rankings.data.loaded().cloned();
        drop(rankings);

        let rows = self
            .data
            .as_ref()
            .map(|resp| resp.composite_scores.clone())
            .unwrap_or_default();
        self.table.set_rows(rows);
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(player) = &self.player else {
            let hint = Paragraph::new("Select a player on the Players tab to rank replacement candidates.")
                .style(theme.dim())
                .wrap(Wrap { trim: true });
            frame.render_widget(hint, area);
            return;
        };

        let layout = RankingsLayout::new(area);

        // Title + metadata
        let mut meta = vec![
            Span::styled(player.team_name.clone(), theme.accent()),
            Span::raw(" · "),
            Span::raw(player.position.clone()),
            Span::raw(" · "),
            Span::raw(player.season_year.to_string()),
        ];
        if let Some(status) = &self.status {
            let style = if status.starts_with("Error") { theme.error() } else { theme.dim() };
            meta.push(Span::raw("   "));
            meta.push(Span::styled(status.clone(), style));
        }
        let title = Paragraph::new(vec![
            Line::from(Span::styled(player.player_name.clone(), theme.bright())),
            Line::from(meta),
        ]);
        frame.render_widget(title, layout.title);

        self.render_cards(frame, &layout, theme);

        let data = self.data.as_deref();
        render_archetype(frame, layout.panels[0], data, theme);
        render_team_archetype(frame, layout.panels[1], data, theme);
        render_success(frame, layout.panels[2], data, theme);

        self.table.render(frame, layout.grid, theme, true);
    }

    fn render_cards(&self, frame: &mut Frame, layout: &RankingsLayout, theme: &Theme) {
        let summary = self
            .data
            .as_deref()
            .map(RankSummary::from_response)
            .unwrap_or(RankSummary { current: None, total: 0 });
        let category = summary.category();

        let (ess, bss) = match self.data.as_deref() {
            Some(resp) => (Some(resp.ess), Some(resp.bss)),
            None => (None, None),
        };

        let cards = [
            (
                "Rank",
                summary.text(),
                theme.rank_style(category),
                format!("Percentile {} · {}", summary.percentile_text(), category.label()),
            ),
            (
                "ESS",
                ess.map(score_text).unwrap_or_else(|| "--".to_string()),
                ess.map(|v| theme.threshold_style(ess_adequate(v))).unwrap_or(theme.dim()),
                "ESS > 30 = Adequate sample".to_string(),
            ),
            (
                "BSS",
                bss.map(score_text).unwrap_or_else(|| "--".to_string()),
                bss.map(|v| theme.threshold_style(bss_success(v))).unwrap_or(theme.dim()),
                "BSS > -0.05 = Success".to_string(),
            ),
        ];

        for ((label, value, style, note), area) in cards.into_iter().zip(layout.cards.iter()) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border())
                .title(Span::styled(format!(" {}: ", label), theme.warning()));
            let body = Paragraph::new(vec![
                Line::from(Span::styled(value, style.add_modifier(Modifier::BOLD))),
                Line::from(Span::styled(note, theme.dim())),
            ])
            .block(block);
            frame.render_widget(body, *area);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings) -> bool {
        self.table.handle_key(key, keys)
    }

    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        self.table.handle_click(x, y)
    }
}

fn panel<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border())
        .title(Span::styled(format!(" {} ", title), theme.accent()))
}

fn render_archetype(frame: &mut Frame, area: Rect, data: Option<&HistComputeResponse>, theme: &Theme) {
    let block = panel("Player Archetype", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let split = data
        .map(|resp| ArchetypeSplit::from_fractions(&resp.player_archetype_names, &resp.player_archetype_percentages))
        .unwrap_or_default();
    if split.is_empty() {
        frame.render_widget(Paragraph::new(LOADING).style(theme.dim()), inner);
        return;
    }

    let majority = split.majority();
    let widths = segment_widths(&split.visual_ratios(), inner.width);
    let bar: Vec<Span> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| Span::styled("█".repeat(usize::from(w)), Style::default().fg(theme.archetype_color(i))))
        .collect();

    let mut lines = vec![Line::from(bar.clone()), Line::from(bar), Line::raw("")];
    for (i, share) in split.items.iter().enumerate() {
        let mut style = Style::default().fg(theme.archetype_color(i));
        if majority == Some(i) {
            style = style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled("● ", style),
            Span::styled(share.label.clone(), style),
            Span::styled(format!("  {:.0}%", share.percent), theme.normal()),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_team_archetype(frame: &mut Frame, area: Rect, data: Option<&HistComputeResponse>, theme: &Theme) {
    let block = panel("Team Archetype", theme);
    let labels: Vec<Line> = match data {
        Some(resp) if !resp.team_archetype.is_empty() => resp
            .team_archetype
            .iter()
            .map(|a| {
                Line::from(Span::styled(
                    a.clone(),
                    Style::default().fg(theme.benchmark).add_modifier(Modifier::BOLD),
                ))
            })
            .collect(),
        _ => vec![Line::from(Span::styled(LOADING, theme.dim()))],
    };
    frame.render_widget(
        Paragraph::new(labels).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_success(frame: &mut Frame, area: Rect, data: Option<&HistComputeResponse>, theme: &Theme) {
    let block = panel("Success Breakdown", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(resp) = data else {
        frame.render_widget(Paragraph::new(LOADING).style(theme.dim()), inner);
        return;
    };

    let points = success_points(resp);
    let max = points
        .iter()
        .flat_map(|p| [p.benchmark, p.player])
        .flatten()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    // label(8) + two "bar value" halves
    let half = inner.width.saturating_sub(8) / 2;
    let bar_width = half.saturating_sub(8);

    let bench_style = Style::default().fg(theme.benchmark);
    let player_style = Style::default().fg(theme.player);
    let half_spans = |value: Option<f64>, style: Style| -> Vec<Span<'static>> {
        match value {
            Some(v) => {
                let len = bar_len(v, max, bar_width);
                vec![
                    Span::styled("▇".repeat(usize::from(len)), style),
                    Span::raw(" ".repeat(usize::from(bar_width - len))),
                    Span::styled(format!(" {:>6} ", truncate(&fixed(v, 2), 6)), theme.dim()),
                ]
            }
            None => vec![Span::styled(format!("{:<width$}", "--", width = usize::from(half)), theme.dim())],
        }
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(format!("{:<8}", "")),
        Span::styled(format!("{:<width$}", "Benchmark", width = usize::from(half)), bench_style),
        Span::styled("Player", player_style),
    ])];
    for point in &points {
        let mut spans = vec![Span::raw(format!("{:<8}", point.subject))];
        spans.extend(half_spans(point.benchmark, bench_style));
        spans.extend(half_spans(point.player, player_style));
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    use crate::grid::{Viewport, ViewportBus};

    fn response() -> HistComputeResponse {
        HistComputeResponse {
            rank: Some(0),
            ess: 42.5,
            bss: -0.2,
            succ_bmark_scaled: Some(SuccStats {
                ts_percent: 0.5,
                porpag: 0.25,
                stl_percent: Some(0.1),
                ..SuccStats::default()
            }),
            succ_plyr_scaled: Some(SuccStats {
                ts_percent: 1.0,
                ..SuccStats::default()
            }),
            player_archetype_names: vec!["Shot Creator".into(), "Connector".into()],
            player_archetype_percentages: vec![0.9, 0.1],
            team_archetype: vec!["Five-Out".into()],
            composite_scores: vec![CompositeScore {
                player_name: "Caleb Love".into(),
                prev_team_name: "Arizona".into(),
                ..CompositeScore::default()
            }],
            ..HistComputeResponse::default()
        }
    }

    #[test]
    fn success_points_follow_scaled_values() {
        let points = success_points(&response());
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], SuccessPoint { subject: "TS%", benchmark: Some(0.5), player: Some(1.0) });
        assert_eq!(points[5].benchmark, Some(0.1));
        assert_eq!(points[5].player, None);

        let unscaled = HistComputeResponse::default();
        assert!(success_points(&unscaled).iter().all(|p| p.benchmark.is_none() && p.player.is_none()));
    }

    #[test]
    fn bars_scale_to_width() {
        assert_eq!(bar_len(0.5, 1.0, 20), 10);
        assert_eq!(bar_len(2.0, 1.0, 20), 20);
        assert_eq!(bar_len(-0.3, 1.0, 20), 0);
        assert_eq!(bar_len(0.3, 0.0, 20), 0);
        assert_eq!(segment_widths(&[0.67, 0.33], 30), vec![20, 10]);
        assert_eq!(segment_widths(&[1.0], 30), vec![30]);
    }

    #[test]
    fn renders_cards_and_candidates() {
        let (tx, _rx) = mpsc::channel(4);
        let bus = ViewportBus::new(Viewport::new(118, 40));
        let mut tab = RankingsTab::new(GridConfig::default(), Router::new(tx), bus.subscribe());
        tab.player = Some(TransferPlayer {
            season_year: 2024,
            player_name: "Oumar Ballo".into(),
            player_id: 7,
            player_year: 4,
            team_name: "Indiana".into(),
            position: "C".into(),
            height_inches: Some(84),
        });
        let resp = Arc::new(response());
        tab.table.set_rows(resp.composite_scores.clone());
        tab.data = Some(resp);

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|f| tab.render(f, f.area(), &Theme::default()))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(screen.contains("Oumar Ballo"));
        assert!(screen.contains("1/1"));
        assert!(screen.contains("42.5"));
        assert!(screen.contains("-0.2"));
        assert!(screen.contains("Five-Out"));
        assert!(screen.contains("Shot Creator"));
        assert!(screen.contains("Caleb Love"));
    }
}
