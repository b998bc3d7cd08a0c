use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::system::collector::SystemSnapshot;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    breadcrumbs: &[(u32, String)],
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_branding(frame, chunks[0], snapshot, breadcrumbs, theme);
    render_ram_gauge(frame, chunks[1], snapshot, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    breadcrumbs: &[(u32, String)],
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight_bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(
        " ncmu ",
        Style::default()
            .fg(theme.surface_bg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];

    for (_, name) in breadcrumbs {
        spans.push(Span::styled(" > ", Style::default().fg(theme.text_primary)));
        spans.push(Span::styled(
            name.as_str(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    }

    spans.extend([
        Span::raw("  "),
        Span::styled(
            format!("Procs: {}", snapshot.tree.len().saturating_sub(1)),
            Style::default().fg(theme.text_primary),
        ),
    ]);

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_ram_gauge(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let ram_used_mb = snapshot.memory_used / 1_048_576;
    let ram_total_mb = snapshot.memory_total / 1_048_576;
    let ram_ratio = if snapshot.memory_total > 0 {
        (snapshot.memory_used as f64 / snapshot.memory_total as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let ram_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.highlight_bg))
        .title(Span::styled(
            " RAM ",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(ram_block)
        .gauge_style(
            Style::default()
                .fg(theme.bar_self)
                .bg(theme.surface_bg),
        )
        .ratio(ram_ratio)
        .label(format!(
            "{}/{} MB ({:.0}%)",
            ram_used_mb,
            ram_total_mb,
            ram_ratio * 100.0
        ));

    frame.render_widget(gauge, area);
}
