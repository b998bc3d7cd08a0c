use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    status_message: Option<&(String, std::time::Instant)>,
    at_root: bool,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.surface_bg);

    // Status message takes priority
    if let Some((msg, _)) = status_message {
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    for (key, desc) in pill_entries(keybinds, at_root) {
        spans.extend(pill_spans(key, desc, theme));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

/// Key hints for the current view, labelled from the resolved keybinds so a
/// remapped key shows its actual binding.
fn pill_entries(keybinds: &ResolvedKeybinds, at_root: bool) -> Vec<(String, &'static str)> {
    let mut entries = vec![(key_label(keybinds.descend), "Expand")];
    if !at_root {
        entries.push((key_label(keybinds.ascend), "Back"));
    }
    entries.push(("\u{2191}\u{2193}".to_string(), "Select"));
    entries.push((key_label(keybinds.refresh), "Refresh"));
    entries.push((key_label(keybinds.help), "Help"));
    entries.push((key_label(keybinds.quit), "Quit"));
    entries
}

fn pill_spans(key: String, desc: &'static str, theme: &Theme) -> Vec<Span<'static>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.surface_bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.text_primary).bg(theme.surface_bg),
        ),
    ]
}
