use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

/// One-line detail display for the selected row's full command line.
/// `command` is `None` when the selected pid no longer resolves in the tree,
/// which renders an explicit not-found state instead of stale data.
pub fn render(frame: &mut Frame, area: Rect, command: Option<&str>, theme: &Theme) {
    let text = match command {
        Some(cmd) if !cmd.is_empty() => cmd.to_string(),
        Some(_) => "No command line available".to_string(),
        None => "[Not found]".to_string(),
    };
    let capacity = (area.width as usize).saturating_sub(10);
    let line = Line::from(vec![
        Span::styled(
            " Command: ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            truncate_unicode(&text, capacity),
            Style::default().fg(theme.text_primary),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.surface_bg)),
        area,
    );
}
