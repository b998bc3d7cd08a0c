use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Row, Table};

use crate::bar::UsageBar;
use crate::format::{display_name, format_memory, truncate_unicode};
use crate::system::process::ProcessNode;
use crate::ui::theme::Theme;

pub const MEMORY_WIDTH: usize = 12;
pub const PROCESS_WIDTH: usize = 40;
pub const PID_WIDTH: usize = 6;
pub const USER_WIDTH: usize = 10;

/// One formatted table row: memory label, bar geometry, display name, pid
/// and user, all truncated to their column widths.
#[derive(Debug, Clone)]
pub struct ProcessRow {
    pub memory: String,
    pub bar: UsageBar,
    pub process: String,
    pub pid: String,
    pub user: String,
}

impl ProcessRow {
    pub fn from_node(node: &ProcessNode, siblings_total: u64, bar_width: usize) -> Self {
        let bar = UsageBar::compute(
            node.self_memory,
            node.total_memory,
            siblings_total,
            bar_width,
        );
        ProcessRow {
            memory: format!("{:>width$}", format_memory(node.total_memory), width = MEMORY_WIDTH),
            bar,
            process: truncate_unicode(&display_name(&node.name, &node.command), PROCESS_WIDTH),
            pid: format!("{:>width$}", node.pid, width = PID_WIDTH),
            user: truncate_unicode(&node.user, USER_WIDTH),
        }
    }
}

/// Styled span run for a usage bar: own segment, descendants' segment, then
/// blank padding, framed in brackets.
fn bar_spans(bar: &UsageBar, theme: &Theme) -> Line<'static> {
    if bar.placeholder {
        return Line::from(vec![
            Span::raw("["),
            Span::styled(
                "-".repeat(bar.width),
                Style::default().fg(theme.bar_placeholder),
            ),
            Span::raw("]"),
        ]);
    }
    Line::from(vec![
        Span::raw("["),
        Span::styled(
            "#".repeat(bar.self_cells),
            Style::default().fg(theme.bar_self),
        ),
        Span::styled(
            "=".repeat(bar.children_cells),
            Style::default().fg(theme.bar_children),
        ),
        Span::raw(" ".repeat(bar.padding_cells())),
        Span::raw("]"),
    ])
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[ProcessRow],
    selected_index: usize,
    bar_width: usize,
    theme: &Theme,
) {
    let header = Row::new(vec!["Memory", "Usage Bar", "Process", "PID", "User"]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == selected_index {
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_primary)
            };
            Row::new(vec![
                Cell::from(row.memory.clone()),
                Cell::from(bar_spans(&row.bar, theme)),
                Cell::from(row.process.clone()),
                Cell::from(row.pid.clone()),
                Cell::from(row.user.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(MEMORY_WIDTH as u16),
        Constraint::Length(bar_width as u16 + 2),
        Constraint::Length(PROCESS_WIDTH as u16),
        Constraint::Length(PID_WIDTH as u16),
        Constraint::Length(USER_WIDTH as u16),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(Block::default())
        .column_spacing(1);

    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(pid: u32, name: &str, self_memory: u64, total_memory: u64) -> ProcessNode {
        ProcessNode {
            pid,
            name: name.to_string(),
            command: format!("{name} --flag"),
            user: "tester".to_string(),
            self_memory,
            total_memory,
            children: Vec::new(),
            parent: Some(0),
        }
    }

    #[test]
    fn row_formats_all_columns() {
        let row = ProcessRow::from_node(&node(42, "nginx", 50, 100), 200, 20);
        assert!(row.memory.trim_start().ends_with("MiB"));
        assert_eq!(row.pid, "    42");
        assert_eq!(row.process, "nginx --flag");
        assert_eq!(row.user, "tester");
        // 100 of 200 total, 50 of it self: 10 total cells, 5 self.
        assert_eq!(row.bar.self_cells, 5);
        assert_eq!(row.bar.children_cells, 5);
    }

    #[test]
    fn over_length_fields_are_truncated_not_fatal() {
        let mut n = node(1, "x", 1, 1);
        n.name = "n".repeat(200);
        n.command = "c".repeat(500);
        n.user = "u".repeat(64);
        let row = ProcessRow::from_node(&n, 1, 20);
        assert!(row.process.chars().count() <= PROCESS_WIDTH);
        assert!(row.user.chars().count() <= USER_WIDTH);
    }

    #[test]
    fn bar_spans_cover_exact_width() {
        let theme = Theme::default();
        let bar = UsageBar::compute(25, 75, 100, 20);
        let line = bar_spans(&bar, &theme);
        let content: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(content.chars().count(), 22); // width + brackets
    }

    #[test]
    fn placeholder_bar_spans_are_filler() {
        let theme = Theme::default();
        let bar = UsageBar::compute(0, 0, 0, 20);
        let line = bar_spans(&bar, &theme);
        let content: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(content, format!("[{}]", "-".repeat(20)));
    }
}
