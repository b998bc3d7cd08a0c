pub mod header;
pub mod help;
pub mod info_bar;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::ui::table::ProcessRow;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let breadcrumbs = app.breadcrumbs();
    header::render(frame, chunks[0], &app.snapshot, &breadcrumbs, &app.theme);

    let siblings_total = app.siblings_total();
    let rows: Vec<ProcessRow> = app
        .rows
        .iter()
        .filter_map(|pid| app.snapshot.tree.get(*pid))
        .map(|node| ProcessRow::from_node(node, siblings_total, app.bar_width))
        .collect();
    table::render(
        frame,
        chunks[1],
        &rows,
        app.selected_index,
        app.bar_width,
        &app.theme,
    );

    let command = app.selected_command();
    info_bar::render(frame, chunks[2], command.as_deref(), &app.theme);

    let at_root = app.nav.at_root();
    let theme = app.theme;
    let status = app.status().cloned();
    statusbar::render(
        frame,
        chunks[3],
        status.as_ref(),
        at_root,
        &app.keybinds,
        &theme,
    );

    // Help overlay — rendered last to appear on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
