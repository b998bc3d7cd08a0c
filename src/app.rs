use std::time::Instant;

use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use crate::action::{Action, Direction};
use crate::config::{Config, parse_key};
use crate::nav::Navigator;
use crate::system::collector::{ProcessSource, SystemSnapshot, capture};

use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub descend: KeyCode,
    pub ascend: KeyCode,
    pub refresh: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            descend: parse_key(&kb.descend).unwrap_or(KeyCode::Enter),
            ascend: parse_key(&kb.ascend).unwrap_or(KeyCode::Esc),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.descend), "Expand selected process"),
            (key_label(self.ascend), "Back to parent"),
            (key_label(self.refresh), "Refresh snapshot"),
            (key_label(self.help), "Toggle help"),
            (key_label(self.quit), "Quit"),
        ];
        entries.push(("↑↓".to_string(), "Move selection"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

pub(crate) fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    source: Box<dyn ProcessSource>,
    pub snapshot: SystemSnapshot,
    pub nav: Navigator,
    /// Pids currently on screen: children of the navigator's node, ordered.
    pub rows: Vec<u32>,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub status_message: Option<(String, Instant)>,
    pub bar_width: usize,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    /// Capture the startup snapshot and settle on the root view. The only
    /// error path is a source that cannot enumerate any process.
    pub fn new(config: &Config, mut source: Box<dyn ProcessSource>) -> Result<Self> {
        let snapshot = capture(source.as_mut())?;
        let nav = Navigator::new();
        let rows = nav.visible_rows(&snapshot.tree);

        Ok(App {
            running: true,
            source,
            snapshot,
            nav,
            rows,
            selected_index: 0,
            input_mode: InputMode::Normal,
            status_message: None,
            bar_width: config.general.bar_width,
            theme: Theme::from_config(&config.colors),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        })
    }

    /// Recompute the visible sibling group after any navigation transition
    /// and put the cursor back on the top row.
    fn settle(&mut self) {
        self.rows = self.nav.visible_rows(&self.snapshot.tree);
        self.selected_index = 0;
    }

    pub fn selected_pid(&self) -> Option<u32> {
        self.rows.get(self.selected_index).copied()
    }

    /// Command line of the selected row, or `None` when the pid no longer
    /// resolves in the tree (the info bar shows an explicit not-found state).
    pub fn selected_command(&self) -> Option<String> {
        let pid = self.selected_pid()?;
        self.snapshot.tree.get(pid).map(|n| n.command.clone())
    }

    /// Sum of `total_memory` over the displayed sibling group; the scale the
    /// usage bars are drawn against.
    pub fn siblings_total(&self) -> u64 {
        self.rows
            .iter()
            .filter_map(|pid| self.snapshot.tree.get(*pid))
            .map(|n| n.total_memory)
            .sum()
    }

    /// Path of (pid, name) from the root down to the current node.
    pub fn breadcrumbs(&self) -> Vec<(u32, String)> {
        let mut path = Vec::new();
        let mut cursor = Some(self.nav.current());
        while let Some(pid) = cursor {
            match self.snapshot.tree.get(pid) {
                Some(node) => {
                    path.push((pid, node.name.clone()));
                    cursor = node.parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Cursor keys are hardwired (not configurable)
        if code == KeyCode::Up {
            return Action::MoveCursor(Direction::Up);
        }
        if code == KeyCode::Down {
            return Action::MoveCursor(Direction::Down);
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.descend {
            return Action::Descend;
        }
        if code == kb.ascend {
            return Action::Ascend;
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::MoveCursor(dir) => self.move_cursor(dir),
            Action::Descend => {
                if let Some(pid) = self.selected_pid()
                    && self.nav.descend(&self.snapshot.tree, pid)
                {
                    self.settle();
                }
            }
            Action::Ascend => {
                if self.nav.ascend(&self.snapshot.tree) {
                    self.settle();
                }
            }
            Action::Refresh => self.refresh_snapshot(),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::None => {}
        }
    }

    fn move_cursor(&mut self, dir: Direction) {
        if self.rows.is_empty() {
            return;
        }
        match dir {
            Direction::Up => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            Direction::Down => {
                if self.selected_index + 1 < self.rows.len() {
                    self.selected_index += 1;
                }
            }
        }
    }

    /// Re-capture, rebuild and re-aggregate, then continue navigating from
    /// the same node when it still exists, else from root. A refresh failure
    /// keeps the old snapshot; only startup is fatal.
    fn refresh_snapshot(&mut self) {
        match capture(self.source.as_mut()) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.nav.revalidate(&self.snapshot.tree);
                self.settle();
                self.status_message = Some(("Snapshot refreshed".to_string(), Instant::now()));
            }
            Err(err) => {
                warn!(error = %err, "refresh failed, keeping previous snapshot");
                self.status_message = Some((format!("Refresh failed: {err}"), Instant::now()));
            }
        }
    }

    /// Current status message, dropping it once it has been on screen for a
    /// few seconds.
    pub fn status(&mut self) -> Option<&(String, Instant)> {
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
        self.status_message.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::process::{ProcessRecord, ROOT_PID};

    struct FakeSource {
        records: Vec<ProcessRecord>,
    }

    impl ProcessSource for FakeSource {
        fn processes(&mut self) -> Vec<ProcessRecord> {
            self.records.clone()
        }
    }

    fn record(pid: u32, ppid: u32, name: &str, memory_bytes: u64) -> ProcessRecord {
        ProcessRecord {
            pid,
            ppid,
            name: name.to_string(),
            memory_bytes,
            user: "tester".to_string(),
            command: format!("{name} --daemon"),
        }
    }

    fn make_test_app() -> App {
        let source = FakeSource {
            records: vec![
                record(1, 0, "init", 100),
                record(2, 1, "worker_a", 50),
                record(3, 1, "worker_b", 0),
                record(4, 2, "leaf", 25),
            ],
        };
        App::new(&Config::default(), Box::new(source)).unwrap()
    }

    #[test]
    fn startup_with_empty_source_fails() {
        let source = FakeSource { records: vec![] };
        assert!(App::new(&Config::default(), Box::new(source)).is_err());
    }

    #[test]
    fn initial_view_is_root_children() {
        let app = make_test_app();
        assert!(app.nav.at_root());
        assert_eq!(app.rows, vec![1]);
        assert_eq!(app.selected_pid(), Some(1));
    }

    #[test]
    fn descend_changes_view_and_resets_cursor() {
        let mut app = make_test_app();
        app.dispatch(Action::Descend);
        assert_eq!(app.nav.current(), 1);
        // worker_a totals 75, worker_b totals 0
        assert_eq!(app.rows, vec![2, 3]);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn descend_on_leaf_is_noop() {
        let mut app = make_test_app();
        app.dispatch(Action::Descend); // into init
        app.dispatch(Action::MoveCursor(Direction::Down)); // select worker_b (leaf)
        app.dispatch(Action::Descend);
        assert_eq!(app.nav.current(), 1);
        assert_eq!(app.selected_pid(), Some(3));
    }

    #[test]
    fn ascend_at_root_is_noop() {
        let mut app = make_test_app();
        app.dispatch(Action::Ascend);
        assert!(app.nav.at_root());
        assert_eq!(app.rows, vec![1]);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut app = make_test_app();
        app.dispatch(Action::Descend);
        app.dispatch(Action::MoveCursor(Direction::Up));
        assert_eq!(app.selected_index, 0);
        app.dispatch(Action::MoveCursor(Direction::Down));
        app.dispatch(Action::MoveCursor(Direction::Down));
        app.dispatch(Action::MoveCursor(Direction::Down));
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn siblings_total_covers_displayed_group() {
        let mut app = make_test_app();
        app.dispatch(Action::Descend);
        assert_eq!(app.siblings_total(), 75);
    }

    #[test]
    fn breadcrumbs_trace_path_from_root() {
        let mut app = make_test_app();
        app.dispatch(Action::Descend);
        let crumbs = app.breadcrumbs();
        assert_eq!(crumbs.len(), 2);
        assert_eq!(crumbs[0].0, ROOT_PID);
        assert_eq!(crumbs[1], (1, "init".to_string()));
    }

    #[test]
    fn selected_command_reports_full_cmdline() {
        let app = make_test_app();
        assert_eq!(app.selected_command().as_deref(), Some("init --daemon"));
    }

    #[test]
    fn default_keybinds_map_to_actions() {
        let app = make_test_app();

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Quit);

        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Descend);

        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Ascend);

        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::Refresh);

        // Ctrl+C always quits
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);

        // Cursor keys stay hardwired
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::MoveCursor(Direction::Up));
    }

    #[test]
    fn help_mode_blocks_other_keys() {
        let mut app = make_test_app();

        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help());

        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::None);

        // Help key and Esc dismiss
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.map_key(key), Action::ToggleHelp);

        // Ctrl+C still works (safety)
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(key), Action::Quit);
    }

    #[test]
    fn refresh_falls_back_to_root_when_current_node_vanishes() {
        let mut app = make_test_app();
        app.dispatch(Action::Descend);
        assert_eq!(app.nav.current(), 1);

        // Next capture returns a disjoint process set.
        let source = FakeSource {
            records: vec![record(9, 0, "survivor", 1)],
        };
        app.source = Box::new(source);
        app.dispatch(Action::Refresh);

        assert!(app.nav.at_root());
        assert_eq!(app.rows, vec![9]);
    }
}
