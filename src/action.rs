#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveCursor(Direction),
    /// Drill into the selected row's process.
    Descend,
    /// Go back to the parent view.
    Ascend,
    /// Re-capture the snapshot and rebuild the tree.
    Refresh,
    ToggleHelp,
    None,
}
