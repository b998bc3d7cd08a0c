/// Geometry of one usage bar: how many cells show the process's own memory,
/// how many its descendants', and how many stay blank. Pure data so the
/// widget layer only has to style three runs of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageBar {
    pub self_cells: usize,
    pub children_cells: usize,
    pub width: usize,
    /// Set when the sibling group had no memory at all; the bar is rendered
    /// as full-width filler instead of an empty gauge.
    pub placeholder: bool,
}

impl UsageBar {
    /// Compute the bar for a node against the total memory of its displayed
    /// sibling group. An empty group (`siblings_total == 0`) yields the
    /// placeholder bar rather than dividing by zero.
    pub fn compute(self_memory: u64, total_memory: u64, siblings_total: u64, width: usize) -> Self {
        if siblings_total == 0 {
            return UsageBar {
                self_cells: 0,
                children_cells: 0,
                width,
                placeholder: true,
            };
        }

        let total_share = total_memory as f64 / siblings_total as f64;
        let self_share = self_memory as f64 / siblings_total as f64;

        let total_filled = ((total_share * width as f64) as usize).min(width);
        // The self segment is part of the total segment, never wider.
        let self_filled = ((self_share * width as f64) as usize).min(total_filled);

        UsageBar {
            self_cells: self_filled,
            children_cells: total_filled - self_filled,
            width,
            placeholder: false,
        }
    }

    pub fn padding_cells(&self) -> usize {
        self.width - self.self_cells - self.children_cells
    }

    /// Plain-glyph rendering: `#` own memory, `=` descendants, spaces blank,
    /// `-` across the whole width for the placeholder, framed in brackets.
    /// The styled widget colors the same runs.
    pub fn glyphs(&self) -> String {
        if self.placeholder {
            return format!("[{}]", "-".repeat(self.width));
        }
        format!(
            "[{}{}{}]",
            "#".repeat(self.self_cells),
            "=".repeat(self.children_cells),
            " ".repeat(self.padding_cells())
        )
    }
}
