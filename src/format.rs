use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MIB: f64 = 1024.0 * 1024.0;

/// Memory label for table rows: MiB with one decimal below 1024 MiB,
/// gigabytes with two decimals from there up.
pub fn format_memory(bytes: u64) -> String {
    let mib = bytes as f64 / MIB;
    if mib >= 1024.0 {
        format!("{:.2} GB", mib / 1024.0)
    } else {
        format!("{mib:.1} MiB")
    }
}

/// Display name for a process row: the short name followed by whatever the
/// command line adds beyond it, or the command verbatim when it does not
/// start with the name.
pub fn display_name(name: &str, command: &str) -> String {
    if command.is_empty() {
        name.to_string()
    } else if let Some(rest) = command.strip_prefix(name) {
        format!("{name}{rest}")
    } else {
        command.to_string()
    }
}

/// Truncate to a display width, ending with an ellipsis when anything was
/// cut. Never panics on over-length or wide input.
pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}
