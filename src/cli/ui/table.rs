//! Column-aligned text tables that tolerate ANSI-colored cells.

use crate::cli::output::current_preferences;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            alignment: Alignment::Right,
            ..Self::left(header)
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(&column.header), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut lines = vec![self.render_row(&headers, &widths)];
        let rule_char = if current_preferences().plain_mode { '-' } else { '─' };
        let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push(rule_char.to_string().repeat(rule_len));
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

/// Width available for a flexible column given the terminal size.
pub fn flexible_width(fixed: usize, minimum: usize) -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols).saturating_sub(fixed))
        .unwrap_or(40)
        .max(minimum)
}

fn escape_len(bytes: &[u8], start: usize) -> usize {
    let mut idx = start + 1;
    if idx < bytes.len() && bytes[idx] == b'[' {
        idx += 1;
        while idx < bytes.len() {
            let byte = bytes[idx];
            idx += 1;
            if (0x40..=0x7E).contains(&byte) {
                break;
            }
        }
    }
    idx - start
}

pub fn visible_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    let mut width = 0;
    while idx < bytes.len() {
        if bytes[idx] == 0x1b {
            idx += escape_len(bytes, idx);
            continue;
        }
        match text[idx..].chars().next() {
            Some(ch) => {
                width += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    width
}

fn truncate(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut idx = 0;
    let mut visible = 0;
    let mut saw_escape = false;
    while idx < bytes.len() && visible < width - 1 {
        if bytes[idx] == 0x1b {
            let len = escape_len(bytes, idx);
            out.push_str(&text[idx..idx + len]);
            idx += len;
            saw_escape = true;
            continue;
        }
        match text[idx..].chars().next() {
            Some(ch) => {
                out.push(ch);
                visible += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    out.push('…');
    if saw_escape {
        out.push_str("\u{1b}[0m");
    }
    out
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate(text, width);
    let pad = " ".repeat(width.saturating_sub(visible_width(&fitted)));
    match alignment {
        Alignment::Left => format!("{fitted}{pad}"),
        Alignment::Right => format!("{pad}{fitted}"),
    }
}
