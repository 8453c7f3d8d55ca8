//! Console output helpers.
//!
//! Diagnostic payloads go to stdout (they are the product of this tool);
//! progress and errors go through `tracing`. The renderers here are the only
//! places in the binary allowed to print.

use serde::Serialize;

/// Pretty-print a JSON-serializable payload to stdout.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A fixed-column text table.
///
/// Columns are sized to the widest cell; rows shorter than the header are
/// padded with empty cells.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) -> &mut Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        out.push_str(&render_line(&self.headers, &widths));
        out.push('\n');
        out.push_str(&separator(&widths));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&render_line(row, &widths));
        }
        out
    }

    /// Render and write to stdout.
    #[allow(clippy::print_stdout)]
    pub fn print(&self) {
        println!("{}", self.render());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.len());
                }
            }
        }
        widths
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let empty = String::new();
    widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let cell = cells.get(i).unwrap_or(&empty);
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn separator(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_alignment() {
        let mut table = Table::new(["ID", "NAME"]);
        table.row(["1", "Asha Patel"]);
        table.row(["42", "Ben"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID  NAME");
        assert_eq!(lines[1], "--  ----------");
        assert_eq!(lines[2], "1   Asha Patel");
        assert_eq!(lines[3], "42  Ben");
    }

    #[test]
    fn test_render_pads_short_rows() {
        let mut table = Table::new(["A", "B", "C"]);
        table.row(["1"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "1");
    }

    #[test]
    fn test_wide_cells_grow_columns() {
        let mut table = Table::new(["ID"]);
        table.row(["1234567"]);

        let rendered = table.render();
        assert!(rendered.starts_with("ID"));
        assert!(rendered.contains("-------"));
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut table = Table::new(["X"]);
        assert!(table.is_empty());
        table.row(["1"]);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_print_json_value() {
        let value = serde_json::json!({"status": "ok"});
        assert!(print_json(&value).is_ok());
    }
}
