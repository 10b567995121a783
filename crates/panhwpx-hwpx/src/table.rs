//! Table grid normalization
//!
//! HWPX tables must be rectangular. Header and body rows are merged into
//! one grid of cell texts and short rows are padded with empty cells.
//! Nested structure inside cells (lists, nested tables) is not flattened;
//! only the text of a cell's paragraphs is kept.

use panhwpx_ast::{TableBody, TableRow};

use crate::text::extract_plain_blocks;

/// A rectangular grid of cell texts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableGrid {
    /// Rows in display order; header rows first
    pub rows: Vec<Vec<String>>,
    /// Number of columns; every row has exactly this many cells
    pub col_count: usize,
}

impl TableGrid {
    /// A grid with no rows or no columns renders nothing
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.col_count == 0
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Equal share of the page width for each column
    pub fn column_width(&self, page_width: u32) -> u32 {
        let cols = u32::try_from(self.col_count.max(1)).unwrap_or(u32::MAX);
        page_width / cols
    }
}

/// Merge header rows and body rows into a rectangular grid
pub fn normalize_grid(head: &[TableRow], bodies: &[TableBody]) -> TableGrid {
    let mut rows: Vec<Vec<String>> = head
        .iter()
        .chain(bodies.iter().flat_map(|body| body.rows.iter()))
        .map(|row| row.cells.iter().map(|cell| extract_plain_blocks(cell)).collect::<Vec<_>>())
        .filter(|cells| !cells.is_empty())
        .collect();

    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(col_count, String::new());
    }

    TableGrid { rows, col_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panhwpx_ast::{Block, Inline};

    fn row(cells: &[&str]) -> TableRow {
        TableRow {
            cells: cells
                .iter()
                .map(|text| vec![Block::Plain(vec![Inline::text(*text)])])
                .collect(),
        }
    }

    fn body(rows: Vec<TableRow>) -> TableBody {
        TableBody {
            head: Vec::new(),
            rows,
        }
    }

    #[test]
    fn test_short_rows_are_padded() {
        let grid = normalize_grid(&[row(&["A", "B"])], &[body(vec![row(&["1"])])]);
        assert_eq!(
            grid.rows,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["1".to_string(), String::new()],
            ]
        );
        assert_eq!(grid.col_count, 2);
    }

    #[test]
    fn test_col_count_is_max_row_length() {
        let grid = normalize_grid(
            &[],
            &[
                body(vec![row(&["a"]), row(&["a", "b", "c"])]),
                body(vec![row(&["x", "y"])]),
            ],
        );
        assert_eq!(grid.col_count, 3);
        assert!(grid.rows.iter().all(|r| r.len() == 3));
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_empty_table() {
        let grid = normalize_grid(&[], &[]);
        assert!(grid.is_empty());
        assert_eq!(grid.col_count, 0);

        // Rows without cells are dropped
        let grid = normalize_grid(&[row(&[])], &[]);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_cell_ignores_non_text_blocks() {
        let cell_row = TableRow {
            cells: vec![vec![
                Block::Paragraph(vec![Inline::text("kept")]),
                Block::BulletList(vec![vec![Block::Plain(vec![Inline::text("dropped")])]]),
            ]],
        };
        let grid = normalize_grid(&[cell_row], &[]);
        assert_eq!(grid.rows, vec![vec!["kept".to_string()]]);
    }

    #[test]
    fn test_column_width() {
        let grid = normalize_grid(&[row(&["a", "b", "c", "d"])], &[]);
        assert_eq!(grid.column_width(42520), 10630);
        assert_eq!(TableGrid::default().column_width(42520), 42520);
    }
}
