//! Pure column-layout math (§4.3 "Column layout"), kept free of any
//! rendering dependency so it is unit-testable without a terminal.

use unicode_segmentation::UnicodeSegmentation;

/// Compute per-column widths that fit within `budget` interior columns,
/// given column headers and the cells of every row.
///
/// 1. Start from `max(header, widest cell)` per column.
/// 2. If the natural sum (plus one separator space per gap) fits, use it.
/// 3. Otherwise cap every column at `budget / n`, then repeatedly shrink the
///    widest column by one until the sum fits; never below 1.
pub fn column_widths(headers: &[String], rows: &[Vec<String>], budget: usize) -> Vec<usize> {
    let n = headers.len();
    if n == 0 {
        return Vec::new();
    }
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < n {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
    }
    let separators = n.saturating_sub(1);
    if widths.iter().sum::<usize>() + separators <= budget {
        return widths;
    }

    let cap = (budget.saturating_sub(separators) / n).max(1);
    for w in widths.iter_mut() {
        *w = (*w).min(cap);
    }
    loop {
        let total = widths.iter().sum::<usize>() + separators;
        if total <= budget {
            break;
        }
        let Some(widest) = widths
            .iter()
            .enumerate()
            .filter(|(_, &w)| w > 1)
            .max_by_key(|(_, &w)| w)
            .map(|(i, _)| i)
        else {
            break;
        };
        widths[widest] -= 1;
    }
    widths
}

/// Display width of a string, counting grapheme clusters rather than bytes
/// so multi-byte UTF-8 text truncates/pads correctly.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Right-truncate or space-pad `cell` to exactly `width` display columns.
pub fn fit_cell(cell: &str, width: usize) -> String {
    let len = display_width(cell);
    if len == width {
        cell.to_string()
    } else if len < width {
        format!("{}{}", cell, " ".repeat(width - len))
    } else {
        cell.graphemes(true).take(width).collect()
    }
}

/// Render a full row of cells against computed widths, space-separated.
pub fn render_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, &w)| fit_cell(cell, w))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_fit_naturally_when_budget_is_generous() {
        let headers = vec!["Name".to_string(), "Status".to_string()];
        let rows = vec![vec!["pod-a".to_string(), "Running".to_string()]];
        let widths = column_widths(&headers, &rows, 80);
        assert_eq!(widths, vec![5, 7]);
    }

    #[test]
    fn widths_shrink_to_fit_tight_budget() {
        let headers = vec!["Name".to_string(), "Status".to_string()];
        let rows = vec![vec!["a-very-long-pod-name".to_string(), "Running".to_string()]];
        let widths = column_widths(&headers, &rows, 10);
        assert_eq!(widths.iter().sum::<usize>() + 1, 10);
        assert!(widths.iter().all(|&w| w >= 1));
    }

    #[test]
    fn fit_cell_pads_and_truncates() {
        assert_eq!(fit_cell("ab", 5), "ab   ");
        assert_eq!(fit_cell("abcdef", 3), "abc");
        assert_eq!(fit_cell("abc", 3), "abc");
    }
}
