//! Ordering and fixed-width rendering of report rows.

use super::schema::ReportRow;
use crate::aggregator::MethodTable;
use crate::utils::config::{
    AVG_COLUMN_WIDTH, COUNT_COLUMN_WIDTH, ELLIPSIS, MIN_METHOD_WIDTH, TOTAL_COLUMN_WIDTH,
};
use clap::ValueEnum;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Write as _;

/// Row ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Average duration, slowest first
    #[default]
    Avg,
    /// Call count, most frequent first
    Count,
    /// Total duration, largest first
    Total,
    /// Method name, case-insensitive
    Method,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Avg => "avg",
            SortKey::Count => "count",
            SortKey::Total => "total",
            SortKey::Method => "method",
        };
        f.write_str(name)
    }
}

/// Turn the aggregated table into rows in the default (avg) order
pub fn build_rows(table: &MethodTable) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = table.iter().map(ReportRow::from).collect();
    sort_rows(&mut rows, SortKey::Avg);
    rows
}

/// Reorder rows in place. Values are never recomputed.
///
/// Every key ends with the exact method name, so the result does not
/// depend on the incoming order.
pub fn sort_rows(rows: &mut [ReportRow], key: SortKey) {
    rows.sort_by(|a, b| compare_rows(a, b, key));
}

fn compare_rows(a: &ReportRow, b: &ReportRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Avg => b
            .avg_ms
            .total_cmp(&a.avg_ms)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.method.cmp(&b.method)),
        SortKey::Count => b
            .count
            .cmp(&a.count)
            .then_with(|| b.avg_ms.total_cmp(&a.avg_ms))
            .then_with(|| a.method.cmp(&b.method)),
        SortKey::Total => b
            .total_ms
            .cmp(&a.total_ms)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.method.cmp(&b.method)),
        SortKey::Method => a
            .method
            .to_lowercase()
            .cmp(&b.method.to_lowercase())
            .then_with(|| a.method.cmp(&b.method)),
    }
}

/// Keep only the first `top` rows; 0 keeps everything
pub fn take_top(rows: &mut Vec<ReportRow>, top: usize) {
    if top > 0 {
        rows.truncate(top);
    }
}

/// Shorten `text` to `max_len` characters with a centered ellipsis
///
/// The left side gets the extra character when the kept length is odd.
/// Widths too small for the ellipsis fall back to a hard cut.
pub fn ellipsize_middle(text: &str, max_len: usize) -> String {
    let len = text.chars().count();
    if max_len == 0 {
        return String::new();
    }
    if len <= max_len {
        return text.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if max_len <= ellipsis_len {
        return text.chars().take(max_len).collect();
    }

    let keep = max_len - ellipsis_len;
    let left = keep.div_ceil(2);
    let right = keep - left;

    let mut out: String = text.chars().take(left).collect();
    out.push_str(ELLIPSIS);
    out.extend(text.chars().skip(len - right));
    out
}

/// Render rows as a fixed-width text table
///
/// `method_width` is raised to the minimum column width if smaller.
pub fn render_table(rows: &[ReportRow], method_width: usize) -> String {
    let w = method_width.max(MIN_METHOD_WIDTH);
    let header = format!(
        "{:<w$} {:>cw$} {:>tw$} {:>aw$}",
        "Method",
        "Count",
        "Total(ms)",
        "Avg(ms)",
        w = w,
        cw = COUNT_COLUMN_WIDTH,
        tw = TOTAL_COLUMN_WIDTH,
        aw = AVG_COLUMN_WIDTH,
    );

    let mut out = String::new();
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "-".repeat(header.chars().count()));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<w$} {:>cw$} {:>tw$} {:>aw$.3}",
            ellipsize_middle(&row.method, w),
            row.count,
            row.total_ms,
            row.avg_ms,
            w = w,
            cw = COUNT_COLUMN_WIDTH,
            tw = TOTAL_COLUMN_WIDTH,
            aw = AVG_COLUMN_WIDTH,
        );
    }

    out
}
