//! Visibility clamp: caps the rows exposed to the host while tracking the
//! true row count of the full item set.

use crate::packer::Row;

/// Result of clamping packed rows to a maximum line count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Clamp {
    /// Rows exposed to the host: `min(max_lines, total_row_count)`
    pub visible_row_count: usize,
    /// Rows needed for the full item set, independent of the cap
    pub total_row_count: usize,
}

impl Clamp {
    /// Whether rows beyond the cap exist.
    pub fn is_truncated(&self) -> bool {
        self.visible_row_count < self.total_row_count
    }
}

/// Clamp rows to `max_lines` (`None` = unbounded).
pub fn clamp(rows: &[Row], max_lines: Option<usize>) -> Clamp {
    let total_row_count = rows.len();
    let visible_row_count = match max_lines {
        Some(max) => max.min(total_row_count),
        None => total_row_count,
    };
    Clamp {
        visible_row_count,
        total_row_count,
    }
}

/// Height of the first `visible` rows plus the spacing between them.
pub fn visible_height(rows: &[Row], visible: usize, vertical_spacing: f64) -> f64 {
    let visible = visible.min(rows.len());
    if visible == 0 {
        return 0.0;
    }
    let heights: f64 = rows[..visible].iter().map(Row::height).sum();
    let height = heights + vertical_spacing * (visible - 1) as f64;
    height.max(0.0)
}
