//! Placement of packed rows: explicit positions for every item.

use flowrow_core::{
    Bounds, ContainerWidth, DVec2, FlowConfig, HorizontalAlignment, ItemId, VerticalAlignment,
};

use crate::packer::Row;

/// Position of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub id: ItemId,
    /// Rectangle relative to the container's top-left corner
    pub bounds: Bounds,
    /// Index of the row the item belongs to
    pub row: usize,
    /// Whether the row falls within the visible row cap
    pub visible: bool,
}

impl Placement {
    /// Centre point, for hosts that position children by centre.
    pub fn center(&self) -> DVec2 {
        self.bounds.center()
    }
}

/// Output of the placement engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placed {
    /// One placement per item, in input order
    pub placements: Vec<Placement>,
    /// Top edge of each row
    pub row_tops: Vec<f64>,
    /// Width rows were aligned against
    pub reference_width: f64,
    /// Height of all rows, including those beyond any cap
    pub total_height: f64,
}

/// Place every item of every row.
///
/// All items are marked visible; the visibility clamp narrows that later.
pub fn place(rows: &[Row], container: ContainerWidth, config: &FlowConfig) -> Placed {
    let reference_width = reference_width(rows, container);
    let item_count = rows.iter().map(Row::len).sum();

    let mut placements = Vec::with_capacity(item_count);
    let mut row_tops = Vec::with_capacity(rows.len());
    let mut y = 0.0;

    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            y += config.vertical_spacing;
        }
        row_tops.push(y);

        let mut x = row_start(row, reference_width, config.horizontal_alignment);
        for item in row.items() {
            let y_offset = item_offset(row.height(), item.size.height, config.vertical_alignment);
            placements.push(Placement {
                id: item.id,
                bounds: Bounds::new(x, y + y_offset, item.size.width, item.size.height),
                row: index,
                visible: true,
            });
            x += item.size.width + config.horizontal_spacing;
        }

        y += row.height();
    }

    Placed {
        placements,
        row_tops,
        reference_width,
        total_height: y,
    }
}

/// Width rows are aligned against. An unbounded container aligns against
/// its widest row.
fn reference_width(rows: &[Row], container: ContainerWidth) -> f64 {
    match container {
        ContainerWidth::Bounded(_) => container.budget(),
        ContainerWidth::Unbounded => rows.iter().map(Row::width).fold(0.0, f64::max),
    }
}

fn row_start(row: &Row, reference_width: f64, alignment: HorizontalAlignment) -> f64 {
    let free = (reference_width - row.width()).max(0.0);
    match alignment {
        HorizontalAlignment::Leading => 0.0,
        HorizontalAlignment::Center => free / 2.0,
        HorizontalAlignment::Trailing => free,
    }
}

fn item_offset(row_height: f64, item_height: f64, alignment: VerticalAlignment) -> f64 {
    match alignment {
        VerticalAlignment::Top => 0.0,
        VerticalAlignment::Center => (row_height - item_height) / 2.0,
        VerticalAlignment::Bottom => row_height - item_height,
    }
}
