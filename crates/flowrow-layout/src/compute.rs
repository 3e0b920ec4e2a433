//! The full layout pipeline: resolve sizes, pack rows, place items, clamp.

use flowrow_core::{Bounds, ConfigError, ContainerWidth, FlowConfig, ItemId, Size};

use crate::clamp::{clamp, visible_height, Clamp};
use crate::packer::{pack, Row};
use crate::placement::{place, Placement};
use crate::resolver::SizeResolver;

/// Complete result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    rows: Vec<Row>,
    placements: Vec<Placement>,
    row_tops: Vec<f64>,
    clamp: Clamp,
    width: f64,
    height: f64,
    full_height: f64,
}

impl LayoutResult {
    /// Rows for the full item set, including rows beyond the cap.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Placements for every item, in input order. Items in rows beyond the
    /// cap are placed too, with `visible == false`.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, id: ItemId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Top edge of each row.
    pub fn row_tops(&self) -> &[f64] {
        &self.row_tops
    }

    /// Rows needed for the full item set.
    pub fn total_row_count(&self) -> usize {
        self.clamp.total_row_count
    }

    pub fn visible_row_count(&self) -> usize {
        self.clamp.visible_row_count
    }

    pub fn is_truncated(&self) -> bool {
        self.clamp.is_truncated()
    }

    /// Width the rows were aligned against.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Bounding height of the visible rows only.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Height of all rows, ignoring the cap.
    pub fn full_height(&self) -> f64 {
        self.full_height
    }

    /// Size the flow occupies.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Apply a different row cap without repacking. Item-to-row assignment
    /// and positions are unaffected; only visibility and height change.
    pub fn reclamp(&mut self, max_lines: Option<usize>, vertical_spacing: f64) {
        self.clamp = clamp(&self.rows, max_lines);
        self.height = visible_height(&self.rows, self.clamp.visible_row_count, vertical_spacing);
        let visible_rows = self.clamp.visible_row_count;
        for placement in &mut self.placements {
            placement.visible = placement.row < visible_rows;
        }
    }

    /// Bounds of the visible region, for hosts that clip.
    pub fn clip_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }
}

/// Run the full pipeline over `items`.
///
/// Items the resolver cannot size yet are laid out as zero-size
/// placeholders.
#[tracing::instrument(level = "trace", skip_all, fields(items = items.len(), ?container))]
pub fn compute_layout<R>(
    items: &[ItemId],
    resolver: &R,
    container: ContainerWidth,
    config: &FlowConfig,
) -> Result<LayoutResult, ConfigError>
where
    R: SizeResolver + ?Sized,
{
    config.validate()?;

    let sized = items
        .iter()
        .map(|&id| (id, resolver.intrinsic_size(id).unwrap_or(Size::ZERO)));
    let rows = pack(sized, container, config.horizontal_spacing);
    let placed = place(&rows, container, config);

    let mut result = LayoutResult {
        rows,
        placements: placed.placements,
        row_tops: placed.row_tops,
        clamp: Clamp::default(),
        width: placed.reference_width,
        height: 0.0,
        full_height: placed.total_height,
    };
    result.reclamp(config.max_lines, config.vertical_spacing);

    tracing::trace!(
        total_rows = result.total_row_count(),
        visible_rows = result.visible_row_count(),
        height = result.height,
        "layout computed"
    );

    Ok(result)
}

/// Size the flow would occupy for a width proposal, without keeping the
/// placements.
pub fn size_that_fits<R>(
    items: &[ItemId],
    resolver: &R,
    proposal: ContainerWidth,
    config: &FlowConfig,
) -> Result<Size, ConfigError>
where
    R: SizeResolver + ?Sized,
{
    compute_layout(items, resolver, proposal, config).map(|result| result.size())
}
