//! Host-facing entry point: picks the engine matching the host platform's
//! sizing capability once, at construction.

use flowrow_core::{
    Animation, FlowConfig, FlowError, HorizontalAlignment, ItemId, LayoutContext, Size,
    VerticalAlignment,
};

use crate::binding::Binding;
use crate::engine::LayoutEngine;
use crate::immediate::ImmediateEngine;
use crate::measured::MeasuredEngine;
use crate::resolver::SizeResolver;

/// Resolver placeholder for hosts without synchronous intrinsic sizing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIntrinsicSize;

impl SizeResolver for NoIntrinsicSize {
    fn intrinsic_size(&self, _id: ItemId) -> Option<Size> {
        None
    }
}

/// What the host platform can do to size an item.
#[derive(Debug)]
pub enum HostCapability<R = NoIntrinsicSize> {
    /// Intrinsic sizes can be queried synchronously.
    IntrinsicSizing(R),
    /// Items must be rendered once before their size is known.
    MeasureByRendering,
}

impl<R: SizeResolver> HostCapability<R> {
    pub fn intrinsic(resolver: R) -> Self {
        HostCapability::IntrinsicSizing(resolver)
    }
}

impl HostCapability<NoIntrinsicSize> {
    pub fn measure_by_rendering() -> Self {
        HostCapability::MeasureByRendering
    }
}

/// Builder for a flow layout.
///
/// ```ignore
/// use flowrow_layout::{FlowRow, HostCapability, Binding};
///
/// let line_count = Binding::new(0);
/// let mut engine = FlowRow::new()
///     .max_lines(2)
///     .line_count(line_count.clone())
///     .build(HostCapability::measure_by_rendering())?;
///
/// engine.set_items(&ids)?;
/// engine.set_container_width(width.into())?;
/// ```
#[derive(Debug, Clone)]
pub struct FlowRow {
    config: FlowConfig,
    context: LayoutContext,
    line_count: Binding<usize>,
}

impl Default for FlowRow {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowRow {
    /// Default configuration. The row count is discarded unless a binding
    /// is supplied with [`line_count`](Self::line_count).
    pub fn new() -> Self {
        Self {
            config: FlowConfig::default(),
            context: LayoutContext::default(),
            line_count: Binding::constant(1),
        }
    }

    pub fn config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    pub fn spacing(mut self, horizontal: f64, vertical: f64) -> Self {
        self.config = self.config.with_spacing(horizontal, vertical);
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.config.horizontal_alignment = alignment;
        self
    }

    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.config.vertical_alignment = alignment;
        self
    }

    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.config.max_lines = Some(max_lines);
        self
    }

    pub fn animation(mut self, animation: Option<Animation>) -> Self {
        self.context.animation = animation;
        self
    }

    /// Channel receiving the total row count whenever it changes.
    pub fn line_count(mut self, binding: Binding<usize>) -> Self {
        self.line_count = binding;
        self
    }

    /// Build the engine for the host's capability.
    pub fn build<R>(self, capability: HostCapability<R>) -> Result<Box<dyn LayoutEngine>, FlowError>
    where
        R: SizeResolver + 'static,
    {
        match capability {
            HostCapability::IntrinsicSizing(resolver) => Ok(Box::new(ImmediateEngine::new(
                resolver,
                self.config,
                self.context,
                self.line_count,
            )?)),
            HostCapability::MeasureByRendering => Ok(Box::new(MeasuredEngine::new(
                self.config,
                self.context,
                self.line_count,
            )?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MeasureMode;
    use flowrow_core::{ConfigError, ContainerWidth};
    use std::time::Duration;

    #[test]
    fn test_selects_engine_by_capability() {
        let resolver = |_: ItemId| Some(Size::new(10.0, 10.0));
        let engine = FlowRow::new().build(HostCapability::intrinsic(resolver)).unwrap();
        assert_eq!(engine.mode(), MeasureMode::Intrinsic);

        let engine = FlowRow::new()
            .build(HostCapability::measure_by_rendering())
            .unwrap();
        assert_eq!(engine.mode(), MeasureMode::Measured);
    }

    #[test]
    fn test_rejects_zero_lines() {
        let err = FlowRow::new()
            .max_lines(0)
            .build(HostCapability::measure_by_rendering())
            .err().unwrap();
        assert!(matches!(
            err,
            FlowError::Config(ConfigError::InvalidConfiguration { field: "max_lines", .. })
        ));
    }

    #[test]
    fn test_both_engines_agree_once_measured() {
        let widths = [40.0, 70.0, 25.0, 90.0, 10.0];
        let ids: Vec<ItemId> = (0..widths.len() as u64).map(ItemId).collect();
        let size_of = move |id: ItemId| Some(Size::new(widths[id.0 as usize], 20.0));

        let mut immediate = FlowRow::new()
            .max_lines(2)
            .horizontal_alignment(HorizontalAlignment::Center)
            .build(HostCapability::intrinsic(size_of))
            .unwrap();
        immediate
            .set_container_width(ContainerWidth::Bounded(120.0))
            .unwrap();
        immediate.set_items(&ids).unwrap();

        let mut measured = FlowRow::new()
            .max_lines(2)
            .horizontal_alignment(HorizontalAlignment::Center)
            .build(HostCapability::measure_by_rendering())
            .unwrap();
        measured
            .set_container_width(ContainerWidth::Bounded(120.0))
            .unwrap();
        measured.set_items(&ids).unwrap();
        for &id in ids.iter().rev() {
            measured.attach(id).unwrap();
            measured.report_size(id, size_of(id).unwrap()).unwrap();
        }

        immediate.tick(Duration::ZERO);
        measured.tick(Duration::ZERO);

        assert_eq!(immediate.placements(), measured.placements());
        assert!((immediate.target_height() - measured.target_height()).abs() < 0.001);
    }
}
