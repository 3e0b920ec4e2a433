//! Engine for hosts that can query intrinsic sizes synchronously.
//!
//! Every trigger runs one full pass and applies placements in place. The
//! row count and the start of any height transition wait for the next tick.

use std::time::Duration;

use flowrow_core::{
    ContainerWidth, FlowConfig, FlowError, ItemId, LayoutContext, LayoutError, Size,
};

use crate::binding::Binding;
use crate::compute::{compute_layout, LayoutResult};
use crate::engine::{check_unique, LayoutEngine, MeasureMode, Presenter, Trigger};
use crate::placement::Placement;
use crate::resolver::SizeResolver;

/// Layout engine backed by a synchronous [`SizeResolver`].
#[derive(Debug)]
pub struct ImmediateEngine<R> {
    resolver: R,
    items: Vec<ItemId>,
    container: ContainerWidth,
    config: FlowConfig,
    presenter: Presenter,
}

impl<R: SizeResolver> ImmediateEngine<R> {
    pub fn new(
        resolver: R,
        config: FlowConfig,
        context: LayoutContext,
        line_count: Binding<usize>,
    ) -> Result<Self, FlowError> {
        config.validate()?;
        Ok(Self {
            resolver,
            items: Vec::new(),
            container: ContainerWidth::default(),
            config,
            presenter: Presenter::new(line_count, context),
        })
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Mutable access to the resolver. Call [`LayoutEngine::invalidate_item`]
    /// afterwards for any item whose size changed.
    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    fn relayout(&mut self, trigger: Trigger) -> Result<(), FlowError> {
        let result = compute_layout(&self.items, &self.resolver, self.container, &self.config)?;
        tracing::debug!(
            ?trigger,
            total_rows = result.total_row_count(),
            visible_rows = result.visible_row_count(),
            "immediate relayout"
        );
        self.presenter.post_line_count(result.total_row_count());
        self.presenter.apply(result);
        Ok(())
    }

    fn ensure_known(&self, id: ItemId) -> Result<(), FlowError> {
        if self.items.contains(&id) {
            Ok(())
        } else {
            Err(LayoutError::UnknownItem(id).into())
        }
    }
}

impl<R: SizeResolver> LayoutEngine for ImmediateEngine<R> {
    fn mode(&self) -> MeasureMode {
        MeasureMode::Intrinsic
    }

    fn set_items(&mut self, items: &[ItemId]) -> Result<(), FlowError> {
        check_unique(items)?;
        self.items = items.to_vec();
        self.relayout(Trigger::ContentChanged)
    }

    fn set_container_width(&mut self, width: ContainerWidth) -> Result<(), FlowError> {
        self.container = width;
        self.relayout(Trigger::ContainerResized)
    }

    fn set_config(&mut self, config: FlowConfig) -> Result<(), FlowError> {
        config.validate()?;
        self.config = config;
        self.relayout(Trigger::ConfigChanged)
    }

    fn set_max_lines(&mut self, max_lines: Option<usize>) -> Result<(), FlowError> {
        let config = FlowConfig {
            max_lines,
            ..self.config
        };
        config.validate()?;
        self.config = config;

        let mut result = self.presenter.applied().clone();
        result.reclamp(max_lines, self.config.vertical_spacing);
        tracing::debug!(trigger = ?Trigger::LinesChanged, ?max_lines, "immediate reclamp");
        self.presenter.post_line_count(result.total_row_count());
        self.presenter.apply(result);
        Ok(())
    }

    fn set_context(&mut self, context: LayoutContext) {
        self.presenter.set_context(context);
    }

    fn attach(&mut self, id: ItemId) -> Result<(), FlowError> {
        // Sizes are queried on demand; nothing to wait for.
        self.ensure_known(id)
    }

    fn report_size(&mut self, id: ItemId, size: Size) -> Result<(), FlowError> {
        tracing::trace!(%id, width = size.width, "reported size ignored, querying resolver");
        self.invalidate_item(id)
    }

    fn invalidate_item(&mut self, id: ItemId) -> Result<(), FlowError> {
        self.ensure_known(id)?;
        self.relayout(Trigger::SizeReported(id))
    }

    fn pending_measurements(&self) -> Vec<ItemId> {
        Vec::new()
    }

    fn tick(&mut self, now: Duration) -> bool {
        self.presenter.tick(now)
    }

    fn placements(&self) -> &[Placement] {
        self.presenter.applied().placements()
    }

    fn displayed_height(&self, now: Duration) -> f64 {
        self.presenter.displayed_height(now)
    }

    fn target_height(&self) -> f64 {
        self.presenter.target_height()
    }

    fn line_count(&self) -> usize {
        self.presenter.line_count()
    }

    fn latest(&self) -> &LayoutResult {
        self.presenter.applied()
    }
}
