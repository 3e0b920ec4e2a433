//! Engine for hosts that can only learn an item's size by rendering it.
//!
//! The host renders each item invisibly and reports its size. Every report
//! reruns the full pipeline over all items with the latest known sizes;
//! items not measured yet are zero-size placeholders until their report
//! arrives. All output is deferred to the next tick, and a newer pass
//! replaces one that has not been applied yet.

use std::time::Duration;

use flowrow_core::{
    ContainerWidth, FlowConfig, FlowError, ItemId, LayoutContext, LayoutError, Size,
};

use crate::binding::Binding;
use crate::compute::{compute_layout, LayoutResult};
use crate::engine::{check_unique, LayoutEngine, MeasureMode, Presenter, Trigger};
use crate::placement::Placement;
use crate::resolver::{MeasureState, SizeCache};

/// Layout engine backed by a per-item [`SizeCache`].
#[derive(Debug)]
pub struct MeasuredEngine {
    cache: SizeCache,
    items: Vec<ItemId>,
    container: ContainerWidth,
    config: FlowConfig,
    latest: LayoutResult,
    presenter: Presenter,
}

impl MeasuredEngine {
    pub fn new(
        config: FlowConfig,
        context: LayoutContext,
        line_count: Binding<usize>,
    ) -> Result<Self, FlowError> {
        config.validate()?;
        Ok(Self {
            cache: SizeCache::new(),
            items: Vec::new(),
            container: ContainerWidth::default(),
            config,
            latest: LayoutResult::default(),
            presenter: Presenter::new(line_count, context),
        })
    }

    pub fn measure_state(&self, id: ItemId) -> Option<MeasureState> {
        self.cache.state(id)
    }

    /// Whether every item has reported its size.
    pub fn is_settled(&self) -> bool {
        self.cache.is_settled()
    }

    fn recompute(&mut self, trigger: Trigger) -> Result<(), FlowError> {
        let result = compute_layout(&self.items, &self.cache, self.container, &self.config)?;
        tracing::debug!(
            ?trigger,
            total_rows = result.total_row_count(),
            visible_rows = result.visible_row_count(),
            settled = self.cache.is_settled(),
            "measured relayout"
        );
        self.publish(result);
        Ok(())
    }

    fn publish(&mut self, result: LayoutResult) {
        self.presenter.post_line_count(result.total_row_count());
        self.presenter.post(result.clone());
        self.latest = result;
    }
}

impl LayoutEngine for MeasuredEngine {
    fn mode(&self) -> MeasureMode {
        MeasureMode::Measured
    }

    fn set_items(&mut self, items: &[ItemId]) -> Result<(), FlowError> {
        check_unique(items)?;
        let removed = self.cache.retain_items(items);
        if removed > 0 {
            tracing::trace!(removed, "dropped sizes of removed items");
        }
        self.items = items.to_vec();
        self.recompute(Trigger::ContentChanged)
    }

    fn set_container_width(&mut self, width: ContainerWidth) -> Result<(), FlowError> {
        if width == self.container {
            return Ok(());
        }
        self.container = width;
        self.recompute(Trigger::ContainerResized)
    }

    fn set_config(&mut self, config: FlowConfig) -> Result<(), FlowError> {
        config.validate()?;
        self.config = config;
        self.recompute(Trigger::ConfigChanged)
    }

    fn set_max_lines(&mut self, max_lines: Option<usize>) -> Result<(), FlowError> {
        let config = FlowConfig {
            max_lines,
            ..self.config
        };
        config.validate()?;
        self.config = config;

        let mut result = self.latest.clone();
        result.reclamp(max_lines, self.config.vertical_spacing);
        tracing::debug!(trigger = ?Trigger::LinesChanged, ?max_lines, "measured reclamp");
        self.publish(result);
        Ok(())
    }

    fn set_context(&mut self, context: LayoutContext) {
        self.presenter.set_context(context);
    }

    fn attach(&mut self, id: ItemId) -> Result<(), FlowError> {
        match self.cache.state(id) {
            Some(_) => {
                self.cache.begin_measure(id);
                Ok(())
            }
            None => Err(LayoutError::UnknownItem(id).into()),
        }
    }

    fn report_size(&mut self, id: ItemId, size: Size) -> Result<(), FlowError> {
        match self.cache.record(id, size) {
            Some(true) => {
                tracing::trace!(%id, width = size.width, height = size.height, "size reported");
                self.recompute(Trigger::SizeReported(id))
            }
            Some(false) => Ok(()),
            None => Err(LayoutError::UnknownItem(id).into()),
        }
    }

    fn invalidate_item(&mut self, id: ItemId) -> Result<(), FlowError> {
        if self.cache.invalidate(id) {
            Ok(())
        } else {
            Err(LayoutError::UnknownItem(id).into())
        }
    }

    fn pending_measurements(&self) -> Vec<ItemId> {
        self.cache.pending().collect()
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
        &self.latest
    }
}
