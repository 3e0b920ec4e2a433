//! The layout engine interface shared by both measurement strategies, and
//! the presented state both of them publish through.

use std::collections::HashSet;
use std::time::Duration;

use flowrow_core::{
    ContainerWidth, FlowConfig, FlowError, ItemId, LayoutContext, LayoutError, Size,
};

use crate::binding::{Binding, Outbox};
use crate::compute::LayoutResult;
use crate::placement::Placement;
use crate::transition::HeightTransition;

/// How an engine learns item sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// Sizes are queried synchronously during every pass.
    Intrinsic,
    /// Sizes arrive asynchronously after the host renders each item once.
    Measured,
}

/// What caused a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    ContentChanged,
    ContainerResized,
    ConfigChanged,
    LinesChanged,
    SizeReported(ItemId),
}

/// A flow layout driven by a host.
///
/// The host feeds geometry, content, and configuration changes in, and
/// calls [`tick`](LayoutEngine::tick) on each turn of its event loop to
/// receive deferred output.
pub trait LayoutEngine {
    fn mode(&self) -> MeasureMode;

    /// Replace the ordered item set.
    fn set_items(&mut self, items: &[ItemId]) -> Result<(), FlowError>;

    fn set_container_width(&mut self, width: ContainerWidth) -> Result<(), FlowError>;

    fn set_config(&mut self, config: FlowConfig) -> Result<(), FlowError>;

    /// Change the visible row cap. Reuses the current packing.
    fn set_max_lines(&mut self, max_lines: Option<usize>) -> Result<(), FlowError>;

    fn set_context(&mut self, context: LayoutContext);

    /// The host rendered `id` and can measure it.
    fn attach(&mut self, id: ItemId) -> Result<(), FlowError>;

    /// A measured size for `id` is available.
    ///
    /// In [`MeasureMode::Intrinsic`] the resolver is the only source of
    /// sizes: `size` is ignored and the report acts as
    /// [`invalidate_item`](LayoutEngine::invalidate_item).
    fn report_size(&mut self, id: ItemId, size: Size) -> Result<(), FlowError>;

    /// The content of `id` changed; its size must be resolved again.
    fn invalidate_item(&mut self, id: ItemId) -> Result<(), FlowError>;

    /// Items the host still has to measure.
    fn pending_measurements(&self) -> Vec<ItemId>;

    /// Next turn of the host's event loop: deliver deferred output.
    ///
    /// Returns whether anything was delivered.
    fn tick(&mut self, now: Duration) -> bool;

    /// Placements currently applied.
    fn placements(&self) -> &[Placement];

    fn placement(&self, id: ItemId) -> Option<&Placement> {
        self.placements().iter().find(|p| p.id == id)
    }

    /// Container height at `now`, following any running transition.
    fn displayed_height(&self, now: Duration) -> f64;

    /// Height the container settles at.
    fn target_height(&self) -> f64;

    /// Last row count delivered to the host.
    fn line_count(&self) -> usize;

    /// Most recent layout pass, whether or not it has been applied.
    fn latest(&self) -> &LayoutResult;
}

/// Reject item lists that repeat an identity.
pub(crate) fn check_unique(items: &[ItemId]) -> Result<(), LayoutError> {
    let mut seen = HashSet::with_capacity(items.len());
    for &id in items {
        if !seen.insert(id) {
            return Err(LayoutError::DuplicateItem(id));
        }
    }
    Ok(())
}

/// Host-observable output: applied placements, container height, and the
/// row count write-back.
#[derive(Debug)]
pub(crate) struct Presenter {
    outbox: Outbox,
    applied: LayoutResult,
    height: HeightTransition,
    /// Height of an applied result whose transition starts on the next tick
    pending_height: Option<f64>,
    line_count: Binding<usize>,
    context: LayoutContext,
}

impl Presenter {
    pub(crate) fn new(line_count: Binding<usize>, context: LayoutContext) -> Self {
        Self {
            outbox: Outbox::new(),
            applied: LayoutResult::default(),
            height: HeightTransition::settled(0.0),
            pending_height: None,
            line_count,
            context,
        }
    }

    pub(crate) fn set_context(&mut self, context: LayoutContext) {
        self.context = context;
    }

    /// Apply a result in place. The height transition towards it starts on
    /// the next tick.
    pub(crate) fn apply(&mut self, result: LayoutResult) {
        self.pending_height = Some(result.height());
        self.applied = result;
    }

    /// Queue a result for the next tick.
    pub(crate) fn post(&mut self, result: LayoutResult) {
        let generation = self.outbox.post(result);
        tracing::trace!(generation, "layout queued");
    }

    pub(crate) fn post_line_count(&mut self, line_count: usize) {
        self.outbox.post_line_count(line_count);
    }

    pub(crate) fn tick(&mut self, now: Duration) -> bool {
        let delivery = self.outbox.drain();
        let mut delivered = delivery.commit.is_some() || delivery.line_count.is_some();

        if let Some(commit) = delivery.commit {
            tracing::trace!(generation = commit.generation, "applying layout");
            self.apply(commit.result);
        }
        if let Some(height) = self.pending_height.take() {
            self.height.retarget(height, now, self.context.animation);
            delivered = true;
        }
        if let Some(line_count) = delivery.line_count {
            if self.line_count.set(line_count) {
                tracing::trace!(line_count, "line count delivered");
            }
        }

        delivered
    }

    pub(crate) fn applied(&self) -> &LayoutResult {
        &self.applied
    }

    pub(crate) fn displayed_height(&self, now: Duration) -> f64 {
        self.height.value(now)
    }

    pub(crate) fn target_height(&self) -> f64 {
        self.pending_height.unwrap_or_else(|| self.height.target())
    }

    pub(crate) fn line_count(&self) -> usize {
        self.line_count.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::compute_layout;
    use std::collections::HashMap;

    #[test]
    fn test_duplicate_items_rejected() {
        let err = check_unique(&[ItemId(1), ItemId(2), ItemId(1)]).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateItem(ItemId(1)));
        assert!(check_unique(&[ItemId(1), ItemId(2)]).is_ok());
    }

    #[test]
    fn test_presenter_defers_until_tick() {
        let line_count = Binding::new(0usize);
        let mut presenter = Presenter::new(line_count.clone(), LayoutContext::default());

        let sizes = HashMap::from([(ItemId(0), Size::new(40.0, 20.0))]);
        let result = compute_layout(
            &[ItemId(0)],
            &sizes,
            ContainerWidth::Bounded(100.0),
            &FlowConfig::default(),
        )
        .unwrap();
        presenter.post(result);
        presenter.post_line_count(1);

        assert!(presenter.applied().is_empty());
        assert_eq!(line_count.get(), 0);

        assert!(presenter.tick(Duration::ZERO));
        assert_eq!(presenter.applied().placements().len(), 1);
        assert_eq!(line_count.get(), 1);
        assert!((presenter.target_height() - 20.0).abs() < 0.001);

        assert!(!presenter.tick(Duration::ZERO));
    }

    #[test]
    fn test_transition_starts_at_next_tick() {
        let animation = flowrow_core::Animation::linear(Duration::from_millis(200));
        let mut presenter = Presenter::new(Binding::new(0), LayoutContext::animated(animation));
        let sizes = HashMap::from([(ItemId(0), Size::new(40.0, 20.0))]);
        let result = compute_layout(
            &[ItemId(0)],
            &sizes,
            ContainerWidth::Bounded(100.0),
            &FlowConfig::default(),
        )
        .unwrap();

        presenter.tick(Duration::from_secs(1));
        presenter.apply(result);
        // Positions are in place, the height has not moved yet
        assert_eq!(presenter.applied().placements().len(), 1);
        assert!((presenter.target_height() - 20.0).abs() < 0.001);
        assert!(presenter.displayed_height(Duration::from_secs(5)).abs() < 0.001);

        assert!(presenter.tick(Duration::from_secs(5)));
        assert!((presenter.displayed_height(Duration::from_millis(5100)) - 10.0).abs() < 0.001);
        assert!((presenter.displayed_height(Duration::from_millis(5200)) - 20.0).abs() < 0.001);
    }
}
