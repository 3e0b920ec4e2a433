//! Size resolution: intrinsic sizes from the host, either queried on demand
//! or reported asynchronously and retained per item.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use flowrow_core::{ItemId, Size};

/// Source of intrinsic (unconstrained) item sizes.
///
/// `None` means the size is not known yet; the pipeline treats it as a
/// zero-size placeholder.
pub trait SizeResolver {
    fn intrinsic_size(&self, id: ItemId) -> Option<Size>;
}

impl<F> SizeResolver for F
where
    F: Fn(ItemId) -> Option<Size>,
{
    fn intrinsic_size(&self, id: ItemId) -> Option<Size> {
        self(id)
    }
}

impl SizeResolver for HashMap<ItemId, Size> {
    fn intrinsic_size(&self, id: ItemId) -> Option<Size> {
        self.get(&id).copied()
    }
}

/// Measurement state of one item.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasureState {
    /// Known to the layout but not yet rendered by the host
    #[default]
    Unmeasured,
    /// Rendered invisibly, waiting for its size report. Keeps the previous
    /// size when re-measuring after a content change.
    Measuring { previous: Option<Size> },
    Measured(Size),
}

impl MeasureState {
    /// Latest known size, if any.
    pub fn latest(&self) -> Option<Size> {
        match *self {
            MeasureState::Unmeasured => None,
            MeasureState::Measuring { previous } => previous,
            MeasureState::Measured(size) => Some(size),
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, MeasureState::Measured(_))
    }
}

/// Per-item size cache for hosts that can only measure by rendering.
///
/// Entries are keyed by stable item identity and kept in attachment order.
#[derive(Debug, Clone, Default)]
pub struct SizeCache {
    entries: IndexMap<ItemId, MeasureState>,
}

impl SizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronize with the current item set: new items start unmeasured,
    /// removed items drop their retained size.
    ///
    /// Returns the number of entries removed.
    pub fn retain_items(&mut self, items: &[ItemId]) -> usize {
        let keep: HashSet<ItemId> = items.iter().copied().collect();
        let before = self.entries.len();
        self.entries.retain(|id, _| keep.contains(id));
        let removed = before - self.entries.len();
        for &id in items {
            self.entries.entry(id).or_default();
        }
        removed
    }

    /// The host rendered the item invisibly; a size report will follow.
    pub fn begin_measure(&mut self, id: ItemId) -> bool {
        match self.entries.get_mut(&id) {
            Some(state) if *state == MeasureState::Unmeasured => {
                *state = MeasureState::Measuring { previous: None };
                true
            }
            _ => false,
        }
    }

    /// Record a measured size. Returns whether the entry changed, either to
    /// a new size or by completing a pending measurement.
    ///
    /// Negative and NaN components are stored as zero. Returns `None` when
    /// the item is not attached.
    pub fn record(&mut self, id: ItemId, size: Size) -> Option<bool> {
        let size = size.sanitized();
        let state = self.entries.get_mut(&id)?;
        let changed = state.latest() != Some(size) || !state.is_measured();
        *state = MeasureState::Measured(size);
        Some(changed)
    }

    /// Content of the item changed: it must be measured again.
    pub fn invalidate(&mut self, id: ItemId) -> bool {
        match self.entries.get_mut(&id) {
            Some(state) => {
                *state = MeasureState::Measuring {
                    previous: state.latest(),
                };
                true
            }
            None => false,
        }
    }

    pub fn state(&self, id: ItemId) -> Option<MeasureState> {
        self.entries.get(&id).copied()
    }

    /// Items still waiting for a size report, in attachment order.
    pub fn pending(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.entries
            .iter()
            .filter(|(_, state)| !state.is_measured())
            .map(|(&id, _)| id)
    }

    pub fn is_settled(&self) -> bool {
        self.entries.values().all(MeasureState::is_measured)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SizeResolver for SizeCache {
    fn intrinsic_size(&self, id: ItemId) -> Option<Size> {
        self.entries.get(&id).and_then(MeasureState::latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_machine() {
        let mut cache = SizeCache::new();
        cache.retain_items(&[ItemId(1)]);
        assert_eq!(cache.state(ItemId(1)), Some(MeasureState::Unmeasured));
        assert_eq!(cache.intrinsic_size(ItemId(1)), None);

        assert!(cache.begin_measure(ItemId(1)));
        assert_eq!(
            cache.state(ItemId(1)),
            Some(MeasureState::Measuring { previous: None })
        );
        // Already measuring
        assert!(!cache.begin_measure(ItemId(1)));

        assert_eq!(cache.record(ItemId(1), Size::new(30.0, 10.0)), Some(true));
        assert_eq!(cache.intrinsic_size(ItemId(1)), Some(Size::new(30.0, 10.0)));
        assert!(cache.is_settled());
    }

    #[test]
    fn test_repeated_report_is_not_a_change() {
        let mut cache = SizeCache::new();
        cache.retain_items(&[ItemId(1)]);
        assert_eq!(cache.record(ItemId(1), Size::new(30.0, 10.0)), Some(true));
        assert_eq!(cache.record(ItemId(1), Size::new(30.0, 10.0)), Some(false));
        assert_eq!(cache.record(ItemId(1), Size::new(31.0, 10.0)), Some(true));
    }

    #[test]
    fn test_repeated_nan_report_is_not_a_change() {
        let mut cache = SizeCache::new();
        cache.retain_items(&[ItemId(1)]);
        let raw = Size {
            width: f64::NAN,
            height: 10.0,
        };
        assert_eq!(cache.record(ItemId(1), raw), Some(true));
        assert_eq!(cache.record(ItemId(1), raw), Some(false));
        assert_eq!(cache.intrinsic_size(ItemId(1)), Some(Size::new(0.0, 10.0)));
    }

    #[test]
    fn test_unknown_item() {
        let mut cache = SizeCache::new();
        assert_eq!(cache.record(ItemId(9), Size::ZERO), None);
        assert!(!cache.invalidate(ItemId(9)));
    }

    #[test]
    fn test_invalidate_keeps_previous_size() {
        let mut cache = SizeCache::new();
        cache.retain_items(&[ItemId(1)]);
        cache.record(ItemId(1), Size::new(30.0, 10.0));

        assert!(cache.invalidate(ItemId(1)));
        assert_eq!(cache.intrinsic_size(ItemId(1)), Some(Size::new(30.0, 10.0)));
        assert_eq!(cache.pending().collect::<Vec<_>>(), vec![ItemId(1)]);

        // Same size again still completes the measurement
        assert_eq!(cache.record(ItemId(1), Size::new(30.0, 10.0)), Some(true));
        assert!(cache.is_settled());
    }

    #[test]
    fn test_removed_items_drop_sizes() {
        let mut cache = SizeCache::new();
        cache.retain_items(&[ItemId(1), ItemId(2)]);
        cache.record(ItemId(1), Size::new(30.0, 10.0));

        assert_eq!(cache.retain_items(&[ItemId(2), ItemId(3)]), 1);
        assert_eq!(cache.state(ItemId(1)), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.pending().collect::<Vec<_>>(), vec![ItemId(2), ItemId(3)]);
    }

    #[test]
    fn test_closure_resolver() {
        let resolver = |id: ItemId| Some(Size::new(id.0 as f64, 1.0));
        assert_eq!(resolver.intrinsic_size(ItemId(4)), Some(Size::new(4.0, 1.0)));
    }
}
