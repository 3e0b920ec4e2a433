//! Row packing: partitioning an ordered item sequence into rows that each
//! fit the container width.

use smallvec::SmallVec;

use flowrow_core::{ContainerWidth, ItemId, Size};

/// An item placed in a row, with its effective (width-clamped) size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowItem {
    pub id: ItemId,
    pub size: Size,
}

/// One packed row. Never mutated after packing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    items: SmallVec<[RowItem; 8]>,
    width: f64,
    height: f64,
}

impl Row {
    /// Items in input order.
    pub fn items(&self) -> &[RowItem] {
        &self.items
    }

    /// Sum of item widths plus interior spacing.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Tallest item in the row.
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, item: RowItem, spacing: f64) {
        if !self.items.is_empty() {
            self.width += spacing;
        }
        self.width += item.size.width;
        self.height = self.height.max(item.size.height);
        self.items.push(item);
    }
}

/// Pack items into rows.
///
/// Negative and NaN sizes count as zero. An item wider than the container
/// is clamped to the container width and always ends up alone in its row. The cap on visible rows is applied
/// downstream; this always packs the full sequence.
pub fn pack<I>(items: I, container: ContainerWidth, spacing: f64) -> Vec<Row>
where
    I: IntoIterator<Item = (ItemId, Size)>,
{
    let budget = container.budget();
    let mut rows = Vec::new();
    let mut current = Row::default();

    for (id, size) in items {
        let size = size.sanitized().clamp_width(budget);

        if !current.is_empty() && current.width + spacing + size.width > budget {
            rows.push(std::mem::take(&mut current));
        }

        current.push(RowItem { id, size }, spacing);
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(widths: &[f64]) -> Vec<(ItemId, Size)> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| (ItemId(i as u64), Size::new(w, 20.0)))
            .collect()
    }

    fn row_ids(row: &Row) -> Vec<u64> {
        row.items().iter().map(|item| item.id.0).collect()
    }

    #[test]
    fn test_wraps_when_row_overflows() {
        let rows = pack(items(&[40.0, 40.0, 40.0]), ContainerWidth::Bounded(100.0), 8.0);

        assert_eq!(rows.len(), 2);
        assert_eq!(row_ids(&rows[0]), vec![0, 1]);
        assert_eq!(row_ids(&rows[1]), vec![2]);
        // 40 + 8 + 40
        assert!((rows[0].width() - 88.0).abs() < 0.001);
        assert!((rows[1].width() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_exact_fit_stays_on_row() {
        // 46 + 8 + 46 = 100
        let rows = pack(items(&[46.0, 46.0]), ContainerWidth::Bounded(100.0), 8.0);
        assert_eq!(rows.len(), 1);
        assert!((rows[0].width() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_oversized_item_is_clamped() {
        let rows = pack(items(&[80.0]), ContainerWidth::Bounded(50.0), 8.0);

        assert_eq!(rows.len(), 1);
        assert!((rows[0].items()[0].size.width - 50.0).abs() < 0.001);
        assert!((rows[0].width() - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_oversized_item_gets_own_row() {
        let rows = pack(items(&[20.0, 300.0, 20.0]), ContainerWidth::Bounded(100.0), 8.0);

        assert_eq!(rows.len(), 3);
        assert_eq!(row_ids(&rows[1]), vec![1]);
        assert!((rows[1].width() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_no_items_no_rows() {
        let rows = pack(Vec::new(), ContainerWidth::Bounded(100.0), 8.0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_unbounded_is_single_row() {
        let rows = pack(items(&[400.0, 400.0, 400.0]), ContainerWidth::Unbounded, 8.0);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert!((rows[0].width() - 1216.0).abs() < 0.001);
    }

    #[test]
    fn test_row_height_is_tallest_item() {
        let packed = vec![
            (ItemId(0), Size::new(10.0, 12.0)),
            (ItemId(1), Size::new(10.0, 30.0)),
            (ItemId(2), Size::new(10.0, 18.0)),
        ];
        let rows = pack(packed, ContainerWidth::Bounded(100.0), 4.0);

        assert_eq!(rows.len(), 1);
        assert!((rows[0].height() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_width_container() {
        let rows = pack(items(&[10.0, 10.0]), ContainerWidth::Bounded(0.0), 8.0);

        // Every item clamps to zero width; spacing alone overflows.
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.width().abs() < 0.001));
    }

    #[test]
    fn test_raw_nan_width_counts_as_zero() {
        let mut packed = vec![(
            ItemId(0),
            Size {
                width: f64::NAN,
                height: 10.0,
            },
        )];
        packed.extend((1..4).map(|i| (ItemId(i), Size::new(60.0, 10.0))));
        let rows = pack(packed, ContainerWidth::Bounded(100.0), 8.0);

        // 0 + 8 + 60 fits; each further 60 wraps
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.width() <= 100.0));
        assert_eq!(row_ids(&rows[0]), vec![0, 1]);
    }

    #[test]
    fn test_raw_negative_width_counts_as_zero() {
        let packed = vec![
            (
                ItemId(0),
                Size {
                    width: -50.0,
                    height: 10.0,
                },
            ),
            (ItemId(1), Size::new(40.0, 10.0)),
        ];
        let rows = pack(packed, ContainerWidth::Bounded(100.0), 8.0);

        assert_eq!(rows.len(), 1);
        assert!(rows[0].items()[0].size.width.abs() < 0.001);
        assert!((rows[0].width() - 48.0).abs() < 0.001);
    }
}
