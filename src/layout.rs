//! Page layout calculations

use crate::record::{AdminRecord, ItemRecord};

/// Number of item rows printed on one page of the form
pub const ITEMS_PER_PAGE: usize = 18;

/// Simple length type in points (1/72 inch), the PDF user-space unit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Length(pub f32);

impl Length {
    /// Create a length from inches
    pub fn from_inches(inches: f32) -> Self {
        Length(inches * 72.0)
    }

    /// Get the value in points
    pub fn pt(&self) -> f32 {
        self.0
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self {
            width: Length::from_inches(8.5),
            height: Length::from_inches(11.0),
        }
    }
}

/// One output page worth of items
///
/// `items` is a contiguous slice of the full item sequence; every chunk of
/// a layout shares the same admin record.
#[derive(Debug, Clone, Copy)]
pub struct PageChunk<'a> {
    pub items: &'a [ItemRecord],
    /// 1-based page number
    pub page_index: usize,
    pub total_pages: usize,
    pub admin: &'a AdminRecord,
}

impl PageChunk<'_> {
    /// Whether this chunk is the closing page carrying the certification block
    pub fn is_last(&self) -> bool {
        self.page_index == self.total_pages
    }
}

/// Number of pages needed for `item_count` items.
///
/// Never less than one, so the admin block and certification still print
/// when no items were extracted.
pub fn page_count(item_count: usize, capacity: usize) -> usize {
    let capacity = capacity.max(1);
    item_count.div_ceil(capacity).max(1)
}

/// Split the item sequence into page chunks of at most `capacity` items
///
/// A capacity of zero is treated as one.
pub fn paginate<'a>(
    items: &'a [ItemRecord],
    admin: &'a AdminRecord,
    capacity: usize,
) -> Vec<PageChunk<'a>> {
    let capacity = capacity.max(1);
    let total_pages = page_count(items.len(), capacity);

    if items.is_empty() {
        return vec![PageChunk {
            items,
            page_index: 1,
            total_pages,
            admin,
        }];
    }

    items
        .chunks(capacity)
        .enumerate()
        .map(|(i, slice)| PageChunk {
            items: slice,
            page_index: i + 1,
            total_pages,
            admin,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items(n: usize) -> Vec<ItemRecord> {
        (1..=n)
            .map(|i| ItemRecord::new(i.to_string(), format!("ITEM {}", i)))
            .collect()
    }

    #[test]
    fn test_length_conversions() {
        let len = Length::from_inches(1.0);
        assert!((len.pt() - 72.0).abs() < 0.01);
    }

    #[test]
    fn test_letter_size() {
        let letter = PageDimensions::letter();
        assert_eq!(letter.width.pt(), 612.0);
        assert_eq!(letter.height.pt(), 792.0);
    }

    #[test]
    fn test_no_items_still_one_page() {
        let admin = AdminRecord::default();
        let chunks = paginate(&[], &admin, ITEMS_PER_PAGE);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].items.is_empty());
        assert_eq!(chunks[0].page_index, 1);
        assert_eq!(chunks[0].total_pages, 1);
        assert!(chunks[0].is_last());
    }

    #[test]
    fn test_nineteen_items_two_pages() {
        let admin = AdminRecord::default();
        let items = items(19);
        let chunks = paginate(&items, &admin, ITEMS_PER_PAGE);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].items.len(), 18);
        assert_eq!(chunks[1].items.len(), 1);
        assert_eq!(chunks[1].items[0].box_no, "19");
        assert!(!chunks[0].is_last());
        assert!(chunks[1].is_last());
        assert!(chunks.iter().all(|c| c.total_pages == 2));
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(page_count(36, 18), 2);
        assert_eq!(page_count(37, 18), 3);
        assert_eq!(page_count(0, 18), 1);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let admin = AdminRecord::default();
        let items = items(3);
        let chunks = paginate(&items, &admin, 0);
        assert_eq!(chunks.len(), 3);
        assert_eq!(page_count(3, 0), 3);
    }

    proptest! {
        #[test]
        fn chunks_reassemble_in_order(n in 0usize..200, capacity in 1usize..40) {
            let admin = AdminRecord::default();
            let items = items(n);
            let chunks = paginate(&items, &admin, capacity);

            prop_assert_eq!(chunks.len(), page_count(n, capacity));
            prop_assert_eq!(chunks.len(), std::cmp::max(1, n.div_ceil(capacity)));

            let mut rebuilt = Vec::new();
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert!(chunk.items.len() <= capacity);
                prop_assert_eq!(chunk.page_index, i + 1);
                prop_assert_eq!(chunk.total_pages, chunks.len());
                rebuilt.extend_from_slice(chunk.items);
            }
            prop_assert_eq!(rebuilt, items);
        }
    }
}
