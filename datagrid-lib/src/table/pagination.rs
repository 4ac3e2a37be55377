//! Page arithmetic and page-button layouts.

use std::ops::RangeInclusive;

/// Number of pages needed for `total_items` at `per_page` items each.
pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    total_items.div_ceil(per_page.max(1))
}

/// Clamps a requested page into `1..=max(total_pages, 1)`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages).max(1)
}

/// `start-end of total` label for the rows shown on `current`.
pub fn range_label(current: usize, per_page: usize, total_items: usize) -> String {
    let start = current.saturating_sub(1) * per_page + 1;
    let end = (current * per_page).min(total_items);
    format!("{}-{} of {}", start, end, total_items)
}

/// Contiguous window of at most `max_visible` page numbers around `current`.
///
/// The window is centred when possible and shifted to stay inside
/// `1..=total`. Empty when there are no pages.
#[allow(clippy::reversed_empty_ranges)]
pub fn page_window(current: usize, total: usize, max_visible: usize) -> RangeInclusive<usize> {
    if total == 0 || max_visible == 0 {
        return 1..=0;
    }
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = (start + max_visible - 1).min(total);
    if end + 1 - start < max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }
    start..=end
}

/// Compact page-button layout: leading buttons, an overflow dropdown, and
/// the last two pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactPages {
    /// Page 1 plus up to two pages around the current one.
    pub leading: Vec<usize>,
    /// Pages only reachable through the dropdown, as a range (possibly empty).
    pub overflow: RangeInclusive<usize>,
    /// The last two pages.
    pub trailing: Vec<usize>,
}

impl CompactPages {
    /// Every page in display order.
    pub fn all(&self) -> impl Iterator<Item = usize> + '_ {
        self.leading
            .iter()
            .copied()
            .chain(self.overflow.clone())
            .chain(self.trailing.iter().copied())
    }

    /// Number of pages behind the dropdown.
    pub fn overflow_len(&self) -> usize {
        if self.overflow.is_empty() {
            0
        } else {
            self.overflow.end() - self.overflow.start() + 1
        }
    }
}

/// Builds the compact layout for `current` out of `total` pages.
///
/// Pages outside `1..=total` and repeats are dropped, so small page counts
/// degrade to a plain list.
#[allow(clippy::reversed_empty_ranges)]
pub fn compact_pages(current: usize, total: usize) -> CompactPages {
    let (current, total) = (current as i64, total as i64);
    let in_range = |page: &i64| (1..=total).contains(page);

    let (mut second, mut third) = if current <= 2 {
        (2, 3)
    } else {
        (current, current + 1)
    };
    if third >= total - 1 {
        third = total - 2;
        second = third - 1;
    }

    let mut seen = Vec::new();
    let mut take = |pages: [i64; 3]| -> Vec<usize> {
        pages
            .into_iter()
            .filter(in_range)
            .filter_map(|p| {
                if seen.contains(&p) {
                    None
                } else {
                    seen.push(p);
                    Some(p as usize)
                }
            })
            .collect()
    };

    // 0 is never a page, so it doubles as "no button"
    let leading = take([
        1,
        if second > 1 { second } else { 0 },
        if third > 1 && third < total { third } else { 0 },
    ]);
    let trailing = take([total - 1, total, 0]);

    // strictly between the leading and trailing buttons
    let (first, last) = ((third + 1).max(1), total - 2);
    let overflow = if first <= last {
        first as usize..=last as usize
    } else {
        1..=0
    };

    CompactPages {
        leading,
        overflow,
        trailing,
    }
}
