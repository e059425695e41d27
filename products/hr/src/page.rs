//! Offset pagination applied in memory over a fully fetched result set.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Bounds used to normalize client-supplied page sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationSettings {
    pub default_size: u64,
    pub max_size: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// Zero-based page index plus page size. Always normalized: `size >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Normalize raw query values: negative page becomes 0, a missing or
    /// non-positive size becomes the default, an oversized one is capped.
    pub fn resolve(page: Option<i64>, size: Option<i64>, settings: &PaginationSettings) -> Self {
        let default_size = settings.default_size.max(1);
        let max_size = settings.max_size.max(default_size);
        let page = page.map_or(0, |page| page.max(0) as u64);
        let size = match size {
            Some(size) if size >= 1 => (size as u64).min(max_size),
            _ => default_size,
        };
        Self { page, size }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of `T` with total-size metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub size: u64,
    pub number: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    /// Slice `items[offset .. min(offset + size, len)]`; an offset past the end
    /// yields an empty page while still reporting the full total.
    pub fn slice(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len();
        let start = usize::try_from(request.offset()).unwrap_or(usize::MAX).min(total);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let end = start.saturating_add(size).min(total);
        let content: Vec<T> = items.into_iter().skip(start).take(end - start).collect();

        let total_elements = total as u64;
        let total_pages = total_elements.div_ceil(request.size());
        Self {
            number_of_elements: content.len() as u64,
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size: request.size(),
            number: request.page(),
            first: request.page() == 0,
            last: request.page().saturating_add(1) >= total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: u32) -> Vec<u32> {
        (0..n).collect()
    }

    #[test]
    fn slices_requested_window() {
        let page = Page::slice(numbers(10), PageRequest::new(1, 3));
        assert_eq!(page.content, vec![3, 4, 5]);
        assert_eq!(page.total_elements, 10);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.number_of_elements, 3);
        assert!(!page.first);
        assert!(!page.last);
    }

    #[test]
    fn last_page_is_truncated() {
        let page = Page::slice(numbers(10), PageRequest::new(3, 3));
        assert_eq!(page.content, vec![9]);
        assert!(page.last);
    }

    #[test]
    fn offset_past_end_is_empty_not_error() {
        let page = Page::slice(numbers(4), PageRequest::new(5, 2));
        assert!(page.content.is_empty());
        assert!(page.empty);
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn huge_offsets_saturate() {
        let page = Page::slice(numbers(4), PageRequest::new(u64::MAX, u64::MAX));
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn matches_reference_slice_for_every_window() {
        let items = numbers(7);
        for page in 0..5u64 {
            for size in 1..9u64 {
                let request = PageRequest::new(page, size);
                let start = (page * size).min(7) as usize;
                let end = (page * size + size).min(7) as usize;
                let sliced = Page::slice(items.clone(), request);
                assert_eq!(sliced.content, items[start..end].to_vec(), "page={page} size={size}");
                assert_eq!(sliced.total_elements, 7);
            }
        }
    }

    #[test]
    fn empty_set_is_first_and_last() {
        let page = Page::slice(Vec::<u32>::new(), PageRequest::default());
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn resolve_normalizes_raw_values() {
        let settings = PaginationSettings::default();
        assert_eq!(PageRequest::resolve(None, None, &settings), PageRequest::new(0, 20));
        assert_eq!(PageRequest::resolve(Some(-3), Some(0), &settings), PageRequest::new(0, 20));
        assert_eq!(PageRequest::resolve(Some(2), Some(5), &settings), PageRequest::new(2, 5));
        assert_eq!(
            PageRequest::resolve(Some(0), Some(1_000_000), &settings),
            PageRequest::new(0, 2000)
        );
        assert_eq!(PageRequest::resolve(Some(4), Some(5), &settings).offset(), 20);
    }
}
