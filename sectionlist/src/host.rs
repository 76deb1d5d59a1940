use alloc::format;
use alloc::string::{String, ToString};

use crate::{FlatEntry, ItemType, Projection, ScrollMiss, ScrollRequest};

/// The imperative surface of a virtualized list that the alpha rail is allowed to drive.
///
/// [`crate::VirtualList`] implements this for headless use; a UI adapter implements it on top
/// of its native list widget.
pub trait ScrollHost {
    /// Scrolls so that flat slot `request.index` lands at `request.align`.
    ///
    /// Returns `false` when the host could not honor the request (e.g. the index is past the
    /// end); callers treat that as a dropped scroll, not an error.
    fn scroll_to(&mut self, request: ScrollRequest) -> bool;
}

impl<H: ScrollHost + ?Sized> ScrollHost for &mut H {
    fn scroll_to(&mut self, request: ScrollRequest) -> bool {
        (**self).scroll_to(request)
    }
}

/// Key for a header slot. The flat index keeps keys unique even if a title repeats across
/// re-projections.
pub fn header_key(title: &str, index: usize) -> String {
    format!("header-{title}-{index}")
}

/// What a list host needs to render a [`Projection`]: keys, item types, sticky slots and
/// per-slot rendering.
pub struct HostBinding<'p, T, F> {
    projection: &'p Projection<T>,
    row_key: F,
    with_headers: bool,
}

impl<'p, T, F> HostBinding<'p, T, F>
where
    F: Fn(&T) -> String,
{
    /// `row_key` maps a row item to its record's stable key.
    pub fn new(projection: &'p Projection<T>, row_key: F) -> Self {
        Self {
            projection,
            row_key,
            with_headers: true,
        }
    }

    /// When `false`, header slots keep their index but render nothing.
    pub fn with_headers(mut self, with_headers: bool) -> Self {
        self.with_headers = with_headers;
        self
    }

    pub fn headers_enabled(&self) -> bool {
        self.with_headers
    }

    pub fn len(&self) -> usize {
        self.projection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projection.is_empty()
    }

    pub fn key_at(&self, index: usize) -> Option<String> {
        Some(match self.projection.entry(index)? {
            FlatEntry::Header(title) => header_key(title, index),
            FlatEntry::Row(item) => (self.row_key)(item),
        })
    }

    pub fn item_type_at(&self, index: usize) -> Option<ItemType> {
        self.projection.item_type(index)
    }

    pub fn sticky_indices(&self) -> &'p [usize] {
        self.projection.sticky_indices()
    }

    /// Renders the slot at `index`.
    ///
    /// Returns `None` for out-of-range indexes and for header slots while headers are disabled.
    pub fn render<V>(
        &self,
        index: usize,
        render_item: impl FnOnce(&T) -> V,
        render_section_header: impl FnOnce(&str) -> V,
    ) -> Option<V> {
        match self.projection.entry(index)? {
            FlatEntry::Header(title) => self.with_headers.then(|| render_section_header(title)),
            FlatEntry::Row(item) => Some(render_item(item)),
        }
    }
}

/// Resolves the `index`-th rail label to the flat index of its header.
///
/// `titles` are the labels the rail was built from; `projection` is the list the host is
/// currently showing. When the two are out of sync the lookup misses instead of scrolling to
/// the wrong place.
pub fn resolve_section_header<T, S: AsRef<str>>(
    titles: &[S],
    index: usize,
    projection: &Projection<T>,
) -> Result<usize, ScrollMiss> {
    if titles.is_empty() {
        return Err(ScrollMiss::NoSections);
    }
    let Some(title) = titles.get(index) else {
        return Err(ScrollMiss::SectionOutOfRange {
            index,
            count: titles.len(),
        });
    };
    let title = title.as_ref();
    projection
        .header_index(title)
        .ok_or_else(|| ScrollMiss::HeaderNotFound {
            title: title.to_string(),
        })
}
