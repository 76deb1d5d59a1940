use alloc::string::String;
use alloc::vec::Vec;

use crate::fenwick::SizeTree;
use crate::key::KeySizeMap;
use crate::{
    Align, HostBinding, ItemType, ListOptions, ScrollHost, ScrollRequest, VirtualItem,
    VirtualRange,
};

/// A headless virtualized list over the slots of a flattened section list.
///
/// The list knows each slot's kind and key, but nothing about what a slot shows. Your adapter
/// drives it:
/// - `bind` (or `set_slots`) whenever the projection changes
/// - `set_viewport_size` / `set_scroll_offset` from UI events
/// - `measure` once a slot has been laid out, if sizes are dynamic
///
/// and renders whatever `for_each_virtual_item` yields. Section headers can be pinned to the
/// top of the viewport (sticky), and header slots can be hidden while still occupying their
/// index so scroll targets stay valid.
#[derive(Clone, Debug)]
pub struct VirtualList {
    options: ListOptions,
    headers_visible: bool,
    viewport_size: u32,
    scroll_offset: u64,

    types: Vec<ItemType>,
    keys: Vec<String>,
    headers: Vec<usize>, // flat indexes of header slots, ascending

    sizes: Vec<u32>,
    measured: Vec<bool>,
    sums: SizeTree,
    key_sizes: KeySizeMap<String>,
}

impl Default for VirtualList {
    fn default() -> Self {
        Self::new(ListOptions::default())
    }
}

impl VirtualList {
    pub fn new(options: ListOptions) -> Self {
        vdebug!(
            header_size = options.header_size,
            row_size = options.row_size,
            overscan = options.overscan,
            "VirtualList::new"
        );
        Self {
            options,
            headers_visible: true,
            viewport_size: 0,
            scroll_offset: 0,
            types: Vec::new(),
            keys: Vec::new(),
            headers: Vec::new(),
            sizes: Vec::new(),
            measured: Vec::new(),
            sums: SizeTree::default(),
            key_sizes: KeySizeMap::new(),
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ListOptions) {
        let estimates_changed = self.options.header_size != options.header_size
            || self.options.row_size != options.row_size;
        self.options = options;
        vtrace!(
            overscan = self.options.overscan,
            estimates_changed,
            "VirtualList::set_options"
        );
        if estimates_changed {
            self.rebuild_sizes();
        }
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    /// Replaces the slots with the flat sequence of `binding`.
    ///
    /// Measured sizes follow slot keys, so rows that survive a filter keep their measurement.
    pub fn bind<T, F>(&mut self, binding: &HostBinding<'_, T, F>)
    where
        F: Fn(&T) -> String,
    {
        self.headers_visible = binding.headers_enabled();
        self.set_slots((0..binding.len()).filter_map(|i| {
            let item_type = binding.item_type_at(i)?;
            let key = binding.key_at(i)?;
            Some((item_type, key))
        }));
    }

    /// Replaces the slots. Scroll offset is clamped to the new content.
    ///
    /// Measured sizes are kept only for keys that are still bound; everything else is
    /// forgotten, so the cache never outgrows the current slots.
    pub fn set_slots(&mut self, slots: impl IntoIterator<Item = (ItemType, String)>) {
        self.types.clear();
        self.keys.clear();
        self.headers.clear();
        for (i, (item_type, key)) in slots.into_iter().enumerate() {
            if item_type.is_header() {
                self.headers.push(i);
            }
            self.types.push(item_type);
            self.keys.push(key);
        }
        self.retain_bound_sizes();
        self.rebuild_sizes();
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        vdebug!(
            slots = self.types.len(),
            headers = self.headers.len(),
            "VirtualList::set_slots"
        );
    }

    /// Shows or hides header slots. Hidden headers take no space but keep their index.
    pub fn set_headers_visible(&mut self, visible: bool) {
        if self.headers_visible == visible {
            return;
        }
        self.headers_visible = visible;
        self.rebuild_sizes();
        self.scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
    }

    pub fn headers_visible(&self) -> bool {
        self.headers_visible
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn key_for(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    pub fn item_type(&self, index: usize) -> Option<ItemType> {
        self.types.get(index).copied()
    }

    /// Flat indexes of the header slots.
    pub fn header_indices(&self) -> &[usize] {
        &self.headers
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.viewport_size = size;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        self.scroll_offset = self.clamp_scroll_offset(offset);
    }

    pub fn set_viewport_and_scroll_clamped(&mut self, viewport_size: u32, scroll_offset: u64) {
        self.viewport_size = viewport_size;
        self.set_scroll_offset_clamped(scroll_offset);
    }

    pub fn total_size(&self) -> u64 {
        (self.options.padding_start as u64)
            .saturating_add(self.sums.total())
            .saturating_add(self.options.padding_end as u64)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size()
            .saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.len()).then(|| self.start_of(index))
    }

    pub fn item_size(&self, index: usize) -> Option<u32> {
        self.sizes.get(index).copied()
    }

    pub fn item(&self, index: usize) -> Option<VirtualItem> {
        (index < self.len()).then(|| self.natural_item(index))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).copied().unwrap_or(false)
    }

    /// The slot covering `offset`, clamped to the first/last slot.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let last = self.len().checked_sub(1)?;
        let padding = self.options.padding_start as u64;
        if offset < padding {
            return Some(0);
        }
        Some(self.sums.count_within(offset - padding).min(last))
    }

    /// Slots intersecting the viewport (no overscan).
    pub fn visible_range(&self) -> VirtualRange {
        if self.is_empty() || self.viewport_size == 0 {
            return VirtualRange::EMPTY;
        }
        let offset = self.clamp_scroll_offset(self.scroll_offset);
        let padding = self.options.padding_start as u64;
        if offset.saturating_sub(padding) >= self.sums.total() {
            return VirtualRange {
                start_index: self.len(),
                end_index: self.len(),
            };
        }
        let last_visible = offset.saturating_add(self.viewport_size as u64 - 1);
        let start_index = self.index_at_offset(offset).unwrap_or(0);
        let end_index = self
            .index_at_offset(last_visible)
            .map_or(self.len(), |i| i + 1);
        VirtualRange {
            start_index,
            end_index,
        }
    }

    /// The visible range grown by `overscan` on both sides.
    pub fn virtual_range(&self) -> VirtualRange {
        let visible = self.visible_range();
        if visible.is_empty() {
            return visible;
        }
        VirtualRange {
            start_index: visible.start_index.saturating_sub(self.options.overscan),
            end_index: visible
                .end_index
                .saturating_add(self.options.overscan)
                .min(self.len()),
        }
    }

    /// Ordinal of the section owning the first visible slot.
    pub fn section_at_top(&self) -> Option<usize> {
        let visible = self.visible_range();
        if visible.is_empty() {
            return None;
        }
        self.section_of(visible.start_index)
    }

    /// Flat index of the header that is currently pinned to the top of the viewport.
    ///
    /// A header is pinned once the list has scrolled past its natural position while its
    /// section is still at the top.
    pub fn pinned_header(&self) -> Option<usize> {
        if !self.options.sticky_headers || !self.headers_visible {
            return None;
        }
        let header = self.headers[self.section_at_top()?];
        let offset = self.clamp_scroll_offset(self.scroll_offset);
        (self.start_of(header) < offset).then_some(header)
    }

    /// Emits the slots to render this frame in ascending index order.
    ///
    /// A pinned header is emitted with `pinned = true` and `start` set to the scroll offset,
    /// even if its natural position is outside the overscanned range.
    pub fn for_each_virtual_item(&self, mut f: impl FnMut(VirtualItem)) {
        let range = self.virtual_range();
        if range.is_empty() {
            return;
        }
        let pinned = self.pinned_header();
        if let Some(header) = pinned.filter(|&h| h < range.start_index) {
            f(self.pinned_item(header));
        }
        for i in range.start_index..range.end_index {
            if pinned == Some(i) {
                f(self.pinned_item(i));
            } else {
                f(self.natural_item(i));
            }
        }
    }

    /// Collects the slots to render into `out` (clears `out` first).
    pub fn collect_virtual_items(&self, out: &mut Vec<VirtualItem>) {
        out.clear();
        self.for_each_virtual_item(|item| out.push(item));
    }

    /// Records the laid-out size of a slot.
    ///
    /// When the slot starts above the current scroll offset, the offset moves by the size
    /// difference so the content under the viewport does not jump. Returns that adjustment.
    pub fn measure(&mut self, index: usize, size: u32) -> i64 {
        let Some(&item_type) = self.types.get(index) else {
            return 0;
        };
        if item_type.is_header() && !self.headers_visible {
            return 0;
        }
        self.key_sizes.insert(self.keys[index].clone(), size);
        self.measured[index] = true;

        let current = self.sizes[index];
        if current == size {
            return 0;
        }
        let delta = size as i64 - current as i64;
        let was_above = self.start_of(index) < self.scroll_offset;
        self.sizes[index] = size;
        self.sums.add(index, delta);
        vtrace!(index, size, delta, "VirtualList::measure");

        if !was_above {
            return 0;
        }
        self.scroll_offset = if delta > 0 {
            self.scroll_offset.saturating_add(delta as u64)
        } else {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        };
        delta
    }

    /// Forgets every measured size and falls back to estimates.
    pub fn reset_measurements(&mut self) {
        self.key_sizes.clear();
        self.rebuild_sizes();
    }

    /// The scroll offset that brings slot `index` to `align`. Out-of-range indexes clamp to the
    /// last slot.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        let Some(last) = self.len().checked_sub(1) else {
            return 0;
        };
        let item = self.natural_item(index.min(last));
        let pad_start = self.options.scroll_padding_start as u64;
        let pad_end = self.options.scroll_padding_end as u64;
        let view = self.viewport_size as u64;

        let target = match align {
            Align::Start => item.start.saturating_sub(pad_start),
            Align::End => item.end().saturating_add(pad_end).saturating_sub(view),
            Align::Center => item
                .start
                .saturating_add(item.size as u64 / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.scroll_offset;
                if item.start >= cur && item.end() <= cur.saturating_add(view) {
                    cur
                } else if item.start < cur {
                    item.start.saturating_sub(pad_start)
                } else {
                    item.end().saturating_add(pad_end).saturating_sub(view)
                }
            }
        };
        self.clamp_scroll_offset(target)
    }

    /// Jumps to slot `index` and returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.scroll_offset = offset;
        offset
    }

    fn section_of(&self, index: usize) -> Option<usize> {
        self.headers
            .partition_point(|&h| h <= index)
            .checked_sub(1)
    }

    fn start_of(&self, index: usize) -> u64 {
        (self.options.padding_start as u64).saturating_add(self.sums.prefix_sum(index))
    }

    fn natural_item(&self, index: usize) -> VirtualItem {
        VirtualItem {
            index,
            start: self.start_of(index),
            size: self.sizes[index],
            item_type: self.types[index],
            pinned: false,
        }
    }

    fn pinned_item(&self, index: usize) -> VirtualItem {
        VirtualItem {
            start: self.clamp_scroll_offset(self.scroll_offset),
            pinned: true,
            ..self.natural_item(index)
        }
    }

    fn retain_bound_sizes(&mut self) {
        if self.key_sizes.is_empty() {
            return;
        }
        let mut kept = KeySizeMap::new();
        for key in &self.keys {
            if let Some(size) = self.key_sizes.remove(key) {
                kept.insert(key.clone(), size);
            }
        }
        self.key_sizes = kept;
    }

    fn rebuild_sizes(&mut self) {
        self.sizes.clear();
        self.measured.clear();
        self.sizes.reserve_exact(self.types.len());
        self.measured.reserve_exact(self.types.len());
        for (item_type, key) in self.types.iter().zip(&self.keys) {
            let hidden = item_type.is_header() && !self.headers_visible;
            let (size, measured) = match self.key_sizes.get(key) {
                Some(&size) if !hidden => (size, true),
                _ if hidden => (0, false),
                _ => (self.options.estimate(*item_type), false),
            };
            self.sizes.push(size);
            self.measured.push(measured);
        }
        self.sums = SizeTree::from_sizes(&self.sizes);
        vtrace!(
            slots = self.sizes.len(),
            cached = self.key_sizes.len(),
            "VirtualList::rebuild_sizes"
        );
    }
}

impl ScrollHost for VirtualList {
    fn scroll_to(&mut self, request: ScrollRequest) -> bool {
        if request.index >= self.len() {
            vdebug!(
                index = request.index,
                len = self.len(),
                "scroll_to: index out of range"
            );
            return false;
        }
        // Headless: there is nothing to animate, the offset is applied immediately.
        self.scroll_to_index(request.index, request.align);
        vtrace!(
            index = request.index,
            offset = self.scroll_offset,
            "scroll_to"
        );
        true
    }
}
