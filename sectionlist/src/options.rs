use crate::ItemType;

/// Configuration for [`crate::VirtualList`].
///
/// Sizes are in the scroll axis (e.g. rows of a terminal, or logical pixels). They are
/// estimates: a host that measures its rendered slots reports real sizes through
/// `VirtualList::measure`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListOptions {
    pub header_size: u32,
    pub row_size: u32,
    /// Slots rendered beyond each edge of the viewport.
    pub overscan: usize,
    pub padding_start: u32,
    pub padding_end: u32,
    /// Space kept above a scroll-to target aligned to the start.
    pub scroll_padding_start: u32,
    /// Space kept below a scroll-to target aligned to the end.
    pub scroll_padding_end: u32,
    /// Keep the current section's header drawn at the top of the viewport.
    pub sticky_headers: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            header_size: 1,
            row_size: 1,
            overscan: 1,
            padding_start: 0,
            padding_end: 0,
            scroll_padding_start: 0,
            scroll_padding_end: 0,
            sticky_headers: true,
        }
    }
}

impl ListOptions {
    /// Options with fixed estimates for each slot kind.
    pub fn new(header_size: u32, row_size: u32) -> Self {
        Self {
            header_size,
            row_size,
            ..Self::default()
        }
    }

    pub fn estimate(&self, item_type: ItemType) -> u32 {
        match item_type {
            ItemType::SectionHeader => self.header_size,
            ItemType::Row => self.row_size,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_padding(mut self, padding_start: u32, padding_end: u32) -> Self {
        self.padding_start = padding_start;
        self.padding_end = padding_end;
        self
    }

    pub fn with_scroll_padding(
        mut self,
        scroll_padding_start: u32,
        scroll_padding_end: u32,
    ) -> Self {
        self.scroll_padding_start = scroll_padding_start;
        self.scroll_padding_end = scroll_padding_end;
        self
    }

    pub fn with_sticky_headers(mut self, sticky_headers: bool) -> Self {
        self.sticky_headers = sticky_headers;
        self
    }
}
