/// Where a scroll target lands inside the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Target's start at the top of the viewport.
    #[default]
    Start,
    Center,
    End,
    /// Keep the current offset when the target is already fully visible.
    Auto,
}

/// The host-facing classification of a flat slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemType {
    SectionHeader,
    Row,
}

impl ItemType {
    /// The string a recycling list host uses to pool views of the same kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SectionHeader => "sectionHeader",
            Self::Row => "row",
        }
    }

    pub fn is_header(self) -> bool {
        matches!(self, Self::SectionHeader)
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// An imperative scroll-to request against a [`crate::ScrollHost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollRequest {
    /// Flat index of the target slot.
    pub index: usize,
    pub align: Align,
    pub animated: bool,
}

impl ScrollRequest {
    /// The request the alpha rail issues: header at the top of the viewport, animated.
    pub fn section_jump(index: usize) -> Self {
        Self {
            index,
            align: Align::Start,
            animated: true,
        }
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// A slot the host should lay out for the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    /// Start offset in the scroll axis (includes `padding_start`).
    pub start: u64,
    pub size: u32,
    pub item_type: ItemType,
    /// `true` when this is the sticky header drawn at the top of the viewport rather than at
    /// its own offset.
    pub pinned: bool,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.size as u64)
    }
}
