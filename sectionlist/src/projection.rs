use alloc::string::String;
use alloc::vec::Vec;

use crate::key::TitleIndexMap;
use crate::{ItemType, Section};

/// One addressable slot of a flattened section list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlatEntry<T> {
    Header(String),
    Row(T),
}

impl<T> FlatEntry<T> {
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Header(_) => ItemType::SectionHeader,
            Self::Row(_) => ItemType::Row,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }

    pub fn as_header(&self) -> Option<&str> {
        match self {
            Self::Header(title) => Some(title),
            Self::Row(_) => None,
        }
    }

    pub fn as_row(&self) -> Option<&T> {
        match self {
            Self::Header(_) => None,
            Self::Row(item) => Some(item),
        }
    }
}

/// Sections flattened into `[Header, Row*, Header, Row*, ...]`.
///
/// Every header's flat index is recorded twice: by title (for scroll targeting) and in section
/// order (the sticky index set handed to the list host).
#[derive(Clone, Debug)]
pub struct Projection<T> {
    flat: Vec<FlatEntry<T>>,
    header_index_of: TitleIndexMap,
    sticky_indices: Vec<usize>,
}

impl<T> Default for Projection<T> {
    fn default() -> Self {
        Self {
            flat: Vec::new(),
            header_index_of: TitleIndexMap::new(),
            sticky_indices: Vec::new(),
        }
    }
}

/// Flattens `sections` in order. O(total items).
pub fn project<T: Clone>(sections: &[Section<T>]) -> Projection<T> {
    let rows: usize = sections.iter().map(Section::len).sum();
    let mut flat = Vec::with_capacity(rows + sections.len());
    let mut header_index_of = TitleIndexMap::new();
    let mut sticky_indices = Vec::with_capacity(sections.len());

    for section in sections {
        let at = flat.len();
        // First header wins if titles ever repeat.
        if header_index_of.contains_key(&section.title) {
            vwarn!(title = %section.title, at, "project: repeated section title");
        } else {
            header_index_of.insert(section.title.clone(), at);
        }
        sticky_indices.push(at);
        flat.push(FlatEntry::Header(section.title.clone()));
        flat.extend(section.items.iter().cloned().map(FlatEntry::Row));
    }

    vtrace!(
        sections = sections.len(),
        entries = flat.len(),
        "project"
    );
    Projection {
        flat,
        header_index_of,
        sticky_indices,
    }
}

impl<T> Projection<T> {
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    pub fn entries(&self) -> &[FlatEntry<T>] {
        &self.flat
    }

    pub fn entry(&self, index: usize) -> Option<&FlatEntry<T>> {
        self.flat.get(index)
    }

    pub fn item_type(&self, index: usize) -> Option<ItemType> {
        self.flat.get(index).map(FlatEntry::item_type)
    }

    /// Flat indexes of the header entries, ascending, one per section.
    pub fn sticky_indices(&self) -> &[usize] {
        &self.sticky_indices
    }

    pub fn section_count(&self) -> usize {
        self.sticky_indices.len()
    }

    /// Flat index of the header titled `title`.
    pub fn header_index(&self, title: &str) -> Option<usize> {
        self.header_index_of.get(title).copied()
    }

    /// Flat index of the header of the `section`-th section.
    pub fn section_header_index(&self, section: usize) -> Option<usize> {
        self.sticky_indices.get(section).copied()
    }

    /// The section that owns the slot at `index` (a header owns itself).
    pub fn section_of(&self, index: usize) -> Option<usize> {
        if index >= self.flat.len() {
            return None;
        }
        // Headers are sorted; the owning header is the last one at or before `index`.
        let after = self.sticky_indices.partition_point(|&h| h <= index);
        after.checked_sub(1)
    }

    /// Title of the `section`-th section.
    pub fn section_title(&self, section: usize) -> Option<&str> {
        let at = self.section_header_index(section)?;
        self.flat.get(at)?.as_header()
    }

    /// Rows in flat order, skipping headers.
    pub fn rows(&self) -> impl Iterator<Item = &T> + '_ {
        self.flat.iter().filter_map(FlatEntry::as_row)
    }
}
