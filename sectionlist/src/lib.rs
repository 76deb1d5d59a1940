//! A headless engine for sectioned, alphabetically indexed lists.
//!
//! For the alpha-index rail, animated scrolling and a ready-made controller, see the
//! `sectionlist-adapter` crate.
//!
//! The pipeline is one-directional and recomputed from scratch whenever the data or the query
//! changes:
//!
//! ```text
//! records ─▶ SearchIndex (optional filter) ─▶ group ─▶ project ─▶ VirtualList / ScrollHost
//! ```
//!
//! - [`group`] buckets records by the leading character of their display name and orders the
//!   sections with a locale-aware comparison.
//! - [`project`] flattens sections into `[Header, Row*, ...]` and records where every header
//!   lands, which is what scroll targeting and sticky headers need.
//! - [`SearchIndex`] (feature `std`) filters records with a typo-tolerant fuzzy matcher.
//! - [`VirtualList`] is a UI-agnostic virtualized list over the flat slots: prefix sums over
//!   slot sizes, visible/overscanned ranges, sticky headers and scroll-to-index.
//!
//! Nothing here holds UI objects; an adapter supplies viewport size, scroll offset and
//! (optionally) measured slot sizes.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod group;
mod host;
mod key;
mod list;
mod options;
mod projection;
mod record;
#[cfg(feature = "std")]
mod search;
mod types;

#[cfg(all(test, feature = "std"))]
mod tests;

pub use error::ScrollMiss;
pub use group::{LeadingKey, Section, group, group_by, leading_key, letters, locale_cmp};
pub use host::{HostBinding, ScrollHost, header_key, resolve_section_header};
pub use key::TitleIndexMap;
pub use list::VirtualList;
pub use options::ListOptions;
pub use projection::{FlatEntry, Projection, project};
pub use record::Record;
#[cfg(feature = "std")]
pub use search::{IndexRefresh, SearchIndex, SearchOptions};
pub use types::{Align, ItemType, ScrollRequest, VirtualItem, VirtualRange};
