use std::sync::Arc;

use sectionlist::{LeadingKey, ListOptions, SearchOptions};

use crate::{Easing, SampleDedup};

pub type SectionChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Configuration for [`crate::SectionedList`].
#[derive(Clone)]
pub struct SectionedListOptions {
    /// Shows the alpha index rail (while no query is active).
    pub with_alpha_filter: bool,
    /// When `false`, header slots stay in the list but render nothing and take no space.
    pub with_headers: bool,
    pub leading_key: LeadingKey,
    pub dedup: SampleDedup,
    pub list: ListOptions,
    pub search: SearchOptions,

    /// Duration of an animated section jump; `0` jumps immediately.
    pub scroll_duration_ms: u64,
    pub easing: Easing,

    /// Called with the section title after a rail dispatch scrolled the list.
    pub on_section_change: Option<SectionChangeCallback>,
}

impl Default for SectionedListOptions {
    fn default() -> Self {
        Self {
            with_alpha_filter: true,
            with_headers: true,
            leading_key: LeadingKey::Raw,
            dedup: SampleDedup::EverySample,
            list: ListOptions::default(),
            search: SearchOptions::default(),
            scroll_duration_ms: 250,
            easing: Easing::EaseOutCubic,
            on_section_change: None,
        }
    }
}

impl core::fmt::Debug for SectionedListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionedListOptions")
            .field("with_alpha_filter", &self.with_alpha_filter)
            .field("with_headers", &self.with_headers)
            .field("leading_key", &self.leading_key)
            .field("dedup", &self.dedup)
            .field("list", &self.list)
            .field("search", &self.search)
            .field("scroll_duration_ms", &self.scroll_duration_ms)
            .field("easing", &self.easing)
            .field("on_section_change", &self.on_section_change.is_some())
            .finish_non_exhaustive()
    }
}

impl SectionedListOptions {
    pub fn new(list: ListOptions) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn with_alpha_filter(mut self, with_alpha_filter: bool) -> Self {
        self.with_alpha_filter = with_alpha_filter;
        self
    }

    pub fn with_headers(mut self, with_headers: bool) -> Self {
        self.with_headers = with_headers;
        self
    }

    pub fn with_leading_key(mut self, leading_key: LeadingKey) -> Self {
        self.leading_key = leading_key;
        self
    }

    pub fn with_dedup(mut self, dedup: SampleDedup) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_search(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_scroll_animation(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.scroll_duration_ms = duration_ms;
        self.easing = easing;
        self
    }

    pub fn with_on_section_change(
        mut self,
        f: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.on_section_change = Some(Arc::new(f));
        self
    }
}
