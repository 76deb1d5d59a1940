use std::string::{String, ToString};
use std::vec::Vec;

use sectionlist::{
    HostBinding, IndexRefresh, ItemType, Projection, Record, ScrollHost, ScrollMiss,
    ScrollRequest, SearchIndex, Section, VirtualList, group_by, project, resolve_section_header,
};

use crate::{AlphaRail, RailEvent, ScrollTween, SectionedListOptions};

/// A framework-neutral controller for an alphabetically sectioned, searchable list.
///
/// It owns the records and recomputes the whole pipeline (search, grouping, projection, slot
/// layout) whenever the records or the query change. The rail, the virtual list and the
/// projection are therefore always built from the same data.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `on_rail_event` for rail layout and pointer input
/// - `tick(now_ms)` each frame while [`Self::is_animating`]
///
/// and render the slots yielded by `list().for_each_virtual_item`.
pub struct SectionedList<R> {
    options: SectionedListOptions,
    records: Vec<R>,
    query: String,
    index: SearchIndex,

    sections: Vec<Section<usize>>,
    titles: Vec<String>,
    projection: Projection<usize>,

    list: VirtualList,
    rail: AlphaRail,
    tween: Option<ScrollTween>,
    clock_ms: u64,
}

impl<R> core::fmt::Debug for SectionedList<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionedList")
            .field("records", &self.records.len())
            .field("query", &self.query)
            .field("titles", &self.titles)
            .field("list", &self.list)
            .field("rail", &self.rail)
            .field("tween", &self.tween)
            .finish_non_exhaustive()
    }
}

impl<R: Record> SectionedList<R> {
    pub fn new(records: Vec<R>, options: SectionedListOptions) -> Self {
        let index = SearchIndex::new()
            .with_options(options.search)
            .with_refresh(IndexRefresh::Manual);
        let mut this = Self {
            list: VirtualList::new(options.list),
            rail: AlphaRail::new(0).with_dedup(options.dedup),
            options,
            records: Vec::new(),
            query: String::new(),
            index,
            sections: Vec::new(),
            titles: Vec::new(),
            projection: Projection::default(),
            tween: None,
            clock_ms: 0,
        };
        this.set_records(records);
        this
    }

    pub fn options(&self) -> &SectionedListOptions {
        &self.options
    }

    /// Replaces the record set and rebuilds the search corpus from it.
    pub fn set_records(&mut self, records: Vec<R>) {
        self.records = records;
        self.index.rebuild(&self.records);
        self.recompute();
    }

    /// Sets the search query; an empty query shows every record.
    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query.clear();
        self.query.push_str(query);
        self.recompute();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    fn recompute(&mut self) {
        self.tween = None;
        let records = &self.records;
        let hits = self.index.search_indices(Some(&self.query), records);
        self.sections = group_by(hits, self.options.leading_key, |&i| {
            records[i].display_name()
        });
        self.titles = self.sections.iter().map(|s| s.title.clone()).collect();
        self.projection = project(&self.sections);

        let binding = bind(&self.projection, records, self.options.with_headers);
        self.list.bind(&binding);
        self.rail.set_section_count(self.titles.len());
        vdebug!(
            query = %self.query,
            sections = self.titles.len(),
            slots = self.list.len(),
            "SectionedList::recompute"
        );
    }

    /// Sections currently shown, holding positions into [`Self::records`].
    pub fn sections(&self) -> &[Section<usize>] {
        &self.sections
    }

    /// Rail labels, in section order.
    pub fn section_titles(&self) -> &[String] {
        &self.titles
    }

    pub fn projection(&self) -> &Projection<usize> {
        &self.projection
    }

    pub fn list(&self) -> &VirtualList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut VirtualList {
        &mut self.list
    }

    pub fn rail(&self) -> &AlphaRail {
        &self.rail
    }

    /// The record shown at flat slot `index`, if that slot is a row.
    pub fn record(&self, index: usize) -> Option<&R> {
        let &i = self.projection.entry(index)?.as_row()?;
        self.records.get(i)
    }

    pub fn key_at(&self, index: usize) -> Option<String> {
        bind(&self.projection, &self.records, self.options.with_headers).key_at(index)
    }

    pub fn item_type_at(&self, index: usize) -> Option<ItemType> {
        self.projection.item_type(index)
    }

    pub fn sticky_indices(&self) -> &[usize] {
        self.projection.sticky_indices()
    }

    /// Renders slot `index` with the caller's row and header renderers.
    ///
    /// Header slots render `None` when headers are disabled.
    pub fn render<V>(
        &self,
        index: usize,
        render_item: impl FnOnce(&R) -> V,
        render_section_header: impl FnOnce(&str) -> V,
    ) -> Option<V> {
        bind(&self.projection, &self.records, self.options.with_headers).render(
            index,
            |&i| render_item(&self.records[i]),
            render_section_header,
        )
    }

    /// Whether the alpha rail should be shown: enabled, no active query, something to index.
    pub fn rail_visible(&self) -> bool {
        self.options.with_alpha_filter && self.query.is_empty() && !self.titles.is_empty()
    }

    /// Feeds a rail event and performs the resulting section jump, if any.
    ///
    /// Returns `true` when the list was scrolled.
    pub fn on_rail_event(&mut self, event: RailEvent, now_ms: u64) -> bool {
        self.clock_ms = now_ms;
        let Some(section) = self.rail.handle(event) else {
            return false;
        };
        if !self.rail_visible() {
            vdebug!(section, "SectionedList: rail hidden, dispatch ignored");
            return false;
        }
        self.scroll_to_section(section, now_ms)
    }

    /// A tap on the `index`-th rail label.
    pub fn press_label(&mut self, index: usize, now_ms: u64) -> bool {
        self.on_rail_event(RailEvent::LabelPress(index), now_ms)
    }

    /// Scrolls to the header of the `section`-th section.
    ///
    /// A section that cannot be resolved is logged and dropped.
    pub fn scroll_to_section(&mut self, section: usize, now_ms: u64) -> bool {
        match self.try_scroll_to_section(section, now_ms) {
            Ok(_) => true,
            Err(_miss) => {
                vdebug!(section, error = %_miss, "SectionedList: scroll dropped");
                false
            }
        }
    }

    /// Like [`Self::scroll_to_section`], reporting why a jump was dropped.
    ///
    /// On success returns the header's flat index and notifies `on_section_change`.
    pub fn try_scroll_to_section(
        &mut self,
        section: usize,
        now_ms: u64,
    ) -> Result<usize, ScrollMiss> {
        self.clock_ms = now_ms;
        let header = resolve_section_header(&self.titles, section, &self.projection)?;
        if !self.scroll_to(ScrollRequest::section_jump(header)) {
            return Err(ScrollMiss::HeaderNotFound {
                title: self.titles[section].clone(),
            });
        }
        if let Some(on_section_change) = &self.options.on_section_change {
            on_section_change(&self.titles[section]);
        }
        Ok(header)
    }

    /// Scrolls to the section titled `title`.
    pub fn scroll_to_letter(&mut self, title: &str, now_ms: u64) -> bool {
        match self.titles.iter().position(|t| t == title) {
            Some(section) => self.scroll_to_section(section, now_ms),
            None => {
                vdebug!(title, "SectionedList: no such section");
                false
            }
        }
    }

    /// Jumps, without animation, to the first section. Does nothing while a query is active.
    ///
    /// Call this when the search field gains focus.
    pub fn focus_first_section(&mut self) -> bool {
        if !self.query.is_empty() {
            return false;
        }
        let Some(&header) = self.projection.sticky_indices().first() else {
            return false;
        };
        self.scroll_to(ScrollRequest::section_jump(header).with_animated(false))
    }

    /// Ordinal of the section at the top of the viewport.
    pub fn active_section(&self) -> Option<usize> {
        self.list.section_at_top()
    }

    pub fn active_title(&self) -> Option<&str> {
        self.titles.get(self.active_section()?).map(String::as_str)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    pub fn on_viewport_size(&mut self, viewport_size: u32) {
        self.list.set_viewport_size(viewport_size);
    }

    /// Call this when the UI reports a scroll offset change (e.g. user drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.clock_ms = now_ms;
        self.cancel_animation();
        self.list.set_scroll_offset(scroll_offset);
    }

    /// Records the laid-out size of slot `index`; see [`VirtualList::measure`].
    pub fn measure(&mut self, index: usize, size: u32) -> i64 {
        self.list.measure(index, size)
    }

    /// Advances an active tween and returns the offset to apply to the UI, if any.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        self.clock_ms = now_ms;
        let tween = self.tween?;
        self.list.set_scroll_offset_clamped(tween.sample(now_ms));
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(self.list.scroll_offset())
    }
}

impl<R: Record> ScrollHost for SectionedList<R> {
    /// Animated requests start (or retarget) a tween from the last reported clock; the rest
    /// jump immediately.
    fn scroll_to(&mut self, request: ScrollRequest) -> bool {
        if request.index >= self.list.len() {
            vdebug!(
                index = request.index,
                len = self.list.len(),
                "SectionedList::scroll_to: index out of range"
            );
            return false;
        }
        let to = self.list.scroll_to_index_offset(request.index, request.align);
        let duration_ms = self.options.scroll_duration_ms;
        if !request.animated || duration_ms == 0 {
            self.tween = None;
            self.list.set_scroll_offset(to);
            return true;
        }
        match &mut self.tween {
            Some(tween) => tween.retarget(self.clock_ms, to, duration_ms),
            None => {
                self.tween = Some(ScrollTween::new(
                    self.list.scroll_offset(),
                    to,
                    self.clock_ms,
                    duration_ms,
                    self.options.easing,
                ));
            }
        }
        vtrace!(index = request.index, to, "SectionedList::scroll_to: tween");
        true
    }
}

fn bind<'a, R: Record>(
    projection: &'a Projection<usize>,
    records: &'a [R],
    with_headers: bool,
) -> HostBinding<'a, usize, impl Fn(&usize) -> String + 'a> {
    HostBinding::new(projection, move |&i: &usize| {
        records[i].stable_key().to_string()
    })
    .with_headers(with_headers)
}
