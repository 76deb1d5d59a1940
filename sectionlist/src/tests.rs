use crate::*;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Person {
    key: String,
    name: String,
    codes: Vec<String>,
}

impl Record for Person {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn stable_key(&self) -> &str {
        &self.key
    }

    fn for_each_search_field(&self, f: &mut dyn FnMut(&str)) {
        f(&self.name);
        for code in &self.codes {
            f(code);
        }
    }
}

fn person(name: &str) -> Person {
    Person {
        key: name.to_lowercase(),
        name: name.to_string(),
        codes: Vec::new(),
    }
}

fn people(names: &[&str]) -> Vec<Person> {
    names.iter().map(|n| person(n)).collect()
}

fn names<R: Record>(records: &[R]) -> Vec<&str> {
    records.iter().map(|r| r.display_name()).collect()
}

fn titles<T>(sections: &[Section<T>]) -> Vec<&str> {
    sections.iter().map(|s| s.title.as_str()).collect()
}

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() >> 33) as usize % (end_exclusive - start)
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[self.gen_range_usize(0, options.len())]
    }
}

fn random_people(rng: &mut Lcg, n: usize) -> Vec<Person> {
    const FIRST: &[&str] = &["A", "a", "B", "É", "e", "E", "Z", "ñ", "", "Ö", "1"];
    const REST: &[&str] = &["lice", "nna", "ob", "va", "", "rik", "oë"];
    (0..n)
        .map(|i| {
            let name = [rng.pick(FIRST), rng.pick(REST)].concat();
            Person {
                key: i.to_string(),
                name,
                codes: Vec::new(),
            }
        })
        .collect()
}

#[test]
fn groups_by_leading_character_with_stable_item_order() {
    let records = people(&["Alice", "Bob", "Anna"]);
    let sections = group(&records, LeadingKey::Raw);

    assert_eq!(titles(&sections), ["A", "B"]);
    assert_eq!(names(&sections[0].items), ["Alice", "Anna"]);
    assert_eq!(names(&sections[1].items), ["Bob"]);
}

#[test]
fn projection_interleaves_headers_and_rows() {
    let records = people(&["Alice", "Bob", "Anna"]);
    let projection = project(&group(&records, LeadingKey::Raw));

    let flat: Vec<String> = projection
        .entries()
        .iter()
        .map(|e| match e {
            FlatEntry::Header(title) => ["#", title.as_str()].concat(),
            FlatEntry::Row(r) => r.name.clone(),
        })
        .collect();
    assert_eq!(flat, ["#A", "Alice", "Anna", "#B", "Bob"]);
    assert_eq!(projection.sticky_indices(), [0, 3]);
    assert_eq!(projection.header_index("A"), Some(0));
    assert_eq!(projection.header_index("B"), Some(3));
    assert_eq!(projection.header_index("C"), None);
}

#[test]
fn records_without_a_name_are_not_grouped() {
    let records = people(&["", "Bob", "", "bea"]);
    let sections = group(&records, LeadingKey::Raw);
    assert_eq!(titles(&sections), ["b", "B"]);
    assert_eq!(sections.iter().map(Section::len).sum::<usize>(), 2);
    assert!(group(&people(&["", ""]), LeadingKey::Raw).is_empty());
}

#[test]
fn uppercase_policy_folds_case_into_one_section() {
    let records = people(&["anna", "Alice", "bob", "Émile", "éa"]);
    let sections = group(&records, LeadingKey::Uppercase);
    assert_eq!(titles(&sections), ["A", "B", "É"]);
    assert_eq!(names(&sections[0].items), ["anna", "Alice"]);
    assert_eq!(names(&sections[2].items), ["Émile", "éa"]);

    assert_eq!(letters(&records, LeadingKey::Uppercase), ["A", "B", "É"]);
    assert_eq!(letters(&records, LeadingKey::Raw), ["a", "A", "b", "é", "É"]);
}

#[test]
fn leading_key_keeps_combining_marks_with_their_base() {
    assert_eq!(leading_key("e\u{301}clair", LeadingKey::Raw).as_deref(), Some("e\u{301}"));
    assert_eq!(leading_key("", LeadingKey::Raw), None);
    assert_eq!(leading_key("ß", LeadingKey::Uppercase).as_deref(), Some("SS"));
}

#[test]
fn owned_items_group_through_their_indices() {
    let owned = people(&["bob", "Alice", "anna"]);
    let sections = group_by(0..owned.len(), LeadingKey::Uppercase, |&i| {
        owned[i].name.as_str()
    });
    assert_eq!(titles(&sections), ["A", "B"]);
    assert_eq!(sections[0].items, [1, 2]);
    assert_eq!(sections[1].items, [0]);
}

#[test]
fn locale_cmp_orders_base_letters_before_accents_and_case() {
    assert_eq!(locale_cmp("a", "B"), Ordering::Less);
    assert_eq!(locale_cmp("e", "é"), Ordering::Less);
    assert_eq!(locale_cmp("é", "f"), Ordering::Less);
    assert_eq!(locale_cmp("a", "A"), Ordering::Less);
    assert_eq!(locale_cmp("Zoë", "Zoe"), Ordering::Greater);
    assert_eq!(locale_cmp("same", "same"), Ordering::Equal);

    let mut words = ["Zürich", "zebra", "Ångström", "apple", "Österreich", "orange"];
    words.sort_by(|a, b| locale_cmp(a, b));
    assert_eq!(
        words,
        ["Ångström", "apple", "orange", "Österreich", "zebra", "Zürich"]
    );
}

#[test]
fn property_grouping_is_deterministic_and_total() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let n = rng.gen_range_usize(0, 40);
        let records = random_people(&mut rng, n);

        let first = group(&records, LeadingKey::Raw);
        let second = group(&records, LeadingKey::Raw);
        assert_eq!(first, second);

        for pair in first.windows(2) {
            assert_eq!(locale_cmp(&pair[0].title, &pair[1].title), Ordering::Less);
        }

        let named: Vec<&str> = records
            .iter()
            .filter(|r| !r.name.is_empty())
            .map(|r| r.key.as_str())
            .collect();
        let mut grouped: Vec<&str> = first
            .iter()
            .flat_map(|s| s.items.iter().map(|r| r.key.as_str()))
            .collect();
        assert_eq!(grouped.len(), named.len());
        for section in &first {
            for r in &section.items {
                assert_eq!(
                    leading_key(&r.name, LeadingKey::Raw).as_deref(),
                    Some(section.title.as_str())
                );
            }
            // Encounter order survives inside a section.
            let keys: Vec<usize> = section.items.iter().map(|r| r.key.parse().unwrap()).collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }
        grouped.sort_unstable();
        let mut expected = named.clone();
        expected.sort_unstable();
        assert_eq!(grouped, expected);
    }
}

#[test]
fn property_projection_round_trip() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let n = rng.gen_range_usize(0, 60);
        let records = random_people(&mut rng, n);
        let sections = group(&records, LeadingKey::Uppercase);
        let projection = project(&sections);

        let rows: usize = sections.iter().map(Section::len).sum();
        assert_eq!(projection.len(), rows + sections.len());
        assert_eq!(
            projection.entries().iter().filter(|e| e.is_header()).count(),
            sections.len()
        );
        assert_eq!(projection.section_count(), sections.len());

        for (i, section) in sections.iter().enumerate() {
            let at = projection.header_index(&section.title).unwrap();
            assert_eq!(projection.entry(at).and_then(FlatEntry::as_header), Some(section.title.as_str()));
            assert_eq!(projection.section_header_index(i), Some(at));
            assert_eq!(projection.section_title(i), Some(section.title.as_str()));
            for offset in 0..=section.len() {
                assert_eq!(projection.section_of(at + offset), Some(i));
            }
        }
        assert_eq!(projection.section_of(projection.len()), None);
        assert_eq!(projection.rows().count(), rows);
    }
}

#[test]
fn empty_projection_is_well_defined() {
    let projection = project::<&Person>(&[]);
    assert!(projection.is_empty());
    assert!(projection.sticky_indices().is_empty());
    assert_eq!(projection.section_of(0), None);
    assert_eq!(projection.section_title(0), None);
}

#[test]
fn search_matches_approximately_and_keeps_identity_for_empty_query() {
    let records = people(&["Alice", "Bob", "Anna"]);
    let mut index = SearchIndex::new();

    assert_eq!(names(&index.search(Some("bo"), &records)), ["Bob"]);
    assert_eq!(names(&index.search(Some(""), &records)), ["Alice", "Bob", "Anna"]);
    assert_eq!(names(&index.search(None, &records)), ["Alice", "Bob", "Anna"]);
    assert!(index.search(Some("zzz"), &records).is_empty());
    assert!(index.search::<Person>(Some("bo"), &[]).is_empty());
}

#[test]
fn search_tolerates_typos_and_ranks_closer_matches_first() {
    let records = people(&["Rob Boyd", "Germany", "Bob"]);
    let mut index = SearchIndex::new();

    assert_eq!(names(&index.search(Some("germny"), &records)), ["Germany"]);
    assert_eq!(names(&index.search(Some("GERMANY"), &records)), ["Germany"]);
    assert_eq!(names(&index.search(Some("bo"), &records)), ["Bob", "Rob Boyd"]);

    let strict = &mut SearchIndex::new().with_options(SearchOptions::default().with_threshold(0.0));
    assert!(strict.search(Some("germny"), &records).is_empty());
}

#[test]
fn search_matches_secondary_codes() {
    let mut records = people(&["Germany", "France"]);
    records[0].codes = ["DE", "49"].map(String::from).to_vec();
    records[1].codes = ["FR", "33"].map(String::from).to_vec();

    let mut index = SearchIndex::new();
    assert_eq!(names(&index.search(Some("33"), &records)), ["France"]);
    assert_eq!(names(&index.search(Some("de"), &records)), ["Germany"]);
    assert_eq!(index.search_indices(Some("fr"), &records), [1]);
}

#[test]
fn property_empty_query_is_identity() {
    let mut rng = Lcg::new(7);
    let mut index = SearchIndex::new();
    for _ in 0..50 {
        let n = rng.gen_range_usize(1, 30);
        let records = random_people(&mut rng, n);
        let all = index.search(Some(""), &records);
        assert_eq!(all.len(), records.len());
        assert!(all.iter().zip(&records).all(|(a, b)| core::ptr::eq(*a, b)));
    }
}

#[test]
fn manual_refresh_keeps_the_first_corpus_until_rebuilt() {
    let first = people(&["Alice", "Bob"]);
    let second = people(&["Carl", "Dora"]);
    let mut index = SearchIndex::new().with_refresh(IndexRefresh::Manual);

    assert!(!index.is_built());
    assert_eq!(names(&index.search(Some("bo"), &first)), ["Bob"]);
    assert!(index.is_built());

    // Stale: matches are computed against `first` and mapped onto `second`.
    assert_eq!(names(&index.search(Some("bo"), &second)), ["Dora"]);

    index.rebuild(&second);
    assert!(index.search(Some("bo"), &second).is_empty());
    assert_eq!(names(&index.search(Some("carl"), &second)), ["Carl"]);

    index.invalidate();
    assert!(!index.is_built());
}

#[test]
fn auto_refresh_rebuilds_when_records_change() {
    let first = people(&["Alice", "Bob"]);
    let second = people(&["Carl", "Dora", "Boris"]);
    let mut index = SearchIndex::new();

    assert_eq!(names(&index.search(Some("bo"), &first)), ["Bob"]);
    assert_eq!(index.indexed_len(), 2);
    assert_eq!(names(&index.search(Some("bo"), &second)), ["Boris"]);
    assert_eq!(index.indexed_len(), 3);
}

#[test]
fn matches_far_from_the_start_fall_outside_the_distance() {
    let records = people(&["South Georgia and the South Sandwich Islands", "Iceland"]);
    let mut index = SearchIndex::new();
    assert!(index.search(Some("islands"), &records).is_empty());

    let mut wide = SearchIndex::new()
        .with_options(SearchOptions::default().with_location(0, 1000));
    assert_eq!(
        names(&wide.search(Some("islands"), &records)),
        ["South Georgia and the South Sandwich Islands"]
    );

    let mut anchored = SearchIndex::new()
        .with_options(SearchOptions::default().with_location(38, 10));
    assert_eq!(anchored.search_indices(Some("islands"), &records), [0]);
    assert!(anchored.search(Some("iceland"), &records).is_empty());
}

#[test]
fn long_queries_are_truncated() {
    let x32 = "x".repeat(32);
    let records = people(&[x32.as_str()]);
    let query = [x32.as_str(), "yyyyyyyyyyyyyyyyyyyy"].concat();

    let mut index = SearchIndex::new();
    assert_eq!(index.search_indices(Some(query.as_str()), &records), [0]);

    let mut untruncated = SearchIndex::new().with_options(SearchOptions {
        max_pattern_len: 64,
        ..SearchOptions::default()
    });
    assert!(untruncated.search(Some(query.as_str()), &records).is_empty());
}

#[test]
fn short_queries_below_min_match_len_match_nothing() {
    let records = people(&["Bob", "Bobby"]);
    let mut index = SearchIndex::new().with_options(SearchOptions {
        min_match_char_len: 3,
        ..SearchOptions::default()
    });
    assert!(index.search(Some("bo"), &records).is_empty());
    assert_eq!(names(&index.search(Some("bob"), &records)), ["Bob", "Bobby"]);
    assert_eq!(names(&index.search(Some(""), &records)), ["Bob", "Bobby"]);
}

#[test]
fn case_sensitive_search_respects_case() {
    let records = people(&["Bob", "bob"]);
    let mut folded = SearchIndex::new();
    assert_eq!(folded.search_indices(Some("BOB"), &records), [0, 1]);

    let mut exact = SearchIndex::new()
        .with_options(SearchOptions::default().with_ignore_case(false));
    assert!(exact.search(Some("BOB"), &records).is_empty());
    assert_eq!(exact.search_indices(Some("bob"), &records), [1]);
    assert_eq!(exact.search_indices(Some("Bob"), &records), [0]);
}

#[test]
fn host_binding_exposes_keys_types_and_render_slots() {
    let records = people(&["Alice", "Bob", "Anna"]);
    let projection = project(&group(&records, LeadingKey::Raw));
    let binding = HostBinding::new(&projection, |r: &&Person| r.key.clone());

    assert_eq!(binding.len(), 5);
    assert_eq!(binding.key_at(0).as_deref(), Some("header-A-0"));
    assert_eq!(binding.key_at(1).as_deref(), Some("alice"));
    assert_eq!(binding.key_at(3).as_deref(), Some("header-B-3"));
    assert_eq!(binding.key_at(5), None);
    assert_eq!(binding.item_type_at(0).map(ItemType::as_str), Some("sectionHeader"));
    assert_eq!(binding.item_type_at(4).map(ItemType::as_str), Some("row"));
    assert_eq!(binding.sticky_indices(), [0, 3]);

    let render = |i| binding.render(i, |r| r.name.clone(), |t| ["[", t, "]"].concat());
    assert_eq!(render(0).as_deref(), Some("[A]"));
    assert_eq!(render(2).as_deref(), Some("Anna"));
    assert_eq!(render(9), None);

    let hidden = HostBinding::new(&projection, |r: &&Person| r.key.clone()).with_headers(false);
    assert_eq!(hidden.len(), 5);
    assert_eq!(hidden.render(0, |r| r.name.clone(), |t| t.to_string()), None);
    assert_eq!(hidden.render(1, |r| r.name.clone(), |t| t.to_string()).as_deref(), Some("Alice"));
    assert_eq!(hidden.key_at(3).as_deref(), Some("header-B-3"));
}

#[test]
fn resolve_section_header_misses_on_stale_titles() {
    let records = people(&["Alice", "Bob"]);
    let projection = project(&group(&records, LeadingKey::Raw));

    assert_eq!(resolve_section_header(&["A", "B"], 1, &projection), Ok(2));
    assert_eq!(
        resolve_section_header::<_, &str>(&[], 0, &projection),
        Err(ScrollMiss::NoSections)
    );
    assert_eq!(
        resolve_section_header(&["A", "B"], 2, &projection),
        Err(ScrollMiss::SectionOutOfRange { index: 2, count: 2 })
    );
    assert_eq!(
        resolve_section_header(&["A", "C"], 1, &projection),
        Err(ScrollMiss::HeaderNotFound {
            title: "C".to_string()
        })
    );
}

fn bound_list(records: &[Person], with_headers: bool) -> VirtualList {
    let projection = project(&group(records, LeadingKey::Raw));
    let binding =
        HostBinding::new(&projection, |r: &&Person| r.key.clone()).with_headers(with_headers);
    let mut list = VirtualList::new(ListOptions::new(2, 3));
    list.bind(&binding);
    list
}

fn five_people() -> Vec<Person> {
    people(&["Alice", "Anna", "Bob", "Bea", "Carl"])
}

#[test]
fn virtual_list_lays_out_headers_and_rows() {
    // [#A, Alice, Anna, #B, Bob, Bea, #C, Carl]
    let mut list = bound_list(&five_people(), true);
    assert_eq!(list.len(), 8);
    assert_eq!(list.header_indices(), [0, 3, 6]);
    assert_eq!(list.total_size(), 21);
    assert_eq!(list.item_start(3), Some(8));
    assert_eq!(list.key_for(6), Some("header-C-6"));

    list.set_viewport_size(6);
    assert!(list.scroll_to(ScrollRequest::section_jump(3)));
    assert_eq!(list.scroll_offset(), 8);
    assert_eq!(
        list.visible_range(),
        VirtualRange {
            start_index: 3,
            end_index: 6
        }
    );
    let visible = list.visible_range();
    assert_eq!(visible.len(), 3);
    assert!(visible.contains(3) && visible.contains(5));
    assert!(!visible.contains(2) && !visible.contains(6));
    assert_eq!(list.section_at_top(), Some(1));
    assert_eq!(list.pinned_header(), None);

    // Past the end clamps to the max scroll offset.
    list.scroll_to_index(6, Align::Start);
    assert_eq!(list.scroll_offset(), 15);
    assert!(!list.scroll_to(ScrollRequest::section_jump(8)));
    assert_eq!(list.scroll_offset(), 15);
}

#[test]
fn virtual_list_pins_the_current_section_header() {
    let mut list = bound_list(&five_people(), true);
    list.set_viewport_and_scroll_clamped(6, 11);
    assert_eq!(list.pinned_header(), Some(3));

    let mut items = Vec::new();
    list.collect_virtual_items(&mut items);
    let indexes: Vec<usize> = items.iter().map(|it| it.index).collect();
    assert_eq!(indexes, [3, 4, 5, 6, 7]);
    assert!(items[0].pinned);
    assert_eq!(items[0].start, 11);
    assert_eq!(items[0].item_type, ItemType::SectionHeader);
    assert!(items[1..].iter().all(|it| !it.pinned));

    list.set_options(ListOptions::new(2, 3).with_overscan(0));
    list.collect_virtual_items(&mut items);
    let indexes: Vec<usize> = items.iter().map(|it| it.index).collect();
    assert_eq!(indexes, [3, 4, 5, 6]);

    list.set_options(ListOptions::new(2, 3).with_sticky_headers(false));
    assert_eq!(list.pinned_header(), None);
}

#[test]
fn hidden_headers_keep_their_slots() {
    let mut list = bound_list(&five_people(), false);
    assert_eq!(list.len(), 8);
    assert_eq!(list.total_size(), 15);
    assert_eq!(list.item_size(3), Some(0));
    assert_eq!(list.item_start(3), Some(6));
    assert_eq!(list.item_start(4), Some(6));

    list.set_viewport_size(6);
    assert!(list.scroll_to(ScrollRequest::section_jump(3)));
    assert_eq!(list.scroll_offset(), 6);
    assert_eq!(list.section_at_top(), Some(1));
    assert_eq!(list.pinned_header(), None);
    assert_eq!(list.measure(3, 10), 0);
    assert_eq!(list.total_size(), 15);

    list.set_headers_visible(true);
    assert_eq!(list.total_size(), 21);
}

#[test]
fn measurements_adjust_scroll_and_follow_keys() {
    let records = five_people();
    let mut list = bound_list(&records, true);
    list.set_viewport_size(6);
    list.scroll_to_index(3, Align::Start);
    assert_eq!(list.scroll_offset(), 8);

    // Alice sits above the viewport: the offset follows so the content does not jump.
    assert_eq!(list.measure(1, 5), 2);
    assert_eq!(list.scroll_offset(), 10);
    assert_eq!(list.total_size(), 23);
    assert!(list.is_measured(1));

    // Below the viewport: no adjustment.
    assert_eq!(list.measure(7, 4), 0);
    assert_eq!(list.scroll_offset(), 10);

    // Filter Anna out; Alice keeps her measured size at her new index.
    let filtered: Vec<Person> = records.iter().filter(|p| p.name != "Anna").cloned().collect();
    let projection = project(&group(&filtered, LeadingKey::Raw));
    list.bind(&HostBinding::new(&projection, |r: &&Person| r.key.clone()));
    assert_eq!(list.len(), 7);
    assert_eq!(list.item_size(1), Some(5));
    assert!(list.is_measured(1));
    assert!(!list.is_measured(2));

    list.reset_measurements();
    assert_eq!(list.item_size(1), Some(3));
}

#[test]
fn unbound_measurements_are_forgotten() {
    let records = five_people();
    let mut list = bound_list(&records, true);
    assert_eq!(list.measure(2, 7), 0);
    assert_eq!(list.measure(3, 4), 0);
    assert_eq!(list.measure(4, 6), 0);

    // Drop Anna: her size and the old "header-B-3" key go away, Bob's survives.
    let filtered: Vec<Person> = records.iter().filter(|p| p.name != "Anna").cloned().collect();
    let projection = project(&group(&filtered, LeadingKey::Raw));
    list.bind(&HostBinding::new(&projection, |r: &&Person| r.key.clone()));
    assert_eq!(list.key_for(3), Some("bob"));
    assert_eq!(list.item_size(3), Some(6));

    let projection = project(&group(&records, LeadingKey::Raw));
    list.bind(&HostBinding::new(&projection, |r: &&Person| r.key.clone()));
    assert!(!list.is_measured(2));
    assert_eq!(list.item_size(2), Some(3));
    assert!(!list.is_measured(3));
    assert_eq!(list.item_size(3), Some(2));
    assert!(list.is_measured(4));
    assert_eq!(list.item_size(4), Some(6));
}

#[test]
fn align_variants_place_the_target() {
    let mut list = bound_list(&five_people(), true);
    list.set_viewport_size(6);

    // Bob: start 10, size 3.
    assert_eq!(list.scroll_to_index_offset(4, Align::Start), 10);
    assert_eq!(list.scroll_to_index_offset(4, Align::End), 7);
    assert_eq!(list.scroll_to_index_offset(4, Align::Center), 8);
    list.set_scroll_offset(9);
    assert_eq!(list.scroll_to_index_offset(4, Align::Auto), 9);
    list.set_scroll_offset(0);
    assert_eq!(list.scroll_to_index_offset(4, Align::Auto), 7);

    let padded = {
        let mut l = list.clone();
        l.set_options(ListOptions::new(2, 3).with_scroll_padding(1, 0));
        l
    };
    assert_eq!(padded.scroll_to_index_offset(4, Align::Start), 9);
}

#[test]
fn empty_list_is_inert() {
    let mut list = VirtualList::default();
    list.set_viewport_size(10);
    assert!(list.visible_range().is_empty());
    assert_eq!(list.index_at_offset(3), None);
    assert_eq!(list.section_at_top(), None);
    assert_eq!(list.pinned_header(), None);
    assert_eq!(list.scroll_to_index_offset(0, Align::Start), 0);
    assert!(!list.scroll_to(ScrollRequest::section_jump(0)));
    let mut items = Vec::new();
    list.collect_virtual_items(&mut items);
    assert!(items.is_empty());
}
