use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sectionlist::{ListOptions, Record};
use sectionlist_adapter::{RailEvent, RailLayout, SectionedList, SectionedListOptions};

struct Country {
    cca2: &'static str,
    name: &'static str,
    calling_code: &'static str,
}

impl Record for Country {
    fn display_name(&self) -> &str {
        self.name
    }

    fn stable_key(&self) -> &str {
        self.cca2
    }

    fn for_each_search_field(&self, f: &mut dyn FnMut(&str)) {
        f(self.name);
        f(self.cca2);
        f(self.calling_code);
    }
}

const COUNTRIES: &[(&str, &str, &str)] = &[
    ("AR", "Argentina", "54"),
    ("AT", "Austria", "43"),
    ("BE", "Belgium", "32"),
    ("BR", "Brazil", "55"),
    ("CA", "Canada", "1"),
    ("DE", "Germany", "49"),
    ("DK", "Denmark", "45"),
    ("EG", "Egypt", "20"),
    ("ES", "Spain", "34"),
    ("FR", "France", "33"),
    ("IS", "Iceland", "354"),
    ("IT", "Italy", "39"),
    ("JP", "Japan", "81"),
    ("NO", "Norway", "47"),
    ("PT", "Portugal", "351"),
    ("SE", "Sweden", "46"),
    ("US", "United States", "1"),
    ("AX", "Åland Islands", "358"),
];

fn main() {
    // RUST_LOG=sectionlist=debug,sectionlist_adapter=trace with `--features tracing`.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let records: Vec<Country> = COUNTRIES
        .iter()
        .map(|&(cca2, name, calling_code)| Country {
            cca2,
            name,
            calling_code,
        })
        .collect();

    let jumps = Arc::new(AtomicUsize::new(0));
    let options = SectionedListOptions::new(ListOptions::new(24, 48).with_overscan(2))
        .with_on_section_change({
            let jumps = Arc::clone(&jumps);
            move |title: &str| {
                jumps.fetch_add(1, Ordering::Relaxed);
                println!("on_section_change({title})");
            }
        });

    let mut picker = SectionedList::new(records, options);
    picker.on_viewport_size(480);
    println!("rail={:?}", picker.section_titles());

    // The rail is laid out next to the list; a drag from its top to its bottom.
    let rail = RailLayout::new(80.0, 320.0);
    picker.on_rail_event(RailEvent::Layout(rail), 0);
    picker.on_rail_event(RailEvent::PointerDown { y: 90.0 }, 0);
    let mut now_ms = 0u64;
    for y in [150.0, 230.0, 390.0] {
        now_ms += 48;
        picker.on_rail_event(RailEvent::PointerMove { y }, now_ms);
        picker.tick(now_ms);
    }
    picker.on_rail_event(RailEvent::PointerUp, now_ms);

    while picker.is_animating() {
        now_ms += 16;
        if let Some(off) = picker.tick(now_ms) {
            println!("t={now_ms} off={off} top={:?}", picker.active_title());
        }
    }

    let mut frame = Vec::new();
    picker.list().collect_virtual_items(&mut frame);
    for item in &frame {
        let label = picker
            .render(item.index, |c| c.name.to_string(), |t| format!("== {t} =="))
            .unwrap_or_default();
        let pin = if item.pinned { " (pinned)" } else { "" };
        println!("{:>5} {label}{pin}", item.start);
    }

    // Typing into the filter hides the rail.
    picker.set_query("germny");
    println!(
        "query={:?} rail_visible={} rows={:?}",
        picker.query(),
        picker.rail_visible(),
        picker
            .projection()
            .rows()
            .map(|&i| picker.records()[i].name)
            .collect::<Vec<_>>()
    );

    picker.set_query("");
    picker.focus_first_section();
    println!(
        "after focus: off={} jumps={}",
        picker.list().scroll_offset(),
        jumps.load(Ordering::Relaxed)
    );
}
