use sectionlist::{
    HostBinding, LeadingKey, ListOptions, Record, ScrollHost, ScrollRequest, SearchIndex,
    VirtualList, group, letters, project, resolve_section_header,
};

struct Contact {
    id: String,
    name: String,
}

impl Record for Contact {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn stable_key(&self) -> &str {
        &self.id
    }
}

fn main() {
    let contacts: Vec<Contact> = [
        "zoë", "Émile", "anna", "Bob", "Ana", "élodie", "Carl", "bea", "Øystein", "Dave",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| Contact {
        id: format!("c{i}"),
        name: name.to_string(),
    })
    .collect();

    // Raw keys keep case and accents apart; uppercase keys fold case only.
    println!("raw={:?}", letters(&contacts, LeadingKey::Raw));
    println!("upper={:?}", letters(&contacts, LeadingKey::Uppercase));

    let mut index = SearchIndex::new();
    let hits = index.search(Some("an"), &contacts);
    println!(
        "search(an)={:?}",
        hits.iter().map(|c| c.display_name()).collect::<Vec<_>>()
    );

    let sections = group(&contacts, LeadingKey::Uppercase);
    let projection = project(&sections);
    let binding = HostBinding::new(&projection, |c: &&Contact| c.id.clone());

    let mut list = VirtualList::new(ListOptions::new(1, 2).with_overscan(1));
    list.bind(&binding);
    list.set_viewport_size(6);

    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    let header = resolve_section_header(&titles, 2, &projection).unwrap_or(0);
    list.scroll_to(ScrollRequest::section_jump(header));
    list.set_scroll_offset_clamped(list.scroll_offset() + 1);

    println!(
        "offset={} visible={:?} pinned={:?}",
        list.scroll_offset(),
        list.visible_range(),
        list.pinned_header()
    );
    list.for_each_virtual_item(|item| {
        let key = binding.key_at(item.index).unwrap_or_default();
        println!(
            "{:>3} {:<14} {:<13} pinned={}",
            item.start, key, item.item_type, item.pinned
        );
    });
}
