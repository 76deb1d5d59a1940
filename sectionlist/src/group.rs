use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

use crate::Record;
use crate::key::TitleIndexMap;

/// A titled run of items sharing the same leading character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section<T> {
    pub title: String,
    pub items: Vec<T>,
}

impl<T> Section<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

}

/// How a display name turns into a section title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeadingKey {
    /// The first grapheme cluster, untouched. `"é"` and `"e"` are different sections.
    #[default]
    Raw,
    /// The first grapheme cluster, upper-cased. `"anna"` and `"Alice"` share `"A"`.
    Uppercase,
}

/// Returns the section title for `name`, or `None` when the name is empty.
pub fn leading_key(name: &str, policy: LeadingKey) -> Option<String> {
    let first = name.graphemes(true).next()?;
    Some(match policy {
        LeadingKey::Raw => first.to_string(),
        LeadingKey::Uppercase => first.to_uppercase(),
    })
}

/// Locale-aware string ordering.
///
/// Strings are compared level by level, the way collators do it:
/// 1. base letters (decomposed, combining marks dropped, lower-cased)
/// 2. accents
/// 3. case, lower before upper
///
/// Remaining ties fall back to code point order so the result is a total order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented(a).cmp(accented(b)))
        .then_with(|| {
            a.nfd()
                .map(char::is_uppercase)
                .cmp(b.nfd().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn accented(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

/// Groups `items` into sections keyed by the leading character of `name_of(item)`.
///
/// Items with an empty name are skipped. Items keep their encounter order inside a section;
/// sections are ordered by [`locale_cmp`] on their titles.
///
/// The name must outlive the item borrow passed to `name_of`, so it cannot point into an owned
/// `T`. To group owned values, group their indices and look names up in the backing slice:
/// `group_by(0..people.len(), policy, |&i| people[i].name.as_str())`.
pub fn group_by<'a, T>(
    items: impl IntoIterator<Item = T>,
    policy: LeadingKey,
    mut name_of: impl FnMut(&T) -> &'a str,
) -> Vec<Section<T>> {
    let mut sections: Vec<Section<T>> = Vec::new();
    let mut slot_of = TitleIndexMap::new();

    for item in items {
        let Some(title) = leading_key(name_of(&item), policy) else {
            continue;
        };
        match slot_of.get(&title) {
            Some(&slot) => sections[slot].items.push(item),
            None => {
                slot_of.insert(title.clone(), sections.len());
                sections.push(Section {
                    title,
                    items: alloc::vec![item],
                });
            }
        }
    }

    sections.sort_by(|a, b| locale_cmp(&a.title, &b.title));
    vtrace!(sections = sections.len(), "group_by");
    sections
}

/// Groups borrowed records by display name.
pub fn group<R: Record>(records: &[R], policy: LeadingKey) -> Vec<Section<&R>> {
    group_by(records, policy, |r| R::display_name(*r))
}

/// The ordered, de-duplicated section titles `group` would produce, without the items.
pub fn letters<R: Record>(records: &[R], policy: LeadingKey) -> Vec<String> {
    let mut titles: Vec<String> = records
        .iter()
        .filter_map(|r| leading_key(r.display_name(), policy))
        .collect();
    titles.sort_by(|a, b| locale_cmp(a, b));
    titles.dedup();
    titles
}
