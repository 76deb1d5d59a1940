/// Accessors the list needs from an application entity.
///
/// This is the single normalization point for record shape: if your entity stores a localized
/// or nested name, resolve it here so the rest of the crate only ever sees a `&str`.
///
/// ```
/// use sectionlist::Record;
///
/// struct Country {
///     cca2: String,
///     name: String,
///     calling_codes: Vec<String>,
/// }
///
/// impl Record for Country {
///     fn display_name(&self) -> &str {
///         &self.name
///     }
///
///     fn stable_key(&self) -> &str {
///         &self.cca2
///     }
///
///     fn for_each_search_field(&self, f: &mut dyn FnMut(&str)) {
///         f(&self.name);
///         f(&self.cca2);
///         for code in &self.calling_codes {
///             f(code);
///         }
///     }
/// }
/// ```
pub trait Record {
    /// The label shown in the list and used for grouping. Empty means "do not list".
    fn display_name(&self) -> &str;

    /// A key that identifies the record across re-renders and data refreshes.
    fn stable_key(&self) -> &str;

    /// Emits every text field the search index should match against.
    ///
    /// Defaults to the display name only.
    fn for_each_search_field(&self, f: &mut dyn FnMut(&str)) {
        f(self.display_name());
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn stable_key(&self) -> &str {
        (**self).stable_key()
    }

    fn for_each_search_field(&self, f: &mut dyn FnMut(&str)) {
        (**self).for_each_search_field(f)
    }
}
