#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use alloc::string::String;

#[cfg(feature = "std")]
pub(crate) type KeySizeMap<K> = HashMap<K, u32>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySizeMap<K> = BTreeMap<K, u32>;

/// Section title → flat index of its header entry.
#[cfg(feature = "std")]
pub type TitleIndexMap = HashMap<String, usize>;
/// Section title → flat index of its header entry.
#[cfg(not(feature = "std"))]
pub type TitleIndexMap = BTreeMap<String, usize>;

