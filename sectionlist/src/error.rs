use alloc::string::String;

/// Why a section could not be turned into a scroll target.
///
/// The alpha rail drops these silently: a miss means "no visual update", never a failure
/// surfaced to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollMiss {
    #[error("no sections to scroll to")]
    NoSections,
    #[error("section {index} out of range ({count} sections)")]
    SectionOutOfRange { index: usize, count: usize },
    #[error("no header entry for section {title:?}")]
    HeaderNotFound { title: String },
}
