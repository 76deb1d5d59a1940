//! Adapter utilities for the `sectionlist` crate.
//!
//! The `sectionlist` crate is UI-agnostic and covers grouping, search and the virtual list
//! math. This crate adds the framework-neutral pieces an adapter needs on top:
//!
//! - [`AlphaRail`]: the alpha index rail's gesture state machine and pointer-to-section mapping
//! - [`ScrollTween`]: adapter-driven smooth scrolling
//! - [`SectionedList`] (feature `std`): a controller wiring records, query, rail and list
//!
//! No UI toolkit bindings live here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
#[allow(unused_macros)]
mod macros;

#[cfg(feature = "std")]
mod controller;
#[cfg(feature = "std")]
mod options;
mod rail;
mod tween;


#[cfg(feature = "std")]
pub use controller::SectionedList;
#[cfg(feature = "std")]
pub use options::{SectionChangeCallback, SectionedListOptions};
pub use rail::{AlphaRail, RailEvent, RailLayout, RailPhase, SampleDedup, resolve_section};
pub use tween::{Easing, ScrollTween};
