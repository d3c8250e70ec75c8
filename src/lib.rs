//! Core library for Danmarkskort: an address search over the Danish address registry
//! (DAWA) that places a marker on a map of Denmark, with an optional grid-operator lookup
//! shown in the marker popup.

pub mod address;
mod config;
pub mod debounce;
mod error;
pub mod grid;
mod gui;
pub mod html;
#[cfg(test)]
mod loopback;
pub mod map;
pub mod popup;
pub mod selection;
pub mod session;
pub mod statics;
pub mod suggestions;
pub mod worker;

pub use config::Config;
pub use error::LookupError;
pub use gui::run_gui;
