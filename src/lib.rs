//! RustCost documentation engine.
//!
//! The page shell drives [`docs::DocsSession`] for navigation and
//! [`scroll::ScrollSync`] for the active heading; `rcdocs` is a thin CLI over
//! the same API.

pub mod cli;
pub mod config;
pub mod content;
pub mod docs;
pub mod dom;
pub mod logger;
pub mod markdown;
pub mod scroll;
pub mod utils;
