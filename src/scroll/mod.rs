//! Scroll-position driven navigation state.
//!
//! - [`ScrollSync`] - active heading for TOC highlighting, Escape handling
//! - [`Viewport`] - host seam for visibility, keys and scrolling
//! - [`ImagePreview`], [`CopyControl`] - interactive controls of a rendered page

mod copy;
mod margin;
mod preview;
mod sync;
mod viewport;

pub use copy::{COPIED_FEEDBACK, Clipboard, ClipboardError, CopyControl};
pub use margin::{Length, MarginError, ObserverOptions, RootMargin};
pub use preview::ImagePreview;
pub use sync::{ESCAPE, ScrollSync};
pub use viewport::{
    HeadingBox, HeadlessViewport, IntersectionEntry, LayoutViewport, ListenerId, Subscription,
    Viewport,
};
