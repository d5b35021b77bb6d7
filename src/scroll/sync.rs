//! Active-heading tracking for TOC highlighting.

use super::margin::ObserverOptions;
use super::preview::ImagePreview;
use super::viewport::{IntersectionEntry, ListenerId, Subscription, Viewport};
use crate::debug;
use crate::markdown::RenderedDocument;

pub const ESCAPE: &str = "Escape";

/// Ties heading visibility to the active TOC entry and owns the preview
/// overlay's keyboard dismissal.
///
/// Observation is replaced on every [`ScrollSync::attach`] and released on
/// [`ScrollSync::teardown`] or drop.
pub struct ScrollSync<V: Viewport> {
    viewport: V,
    options: ObserverOptions,
    subscription: Option<Subscription>,
    listener: Option<ListenerId>,
    active: Option<String>,
    preview: ImagePreview,
}

impl<V: Viewport> ScrollSync<V> {
    /// Mount on `viewport` and start listening for Escape.
    pub fn new(mut viewport: V, options: ObserverOptions) -> Self {
        let listener = viewport.add_key_listener();
        Self {
            viewport,
            options,
            subscription: None,
            listener,
            active: None,
            preview: ImagePreview::default(),
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Observe the level 1–3 headings of a freshly rendered document.
    pub fn attach(&mut self, document: &RenderedDocument) {
        self.detach();
        self.active = None;

        let ids = document.observed_headings();
        if ids.is_empty() {
            return;
        }
        self.subscription = self.viewport.observe(&ids, &self.options);
        if self.subscription.is_none() {
            debug!("scroll"; "viewport cannot observe, no active heading");
        }
    }

    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.viewport.unobserve(subscription);
        }
    }

    /// Apply a batch of visibility entries. Returns the active id.
    ///
    /// Batches for a detached subscription are ignored.
    pub fn on_intersections(
        &mut self,
        subscription: Subscription,
        entries: &[IntersectionEntry],
    ) -> Option<&str> {
        if self.subscription != Some(subscription) {
            return self.active();
        }

        let mut best: Option<&IntersectionEntry> = None;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if best.is_none_or(|b| entry.ratio > b.ratio) {
                best = Some(entry);
            }
        }
        if let Some(best) = best {
            self.active = Some(best.id.clone());
        }
        self.active()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Permalink activation: scroll and replace the URL fragment.
    pub fn jump_to(&mut self, id: &str) {
        self.viewport.scroll_into_view(id);
        self.viewport.replace_fragment(id);
    }

    pub fn on_key(&mut self, listener: ListenerId, key: &str) {
        if self.listener == Some(listener) && key == ESCAPE {
            self.preview.close();
        }
    }

    pub fn preview(&self) -> &ImagePreview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut ImagePreview {
        &mut self.preview
    }

    /// Release observation and the key listener.
    pub fn teardown(&mut self) {
        self.detach();
        if let Some(listener) = self.listener.take() {
            self.viewport.remove_key_listener(listener);
        }
    }
}

impl<V: Viewport> Drop for ScrollSync<V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{MarkdownOptions, RenderContext, render};
    use crate::scroll::{HeadingBox, HeadlessViewport, LayoutViewport};

    fn document(md: &str) -> RenderedDocument {
        let options = MarkdownOptions::all();
        render(
            md,
            &RenderContext {
                language: "en",
                extension: "md",
                options: &options,
            },
        )
    }

    fn entry(id: &str, ratio: f32) -> IntersectionEntry {
        IntersectionEntry {
            id: id.into(),
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    fn layout_sync() -> ScrollSync<LayoutViewport> {
        let mut vp = LayoutViewport::new(1200.0, 1000.0);
        vp.set_heading_box("intro", HeadingBox { top: 0.0, height: 40.0 });
        vp.set_heading_box("setup", HeadingBox { top: 800.0, height: 40.0 });
        vp.set_heading_box("details", HeadingBox { top: 900.0, height: 40.0 });
        ScrollSync::new(vp, ObserverOptions::default())
    }

    const DOC: &str = "# Intro\n\n## Setup\n\n#### Details\n";

    #[test]
    fn test_greatest_ratio_wins() {
        let mut sync = layout_sync();
        sync.attach(&document(DOC));
        let sub = sync.subscription.unwrap();

        let active = sync.on_intersections(sub, &[entry("intro", 0.3), entry("setup", 0.9), entry("x", 0.0)]);
        assert_eq!(active, Some("setup"));

        // no intersecting entries keeps the previous heading
        assert_eq!(sync.on_intersections(sub, &[entry("intro", 0.0)]), Some("setup"));
    }

    #[test]
    fn test_only_levels_one_to_three_observed() {
        let mut sync = layout_sync();
        sync.attach(&document(DOC));
        sync.viewport_mut().scroll_to(700.0);
        let (sub, entries) = sync.viewport_mut().poll().unwrap();
        assert!(entries.iter().all(|e| e.id != "details"));

        assert_eq!(sync.on_intersections(sub, &entries), Some("setup"));
    }

    #[test]
    fn test_detached_subscription_ignored() {
        let mut sync = layout_sync();
        sync.attach(&document(DOC));
        let old = sync.subscription.unwrap();

        sync.attach(&document("# Intro"));
        assert_eq!(sync.on_intersections(old, &[entry("setup", 1.0)]), None);
    }

    #[test]
    fn test_escape_closes_preview() {
        let mut sync = layout_sync();
        let listener = sync.viewport().listeners()[0];

        sync.preview_mut().open("/img/dash.png");
        sync.on_key(listener, "Enter");
        assert!(sync.preview().is_open());
        sync.on_key(listener, ESCAPE);
        assert!(!sync.preview().is_open());

        sync.preview_mut().open("/img/a.png");
        sync.preview_mut().click_backdrop();
        assert_eq!(sync.preview().src(), None);
    }

    #[test]
    fn test_jump_to_replaces_fragment() {
        let mut sync = layout_sync();
        sync.jump_to("setup");
        assert_eq!(sync.viewport().scroll_top(), 800.0);
        assert_eq!(sync.viewport().fragment(), Some("setup"));
    }

    #[test]
    fn test_teardown_releases_everything() {
        let mut sync = layout_sync();
        sync.attach(&document(DOC));
        sync.teardown();
        assert!(!sync.viewport().is_observing());
        assert!(sync.viewport().listeners().is_empty());
    }

    #[test]
    fn test_headless_has_no_active_heading() {
        let mut sync = ScrollSync::new(HeadlessViewport, ObserverOptions::default());
        sync.attach(&document(DOC));
        assert!(sync.subscription.is_none());
        assert_eq!(sync.active(), None);
    }
}
