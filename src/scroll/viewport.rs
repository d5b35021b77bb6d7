//! Viewport abstraction: heading visibility, key events and scrolling.
//!
//! A host with native visibility observation implements [`Viewport`] directly.
//! [`LayoutViewport`] computes the same entries from heading geometry and the
//! scroll offset; [`HeadlessViewport`] observes nothing.

use rustc_hash::FxHashMap;

use super::margin::ObserverOptions;

/// Handle of one observation registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

/// Handle of one document-level key listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Visibility report for one observed heading.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub id: String,
    pub is_intersecting: bool,
    /// Visible fraction of the heading, `0.0..=1.0`.
    pub ratio: f32,
}

pub trait Viewport {
    /// Start observing the headings `ids`. `None` when unsupported.
    fn observe(&mut self, ids: &[String], options: &ObserverOptions) -> Option<Subscription>;

    fn unobserve(&mut self, subscription: Subscription);

    /// Register a document-level key listener. `None` when unsupported.
    fn add_key_listener(&mut self) -> Option<ListenerId>;

    fn remove_key_listener(&mut self, listener: ListenerId);

    /// Smooth-scroll the element `id` into view.
    fn scroll_into_view(&mut self, id: &str);

    /// Replace the URL fragment without adding a history entry.
    fn replace_fragment(&mut self, id: &str);
}

/// Viewport without observation or keys.
#[derive(Debug, Default)]
pub struct HeadlessViewport;

impl Viewport for HeadlessViewport {
    fn observe(&mut self, _: &[String], _: &ObserverOptions) -> Option<Subscription> {
        None
    }

    fn unobserve(&mut self, _: Subscription) {}

    fn add_key_listener(&mut self) -> Option<ListenerId> {
        None
    }

    fn remove_key_listener(&mut self, _: ListenerId) {}

    fn scroll_into_view(&mut self, _: &str) {}

    fn replace_fragment(&mut self, _: &str) {}
}

/// Vertical box of a heading in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingBox {
    pub top: f32,
    pub height: f32,
}

struct Observation {
    subscription: Subscription,
    ids: Vec<String>,
    options: ObserverOptions,
    /// Last reported threshold bucket per heading.
    reported: FxHashMap<String, usize>,
}

/// Geometry-polling viewport.
///
/// The host feeds heading boxes and the scroll offset, then calls
/// [`LayoutViewport::poll`] after each scroll to get the entries whose
/// threshold bucket changed.
#[derive(Default)]
pub struct LayoutViewport {
    height: f32,
    width: f32,
    scroll_top: f32,
    boxes: FxHashMap<String, HeadingBox>,
    observation: Option<Observation>,
    listeners: Vec<ListenerId>,
    next_id: u64,
    fragment: Option<String>,
}

impl LayoutViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn set_heading_box(&mut self, id: impl Into<String>, heading: HeadingBox) {
        self.boxes.insert(id.into(), heading);
    }

    pub fn scroll_to(&mut self, top: f32) {
        self.scroll_top = top.max(0.0);
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    fn next_handle(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Entries whose visibility crossed a threshold since the last poll.
    pub fn poll(&mut self) -> Option<(Subscription, Vec<IntersectionEntry>)> {
        let (root_top, root_bottom) = {
            let observation = self.observation.as_ref()?;
            let margin = observation.options.root_margin;
            (
                -margin.top.resolve(self.height),
                self.height + margin.bottom.resolve(self.height),
            )
        };
        let scroll_top = self.scroll_top;
        let boxes = &self.boxes;
        let observation = self.observation.as_mut()?;

        let mut entries = Vec::new();
        for id in &observation.ids {
            let Some(b) = boxes.get(id) else { continue };
            let top = b.top - scroll_top;
            let (is_intersecting, ratio) = intersect(top, b.height, root_top, root_bottom);

            let bucket = if is_intersecting {
                1 + observation.options.thresholds.iter().filter(|t| ratio >= **t).count()
            } else {
                0
            };
            if observation.reported.insert(id.clone(), bucket) != Some(bucket) {
                entries.push(IntersectionEntry {
                    id: id.clone(),
                    is_intersecting,
                    ratio,
                });
            }
        }

        Some((observation.subscription, entries))
    }
}

/// Overlap of `[top, top + height]` with `[root_top, root_bottom]`.
fn intersect(top: f32, height: f32, root_top: f32, root_bottom: f32) -> (bool, f32) {
    let bottom = top + height;
    if root_bottom < root_top || bottom < root_top || top > root_bottom {
        return (false, 0.0);
    }
    if height <= 0.0 {
        return (true, 1.0);
    }
    let visible = bottom.min(root_bottom) - top.max(root_top);
    if visible <= 0.0 {
        // edge-adjacent
        return (true, 0.0);
    }
    (true, (visible / height).clamp(0.0, 1.0))
}

impl Viewport for LayoutViewport {
    fn observe(&mut self, ids: &[String], options: &ObserverOptions) -> Option<Subscription> {
        let subscription = Subscription(self.next_handle());
        self.observation = Some(Observation {
            subscription,
            ids: ids.to_vec(),
            options: options.clone(),
            reported: FxHashMap::default(),
        });
        Some(subscription)
    }

    fn unobserve(&mut self, subscription: Subscription) {
        if self
            .observation
            .as_ref()
            .is_some_and(|o| o.subscription == subscription)
        {
            self.observation = None;
        }
    }

    fn add_key_listener(&mut self) -> Option<ListenerId> {
        let listener = ListenerId(self.next_handle());
        self.listeners.push(listener);
        Some(listener)
    }

    fn remove_key_listener(&mut self, listener: ListenerId) {
        self.listeners.retain(|l| *l != listener);
    }

    fn scroll_into_view(&mut self, id: &str) {
        if let Some(b) = self.boxes.get(id) {
            self.scroll_top = b.top.max(0.0);
        }
    }

    fn replace_fragment(&mut self, id: &str) {
        self.fragment = Some(id.to_string());
    }
}

impl std::fmt::Debug for LayoutViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutViewport")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scroll_top", &self.scroll_top)
            .field("observing", &self.observation.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> LayoutViewport {
        let mut vp = LayoutViewport::new(1200.0, 1000.0);
        vp.set_heading_box("intro", HeadingBox { top: 0.0, height: 40.0 });
        vp.set_heading_box("setup", HeadingBox { top: 800.0, height: 40.0 });
        vp
    }

    fn ids() -> Vec<String> {
        vec!["intro".into(), "setup".into()]
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intersect(200.0, 40.0, 120.0, 400.0), (true, 1.0));
        assert_eq!(intersect(100.0, 40.0, 120.0, 400.0), (true, 0.5));
        assert_eq!(intersect(500.0, 40.0, 120.0, 400.0), (false, 0.0));
    }

    #[test]
    fn test_poll_reports_changes_only() {
        let mut vp = viewport();
        let sub = vp.observe(&ids(), &ObserverOptions::default()).unwrap();

        // default margin: visible band is 120..400 of a 1000px viewport
        let (got, entries) = vp.poll().unwrap();
        assert_eq!(got, sub);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.is_intersecting));

        vp.scroll_to(600.0);
        let (_, entries) = vp.poll().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "setup");
        assert!(entries[0].is_intersecting);
        assert_eq!(entries[0].ratio, 1.0);

        let (_, entries) = vp.poll().unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unobserve() {
        let mut vp = viewport();
        let old = vp.observe(&ids(), &ObserverOptions::default()).unwrap();
        let new = vp.observe(&ids(), &ObserverOptions::default()).unwrap();
        assert_ne!(old, new);

        // removing a replaced subscription leaves the current one
        vp.unobserve(old);
        assert!(vp.is_observing());
        vp.unobserve(new);
        assert!(vp.poll().is_none());
    }

    #[test]
    fn test_scroll_into_view_and_fragment() {
        let mut vp = viewport();
        vp.scroll_into_view("setup");
        vp.replace_fragment("setup");
        assert_eq!(vp.scroll_top(), 800.0);
        assert_eq!(vp.fragment(), Some("setup"));
    }
}
