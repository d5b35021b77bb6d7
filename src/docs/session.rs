//! Docs session: one navigation at a time, newest wins.
//!
//! Every [`DocsSession::navigate`] call takes a fresh generation token.
//! Asynchronous results (the document, then the back-filled titles) are
//! published only while that token is still the latest; otherwise they are
//! dropped. Loads already in flight are not cancelled and still populate the
//! cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;

use super::index::{Topic, TopicIndex};
use super::lang::LanguageSet;
use super::loader::{DocumentLoader, LoadedDocument};
use super::nav::{INDEX_SLUG, Pager, TopicLink, sidebar};
use crate::config::SiteConfig;
use crate::content::ContentSource;
use crate::debug;
use crate::markdown::{
    MarkdownOptions, RenderContext, RenderedDocument, TocItem, extract_toc, render,
    toc_for_display,
};
use crate::scroll::{ObserverOptions, ScrollSync, Viewport};

/// Immutable snapshot of what the docs page shows.
#[derive(Debug, Clone)]
pub struct DocsView {
    pub language: String,
    pub topic: String,
    /// First level-1 heading of the document, if any.
    pub title: Option<String>,
    pub found: bool,
    pub document: Arc<RenderedDocument>,
    /// Full heading list.
    pub toc: Vec<TocItem>,
    /// Headings shown beside the page.
    pub display_toc: Vec<TocItem>,
    pub topics: Vec<Topic>,
    pub sidebar: Vec<TopicLink>,
    pub pager: Pager,
}

impl DocsView {
    /// Same document, new topic list.
    fn with_topics(&self, index: &TopicIndex) -> Self {
        Self {
            topics: index.topics().to_vec(),
            sidebar: sidebar(index.topics(), &self.language, &self.topic),
            pager: Pager::new(index.topics(), &self.language, &self.topic),
            ..self.clone()
        }
    }
}

/// Result of one navigation.
#[derive(Debug, Clone)]
pub enum NavOutcome {
    /// The returned view was published.
    Committed(Arc<DocsView>),
    /// A newer navigation started before the document arrived.
    Stale,
}

/// Settings the session needs from the site config.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub languages: LanguageSet,
    pub extension: String,
    pub markdown: MarkdownOptions,
    pub toc_max_level: u8,
    /// Heading observation for scroll sync.
    pub observer: ObserverOptions,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            languages: LanguageSet::default(),
            extension: "md".to_string(),
            markdown: MarkdownOptions::all(),
            toc_max_level: 3,
            observer: ObserverOptions::default(),
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            languages: config.site.language_set(),
            extension: config.content.extension.clone(),
            markdown: config.render.markdown_options(),
            toc_max_level: config.render.toc_max_level,
            observer: config.scroll.observer_options(),
        }
    }
}

pub struct DocsSession {
    settings: SessionSettings,
    loader: DocumentLoader,
    generation: AtomicU64,
    view: ArcSwapOption<DocsView>,
}

impl DocsSession {
    pub fn new(source: Arc<dyn ContentSource>, settings: SessionSettings) -> Self {
        let loader = DocumentLoader::new(source, settings.extension.clone());
        Self {
            settings,
            loader,
            generation: AtomicU64::new(0),
            view: ArcSwapOption::empty(),
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn loader(&self) -> &DocumentLoader {
        &self.loader
    }

    /// Last published view.
    pub fn current(&self) -> Option<Arc<DocsView>> {
        self.view.load_full()
    }

    /// Scroll sync on `viewport`, attached to the current document if any.
    ///
    /// Call [`ScrollSync::attach`] again after each committed navigation.
    pub fn scroll_sync<V: Viewport>(&self, viewport: V) -> ScrollSync<V> {
        let mut sync = ScrollSync::new(viewport, self.settings.observer.clone());
        if let Some(view) = self.current() {
            sync.attach(&view.document);
        }
        sync
    }

    fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Render `markdown` as a document of `language`.
    pub fn render(&self, markdown: &str, language: &str) -> RenderedDocument {
        let ctx = RenderContext {
            language,
            extension: &self.settings.extension,
            options: &self.settings.markdown,
        };
        render(markdown, &ctx)
    }

    /// Show `topic` (default `index`) in `language` (default from settings).
    pub async fn navigate(&self, language: Option<&str>, topic: Option<&str>) -> NavOutcome {
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let language = self.settings.languages.normalize(language).to_string();
        let topic = topic.filter(|t| !t.is_empty()).unwrap_or(INDEX_SLUG).to_string();

        let index = self.loader.index(&language);
        let doc = self.loader.document(&index, &topic).await;

        if !self.is_current(token) {
            debug!("session"; "discard stale {}/{}", language, topic);
            return NavOutcome::Stale;
        }

        let view = Arc::new(self.build_view(&language, &topic, &index, &doc));
        self.view.store(Some(Arc::clone(&view)));
        debug!("session"; "committed {}/{}", language, topic);

        let titles = self.loader.backfill_titles(&index).await;
        if !self.is_current(token) {
            debug!("session"; "discard stale titles for {}", language);
            return NavOutcome::Committed(view);
        }

        let titled = Arc::new(view.with_topics(&index.with_titles(&titles)));
        self.view.store(Some(Arc::clone(&titled)));
        NavOutcome::Committed(titled)
    }

    fn build_view(
        &self,
        language: &str,
        topic: &str,
        index: &TopicIndex,
        doc: &LoadedDocument,
    ) -> DocsView {
        let document = self.render(doc.normalized(), language);
        let toc = extract_toc(doc.normalized());
        let display_toc = toc_for_display(&toc, self.settings.toc_max_level);

        DocsView {
            language: language.to_string(),
            topic: topic.to_string(),
            title: doc.title().map(str::to_string),
            found: doc.is_found(),
            document: Arc::new(document),
            toc,
            display_toc,
            topics: index.topics().to_vec(),
            sidebar: sidebar(index.topics(), language, topic),
            pager: Pager::new(index.topics(), language, topic),
        }
    }
}
