//! Documentation engine: topic index, document loading and the docs session.

pub mod cache;
pub mod index;
pub mod lang;
pub mod loader;
pub mod nav;
pub mod session;

pub use cache::{DocCache, DocCacheValue, LoadResult};
pub use index::{Topic, TopicIndex, TopicOrder};
pub use lang::LanguageSet;
pub use loader::{DocumentLoader, LoadedDocument, Resolution};
pub use nav::{Pager, TopicLink, build_doc_path};
pub use session::{DocsSession, DocsView, NavOutcome, SessionSettings};
