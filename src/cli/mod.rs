//! CLI subcommands.

pub mod args;
pub mod check;
pub mod render;
pub mod toc;
pub mod topics;

pub use args::{Cli, Commands, DocsArgs};

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::content::DirSource;
use crate::docs::{DocsSession, DocsView, NavOutcome, SessionSettings};

/// Scan the content directory and start a session over it.
pub fn open_session(config: &SiteConfig) -> Result<DocsSession> {
    let source = DirSource::scan(config.content_dir(), &config.content.extension)
        .with_context(|| format!("Failed to scan {}", config.content_dir().display()))?;
    Ok(DocsSession::new(
        Arc::new(source),
        SessionSettings::from_config(config),
    ))
}

/// Navigate and return the committed view.
pub async fn open_view(
    session: &DocsSession,
    args: &DocsArgs,
    topic: Option<&str>,
) -> Result<Arc<DocsView>> {
    match session.navigate(args.lang.as_deref(), topic).await {
        NavOutcome::Committed(view) => Ok(view),
        NavOutcome::Stale => bail!("navigation was superseded"),
    }
}
