//! `rcdocs topics`: ordered topic list with back-filled titles.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{DocsArgs, open_session};
use crate::config::SiteConfig;
use crate::docs::{TopicIndex, build_doc_path};
use crate::log;
use crate::utils::plural::counted;

pub async fn list_topics(config: &SiteConfig, args: &DocsArgs, json: bool) -> Result<()> {
    let session = open_session(config)?;
    let language = session.settings().languages.normalize(args.lang.as_deref());

    let index = session.loader().index(language);
    let titles = session.loader().backfill_titles(&index).await;
    let index = index.with_titles(&titles);

    if json {
        println!("{}", serde_json::to_string_pretty(index.topics())?);
        return Ok(());
    }

    if index.is_empty() {
        log!("topics"; "no topics for {}", language);
        return Ok(());
    }

    print_table(&index);
    log!("topics"; "{} in {}", counted(index.len(), "topic"), language);
    Ok(())
}

fn print_table(index: &TopicIndex) {
    let width = index
        .topics()
        .iter()
        .map(|t| t.display_slug.len())
        .max()
        .unwrap_or(0);

    for topic in index.topics() {
        let path = build_doc_path(index.language(), Some(&topic.display_slug));
        println!(
            "{:<width$}  {}  {}",
            topic.display_slug.cyan(),
            topic.title,
            path.dimmed(),
        );
    }
}
