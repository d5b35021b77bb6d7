//! `rcdocs toc`: heading outline of one topic.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::{DocsArgs, open_session, open_view};
use crate::config::SiteConfig;
use crate::log;
use crate::markdown::TocItem;

pub async fn print_toc(
    config: &SiteConfig,
    args: &DocsArgs,
    topic: Option<&str>,
    json: bool,
    all: bool,
) -> Result<()> {
    let session = open_session(config)?;
    let view = open_view(&session, args, topic).await?;

    if !view.found {
        log!("warning"; "no document for {}/{}", view.language, view.topic);
    }

    let items = if all { &view.toc } else { &view.display_toc };
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        print_outline(items);
    }
    Ok(())
}

fn print_outline(items: &[TocItem]) {
    let base = items.iter().map(|i| i.level).min().unwrap_or(1);
    for item in items {
        let indent = usize::from(item.level - base) * 2;
        println!("{:indent$}{} {}", "", item.text, format!("#{}", item.id).dimmed());
    }
}
