//! `rcdocs render`: HTML fragment of one topic plus its pager.

use anyhow::Result;

use super::{DocsArgs, open_session, open_view};
use crate::config::SiteConfig;
use crate::docs::{Pager, TopicLink};
use crate::dom::{Element, Node};
use crate::{debug, log};

pub async fn render_topic(config: &SiteConfig, args: &DocsArgs, topic: Option<&str>) -> Result<()> {
    let session = open_session(config)?;
    let view = open_view(&session, args, topic).await?;

    if !view.found {
        log!("warning"; "no document for {}/{}", view.language, view.topic);
    }
    debug!(
        "render";
        "{} heading(s), {} code block(s), {} image(s)",
        view.document.headings.len(),
        view.document.code_blocks.len(),
        view.document.images.len()
    );

    println!("{}", view.document.to_html());
    if let Some(pager) = pager_element(&view.pager) {
        println!("{}", pager.to_html());
    }
    Ok(())
}

/// `<nav class="pager">` with previous/next links, `None` when both are absent.
fn pager_element(pager: &Pager) -> Option<Element> {
    if pager.is_empty() {
        return None;
    }

    let link = |class: &'static str, link: &TopicLink| {
        Element::new("a")
            .with_attr("class", class)
            .with_attr("href", link.href.clone())
            .with_attr("data-route", "")
            .with_child(Node::text(link.title.clone()))
    };

    let mut nav = Element::new("nav").with_attr("class", "pager");
    if let Some(prev) = &pager.prev {
        nav.push(link("pager-prev", prev));
    }
    if let Some(next) = &pager.next {
        nav.push(link("pager-next", next));
    }
    Some(nav)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(slug: &str) -> TopicLink {
        TopicLink {
            slug: slug.into(),
            title: slug.to_uppercase(),
            href: format!("/en/docs/{slug}"),
            active: false,
        }
    }

    #[test]
    fn test_pager_element() {
        assert!(pager_element(&Pager::default()).is_none());

        let pager = Pager {
            prev: None,
            next: Some(link("setup")),
        };
        let html = pager_element(&pager).unwrap().to_html();
        assert_eq!(
            html,
            r#"<nav class="pager"><a class="pager-next" href="/en/docs/setup" data-route>SETUP</a></nav>"#
        );
    }
}
