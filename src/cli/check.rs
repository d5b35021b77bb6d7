//! `rcdocs check`: render every topic and report authoring problems.
//!
//! - duplicate heading ids within one document (anchors would collide)
//! - `./<slug>.md` links whose target topic does not resolve
//! - documents that fail to load

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use rustc_hash::FxHashSet;

use super::{DocsArgs, open_session};
use crate::config::SiteConfig;
use crate::docs::{DocsSession, LoadedDocument, Resolution, TopicIndex};
use crate::log;
use crate::markdown::RenderedDocument;
use crate::utils::plural::counted;
use crate::utils::route::split_path_fragment;

/// One problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub target: String,
    pub reason: &'static str,
}

/// Issues grouped by file key.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub files: BTreeMap<String, Vec<Issue>>,
    pub checked: usize,
}

impl CheckReport {
    fn add(&mut self, source: &str, target: impl Into<String>, reason: &'static str) {
        self.files.entry(source.to_string()).or_default().push(Issue {
            target: target.into(),
            reason,
        });
    }

    pub fn issue_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn print(&self) {
        for (path, issues) in &self.files {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for issue in issues {
                eprintln!("{} {} {}", "→".red(), issue.target, issue.reason.dimmed());
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let issues = self.issue_count();
        if issues == 0 {
            write!(f, "{} ({})", "all checks passed".green(), counted(self.checked, "document"))
        } else {
            write!(
                f,
                "{} in {}",
                counted(issues, "issue").red(),
                counted(self.files.len(), "file")
            )
        }
    }
}

pub async fn check_docs(config: &SiteConfig, args: &DocsArgs) -> Result<()> {
    let session = open_session(config)?;
    let languages = match &args.lang {
        Some(lang) => vec![session.settings().languages.normalize(Some(lang.as_str())).to_string()],
        None => session.settings().languages.codes().to_vec(),
    };

    let mut report = CheckReport::default();
    for language in &languages {
        check_language(&session, language, &mut report).await;
    }

    log!("check"; "{}", report);
    if report.issue_count() > 0 {
        report.print();
        bail!("check failed");
    }
    Ok(())
}

async fn check_language(session: &DocsSession, language: &str, report: &mut CheckReport) {
    let loader = session.loader();
    let index = loader.index(language);
    log!("check"; "{} in {}", counted(index.len(), "topic"), language);

    for topic in index.topics() {
        let source = topic.file_key.as_str();
        let doc = loader.document(&index, &topic.display_slug).await;
        let LoadedDocument::Found { .. } = doc else {
            report.add(source, &topic.display_slug, "failed to load");
            continue;
        };
        report.checked += 1;

        let rendered = session.render(doc.normalized(), language);
        for id in duplicate_ids(&rendered) {
            report.add(source, format!("#{id}"), "duplicate heading id");
        }
        for href in broken_doc_links(session, &index, &rendered) {
            report.add(source, href, "links to a missing topic");
        }
    }
}

/// Heading ids that occur more than once, in first-repeat order.
fn duplicate_ids(doc: &RenderedDocument) -> Vec<&str> {
    let mut seen = FxHashSet::default();
    let mut dups = Vec::new();
    for heading in &doc.headings {
        if !seen.insert(heading.id.as_str()) && !dups.contains(&heading.id.as_str()) {
            dups.push(heading.id.as_str());
        }
    }
    dups
}

/// Rewritten doc links whose topic does not resolve in `index`.
fn broken_doc_links(session: &DocsSession, index: &TopicIndex, doc: &RenderedDocument) -> Vec<String> {
    let prefix = format!("/{}/docs", index.language());
    doc.root
        .find_all(&|e| e.tag == "a" && e.has_attr("data-route"))
        .into_iter()
        .filter_map(|a| a.attr("href"))
        .filter(|href| {
            let (path, _) = split_path_fragment(href);
            let Some(rest) = path.strip_prefix(&prefix) else {
                return false;
            };
            let Some(slug) = rest.strip_prefix('/') else {
                // the index route
                return index.find("index").is_none();
            };
            matches!(session.loader().resolve(index, slug), Resolution::NotFound)
        })
        .map(str::to_string)
        .collect()
}
