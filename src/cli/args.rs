//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// RustCost documentation engine CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "rcdocs", version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: docs.toml)
    #[arg(short = 'C', long, global = true, default_value = "docs.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List topics of a language in navigation order
    #[command(visible_alias = "ls")]
    Topics {
        #[command(flatten)]
        args: DocsArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the table of contents of a topic
    #[command(visible_alias = "t")]
    Toc {
        /// Topic slug (default: index)
        topic: Option<String>,

        #[command(flatten)]
        args: DocsArgs,

        /// Print JSON instead of an outline
        #[arg(long)]
        json: bool,

        /// Include every heading level, not only the displayed ones
        #[arg(short, long)]
        all: bool,
    },

    /// Render a topic to an HTML fragment
    #[command(visible_alias = "r")]
    Render {
        /// Topic slug (default: index)
        topic: Option<String>,

        #[command(flatten)]
        args: DocsArgs,
    },

    /// Render every topic and report duplicate anchors and broken doc links
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: DocsArgs,
    },
}

/// Arguments shared by every subcommand
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DocsArgs {
    /// Language code (default: site.default_language)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Commands {
    pub const fn args(&self) -> &DocsArgs {
        match self {
            Self::Topics { args, .. }
            | Self::Toc { args, .. }
            | Self::Render { args, .. }
            | Self::Check { args } => args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_toc() {
        let cli = Cli::parse_from(["rcdocs", "toc", "setup", "-l", "ko", "--all", "-V"]);
        let Commands::Toc { topic, args, all, json } = cli.command else {
            panic!("expected toc");
        };
        assert_eq!(topic.as_deref(), Some("setup"));
        assert_eq!(args.lang.as_deref(), Some("ko"));
        assert!(all && args.verbose && !json);
        assert_eq!(cli.config, PathBuf::from("docs.toml"));
    }

    #[test]
    fn test_global_content_after_subcommand() {
        let cli = Cli::parse_from(["rcdocs", "check", "--content", "site/content"]);
        assert_eq!(cli.content, Some(PathBuf::from("site/content")));
        assert!(cli.command.args().lang.is_none());
    }
}
