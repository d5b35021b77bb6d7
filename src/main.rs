//! rcdocs - documentation engine for the RustCost site.

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use rustcost_docs::cli::{self, Cli, Commands};
use rustcost_docs::config::SiteConfig;
use rustcost_docs::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.command.args().verbose);

    let config = SiteConfig::load(&cli)?;

    // Loads are cooperative; one thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(&cli, &config))
}

async fn run(cli: &Cli, config: &SiteConfig) -> Result<()> {
    match &cli.command {
        Commands::Topics { args, json } => cli::topics::list_topics(config, args, *json).await,
        Commands::Toc {
            topic,
            args,
            json,
            all,
        } => cli::toc::print_toc(config, args, topic.as_deref(), *json, *all).await,
        Commands::Render { topic, args } => {
            cli::render::render_topic(config, args, topic.as_deref()).await
        }
        Commands::Check { args } => cli::check::check_docs(config, args).await,
    }
}
