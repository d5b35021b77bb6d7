//! Diagnostic logging to stderr with colored module prefixes.
//!
//! Command output (HTML, JSON, tables) goes to stdout; everything logged here
//! goes to stderr so `rcdocs render setup > setup.html` stays clean.
//!
//! ```ignore
//! log!("index"; "{} topics for {}", topics.len(), lang);
//! debug!("cache"; "miss {}", key);   // only with --verbose
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Style};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only when `--verbose` is set.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = format!("[{module}]");
    let prefix = prefix.style(prefix_style(module));

    let mut err = stderr().lock();
    execute!(err, Clear(ClearType::UntilNewLine)).ok();
    writeln!(err, "{prefix} {message}").ok();
    err.flush().ok();
}

fn prefix_style(module: &str) -> Style {
    let style = Style::new().bold();
    match module.to_ascii_lowercase().as_str() {
        "error" => style.bright_red(),
        "warning" => style.bright_magenta(),
        "check" | "render" | "toc" | "topics" => style.bright_blue(),
        "session" | "index" | "loader" => style.bright_green(),
        _ => style.bright_yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_styles_differ_by_severity() {
        assert_ne!(
            format!("{:?}", prefix_style("error")),
            format!("{:?}", prefix_style("cache"))
        );
        assert_eq!(
            format!("{:?}", prefix_style("ERROR")),
            format!("{:?}", prefix_style("error"))
        );
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
