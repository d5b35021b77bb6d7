//! Copy-to-clipboard control beside code blocks.

use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Text clipboard of the host.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// How long the control reads "Copied" after a successful copy.
pub const COPIED_FEEDBACK: Duration = Duration::from_millis(1200);

/// Label state of one copy control.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyControl {
    copied_at: Option<Instant>,
}

impl CopyControl {
    pub const LABEL: &'static str = "Copy";
    pub const COPIED_LABEL: &'static str = "Copied";

    /// Write `text` to `clipboard`. Failures are swallowed and leave the
    /// label unchanged.
    pub fn activate(&mut self, clipboard: &mut dyn Clipboard, text: &str, now: Instant) -> bool {
        match clipboard.write_text(text) {
            Ok(()) => {
                self.copied_at = Some(now);
                true
            }
            Err(err) => {
                crate::debug!("copy"; "{}", err);
                false
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPIED_FEEDBACK)
    }

    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_copied(now) {
            Self::COPIED_LABEL
        } else {
            Self::LABEL
        }
    }
}
