//! `[scroll]` section configuration.
//!
//! Tunes which heading counts as "active" while reading.
//!
//! # Example
//!
//! ```toml
//! [scroll]
//! root_margin = "-120px 0px -60% 0px"   # CSS margin shorthand
//! thresholds = [0.0, 1.0]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::types::{ConfigDiagnostics, FieldPath};
use crate::scroll::{ObserverOptions, RootMargin};

/// Heading visibility tracking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Margin applied to the viewport before intersecting headings.
    pub root_margin: RootMargin,

    /// Intersection ratios at which visibility updates are reported.
    pub thresholds: Vec<f32>,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        let options = ObserverOptions::default();
        Self {
            root_margin: options.root_margin,
            thresholds: options.thresholds,
        }
    }
}

impl ScrollConfig {
    const THRESHOLDS: FieldPath = FieldPath::new("scroll", "thresholds");

    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin: self.root_margin,
            thresholds: self.thresholds.clone(),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.thresholds.is_empty() {
            diag.error(Self::THRESHOLDS, "at least one threshold is required");
        }
        for t in &self.thresholds {
            if !(0.0..=1.0).contains(t) {
                diag.error(Self::THRESHOLDS, format!("{t} is outside 0.0..=1.0"));
            }
        }
    }
}
