//! Observation margins and thresholds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One side of a CSS-style margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    /// Percentage of the viewport's extent along that axis.
    Percent(f32),
}

impl Length {
    /// Resolve against `extent` pixels.
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Px(px) => px,
            Self::Percent(pct) => extent * pct / 100.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarginError {
    #[error("invalid length `{0}`, expected e.g. `-120px`, `0` or `-60%`")]
    Length(String),
    #[error("expected 1 to 4 lengths, got {0}")]
    Count(usize),
}

impl FromStr for Length {
    type Err = MarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MarginError::Length(s.to_string());
        if let Some(num) = s.strip_suffix("px") {
            return num.parse().map(Self::Px).map_err(|_| invalid());
        }
        if let Some(num) = s.strip_suffix('%') {
            return num.parse().map(Self::Percent).map_err(|_| invalid());
        }
        // unitless zero only, like CSS
        match s.parse::<f32>() {
            Ok(v) if v == 0.0 => Ok(Self::Px(0.0)),
            _ => Err(invalid()),
        }
    }
}

/// Margin applied to the viewport before intersecting, CSS shorthand order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: Length::Px(-120.0),
            right: Length::Px(0.0),
            bottom: Length::Percent(-60.0),
            left: Length::Px(0.0),
        }
    }
}

impl FromStr for RootMargin {
    type Err = MarginError;

    /// `"a"`, `"a b"`, `"a b c"` or `"a b c d"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split_whitespace()
            .map(Length::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        let (top, right, bottom, left) = match parts.as_slice() {
            [a] => (*a, *a, *a, *a),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            other => return Err(MarginError::Count(other.len())),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = MarginError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RootMargin> for String {
    fn from(m: RootMargin) -> Self {
        m.to_string()
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Heading observation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub root_margin: RootMargin,
    /// Ratios at which visibility changes are reported.
    pub thresholds: Vec<f32>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: RootMargin::default(),
            thresholds: vec![0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorthand() {
        let m: RootMargin = "-120px 0px -60% 0px".parse().unwrap();
        assert_eq!(m, RootMargin::default());

        let m: RootMargin = "10px 5%".parse().unwrap();
        assert_eq!(m.bottom, Length::Px(10.0));
        assert_eq!(m.left, Length::Percent(5.0));

        let m: RootMargin = "0".parse().unwrap();
        assert_eq!(m.right, Length::Px(0.0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<RootMargin>(), Err(MarginError::Count(0)));
        assert_eq!("1px 2px 3px 4px 5px".parse::<RootMargin>(), Err(MarginError::Count(5)));
        assert!(matches!("12".parse::<RootMargin>(), Err(MarginError::Length(_))));
        assert!(matches!("1em".parse::<RootMargin>(), Err(MarginError::Length(_))));
    }

    #[test]
    fn test_display_parses_back() {
        let m = RootMargin::default();
        assert_eq!(m.to_string(), "-120px 0px -60% 0px");
        assert_eq!(m.to_string().parse::<RootMargin>(), Ok(m));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Length::Percent(-60.0).resolve(1000.0), -600.0);
        assert_eq!(Length::Px(-120.0).resolve(1000.0), -120.0);
    }
}
