//! Counts with pluralized nouns for log lines.

use std::fmt;

/// Displays as `1 topic`, `0 topics`, `3 topics`.
#[derive(Debug, Clone, Copy)]
pub struct Counted<'a> {
    pub count: usize,
    pub noun: &'a str,
}

pub fn counted(count: usize, noun: &str) -> Counted<'_> {
    Counted { count, noun }
}

impl fmt::Display for Counted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {}{suffix}", self.count, self.noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted() {
        assert_eq!(counted(0, "topic").to_string(), "0 topics");
        assert_eq!(counted(1, "document").to_string(), "1 document");
        assert_eq!(counted(12, "issue").to_string(), "12 issues");
    }
}
