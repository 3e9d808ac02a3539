//! Heading block - a paragraph tagged with a `Heading{level}` style

use crate::document::{Run, RunFormat};
use crate::error::{Error, Result};
use std::fmt;

/// Heading level, always within 1..=9
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(level: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(Error::InvalidArgument(format!(
                "heading level {} is outside {}..={}",
                level,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Paragraph style id referenced by `w:pStyle`, e.g. `Heading2`
    pub fn style_id(self) -> String {
        format!("Heading{}", self.0)
    }

    /// Parse a `Heading{N}` style id (either case of the leading `h`)
    pub fn from_style_id(style_id: &str) -> Option<Self> {
        let digits = style_id
            .strip_prefix("Heading")
            .or_else(|| style_id.strip_prefix("heading"))?;
        Self::from_digits(digits)
    }

    /// Parse a `heading N` style name (case-insensitive)
    pub fn from_style_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let digits = lower.strip_prefix("heading")?.trim_start();
        Self::from_digits(digits)
    }

    fn from_digits(digits: &str) -> Option<Self> {
        if digits.len() != 1 {
            return None;
        }
        digits.parse().ok().and_then(|n| Self::new(n).ok())
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A heading block
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    level: HeadingLevel,
    runs: Vec<Run>,
}

impl Heading {
    /// Create a heading with no runs
    pub fn new(level: HeadingLevel) -> Self {
        Heading {
            level,
            runs: Vec::new(),
        }
    }

    pub fn level(&self) -> HeadingLevel {
        self.level
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    /// Append a run and return it for further formatting
    pub fn append_run(&mut self, text: impl Into<String>, format: RunFormat) -> &mut Run {
        self.push_run(Run::with_format(text, format))
    }

    pub(crate) fn push_run(&mut self, run: Run) -> &mut Run {
        self.runs.push(run);
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        assert!(HeadingLevel::new(0).is_err());
        assert!(HeadingLevel::new(10).is_err());
        for level in 1..=9 {
            assert_eq!(HeadingLevel::new(level).unwrap().get(), level);
        }
        assert!(matches!(
            HeadingLevel::try_from(42),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_style_id() {
        let level = HeadingLevel::new(3).unwrap();
        assert_eq!(level.style_id(), "Heading3");
        assert_eq!(HeadingLevel::from_style_id("Heading3"), Some(level));
        assert_eq!(HeadingLevel::from_style_id("heading3"), Some(level));
        assert_eq!(HeadingLevel::from_style_id("Heading0"), None);
        assert_eq!(HeadingLevel::from_style_id("Heading10"), None);
        assert_eq!(HeadingLevel::from_style_id("HeadingX"), None);
        assert_eq!(HeadingLevel::from_style_id("Title"), None);
    }

    #[test]
    fn test_style_name() {
        let level = HeadingLevel::new(1).unwrap();
        assert_eq!(HeadingLevel::from_style_name("heading 1"), Some(level));
        assert_eq!(HeadingLevel::from_style_name("Heading 1"), Some(level));
        assert_eq!(HeadingLevel::from_style_name("heading 12"), None);
        assert_eq!(HeadingLevel::from_style_name("Normal"), None);
    }

    #[test]
    fn test_append_run() {
        let mut heading = Heading::new(HeadingLevel::new(2).unwrap());
        heading.append_run("Meth", RunFormat::new());
        heading.append_run("ods", RunFormat::new()).set_italic(true);

        assert_eq!(heading.text(), "Methods");
        assert!(heading.runs()[1].italic());
    }
}
