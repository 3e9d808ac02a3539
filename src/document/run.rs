//! Run - a contiguous span of text with uniform formatting

use crate::document::Rgb;

/// Character formatting of a run.
///
/// Every flag is explicit here; the "absent means off" convention of
/// `w:rPr` only exists in the package codec.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
}

impl RunFormat {
    /// Plain text, no formatting
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// True when no formatting is set
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text (w:r)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Run {
    text: String,
    format: RunFormat,
}

impl Run {
    /// Create a new plain run
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_format(text, RunFormat::default())
    }

    /// Create a new run with formatting
    pub fn with_format(text: impl Into<String>, format: RunFormat) -> Self {
        Run {
            text: text.into(),
            format,
        }
    }

    /// Run text; tabs and line breaks appear as `\t` and `\n`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> RunFormat {
        self.format
    }

    pub fn bold(&self) -> bool {
        self.format.bold
    }

    pub fn italic(&self) -> bool {
        self.format.italic
    }

    pub fn color(&self) -> Option<Rgb> {
        self.format.color
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.format.bold = bold;
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.format.italic = italic;
    }

    pub fn set_color(&mut self, color: Option<Rgb>) {
        self.format.color = color;
    }

    pub fn set_format(&mut self, format: RunFormat) {
        self.format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_is_plain() {
        let run = Run::new("hello");
        assert_eq!(run.text(), "hello");
        assert!(run.format().is_plain());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut run = Run::with_format("x", RunFormat::new().bold().italic());
        assert!(run.bold() && run.italic());

        run.set_bold(false);
        assert!(!run.bold());
        assert!(run.italic());
        assert_eq!(run.color(), None);

        run.set_color(Some(Rgb::RED));
        assert_eq!(run.format(), RunFormat::new().italic().color(Rgb::RED));
    }
}
