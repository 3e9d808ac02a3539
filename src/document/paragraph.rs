//! Paragraph block (w:p)

use crate::document::{Run, RunFormat};

/// Paragraph justification (`w:jc`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value written to `w:jc/@w:val`
    pub fn as_ooxml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }

    /// Map a `w:jc/@w:val`, accepting the transitional and strict spellings
    pub fn from_ooxml(val: &str) -> Option<Self> {
        match val {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// A body paragraph
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paragraph {
    alignment: Option<Alignment>,
    runs: Vec<Run>,
}

impl Paragraph {
    /// Create an empty paragraph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.alignment = alignment;
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
    fn test_alignment_mapping() {
        for alignment in [
            Alignment::Left,
            Alignment::Center,
            Alignment::Right,
            Alignment::Justify,
        ] {
            assert_eq!(Alignment::from_ooxml(alignment.as_ooxml()), Some(alignment));
        }
        assert_eq!(Alignment::from_ooxml("start"), Some(Alignment::Left));
        assert_eq!(Alignment::from_ooxml("mediumKashida"), None);
    }

    #[test]
    fn test_runs_concatenate() {
        let mut para = Paragraph::new();
        para.append_run("(p < 0.001)", RunFormat::new().bold());
        para.append_run(" in the treatment group", RunFormat::new());

        assert_eq!(para.text(), "(p < 0.001) in the treatment group");
        assert_eq!(para.runs().len(), 2);
        assert!(para.runs()[0].bold());
        assert!(!para.runs()[1].bold());
    }
}
