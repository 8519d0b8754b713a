/// How the delimiter consumed by a split is given back to the segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reattach {
    /// Terminal punctuation is restored on every segment but the last.
    Sentence(char),
    /// A single line break is restored on every segment but the last.
    Line,
    /// A blank line is restored on every segment but the last.
    Paragraph,
    /// Nothing is restored; segments are packed greedily with spaces.
    Word,
}

impl Reattach {
    pub fn suffix(&self) -> Option<String> {
        match self {
            Reattach::Sentence(mark) => Some(mark.to_string()),
            Reattach::Line => Some("\n".to_string()),
            Reattach::Paragraph => Some("\n\n".to_string()),
            Reattach::Word => None,
        }
    }
}

/// Horizontal whitespace the word wave treats as a word boundary.
const WORD_SEPARATORS: [char; 2] = [' ', '\t'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitStrategy {
    pub name: &'static str,
    pub delimiter: &'static str,
    pub reattach: Reattach,
}

impl SplitStrategy {
    /// Cuts `text` at every delimiter. The word wave also breaks on tabs, so
    /// tab-separated words are packed like space-separated ones.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self.reattach {
            Reattach::Word => text.split(WORD_SEPARATORS).collect(),
            _ => text.split(self.delimiter).collect(),
        }
    }
}

/// Delimiters from largest semantic unit to smallest. Each entry runs as one
/// wave over every chunk still over budget after the previous wave.
pub const CASCADE: [SplitStrategy; 6] = [
    SplitStrategy {
        name: "paragraph",
        delimiter: "\n\n",
        reattach: Reattach::Paragraph,
    },
    SplitStrategy {
        name: "sentence",
        delimiter: ". ",
        reattach: Reattach::Sentence('.'),
    },
    SplitStrategy {
        name: "sentence-question",
        delimiter: "? ",
        reattach: Reattach::Sentence('?'),
    },
    SplitStrategy {
        name: "sentence-exclamation",
        delimiter: "! ",
        reattach: Reattach::Sentence('!'),
    },
    SplitStrategy {
        name: "line",
        delimiter: "\n",
        reattach: Reattach::Line,
    },
    SplitStrategy {
        name: "word",
        delimiter: " ",
        reattach: Reattach::Word,
    },
];
