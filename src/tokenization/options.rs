/// Options applied when building a [`Tokenizer`](super::Tokenizer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TokenizerOptions {
    /// Line number of the first line of text, for text that doesn't start at the top of a file
    pub starting_line_number: usize,
    /// Number of columns a tab advances to when measuring indentation
    pub tab_width: usize,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            starting_line_number: 1,
            tab_width: 4,
        }
    }
}

impl TokenizerOptions {
    /// Options for text that starts at the given line
    pub fn starting_at_line(starting_line_number: usize) -> Self {
        Self {
            starting_line_number,
            ..Self::default()
        }
    }

    /// Expand a column past a tab character to the next tab stop
    pub fn expand_tab(&self, column: usize) -> usize {
        if self.tab_width == 0 {
            return column;
        }
        let column = column + self.tab_width;
        column - column % self.tab_width
    }
}
