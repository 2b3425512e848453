//! # Code Writer
//!
//! A small line buffer with indentation, used by every emitter to assemble
//! PHP source text.

/// Indentation unit of generated PHP (PSR-12: four spaces)
pub const INDENT: &str = "    ";

/// Line-oriented text builder
#[derive(Debug, Clone, Default)]
pub struct CodeWriter {
    lines: Vec<String>,
    level: usize,
}

impl CodeWriter {
    /// Create an empty writer at indentation level zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increase indentation by one level
    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Decrease indentation by one level (saturating at zero)
    pub fn outdent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Append one line at the current indentation.
    ///
    /// Empty text produces an empty line with no trailing whitespace.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{}", INDENT.repeat(self.level), text));
        }
        self
    }

    /// Append several lines at the current indentation
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line);
        }
        self
    }

    /// Append an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Write `open`, run `body` one level deeper, then write `close`
    pub fn block(
        &mut self,
        open: impl AsRef<str>,
        close: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(open);
        self.indent();
        body(self);
        self.outdent();
        self.line(close)
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume the writer and join the lines, ending with a newline
    pub fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
