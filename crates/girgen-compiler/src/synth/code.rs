//! Indented line buffer for generated Go.

#[derive(Debug, Default)]
pub(crate) struct Code {
    buf: String,
    depth: usize,
}

impl Code {
    /// Buffer whose lines start at `depth` tabs.
    pub fn new(depth: usize) -> Self {
        Self {
            buf: String::new(),
            depth,
        }
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        for _ in 0..self.depth {
            self.buf.push('\t');
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
        self
    }

    /// Emit `text {` and indent what follows.
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(format!("{} {{", text.as_ref()));
        self.depth += 1;
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.close_with("")
    }

    /// Dedent and emit `}` followed by `tail`, e.g. `()` for a called literal.
    pub fn close_with(&mut self, tail: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("}}{tail}"))
    }

    /// Append pre-rendered lines, shifting them by the current depth.
    pub fn block(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.line(line);
        }
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
