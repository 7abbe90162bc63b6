use std::fmt;

/// Owned compiler/linker diagnostic text.
///
/// Log text is normalized on construction (trailing NULs and whitespace
/// stripped), so an implementation that reports a zero-length or
/// terminator-only log yields an empty `DiagnosticLog` rather than stale text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticLog {
    text: String,
}

impl DiagnosticLog {
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        let keep = text.trim_end_matches(|c: char| c == '\0' || c.is_whitespace()).len();
        text.truncate(keep);
        Self { text }
    }

    /// Joins individual diagnostics, one per line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self::new(text)
    }

    /// Builds a log from an error and its `source()` chain.
    pub fn from_error_chain(err: &dyn std::error::Error) -> Self {
        let mut lines = vec![err.to_string()];
        let mut cause = err.source();
        while let Some(e) = cause {
            lines.push(format!("caused by: {e}"));
            cause = e.source();
        }
        Self::from_lines(lines)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Writes the log at error level, one record per line, prefixed by `what`.
    pub fn emit(&self, what: &str) {
        if self.is_empty() {
            log::error!("{what}: <no diagnostic output>");
            return;
        }
        for line in self.lines() {
            log::error!("{what}: {line}");
        }
    }
}

impl fmt::Display for DiagnosticLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("<no diagnostic output>")
        } else {
            f.write_str(&self.text)
        }
    }
}
