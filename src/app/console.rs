//! Console log for twinpane.
//!
//! Append-only; only the dispatcher writes to it.

/// Ordered console lines.
#[derive(Debug, Default, Clone)]
pub struct ConsoleLog {
    lines: Vec<String>,
}

impl ConsoleLog {
    pub fn new<I, S>(initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: initial.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a message, one line per `\n`-separated part.
    pub fn push(&mut self, message: impl AsRef<str>) {
        self.lines
            .extend(message.as_ref().split('\n').map(str::to_string));
    }

    /// Appends command output, dropping the trailing newline(s) first.
    pub fn push_output(&mut self, output: &str) {
        let trimmed = output.trim_end_matches('\n');
        if !trimmed.is_empty() {
            self.push(trimmed);
        }
    }

    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The last `n` lines, for display.
    pub fn tail(&self, n: usize) -> &[String] {
        &self.lines[self.lines.len().saturating_sub(n)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_splits_lines() {
        let mut log = ConsoleLog::new(["hello"]);
        log.push("a\nb");
        log.push_output("c\nd\n\n");
        log.push_output("\n");
        assert_eq!(log.lines(), &["hello", "a", "b", "c", "d"]);
        assert_eq!(log.tail(2), &["c", "d"]);
        assert_eq!(log.tail(99).len(), 5);
    }
}
