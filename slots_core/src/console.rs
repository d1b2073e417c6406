//! Line-oriented terminal I/O behind a swappable input source.

use crate::error::{SlotError, SlotResult};
use std::collections::VecDeque;
use std::io::{BufRead, Write};

pub trait InputSource {
    /// Next line without its line terminator, or `None` once input is exhausted.
    fn next_line(&mut self) -> SlotResult<Option<String>>;
}

/// Reads lines from any buffered reader, typically locked stdin.
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> InputSource for LineReader<R> {
    fn next_line(&mut self) -> SlotResult<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Hands out predetermined answers, for driving a session from tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn next_line(&mut self) -> SlotResult<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

pub struct Console<I, W> {
    input: I,
    output: W,
}

impl<I: InputSource, W: Write> Console<I, W> {
    pub fn new(input: I, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `text` without a newline and waits for the answer.
    pub fn prompt(&mut self, text: &str) -> SlotResult<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.input.next_line()?.ok_or(SlotError::InputClosed)
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> SlotResult<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (I, W) {
        (self.input, self.output)
    }
}
