//! Operator console primitives.
//!
//! Every interactive protocol reads through [`Console`], so the same step logic
//! runs against the terminal or against a scripted transcript in tests.
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub trait Console {
    /// Read one line without its line terminator. Closed input is an error.
    fn read_line(&mut self) -> Result<String>;

    /// Write text as-is (no newline is added).
    fn write(&mut self, text: &str) -> Result<()>;

    fn say(&mut self, line: &str) -> Result<()> {
        self.write(line)?;
        self.write("\n")
    }

    /// Print `message` and read the answer line.
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.write(message)?;
        self.read_line()
    }

    /// Read a single-character answer: the first non-blank character of the
    /// next line, rest of the line discarded. Blank lines are skipped.
    fn read_char(&mut self) -> Result<char> {
        loop {
            let line = self.read_line()?;
            if let Some(ch) = line.chars().find(|ch| !ch.is_whitespace()) {
                return Ok(ch);
            }
        }
    }

    /// Ask a yes/no question; only `Y`/`y` counts as yes.
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.write(message)?;
        Ok(matches!(self.read_char()?, 'Y' | 'y'))
    }
}

/// Console over any buffered reader and writer.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self) -> Result<String> {
        self.output.flush().context("flush console output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("read console input")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .context("write console output")
    }
}

/// Marker error for end of operator input.
#[derive(Debug, thiserror::Error)]
#[error("operator input closed")]
pub struct InputClosed;

/// True when `err` was caused by closed operator input.
pub fn is_input_closed(err: &anyhow::Error) -> bool {
    err.downcast_ref::<InputClosed>().is_some()
}

/// Scripted console for tests: answers come from `script`, output is captured.
#[cfg(test)]
pub(crate) fn scripted(script: &str) -> LineConsole<io::Cursor<Vec<u8>>, Vec<u8>> {
    LineConsole::new(io::Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

#[cfg(test)]
pub(crate) fn transcript(console: LineConsole<io::Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).expect("console output is UTF-8")
}
