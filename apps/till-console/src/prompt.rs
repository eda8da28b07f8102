//! # Prompt
//!
//! The line-oriented channel the session talks through. `Terminal` wraps
//! any reader/writer pair: stdin/stdout in production, an in-memory cursor
//! and buffer in tests.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// A line-based conversation with the customer.
pub trait Prompt {
    /// Prints one line.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Prints `question` without a newline and reads the answer.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;
}

/// Prompt over a reader and a writer.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Terminal { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Terminal<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Terminal::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let answer = line.trim_end_matches(&['\n', '\r'][..]).to_string();
        Ok(Some(answer))
    }
}
