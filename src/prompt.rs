//! Console prompts for the source and target directories

use crate::error::Result;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Asks for paths on a line-oriented console.
///
/// Input is consumed one whitespace-delimited token at a time: blank lines are
/// skipped, and a line holding several tokens answers several prompts in turn.
pub struct PathPrompt<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> PathPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Prints `message` and reads the next token as a path.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn ask(&mut self, message: &str) -> Result<Option<PathBuf>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        Ok(self.next_token()?.map(PathBuf::from))
    }

    /// Console the prompts are written to
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }

        Ok(self.pending.pop_front())
    }
}
