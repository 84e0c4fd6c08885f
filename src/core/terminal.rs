use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// The session's view of the console: a line source, a sink for prompts and
/// reports, and a sink for error lines.
pub struct Terminal<R, W, E> {
    input: R,
    out: W,
    err: E,
}

impl<R: BufRead, W: Write, E: Write> Terminal<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self { input, out, err }
    }

    /// Next input line without its line terminator, or `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Writes `text` without a newline and flushes so it shows before input.
    pub fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.read_line()
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn complain(&mut self, text: &str) -> Result<()> {
        writeln!(self.err, "{}", text)?;
        self.err.flush()?;
        Ok(())
    }
}
