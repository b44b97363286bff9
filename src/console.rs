// 💬 Console - line-oriented input/output for the interactive session

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use thiserror::Error;

/// Input source is exhausted (stdin closed, script finished)
#[derive(Debug, Error)]
#[error("end of input")]
pub struct InputClosed;

/// Console - where the session prints and reads
///
/// The menu and checkout only talk to this trait, so tests can drive them
/// with scripted input.
pub trait Console {
    /// Print one line
    fn say(&mut self, line: &str) -> Result<()>;

    /// Print `prompt` (no newline) and read one line, without the line ending.
    /// End of input is reported as [`InputClosed`].
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Console over any buffered reader and writer (stdin/stdout in the binary)
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    /// Give back the writer (tests read what was printed)
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to console")
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from console")?;
        if read == 0 {
            return Err(InputClosed.into());
        }

        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
