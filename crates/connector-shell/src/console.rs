//! Terminal implementation of the interactive collaborator
//!
//! Answer conventions at a field prompt:
//! - empty line keeps the current value
//! - a single `-` clears the value
//! - `?` prints the field help and asks again
//! - end of input cancels the edit

use std::io::{BufRead, Write};
use tracing::warn;

use connector_validation::session::filler::{NAME_FIELD, NAME_FORM};
use connector_validation::{FieldInput, FieldPrompt, InteractiveIo, Result};

/// Answer that clears a field
pub const CLEAR_TOKEN: &str = "-";
/// Answer that shows the field help
pub const HELP_TOKEN: &str = "?";

const MASK: &str = "********";

/// Line-oriented console over any reader and writer
pub struct ConsoleIo<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn prompt(&mut self, prompt: &FieldPrompt, current: Option<&str>) -> Result<()> {
        match current {
            Some(_) if prompt.sensitive => write!(self.writer, "{} [{}]: ", prompt.label, MASK)?,
            Some(value) => write!(self.writer, "{} [{}]: ", prompt.label, value)?,
            None => write!(self.writer, "{}: ", prompt.label)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl ConsoleIo<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Console bound to the process stdin and stdout
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveIo for ConsoleIo<R, W> {
    fn read_field(&mut self, prompt: &FieldPrompt, current: Option<&str>) -> Result<FieldInput> {
        loop {
            self.prompt(prompt, current)?;

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                writeln!(self.writer)?;
                return Ok(FieldInput::Cancel);
            }

            let answer = line.trim_end_matches(&['\r', '\n'][..]);
            match answer {
                "" => return Ok(FieldInput::Value(current.map(str::to_string))),
                CLEAR_TOKEN => return Ok(FieldInput::Value(None)),
                HELP_TOKEN => {
                    let help = prompt.help.as_deref().unwrap_or("No help available");
                    writeln!(self.writer, "  {}", help)?;
                }
                value => return Ok(FieldInput::Value(Some(value.to_string()))),
            }
        }
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        Ok(())
    }
}

/// Cancels a session once a number of edit passes has been started
///
/// The correction loop itself never stops on its own; scripted callers wrap
/// their collaborator in this to bound it.
pub struct AttemptLimit<I> {
    inner: I,
    max_passes: u32,
    passes: u32,
}

impl<I: InteractiveIo> AttemptLimit<I> {
    pub fn new(inner: I, max_passes: u32) -> Self {
        Self {
            inner,
            max_passes,
            passes: 0,
        }
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: InteractiveIo> InteractiveIo for AttemptLimit<I> {
    fn read_field(&mut self, prompt: &FieldPrompt, current: Option<&str>) -> Result<FieldInput> {
        // Every edit pass starts with the entity name
        if prompt.form == NAME_FORM && prompt.field == NAME_FIELD {
            if self.passes >= self.max_passes {
                warn!(max_passes = self.max_passes, "Edit pass limit reached, cancelling");
                self.inner.show_text(&format!(
                    "Giving up after {} edit pass(es)",
                    self.max_passes
                ))?;
                return Ok(FieldInput::Cancel);
            }
            self.passes += 1;
        }
        self.inner.read_field(prompt, current)
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        self.inner.show_text(text)
    }
}
