//! I/O handling

use nano_spec::Word;
use std::fmt;
use std::io::{self, Write};

/// Sink for `printi` output
///
/// Every value is recorded. An optional writer also receives each value as
/// a decimal line.
#[derive(Default)]
pub struct IOHandler {
    outputs: Vec<Word>,
    echo: Option<Box<dyn Write>>,
}

impl IOHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record values and also write them to `writer`
    pub fn with_echo(writer: impl Write + 'static) -> Self {
        IOHandler {
            outputs: Vec::new(),
            echo: Some(Box::new(writer)),
        }
    }

    pub fn print(&mut self, value: Word) -> io::Result<()> {
        self.outputs.push(value);
        if let Some(out) = self.echo.as_mut() {
            writeln!(out, "{value}")?;
            out.flush()?;
        }
        Ok(())
    }

    pub fn outputs(&self) -> &[Word] {
        &self.outputs
    }

    pub fn take_outputs(&mut self) -> Vec<Word> {
        std::mem::take(&mut self.outputs)
    }
}

impl fmt::Debug for IOHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IOHandler")
            .field("outputs", &self.outputs)
            .field("echo", &self.echo.is_some())
            .finish()
    }
}
