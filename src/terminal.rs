//! Concrete terminal collaborators: stdin line input and styled line output.

use crate::error::PromptError;
use crate::prompts::{Emphasis, InputSource, OutputSink};
use crossterm::style::{Color, Stylize};
use std::io::{self, BufRead, Write};

const DIVIDER: &str =
    "----------------------------------------------------------------------";

/// Blocking stdin reader. The prompt text is written to stdout without a
/// trailing newline so the cursor waits on the same line.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        let mut stdout = io::stdout();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            // EOF: the terminal or pipe feeding us closed.
            return Err(PromptError::Interrupted(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed",
            )));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

/// Styled stdout line writer with a color on/off switch.
#[derive(Debug)]
pub struct Terminal {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Terminal {
    /// Create a terminal writer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a horizontal divider line.
    pub fn divider(&mut self) {
        self.write_line(DIVIDER, Emphasis::Plain);
    }

    pub fn newline(&mut self) {
        println!();
    }
}

impl OutputSink for Terminal {
    fn write_line(&mut self, text: &str, emphasis: Emphasis) {
        if !self.color {
            println!("{text}");
            return;
        }
        match emphasis {
            Emphasis::Plain => println!("{text}"),
            Emphasis::Error => println!("{}", text.with(Color::Red)),
            Emphasis::Success => println!("{}", text.with(Color::Green).bold()),
            Emphasis::Notice => println!("{}", text.with(Color::Blue)),
            Emphasis::Warning => println!("{}", text.with(Color::Yellow)),
            Emphasis::Heading => println!("{}", text.with(Color::DarkGrey)),
        }
    }
}
