//! Shared test fakes for prompt-driven test modules.
//!
//! Unit tests across `prompts` and the workflow code need the same two
//! collaborators: a scripted input source and a recording output sink.
//! Keeping them here prevents each test module from rebuilding ad-hoc fakes.

use crate::error::PromptError;
use crate::prompts::{Emphasis, InputSource, OutputSink};
use std::collections::VecDeque;

/// Input source that replays a fixed script of lines and records every
/// prompt string it was shown. An exhausted script reads as an interrupted
/// source.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    reads: usize,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            reads: 0,
        }
    }

    /// Every prompt string passed to `read_line`, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// How many reads were attempted, including the failing one.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.reads += 1;
        self.lines.pop_front().ok_or_else(|| {
            PromptError::Interrupted(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input script exhausted",
            ))
        })
    }
}

/// Output sink that records every line together with its emphasis tag.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    lines: Vec<(String, Emphasis)>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(String, Emphasis)] {
        &self.lines
    }
}

impl OutputSink for RecordingOutput {
    fn write_line(&mut self, text: &str, emphasis: Emphasis) {
        self.lines.push((text.to_string(), emphasis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_replays_then_interrupts() {
        let mut input = ScriptedInput::new(["a", "b"]);
        assert_eq!(input.read_line("p1 ").unwrap(), "a");
        assert_eq!(input.read_line("p2 ").unwrap(), "b");
        assert!(input.read_line("p3 ").is_err());
        assert_eq!(input.prompts(), ["p1 ", "p2 ", "p3 "]);
        assert_eq!(input.reads(), 3);
    }

    #[test]
    fn recording_output_keeps_emphasis_tags() {
        let mut output = RecordingOutput::new();
        output.write_line("ok", Emphasis::Success);
        output.write_line("bad", Emphasis::Error);
        assert_eq!(
            output.lines(),
            [
                ("ok".to_string(), Emphasis::Success),
                ("bad".to_string(), Emphasis::Error),
            ]
        );
    }
}
