//! Interactive read-validate-retry prompting.
//!
//! A [`Prompt`] repeatedly asks an [`InputSource`] for a line, checks the quit
//! sentinel (`q`, case-insensitive), and runs the active [`ValidationRule`].
//! Validation misses are reported through the [`OutputSink`] and retried in a
//! loop; only an interrupted read escapes to the caller. Each prompt owns its
//! own session state (accepted-answer count, terminated flag), so one value
//! request or one continual-input stream gets a fresh instance.

use crate::choices::{resolve_choices, ChoiceEntry, ResolveOptions};
use crate::error::{PromptError, ResolveError};
use serde_json::Value;
use std::fmt;

/// Rendering emphasis for one output line. The concrete sink decides how to
/// style each tag; the prompt core never depends on the rendering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Emphasis {
    Plain,
    Error,
    Success,
    Notice,
    Warning,
    Heading,
}

/// Blocking line input supplied by the caller layer.
pub trait InputSource {
    /// Display `prompt` and read one line (without its trailing newline).
    /// A failed or closed source yields [`PromptError::Interrupted`].
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
}

/// Line output supplied by the caller layer.
pub trait OutputSink {
    fn write_line(&mut self, text: &str, emphasis: Emphasis);
}

/// Why a raw line failed validation. These are values, not errors: the prompt
/// loop writes them to the sink and asks again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidInput {
    /// Input was not one of y/yes/n/no.
    YesNo,
    /// Selection input did not parse as an integer.
    NonInteger { max: usize },
    /// Selection integer fell outside `1..=max`.
    OutOfRange { max: usize },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YesNo => write!(f, "Invalid choice, please type 'y' or 'n'"),
            Self::NonInteger { max } | Self::OutOfRange { max } => {
                write!(f, "Input must be an integer in range 1 to {max}.")
            }
        }
    }
}

/// Validate one raw line into a typed value, or say why it is invalid.
pub trait ValidationRule {
    type Output: Clone;

    fn validate(&self, raw: &str) -> Result<Self::Output, InvalidInput>;

    /// Short hint shown ahead of the quit hint, e.g. `y/n`.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Lines written before the first read of a fresh session.
    fn preamble(&self) -> &[String] {
        &[]
    }
}

/// Accepts anything and returns the raw line unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeText;

impl ValidationRule for FreeText {
    type Output = String;

    fn validate(&self, raw: &str) -> Result<String, InvalidInput> {
        Ok(raw.to_string())
    }
}

/// Maps y/yes/n/no (trimmed, case-insensitive) to a boolean.
#[derive(Clone, Copy, Debug, Default)]
pub struct YesNo;

impl ValidationRule for YesNo {
    type Output = bool;

    fn validate(&self, raw: &str) -> Result<bool, InvalidInput> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            _ => Err(InvalidInput::YesNo),
        }
    }

    fn hint(&self) -> Option<&str> {
        Some("y/n")
    }
}

/// Selects one numbered choice entry by 1-based integer input.
///
/// Entries and their display lines are resolved eagerly at construction so
/// collection and field-path mistakes surface to the caller immediately
/// instead of mid-loop.
#[derive(Clone, Debug)]
pub struct Selection {
    entries: Vec<ChoiceEntry>,
    lines: Vec<String>,
}

impl Selection {
    pub fn new(collection: &Value, attribute_path: Option<&str>) -> Result<Self, ResolveError> {
        let entries = resolve_choices(
            collection,
            ResolveOptions {
                attribute_path,
                numbered: true,
                label: None,
            },
        )?;
        let lines = entries
            .iter()
            .map(ChoiceEntry::render)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries, lines })
    }

    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }
}

impl ValidationRule for Selection {
    type Output = ChoiceEntry;

    fn validate(&self, raw: &str) -> Result<ChoiceEntry, InvalidInput> {
        let max = self.entries.len();
        let n: i64 = raw
            .trim()
            .parse()
            .map_err(|_| InvalidInput::NonInteger { max })?;
        if n <= 0 || n as usize > max {
            return Err(InvalidInput::OutOfRange { max });
        }
        Ok(self.entries[(n - 1) as usize].clone())
    }

    fn hint(&self) -> Option<&str> {
        Some("select by number")
    }

    fn preamble(&self) -> &[String] {
        &self.lines
    }
}

/// One prompt session: a validation rule plus the state of the quit/retry
/// machine driving it.
pub struct Prompt<R: ValidationRule> {
    rule: R,
    attempts: u32,
    terminated: bool,
    last_response: Option<R::Output>,
}

impl Prompt<FreeText> {
    pub fn free_text() -> Self {
        Self::new(FreeText)
    }
}

impl Prompt<YesNo> {
    pub fn yes_no() -> Self {
        Self::new(YesNo)
    }
}

impl Prompt<Selection> {
    /// Build a selection prompt over a collection, numbering on.
    pub fn selection(collection: &Value, attribute_path: Option<&str>) -> Result<Self, ResolveError> {
        Ok(Self::new(Selection::new(collection, attribute_path)?))
    }
}

impl<R: ValidationRule> Prompt<R> {
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            attempts: 0,
            terminated: false,
            last_response: None,
        }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Accepted answers so far. Retries and quits do not count.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Whether the user has quit this session.
    pub fn terminated(&self) -> bool {
        self.terminated
    }

    /// The most recently accepted value, if any.
    pub fn last_response(&self) -> Option<&R::Output> {
        self.last_response.as_ref()
    }

    fn decorate(&self, text: &str) -> String {
        match self.rule.hint() {
            Some(hint) => format!("{text} ({hint}) (q to quit) "),
            None => format!("{text} (q to quit) "),
        }
    }

    /// Ask once: read and validate lines until one is accepted or the user
    /// quits. A quit (now or previously) yields `Ok(None)`; a terminated
    /// session is never read again.
    pub fn ask(
        &mut self,
        prompt_text: &str,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<Option<R::Output>, PromptError> {
        if self.terminated {
            return Ok(None);
        }
        if self.attempts == 0 {
            for line in self.rule.preamble() {
                output.write_line(line, Emphasis::Plain);
            }
        }
        let decorated = self.decorate(prompt_text);
        loop {
            let raw = input.read_line(&decorated)?;
            if raw.eq_ignore_ascii_case("q") {
                self.terminated = true;
                return Ok(None);
            }
            match self.rule.validate(&raw) {
                Ok(value) => {
                    self.attempts += 1;
                    self.last_response = Some(value.clone());
                    return Ok(Some(value));
                }
                Err(invalid) => output.write_line(&invalid.to_string(), Emphasis::Error),
            }
        }
    }

    /// Ask repeatedly, yielding each accepted value until the user quits.
    /// The stream is finite and not restartable: after a quit the session
    /// stays terminated.
    pub fn ask_continually<'a>(
        &'a mut self,
        prompt_text: &'a str,
        input: &'a mut dyn InputSource,
        output: &'a mut dyn OutputSink,
    ) -> Answers<'a, R> {
        Answers {
            prompt: self,
            text: prompt_text,
            input,
            output,
            done: false,
        }
    }
}

/// Pull-driven stream of accepted answers; each `next` runs one full ask
/// cycle. Fuses after a quit or an interrupted read.
pub struct Answers<'a, R: ValidationRule> {
    prompt: &'a mut Prompt<R>,
    text: &'a str,
    input: &'a mut dyn InputSource,
    output: &'a mut dyn OutputSink,
    done: bool,
}

impl<R: ValidationRule> Iterator for Answers<'_, R> {
    type Item = Result<R::Output, PromptError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.prompt.ask(self.text, self.input, self.output) {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
