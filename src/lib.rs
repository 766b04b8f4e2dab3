//! Comp — scripts for working with the comp-community docker-compose stack.
//!
//! The library half of the crate carries the interactive prompt core
//! (choice resolution plus read-validate-retry prompting) and the
//! docker-compose wrapper the `comp` binary drives. Prompts talk to the
//! outside world only through the `InputSource`/`OutputSink` traits, so
//! workflows and tests can swap the terminal for scripted collaborators.
//!
//! # Quick start
//!
//! ```no_run
//! use comp::prompts::Prompt;
//! use comp::terminal::{StdinInput, Terminal};
//!
//! let mut input = StdinInput;
//! let mut terminal = Terminal::new(true);
//! let mut prompt = Prompt::yes_no();
//! let answer = prompt.ask("Continue?", &mut input, &mut terminal).unwrap();
//! println!("{answer:?}");
//! ```

pub mod choices;
pub mod compose;
pub mod config;
pub mod error;
pub mod prompts;
pub mod terminal;
#[cfg(test)]
pub mod testsupport;
