//! End-to-end prompt flows driven through the public API with scripted
//! collaborators standing in for the terminal.

use comp::error::PromptError;
use comp::prompts::{Emphasis, InputSource, OutputSink, Prompt};
use serde_json::json;
use std::collections::VecDeque;

struct Script {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl InputSource for Script {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().ok_or_else(|| {
            PromptError::Interrupted(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "script exhausted",
            ))
        })
    }
}

#[derive(Default)]
struct Sink {
    lines: Vec<(String, Emphasis)>,
}

impl OutputSink for Sink {
    fn write_line(&mut self, text: &str, emphasis: Emphasis) {
        self.lines.push((text.to_string(), emphasis));
    }
}

#[test]
fn selection_flow_over_issue_records() {
    let collection = json!([
        {"id": 1, "issue": {"slug": 2018, "dek": "2018 Issue"}},
        {"id": 2, "issue": {"slug": 2019, "dek": "2019 Issue"}},
    ]);
    let mut input = Script::new(&["zero", "9", "2"]);
    let mut output = Sink::default();
    let mut prompt = Prompt::selection(&collection, Some("issue.dek")).unwrap();

    let entry = prompt
        .ask("Choose an issue", &mut input, &mut output)
        .unwrap()
        .expect("a choice should be accepted");

    assert_eq!(entry.index(), Some(1));
    assert_eq!(entry.display_value().unwrap(), json!("2019 Issue"));
    assert_eq!(entry.source()["id"], json!(2));

    // The numbered list is printed once, then one message per bad answer.
    assert_eq!(
        output.lines,
        [
            ("(1) 2018 Issue".to_string(), Emphasis::Plain),
            ("(2) 2019 Issue".to_string(), Emphasis::Plain),
            (
                "Input must be an integer in range 1 to 2.".to_string(),
                Emphasis::Error
            ),
            (
                "Input must be an integer in range 1 to 2.".to_string(),
                Emphasis::Error
            ),
        ]
    );
    assert_eq!(
        input.prompts,
        vec!["Choose an issue (select by number) (q to quit) "; 3]
    );
}

#[test]
fn continual_yes_no_tallies_until_quit() {
    let mut input = Script::new(&["y", "nope", "no", "YES", "Q"]);
    let mut output = Sink::default();
    let mut prompt = Prompt::yes_no();

    let answers: Vec<bool> = prompt
        .ask_continually("Keep this container?", &mut input, &mut output)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(answers, [true, false, true]);
    assert_eq!(prompt.attempts(), 3);
    assert!(prompt.terminated());
    assert_eq!(
        output.lines,
        [(
            "Invalid choice, please type 'y' or 'n'".to_string(),
            Emphasis::Error
        )]
    );

    // The quit is sticky: a fresh ask on the same session reads nothing.
    let before = input.prompts.len();
    assert_eq!(
        prompt
            .ask("Keep this container?", &mut input, &mut output)
            .unwrap(),
        None
    );
    assert_eq!(input.prompts.len(), before);
}

#[test]
fn interrupted_source_aborts_without_a_value() {
    let mut input = Script::new(&[]);
    let mut output = Sink::default();
    let mut prompt = Prompt::free_text();
    let err = prompt
        .ask("Name", &mut input, &mut output)
        .expect_err("a closed source should interrupt the ask");
    assert!(matches!(err, PromptError::Interrupted(_)));
    assert!(!prompt.terminated());
    assert_eq!(prompt.attempts(), 0);
}
