//! The seam through which the preset engine prompts the user and reports progress

use std::collections::VecDeque;
use std::io;

/// User-facing prompts and progress output
///
/// The TUI implementation lives in [`crate::tui`]; [`Scripted`] answers from a
/// queue and records everything it is shown.
pub trait Interaction {
    /// Ask a yes/no question
    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<bool>;

    /// Ask for free text
    fn input(&mut self, message: &str, default: &str) -> io::Result<String>;

    /// Announce a titled step that is about to run
    fn step(&mut self, title: &str) -> io::Result<()>;

    /// Report something that did not go as declared (e.g. a kept file)
    fn warning(&mut self, message: &str) -> io::Result<()>;

    /// Show post-run guidance
    fn instruct(&mut self, heading: &str, text: &str) -> io::Result<()>;
}

/// Pre-recorded answers, consumed in order
///
/// When the queue is empty the prompt's initial/default value is used.
#[derive(Debug, Default)]
pub struct Scripted {
    confirms: VecDeque<bool>,
    inputs: VecDeque<String>,
    /// Every message shown, prefixed with its kind
    pub transcript: Vec<String>,
}

impl Scripted {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn input_with(mut self, answer: impl Into<String>) -> Self {
        self.inputs.push_back(answer.into());
        self
    }

    /// Transcript entries of a given kind (`confirm`, `input`, `step`, `warning`, `instruct`)
    pub fn shown(&self, kind: &str) -> Vec<&str> {
        let prefix = format!("{}: ", kind);
        self.transcript
            .iter()
            .filter_map(|line| line.strip_prefix(prefix.as_str()))
            .collect()
    }
}

impl Interaction for Scripted {
    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<bool> {
        self.transcript.push(format!("confirm: {}", message));
        Ok(self.confirms.pop_front().unwrap_or(initial))
    }

    fn input(&mut self, message: &str, default: &str) -> io::Result<String> {
        self.transcript.push(format!("input: {}", message));
        Ok(self
            .inputs
            .pop_front()
            .unwrap_or_else(|| default.to_string()))
    }

    fn step(&mut self, title: &str) -> io::Result<()> {
        self.transcript.push(format!("step: {}", title));
        Ok(())
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(format!("warning: {}", message));
        Ok(())
    }

    fn instruct(&mut self, heading: &str, text: &str) -> io::Result<()> {
        self.transcript.push(format!("instruct: {} {}", heading, text));
        Ok(())
    }
}
