//! Prompt handler for interactive input.
//!
//! The `input` builtin reads through whichever handler the `Context` owns:
//! - Native: stdin (default)
//! - Tests: a scripted queue of lines
//!
//! Uses enum dispatch instead of trait objects, matching the closed set of
//! destinations.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::errors::{ExcKind, RtError, RtResult};

/// Reads lines from stdin after printing the prompt to stdout.
#[derive(Default)]
pub struct StdinPromptHandler;

impl StdinPromptHandler {
    /// Show `prompt` and read one line without its trailing newline.
    pub fn read_line(&self, prompt: &str) -> RtResult<String> {
        let mut stdout = io::stdout();
        // A broken stdout only loses the prompt text, never the input.
        let _ = stdout.write_all(prompt.as_bytes());
        let _ = stdout.flush();

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| RtError::new(ExcKind::EOFError, e.to_string()))?;
        if read == 0 {
            return Err(eof());
        }
        Ok(strip_newline(line))
    }
}

/// Replays a fixed queue of lines and records every prompt shown.
pub struct ScriptedPromptHandler {
    lines: RefCell<VecDeque<String>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedPromptHandler {
    /// Create a handler that answers with `lines` in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPromptHandler {
            lines: RefCell::new(lines.into_iter().map(Into::into).collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Record `prompt` and pop the next scripted line.
    pub fn read_line(&self, prompt: &str) -> RtResult<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.lines
            .borrow_mut()
            .pop_front()
            .map(strip_newline)
            .ok_or_else(eof)
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

/// Prompt handler implementation using enum dispatch.
pub enum PromptHandler {
    /// Reads stdin (default).
    Stdin(StdinPromptHandler),
    /// Replays scripted lines (testing).
    Scripted(ScriptedPromptHandler),
}

impl PromptHandler {
    /// Show `prompt` and read one line without its trailing newline.
    pub fn read_line(&self, prompt: &str) -> RtResult<String> {
        match self {
            Self::Stdin(h) => h.read_line(prompt),
            Self::Scripted(h) => h.read_line(prompt),
        }
    }

    /// Prompts recorded by a scripted handler; empty for stdin.
    pub fn prompts(&self) -> Vec<String> {
        match self {
            Self::Stdin(_) => Vec::new(),
            Self::Scripted(h) => h.prompts(),
        }
    }
}

impl Default for PromptHandler {
    fn default() -> Self {
        Self::Stdin(StdinPromptHandler)
    }
}

fn eof() -> RtError {
    RtError::new(ExcKind::EOFError, "EOF when reading a line")
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scripted_handler_strips_newline_and_records_prompt() {
        let handler = PromptHandler::Scripted(ScriptedPromptHandler::new(["alice\n", "bob\r\n"]));
        assert_eq!(handler.read_line("name? ").ok(), Some("alice".to_string()));
        assert_eq!(handler.read_line("").ok(), Some("bob".to_string()));
        assert_eq!(handler.prompts(), vec!["name? ".to_string(), String::new()]);
    }

    #[test]
    fn scripted_handler_reports_eof() {
        let handler = ScriptedPromptHandler::new(Vec::<String>::new());
        let err = handler.read_line("> ").err();
        assert_eq!(err.map(|e| e.kind), Some(ExcKind::EOFError));
    }
}
