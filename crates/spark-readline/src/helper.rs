//! rustyline helper: slash-command completion, hints and highlighting.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use spark_core::view::View;
use strum::IntoEnumIterator;

use crate::command::COMMANDS;

#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    view_ids: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
            view_ids: View::iter().map(|view| view.to_string()).collect(),
        }
    }

    /// Candidates for the word under the cursor, with its start offset.
    fn candidates<'a>(&'a self, line: &'a str) -> (usize, Vec<&'a String>) {
        if let Some(arg) = line.strip_prefix("/view ") {
            let start = line.len() - arg.len();
            let matches = self
                .view_ids
                .iter()
                .filter(|id| id.starts_with(arg))
                .collect();
            return (start, matches);
        }
        if line.starts_with('/') && !line.contains(' ') {
            let matches = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .collect();
            return (0, matches);
        }
        (0, Vec::new())
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        let (start, matches) = self.candidates(line);
        let typed = &line[start..];
        matches
            .into_iter()
            .find(|candidate| candidate.len() > typed.len())
            .map(|candidate| candidate[typed.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_candidates() {
        let helper = CliHelper::new();
        let (start, matches) = helper.candidates("/m");
        assert_eq!(start, 0);
        let names: Vec<&str> = matches.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["/match", "/messages", "/mode"]);
    }

    #[test]
    fn test_view_argument_candidates() {
        let helper = CliHelper::new();
        let (start, matches) = helper.candidates("/view ai");
        assert_eq!(start, "/view ".len());
        let ids: Vec<&str> = matches.iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["ai-coach"]);
    }

    #[test]
    fn test_plain_text_has_no_candidates() {
        let helper = CliHelper::new();
        assert!(helper.candidates("hello").1.is_empty());
    }
}
