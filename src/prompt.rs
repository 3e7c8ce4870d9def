//! Interactive confirmation.
//!
//! Deleting a widget needs the user's go-ahead. The board asks through the
//! [`Confirm`] trait so the CLI can prompt on the terminal while tests and
//! `--yes` answer directly.

use std::io::{self, BufRead, Write};

/// Question asked before a widget is deleted.
pub const DELETE_QUESTION: &str = "Delete this widget?";

/// Something that can answer a yes/no question.
pub trait Confirm {
    /// Returns `true` if the user agreed.
    fn confirm(&self, question: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, question: &str) -> bool {
        self(question)
    }
}

/// Answers yes without asking (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}

/// Prompts on stderr and reads one line from stdin. Anything other than
/// `y` or `yes` (case-insensitive) is a no, including EOF.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stderr = io::stderr();
        if write!(stderr, "{question} [y/N] ").and_then(|_| stderr.flush()).is_err() {
            return false;
        }
        read_answer(io::stdin().lock())
    }
}

/// Read one line and interpret it as a yes/no answer.
fn read_answer<R: BufRead>(mut reader: R) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_yes(&line),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        for answer in ["y", "Y", "yes", "YES", "  yes\n"] {
            assert!(is_yes(answer), "{answer:?} should be yes");
        }
    }

    #[test]
    fn no_answers() {
        for answer in ["", "n", "no", "yep", "\n"] {
            assert!(!is_yes(answer), "{answer:?} should be no");
        }
    }

    #[test]
    fn read_answer_eof_is_no() {
        assert!(!read_answer(io::empty()));
    }

    #[test]
    fn read_answer_reads_first_line_only() {
        assert!(read_answer("y\nn\n".as_bytes()));
    }

    #[test]
    fn closures_confirm() {
        let asked = std::cell::Cell::new(false);
        let confirm = |q: &str| {
            asked.set(q == DELETE_QUESTION);
            false
        };
        assert!(!confirm.confirm(DELETE_QUESTION));
        assert!(asked.get());
    }

    #[test]
    fn assume_yes_always_agrees() {
        assert!(AssumeYes.confirm(DELETE_QUESTION));
    }
}
