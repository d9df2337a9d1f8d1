//! User-confirmation port for destructive actions.

use std::io::{self, BufRead, Write};

/// Asks the user to approve an irreversible action
pub trait Confirmation: Send + Sync {
    /// Return true only if the user explicitly approved
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed answer, for `--yes` flags and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Interactive y/N prompt on stderr, answer read from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{} [y/N] ", prompt);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("Delete?"));
        assert!(!AutoConfirm(false).confirm("Delete?"));
    }
}
