//! Shared utilities for commands

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin; anything but `y` means no
pub fn confirm(question: &str) -> Result<bool> {
    let stdin = io::stdin();
    confirm_from(&mut stdin.lock(), question)
}

fn confirm_from<R: BufRead>(input: &mut R, question: &str) -> Result<bool> {
    print!("{} (y/N) ", question);
    io::stdout().flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read answer from stdin")?;

    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Keep the console window open until the user presses Enter
pub fn pause(enabled: bool) -> Result<()> {
    if !enabled {
        return Ok(());
    }

    print!("\nPress Enter to exit...");
    io::stdout().flush()?;

    let mut line = String::new();
    // EOF is as good as Enter here
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" Y \r\n"));
        assert!(!is_yes("yes\n"));
        assert!(!is_yes("n\n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_confirm_from_reader() {
        let mut input = io::Cursor::new("y\n");
        assert!(confirm_from(&mut input, "Restart?").unwrap());

        let mut input = io::Cursor::new("\n");
        assert!(!confirm_from(&mut input, "Restart?").unwrap());
    }

    #[test]
    fn test_confirm_eof_is_no() {
        let mut input = io::Cursor::new("");
        assert!(!confirm_from(&mut input, "Restart?").unwrap());
    }

    #[test]
    fn test_pause_disabled() {
        assert!(pause(false).is_ok());
    }
}
