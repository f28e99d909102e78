//! Operator prompts
//!
//! Every selection of the batch order is made through a [`ChoiceProvider`].
//! [`ConsolePrompt`] serves it over any line reader and writer, which covers
//! the terminal, answer files and tests alike.

use chrono::NaiveDate;
use std::io::{self, BufRead, Cursor, Write};

use crate::{
    error::{AppError, AppResult},
    models::Choice,
};

/// Date format accepted for deadlines
pub const DATE_INPUT_FORMAT: &str = "%m/%d/%Y";

pub trait ChoiceProvider {
    /// Offer `options` and return the index of the chosen one
    fn choose(&mut self, question: &str, options: &[&str]) -> AppResult<usize>;

    /// Ask for a `MM/DD/YYYY` date
    fn date(&mut self, question: &str) -> AppResult<NaiveDate>;

    /// Ask for one line of free text
    fn text(&mut self, question: &str) -> AppResult<String>;

    /// Show a message that needs no answer
    fn notice(&mut self, message: &str) -> AppResult<()>;
}

/// Ask `question` with every option of `T`
pub fn select<T, P>(provider: &mut P, question: &str) -> AppResult<T>
where
    T: Choice,
    P: ChoiceProvider + ?Sized,
{
    let labels: Vec<&str> = T::OPTIONS.iter().map(|option| option.label()).collect();
    let idx = provider.choose(question, &labels)?;
    T::OPTIONS
        .get(idx)
        .copied()
        .ok_or_else(|| AppError::Internal(format!("Choice {} out of range for '{}'", idx, question)))
}

/// Line-oriented prompt: numbered options, answers read one line at a time
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, with everything shown so far
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_answer(&mut self) -> AppResult<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InvalidInput(
                "Input ended before every question was answered".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }

    fn ask(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_answer()
    }
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the terminal
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl ConsolePrompt<Cursor<String>, io::Sink> {
    /// Replay prepared answers, one per line, without echoing prompts
    pub fn scripted(answers: impl Into<String>) -> Self {
        Self::new(Cursor::new(answers.into()), io::sink())
    }
}

impl<R: BufRead, W: Write> ChoiceProvider for ConsolePrompt<R, W> {
    fn choose(&mut self, question: &str, options: &[&str]) -> AppResult<usize> {
        writeln!(self.output, "{}", question)?;
        for (idx, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, option)?;
        }

        // Only the listed keys are accepted; "01" or "+1" are not
        let mut answer = self.ask("Enter your choice: ")?;
        loop {
            match (0..options.len()).find(|idx| answer == (idx + 1).to_string()) {
                Some(idx) => return Ok(idx),
                None => answer = self.ask("Invalid choice. Try again: ")?,
            }
        }
    }

    fn date(&mut self, question: &str) -> AppResult<NaiveDate> {
        writeln!(self.output, "{} (format: MM/DD/YYYY)", question)?;
        loop {
            let answer = self.ask("Enter the date: ")?;
            match NaiveDate::parse_from_str(&answer, DATE_INPUT_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => writeln!(self.output, "Invalid format. Please enter date as MM/DD/YYYY.")?,
            }
        }
    }

    fn text(&mut self, question: &str) -> AppResult<String> {
        writeln!(self.output, "{}", question)?;
        self.ask("> ")
    }

    fn notice(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessLevel, StorageClass};

    fn console(answers: &str) -> ConsolePrompt<Cursor<String>, Vec<u8>> {
        ConsolePrompt::new(Cursor::new(answers.to_string()), Vec::new())
    }

    #[test]
    fn test_choose_lists_numbered_options() {
        let mut prompt = console("2\n");
        let idx = prompt.choose("Pick one", &["First", "Second"]).unwrap();
        assert_eq!(idx, 1);

        let shown = String::from_utf8(prompt.output).unwrap();
        assert_eq!(shown, "Pick one\n1. First\n2. Second\nEnter your choice: ");
    }

    #[test]
    fn test_invalid_choice_is_asked_again() {
        let mut prompt = console("0\nthree\n 3 \n");
        let level: AccessLevel = select(&mut prompt, "Access level?").unwrap();
        assert_eq!(level, AccessLevel::NoAccess);

        let shown = String::from_utf8(prompt.output).unwrap();
        assert_eq!(shown.matches("Invalid choice. Try again: ").count(), 2);
    }

    #[test]
    fn test_only_listed_keys_are_accepted() {
        let mut prompt = console("+1\n01\n1.\n2\n");
        let idx = prompt.choose("Pick one", &["First", "Second"]).unwrap();
        assert_eq!(idx, 1);

        let shown = String::from_utf8(prompt.output).unwrap();
        assert_eq!(shown.matches("Invalid choice. Try again: ").count(), 3);
    }

    #[test]
    fn test_date_retries_until_valid() {
        let mut prompt = console("2026-11-02\n11/2/26x\n11/02/2026\n");
        let date = prompt.date("Rush deadline").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 11, 2).unwrap());

        let shown = String::from_utf8(prompt.output).unwrap();
        assert!(shown.starts_with("Rush deadline (format: MM/DD/YYYY)\n"));
        assert_eq!(shown.matches("Invalid format.").count(), 2);
    }

    #[test]
    fn test_end_of_input() {
        let mut prompt = ConsolePrompt::scripted("9\n");
        let result: AppResult<StorageClass> = select(&mut prompt, "Storage class?");
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_text_is_trimmed() {
        let mut prompt = ConsolePrompt::scripted("  awm lp 1, awm sc 2  \n");
        assert_eq!(prompt.text("Call numbers?").unwrap(), "awm lp 1, awm sc 2");
    }
}
