use dialoguer::{Input, Select};
use dockhand_core::{Choice, Error, Prompter};
use std::cell::RefCell;
use std::io::{BufRead, IsTerminal};

/// Terminal-backed prompter.
///
/// When stdin or stdout is not a terminal (pipes, `nohup`, CI) every prompt
/// reads one plain line from stdin instead, through [`LinePrompter`].
pub(crate) struct ConsolePrompter;

fn interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

fn stdin_prompter() -> LinePrompter<std::io::StdinLock<'static>> {
    LinePrompter::new(std::io::stdin().lock())
}

impl Prompter for ConsolePrompter {
    fn choose_one(
        &self,
        prompt: &str,
        options: &[Choice],
        default: usize,
    ) -> dockhand_core::Result<usize> {
        if !interactive() {
            return stdin_prompter().choose_one(prompt, options, default);
        }

        let items: Vec<String> = options
            .iter()
            .map(|c| format!("{:<6} {}", c.label, c.description))
            .collect();
        Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn read_line(&self, prompt: &str) -> dockhand_core::Result<String> {
        if !interactive() {
            return stdin_prompter().read_line(prompt);
        }

        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_error)
    }

    fn acknowledge(&self, message: &str) -> dockhand_core::Result<()> {
        if !interactive() {
            return stdin_prompter().acknowledge(message);
        }

        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map(|_| ())
            .map_err(prompt_error)
    }
}

fn prompt_error(err: dialoguer::Error) -> Error {
    Error::Prompt {
        detail: err.to_string(),
    }
}

/// Prompter that answers from plain input lines, one answer per line.
///
/// - choice: empty line or end of input picks the default; otherwise a
///   1-based index or an option label (case-insensitive)
/// - free text: the line without its terminator; end of input is an error
/// - acknowledgment: any line, or end of input
pub(crate) struct LinePrompter<R> {
    input: RefCell<R>,
}

impl<R: BufRead> LinePrompter<R> {
    pub(crate) fn new(input: R) -> Self {
        Self {
            input: RefCell::new(input),
        }
    }

    /// Next line without its terminator, `None` at end of input.
    fn next_line(&self) -> dockhand_core::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .borrow_mut()
            .read_line(&mut line)
            .map_err(|e| Error::Prompt {
                detail: format!("failed to read stdin: {e}"),
            })?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn choose_one(
        &self,
        prompt: &str,
        options: &[Choice],
        default: usize,
    ) -> dockhand_core::Result<usize> {
        println!("{prompt}:");
        for (i, choice) in options.iter().enumerate() {
            println!("  {}) {:<6} {}", i + 1, choice.label, choice.description);
        }

        let Some(line) = self.next_line()? else {
            return Ok(default);
        };
        let answer = line.trim();
        if answer.is_empty() {
            return Ok(default);
        }

        if let Ok(index) = answer.parse::<usize>()
            && index >= 1
            && index <= options.len()
        {
            return Ok(index - 1);
        }

        options
            .iter()
            .position(|c| c.label.eq_ignore_ascii_case(answer))
            .ok_or_else(|| Error::Prompt {
                detail: format!("{prompt}: unrecognized choice '{answer}'"),
            })
    }

    fn read_line(&self, prompt: &str) -> dockhand_core::Result<String> {
        println!("{prompt}:");
        self.next_line()?.ok_or_else(|| Error::Prompt {
            detail: format!("{prompt}: no input available"),
        })
    }

    fn acknowledge(&self, message: &str) -> dockhand_core::Result<()> {
        println!("{message}");
        if self.next_line()?.is_none() {
            tracing::debug!("stdin closed, taking it as acknowledgment");
        }
        Ok(())
    }
}
