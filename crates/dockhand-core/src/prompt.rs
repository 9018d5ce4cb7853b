use std::cell::RefCell;
use std::collections::VecDeque;

use crate::{Error, Result};

/// One selectable option in a single-choice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub label: &'static str,
    pub description: &'static str,
}

/// Operator interaction used by the tag resolver and the deploy pipeline.
///
/// The CLI backs this with a terminal; tests and unattended runs use
/// [`ScriptedPrompter`].
pub trait Prompter {
    /// Ask the operator to pick one option. Returns the chosen index.
    fn choose_one(&self, prompt: &str, options: &[Choice], default: usize) -> Result<usize>;

    /// Ask for a line of free text. The answer is returned as entered.
    fn read_line(&self, prompt: &str) -> Result<String>;

    /// Show a final message and block until the operator acknowledges it.
    fn acknowledge(&self, message: &str) -> Result<()>;
}

/// Prompter that answers from pre-recorded input.
///
/// An exhausted choice queue answers with the default option, the same as an
/// operator pressing Enter. An exhausted line queue is an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    choices: RefCell<VecDeque<usize>>,
    lines: RefCell<VecDeque<String>>,
    acknowledged: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choice(self, index: usize) -> Self {
        self.choices.borrow_mut().push_back(index);
        self
    }

    pub fn with_line(self, line: impl Into<String>) -> Self {
        self.lines.borrow_mut().push_back(line.into());
        self
    }

    /// Messages passed to [`Prompter::acknowledge`], in order.
    pub fn acknowledged(&self) -> Vec<String> {
        self.acknowledged.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn choose_one(&self, prompt: &str, options: &[Choice], default: usize) -> Result<usize> {
        let index = self.choices.borrow_mut().pop_front().unwrap_or(default);
        if index >= options.len() {
            return Err(Error::Prompt {
                detail: format!(
                    "{prompt}: choice {index} out of range ({} options)",
                    options.len()
                ),
            });
        }
        Ok(index)
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        self.lines
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Prompt {
                detail: format!("{prompt}: no input available"),
            })
    }

    fn acknowledge(&self, message: &str) -> Result<()> {
        self.acknowledged.borrow_mut().push(message.to_owned());
        Ok(())
    }
}
