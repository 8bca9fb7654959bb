use std::collections::VecDeque;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::error::ScaffoldError;
use crate::generator::CommandKind;
use crate::names::EntityName;

/// Validator applied to each answer; `Err` carries the message shown to the user.
pub type Validator<'v> = &'v dyn Fn(&str) -> Result<(), String>;

/// Interactive line input.
///
/// The single operation keeps asking until an answer passes `validate`, or fails
/// with [`ScaffoldError::PromptFailed`] when input is aborted. Answers reach the
/// validator exactly as typed, without trimming, so a prompted entity name is held
/// to the same rule as one passed with `--name`.
pub trait Prompter {
    /// Ask `label` and return the first answer accepted by `validate`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::PromptFailed`] on interrupt, end of input or a terminal error.
    fn prompt_with_validator(
        &mut self,
        label: &str,
        validate: Validator<'_>,
    ) -> Result<String, ScaffoldError>;
}

/// [`Prompter`] reading from the terminal through `rustyline`.
///
/// The editor is created on first use, so commands run with `--name` never touch
/// the terminal.
#[derive(Default)]
pub struct LinePrompter {
    editor: Option<DefaultEditor>,
}

impl LinePrompter {
    /// Prompter whose terminal editor is opened on the first question.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn editor(&mut self) -> Result<&mut DefaultEditor, ScaffoldError> {
        if self.editor.is_none() {
            self.editor = Some(DefaultEditor::new().map_err(prompt_failed)?);
        }
        self.editor.as_mut().ok_or_else(|| ScaffoldError::PromptFailed {
            reason: "line editor unavailable".to_string(),
        })
    }
}

impl Prompter for LinePrompter {
    fn prompt_with_validator(
        &mut self,
        label: &str,
        validate: Validator<'_>,
    ) -> Result<String, ScaffoldError> {
        let editor = self.editor()?;
        loop {
            let line = editor.readline(&format!("{label}: ")).map_err(prompt_failed)?;
            match validate(&line) {
                Ok(()) => return Ok(line),
                Err(msg) => eprintln!("✗ {msg}"),
            }
        }
    }
}

fn prompt_failed(err: ReadlineError) -> ScaffoldError {
    let reason = match err {
        ReadlineError::Interrupted => "interrupted".to_string(),
        ReadlineError::Eof => "end of input".to_string(),
        other => other.to_string(),
    };
    ScaffoldError::PromptFailed { reason }
}

/// [`Prompter`] answering from a fixed script, for tests and non-interactive embedding.
///
/// Rejected answers are consumed like a user retyping; running out of answers
/// fails the prompt.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Labels that were asked, in order
    pub asked: Vec<String>,
    /// Validation messages produced by rejected answers, in order
    pub rejections: Vec<String>,
}

impl ScriptedPrompter {
    /// Prompter that replies with `answers`, in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
            rejections: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_with_validator(
        &mut self,
        label: &str,
        validate: Validator<'_>,
    ) -> Result<String, ScaffoldError> {
        self.asked.push(label.to_string());
        while let Some(answer) = self.answers.pop_front() {
            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(msg) => self.rejections.push(msg),
            }
        }
        Err(ScaffoldError::PromptFailed {
            reason: "end of input".to_string(),
        })
    }
}

/// Ask for the entity name, accepting only strict PascalCase.
///
/// # Errors
///
/// Returns [`ScaffoldError::PromptFailed`] when the prompt is aborted.
pub fn prompt_entity_name(prompter: &mut dyn Prompter) -> Result<String, ScaffoldError> {
    let validate = |input: &str| EntityName::validate(input).map_err(|e| e.to_string());
    let name = prompter.prompt_with_validator("Entity", &validate)?;
    debug!(entity = %name, "entity name accepted");
    Ok(name)
}

/// Ask which command to run; accepts the option number or its label.
///
/// # Errors
///
/// Returns [`ScaffoldError::PromptFailed`] when the prompt is aborted.
pub fn select_command(prompter: &mut dyn Prompter) -> Result<CommandKind, ScaffoldError> {
    let options = CommandKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| format!("[{}] {}", i + 1, kind.label()))
        .collect::<Vec<_>>()
        .join(", ");
    let label = format!("Generate {options}");
    let validate = |input: &str| {
        parse_selection(input)
            .map(|_| ())
            .ok_or_else(|| format!("choose one of {options}"))
    };
    let answer = prompter.prompt_with_validator(&label, &validate)?;
    parse_selection(&answer).ok_or_else(|| ScaffoldError::PromptFailed {
        reason: format!("invalid selection \"{answer}\""),
    })
}

/// Map a selector answer (`2`, `controller`, `Persistence module`) to a command.
#[must_use]
pub fn parse_selection(input: &str) -> Option<CommandKind> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| CommandKind::ALL.get(i)).copied();
    }
    CommandKind::ALL
        .iter()
        .find(|kind| kind.label().eq_ignore_ascii_case(input))
        .copied()
}
