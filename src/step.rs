//! Step model: one closed enum over the ten step kinds.
//!
//! Steps carry only their own state. Steps that read earlier steps (Calculus,
//! TextInput, Display, Output) do so through the owning flow's indices, never
//! through stored references.
pub mod calculus;
pub mod import;
pub mod kind;
pub mod output;

pub use calculus::{CalcError, CalculusStep, Operation};
pub use import::{CsvFileInputStep, TextFileInputStep};
pub use kind::{StepKind, UnknownStepTag};
pub use output::OutputStep;

use crate::util::format_number;

pub const LOADED_TEXT_INPUT_DESCRIPTION: &str = "Input title, subtitle, title text and text";
pub const LOADED_NUMBER_INPUT_DESCRIPTION: &str = "Input a number";
pub const LOADED_TEXT_FILE_DESCRIPTION: &str = "Input a .txt file";
pub const LOADED_CSV_FILE_DESCRIPTION: &str = "Input a .csv file";

#[derive(Debug, Clone, PartialEq)]
pub struct TitleStep {
    pub title: String,
    pub subtitle: String,
    pub completed: bool,
}

impl Default for TitleStep {
    fn default() -> Self {
        Self {
            title: "Default Title for TitleStep".to_string(),
            subtitle: "Default Subtitle for TitleStep".to_string(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStep {
    pub title: String,
    pub text: String,
    pub completed: bool,
    /// Flow index recorded when the operator completes the step.
    pub position: Option<usize>,
}

impl Default for TextStep {
    fn default() -> Self {
        Self {
            title: "Default Title for TextStep".to_string(),
            text: "Default text for TextStep".to_string(),
            completed: false,
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextInputStep {
    pub description: String,
}

impl Default for TextInputStep {
    fn default() -> Self {
        Self {
            description: import::DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberInputStep {
    pub description: String,
    pub value: f64,
}

impl Default for NumberInputStep {
    fn default() -> Self {
        Self {
            description: "Default Number Input Description".to_string(),
            value: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Title(TitleStep),
    Text(TextStep),
    TextInput(TextInputStep),
    NumberInput(NumberInputStep),
    Calculus(CalculusStep),
    Display,
    TextFileInput(TextFileInputStep),
    CsvFileInput(CsvFileInputStep),
    Output(OutputStep),
    End,
}

impl Step {
    /// Fresh step for a kind tag, as created by the catalog loader.
    pub fn for_kind(kind: StepKind) -> Step {
        match kind {
            StepKind::TextInput => Step::text_input(LOADED_TEXT_INPUT_DESCRIPTION),
            StepKind::NumberInput => Step::number_input(LOADED_NUMBER_INPUT_DESCRIPTION),
            StepKind::TextFileInput => Step::text_file_input(LOADED_TEXT_FILE_DESCRIPTION),
            StepKind::CsvFileInput => Step::csv_file_input(LOADED_CSV_FILE_DESCRIPTION),
            other => Step::default_of(other),
        }
    }

    /// Constructor-default step of `kind`; `reset` returns a step to this.
    pub fn default_of(kind: StepKind) -> Step {
        match kind {
            StepKind::Title => Step::Title(TitleStep::default()),
            StepKind::Text => Step::Text(TextStep::default()),
            StepKind::TextInput => Step::TextInput(TextInputStep::default()),
            StepKind::NumberInput => Step::NumberInput(NumberInputStep::default()),
            StepKind::Calculus => Step::Calculus(CalculusStep::default()),
            StepKind::Display => Step::Display,
            StepKind::TextFileInput => Step::TextFileInput(TextFileInputStep::default()),
            StepKind::CsvFileInput => Step::CsvFileInput(CsvFileInputStep::default()),
            StepKind::Output => Step::Output(OutputStep::default()),
            StepKind::End => Step::End,
        }
    }

    pub fn text_input(description: &str) -> Step {
        Step::TextInput(TextInputStep {
            description: description.to_string(),
        })
    }

    pub fn number_input(description: &str) -> Step {
        Step::NumberInput(NumberInputStep {
            description: description.to_string(),
            ..NumberInputStep::default()
        })
    }

    pub fn text_file_input(description: &str) -> Step {
        Step::TextFileInput(TextFileInputStep::with_description(description))
    }

    pub fn csv_file_input(description: &str) -> Step {
        Step::CsvFileInput(CsvFileInputStep::with_description(description))
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Step::Title(_) => StepKind::Title,
            Step::Text(_) => StepKind::Text,
            Step::TextInput(_) => StepKind::TextInput,
            Step::NumberInput(_) => StepKind::NumberInput,
            Step::Calculus(_) => StepKind::Calculus,
            Step::Display => StepKind::Display,
            Step::TextFileInput(_) => StepKind::TextFileInput,
            Step::CsvFileInput(_) => StepKind::CsvFileInput,
            Step::Output(_) => StepKind::Output,
            Step::End => StepKind::End,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.kind().tag()
    }

    /// Description shown in the executor's step header.
    pub fn describe(&self) -> String {
        match self {
            Step::Title(_) => "Step with a title and subtitle.".to_string(),
            Step::Text(_) => "Step with a title for the text and text.".to_string(),
            Step::TextInput(step) => format!(
                "Step to input the text.\nDescription of the user that created the step: {}",
                step.description
            ),
            Step::NumberInput(step) => format!(
                "Step to input a number.\nDescription of the user that created this step: {}",
                step.description
            ),
            Step::Calculus(_) => format!(
                "Step to perform arithmetic operations. ({})",
                Operation::SYMBOLS
            ),
            Step::Display => "Displaying the flow.".to_string(),
            Step::TextFileInput(step) => format!(
                "Step to input a text file (.txt).\nDescription of the user that created the step: {}",
                step.description
            ),
            Step::CsvFileInput(step) => format!(
                "Step to input a CSV file (.csv).\nDescription of the user that created the step: {}",
                step.description
            ),
            Step::Output(_) => "Step to output a text file (.txt).".to_string(),
            Step::End => "End of the flow.".to_string(),
        }
    }

    /// Restore constructor defaults, dropping everything a run filled in.
    pub fn reset(&mut self) {
        *self = Step::default_of(self.kind());
    }

    /// Non-interactive rendering of the current fields. `prior` is the flow
    /// prefix before this step, used to resolve Calculus operands.
    pub fn static_lines(&self, prior: &[Step]) -> Vec<String> {
        match self {
            Step::Title(step) => vec![
                format!("Title: {}", step.title),
                format!("Subtitle: {}", step.subtitle),
            ],
            Step::Text(step) => vec![
                format!("Text Title: {}", step.title),
                format!("Text: {}", step.text),
            ],
            Step::TextInput(step) => {
                vec![format!("Text Input Step Description: {}", step.description)]
            }
            Step::NumberInput(step) => vec![
                format!("Number Input Step Description: {}", step.description),
                format!("Number: {}", format_number(step.value)),
            ],
            Step::Calculus(step) => {
                let result = match step.result(prior) {
                    Ok(value) => format!("Result: {}", format_number(value)),
                    Err(err) => format!("Error: {err}"),
                };
                vec![
                    format!("Performing Calculus Step: {}", step.operation.name()),
                    result,
                ]
            }
            Step::Display => vec!["Displaying the Flow".to_string()],
            Step::TextFileInput(step) => {
                vec![import_status("Text File", &step.file_name, step.imported)]
            }
            Step::CsvFileInput(step) => {
                vec![import_status("CSV File", &step.file_name, step.imported)]
            }
            Step::Output(step) => vec![format!("Output File: {}", step.file_name)],
            Step::End => vec!["End of Flow".to_string()],
        }
    }
}

fn import_status(label: &str, file_name: &str, imported: bool) -> String {
    if imported {
        format!("{label} imported: {file_name}")
    } else {
        format!("{label} not imported")
    }
}
