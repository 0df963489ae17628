//! Interactive execution of a flow.
//!
//! The executor makes a single forward pass over the flow. Each step gets a
//! header and, except End, a yes/no gate; accepted steps run their protocol
//! against the console. Steps that read earlier steps only ever see the prefix
//! `[0, i)` of the flow.
mod lines;
mod summary;

pub use lines::{display_lines, output_offers, OutputOffer};
pub use summary::RunSummary;

use crate::config::AppConfig;
use crate::console::Console;
use crate::flow::Flow;
use crate::step::{
    CalcError, CalculusStep, CsvFileInputStep, Operation, OutputStep, Step, TextFileInputStep,
};
use crate::util::{ensure_extension, format_number, is_valid_file_name};
use anyhow::Result;
use std::path::{Path, PathBuf};

const COMPLETE_PROMPT: &str = "Do you want to complete this step? (Y/N): ";

pub struct FlowExecutor<'a, C: Console> {
    flow: &'a mut Flow,
    console: &'a mut C,
    report_dir: PathBuf,
    import_dir: PathBuf,
    collected: Vec<String>,
}

impl<'a, C: Console> FlowExecutor<'a, C> {
    pub fn new(flow: &'a mut Flow, console: &'a mut C, config: &AppConfig) -> Self {
        Self {
            flow,
            console,
            report_dir: config.report_dir.clone(),
            import_dir: config.import_dir.clone(),
            collected: Vec::new(),
        }
    }

    /// Lines gathered by the most recent Output step; cleared by End.
    pub fn collected(&self) -> &[String] {
        &self.collected
    }

    /// Walk every step once. Operator input errors (including closed input)
    /// abort the pass; step-level failures are reported and the pass goes on.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        tracing::info!(flow = %self.flow.name(), steps = self.flow.len(), "running flow");
        for index in 0..self.flow.len() {
            let step = &self.flow.steps()[index];
            let kind = step.kind();
            self.console
                .say(&format!("{}. {}: {}", index + 1, step.tag(), step.describe()))?;
            if matches!(step, Step::End) {
                self.finish();
                summary.completed += 1;
                continue;
            }
            if !self.console.confirm(COMPLETE_PROMPT)? {
                self.console.say("Step skipped.")?;
                summary.skipped += 1;
                continue;
            }
            tracing::debug!(index, kind = %kind, "executing step");
            self.execute(index, &mut summary)?;
            summary.completed += 1;
        }
        tracing::info!(
            flow = %self.flow.name(),
            completed = summary.completed,
            skipped = summary.skipped,
            reports = summary.reports_written(),
            "flow finished"
        );
        Ok(summary)
    }

    fn execute(&mut self, index: usize, summary: &mut RunSummary) -> Result<()> {
        let (prior, rest) = self.flow.steps_mut().split_at_mut(index);
        let Some(current) = rest.first_mut() else {
            return Ok(());
        };
        let console = &mut *self.console;
        match current {
            Step::Title(step) => step.completed = true,
            Step::Text(step) => {
                step.completed = true;
                step.position = Some(index);
            }
            Step::TextInput(_) => fill_text(console, prior)?,
            Step::NumberInput(step) => step.value = read_number(console)?,
            Step::Calculus(step) => {
                if calculate(console, step, prior)?.is_none() {
                    summary.calculus_failures += 1;
                }
            }
            Step::Display => display(console, prior)?,
            Step::TextFileInput(step) => {
                if !import_text(console, step, &self.import_dir)? {
                    summary.failed_imports += 1;
                }
            }
            Step::CsvFileInput(step) => {
                if !import_csv(console, step, &self.import_dir)? {
                    summary.failed_imports += 1;
                }
            }
            Step::Output(step) => {
                let written =
                    write_output(console, step, prior, &mut self.collected, &self.report_dir)?;
                summary.reports.extend(written);
            }
            Step::End => {}
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.flow.reset_all();
        self.collected.clear();
        if let Err(err) = self.console.say("Flow Completed!") {
            tracing::warn!(error = %format!("{err:#}"), "could not report flow completion");
        }
    }
}

/// Ask for new values for every earlier Title and Text step the operator
/// marked as completed.
fn fill_text(console: &mut impl Console, prior: &mut [Step]) -> Result<()> {
    console.say("The text you need to complete:")?;
    let mut filled = false;
    for step in prior.iter_mut() {
        match step {
            Step::Title(title) if title.completed => {
                title.title = console.prompt("Enter Title: ")?;
                title.subtitle = console.prompt("Enter Subtitle: ")?;
                filled = true;
            }
            Step::Text(text) if text.completed => {
                text.title = console.prompt("Enter Text Title: ")?;
                text.text = console.prompt("Enter Text: ")?;
                filled = true;
            }
            _ => {}
        }
    }
    if !filled {
        console.say("No step to input")?;
    }
    Ok(())
}

fn read_number(console: &mut impl Console) -> Result<f64> {
    loop {
        let answer = console.prompt("Enter a number: ")?;
        match answer.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                console.say(&format!("Number entered is: {}", format_number(value)))?;
                return Ok(value);
            }
            _ => console.say("Invalid input. Please enter a valid number.")?,
        }
    }
}

/// Offer each earlier NumberInput in flow order until two are chosen.
fn select_operands(
    console: &mut impl Console,
    prior: &[Step],
) -> Result<Result<Vec<usize>, CalcError>> {
    console.say("Choose two number inputs for the calculation:")?;
    let mut found = false;
    let mut selected = Vec::with_capacity(2);
    for (index, step) in prior.iter().enumerate() {
        let Step::NumberInput(input) = step else {
            continue;
        };
        found = true;
        let question = format!(
            "Select Number Input Step {}? (Number is: {}) (Y/N): ",
            index + 1,
            format_number(input.value)
        );
        if console.confirm(&question)? {
            selected.push(index);
            if selected.len() == 2 {
                break;
            }
        }
    }
    if !found {
        return Ok(Err(CalcError::NoNumberInputs));
    }
    if selected.len() != 2 {
        return Ok(Err(CalcError::WrongOperandCount(selected.len())));
    }
    Ok(Ok(selected))
}

fn read_operation(console: &mut impl Console) -> Result<Operation> {
    console.write(&format!(
        "Choose the arithmetic operation ({}): ",
        Operation::SYMBOLS
    ))?;
    loop {
        if let Some(operation) = Operation::from_symbol(console.read_char()?) {
            return Ok(operation);
        }
        console.write(&format!(
            "Invalid symbol. Please choose a valid arithmetic operation ({}): ",
            Operation::SYMBOLS
        ))?;
    }
}

/// Returns the result, or `None` when the calculation was cancelled.
fn calculate(
    console: &mut impl Console,
    step: &mut CalculusStep,
    prior: &[Step],
) -> Result<Option<f64>> {
    let outcome = match select_operands(console, prior)? {
        Ok(operands) => {
            step.operands = operands;
            step.operation = read_operation(console)?;
            step.result(prior)
        }
        Err(err) => Err(err),
    };
    match outcome {
        Ok(value) => {
            console.say(&format!("Calculation Result: {}", format_number(value)))?;
            Ok(Some(value))
        }
        Err(err) => {
            tracing::warn!(error = %err, "calculation cancelled");
            console.say(&format!("Error: {err}"))?;
            Ok(None)
        }
    }
}

fn display(console: &mut impl Console, prior: &[Step]) -> Result<()> {
    console.say("Display of the input so far:")?;
    let lines = display_lines(prior);
    if lines.is_empty() {
        return console.say("Nothing to display.");
    }
    for line in &lines {
        console.say(line)?;
    }
    Ok(())
}

/// Prompt until the answer passes the file name check.
fn read_file_name(console: &mut impl Console, prompt: &str, invalid: &str) -> Result<String> {
    loop {
        let answer = console.prompt(prompt)?;
        let answer = answer.trim();
        if is_valid_file_name(answer) {
            return Ok(answer.to_string());
        }
        console.say(invalid)?;
    }
}

fn import_text(
    console: &mut impl Console,
    step: &mut TextFileInputStep,
    import_dir: &Path,
) -> Result<bool> {
    let name = read_file_name(
        console,
        "Enter the name of the text file (.txt): ",
        "Invalid file name. Please enter a valid file name.",
    )?;
    let name = ensure_extension(&name, TextFileInputStep::EXTENSION);
    console.say(&format!("Entered File Name: {name}"))?;
    match step.import(&name, &import_dir.join(&name)) {
        Ok(()) => {
            console.say("File imported successfully.")?;
            Ok(true)
        }
        Err(err) => {
            tracing::warn!(file = %name, error = %format!("{err:#}"), "text import failed");
            console.say("File not found or unable to open.")?;
            Ok(false)
        }
    }
}

fn import_csv(
    console: &mut impl Console,
    step: &mut CsvFileInputStep,
    import_dir: &Path,
) -> Result<bool> {
    let name = read_file_name(
        console,
        "Enter the name of the CSV file (.csv): ",
        "Invalid file name. Please enter a valid CSV file name.",
    )?;
    let name = ensure_extension(&name, CsvFileInputStep::EXTENSION);
    console.say(&format!("Entered File Name: {name}"))?;
    match step.import(&name, &import_dir.join(&name)) {
        Ok(()) => {
            console.say("CSV file imported successfully.")?;
            Ok(true)
        }
        Err(err) => {
            tracing::warn!(file = %name, error = %format!("{err:#}"), "csv import failed");
            console.say("File not found or unable to open.")?;
            Ok(false)
        }
    }
}

/// Gather report settings and lines, then write the report. The accepted
/// lines replace `collected`.
fn write_output(
    console: &mut impl Console,
    step: &mut OutputStep,
    prior: &[Step],
    collected: &mut Vec<String>,
    report_dir: &Path,
) -> Result<Option<PathBuf>> {
    let file_name = read_file_name(
        console,
        "Enter filename for the output: ",
        "Error: Invalid filename. Please enter a valid filename.",
    )?;
    let title = console.prompt("Enter title for the output: ")?;
    let description = console.prompt("Enter description for the output: ")?;

    collected.clear();
    for offer in output_offers(prior) {
        if console.confirm(&offer.question)? {
            collected.extend(offer.lines);
        }
    }

    step.file_name = file_name;
    step.title = title;
    step.description = description;
    step.lines = collected.clone();
    match step.write_report(report_dir) {
        Ok(path) => {
            console.say(&format!(
                "Output file '{}' created successfully.",
                step.file_name
            ))?;
            Ok(Some(path))
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "report not written");
            console.say(&format!("Error: {err:#}"))?;
            Ok(None)
        }
    }
}
