use crate::catalog::is_storable_name;
use crate::console::Console;
use crate::flow::Flow;
use crate::step::{Step, StepKind};
use anyhow::Result;

/// Interactively assemble a new flow. The name must be new to the catalog;
/// choosing End appends an End step and finishes the flow.
pub fn build_flow(console: &mut impl Console, existing: &[String]) -> Result<Flow> {
    let name = read_flow_name(console, existing)?;
    let mut flow = Flow::new(name);
    loop {
        console.write(&Flow::available_steps_menu())?;
        console.write("Which step do you want to add? (0-9): ")?;
        let Some(kind) = StepKind::from_menu_key(console.read_char()?) else {
            continue;
        };
        let step = if kind.takes_description() {
            let description = console.prompt(&format!("Enter description for {}: ", kind.tag()))?;
            described_step(kind, &description)
        } else {
            Step::default_of(kind)
        };
        if let Err(err) = flow.add_step(step) {
            tracing::error!(error = %err, "step not added");
            console.say(&format!("Error: {err}"))?;
            continue;
        }
        tracing::debug!(flow = %flow.name(), kind = %kind, "step added");
        if kind == StepKind::End {
            console.say("Flow Creation Finished!")?;
            console.write(&flow.step_listing())?;
            return Ok(flow);
        }
    }
}

fn read_flow_name(console: &mut impl Console, existing: &[String]) -> Result<String> {
    loop {
        let name = console.prompt("Enter flow name: ")?;
        if !is_storable_name(&name) {
            console.say("Error: Flow name must be non-empty and cannot contain ','.")?;
        } else if existing.iter().any(|known| *known == name) {
            console.say("Error: Flow name already exists. Please choose a different name.")?;
        } else {
            return Ok(name);
        }
    }
}

fn described_step(kind: StepKind, description: &str) -> Step {
    match kind {
        StepKind::TextInput => Step::text_input(description),
        StepKind::NumberInput => Step::number_input(description),
        StepKind::TextFileInput => Step::text_file_input(description),
        StepKind::CsvFileInput => Step::csv_file_input(description),
        other => Step::default_of(other),
    }
}
