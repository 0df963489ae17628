//! Built-in sample flows offered by the menu and the `sample` command.
use crate::flow::{Flow, FlowError};
use crate::step::{Step, StepKind};

const SAMPLES: [(&str, &[StepKind]); 4] = [
    (
        "Predefined Flow 1",
        &[
            StepKind::Title,
            StepKind::Text,
            StepKind::TextInput,
            StepKind::NumberInput,
            StepKind::NumberInput,
            StepKind::Calculus,
            StepKind::Display,
            StepKind::TextFileInput,
            StepKind::CsvFileInput,
            StepKind::Output,
            StepKind::End,
        ],
    ),
    (
        "Predefined Flow 2",
        &[
            StepKind::Title,
            StepKind::Text,
            StepKind::Title,
            StepKind::Text,
            StepKind::TextInput,
            StepKind::TextInput,
            StepKind::Display,
            StepKind::Output,
            StepKind::End,
        ],
    ),
    (
        "Predefined Flow 3",
        &[
            StepKind::NumberInput,
            StepKind::NumberInput,
            StepKind::NumberInput,
            StepKind::NumberInput,
            StepKind::Calculus,
            StepKind::Calculus,
            StepKind::Display,
            StepKind::Output,
            StepKind::End,
        ],
    ),
    (
        "Predefined Flow 4",
        &[
            StepKind::TextFileInput,
            StepKind::CsvFileInput,
            StepKind::Display,
            StepKind::Output,
            StepKind::End,
        ],
    ),
];

pub fn sample_count() -> usize {
    SAMPLES.len()
}

/// Sample `number`, counted from 1.
pub fn sample(number: usize) -> Result<Option<Flow>, FlowError> {
    let Some((name, kinds)) = number.checked_sub(1).and_then(|index| SAMPLES.get(index)) else {
        return Ok(None);
    };
    let mut flow = Flow::new(*name);
    for kind in kinds.iter() {
        flow.add_step(Step::for_kind(*kind))?;
    }
    Ok(Some(flow))
}

pub fn all_samples() -> Result<Vec<Flow>, FlowError> {
    (1..=sample_count())
        .filter_map(|number| sample(number).transpose())
        .collect()
}

/// Numbered sample names, each followed by its step listing.
pub fn samples_menu() -> Result<String, FlowError> {
    let mut menu = String::from("Available predefined flows:\n");
    for (index, flow) in all_samples()?.iter().enumerate() {
        menu.push_str(&format!("{}. {}\n", index + 1, flow.name()));
        menu.push_str(&flow.step_listing());
    }
    Ok(menu)
}
