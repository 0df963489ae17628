//! Text produced by Display and Output steps from the steps before them.
//!
//! Both walk the flow prefix in order and number each recognized kind with its
//! own 1-based counter, so the second NumberInput is "Number Input 2" no matter
//! how many Title or Text steps sit in between.
use crate::step::{Step, StepKind};
use crate::util::format_number;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct Ordinals(HashMap<StepKind, usize>);

impl Ordinals {
    fn next(&mut self, kind: StepKind) -> usize {
        let counter = self.0.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }
}

/// Summary lines for a Display step. Empty when no recognized step precedes it.
pub fn display_lines(prior: &[Step]) -> Vec<String> {
    let mut ordinals = Ordinals::default();
    let mut lines = Vec::new();
    for (index, step) in prior.iter().enumerate() {
        match step {
            Step::Title(title) => {
                let n = ordinals.next(StepKind::Title);
                lines.push(format!("Title {n}: {}", title.title));
                lines.push(format!("Subtitle {n}: {}", title.subtitle));
            }
            Step::Text(text) => {
                let n = ordinals.next(StepKind::Text);
                lines.push(format!("Text title {n}: {}", text.title));
                lines.push(format!("Text {n}: {}", text.text));
            }
            Step::NumberInput(number) => {
                let n = ordinals.next(StepKind::NumberInput);
                lines.push(format!("Number Input {n}: {}", format_number(number.value)));
            }
            Step::Calculus(calculus) => {
                let n = ordinals.next(StepKind::Calculus);
                lines.push(format!(
                    "Calculus Step {n}: {}",
                    calculus.render(&prior[..index])
                ));
            }
            Step::TextFileInput(file) => {
                let n = ordinals.next(StepKind::TextFileInput);
                if file.imported {
                    lines.push(format!("Text File {n} name: {}", file.file_name));
                    lines.push(format!("Text File {n} content: "));
                    lines.extend(file.content.lines().map(str::to_string));
                } else {
                    lines.push(format!("Text File {n} was not imported successfully."));
                }
            }
            Step::CsvFileInput(file) => {
                let n = ordinals.next(StepKind::CsvFileInput);
                if file.imported {
                    lines.push(format!("CSV File {n} name: {}", file.file_name));
                    lines.push(format!("CSV File {n} content: "));
                    lines.extend(file.flattened_rows());
                } else {
                    lines.push(format!("CSV File {n} was not imported successfully."));
                }
            }
            Step::TextInput(_) | Step::Display | Step::Output(_) | Step::End => {}
        }
    }
    lines
}

/// One yes/no question an Output step asks, with the lines a yes adds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOffer {
    pub question: String,
    pub lines: Vec<String>,
}

pub fn output_offers(prior: &[Step]) -> Vec<OutputOffer> {
    let mut ordinals = Ordinals::default();
    let mut offers = Vec::new();
    for (index, step) in prior.iter().enumerate() {
        let kind = step.kind();
        let (subject, lines) = match step {
            Step::Title(title) => {
                let n = ordinals.next(kind);
                (
                    ("title and subtitle", n),
                    vec![
                        format!("Title {n}: {}", title.title),
                        format!("Subtitle {n}: {}", title.subtitle),
                    ],
                )
            }
            Step::Text(text) => {
                let n = ordinals.next(kind);
                (
                    ("title and text", n),
                    vec![
                        format!("Text Title {n}: {}", text.title),
                        format!("Text {n}: {}", text.text),
                    ],
                )
            }
            Step::NumberInput(number) => {
                let n = ordinals.next(kind);
                (
                    ("number", n),
                    vec![format!("Number Input {n}: {}", format_number(number.value))],
                )
            }
            Step::Calculus(calculus) => {
                let n = ordinals.next(kind);
                (
                    ("calculus", n),
                    vec![format!(
                        "Calculus Result {n}: {}",
                        calculus.render(&prior[..index])
                    )],
                )
            }
            Step::TextFileInput(file) => {
                let n = ordinals.next(kind);
                let mut lines = vec![
                    format!("Name of the Text File Input {n}: {}", file.file_name),
                    format!("Content of the Text File Input {n}: "),
                ];
                lines.extend(file.content.lines().map(str::to_string));
                (("text contents", n), lines)
            }
            Step::CsvFileInput(file) => {
                let n = ordinals.next(kind);
                let mut lines = vec![
                    format!("Name of the CSV File Input {n}: {}", file.file_name),
                    format!("Content of the CSV File Input {n}: "),
                ];
                lines.extend(file.flattened_rows());
                (("text contents", n), lines)
            }
            Step::TextInput(_) | Step::Display | Step::Output(_) | Step::End => continue,
        };
        let (what, n) = subject;
        offers.push(OutputOffer {
            question: format!(
                "Do you want to output the {what} of the {} {n}? (Y/N): ",
                kind.tag()
            ),
            lines,
        });
    }
    offers
}
