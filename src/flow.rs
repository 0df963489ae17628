use crate::step::{Step, StepKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FlowError {
    #[error("memory allocation failed while adding a step to flow '{0}'")]
    Allocation(String),
}

/// A named, ordered sequence of steps. Steps refer to each other only by their
/// index in `steps`.
#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    name: String,
    steps: Vec<Step>,
}

impl Flow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Mutable view of the steps. Positions are fixed: steps can change their
    /// fields but cannot be inserted, removed, or reordered through it.
    pub fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step. On allocation failure nothing is appended.
    pub fn add_step(&mut self, step: Step) -> Result<(), FlowError> {
        self.steps
            .try_reserve(1)
            .map_err(|_| FlowError::Allocation(self.name.clone()))?;
        self.steps.push(step);
        Ok(())
    }

    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(Step::kind).collect()
    }

    /// Reset every step to its defaults (what an End step does).
    pub fn reset_all(&mut self) {
        self.steps.iter_mut().for_each(Step::reset);
    }

    /// Tab-indented numbered listing of the step tags.
    pub fn step_listing(&self) -> String {
        let mut listing = String::from("\tFlow Steps:\n");
        for (index, step) in self.steps.iter().enumerate() {
            listing.push_str(&format!("\t{}. {}\n", index + 1, step.tag()));
        }
        listing
    }

    /// Static rendering of every step in order, without operator interaction.
    pub fn static_replay(&self) -> Vec<String> {
        self.steps
            .iter()
            .enumerate()
            .flat_map(|(index, step)| step.static_lines(&self.steps[..index]))
            .collect()
    }

    /// Help text listing every step kind the builder can add.
    pub fn available_steps_menu() -> String {
        let mut menu = String::from("Available Steps:\n");
        for kind in StepKind::ALL {
            menu.push_str(&format!("{}. {}: {}\n", kind.menu_key(), kind.tag(), kind.summary()));
        }
        menu
    }
}
