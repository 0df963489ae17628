//! The interactive main menu.
//!
//! Every menu action runs behind a guard: failures are printed as `Error: ...`
//! and the menu comes back. Closed operator input ends the session quietly.
mod builder;

pub use builder::build_flow;

use crate::catalog::{self, CatalogStore};
use crate::config::AppConfig;
use crate::console::{is_input_closed, Console};
use crate::executor::{FlowExecutor, RunSummary};
use crate::flow::Flow;
use crate::samples;
use anyhow::Result;

const MAIN_MENU: &str = "Choose an option from the following:\n\
1. Create a new flow\n\
2. Use the flow that has just been created\n\
3. Save the flow that has just been created\n\
4. Use a predefined flow\n\
5. Use a flow created by a user\n\
6. Delete flows\n\
0. Exit\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Create,
    RunCurrent,
    SaveCurrent,
    Sample,
    RunSaved,
    Delete,
    Exit,
}

impl MenuOption {
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(MenuOption::Create),
            '2' => Some(MenuOption::RunCurrent),
            '3' => Some(MenuOption::SaveCurrent),
            '4' => Some(MenuOption::Sample),
            '5' => Some(MenuOption::RunSaved),
            '6' => Some(MenuOption::Delete),
            '0' => Some(MenuOption::Exit),
            _ => None,
        }
    }
}

/// Run `flow` once against `console` and log the outcome.
pub fn run_flow(
    console: &mut impl Console,
    flow: &mut Flow,
    config: &AppConfig,
) -> Result<RunSummary> {
    let summary = FlowExecutor::new(flow, console, config).run()?;
    tracing::debug!(?summary, "run summary");
    Ok(summary)
}

pub struct Session<'a, C: Console, S: CatalogStore> {
    console: &'a mut C,
    catalog: &'a mut S,
    config: &'a AppConfig,
    current: Option<Flow>,
}

impl<'a, C: Console, S: CatalogStore> Session<'a, C, S> {
    pub fn new(console: &'a mut C, catalog: &'a mut S, config: &'a AppConfig) -> Self {
        Self {
            console,
            catalog,
            config,
            current: None,
        }
    }

    /// The flow built with option 1, if any.
    pub fn current(&self) -> Option<&Flow> {
        self.current.as_ref()
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let option = match self.read_option() {
                Ok(option) => option,
                Err(err) if is_input_closed(&err) => {
                    tracing::info!("operator input closed, leaving menu");
                    return Ok(());
                }
                Err(err) => return Err(err),
            };
            if option == MenuOption::Exit {
                self.console.say("Exiting program...")?;
                return Ok(());
            }
            if let Err(err) = self.handle(option) {
                if is_input_closed(&err) {
                    tracing::info!("operator input closed, leaving menu");
                    return Ok(());
                }
                tracing::error!(?option, error = %format!("{err:#}"), "menu action failed");
                self.console.say(&format!("Error: {err:#}"))?;
            }
        }
    }

    fn read_option(&mut self) -> Result<MenuOption> {
        loop {
            self.console.write(MAIN_MENU)?;
            self.console.write("Option: ")?;
            if let Some(option) = MenuOption::from_key(self.console.read_char()?) {
                return Ok(option);
            }
        }
    }

    fn handle(&mut self, option: MenuOption) -> Result<()> {
        match option {
            MenuOption::Create => self.create(),
            MenuOption::RunCurrent => self.run_current(),
            MenuOption::SaveCurrent => self.save_current(),
            MenuOption::Sample => self.run_sample(),
            MenuOption::RunSaved => self.run_saved(),
            MenuOption::Delete => self.delete(),
            MenuOption::Exit => Ok(()),
        }
    }

    fn create(&mut self) -> Result<()> {
        let existing = catalog::list_names(&*self.catalog);
        let flow = build_flow(self.console, &existing)?;
        tracing::info!(flow = %flow.name(), steps = flow.len(), "flow created");
        self.current = Some(flow);
        Ok(())
    }

    fn run_current(&mut self) -> Result<()> {
        let Some(flow) = self.current.as_mut().filter(|flow| !flow.is_empty()) else {
            return self.console.say("Error: No flow has been created yet.");
        };
        self.console.write(&flow.step_listing())?;
        if self
            .console
            .confirm("Are you sure you want to execute the flow? (Y/N): ")?
        {
            run_flow(self.console, flow, self.config)?;
        }
        Ok(())
    }

    fn save_current(&mut self) -> Result<()> {
        let Some(flow) = self.current.as_ref().filter(|flow| !flow.is_empty()) else {
            return self.console.say("Error: No flow has been created yet.");
        };
        catalog::save_flow(self.catalog, flow)?;
        self.console.say("Flow saved successfully!")
    }

    fn run_sample(&mut self) -> Result<()> {
        loop {
            self.console.write(&samples::samples_menu()?)?;
            self.console.say("0. Go back to the main menu")?;
            let answer = self.console.prompt(&format!(
                "Choose a predefined flow (1-{}) or go back (0): ",
                samples::sample_count()
            ))?;
            let choice = answer.trim().parse::<usize>().ok();
            if choice == Some(0) {
                return Ok(());
            }
            match choice.map(samples::sample).transpose()?.flatten() {
                Some(mut flow) => {
                    self.console
                        .say(&format!("Using predefined flow: {}", flow.name()))?;
                    run_flow(self.console, &mut flow, self.config)?;
                    return Ok(());
                }
                None => self
                    .console
                    .say("Error: Invalid choice. Please choose a valid predefined flow.")?,
            }
        }
    }

    fn print_catalog(&mut self) -> Result<()> {
        self.console.say("Flows available in CSV:")?;
        for entry in catalog::list_entries(&*self.catalog) {
            self.console.write(&entry.listing())?;
        }
        Ok(())
    }

    fn run_saved(&mut self) -> Result<()> {
        self.print_catalog()?;
        loop {
            let name = self
                .console
                .prompt("Enter the name of the flow to use (or enter 0 to exit): ")?;
            if name == "0" {
                return Ok(());
            }
            let mut loaded = catalog::load_flow(&*self.catalog, &name);
            if loaded.flow.is_empty() {
                self.console.say(
                    "Error: Flow not found. Please enter a valid flow name or enter 0 to exit.",
                )?;
                continue;
            }
            self.console.write(&loaded.flow.step_listing())?;
            run_flow(self.console, &mut loaded.flow, self.config)?;
            return Ok(());
        }
    }

    fn delete(&mut self) -> Result<()> {
        let names = catalog::list_names(&*self.catalog);
        if names.is_empty() {
            return self.console.say("Error: No flows available for deletion.");
        }
        self.print_catalog()?;
        loop {
            let name = self
                .console
                .prompt("Enter the name of the flow to delete (or enter 0 to exit): ")?;
            if name == "0" {
                return Ok(());
            }
            if !names.contains(&name) {
                self.console.say(
                    "Error: Flow not found. Please enter a valid flow name or enter 0 to exit.",
                )?;
                continue;
            }
            catalog::delete_flow(self.catalog, &name)?;
            return self
                .console
                .say(&format!("Flow '{name}' deleted successfully!"));
        }
    }
}
