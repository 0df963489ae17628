use anyhow::{anyhow, Context, Result};
use clap::Parser;
use flowmaker::catalog::{self, FileCatalog};
use flowmaker::cli::{Command, RootArgs};
use flowmaker::config::{resolve_config, AppConfig, ConfigSources};
use flowmaker::console::{is_input_closed, LineConsole};
use flowmaker::flow::Flow;
use flowmaker::samples;
use flowmaker::session::{run_flow, Session};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_logging(&args);
    let sources = ConfigSources::from_env(args.config.clone(), args.catalog.clone());
    let config = resolve_config(&sources)?;
    tracing::debug!(catalog = %config.catalog_path.display(), "configuration resolved");
    let mut catalog = FileCatalog::new(&config.catalog_path);

    match args.command() {
        Command::Menu => {
            let mut console = LineConsole::stdio();
            Session::new(&mut console, &mut catalog, &config).run()
        }
        Command::List(list) => list_flows(&catalog, list.json),
        Command::Run(target) => {
            let mut flow = load_existing(&catalog, &target.name)?;
            execute(&mut flow, &config)
        }
        Command::Show(target) => {
            let flow = load_existing(&catalog, &target.name)?;
            print!("{}", flow.step_listing());
            for line in flow.static_replay() {
                println!("{line}");
            }
            Ok(())
        }
        Command::Sample(sample) => run_sample(sample.number, &config),
        Command::Delete(target) => {
            let removed = catalog::delete_flow(&mut catalog, &target.name)?;
            if removed == 0 {
                return Err(anyhow!("flow '{}' not found in catalog", target.name));
            }
            println!("Flow '{}' deleted successfully!", target.name);
            Ok(())
        }
    }
}

/// Logs go to stderr so prompts and listings on stdout stay clean.
fn init_logging(args: &RootArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(args.verbose >= 2)
        .init();
    tracing::trace!(args = ?args, "parsed arguments");
}

fn list_flows(catalog: &FileCatalog, json: bool) -> Result<()> {
    let entries = catalog::list_entries(catalog);
    if json {
        let text = serde_json::to_string_pretty(&entries).context("serialize catalog entries")?;
        println!("{text}");
        return Ok(());
    }
    if entries.is_empty() {
        println!("No flows saved in {}.", catalog.path().display());
    }
    for entry in &entries {
        print!("{}", entry.listing());
    }
    Ok(())
}

fn load_existing(catalog: &FileCatalog, name: &str) -> Result<Flow> {
    let loaded = catalog::load_flow(catalog, name);
    if !loaded.found || loaded.flow.is_empty() {
        return Err(anyhow!(
            "flow '{name}' not found in {}",
            catalog.path().display()
        ));
    }
    Ok(loaded.flow)
}

fn run_sample(number: Option<usize>, config: &AppConfig) -> Result<()> {
    let Some(number) = number else {
        print!("{}", samples::samples_menu()?);
        return Ok(());
    };
    let mut flow = samples::sample(number)?.ok_or_else(|| {
        anyhow!(
            "no predefined flow {number} (choose 1-{})",
            samples::sample_count()
        )
    })?;
    println!("Using predefined flow: {}", flow.name());
    execute(&mut flow, config)
}

fn execute(flow: &mut Flow, config: &AppConfig) -> Result<()> {
    let mut console = LineConsole::stdio();
    match run_flow(&mut console, flow, config) {
        Ok(_) => Ok(()),
        Err(err) if is_input_closed(&err) => {
            tracing::info!(flow = %flow.name(), "operator input closed before the flow finished");
            Ok(())
        }
        Err(err) => Err(err),
    }
}
