use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use layer_tour::app::App;
use layer_tour::config::Config;
use layer_tour::logging;
use layer_tour::steps::{StepCatalog, StepNavigator, TextRenderer, VisualizationRenderer};

#[derive(Parser)]
#[command(name = "layer-tour")]
#[command(about = "Step-by-step walkthrough of a transformer layer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the steps in order
    List,

    /// Print one step without starting the interactive view
    Show {
        /// Step name (e.g. "Layer Norm 1") or 1-based step number
        step: String,
    },

    /// Print the step catalog as JSON
    Export,

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    let catalog = Arc::new(StepCatalog::transformer_layer());

    match cli.command {
        Some(Commands::List) => cmd_list(&catalog),
        Some(Commands::Show { step }) => cmd_show(catalog, &step)?,
        Some(Commands::Export) => cmd_export(&catalog)?,
        Some(Commands::Config) => cmd_config(&config)?,
        None => {
            let mut app = App::new(config, catalog);
            let result = app.run();

            if let Some(log_path) = logging_handle.log_file_path {
                if logging::log_has_content(&log_path) {
                    eprintln!("Session log: {}", log_path.display());
                }
            }

            result?;
        }
    }

    Ok(())
}

fn cmd_list(catalog: &StepCatalog) {
    println!("Transformer layer walkthrough ({} steps)", catalog.step_count());
    println!("{}", "─".repeat(60));
    for (i, step) in catalog.iter().enumerate() {
        println!("{:>2}. {:<24} {}", i + 1, step.name, step.visualization.kind());
    }
}

fn cmd_show(catalog: Arc<StepCatalog>, step: &str) -> Result<()> {
    let mut navigator = StepNavigator::new(catalog);

    // Numbers are 1-based on the command line; anything else is a step name
    match step.parse::<usize>() {
        Ok(number) if number >= 1 => navigator.go_to_index(number - 1)?,
        _ => navigator.go_to_name(step)?,
    };

    let (position, total) = navigator.position();
    let current = navigator.current();
    println!("{} (step {} of {})", current.name, position, total);
    println!("{}", "─".repeat(60));
    println!("{}", current.description);
    println!();
    for line in TextRenderer.render(&current.visualization) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_export(catalog: &StepCatalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
    println!("{}", json);
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
