//! Sleuth CLI entry point

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use anyhow::{bail, Result};

use sleuth::agent::{diagnose, AgentLoop, Diagnosis, LlmClient, ProviderRegistry};
use sleuth::config::Config;
use sleuth::tools::ToolRunner;
use sleuth::ui;

const EXAMPLE_TASKS: [&str; 3] = [
    "Research the current state of renewable energy adoption globally",
    "What are the main challenges in artificial intelligence ethics?",
    "Explain the recent developments in quantum computing",
];

const OWN_TOPIC: &str = "Enter my own research topic";

#[derive(Parser)]
#[command(name = "sleuth")]
#[command(about = "🔍 Sleuth - research agent powered by a local LLM")]
#[command(version)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Research a topic and print a report
    Research {
        /// Task to research (prompts for one when omitted)
        task: Option<String>,

        /// Model to use instead of the configured one
        #[arg(short, long)]
        model: Option<String>,

        /// Ollama base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Maximum model calls before giving up
        #[arg(long)]
        max_iterations: Option<usize>,
    },

    /// Check that Ollama is running and has models installed
    Diagnose {
        /// Ollama base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Write a default configuration file
    Onboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "sleuth=debug" } else { "sleuth=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(e) = ctrlc::set_handler(|| {
        println!("\n\nResearch interrupted by user.");
        std::process::exit(130);
    }) {
        tracing::warn!("Could not install Ctrl-C handler: {}", e);
    }

    match cli.command {
        Commands::Research { task, model, base_url, max_iterations } => {
            let mut config = sleuth::config::load()?;
            if let Some(model) = model {
                config.model = model;
            }
            if let Some(base_url) = base_url {
                config.base_url = base_url;
            }
            if let Some(max_iterations) = max_iterations {
                config.max_iterations = max_iterations;
            }

            let task = match task {
                Some(task) => task,
                None => pick_task()?,
            };
            if task.trim().is_empty() {
                bail!("No research task given");
            }

            run_research(&config, task.trim()).await?;
        }

        Commands::Diagnose { base_url } => {
            let config = sleuth::config::load()?;
            let base_url = base_url.unwrap_or(config.base_url);
            run_diagnose(&base_url).await;
        }

        Commands::Onboard => {
            let (path, created) = sleuth::config::onboard()?;
            if created {
                ui::print_success(&format!("Wrote default configuration to {:?}", path));
            } else {
                ui::print_step(&format!("Configuration already exists at {:?}", path));
            }
        }
    }

    Ok(())
}

/// Ask for a task interactively: one of the examples or free text.
fn pick_task() -> Result<String> {
    use inquire::{Select, Text};

    let mut options: Vec<&str> = EXAMPLE_TASKS.to_vec();
    options.push(OWN_TOPIC);

    let choice = Select::new("What should I research?", options).prompt()?;
    if choice == OWN_TOPIC {
        Ok(Text::new("Research topic:").prompt()?)
    } else {
        Ok(choice.to_string())
    }
}

async fn run_research(config: &Config, task: &str) -> Result<()> {
    let client = ProviderRegistry::create(config).await?;
    ui::print_sleuth_header(client.default_model(), &config.base_url);

    let tools = ToolRunner::new_with_defaults(&config.search)?;
    let agent = AgentLoop::new(client, tools, config.max_iterations)
        .with_max_tokens(config.max_tokens);

    ui::print_thinking(&format!("Researching: {}", task));
    let research = agent.run(task).await;

    if research.is_complete() {
        ui::print_success(&format!("Research completed in {} iterations", research.iterations));
    } else {
        ui::print_warning(&format!("Stopped after {} iterations", research.iterations));
    }
    ui::print_report(research.report(), research.is_complete());

    Ok(())
}

async fn run_diagnose(base_url: &str) {
    ui::print_thinking(&format!("Diagnosing Ollama at {}", base_url));

    match diagnose(base_url).await {
        Diagnosis::Ready { models } => {
            ui::print_success("Ollama is running");
            ui::print_step(&format!("Available models: {}", models.join(", ")));
        }
        Diagnosis::NoModels => {
            ui::print_error("No models installed!");
            ui::print_step("Run: ollama pull llama3.2");
        }
        Diagnosis::BadStatus(status) => {
            ui::print_error(&format!("Ollama responded with status {}", status));
        }
        Diagnosis::Unreachable => {
            ui::print_error("Cannot connect to Ollama");
            ui::print_step("Make sure Ollama is running: ollama serve");
        }
        Diagnosis::Failed(e) => {
            ui::print_error(&format!("Error: {}", e));
        }
    }
}
