//! rmit - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use rmit::commit::{
    ProjectContext, SessionOptions, SessionOutcome, TerminalInput, describe, display, run,
};
use rmit::config::{ConfigKey, ConfigStore};
use rmit::git::{DiffCollector, GitCommitter};
use rmit::llm::OpenRouterClient;

/// Generate git commit messages with an AI model.
#[derive(Parser, Debug)]
#[command(name = "rmit")]
#[command(about = "AI-powered commit message generator")]
#[command(version)]
struct Cli {
    /// Commit the generated message without asking
    #[arg(short = 'c', long)]
    commit: bool,

    /// Model to use for this run (overrides default_model)
    #[arg(short = 'm', long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set a configuration value
    Set {
        /// One of api_key, api_url, default_model
        key: String,
        value: String,
    },
    /// Show configuration values
    Get {
        /// Show only this key
        key: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    display::print_banner(env!("CARGO_PKG_VERSION"));

    let store = ConfigStore::default_location().context("Failed to locate config file")?;

    match cli.command {
        Some(Commands::Set { key, value }) => set_config(&store, &key, &value),
        Some(Commands::Get { key }) => get_config(&store, key.as_deref()),
        None => generate(&store, cli.commit, cli.model.as_deref()).await,
    }
}

async fn generate(store: &ConfigStore, auto_commit: bool, model: Option<&str>) -> Result<()> {
    let config = store.load();
    let workdir = std::env::current_dir().context("Failed to read current directory")?;

    // Step 1: Collect the diff
    let diff = DiffCollector::new(&workdir)
        .collect()
        .context("Failed to get git diff")?;

    // Step 2: Project context is best-effort
    let context = describe(&workdir).unwrap_or_else(|e| {
        warn!("Could not read project files: {}", e);
        ProjectContext::default()
    });

    let model = config.model_or_default(model).to_string();
    display::print_model(&model);

    // Step 3: Generate and refine
    config.ensure_api_key()?;
    let client = OpenRouterClient::from_config(&config);
    let committer = GitCommitter::new(&workdir);
    let options = SessionOptions {
        model,
        auto_commit,
    };

    let outcome = run(&client, &committer, diff, context, options, &mut TerminalInput)
        .await
        .context("Commit session failed")?;

    match outcome {
        SessionOutcome::Committed { .. } => {
            println!("{}", display::green("✅ Commit created successfully!"));
        }
        SessionOutcome::Canceled => {
            println!("{}", display::red("❌ Commit canceled."));
        }
    }

    Ok(())
}

fn set_config(store: &ConfigStore, key: &str, value: &str) -> Result<()> {
    let key: ConfigKey = key.parse()?;

    // Start from the file so an environment key is never persisted
    let mut config = store.load_file();
    config.set(key, value)?;
    store
        .save(&config)
        .with_context(|| format!("Failed to save config to {}", store.path().display()))?;

    println!(
        "{} {} {}",
        display::green("✅ Set"),
        display::cyan(key.as_str()),
        display::green("successfully")
    );
    Ok(())
}

fn get_config(store: &ConfigStore, key: Option<&str>) -> Result<()> {
    let config = store.load();

    match key {
        Some(key) => {
            let key: ConfigKey = key.parse()?;
            println!("{}", config.display_value(key));
        }
        None => {
            println!("{}", display::yellow("⚙️  CONFIGURATION:"));
            println!("{}", display::rule());
            for key in ConfigKey::ALL {
                println!(
                    "  {}: {}",
                    display::blue(key.as_str()),
                    config.display_value(key)
                );
            }
            println!("{}", display::rule());
            println!("Config file: {}", store.path().display());
        }
    }

    Ok(())
}
