mod config;
mod template;

use anyhow::Context;
use clap::{Parser, Subcommand};

use anthill_plugin_core::{Plugin, runner};

use config::{CliOverrides, PluginConfig};
use template::TemplatePlugin;

#[derive(Parser)]
#[command(name = "anthill-plugin", version, about = "Anthill plugin (prepare/apply)")]
struct Cli {
    /// Phase to run: prepare or apply (overrides ANTHILL_PHASE env var)
    #[arg(long, global = true)]
    phase: Option<String>,

    /// User parameters as JSON (overrides ANTHILL_PLUGIN_PARAMS env var)
    #[arg(long, global = true)]
    params: Option<String>,

    /// Preview plan JSON for apply (overrides ANTHILL_PREVIEW_PLAN env var)
    #[arg(long, global = true)]
    preview_plan: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the phase selected by the environment (the default)
    Run,
    /// Print the plugin manifest as JSON
    Manifest,
    /// Run prepare then apply locally, forwarding the preview plan
    Simulate,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            phase: self.phase.clone(),
            params: self.params.clone(),
            preview_plan: self.preview_plan.clone(),
        }
    }
}

async fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let plugin = TemplatePlugin;
    let resolved = PluginConfig::resolve(&cli.overrides());
    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let phase = runner::run(&plugin, &resolved.env, &mut stdout).await?;
            tracing::info!(%phase, "plugin phase finished");
        }
        Commands::Manifest => {
            let json = serde_json::to_string_pretty(&plugin.manifest())
                .context("failed to serialize manifest")?;
            println!("{json}");
        }
        Commands::Simulate => {
            if resolved.env.phase.is_some() || resolved.env.preview_plan.is_some() {
                tracing::warn!("simulate ignores phase and preview plan inputs");
            }
            runner::simulate(&plugin, resolved.env.params, &mut stdout).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // stdout is the protocol channel; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run_cli(cli).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
