use anyhow::Result;
use clap::{CommandFactory, Parser};
use clipscribe::app::{RunOverrides, run_transcribe_command};
use clipscribe::cli::{Cli, Commands, ModelsAction};
use clipscribe::config::Config;
use clipscribe::diagnostics::check_dependencies;
use clipscribe::models::catalog::{ModelTier, list_models};
use clipscribe::models::download::format_model_info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let Some(input) = cli.input else {
                Cli::command().print_help()?;
                return Ok(());
            };
            let config = load_config(cli.config.as_deref())?;
            run_transcribe_command(
                config,
                &input,
                RunOverrides {
                    model: cli.model,
                    device: cli.device,
                    language: cli.language,
                    output: cli.output,
                    stdout_only: cli.stdout,
                    timestamps: cli.timestamps,
                    no_download: cli.no_download,
                    quiet: cli.quiet,
                },
            )
            .await?;
        }
        Some(Commands::Models { action }) => {
            handle_models_command(action).await?;
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            check_dependencies(&config.download.program);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "clipscribe",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/clipscribe/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else if let Some(default_path) = Config::default_path() {
        Config::load_or_default(&default_path)?
    } else {
        Config::default()
    };

    Ok(config.with_env_overrides())
}

/// Handle model management commands.
async fn handle_models_command(action: ModelsAction) -> Result<()> {
    match action {
        ModelsAction::List => {
            println!("Available models:");
            for model in list_models() {
                println!("  {}", format_model_info(model));
            }
        }
        ModelsAction::Install { name } => {
            let tier: ModelTier = name.parse()?;

            #[cfg(feature = "model-download")]
            {
                let path = clipscribe::models::download::download_model(tier, true).await?;
                println!("Model '{}' installed successfully", tier);
                println!("Location: {}", path.display());
            }

            #[cfg(not(feature = "model-download"))]
            {
                anyhow::bail!(
                    "this build does not include model downloading; place the file at {} manually",
                    clipscribe::models::download::model_path(tier).display()
                );
            }
        }
    }
    Ok(())
}
