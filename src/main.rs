use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use aiva::application::EmptyCompletionPolicy;
use aiva::connector::adapter::DEFAULT_BACKEND_URL;
use aiva::connector::api::{Container, ContainerConfig, Router};
use aiva::connector::http::{self, ServerConfig};
use aiva::Commands;

#[derive(Parser)]
#[command(name = "aiva")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding the saved study sessions
    #[arg(short, long, global = true, default_value = "~/.aiva")]
    data_dir: String,

    /// Backend base URL used by the chat client
    #[arg(long, global = true, env = "AIVA_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal outside local development.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            api_key,
            model,
            base_url,
            reject_empty,
            mock_completions,
        } => {
            let config = ServerConfig {
                host,
                port,
                api_key,
                model,
                base_url,
                empty_completion: if reject_empty {
                    EmptyCompletionPolicy::Reject
                } else {
                    EmptyCompletionPolicy::Accept
                },
                mock_completions,
            };
            http::serve(config).await?;
        }
        command => {
            let data_dir = expand_tilde(&cli.data_dir);
            debug!("Data directory: {}", data_dir);

            let container = Container::new(ContainerConfig {
                data_dir,
                backend_url: cli.backend_url,
            })?;
            let router = Router::new(&container);

            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
