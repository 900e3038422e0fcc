use std::net::IpAddr;

use clap::Subcommand;

use crate::connector::adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::connector::http::DEFAULT_PORT;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the backend HTTP server (POST /api/generate, GET /healthz)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Completion provider credential
        #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        #[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
        model: String,

        #[arg(long, env = "GROQ_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Treat an empty completion as an upstream error instead of a result
        #[arg(long)]
        reject_empty: bool,

        /// Answer with the classified instruction instead of calling the provider
        #[arg(long)]
        mock_completions: bool,
    },

    /// Start an interactive study chat against the backend
    Chat,

    /// Browse or prune the saved study sessions
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved sessions, newest first
    List,

    /// Print one session by id or list position
    Show { id: String },

    /// Delete one session by id or list position
    Delete { id: String },

    /// Delete every saved session
    Clear {
        /// Skip the confirmation step
        #[arg(long)]
        yes: bool,
    },
}
