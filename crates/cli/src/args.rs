//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;

/// Labels issues and pull requests by title.
#[derive(Debug, Parser)]
#[command(name = "botamic", version, about)]
pub struct Cli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "BOTAMIC_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Json
    )]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; traces are exported when set.
    #[arg(long, global = true, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable output.
    Pretty,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the webhook listener.
    Serve(ServeArgs),
    /// Print the labels a title would receive, without calling GitHub.
    Classify(ClassifyArgs),
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, env = "BOTAMIC_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Token used for GitHub API calls.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = github::DEFAULT_API_URL)]
    pub api_url: String,

    /// Webhook secret; deliveries must be signed with it when set.
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,

    /// Repository path of the labeler configuration file.
    #[arg(long, env = "BOTAMIC_CONFIG_PATH", default_value = labeler::DEFAULT_CONFIG_PATH)]
    pub config_path: String,
}

#[derive(Debug, clap::Args)]
pub struct ClassifyArgs {
    /// Title to classify.
    #[arg(long)]
    pub title: String,

    /// Local configuration file; the built-in rules are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the labels as a JSON array.
    #[arg(long)]
    pub json: bool,
}
