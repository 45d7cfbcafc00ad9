//! Botamic CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse configuration** — flags with environment fallbacks (see [`args`]).
//! 2. **Wire observability** — configure `tracing-subscriber` with a JSON or
//!    pretty layer and, when an endpoint is given, an OpenTelemetry OTLP
//!    exporter.
//! 3. **Construct infrastructure** — create the [`github::GitHubClient`] and
//!    inject it into [`labeler::TitleLabeler`] as both label client and
//!    configuration source.
//! 4. **Select command**:
//!    - `serve` — run the webhook listener until Ctrl-C.
//!    - `classify` — classify one title offline and print the labels.

mod args;
mod observability;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use github::GitHubClient;
use labeler::{RuleSet, TitleLabeler};
use listener::WebhookState;
use tracing::{info, warn};

use crate::args::{ClassifyArgs, Cli, Command, ServeArgs};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => {
            let _telemetry = observability::init(cli.log_format, cli.otlp_endpoint.as_deref())?;
            serve(args).await
        }
        Command::Classify(args) => {
            for line in classify(&args)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let client = Arc::new(
        GitHubClient::new(&args.github_token, &args.api_url)
            .context("failed to create GitHub client")?,
    );
    let labeler = TitleLabeler::new(client.clone(), client).with_config_path(&args.config_path);

    if args.webhook_secret.is_none() {
        warn!("No webhook secret configured; deliveries will not be authenticated");
    }
    info!(api_url = %args.api_url, config_path = %args.config_path, "Starting botamic");

    let router = listener::build_router(WebhookState {
        labeler,
        secret: args.webhook_secret,
    });
    listener::serve(args.listen, router).await?;
    Ok(())
}

/// Classifies the title against the chosen rule set and renders the output
/// lines.
fn classify(args: &ClassifyArgs) -> anyhow::Result<Vec<String>> {
    let rules = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RuleSet::from_yaml(&text)
                .with_context(|| format!("invalid configuration in {}", path.display()))?
                .unwrap_or_else(RuleSet::defaults)
        }
        None => RuleSet::defaults(),
    };

    let labels: Vec<&str> = rules.classify(&args.title).map(|l| l.as_str()).collect();
    if args.json {
        Ok(vec![serde_json::to_string(&labels)?])
    } else {
        Ok(labels.into_iter().map(str::to_string).collect())
    }
}
