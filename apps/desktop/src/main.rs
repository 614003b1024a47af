use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, HttpPredictionClient, PredictionTransport, SubmissionController};
use shared::domain::{FieldKind, FIELDS};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Submit customer interactions to the CSAT prediction service")]
struct Cli {
    /// Base URL of the prediction service.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one filled form and print the prediction.
    Predict {
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
        /// Print the raw result JSON instead of the rendered summary.
        #[arg(long)]
        json: bool,
    },
    /// Probe the service health endpoint.
    Health,
    /// List form fields and their kinds.
    Fields,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    Ok((name.to_string(), value.to_string()))
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Numeric => "number",
        FieldKind::Text => "text",
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    if let Command::Fields = cli.command {
        for field in FIELDS.iter() {
            println!("{}\t{}", field.name, kind_label(field.kind));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let settings = load_settings(cli.server_url.as_deref()).context("invalid client settings")?;
    info!(server_url = %settings.server_url, "using prediction service");
    let client = HttpPredictionClient::from_settings(&settings);

    match cli.command {
        Command::Predict { fields, json } => predict(&client, fields, json).await,
        Command::Health => match client.health().await {
            Ok(health) => {
                println!(
                    "{} ({})",
                    health.status,
                    health.timestamp.as_deref().unwrap_or("no timestamp")
                );
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{err}");
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Fields => Ok(ExitCode::SUCCESS),
    }
}

async fn predict(
    client: &HttpPredictionClient,
    fields: Vec<(String, String)>,
    json: bool,
) -> Result<ExitCode> {
    let mut controller = SubmissionController::new();
    for (name, value) in fields {
        controller
            .set_field(&name, value)
            .with_context(|| format!("cannot fill '{name}'; run `fields` to list valid names"))?;
    }

    if let Err(rejected) = controller.submit(client).await {
        bail!("submission refused: {rejected}");
    }

    if let (true, Some(result)) = (json, controller.result()) {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(ExitCode::SUCCESS);
    }

    let (lines, failed) = outcome_lines(&controller);
    for line in lines {
        if failed {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn outcome_lines(controller: &SubmissionController) -> (Vec<String>, bool) {
    let view = controller.view();
    if let Some(error) = view.error {
        let mut lines = vec![error];
        if let Some(err) = controller.error() {
            lines.extend(err.details().iter().map(|detail| format!("  - {detail}")));
        }
        return (lines, true);
    }

    let lines = view
        .result
        .map(|result| {
            vec![
                format!("Prediction: {}", result.headline),
                format!("Probability: {}", result.probability),
                format!("Predicted at: {}", result.timestamp),
            ]
        })
        .unwrap_or_default();
    (lines, false)
}
