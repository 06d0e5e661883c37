// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

mod chat;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use compass::{CompassConfig, Normalizer, RouteForm, SlotValidator};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    Chat,

    Normalize {
        #[arg(long)]
        text: Option<String>,
        #[arg(long, value_delimiter = ',')]
        restrict_to: Vec<String>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "compass-demo")]
#[command(
    about = "Normalize campus building descriptions and walk the route form from the terminal."
)]
struct Cli {
    #[arg(long, default_value_t = false)]
    debug: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    let filter = if args.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("debug,reqwest=info,hyper=info,h2=info,hyper_util=info,rustls=info")
        })
    } else {
        EnvFilter::new("warn,compass=info,reqwest=warn,hyper=warn,h2=warn,hyper_util=warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => CompassConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => CompassConfig::from_env().context("failed to configure the building normalizer")?,
    };
    let normalizer = Normalizer::from_config(&config)?;
    info!(model = %config.provider.model, top_k = normalizer.top_k(), "Starting CampusCompass demo");

    match args.command {
        Commands::Normalize { text, restrict_to } => {
            let restriction = (!restrict_to.is_empty()).then_some(restrict_to.as_slice());
            let judgment = normalizer.normalize(text.as_deref(), restriction).await;
            println!("{}", serde_json::to_string_pretty(&judgment)?);
        }
        Commands::Chat => {
            chat::run(RouteForm::new(SlotValidator::new(normalizer))).await?;
        }
    }

    Ok(())
}
