mod cli;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use kaji_config::Config;
use kaji_tui::{App, AppOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Handle subcommands first (before loading config)
    if let Some(cmd) = &cli.command {
        match cmd {
            Commands::Completions { shell } => {
                cli::print_completions(*shell);
                return Ok(());
            }
            Commands::ShowConfig => {
                let config = kaji_config::load(cli.config.as_deref())?;
                println!("{}", serde_yaml::to_string(&config).unwrap_or_default());
                return Ok(());
            }
        }
    }

    let mut config = kaji_config::load(cli.config.as_deref())?;
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    tracing::debug!(provider = %config.model.provider, model = %config.model.name, "configuration loaded");
    let config = Arc::new(config);

    if cli.is_headless() {
        run_headless(cli, config).await
    } else {
        run_tui(cli, config).await
    }
}

/// Run one analysis and print the rendered result to stdout.
async fn run_headless(cli: Cli, config: Arc<Config>) -> anyhow::Result<()> {
    let topic = match cli.topic {
        Some(t) => t,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading topic from stdin")?;
            let topic = buf.trim().to_string();
            if topic.is_empty() {
                anyhow::bail!("headless mode needs a topic: kaji --headless \"<topic>\"");
            }
            topic
        }
    };

    // The analysis may use a stronger model than discussion turns.
    let mut model_cfg = config.model.clone();
    model_cfg.name = config.model.analysis_model().to_string();
    let provider = kaji_model::from_config(&model_cfg)?;

    let analysis = kaji_core::analyze(provider.as_ref(), &config.prompt, &topic).await?;

    // Flatten the styled tree for plain stdout so the output pipes cleanly.
    for line in kaji_markdown::render_markdown(&analysis, 100, true) {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        println!("{text}");
    }
    Ok(())
}

async fn run_tui(cli: Cli, config: Arc<Config>) -> anyhow::Result<()> {
    let terminal = ratatui::init();

    let opts = AppOptions { initial_topic: cli.topic };
    let app = App::new(config, opts);
    let result = app.run(terminal).await;

    ratatui::restore();
    result
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
