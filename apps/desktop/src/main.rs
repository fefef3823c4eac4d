use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{Controller, HttpBackend, Intent, ScreenState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::Action;

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL, e.g. http://localhost:1111
    #[arg(long)]
    backend_url: Option<String>,
    /// Previously issued credential to resume on startup.
    #[arg(long)]
    token: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(v) = args.backend_url {
        settings.backend_url = v;
    }
    if let Some(v) = args.token {
        settings.session_token = Some(v);
    }
    if let Some(v) = args.log_filter {
        settings.log_filter = v;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let client_config = settings.client_config()?;
    tracing::info!(backend_url = client_config.base_url(), "starting recipe client");
    let backend = match settings.session_token.clone() {
        Some(token) => HttpBackend::with_token(client_config.clone(), token),
        None => HttpBackend::new(client_config.clone()),
    };
    let mut controller = Controller::new(Arc::new(backend), &client_config);

    println!("{}", render::render(&controller.view()));
    controller.startup().await;
    load_on_dashboard_entry(&mut controller, ScreenState::Loading).await;
    println!("{}", render::render(&controller.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let action = match commands::into_action(command).await {
            Ok(action) => action,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };
        match action {
            Action::Dispatch(intent) => {
                let before = controller.state().screen();
                controller.dispatch(intent).await;
                load_on_dashboard_entry(&mut controller, before).await;
            }
            Action::Show => {}
            Action::Quit => break,
        }
        println!("{}", render::render(&controller.view()));
    }

    Ok(())
}

/// The dashboard asks for the collection whenever it is entered.
async fn load_on_dashboard_entry(controller: &mut Controller, before: ScreenState) {
    if before != ScreenState::Dashboard && controller.state().screen() == ScreenState::Dashboard {
        controller.dispatch(Intent::LoadCollection).await;
    }
}
