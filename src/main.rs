use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use marketing_kit::{
    load_settings, App, Clipboard, Command, Flow, HttpGenerationService, MemoryClipboard, SystemClipboard,
    routes::{PendingGeneration, HELP},
};

#[derive(Debug, Parser)]
#[command(name = "marketing_kit", about = "Generate a marketing kit for a small business")]
struct Cli {
    /// Base URL of the generation service (overrides MARKETING_KIT_SERVICE_URL)
    #[arg(long)]
    service_url: Option<String>,
    /// Request timeout in seconds, 0 to disable (overrides MARKETING_KIT_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Pre-fill the business name and submit right away
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Keep copies in memory instead of touching the system clipboard
    #[arg(long)]
    no_clipboard: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init tracing on stderr; stdout carries the screens.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = load_settings()
        .with_service_url(cli.service_url.clone())
        .with_timeout_secs(cli.timeout_secs);
    tracing::info!(url = %settings.generate_url(), timeout = ?settings.request_timeout, "Starting marketing kit client");

    let service = Arc::new(HttpGenerationService::new(&settings)?);
    let memory = Arc::new(MemoryClipboard::new());
    let clipboard: Arc<dyn Clipboard> = if cli.no_clipboard { memory.clone() } else { Arc::new(SystemClipboard) };
    let mut app = App::new(service, clipboard);

    let mut initial: Option<PendingGeneration> = None;
    if let Some(name) = cli.name {
        app.dispatch(Command::SetName(name)).await?;
        if let Some(description) = cli.description {
            app.dispatch(Command::SetDescription(description)).await?;
        }
        match app.spawn_submit() {
            Ok(task) => initial = Some(task),
            Err(e) => println!("⚠️  {e}"),
        }
    }

    println!("{}", app.render());
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut pending = initial;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut ctrl_c => {
                if let Some(task) = pending.take() {
                    task.abort();
                }
                None
            }
            joined = async {
                match pending.as_mut() {
                    Some(task) => task.await,
                    None => std::future::pending().await,
                }
            }, if pending.is_some() => {
                pending = None;
                app.complete_submit(joined);
                println!("{}", app.render());
                continue;
            }
        };
        let Some(line) = line else { break };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => { println!("⚠️  {e}"); continue; }
        };

        // The request runs on its own task so input and Ctrl-C stay live while it is out.
        if command == Command::Submit {
            match app.spawn_submit() {
                Ok(task) => pending = Some(task),
                Err(e) => println!("⚠️  {e}"),
            }
            println!("{}", app.render());
            continue;
        }

        let show_help = command == Command::Help;
        let copies_before = memory.writes().len();

        match app.dispatch(command).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => println!("⚠️  {e}"),
        }

        if show_help { println!("{HELP}"); continue; }
        if let Some(copied) = memory.writes().get(copies_before..).and_then(|w| w.last().cloned()) {
            println!("📋 {copied}");
        }
        println!("{}", app.render());
    }

    if let Some(task) = pending {
        task.abort();
    }
    tracing::info!("👋 Bye");
    Ok(())
}
